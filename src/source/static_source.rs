// ==========================================
// 感染防控报告 - 内存数据源
// ==========================================
// 职责: 固定报告集合或固定错误（演示程序/测试使用）
// ==========================================

use super::{FetchError, FetchResult, ReportDataSource};
use crate::domain::report::ReportSnapshot;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Mutex;

enum Payload {
    Reports(Vec<ReportSnapshot>),
    Failure(String),
}

/// 内存数据源
///
/// 可在运行期替换返回内容，模拟后端数据变化
pub struct StaticReportSource {
    payload: Mutex<Payload>,
}

impl StaticReportSource {
    pub fn new(reports: Vec<ReportSnapshot>) -> Self {
        Self {
            payload: Mutex::new(Payload::Reports(reports)),
        }
    }

    /// 每次取数均失败（网络错误）
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            payload: Mutex::new(Payload::Failure(message.into())),
        }
    }

    /// 从 JSON 文件加载（报告数组）
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> FetchResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let reports: Vec<ReportSnapshot> = serde_json::from_str(&raw)?;
        tracing::info!(
            path = %path.as_ref().display(),
            count = reports.len(),
            "从文件加载报告"
        );
        Ok(Self::new(reports))
    }

    /// 替换后续取数返回的报告
    pub fn set_reports(&self, reports: Vec<ReportSnapshot>) {
        *self.lock() = Payload::Reports(reports);
    }

    /// 后续取数改为失败
    pub fn set_failure(&self, message: impl Into<String>) {
        *self.lock() = Payload::Failure(message.into());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Payload> {
        self.payload
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ReportDataSource for StaticReportSource {
    async fn fetch_reports(&self) -> FetchResult<Vec<ReportSnapshot>> {
        match &*self.lock() {
            Payload::Reports(reports) => Ok(reports.clone()),
            Payload::Failure(message) => Err(FetchError::Network(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_static_source_switches_payload() {
        let report = ReportSnapshot::new("John Smith", "Hand Hygiene", "Standard", "Room 1", Utc::now());
        let source = StaticReportSource::new(vec![report.clone()]);
        assert_eq!(source.fetch_reports().await.unwrap(), vec![report]);

        source.set_failure("offline");
        let err = source.fetch_reports().await.unwrap_err();
        assert!(matches!(err, FetchError::Network(ref m) if m == "offline"));

        source.set_reports(vec![]);
        assert!(source.fetch_reports().await.unwrap().is_empty());
    }
}
