// ==========================================
// 感染防控报告 - 数据源
// ==========================================
// 职责: 定义报告取数接口（不包含网络实现）
// 说明: 重试策略属于数据源内部，控制器只依赖"最终会结束"
// ==========================================

pub mod error;
pub mod static_source;

use crate::domain::report::ReportSnapshot;
use async_trait::async_trait;

pub use error::{FetchError, FetchResult};
pub use static_source::StaticReportSource;

// ==========================================
// ReportDataSource Trait
// ==========================================
// 用途: 控制器刷新时异步拉取完整报告集合
// 实现者: StaticReportSource（内存/文件）、网络层适配器（外部）
#[async_trait]
pub trait ReportDataSource: Send + Sync {
    /// 拉取报告集合
    ///
    /// # 返回
    /// - Ok(Vec<ReportSnapshot>): 完整集合（整体替换，不合并）
    /// - Err(FetchError): 网络或解析失败
    async fn fetch_reports(&self) -> FetchResult<Vec<ReportSnapshot>>;
}
