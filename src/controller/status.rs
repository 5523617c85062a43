// ==========================================
// 感染防控报告 - 列表状态
// ==========================================

use crate::i18n::t;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 报告列表加载状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportListStatus {
    Loading,
    Loaded,
    Empty,
    /// 取数失败（消息取自失败原因）
    Error(String),
}

impl ReportListStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, ReportListStatus::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ReportListStatus::Error(_))
    }

    /// 列表为空时的占位提示
    ///
    /// # 参数
    /// - `list_is_empty`: 当前展示列表是否为空
    ///
    /// # 返回
    /// - Some(String): 需展示的本地化提示
    /// - None: 列表有内容，或已加载但筛选结果为空
    pub fn placeholder_message(&self, list_is_empty: bool) -> Option<String> {
        if !list_is_empty {
            return None;
        }
        match self {
            ReportListStatus::Loading => Some(t("report_list.loading")),
            ReportListStatus::Empty => Some(t("report_list.empty")),
            ReportListStatus::Error(_) => Some(t("report_list.error")),
            ReportListStatus::Loaded => None,
        }
    }
}

impl fmt::Display for ReportListStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportListStatus::Loading => write!(f, "LOADING"),
            ReportListStatus::Loaded => write!(f, "LOADED"),
            ReportListStatus::Empty => write!(f, "EMPTY"),
            ReportListStatus::Error(message) => write!(f, "ERROR({})", message),
        }
    }
}

/// 单次刷新的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// 已应用（报告条数）
    Applied { count: usize },
    /// 取数失败，保留旧数据
    Failed(String),
    /// 被更新的刷新请求取代（或控制器已关闭），结果被丢弃
    Superseded,
}
