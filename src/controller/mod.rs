// ==========================================
// 感染防控报告 - 控制器层
// ==========================================
// 职责: 报告列表状态编排（取数、筛选、搜索、通知）
// ==========================================

pub mod list_report;
pub mod status;

pub use list_report::ListReportController;
pub use status::{RefreshOutcome, ReportListStatus};
