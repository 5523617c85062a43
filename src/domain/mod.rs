// ==========================================
// 感染防控报告 - 领域模型层
// ==========================================
// 职责: 报告快照、筛选条件、领域错误
// 红线: 不含取数逻辑，不含列表推导逻辑
// ==========================================

pub mod error;
pub mod filter;
pub mod report;

// 重导出核心类型
pub use error::{ConfigurationError, InvariantViolation};
pub use filter::{FilterCriterion, FilterGroup, SortOption};
pub use report::ReportSnapshot;
