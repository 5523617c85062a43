// ==========================================
// 感染防控报告 - 配置层
// ==========================================
// 职责: 筛选分组目录 + 报告列表运行配置
// ==========================================

pub mod filter_registry;
pub mod report_list_config;

// 重导出
pub use filter_registry::{FilterGroupRegistry, GroupSpec};
pub use report_list_config::{config_keys, ReportListConfig};
