// ==========================================
// 感染防控报告 - 核心库
// ==========================================
// 职责: 报告列表状态引擎
//       (筛选/排序/搜索状态机 + 列表推导 + 异步刷新协调)
// 范围: 不含网络实现、持久化、界面渲染
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 报告与筛选条件
pub mod domain;

// 配置层 - 筛选分组目录与运行配置
pub mod config;

// 引擎层 - 选择集、推导、防抖、事件
pub mod engine;

// 数据源层 - 取数接口
pub mod source;

// 控制器层 - 状态编排
pub mod controller;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::{FilterGroupRegistry, ReportListConfig};
pub use controller::{ListReportController, RefreshOutcome, ReportListStatus};
pub use domain::{
    ConfigurationError, FilterCriterion, FilterGroup, InvariantViolation, ReportSnapshot,
    SortOption,
};
pub use engine::{derive, ReportDeriver, ReportListEvent, ReportListListener, SelectionSet};
pub use source::{FetchError, ReportDataSource, StaticReportSource};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Infection Prevention Reports";
