// ==========================================
// 感染防控报告 - 引擎层
// ==========================================
// 职责: 选择集规则、列表推导、搜索防抖、变更通知
// 红线: 推导引擎为纯函数，不持有可变状态
// ==========================================

pub mod debounce;
pub mod derivation;
pub mod events;
pub mod selection;

// 重导出核心引擎
pub use debounce::SearchDebouncer;
pub use derivation::{derive, ReportDeriver};
pub use events::{ListenerId, ListenerRegistry, ReportListEvent, ReportListListener};
pub use selection::SelectionSet;
