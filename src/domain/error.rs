// ==========================================
// 感染防控报告 - 领域错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 取数失败(FetchError)属于数据源层，见 source::error
// ==========================================

use thiserror::Error;

/// 配置错误
///
/// 未知筛选分组属于调用方缺陷，由构造函数以 Err 返回，不在运行期 panic
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("未知筛选分组: {0}")]
    UnknownGroup(String),

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("配置文件读取失败: {0}")]
    Io(String),

    #[error("配置 JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::io::Error> for ConfigurationError {
    fn from(err: std::io::Error) -> Self {
        ConfigurationError::Io(err.to_string())
    }
}

/// 选择集不变量违反
///
/// 单选分组内同时出现多个条件
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("单选分组 {group} 中存在 {count} 个条件（最多 1 个）")]
    SingleSelectGroup { group: String, count: usize },
}
