// ==========================================
// 感染防控报告 - 数据源错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 取数错误
///
/// 控制器将其转换为 Error 状态，不向调用方抛出
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("网络请求失败: {0}")]
    Network(String),

    #[error("报告数据解析失败: {0}")]
    Parse(String),

    #[error("请求已取消")]
    Cancelled,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

/// Result 类型别名
pub type FetchResult<T> = Result<T, FetchError>;
