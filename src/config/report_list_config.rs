// ==========================================
// 感染防控报告 - 报告列表配置
// ==========================================
// 职责: 配置加载（默认值 → JSON 文件 → 环境变量覆写）
// ==========================================

use crate::domain::error::ConfigurationError;
use crate::domain::filter::FilterCriterion;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// 搜索防抖间隔默认值（毫秒）
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;

/// 默认语言
pub const DEFAULT_LOCALE: &str = "en";

// ==========================================
// ReportListConfig - 报告列表配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportListConfig {
    /// 搜索防抖间隔（毫秒）
    pub search_debounce_ms: u64,
    /// 预选防护类型（进入列表时自动带上的筛选条件）
    pub preselected_precaution: Option<String>,
    /// 提示文案语言
    pub locale: String,
}

impl Default for ReportListConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            preselected_precaution: None,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl ReportListConfig {
    /// 从 JSON 字符串解析（缺省字段取默认值）
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigurationError> {
        let config: ReportListConfig = serde_json::from_str(raw)?;
        config.validated()
    }

    /// 从 JSON 文件加载
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// 用进程环境变量覆写
    ///
    /// # 环境变量
    /// - INFECTION_REPORTS_SEARCH_DEBOUNCE_MS
    /// - INFECTION_REPORTS_PRESELECTED_PRECAUTION
    /// - INFECTION_REPORTS_LOCALE
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// 用任意键值来源覆写（无法解析的值忽略并告警）
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(config_keys::ENV_SEARCH_DEBOUNCE_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => self.search_debounce_ms = ms,
                _ => tracing::warn!(
                    key = config_keys::ENV_SEARCH_DEBOUNCE_MS,
                    value = %raw,
                    "忽略无效的防抖间隔配置"
                ),
            }
        }

        if let Some(raw) = lookup(config_keys::ENV_PRESELECTED_PRECAUTION) {
            let label = raw.trim();
            self.preselected_precaution = if label.is_empty() {
                None
            } else {
                Some(label.to_string())
            };
        }

        if let Some(raw) = lookup(config_keys::ENV_LOCALE) {
            let locale = raw.trim();
            if !locale.is_empty() {
                self.locale = locale.to_string();
            }
        }

        self
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// 初始选择集（预选防护类型）
    pub fn initial_selection(&self) -> Vec<FilterCriterion> {
        self.preselected_precaution
            .iter()
            .map(|label| FilterCriterion::precaution_type(label.clone()))
            .collect()
    }

    fn validated(self) -> Result<Self, ConfigurationError> {
        if self.search_debounce_ms == 0 {
            return Err(ConfigurationError::InvalidValue {
                key: config_keys::SEARCH_DEBOUNCE_MS.to_string(),
                value: "0".to_string(),
                message: "防抖间隔必须大于 0".to_string(),
            });
        }
        Ok(self)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // JSON 配置键
    pub const SEARCH_DEBOUNCE_MS: &str = "search_debounce_ms";
    pub const PRESELECTED_PRECAUTION: &str = "preselected_precaution";
    pub const LOCALE: &str = "locale";

    // 环境变量
    pub const ENV_SEARCH_DEBOUNCE_MS: &str = "INFECTION_REPORTS_SEARCH_DEBOUNCE_MS";
    pub const ENV_PRESELECTED_PRECAUTION: &str = "INFECTION_REPORTS_PRESELECTED_PRECAUTION";
    pub const ENV_LOCALE: &str = "INFECTION_REPORTS_LOCALE";
    /// 取值 "json" 时输出 JSON 格式日志
    pub const ENV_LOG_FORMAT: &str = "INFECTION_REPORTS_LOG_FORMAT";
}
