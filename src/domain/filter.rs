// ==========================================
// 感染防控报告 - 筛选条件
// ==========================================
// 职责: 筛选分组、排序选项、单个筛选条件
// 说明: 分组单选/多选属性由 FilterGroupRegistry 统一登记
// ==========================================

use crate::config::filter_registry::FilterGroupRegistry;
use crate::domain::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 筛选分组 (Filter Group)
// ==========================================
// 序列化格式: 展示名称（与筛选界面一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FilterGroup {
    #[serde(rename = "Precaution Type")]
    PrecautionType, // 防护类型（多选）
    #[serde(rename = "Health Practice Type")]
    HealthPracticeType, // 卫生规范（多选）
    #[serde(rename = "Sort By")]
    SortBy, // 排序方式（单选）
}

impl FilterGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterGroup::PrecautionType => "Precaution Type",
            FilterGroup::HealthPracticeType => "Health Practice Type",
            FilterGroup::SortBy => "Sort By",
        }
    }
}

impl fmt::Display for FilterGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilterGroup {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Precaution Type" => Ok(FilterGroup::PrecautionType),
            "Health Practice Type" => Ok(FilterGroup::HealthPracticeType),
            "Sort By" => Ok(FilterGroup::SortBy),
            other => Err(ConfigurationError::UnknownGroup(other.to_string())),
        }
    }
}

// ==========================================
// 排序选项 (Sort Option)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOption {
    /// 最新报告优先（时间降序）
    NewReports,
    /// 员工姓名 A-Z（忽略大小写）
    EmployeeNameAsc,
}

impl SortOption {
    pub const ALL: [SortOption; 2] = [SortOption::NewReports, SortOption::EmployeeNameAsc];

    pub fn label(&self) -> &'static str {
        match self {
            SortOption::NewReports => "New Reports",
            SortOption::EmployeeNameAsc => "Employee Name (A-Z)",
        }
    }

    /// 按展示名称识别排序选项，无法识别返回 None（视为未排序）
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|opt| opt.label() == label.trim())
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 筛选条件 (Filter Criterion)
// ==========================================
/// 一个可选的筛选/排序值
///
/// 相等性按 (group, label) 判定
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterCriterion {
    label: String,
    group: FilterGroup,
}

impl FilterCriterion {
    /// 按分组名称构造（分组名称未知时返回 ConfigurationError）
    pub fn new(label: impl Into<String>, group_name: &str) -> Result<Self, ConfigurationError> {
        let group = group_name.parse::<FilterGroup>()?;
        Ok(Self::of(label, group))
    }

    pub fn of(label: impl Into<String>, group: FilterGroup) -> Self {
        Self {
            label: label.into(),
            group,
        }
    }

    pub fn precaution_type(label: impl Into<String>) -> Self {
        Self::of(label, FilterGroup::PrecautionType)
    }

    pub fn health_practice_type(label: impl Into<String>) -> Self {
        Self::of(label, FilterGroup::HealthPracticeType)
    }

    pub fn sort_by(option: SortOption) -> Self {
        Self::of(option.label(), FilterGroup::SortBy)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn group(&self) -> FilterGroup {
        self.group
    }

    /// 所属分组是否单选
    pub fn is_single_select(&self) -> bool {
        FilterGroupRegistry::is_single_select(self.group)
    }

    /// 若为可识别的排序条件，返回对应排序选项
    pub fn sort_option(&self) -> Option<SortOption> {
        match self.group {
            FilterGroup::SortBy => SortOption::from_label(&self.label),
            _ => None,
        }
    }
}

impl fmt::Display for FilterCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.group, self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_from_str() {
        assert_eq!("Sort By".parse::<FilterGroup>().unwrap(), FilterGroup::SortBy);
        assert_eq!(
            " Precaution Type ".parse::<FilterGroup>().unwrap(),
            FilterGroup::PrecautionType
        );

        let err = "Location".parse::<FilterGroup>().unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownGroup(ref g) if g == "Location"));
    }

    #[test]
    fn test_criterion_equality_by_group_and_label() {
        let a = FilterCriterion::precaution_type("Standard");
        let b = FilterCriterion::new("Standard", "Precaution Type").unwrap();
        let c = FilterCriterion::health_practice_type("Standard");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_criterion_arity_follows_group() {
        assert!(FilterCriterion::sort_by(SortOption::NewReports).is_single_select());
        assert!(!FilterCriterion::health_practice_type("PPE").is_single_select());
    }

    #[test]
    fn test_sort_option_lookup() {
        assert_eq!(SortOption::from_label("New Reports"), Some(SortOption::NewReports));
        assert_eq!(
            SortOption::from_label("Employee Name (A-Z)"),
            Some(SortOption::EmployeeNameAsc)
        );
        assert_eq!(SortOption::from_label("Oldest First"), None);

        let unknown = FilterCriterion::of("Oldest First", FilterGroup::SortBy);
        assert_eq!(unknown.sort_option(), None);
        assert_eq!(FilterCriterion::precaution_type("New Reports").sort_option(), None);
    }

    #[test]
    fn test_criterion_json_uses_display_group_name() {
        let criterion = FilterCriterion::health_practice_type("Hand Hygiene");
        let json = serde_json::to_string(&criterion).unwrap();
        assert!(json.contains("\"Health Practice Type\""));

        let back: FilterCriterion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, criterion);
    }
}
