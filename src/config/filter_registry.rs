// ==========================================
// 感染防控报告 - 筛选分组登记表
// ==========================================
// 职责: 固定的筛选分组目录及单选/多选属性
// 红线: 只读配置，无副作用
// ==========================================

use crate::domain::error::ConfigurationError;
use crate::domain::filter::{FilterCriterion, FilterGroup, SortOption};
use crate::domain::report::ReportSnapshot;
use std::collections::HashSet;

/// 分组登记项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSpec {
    pub group: FilterGroup,
    pub single_select: bool,
}

// 展示顺序即筛选界面中的分组顺序
static GROUPS: [GroupSpec; 3] = [
    GroupSpec {
        group: FilterGroup::PrecautionType,
        single_select: false,
    },
    GroupSpec {
        group: FilterGroup::HealthPracticeType,
        single_select: false,
    },
    GroupSpec {
        group: FilterGroup::SortBy,
        single_select: true,
    },
];

// ==========================================
// FilterGroupRegistry - 筛选分组登记表
// ==========================================
pub struct FilterGroupRegistry;

impl FilterGroupRegistry {
    /// 全部分组（按展示顺序）
    pub fn groups() -> &'static [GroupSpec] {
        &GROUPS
    }

    /// 条件所属分组
    pub fn group_for(criterion: &FilterCriterion) -> FilterGroup {
        criterion.group()
    }

    /// 按名称查找分组
    pub fn group_named(name: &str) -> Result<FilterGroup, ConfigurationError> {
        name.parse()
    }

    pub fn is_single_select(group: FilterGroup) -> bool {
        GROUPS
            .iter()
            .find(|spec| spec.group == group)
            .map(|spec| spec.single_select)
            .unwrap_or(false)
    }

    /// 按名称查询单选属性（未知分组返回 ConfigurationError）
    pub fn is_single_select_named(name: &str) -> Result<bool, ConfigurationError> {
        Ok(Self::is_single_select(Self::group_named(name)?))
    }

    /// 多选分组（参与筛选阶段）
    pub fn multi_select_groups() -> impl Iterator<Item = FilterGroup> {
        GROUPS
            .iter()
            .filter(|spec| !spec.single_select)
            .map(|spec| spec.group)
    }

    /// "Sort By" 分组的固定选项
    pub fn sort_options() -> &'static [SortOption] {
        &SortOption::ALL
    }

    /// 从报告集合提取某分组的可选标签（去重，保持首次出现顺序）
    ///
    /// 排序分组返回固定排序选项
    pub fn labels_from_reports(group: FilterGroup, reports: &[ReportSnapshot]) -> Vec<String> {
        if group == FilterGroup::SortBy {
            return SortOption::ALL.iter().map(|opt| opt.label().to_string()).collect();
        }

        let mut seen = HashSet::new();
        reports
            .iter()
            .filter_map(|report| report.attribute_for(group))
            .filter(|label| seen.insert(label.to_string()))
            .map(str::to_string)
            .collect()
    }
}
