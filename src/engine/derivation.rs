// ==========================================
// 感染防控报告 - 列表推导引擎
// ==========================================
// 职责: (全部报告, 选择集, 搜索文本) → 展示列表
// 流程: 分组筛选 → 排序 → 文本检索
// 红线: 纯函数，无内部状态，永不失败
// ==========================================

use crate::config::filter_registry::FilterGroupRegistry;
use crate::domain::filter::{FilterCriterion, FilterGroup, SortOption};
use crate::domain::report::ReportSnapshot;
use std::collections::HashSet;

// ==========================================
// ReportDeriver - 列表推导引擎
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportDeriver {
    // 无状态引擎,不需要注入依赖
}

impl ReportDeriver {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 推导展示列表
    ///
    /// # 参数
    /// - `reports`: 权威报告集合（数据源顺序）
    /// - `selection`: 当前选择集快照
    /// - `search_text`: 搜索文本（空白表示不检索）
    ///
    /// # 返回
    /// 筛选、排序、检索后的报告列表
    pub fn derive(
        &self,
        reports: &[ReportSnapshot],
        selection: &[FilterCriterion],
        search_text: &str,
    ) -> Vec<ReportSnapshot> {
        let mut list: Vec<ReportSnapshot> = reports
            .iter()
            .filter(|report| self.passes_filters(report, selection))
            .cloned()
            .collect();

        // 两种排序均为稳定排序，相等元素保持输入顺序
        match self.active_sort(selection) {
            Some(SortOption::NewReports) => {
                list.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
            }
            Some(SortOption::EmployeeNameAsc) => {
                list.sort_by_cached_key(|report| report.employee_name().to_lowercase());
            }
            None => {}
        }

        let needle = search_text.trim();
        if !needle.is_empty() {
            let needle_lower = needle.to_lowercase();
            list.retain(|report| report.matches_text(&needle_lower));
        }

        tracing::debug!(
            total = reports.len(),
            selected = selection.len(),
            shown = list.len(),
            "报告列表推导完成"
        );

        list
    }

    /// 筛选阶段：组内 OR，组间 AND；无条件的分组不约束
    fn passes_filters(&self, report: &ReportSnapshot, selection: &[FilterCriterion]) -> bool {
        FilterGroupRegistry::multi_select_groups().all(|group| {
            let labels = Self::labels_in(selection, group);
            if labels.is_empty() {
                return true;
            }
            report
                .attribute_for(group)
                .map(|value| labels.contains(value))
                .unwrap_or(false)
        })
    }

    fn labels_in(selection: &[FilterCriterion], group: FilterGroup) -> HashSet<&str> {
        selection
            .iter()
            .filter(|c| c.group() == group)
            .map(|c| c.label())
            .collect()
    }

    /// 当前生效的排序选项
    ///
    /// 未选择或无法识别时返回 None（保持数据源顺序）
    fn active_sort(&self, selection: &[FilterCriterion]) -> Option<SortOption> {
        selection
            .iter()
            .rev()
            .find(|c| c.group() == FilterGroup::SortBy)
            .and_then(FilterCriterion::sort_option)
    }
}

/// 便捷函数：使用无状态引擎推导
pub fn derive(
    reports: &[ReportSnapshot],
    selection: &[FilterCriterion],
    search_text: &str,
) -> Vec<ReportSnapshot> {
    ReportDeriver::new().derive(reports, selection, search_text)
}
