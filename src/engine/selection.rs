// ==========================================
// 感染防控报告 - 选择集
// ==========================================
// 职责: 当前生效的筛选/排序条件（有序）
// 红线: 单选分组内最多 1 个条件；多选分组内不重复
// ==========================================

use crate::domain::error::InvariantViolation;
use crate::domain::filter::{FilterCriterion, FilterGroup};
use std::collections::HashMap;

/// 选择集
///
/// 插入顺序即展示顺序。单选分组追加新条件时先逐出旧条件，
/// 新条件追加到末尾（顺序反映每组最近一次选择）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    items: Vec<FilterCriterion>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 逐条 add 构建（批次中违反单选约束的旧条目被丢弃）
    pub fn from_criteria<I>(criteria: I) -> Self
    where
        I: IntoIterator<Item = FilterCriterion>,
    {
        let mut set = Self::new();
        for criterion in criteria {
            set.add(criterion);
        }
        set
    }

    /// 添加条件
    ///
    /// # 返回
    /// - true: 选择集发生变化
    /// - false: 多选条件已存在（无操作）
    pub fn add(&mut self, criterion: FilterCriterion) -> bool {
        if criterion.is_single_select() {
            let group = criterion.group();
            self.items.retain(|existing| existing.group() != group);
        } else if self.items.contains(&criterion) {
            return false;
        }

        self.items.push(criterion);
        debug_assert!(Self::validate(&self.items).is_ok());
        true
    }

    /// 移除第一个相等的条件，不存在时无操作
    pub fn remove(&mut self, criterion: &FilterCriterion) -> bool {
        match self.items.iter().position(|existing| existing == criterion) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// 按位置移除（越界无操作）
    pub fn remove_at(&mut self, index: usize) -> Option<FilterCriterion> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// 清空某个分组
    pub fn clear_group(&mut self, group: FilterGroup) {
        self.items.retain(|existing| existing.group() != group);
    }

    pub fn contains(&self, criterion: &FilterCriterion) -> bool {
        self.items.contains(criterion)
    }

    /// 只读视图（供渲染与推导）
    pub fn snapshot(&self) -> Vec<FilterCriterion> {
        self.items.clone()
    }

    pub fn as_slice(&self) -> &[FilterCriterion] {
        &self.items
    }

    /// 某分组内的条件
    pub fn in_group(&self, group: FilterGroup) -> impl Iterator<Item = &FilterCriterion> {
        self.items.iter().filter(move |c| c.group() == group)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 校验一组条件是否满足单选约束
    ///
    /// 用于外部提交的批次（筛选界面的最终选择）
    pub fn validate(criteria: &[FilterCriterion]) -> Result<(), InvariantViolation> {
        let mut counts: HashMap<FilterGroup, usize> = HashMap::new();
        for criterion in criteria.iter().filter(|c| c.is_single_select()) {
            *counts.entry(criterion.group()).or_insert(0) += 1;
        }

        match counts.into_iter().find(|(_, count)| *count > 1) {
            Some((group, count)) => Err(InvariantViolation::SingleSelectGroup {
                group: group.to_string(),
                count,
            }),
            None => Ok(()),
        }
    }
}
