// ==========================================
// 感染防控报告 - 报告快照
// ==========================================
// 职责: 数据源返回的一条观察记录（只读）
// 红线: 构造后不可变，引擎只引用不修改
// ==========================================

use crate::domain::filter::FilterGroup;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 报告快照
///
/// 字段私有，只能通过 `new` / `with_id` 构造，之后仅提供只读访问。
/// JSON 字段名使用 camelCase（与后端载荷一致）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSnapshot {
    /// 报告 ID（落库前为空）
    #[serde(default)]
    id: Option<String>,
    /// 员工姓名
    employee_name: String,
    /// 卫生规范名称（如 "Hand Hygiene"）
    health_practice_name: String,
    /// 防护类型名称（如 "Standard"）
    precaution_type_name: String,
    /// 地点标签（如 "USC Unit 2 Room 123"）
    location_label: String,
    /// 报告时间
    timestamp: DateTime<Utc>,
}

impl ReportSnapshot {
    pub fn new(
        employee_name: impl Into<String>,
        health_practice_name: impl Into<String>,
        precaution_type_name: impl Into<String>,
        location_label: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            employee_name: employee_name.into(),
            health_practice_name: health_practice_name.into(),
            precaution_type_name: precaution_type_name.into(),
            location_label: location_label.into(),
            timestamp,
        }
    }

    /// 附带持久化 ID 的副本
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn employee_name(&self) -> &str {
        &self.employee_name
    }

    pub fn health_practice_name(&self) -> &str {
        &self.health_practice_name
    }

    pub fn precaution_type_name(&self) -> &str {
        &self.precaution_type_name
    }

    pub fn location_label(&self) -> &str {
        &self.location_label
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// 取该报告在某个筛选分组上的属性值
    ///
    /// # 返回
    /// - Some(&str): 多选分组对应的属性
    /// - None: 排序分组（不对应报告属性）
    pub fn attribute_for(&self, group: FilterGroup) -> Option<&str> {
        match group {
            FilterGroup::PrecautionType => Some(&self.precaution_type_name),
            FilterGroup::HealthPracticeType => Some(&self.health_practice_name),
            FilterGroup::SortBy => None,
        }
    }

    /// 文本检索：员工姓名 / 卫生规范 / 地点 任一包含关键字即命中
    ///
    /// `needle_lower` 需已转为小写
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        [
            &self.employee_name,
            &self.health_practice_name,
            &self.location_label,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle_lower))
    }
}
