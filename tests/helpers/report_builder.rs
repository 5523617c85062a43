// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::{DateTime, TimeZone, Utc};
use infection_reports::ReportSnapshot;

// ==========================================
// ReportSnapshot 构建器
// ==========================================

pub struct ReportBuilder {
    id: Option<String>,
    employee_name: String,
    health_practice_name: String,
    precaution_type_name: String,
    location_label: String,
    timestamp: DateTime<Utc>,
}

impl ReportBuilder {
    pub fn new(employee_name: &str) -> Self {
        Self {
            id: None,
            employee_name: employee_name.to_string(),
            health_practice_name: "Hand Hygiene".to_string(),
            precaution_type_name: "Standard".to_string(),
            location_label: "USC Unit 2 Room 123".to_string(),
            timestamp: at(18, 9),
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn practice(mut self, practice: &str) -> Self {
        self.health_practice_name = practice.to_string();
        self
    }

    pub fn precaution(mut self, precaution: &str) -> Self {
        self.precaution_type_name = precaution.to_string();
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.location_label = location.to_string();
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn build(self) -> ReportSnapshot {
        let report = ReportSnapshot::new(
            self.employee_name,
            self.health_practice_name,
            self.precaution_type_name,
            self.location_label,
            self.timestamp,
        );
        match self.id {
            Some(id) => report.with_id(id),
            None => report,
        }
    }
}

/// 2026 年 5 月某日某时
pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, day, hour, 0, 0).unwrap()
}

// ==========================================
// 常用场景数据
// ==========================================

/// John Smith / Hand Hygiene / Standard / T1
pub fn john_smith() -> ReportSnapshot {
    ReportBuilder::new("John Smith").id("r-1").at(at(18, 9)).build()
}

/// A Lee / PPE / Isolation / T2 (> T1)
pub fn a_lee() -> ReportSnapshot {
    ReportBuilder::new("A Lee")
        .id("r-2")
        .practice("PPE")
        .precaution("Isolation")
        .location("USC Unit 4 Room 202")
        .at(at(19, 14))
        .build()
}

pub fn two_reports() -> Vec<ReportSnapshot> {
    vec![john_smith(), a_lee()]
}

/// 覆盖多组属性的报告集合（后端顺序: 新 → 旧）
pub fn ward_reports() -> Vec<ReportSnapshot> {
    vec![
        ReportBuilder::new("maria Lopez")
            .practice("PPE")
            .precaution("Contact")
            .location("USC Unit 1 Room 101")
            .at(at(20, 8))
            .build(),
        ReportBuilder::new("John Smith")
            .practice("Hand Hygiene")
            .precaution("Standard")
            .at(at(19, 16))
            .build(),
        ReportBuilder::new("Brian Chu")
            .practice("Hand Hygiene")
            .precaution("Isolation")
            .location("USC Unit 3 Room 310")
            .at(at(19, 11))
            .build(),
        ReportBuilder::new("Aisha Khan")
            .practice("Respiratory")
            .precaution("Airborne")
            .location("USC Unit 4 Room 202")
            .at(at(17, 7))
            .build(),
        ReportBuilder::new("brian Chu")
            .practice("PPE")
            .precaution("Standard")
            .location("USC Unit 2 Room 222")
            .at(at(16, 12))
            .build(),
    ]
}
