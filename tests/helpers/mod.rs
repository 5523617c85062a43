// ==========================================
// 集成测试公共辅助
// ==========================================
#![allow(dead_code)]

pub mod mock_source;
pub mod report_builder;
