//! # Domain Entities
//!
//! ビジネスエンティティ（ExtractDefinition, ResultTable, ExtractReportなど）

pub mod extract;
pub mod extract_report;
pub mod result_table;
