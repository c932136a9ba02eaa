//! 业务能力层
//!
//! 描述"我能做什么"，只处理单个订单，不关心流程顺序

pub mod field_extractor;
pub mod report_writer;

pub use field_extractor::FieldExtractor;
pub use report_writer::ReportWriter;
