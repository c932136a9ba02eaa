//! 报表写出服务 - 业务能力层
//!
//! 只负责"写结果 CSV"能力，不关心流程

use crate::error::AppError;
use crate::models::order::OrderRecord;
use anyhow::Result;
use tracing::info;

/// 输出列名，顺序固定
pub const REPORT_HEADERS: [&str; 10] = [
    "Order Number",
    "Email",
    "Expected Delivery",
    "Status",
    "Tracking Number",
    "Product Name",
    "Size",
    "Color",
    "Product Code",
    "Shipping Address",
];

/// 报表写出服务
///
/// 职责：
/// - 在全部任务结束后一次性写出结果 CSV
/// - 缺失字段写成空单元格
/// - 不出现队列 / 重试逻辑
pub struct ReportWriter {
    output_path: String,
}

impl ReportWriter {
    /// 创建新的报表写出服务
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            output_path: path.into(),
        }
    }

    /// 写出全部结果记录
    pub fn write(&self, records: &[OrderRecord]) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .from_path(&self.output_path)
            .map_err(|e| AppError::file_write_failed(&self.output_path, e))?;

        writer.write_record(REPORT_HEADERS)?;

        for record in records {
            writer.write_record([
                record.order_number.as_str(),
                record.email.as_str(),
                record.expected_delivery.as_deref().unwrap_or(""),
                record.status.as_deref().unwrap_or(""),
                record.tracking.as_deref().unwrap_or(""),
                record.product_name.as_deref().unwrap_or(""),
                record.size.as_deref().unwrap_or(""),
                record.color.as_deref().unwrap_or(""),
                record.product_code.as_deref().unwrap_or(""),
                record.address.as_deref().unwrap_or(""),
            ])?;
        }

        writer
            .flush()
            .map_err(|e| AppError::file_write_failed(&self.output_path, e))?;

        info!("✓ 已写出 {} 条结果到 {}", records.len(), self.output_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::{ExtractedFields, OrderRecord, OrderTask};

    fn sample_task(order_no: &str, email: &str) -> OrderTask {
        OrderTask {
            order_no: order_no.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_header_names_and_order_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let writer = ReportWriter::new(path.to_str().unwrap());

        writer.write(&[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.lines().next().unwrap(),
            "Order Number,Email,Expected Delivery,Status,Tracking Number,\
             Product Name,Size,Color,Product Code,Shipping Address"
        );
    }

    #[test]
    fn test_absent_fields_become_empty_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let writer = ReportWriter::new(path.to_str().unwrap());

        let record = OrderRecord::from_task(
            &sample_task("US1001", "a@x.com"),
            ExtractedFields {
                status: Some("In production".to_string()),
                ..Default::default()
            },
        );
        writer.write(&[record]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert_eq!(row, "US1001,a@x.com,,In production,,,,,,");
    }

    #[test]
    fn test_records_written_in_given_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let writer = ReportWriter::new(path.to_str().unwrap());

        let first = OrderRecord::from_task(
            &sample_task("US1001", "a@x.com"),
            ExtractedFields::default(),
        );
        let second = OrderRecord::from_task(
            &sample_task("US1002", "b@x.com"),
            ExtractedFields::default(),
        );
        writer.write(&[first, second]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let rows: Vec<&str> = content.lines().skip(1).collect();
        assert!(rows[0].starts_with("US1001,"));
        assert!(rows[1].starts_with("US1002,"));
    }
}
