use crate::error::{AppError, FileError};
use crate::models::order::OrderTask;
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// 从 CSV 文件加载订单任务列表
///
/// 按表头映射列（orderNo / email，兼容若干别名），与列顺序无关。
pub fn load_tasks_from_csv(csv_path: &str) -> Result<Vec<OrderTask>> {
    let path = Path::new(csv_path);

    if !path.exists() {
        return Err(AppError::File(FileError::NotFound {
            path: csv_path.to_string(),
        })
        .into());
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| AppError::csv_parse_failed(csv_path, e))?;

    let mut tasks = Vec::new();
    for result in reader.deserialize() {
        let task: OrderTask = result.map_err(|e| AppError::csv_parse_failed(csv_path, e))?;
        tasks.push(task);
    }

    info!("✓ 从 {} 加载了 {} 个订单任务", csv_path, tasks.len());

    Ok(tasks)
}
