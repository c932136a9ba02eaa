use serde::{Deserialize, Serialize};

/// 一条待查询的订单任务（输入 CSV 的一行）
///
/// 两个字段的结构相等即视为同一任务；输入中重复的行不会去重，
/// 每一行都单独查询一次。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTask {
    #[serde(rename = "orderNo", alias = "orderNumber", alias = "Order Number", alias = "order_no")]
    pub order_no: String,

    #[serde(rename = "email", alias = "Email", alias = "E-mail")]
    pub email: String,
}

/// 从结果页提取出的八个字段
///
/// 每个字段都可能缺失：定位器链全部落空时为 None，不算错误。
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractedFields {
    pub expected_delivery: Option<String>,
    pub status: Option<String>,
    pub tracking: Option<String>,
    pub product_name: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub product_code: Option<String>,
    pub address: Option<String>,
}

/// 一条查询结果（输出 CSV 的一行）
///
/// 每个成功的任务恰好生成一条，生成后不再修改。
#[derive(Debug, Clone, Serialize)]
pub struct OrderRecord {
    pub order_number: String,
    pub email: String,
    pub expected_delivery: Option<String>,
    pub status: Option<String>,
    pub tracking: Option<String>,
    pub product_name: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub product_code: Option<String>,
    pub address: Option<String>,
}

impl OrderRecord {
    /// 由任务和提取结果组装一条记录，订单号和邮箱从任务复制
    pub fn from_task(task: &OrderTask, fields: ExtractedFields) -> Self {
        Self {
            order_number: task.order_no.clone(),
            email: task.email.clone(),
            expected_delivery: fields.expected_delivery,
            status: fields.status,
            tracking: fields.tracking,
            product_name: fields.product_name,
            size: fields.size,
            color: fields.color,
            product_code: fields.product_code,
            address: fields.address,
        }
    }
}
