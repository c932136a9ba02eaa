//! 字段提取服务 - 业务能力层
//!
//! 只负责"从结果页取字段"能力，不关心流程
//!
//! 订单在不同状态下页面标记会在两套写法之间变化，
//! 因此部分字段配有按优先级排列的定位器链：链上第一个
//! 取到非空文本的定位器胜出，全部落空则字段缺失（None）。

use crate::infrastructure::PageText;
use crate::models::order::ExtractedFields;
use anyhow::Result;
use regex::Regex;

/// 预计送达日期：发货后与发货前两种标记
const EXPECTED_DELIVERY_LOCATORS: [&str; 2] = [
    r#"//div[@data-auto-id="order-shipment-expected-delivery-date-date"]"#,
    r#"//div[@data-auto-id="order-shipment-delivery-date-date"]"#,
];

const STATUS_LOCATOR: &str = r#"//div[@data-testid="status-label"]"#;

/// 已出单号时的运单描述段落
const TRACKING_DESCRIPTION_LOCATOR: &str = r#"//p[@class="tracking-description___3iTmt"]"#;

/// 还没有单号的订单，同一区域显示的是状态描述
const STATUS_DESCRIPTION_LOCATOR: &str = r#"//div[@data-auto-id="status-description"]"#;

const PRODUCT_NAME_LOCATOR: &str = r#"//h3[@data-auto-id="product-name"]"#;

const PRODUCT_SIZE_LOCATOR: &str =
    r#"//dl[@data-auto-id="product-attributes"]/dd[@data-auto-id="product-size"]"#;

const PRODUCT_COLOR_LOCATOR: &str =
    r#"//dl[@data-auto-id="product-attributes"]/dd[@data-auto-id="product-color"]"#;

const PRODUCT_CODE_LOCATOR: &str =
    r#"//dl[@data-auto-id="product-attributes"]/dd[@data-auto-id="product-code"]"#;

/// 收货地址，同时用作"结果页已出现"的标记元素
pub const SHIPPING_ADDRESS_LOCATOR: &str =
    r#"//address[@data-auto-id="order-details-address-shipping"]"#;

/// 运单描述的前缀；页面上可能渲染成实体写法或不间断空格
const TRACKING_PREFIX_PATTERN: &str = r"^Tracking number:(?:&nbsp;|\s)*";

/// 字段提取服务
///
/// 职责：
/// - 按定位器链提取九个逻辑字段
/// - 字段缺失返回 None，绝不报错
/// - 不出现 Vec<OrderTask>
/// - 不关心流程顺序
pub struct FieldExtractor;

impl FieldExtractor {
    /// 创建新的字段提取服务
    pub fn new() -> Self {
        Self
    }

    /// 提取结果页上的全部八个页面字段
    pub async fn extract_fields(&self, probe: &impl PageText) -> Result<ExtractedFields> {
        Ok(ExtractedFields {
            expected_delivery: self.expected_delivery(probe).await?,
            status: self.status(probe).await?,
            tracking: self.tracking(probe).await?,
            product_name: probe.text_by_xpath(PRODUCT_NAME_LOCATOR).await?,
            size: probe.text_by_xpath(PRODUCT_SIZE_LOCATOR).await?,
            color: probe.text_by_xpath(PRODUCT_COLOR_LOCATOR).await?,
            product_code: probe.text_by_xpath(PRODUCT_CODE_LOCATOR).await?,
            address: probe.text_by_xpath(SHIPPING_ADDRESS_LOCATOR).await?,
        })
    }

    /// 预计送达日期（两个定位器依次尝试）
    pub async fn expected_delivery(&self, probe: &impl PageText) -> Result<Option<String>> {
        self.first_match(probe, &EXPECTED_DELIVERY_LOCATORS).await
    }

    /// 订单状态标签
    pub async fn status(&self, probe: &impl PageText) -> Result<Option<String>> {
        probe.text_by_xpath(STATUS_LOCATOR).await
    }

    /// 运单号
    ///
    /// 优先取运单描述段落并剥掉前缀；取不到时回退到状态描述，
    /// 状态描述原样返回（此时订单还没有单号）。
    pub async fn tracking(&self, probe: &impl PageText) -> Result<Option<String>> {
        if let Some(text) = probe.text_by_xpath(TRACKING_DESCRIPTION_LOCATOR).await? {
            let prefix = Regex::new(TRACKING_PREFIX_PATTERN)?;
            return Ok(Some(prefix.replace(&text, "").into_owned()));
        }

        probe.text_by_xpath(STATUS_DESCRIPTION_LOCATOR).await
    }

    /// 依次尝试定位器链，第一个取到非空文本的胜出
    async fn first_match(
        &self,
        probe: &impl PageText,
        locators: &[&str],
    ) -> Result<Option<String>> {
        for locator in locators {
            if let Some(text) = probe.text_by_xpath(locator).await? {
                return Ok(Some(text));
            }
        }
        Ok(None)
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}
