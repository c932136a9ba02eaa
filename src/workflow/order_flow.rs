//! 订单查询流程 - 流程层
//!
//! 核心职责：定义"一个订单"的完整查询流程
//!
//! 流程顺序：
//! 1. 填入订单号和邮箱
//! 2. 提交表单（刻意连点两次）
//! 3. 等待结果页（导航完成 或 收货地址标记出现，超时不致命）
//! 4. 提取九个逻辑字段，组装 OrderRecord

use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::infrastructure::PageProbe;
use crate::models::order::{OrderRecord, OrderTask};
use crate::services::field_extractor::SHIPPING_ADDRESS_LOCATOR;
use crate::services::FieldExtractor;
use crate::workflow::order_ctx::OrderCtx;

const ORDER_NUMBER_FIELD: &str = "#order-tracker-page-order-number-field";
const EMAIL_FIELD: &str = "#order-tracker-page-email-field";
const SUBMIT_BUTTON: &str = ".gl-cta.gl-cta--primary.order-tracker__submit___2oWVr";

/// 订单查询流程
///
/// - 编排完整的单订单查询流程
/// - 决定何时填表、何时提交、何时提取
/// - 不持有任何资源（page）
/// - 只依赖业务能力（services）
pub struct OrderFlow {
    field_extractor: FieldExtractor,
    result_wait_secs: u64,
    verbose_logging: bool,
}

impl OrderFlow {
    /// 创建新的订单查询流程
    pub fn new(config: &Config) -> Self {
        Self {
            field_extractor: FieldExtractor::new(),
            result_wait_secs: config.result_wait_secs,
            verbose_logging: config.verbose_logging,
        }
    }

    pub async fn run(
        &self,
        probe: &PageProbe,
        task: &OrderTask,
        ctx: &OrderCtx,
    ) -> Result<OrderRecord> {
        // ========== 流程 1: 填入查询条件 ==========
        probe.fill(ORDER_NUMBER_FIELD, &task.order_no).await?;
        probe.fill(EMAIL_FIELD, &task.email).await?;

        // ========== 流程 2: 提交表单 ==========
        probe.click(SUBMIT_BUTTON).await?;

        // 页面偶尔吞掉第一次点击，这里刻意再点一次；
        // 第二次点击时按钮可能已随跳转消失，失败可忽略
        if let Err(e) = probe.click(SUBMIT_BUTTON).await {
            debug!("[任务 {}] 第二次提交点击未生效: {}", ctx.task_index, e);
        }

        // ========== 流程 3: 等待结果页 ==========
        self.wait_for_result(probe, ctx).await;

        // ========== 流程 4: 提取字段 ==========
        let fields = self.field_extractor.extract_fields(probe).await?;

        if self.verbose_logging {
            self.log_fields(ctx, &fields);
        }

        info!(
            "[任务 {}] ✓ 提取完成，状态: {}",
            ctx.task_index,
            fields.status.as_deref().unwrap_or("未知")
        );

        Ok(OrderRecord::from_task(task, fields))
    }

    /// 等待导航完成或收货地址标记出现，二者先到先得
    ///
    /// 两个分支都允许静默失败，超时后照常进入提取：
    /// 半加载的结果页上仍可能有可用字段。
    async fn wait_for_result(&self, probe: &PageProbe, ctx: &OrderCtx) {
        let wait = async {
            tokio::select! {
                _ = probe.wait_for_navigation() => {}
                _ = probe.wait_for_xpath(SHIPPING_ADDRESS_LOCATOR) => {}
            }
        };

        let settled = tokio::time::timeout(Duration::from_secs(self.result_wait_secs), wait).await;

        if settled.is_err() {
            warn!(
                "[任务 {}] ⚠️ 等待结果页超过 {} 秒，继续尝试提取",
                ctx.task_index, self.result_wait_secs
            );
        }
    }

    // ========== 日志辅助方法 ==========

    /// 显示提取出的字段明细
    fn log_fields(&self, ctx: &OrderCtx, fields: &crate::models::order::ExtractedFields) {
        info!(
            "[任务 {}]   预计送达: {:?}",
            ctx.task_index, fields.expected_delivery
        );
        info!("[任务 {}]   运单号: {:?}", ctx.task_index, fields.tracking);
        info!(
            "[任务 {}]   商品: {:?} / {:?} / {:?}",
            ctx.task_index, fields.product_name, fields.size, fields.color
        );
    }
}
