//! 单个订单处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责单个订单任务的完整生命周期：
//!
//! 1. **资源独占**：为任务启动一个全新的无头浏览器实例
//! 2. **流程委托**：委托 OrderFlow 执行查询流程
//! 3. **保证释放**：成功或失败都关闭浏览器
//!
//! 任务之间不共享任何会话、Cookie 或缓存状态。

use anyhow::Result;
use tracing::{info, warn};

use crate::browser;
use crate::config::Config;
use crate::infrastructure::PageProbe;
use crate::models::order::{OrderRecord, OrderTask};
use crate::workflow::{OrderCtx, OrderFlow};

/// 处理单个订单任务
///
/// 步骤 1-6 中任何错误都会从这里返回给调度器重试；
/// 失败的任务不产生任何部分记录。
pub async fn process_order(
    task: &OrderTask,
    ctx: &OrderCtx,
    flow: &OrderFlow,
    config: &Config,
) -> Result<OrderRecord> {
    info!("checking: {}", task.order_no);

    // 每个任务独占一个浏览器实例，页面创建时已导航到查询页
    let (mut browser, page) = browser::launch_headless_browser(
        &config.target_url,
        config.chrome_executable.as_deref(),
    )
    .await?;

    let probe = PageProbe::new(page);
    let result = flow.run(&probe, task, ctx).await;

    // 成功与否都要关闭浏览器
    if let Err(e) = browser.close().await {
        warn!("[任务 {}] 关闭浏览器失败: {}", ctx.task_index, e);
    }
    let _ = browser.wait().await;

    result
}
