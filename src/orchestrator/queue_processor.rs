//! 队列处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责任务队列的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、创建 OrderFlow
//! 2. **批量加载**：读取输入 CSV（`Vec<OrderTask>`）
//! 3. **顺序处理**：严格串行，上一个任务的浏览器关闭之前
//!    不取下一个任务
//! 4. **失败重试**：委托 RetryScheduler 做队列换轮
//! 5. **结果写出**：全部任务结束后一次性写出报表
//! 6. **全局统计**：汇总运行结果
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单个订单的细节
//! - **向下委托**：委托 order_processor 处理单个订单

use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::models;
use crate::orchestrator::order_processor;
use crate::orchestrator::retry_scheduler::RetryScheduler;
use crate::services::ReportWriter;
use crate::utils::logging;
use crate::workflow::{OrderCtx, OrderFlow};

/// 应用主结构
pub struct App {
    config: Config,
    flow: OrderFlow,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)?;

        log_startup(&config);

        let flow = OrderFlow::new(&config);

        Ok(Self { config, flow })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 加载所有待查询的订单
        info!("\n📁 正在读取订单输入...");
        let tasks = models::load_tasks_from_csv(&self.config.input_csv)?;

        if tasks.is_empty() {
            warn!("⚠️ 输入中没有订单任务，写出空报表后结束");
            ReportWriter::new(&self.config.output_csv).write(&[])?;
            return Ok(());
        }

        let total_tasks = tasks.len();
        log_tasks_loaded(total_tasks, &self.config.input_csv);

        // 逐个处理，失败的任务由调度器换轮重试
        let mut scheduler = RetryScheduler::new(tasks);

        while let Some(task) = scheduler.next_task() {
            let ctx = OrderCtx::new(task.order_no.clone(), scheduler.attempts(), scheduler.pass());

            match order_processor::process_order(&task, &ctx, &self.flow, &self.config).await {
                Ok(record) => {
                    scheduler.record_success(record);
                }
                Err(e) => {
                    error!("[任务 {}] ❌ 处理过程中发生错误: {}", ctx.task_index, e);
                    scheduler.record_failure(task);
                }
            }
        }

        let passes = scheduler.pass();
        let attempts = scheduler.attempts();
        let records = scheduler.into_records();

        // 写出报表（全部任务结束后一次性写出）
        ReportWriter::new(&self.config.output_csv).write(&records)?;

        // 输出最终统计
        print_final_stats(records.len(), total_tasks, passes, attempts, &self.config);

        Ok(())
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 订单状态批量查询");
    info!("📄 输入: {}", config.input_csv);
    info!("🌐 查询页: {}", config.target_url);
    info!("{}", "=".repeat(60));
}

fn log_tasks_loaded(total: usize, input_csv: &str) {
    info!("✓ 找到 {} 个待查询的订单（{}）", total, input_csv);
    info!("💡 严格串行处理，每个订单独占一个浏览器实例\n");
}

fn print_final_stats(
    success: usize,
    total: usize,
    passes: usize,
    attempts: usize,
    config: &Config,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("🔁 总尝试次数: {} (共 {} 轮)", attempts, passes);
    info!("{}", "=".repeat(60));
    info!("\n结果已保存至: {}", config.output_csv);
}
