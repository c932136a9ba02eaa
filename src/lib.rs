//! # Order Status Checker
//!
//! 一个用于批量查询订单状态的 Rust 应用程序：从 CSV 读取订单号和邮箱，
//! 逐个驱动无头浏览器访问订单查询页，提取订单字段并汇总写出 CSV 报表。
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `PageProbe` - 唯一的 page owner，提供取文本 / 填表 / 点击 / 等待能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个订单
//! - `FieldExtractor` - 按定位器链提取页面字段的能力
//! - `ReportWriter` - 写结果 CSV 的能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个订单"的完整查询流程
//! - `OrderCtx` - 上下文封装（任务索引 + 轮次）
//! - `OrderFlow` - 流程编排（填表 → 提交 → 等待 → 提取）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/queue_processor` - 队列处理器，管理任务队列和资源
//! - `orchestrator/order_processor` - 单个订单处理器，独占一个浏览器实例
//! - `orchestrator/retry_scheduler` - 失败任务的重试调度
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::launch_headless_browser;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{PageProbe, PageText};
pub use models::{ExtractedFields, OrderRecord, OrderTask};
pub use orchestrator::{App, RetryScheduler};
pub use services::{FieldExtractor, ReportWriter};
pub use workflow::{OrderCtx, OrderFlow};
