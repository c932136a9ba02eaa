//! 重试调度器 - 编排层
//!
//! 两个集合上的状态机：工作队列（FIFO）和失败列表。
//! 队列耗尽且失败列表非空时，失败列表按原顺序变成新一轮队列；
//! 两者都为空时流水线结束。
//!
//! 没有重试上限，也没有退避延迟：一个每次都失败的任务
//! 会在单次运行内无限重试。
//! 纯同步、不做任何 I/O，便于用假的执行器驱动测试。

use std::collections::VecDeque;

use tracing::info;

use crate::models::order::{OrderRecord, OrderTask};

/// 重试调度器
pub struct RetryScheduler {
    /// 等待处理的任务，FIFO
    queue: VecDeque<OrderTask>,
    /// 本轮失败的任务，按失败顺序
    failed: Vec<OrderTask>,
    /// 成功任务的结果累积
    records: Vec<OrderRecord>,
    /// 当前轮次，从1开始
    pass: usize,
    /// 已分发的任务次数（含重试）
    attempts: usize,
}

impl RetryScheduler {
    /// 用初始任务列表创建调度器
    pub fn new(tasks: Vec<OrderTask>) -> Self {
        Self {
            queue: tasks.into(),
            failed: Vec::new(),
            records: Vec::new(),
            pass: 1,
            attempts: 0,
        }
    }

    /// 取下一个待处理任务
    ///
    /// 队列空而失败列表非空时先做换轮：失败列表按原顺序
    /// 整体搬进队列，轮次加一。两个集合都空时返回 None。
    pub fn next_task(&mut self) -> Option<OrderTask> {
        if self.queue.is_empty() && !self.failed.is_empty() {
            info!(
                "🔁 第 {} 轮结束，重试 {} 个失败任务...",
                self.pass,
                self.failed.len()
            );
            self.queue.extend(self.failed.drain(..));
            self.pass += 1;
        }

        let task = self.queue.pop_front();
        if task.is_some() {
            self.attempts += 1;
        }
        task
    }

    /// 记录一次成功，结果进入累积列表
    pub fn record_success(&mut self, record: OrderRecord) {
        self.records.push(record);
    }

    /// 记录一次失败，任务进入失败列表等待下一轮
    pub fn record_failure(&mut self, task: OrderTask) {
        self.failed.push(task);
    }

    /// 当前轮次（从1开始）
    pub fn pass(&self) -> usize {
        self.pass
    }

    /// 已分发的任务次数（含重试）
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// 队列和失败列表是否都已清空
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.failed.is_empty()
    }

    /// 已累积的成功结果数
    pub fn completed(&self) -> usize {
        self.records.len()
    }

    /// 取出全部结果，按成功顺序
    pub fn into_records(self) -> Vec<OrderRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::ExtractedFields;

    fn task(order_no: &str, email: &str) -> OrderTask {
        OrderTask {
            order_no: order_no.to_string(),
            email: email.to_string(),
        }
    }

    fn record_for(t: &OrderTask) -> OrderRecord {
        OrderRecord::from_task(t, ExtractedFields::default())
    }

    #[test]
    fn test_fifo_drain_all_success() {
        let mut scheduler = RetryScheduler::new(vec![
            task("US1001", "a@x.com"),
            task("US1002", "b@x.com"),
            task("US1003", "c@x.com"),
        ]);

        let mut seen = Vec::new();
        while let Some(t) = scheduler.next_task() {
            seen.push(t.order_no.clone());
            let record = record_for(&t);
            scheduler.record_success(record);
        }

        assert_eq!(seen, vec!["US1001", "US1002", "US1003"]);
        assert_eq!(scheduler.pass(), 1);
        assert_eq!(scheduler.attempts(), 3);
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.into_records().len(), 3);
    }

    #[test]
    fn test_requeue_preserves_failure_order() {
        let mut scheduler = RetryScheduler::new(vec![
            task("US1001", "a@x.com"),
            task("US1002", "b@x.com"),
            task("US1003", "c@x.com"),
        ]);

        // 第一轮：前两个失败，第三个成功
        let mut first_pass_failures = 0;
        while let Some(t) = scheduler.next_task() {
            if scheduler.pass() > 1 {
                // 进入第二轮，校验重试顺序后全部放行
                scheduler.record_success(record_for(&t));
                continue;
            }
            if t.order_no == "US1003" {
                scheduler.record_success(record_for(&t));
            } else {
                first_pass_failures += 1;
                scheduler.record_failure(t);
            }
        }

        assert_eq!(first_pass_failures, 2);
        assert_eq!(scheduler.pass(), 2);

        // 成功顺序：US1003 先完成，之后按失败顺序重试 US1001、US1002
        let order: Vec<String> = scheduler
            .into_records()
            .into_iter()
            .map(|r| r.order_number)
            .collect();
        assert_eq!(order, vec!["US1003", "US1001", "US1002"]);
    }

    #[test]
    fn test_flaky_task_converges_in_success_order() {
        // US1002 第一次抛错、重试成功：输出两条，顺序是成功顺序而非输入顺序
        let mut scheduler =
            RetryScheduler::new(vec![task("US1001", "a@x.com"), task("US1002", "b@x.com")]);

        let mut us1002_attempts = 0;
        while let Some(t) = scheduler.next_task() {
            if t.order_no == "US1002" {
                us1002_attempts += 1;
                if us1002_attempts == 1 {
                    scheduler.record_failure(t);
                    continue;
                }
            }
            scheduler.record_success(record_for(&t));
        }

        assert_eq!(scheduler.pass(), 2);
        assert_eq!(scheduler.attempts(), 3);

        let order: Vec<String> = scheduler
            .into_records()
            .into_iter()
            .map(|r| r.order_number)
            .collect();
        assert_eq!(order, vec!["US1001", "US1002"]);
    }

    #[test]
    fn test_always_failing_task_never_terminates() {
        // 界定轮数观察不终止：这记录的是现状行为，不一定是理想行为
        let mut scheduler = RetryScheduler::new(vec![task("US9999", "x@x.com")]);

        while let Some(t) = scheduler.next_task() {
            scheduler.record_failure(t);
            if scheduler.pass() >= 5 {
                break;
            }
        }

        assert_eq!(scheduler.pass(), 5);
        assert_eq!(scheduler.attempts(), 5);
        assert_eq!(scheduler.completed(), 0);
        assert!(!scheduler.is_idle());
    }

    #[test]
    fn test_duplicate_tasks_each_produce_a_record() {
        let mut scheduler =
            RetryScheduler::new(vec![task("US1001", "a@x.com"), task("US1001", "a@x.com")]);

        while let Some(t) = scheduler.next_task() {
            scheduler.record_success(record_for(&t));
        }

        assert_eq!(scheduler.into_records().len(), 2);
    }
}
