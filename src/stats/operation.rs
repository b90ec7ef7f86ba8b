// src/stats/operation.rs
//! 操作统计 - 跟踪哈希表操作次数与耗时

use crate::types::OperationType;
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

/// 操作统计接口
pub trait OperationRecorder: Send + Sync {
    /// 记录操作
    fn record(&self, op_type: OperationType, duration: Duration, success: bool);

    /// 获取操作统计快照
    fn snapshot(&self) -> OperationStatsSnapshot;

    /// 重置统计
    fn reset(&self);

    /// 导出Prometheus格式指标
    fn export_prometheus(&self) -> String;
}

/// 操作统计快照
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OperationStatsSnapshot {
    pub insert_count: u64,
    pub find_count: u64,
    pub delete_count: u64,
    pub list_count: u64,
    pub clear_count: u64,
    /// 重复键插入次数
    pub duplicate_count: u64,
    /// 查找/删除未命中次数
    pub miss_count: u64,
    pub total_duration: u64, // 纳秒
}

impl OperationStatsSnapshot {
    /// 获取指定操作的计数
    pub fn count(&self, op_type: OperationType) -> u64 {
        match op_type {
            OperationType::Insert => self.insert_count,
            OperationType::Find => self.find_count,
            OperationType::Delete => self.delete_count,
            OperationType::List => self.list_count,
            OperationType::Clear => self.clear_count,
        }
    }
}

/// 原子操作统计
#[derive(Debug, Default)]
pub struct AtomicOperationStats {
    insert_count: AtomicU64,
    find_count: AtomicU64,
    delete_count: AtomicU64,
    list_count: AtomicU64,
    clear_count: AtomicU64,
    duplicate_count: AtomicU64,
    miss_count: AtomicU64,
    total_duration: AtomicU64, // 纳秒
}

impl AtomicOperationStats {
    /// 创建新统计
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, op_type: OperationType) -> &AtomicU64 {
        match op_type {
            OperationType::Insert => &self.insert_count,
            OperationType::Find => &self.find_count,
            OperationType::Delete => &self.delete_count,
            OperationType::List => &self.list_count,
            OperationType::Clear => &self.clear_count,
        }
    }
}

impl OperationRecorder for AtomicOperationStats {
    fn record(&self, op_type: OperationType, duration: Duration, success: bool) {
        self.counter(op_type).fetch_add(1, Ordering::Relaxed);
        self.total_duration
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);

        // 失败的插入是重复键，失败的查找/删除是未命中
        if !success {
            match op_type {
                OperationType::Insert => self.duplicate_count.fetch_add(1, Ordering::Relaxed),
                OperationType::Find | OperationType::Delete => {
                    self.miss_count.fetch_add(1, Ordering::Relaxed)
                }
                OperationType::List | OperationType::Clear => return,
            };
        }
    }

    fn snapshot(&self) -> OperationStatsSnapshot {
        OperationStatsSnapshot {
            insert_count: self.insert_count.load(Ordering::Relaxed),
            find_count: self.find_count.load(Ordering::Relaxed),
            delete_count: self.delete_count.load(Ordering::Relaxed),
            list_count: self.list_count.load(Ordering::Relaxed),
            clear_count: self.clear_count.load(Ordering::Relaxed),
            duplicate_count: self.duplicate_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
            total_duration: self.total_duration.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        for op in OperationType::ALL {
            self.counter(op).store(0, Ordering::Relaxed);
        }
        self.duplicate_count.store(0, Ordering::Relaxed);
        self.miss_count.store(0, Ordering::Relaxed);
        self.total_duration.store(0, Ordering::Relaxed);
    }

    fn export_prometheus(&self) -> String {
        let mut output = String::new();

        for op in OperationType::ALL {
            let count = self.counter(op).load(Ordering::Relaxed);
            output.push_str(&format!(
                "# HELP chained_operation_{}_count Total {} operations\n",
                op.as_str(), op.as_str()
            ));
            output.push_str(&format!(
                "# TYPE chained_operation_{}_count counter\n",
                op.as_str()
            ));
            output.push_str(&format!(
                "chained_operation_{}_count {}\n",
                op.as_str(), count
            ));
        }

        output.push_str("# HELP chained_operation_duplicate_count Rejected duplicate inserts\n");
        output.push_str("# TYPE chained_operation_duplicate_count counter\n");
        output.push_str(&format!(
            "chained_operation_duplicate_count {}\n",
            self.duplicate_count.load(Ordering::Relaxed)
        ));

        output.push_str("# HELP chained_operation_miss_count Lookups and deletes of absent keys\n");
        output.push_str("# TYPE chained_operation_miss_count counter\n");
        output.push_str(&format!(
            "chained_operation_miss_count {}\n",
            self.miss_count.load(Ordering::Relaxed)
        ));

        output.push_str("# HELP chained_operation_total_duration Total operation duration (ns)\n");
        output.push_str("# TYPE chained_operation_total_duration counter\n");
        output.push_str(&format!(
            "chained_operation_total_duration {}\n",
            self.total_duration.load(Ordering::Relaxed)
        ));

        output
    }
}

/// 禁用操作统计实现
#[derive(Default)]
pub struct DisabledOperationRecorder;

impl OperationRecorder for DisabledOperationRecorder {
    fn record(&self, _op_type: OperationType, _duration: Duration, _success: bool) {}
    fn snapshot(&self) -> OperationStatsSnapshot { OperationStatsSnapshot::default() }
    fn reset(&self) {}
    fn export_prometheus(&self) -> String { String::new() }
}
