// src/stats/recorder.rs
//! 统计记录器接口 - 定义统一统计API

use std::{sync::Arc, time::Duration};

use crate::{
    stats::{
        memory::{AtomicMemoryStats, DisabledMemoryRecorder, MemoryRecorder, MemoryStatsSnapshot},
        operation::{
            AtomicOperationStats, DisabledOperationRecorder, OperationRecorder,
            OperationStatsSnapshot,
        },
    },
    types::OperationType,
};

/// 统计记录器特征
pub trait StatsRecorder: Send + Sync {
    /// 获取操作统计接口
    fn operation_stats(&self) -> &dyn OperationRecorder;

    /// 获取内存统计接口
    fn memory_stats(&self) -> &dyn MemoryRecorder;

    /// 记录操作
    fn record_operation(&self, op_type: OperationType, duration: Duration, success: bool) {
        self.operation_stats().record(op_type, duration, success);
    }

    /// 重置所有统计
    fn reset(&self) {
        self.operation_stats().reset();
        self.memory_stats().reset();
    }

    /// 导出Prometheus格式指标
    fn export_prometheus(&self) -> String {
        let mut output = self.operation_stats().export_prometheus();
        output.push_str(&self.memory_stats().export_prometheus());
        output
    }

    /// 获取操作统计快照
    fn operation_stats_snapshot(&self) -> OperationStatsSnapshot {
        self.operation_stats().snapshot()
    }

    /// 获取内存统计快照
    fn memory_stats_snapshot(&self) -> MemoryStatsSnapshot {
        self.memory_stats().snapshot()
    }
}

/// 单表统计记录器
#[derive(Debug, Default)]
pub struct TableStatsRecorder {
    operation: AtomicOperationStats,
    memory: AtomicMemoryStats,
}

impl TableStatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsRecorder for TableStatsRecorder {
    fn operation_stats(&self) -> &dyn OperationRecorder {
        &self.operation
    }

    fn memory_stats(&self) -> &dyn MemoryRecorder {
        &self.memory
    }
}

/// 禁用统计的记录器
pub struct DisabledStatsRecorder;

impl StatsRecorder for DisabledStatsRecorder {
    fn operation_stats(&self) -> &dyn OperationRecorder { &DisabledOperationRecorder }
    fn memory_stats(&self) -> &dyn MemoryRecorder { &DisabledMemoryRecorder }
    fn record_operation(&self, _op_type: OperationType, _duration: Duration, _success: bool) {}
    fn export_prometheus(&self) -> String { String::new() }
}

/// 统计记录器工厂
pub struct StatsRecorderFactory;

impl StatsRecorderFactory {
    /// 创建默认记录器
    pub fn create_default() -> Arc<dyn StatsRecorder> {
        Arc::new(TableStatsRecorder::new())
    }

    /// 创建禁用统计的记录器
    pub fn create_disabled() -> Arc<dyn StatsRecorder> {
        Arc::new(DisabledStatsRecorder)
    }

    /// 按开关选择记录器
    pub fn create(enabled: bool) -> Arc<dyn StatsRecorder> {
        if enabled {
            Self::create_default()
        } else {
            Self::create_disabled()
        }
    }
}
