//! 统计模块 - 统一管理哈希表性能指标

pub mod recorder;
pub mod operation;
pub mod memory;

pub use recorder::{StatsRecorder, TableStatsRecorder, StatsRecorderFactory, DisabledStatsRecorder};
pub use operation::{OperationRecorder, OperationStatsSnapshot, AtomicOperationStats};
pub use memory::{MemoryRecorder, MemoryStatsSnapshot, AtomicMemoryStats};
