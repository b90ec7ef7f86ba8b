//! 内存统计 - 跟踪条目持有的键与负载字节

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// 内存统计接口
pub trait MemoryRecorder: Send + Sync {
    /// 记录一个条目的分配
    fn record_allocation(&self, size: usize);

    /// 记录若干条目的释放
    fn record_deallocations(&self, count: u64, size: usize);

    /// 记录一个条目的释放
    fn record_deallocation(&self, size: usize) {
        self.record_deallocations(1, size);
    }

    /// 获取内存统计快照
    fn snapshot(&self) -> MemoryStatsSnapshot;

    /// 重置统计
    fn reset(&self);

    /// 导出Prometheus格式指标
    fn export_prometheus(&self) -> String;
}

/// 内存统计快照（非原子）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryStatsSnapshot {
    pub total_allocated: usize,
    pub current_used: usize,
    pub peak_used: usize,
    pub allocation_count: u64,
    pub deallocation_count: u64,
}

impl MemoryStatsSnapshot {
    /// 尚未释放的条目数
    pub fn live_allocations(&self) -> u64 {
        self.allocation_count.saturating_sub(self.deallocation_count)
    }
}

/// 原子内存统计
#[derive(Debug, Default)]
pub struct AtomicMemoryStats {
    total_allocated: AtomicUsize,
    current_used: AtomicUsize,
    peak_used: AtomicUsize,
    allocation_count: AtomicU64,
    deallocation_count: AtomicU64,
}

impl AtomicMemoryStats {
    /// 创建新统计
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryRecorder for AtomicMemoryStats {
    fn record_allocation(&self, size: usize) {
        self.allocation_count.fetch_add(1, Ordering::Relaxed);
        let new = self.current_used.fetch_add(size, Ordering::AcqRel) + size;
        self.peak_used.fetch_max(new, Ordering::AcqRel);
        self.total_allocated.fetch_add(size, Ordering::Relaxed);
    }

    fn record_deallocations(&self, count: u64, size: usize) {
        self.deallocation_count.fetch_add(count, Ordering::Relaxed);
        self.current_used.fetch_sub(size, Ordering::AcqRel);
    }

    fn snapshot(&self) -> MemoryStatsSnapshot {
        MemoryStatsSnapshot {
            total_allocated: self.total_allocated.load(Ordering::Relaxed),
            current_used: self.current_used.load(Ordering::Relaxed),
            peak_used: self.peak_used.load(Ordering::Relaxed),
            allocation_count: self.allocation_count.load(Ordering::Relaxed),
            deallocation_count: self.deallocation_count.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        self.total_allocated.store(0, Ordering::Relaxed);
        self.current_used.store(0, Ordering::Relaxed);
        self.peak_used.store(0, Ordering::Relaxed);
        self.allocation_count.store(0, Ordering::Relaxed);
        self.deallocation_count.store(0, Ordering::Relaxed);
    }

    fn export_prometheus(&self) -> String {
        let snapshot = self.snapshot();
        let mut output = String::new();

        output.push_str("# HELP chained_memory_total_allocated Total key and payload bytes copied in\n");
        output.push_str("# TYPE chained_memory_total_allocated counter\n");
        output.push_str(&format!(
            "chained_memory_total_allocated {}\n",
            snapshot.total_allocated
        ));

        output.push_str("# HELP chained_memory_current_used Key and payload bytes currently owned\n");
        output.push_str("# TYPE chained_memory_current_used gauge\n");
        output.push_str(&format!(
            "chained_memory_current_used {}\n",
            snapshot.current_used
        ));

        output.push_str("# HELP chained_memory_peak_used Peak owned bytes\n");
        output.push_str("# TYPE chained_memory_peak_used gauge\n");
        output.push_str(&format!("chained_memory_peak_used {}\n", snapshot.peak_used));

        output.push_str("# HELP chained_memory_allocation_count Entries created\n");
        output.push_str("# TYPE chained_memory_allocation_count counter\n");
        output.push_str(&format!(
            "chained_memory_allocation_count {}\n",
            snapshot.allocation_count
        ));

        output.push_str("# HELP chained_memory_deallocation_count Entries released\n");
        output.push_str("# TYPE chained_memory_deallocation_count counter\n");
        output.push_str(&format!(
            "chained_memory_deallocation_count {}\n",
            snapshot.deallocation_count
        ));

        output
    }
}

/// 禁用内存统计
#[derive(Default)]
pub struct DisabledMemoryRecorder;

impl MemoryRecorder for DisabledMemoryRecorder {
    fn record_allocation(&self, _size: usize) {}
    fn record_deallocations(&self, _count: u64, _size: usize) {}
    fn snapshot(&self) -> MemoryStatsSnapshot {
        MemoryStatsSnapshot::default()
    }
    fn reset(&self) {}
    fn export_prometheus(&self) -> String {
        String::new()
    }
}
