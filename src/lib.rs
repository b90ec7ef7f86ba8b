//! 固定桶数的分离链接哈希表
//!
//! 每个桶是按键升序维护的单向链表，键为字符串，值为任意长度的字节负载。
//!
//! ## 主要特性
//! - 重复键插入被拒绝，已有负载保持不变
//! - 查找遇到更大的键即提前结束
//! - 查找与列举返回数据副本，不暴露内部条目
//! - 操作计数与字节占用统计，可导出Prometheus格式
//!
//! ## 快速开始
//!
//! ```rust
//! use chained_hashtable::*;
//!
//! // 创建默认配置的哈希表 (50个桶)
//! let mut table = ChainedTable::default();
//!
//! // 插入键和负载
//! table.insert("Matthew", b"Matthew_data").expect("插入失败");
//!
//! // 重复键被拒绝
//! assert!(matches!(
//!     table.insert("Matthew", b""),
//!     Err(TableError::DuplicateKey { .. })
//! ));
//!
//! // 查找负载副本
//! assert_eq!(table.find("Matthew").unwrap(), b"Matthew_data");
//!
//! // 列举所有条目
//! let listing = table.list_all();
//! assert_eq!(listing.len(), 1);
//! assert_eq!(listing.empty_bucket_count, 49);
//!
//! // 删除键
//! table.delete("Matthew").unwrap();
//! assert!(table.find("Matthew").is_err());
//! ```


#![warn(clippy::all)]
#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {};
}
// 核心模块导出
pub mod error;
pub mod types;
pub mod map;
pub mod hash;
pub mod stats;

// 公共接口导出
pub use crate::{
    map::{
        ChainedTable,
        ChainedTableConfig,
        TableStats,
        Bucket,
        Placement,
        DEFAULT_BUCKET_COUNT,
        DEFAULT_CONFIG
    },
    hash::{
        HashStrategy,
        RotatingHashStrategy,
        default_hash_strategy,
        hash,
        raw_hash
    },
    stats::{
        StatsRecorder,
        StatsRecorderFactory,
        TableStatsRecorder
    },
    error::TableError,
    types::{ListedEntry, Listing, OperationType}
};

// 便捷功能函数

/// 批量插入，返回成功插入的条目数
///
/// 重复键被跳过并记录调试日志。
pub fn batch_insert<K, V>(
    table: &mut ChainedTable,
    items: impl IntoIterator<Item = (K, V)>,
) -> usize
where
    K: AsRef<str>,
    V: AsRef<[u8]>,
{
    let mut count = 0;
    for (key, payload) in items {
        match table.insert(key.as_ref(), payload.as_ref()) {
            Ok(()) => count += 1,
            Err(_err) => {
                log_debug!("批量插入跳过: {}", _err);
            }
        }
    }
    count
}

/// 批量查询
pub fn batch_find<K>(
    table: &ChainedTable,
    keys: impl IntoIterator<Item = K>,
) -> Vec<Option<Vec<u8>>>
where
    K: AsRef<str>,
{
    keys.into_iter()
        .map(|key| table.find(key.as_ref()).ok())
        .collect()
}
