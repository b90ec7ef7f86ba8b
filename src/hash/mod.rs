//! 哈希模块 - 统一管理哈希相关功能

pub mod strategy;
pub mod rotating;

pub use strategy::HashStrategy;
pub use rotating::{hash, raw_hash, RotatingHashStrategy, HASH_INIT_VALUE, HASH_MULTIPLIER};

/// 默认哈希策略
pub fn default_hash_strategy(bucket_count: usize) -> Box<dyn HashStrategy> {
    Box::new(RotatingHashStrategy::new(bucket_count))
}

/// 哈希工具函数
///
/// # Panics
///
/// `bucket_count` 为 0 时发生除零 panic。
pub fn calculate_bucket(hash: u64, bucket_count: usize) -> usize {
    (hash % bucket_count as u64) as usize
}
