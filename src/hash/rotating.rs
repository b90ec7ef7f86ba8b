//! 旋转乘法哈希 - 将字符串键映射为桶索引

use crate::hash::strategy::HashStrategy;
use std::any::Any;

/// 累加器初始值（质数）
pub const HASH_INIT_VALUE: u32 = 5381;
/// 乘数（质数）
pub const HASH_MULTIPLIER: u32 = 31;

/// 计算键的原始32位哈希值
///
/// 每个字节先做 `acc * 31 + c`（32位回绕），再交换高低16位。
#[inline]
pub fn raw_hash(key: &[u8]) -> u32 {
    key.iter().fold(HASH_INIT_VALUE, |acc, &c| {
        acc.wrapping_mul(HASH_MULTIPLIER)
            .wrapping_add(c as u32)
            .rotate_left(16)
    })
}

/// 计算键所在的桶索引 (0 ~ bucket_count-1)
///
/// # Panics
///
/// `bucket_count` 为 0 时发生除零 panic。
#[inline]
pub fn hash(key: &str, bucket_count: usize) -> usize {
    super::calculate_bucket(raw_hash(key.as_bytes()) as u64, bucket_count)
}

/// 旋转乘法哈希策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotatingHashStrategy {
    bucket_count: usize,
}

impl RotatingHashStrategy {
    /// 创建指定桶数量的策略
    ///
    /// 桶数量须大于 0，否则 [`HashStrategy::bucket_index`] 会除零 panic；
    /// 哈希表在配置校验时拒绝 0。
    pub fn new(bucket_count: usize) -> Self {
        Self { bucket_count }
    }
}

impl HashStrategy for RotatingHashStrategy {
    fn bucket_index(&self, key: &[u8]) -> usize {
        super::calculate_bucket(raw_hash(key) as u64, self.bucket_count)
    }

    fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
