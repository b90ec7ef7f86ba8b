//! 哈希策略模块 - 定义桶定位策略

use std::any::Any;

/// 哈希策略特征
pub trait HashStrategy: Send + Sync {
    /// 获取键对应的桶索引
    fn bucket_index(&self, key: &[u8]) -> usize;

    /// 策略覆盖的桶数量
    fn bucket_count(&self) -> usize;

    /// 批量定位桶位置
    fn locate_batch(&self, keys: &[&[u8]]) -> Vec<usize> {
        keys.iter().map(|key| self.bucket_index(key)).collect()
    }

    /// 作为Any类型，支持向下转型
    fn as_any(&self) -> &dyn Any;
}
