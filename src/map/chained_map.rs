//! 分离链接哈希表核心实现

use crate::{
    error::TableError,
    hash::{HashStrategy, RotatingHashStrategy},
    map::{bucket::Bucket, entry::Entry, DEFAULT_BUCKET_COUNT, DEFAULT_CONFIG},
    stats::{MemoryStatsSnapshot, OperationStatsSnapshot, StatsRecorder, StatsRecorderFactory},
    types::{ListedEntry, Listing, OperationType},
};
use std::{fmt, sync::Arc, time::Instant};

/// 哈希表配置
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainedTableConfig {
    /// 桶数量，构造后固定不变
    pub bucket_count: usize,
    pub enable_stats: bool,
}

impl Default for ChainedTableConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            enable_stats: true,
        }
    }
}

impl ChainedTableConfig {
    /// 使用指定桶数量的配置
    pub fn with_bucket_count(bucket_count: usize) -> Self {
        Self {
            bucket_count,
            ..Self::default()
        }
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), TableError> {
        if self.bucket_count == 0 {
            return Err(TableError::InvalidConfig {
                reason: "桶数量必须大于0".into(),
            });
        }
        Ok(())
    }
}

/// 哈希表统计信息
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TableStats {
    pub size: usize,
    pub bucket_count: usize,
    pub empty_bucket_count: usize,
    pub longest_chain: usize,
    pub load_factor: f32,
    pub operations: OperationStatsSnapshot,
    pub memory: MemoryStatsSnapshot,
}

/// 分离链接哈希表
///
/// 桶数量固定；每个桶是按键升序排列的单向链表，全表键唯一。
/// 表独占所有条目，查找与列举都复制数据而不暴露内部引用。
pub struct ChainedTable {
    // 桶数组
    buckets: Box<[Bucket]>,

    // 配置
    config: ChainedTableConfig,

    // 哈希策略
    hasher: Box<dyn HashStrategy>,

    // 统计记录器
    stats_recorder: Arc<dyn StatsRecorder>,

    // 条目总数
    size: usize,
}

impl ChainedTable {
    /// 使用指定组件创建哈希表
    pub fn new(
        config: ChainedTableConfig,
        hasher: Box<dyn HashStrategy>,
        stats_recorder: Arc<dyn StatsRecorder>,
    ) -> Result<Self, TableError> {
        config.validate()?;
        if hasher.bucket_count() != config.bucket_count {
            return Err(TableError::InvalidConfig {
                reason: format!(
                    "哈希策略桶数量 {} 与配置 {} 不一致",
                    hasher.bucket_count(),
                    config.bucket_count
                ),
            });
        }
        Ok(Self::build(config, hasher, stats_recorder))
    }

    /// 按配置创建哈希表，使用默认哈希策略
    pub fn with_config(config: ChainedTableConfig) -> Result<Self, TableError> {
        let hasher = Box::new(RotatingHashStrategy::new(config.bucket_count));
        let stats_recorder = StatsRecorderFactory::create(config.enable_stats);
        Self::new(config, hasher, stats_recorder)
    }

    fn build(
        config: ChainedTableConfig,
        hasher: Box<dyn HashStrategy>,
        stats_recorder: Arc<dyn StatsRecorder>,
    ) -> Self {
        let buckets = (0..config.bucket_count).map(|_| Bucket::new()).collect();
        log_info!("创建哈希表, 桶数量: {}", config.bucket_count);

        Self {
            buckets,
            config,
            hasher,
            stats_recorder,
            size: 0,
        }
    }

    /// 计算键所在的桶索引
    ///
    /// 哈希策略返回的越界索引按桶数量取模，结果总在 `0..bucket_count` 内。
    pub fn hash_index(&self, key: &str) -> usize {
        let index = self.hasher.bucket_index(key.as_bytes());
        if index < self.buckets.len() {
            return index;
        }
        log_warn!("哈希策略返回越界桶索引 {}, 按桶数量 {} 取模", index, self.buckets.len());
        index % self.buckets.len()
    }

    /// 插入键和负载副本
    ///
    /// 重复键返回 [`TableError::DuplicateKey`]，表保持不变，已存储的负载不受影响。
    /// 空负载是合法输入。
    pub fn insert(&mut self, key: &str, payload: &[u8]) -> Result<(), TableError> {
        let start = Instant::now();
        let index = self.hash_index(key);
        let result = self.buckets[index].insert(key, payload);
        self.stats_recorder
            .record_operation(OperationType::Insert, start.elapsed(), result.is_ok());

        match result {
            Ok(placement) => {
                self.size += 1;
                self.stats_recorder
                    .memory_stats()
                    .record_allocation(key.len() + payload.len());
                if placement.appended {
                    log_debug!("键 {} 追加到桶[{}]", key, index);
                } else {
                    log_debug!("键 {} 插入到桶[{}] 第{}位", key, index, placement.position);
                }
                Ok(())
            }
            Err(err) => {
                log_debug!("重复键 {} 被丢弃 (桶[{}])", key, index);
                Err(err)
            }
        }
    }

    /// 查找键并返回负载副本
    pub fn find(&self, key: &str) -> Result<Vec<u8>, TableError> {
        let mut payload = Vec::new();
        self.find_into(key, &mut payload)?;
        Ok(payload)
    }

    /// 查找键并把负载复制到调用方缓冲区，返回负载长度
    ///
    /// 命中时缓冲区原有内容被替换；未命中时缓冲区不变。
    pub fn find_into(&self, key: &str, buffer: &mut Vec<u8>) -> Result<usize, TableError> {
        let start = Instant::now();
        let index = self.hash_index(key);
        let found = self.buckets[index].get(key);
        self.stats_recorder
            .record_operation(OperationType::Find, start.elapsed(), found.is_some());

        match found {
            Some(entry) => {
                buffer.clear();
                buffer.extend_from_slice(entry.payload());
                log_debug!("键 {} 位于桶[{}], 负载 {} 字节", key, index, entry.payload_size());
                Ok(entry.payload_size())
            }
            None => {
                log_debug!("键 {} 不存在", key);
                Err(TableError::not_found(key))
            }
        }
    }

    /// 检查键是否存在
    pub fn contains_key(&self, key: &str) -> bool {
        self.buckets[self.hash_index(key)].get(key).is_some()
    }

    /// 删除键，释放其键与负载副本
    pub fn delete(&mut self, key: &str) -> Result<(), TableError> {
        let start = Instant::now();
        let index = self.hash_index(key);
        let result = self.buckets[index].remove(key);
        self.stats_recorder
            .record_operation(OperationType::Delete, start.elapsed(), result.is_ok());

        match result {
            Ok(entry) => {
                self.size -= 1;
                self.stats_recorder
                    .memory_stats()
                    .record_deallocation(entry.owned_bytes());
                log_debug!("键 {} 已从桶[{}] 删除", key, index);
                Ok(())
            }
            Err(err) => {
                log_debug!("键 {} 不存在, 无法删除", key);
                Err(err)
            }
        }
    }

    /// 列举全部条目及空桶数
    pub fn list_all(&self) -> Listing {
        let start = Instant::now();
        let listing = Listing {
            entries: self.iter().collect(),
            empty_bucket_count: self.empty_bucket_count(),
        };
        self.stats_recorder
            .record_operation(OperationType::List, start.elapsed(), true);
        log_info!(
            "列举完成: {} 个键, 空桶: {}",
            listing.entries.len(),
            listing.empty_bucket_count
        );
        listing
    }

    /// 按桶索引、桶内键序惰性遍历条目副本
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            buckets: &self.buckets,
            next_bucket: 0,
            bucket_index: 0,
            cursor: None,
            remaining: self.size,
        }
    }

    /// 释放全部条目
    pub fn clear(&mut self) {
        let start = Instant::now();
        self.release_all();
        self.stats_recorder
            .record_operation(OperationType::Clear, start.elapsed(), true);
    }

    fn release_all(&mut self) {
        let (mut entries, mut bytes) = (0, 0);
        for bucket in self.buckets.iter_mut() {
            let (count, size) = bucket.clear();
            entries += count;
            bytes += size;
        }
        self.size = 0;
        self.stats_recorder
            .memory_stats()
            .record_deallocations(entries as u64, bytes);
        log_debug!("已释放 {} 个条目 ({} 字节)", entries, bytes);
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// 指定桶中的条目数
    pub fn bucket_len(&self, index: usize) -> Option<usize> {
        self.buckets.get(index).map(Bucket::len)
    }

    pub fn empty_bucket_count(&self) -> usize {
        self.buckets.iter().filter(|bucket| bucket.is_empty()).count()
    }

    pub fn load_factor(&self) -> f32 {
        self.size as f32 / self.buckets.len() as f32
    }

    /// 检查所有桶是否保持严格升序
    pub fn is_well_ordered(&self) -> bool {
        self.buckets.iter().all(Bucket::is_sorted)
    }

    pub fn config(&self) -> &ChainedTableConfig {
        &self.config
    }

    pub fn stats_recorder(&self) -> &Arc<dyn StatsRecorder> {
        &self.stats_recorder
    }

    /// 获取统计信息
    pub fn stats(&self) -> TableStats {
        TableStats {
            size: self.size,
            bucket_count: self.buckets.len(),
            empty_bucket_count: self.empty_bucket_count(),
            longest_chain: self.buckets.iter().map(Bucket::len).max().unwrap_or(0),
            load_factor: self.load_factor(),
            operations: self.stats_recorder.operation_stats_snapshot(),
            memory: self.stats_recorder.memory_stats_snapshot(),
        }
    }

    /// 导出Prometheus格式指标
    pub fn export_prometheus(&self) -> String {
        let mut output = self.stats_recorder.export_prometheus();
        output.push_str("# HELP chained_table_size Stored entries\n");
        output.push_str("# TYPE chained_table_size gauge\n");
        output.push_str(&format!("chained_table_size {}\n", self.size));
        output.push_str("# HELP chained_table_empty_buckets Buckets without entries\n");
        output.push_str("# TYPE chained_table_empty_buckets gauge\n");
        output.push_str(&format!(
            "chained_table_empty_buckets {}\n",
            self.empty_bucket_count()
        ));
        output
    }
}

impl Default for ChainedTable {
    fn default() -> Self {
        let config = DEFAULT_CONFIG.clone();
        let hasher = Box::new(RotatingHashStrategy::new(config.bucket_count));
        let stats_recorder = StatsRecorderFactory::create(config.enable_stats);
        Self::build(config, hasher, stats_recorder)
    }
}

impl Drop for ChainedTable {
    fn drop(&mut self) {
        if self.size > 0 {
            self.release_all();
        }
    }
}

impl fmt::Debug for ChainedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedTable")
            .field("size", &self.size)
            .field("bucket_count", &self.buckets.len())
            .field("empty_buckets", &self.empty_bucket_count())
            .finish()
    }
}

fn listed(bucket_index: usize, entry: &Entry) -> ListedEntry {
    ListedEntry {
        bucket_index,
        key: entry.key().to_owned(),
        payload: entry.payload().to_vec(),
        payload_size: entry.payload_size(),
    }
}

/// 哈希表迭代器，产出条目副本
pub struct Iter<'a> {
    buckets: &'a [Bucket],
    next_bucket: usize,
    bucket_index: usize,
    cursor: Option<&'a Entry>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = ListedEntry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.cursor {
                self.cursor = entry.next();
                self.remaining -= 1;
                return Some(listed(self.bucket_index, entry));
            }

            // 当前桶遍历完毕，转到下一个桶
            let bucket = self.buckets.get(self.next_bucket)?;
            self.bucket_index = self.next_bucket;
            self.next_bucket += 1;
            self.cursor = bucket.head();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a ChainedTable {
    type Item = ListedEntry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
