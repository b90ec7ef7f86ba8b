//! 哈希表核心模块 - 实现分离链接哈希表及其组件

pub mod chained_map;
pub mod bucket;
pub mod entry;

pub use chained_map::{ChainedTable, ChainedTableConfig, Iter, TableStats};
pub use bucket::{Bucket, BucketIter, Placement};
pub use entry::Entry;

use once_cell::sync::Lazy;

/// 全局默认配置
pub static DEFAULT_CONFIG: Lazy<ChainedTableConfig> = Lazy::new(ChainedTableConfig::default);

/// 默认桶数量
pub const DEFAULT_BUCKET_COUNT: usize = 50;
