//! 核心类型定义 - 共享类型和接口

use std::fmt::{self, Display};

/// 列举时复制出的条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    pub bucket_index: usize,
    pub key: String,
    pub payload: Vec<u8>,
    pub payload_size: usize,
}

impl ListedEntry {
    /// 以字符串形式查看负载 (去掉末尾的 NUL)
    pub fn payload_lossy(&self) -> String {
        let bytes = match self.payload.split_last() {
            Some((&0, rest)) => rest,
            _ => &self.payload[..],
        };
        String::from_utf8_lossy(bytes).into_owned()
    }
}

impl Display for ListedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bucket[{}] key: {}, payload: {}, size= {} bytes",
            self.bucket_index,
            self.key,
            self.payload_lossy(),
            self.payload_size
        )
    }
}

/// 全表列举结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// 按桶索引升序、桶内按键升序排列
    pub entries: Vec<ListedEntry>,
    pub empty_bucket_count: usize,
}

impl Listing {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按顺序返回所有键
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }
}

impl IntoIterator for Listing {
    type Item = ListedEntry;
    type IntoIter = std::vec::IntoIter<ListedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// 插入操作
    Insert,
    /// 查找操作
    Find,
    /// 删除操作
    Delete,
    /// 列举操作
    List,
    /// 清空操作
    Clear,
}

impl OperationType {
    pub const ALL: [OperationType; 5] = [
        OperationType::Insert,
        OperationType::Find,
        OperationType::Delete,
        OperationType::List,
        OperationType::Clear,
    ];

    /// 判断是否为读操作
    pub fn is_read(&self) -> bool {
        matches!(self, OperationType::Find | OperationType::List)
    }

    /// 判断是否为写操作
    pub fn is_write(&self) -> bool {
        !self.is_read()
    }

    /// 转换为字符串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Insert => "insert",
            OperationType::Find => "find",
            OperationType::Delete => "delete",
            OperationType::List => "list",
            OperationType::Clear => "clear",
        }
    }
}
