// src/map/bucket.rs
//! 桶实现 - 按键升序维护的单向链表

use crate::{error::TableError, map::entry::Entry};
use std::{cmp::Ordering, fmt};

/// 新条目在桶链表中的落点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// 插入后在链表中的下标
    pub position: usize,
    /// 是否追加到链表末尾
    pub appended: bool,
}

/// 有序查找结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seek {
    Found(usize),
    Vacant(usize),
}

/// 桶 - 键严格升序、无重复
#[derive(Default)]
pub struct Bucket {
    head: Option<Box<Entry>>,
    len: usize,
}

impl fmt::Debug for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(Entry::key)).finish()
    }
}

impl Bucket {
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn head(&self) -> Option<&Entry> {
        self.head.as_deref()
    }

    pub fn iter(&self) -> BucketIter<'_> {
        BucketIter { cursor: self.head.as_deref() }
    }

    /// 单次遍历定位键，返回结果和指向命中节点或插入点的链接
    ///
    /// 链接为头指针或前驱的 `next`；遇到更大的键立即停止。
    fn seek_mut(&mut self, key: &str) -> (Seek, &mut Option<Box<Entry>>) {
        let mut position = 0;
        let mut link = &mut self.head;
        loop {
            match link.as_deref().map(|entry| key.cmp(entry.key())) {
                Some(Ordering::Greater) => {}
                Some(Ordering::Equal) => return (Seek::Found(position), link),
                Some(Ordering::Less) | None => return (Seek::Vacant(position), link),
            }
            match link {
                Some(entry) => link = &mut entry.next,
                None => break,
            }
            position += 1;
        }
        (Seek::Vacant(position), link)
    }

    /// 按升序插入键和负载副本，重复键被拒绝且不做任何修改
    pub fn insert(&mut self, key: &str, payload: &[u8]) -> Result<Placement, TableError> {
        let (position, link) = match self.seek_mut(key) {
            (Seek::Found(_), _) => return Err(TableError::duplicate(key)),
            (Seek::Vacant(position), link) => (position, link),
        };

        let next = link.take();
        let appended = next.is_none();
        *link = Some(Box::new(Entry::new(key, payload, next)));
        self.len += 1;

        Ok(Placement { position, appended })
    }

    /// 查找键对应的条目
    pub fn get(&self, key: &str) -> Option<&Entry> {
        for entry in self.iter() {
            match key.cmp(entry.key()) {
                Ordering::Equal => return Some(entry),
                // 遇到更大的键，后面不可能匹配
                Ordering::Less => return None,
                Ordering::Greater => {}
            }
        }
        None
    }

    /// 从链表摘除键对应的条目并交还所有权
    pub fn remove(&mut self, key: &str) -> Result<Box<Entry>, TableError> {
        let link = match self.seek_mut(key) {
            (Seek::Found(_), link) => link,
            (Seek::Vacant(_), _) => return Err(TableError::not_found(key)),
        };

        let mut removed = link.take().ok_or_else(|| TableError::not_found(key))?;
        *link = removed.next.take();
        self.len -= 1;

        Ok(removed)
    }

    /// 释放全部条目，返回 (条目数, 字节数)
    pub fn clear(&mut self) -> (usize, usize) {
        let mut released = (0, 0);
        let mut link = self.head.take();
        // 逐个断开，避免长链递归析构
        while let Some(mut entry) = link {
            released.0 += 1;
            released.1 += entry.owned_bytes();
            link = entry.next.take();
        }
        self.len = 0;
        released
    }

    /// 检查链表是否严格升序
    pub fn is_sorted(&self) -> bool {
        self.iter()
            .zip(self.iter().skip(1))
            .all(|(prev, next)| prev.key() < next.key())
    }
}

impl Drop for Bucket {
    fn drop(&mut self) {
        self.clear();
    }
}

/// 桶内条目迭代器
pub struct BucketIter<'a> {
    cursor: Option<&'a Entry>,
}

impl<'a> Iterator for BucketIter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.cursor?;
        self.cursor = entry.next();
        Some(entry)
    }
}

impl<'a> IntoIterator for &'a Bucket {
    type Item = &'a Entry;
    type IntoIter = BucketIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(bucket: &Bucket) -> Vec<&str> {
        bucket.iter().map(Entry::key).collect()
    }

    fn filled(keys: &[&str]) -> Bucket {
        let mut bucket = Bucket::new();
        for key in keys {
            bucket.insert(key, format!("{}_data", key).as_bytes()).unwrap();
        }
        bucket
    }

    #[test]
    fn test_insert_keeps_ascending_order() {
        let bucket = filled(&["Matthew", "Leo", "Jayden", "Oliver", "Adam"]);
        assert_eq!(keys(&bucket), ["Adam", "Jayden", "Leo", "Matthew", "Oliver"]);
        assert_eq!(bucket.len(), 5);
        assert!(bucket.is_sorted());
    }

    #[test]
    fn test_insert_placement() {
        let mut bucket = Bucket::new();
        assert_eq!(
            bucket.insert("Leo", b"").unwrap(),
            Placement { position: 0, appended: true }
        );
        assert_eq!(
            bucket.insert("Matthew", b"").unwrap(),
            Placement { position: 1, appended: true }
        );
        assert_eq!(
            bucket.insert("Jayden", b"").unwrap(),
            Placement { position: 0, appended: false }
        );
        assert_eq!(
            bucket.insert("Lewis", b"").unwrap(),
            Placement { position: 2, appended: false }
        );
        assert_eq!(keys(&bucket), ["Jayden", "Leo", "Lewis", "Matthew"]);
    }

    #[test]
    fn test_duplicate_rejected_without_mutation() {
        let mut bucket = filled(&["Jayden", "Leo", "Matthew"]);
        let err = bucket.insert("Leo", b"other").unwrap_err();
        assert_eq!(err, TableError::DuplicateKey { key: "Leo".into() });
        assert_eq!(bucket.len(), 3);
        assert_eq!(bucket.get("Leo").unwrap().payload(), b"Leo_data");
    }

    #[test]
    fn test_get_hits_and_misses() {
        let bucket = filled(&["Benjamin", "Joshua", "Lewis"]);
        assert_eq!(bucket.get("Joshua").unwrap().payload(), b"Joshua_data");
        // 比所有键都小、夹在中间、比所有键都大
        assert!(bucket.get("Aaron").is_none());
        assert!(bucket.get("Jack").is_none());
        assert!(bucket.get("Zack").is_none());
        assert!(Bucket::new().get("anything").is_none());
    }

    #[test]
    fn test_remove_head_middle_tail() {
        let mut bucket = filled(&["a", "b", "c", "d"]);

        let removed = bucket.remove("b").unwrap();
        assert_eq!(removed.key(), "b");
        assert!(removed.next().is_none());
        assert_eq!(keys(&bucket), ["a", "c", "d"]);

        bucket.remove("a").unwrap();
        assert_eq!(keys(&bucket), ["c", "d"]);

        bucket.remove("d").unwrap();
        assert_eq!(keys(&bucket), ["c"]);

        bucket.remove("c").unwrap();
        assert!(bucket.is_empty());
        assert_eq!(bucket.len(), 0);
    }

    #[test]
    fn test_seek_mut_points_at_match_or_gap() {
        let mut bucket = filled(&["b", "d", "f"]);

        let (seek, link) = bucket.seek_mut("d");
        assert_eq!(seek, Seek::Found(1));
        assert_eq!(link.as_deref().map(Entry::key), Some("d"));

        let (seek, link) = bucket.seek_mut("e");
        assert_eq!(seek, Seek::Vacant(2));
        assert_eq!(link.as_deref().map(Entry::key), Some("f"));

        let (seek, link) = bucket.seek_mut("a");
        assert_eq!(seek, Seek::Vacant(0));
        assert_eq!(link.as_deref().map(Entry::key), Some("b"));

        let (seek, link) = bucket.seek_mut("z");
        assert_eq!(seek, Seek::Vacant(3));
        assert!(link.is_none());

        assert_eq!(Bucket::new().seek_mut("a").0, Seek::Vacant(0));
    }

    #[test]
    fn test_remove_missing_leaves_bucket_unchanged() {
        let mut bucket = filled(&["b", "d"]);
        for missing in ["a", "c", "e"] {
            assert_eq!(
                bucket.remove(missing).unwrap_err(),
                TableError::NotFound { key: missing.into() }
            );
        }
        assert_eq!(keys(&bucket), ["b", "d"]);
    }

    #[test]
    fn test_empty_key_and_payload() {
        let mut bucket = Bucket::new();
        bucket.insert("", b"").unwrap();
        bucket.insert("a", b"x").unwrap();
        assert_eq!(keys(&bucket), ["", "a"]);
        assert_eq!(bucket.get("").unwrap().payload_size(), 0);
        assert!(bucket.insert("", b"again").is_err());
    }

    #[test]
    fn test_byte_order_matches_strcmp() {
        // 大写字母排在小写字母之前
        let bucket = filled(&["b", "B", "a", "A"]);
        assert_eq!(keys(&bucket), ["A", "B", "a", "b"]);
    }

    #[test]
    fn test_clear_reports_released() {
        let mut bucket = filled(&["ab", "cd"]);
        // "ab" + "ab_data" + "cd" + "cd_data"
        assert_eq!(bucket.clear(), (2, 18));
        assert!(bucket.is_empty());
        assert_eq!(bucket.clear(), (0, 0));
    }

    #[test]
    fn test_long_chain_drop() {
        let mut bucket = Bucket::new();
        // 降序插入，每次都落在表头
        for i in (0..100_000).rev() {
            let placement = bucket.insert(&format!("key_{:06}", i), b"").unwrap();
            assert_eq!(placement.position, 0);
        }
        assert_eq!(bucket.len(), 100_000);
        drop(bucket);
    }

    #[test]
    fn test_debug_lists_keys() {
        let bucket = filled(&["Leo", "Jayden"]);
        assert_eq!(format!("{:?}", bucket), r#"["Jayden", "Leo"]"#);
    }
}
