//! 条目 - 桶链表中的单个节点

use std::fmt;

/// 桶链表节点，持有键和负载的副本
pub struct Entry {
    key: Box<str>,
    payload: Box<[u8]>,
    pub(crate) next: Option<Box<Entry>>,
}

impl Entry {
    pub(crate) fn new(key: &str, payload: &[u8], next: Option<Box<Entry>>) -> Self {
        Self {
            key: key.into(),
            payload: payload.into(),
            next,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn payload_size(&self) -> usize {
        self.payload.len()
    }

    /// 条目持有的字节数 (键 + 负载)
    pub fn owned_bytes(&self) -> usize {
        self.key.len() + self.payload.len()
    }

    pub fn next(&self) -> Option<&Entry> {
        self.next.as_deref()
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("payload_size", &self.payload.len())
            .field("has_next", &self.next.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_copies_inputs() {
        let mut key = String::from("Leo");
        let mut payload = b"Leo_data".to_vec();
        let entry = Entry::new(&key, &payload, None);

        key.push('!');
        payload[0] = b'X';

        assert_eq!(entry.key(), "Leo");
        assert_eq!(entry.payload(), b"Leo_data");
        assert_eq!(entry.payload_size(), 8);
        assert_eq!(entry.owned_bytes(), 11);
        assert!(entry.next().is_none());
    }

    #[test]
    fn test_entry_empty_payload() {
        let entry = Entry::new("k", &[], None);
        assert_eq!(entry.payload_size(), 0);
        assert!(entry.payload().is_empty());
    }

    #[test]
    fn test_entry_link() {
        let tail = Box::new(Entry::new("b", b"2", None));
        let head = Entry::new("a", b"1", Some(tail));
        assert_eq!(head.next().map(Entry::key), Some("b"));
        assert!(format!("{:?}", head).contains("has_next: true"));
    }
}
