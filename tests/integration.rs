//! 分离链接哈希表集成测试

use chained_hashtable::{
    batch_insert, hash, log_info, ChainedTable, ChainedTableConfig, ListedEntry, TableError,
    DEFAULT_BUCKET_COUNT,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, HashSet};
use test_log::test;

const SEED: u64 = 42;
const OPERATION_COUNT: usize = 20_000;

const NAMES: [&str; 50] = [
    "Jack", "Oliver", "Charlie", "Harry", "Jacob", "Alfie", "Noah", "Oscar", "George", "James",
    "Thomas", "Leo", "William", "Joshua", "Logan", "Freddie", "Archie", "Max", "Henry", "Ethan",
    "Mason", "Lucas", "Riley", "Daniel", "Joseph", "Jake", "Harrison", "Theo", "Alexander",
    "Samuel", "Isaac", "Dylan", "Finley", "Edward", "Adam", "Benjamin", "Lewis", "Harley",
    "Tyler", "Sebastian", "Luke", "Toby", "Jayden", "Kian", "Tommy", "Alex", "Ollie", "Harvey",
    "Matthew", "Blake",
];

/// 负载为 "<name>_data" 加结尾NUL
fn payload_for(name: &str) -> Vec<u8> {
    let mut payload = format!("{}_data", name).into_bytes();
    payload.push(0);
    payload
}

/// 创建填充50个名字的哈希表
fn create_name_table() -> ChainedTable {
    let mut table = ChainedTable::with_config(ChainedTableConfig::default()).unwrap();
    let inserted = batch_insert(&mut table, NAMES.iter().map(|name| (*name, payload_for(name))));
    assert_eq!(inserted, NAMES.len());
    table
}

/// 检查列举结果满足桶序、键序、落桶正确
fn assert_listing_invariants(entries: &[ListedEntry], bucket_count: usize) {
    for pair in entries.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        assert!(
            prev.bucket_index < next.bucket_index
                || (prev.bucket_index == next.bucket_index && prev.key < next.key),
            "顺序错误: {:?} 之后是 {:?}",
            prev.key,
            next.key
        );
    }
    for entry in entries {
        assert_eq!(entry.bucket_index, hash(&entry.key, bucket_count));
        assert_eq!(entry.payload_size, entry.payload.len());
    }
}

#[test]
fn test_name_scenario() {
    let mut table = create_name_table();

    // 重复键
    assert_eq!(
        table.insert("Matthew", &[]).unwrap_err(),
        TableError::DuplicateKey { key: "Matthew".into() }
    );

    // 已存在的键
    let payload = table.find("Matthew").unwrap();
    assert_eq!(payload, b"Matthew_data\0");
    assert_eq!(payload.len(), 13);

    // 不存在的键
    assert_eq!(
        table.find("Dummy").unwrap_err(),
        TableError::NotFound { key: "Dummy".into() }
    );
    assert_eq!(
        table.delete("Dummy").unwrap_err(),
        TableError::NotFound { key: "Dummy".into() }
    );

    let listing = table.list_all();
    assert_eq!(listing.len(), 50);
    assert_eq!(listing.empty_bucket_count, 17);
    assert_listing_invariants(&listing.entries, DEFAULT_BUCKET_COUNT);
    let listed: HashSet<_> = listing.keys().collect();
    assert_eq!(listed, NAMES.iter().copied().collect::<HashSet<_>>());

    // 18号桶按升序保存三个键
    let bucket_18: Vec<_> = listing
        .entries
        .iter()
        .filter(|entry| entry.bucket_index == 18)
        .map(|entry| entry.key.as_str())
        .collect();
    assert_eq!(bucket_18, ["Jayden", "Leo", "Matthew"]);

    for name in NAMES {
        table.delete(name).unwrap();
    }

    let listing = table.list_all();
    assert!(listing.is_empty());
    assert_eq!(listing.empty_bucket_count, DEFAULT_BUCKET_COUNT);

    let stats = table.stats();
    log_info!("场景结束: {:?}", stats);
    assert_eq!(stats.memory.current_used, 0);
    assert_eq!(stats.memory.allocation_count, 50);
    assert_eq!(stats.memory.deallocation_count, 50);
    assert_eq!(stats.operations.duplicate_count, 1);
    assert_eq!(stats.operations.miss_count, 2);
}

#[test]
fn test_every_payload_round_trips() {
    let table = create_name_table();
    for name in NAMES {
        assert_eq!(table.find(name).unwrap(), payload_for(name), "键 {}", name);
    }
}

#[test]
fn test_hash_determinism_and_range() {
    assert_eq!(hash("Matthew", DEFAULT_BUCKET_COUNT), hash("Matthew", DEFAULT_BUCKET_COUNT));
    assert!(hash("", DEFAULT_BUCKET_COUNT) < DEFAULT_BUCKET_COUNT);

    let table = ChainedTable::default();
    for name in NAMES {
        assert_eq!(table.hash_index(name), hash(name, DEFAULT_BUCKET_COUNT));
    }
}

#[test]
fn test_tables_are_independent() {
    let mut left = ChainedTable::default();
    let mut right = ChainedTable::default();

    left.insert("Jack", b"left").unwrap();
    right.insert("Jack", b"right").unwrap();
    right.insert("Oliver", b"").unwrap();

    assert_eq!(left.find("Jack").unwrap(), b"left");
    assert_eq!(right.find("Jack").unwrap(), b"right");
    assert_eq!(left.len(), 1);
    assert_eq!(right.len(), 2);
}

#[test]
fn test_random_operations_against_model() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let config = ChainedTableConfig::with_bucket_count(7);
    let mut table = ChainedTable::with_config(config).unwrap();
    let mut model: BTreeMap<String, Vec<u8>> = BTreeMap::new();

    for _ in 0..OPERATION_COUNT {
        let key = format!("k{}", rng.gen_range(0..500));
        match rng.gen_range(0..3) {
            0 => {
                let len = rng.gen_range(0..16);
                let payload: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
                let result = table.insert(&key, &payload);
                if model.contains_key(&key) {
                    assert_eq!(result, Err(TableError::DuplicateKey { key: key.clone() }));
                } else {
                    assert!(result.is_ok());
                    model.insert(key, payload);
                }
            }
            1 => match model.get(&key) {
                Some(expected) => assert_eq!(&table.find(&key).unwrap(), expected),
                None => assert!(table.find(&key).is_err()),
            },
            _ => {
                let result = table.delete(&key);
                assert_eq!(result.is_ok(), model.remove(&key).is_some());
            }
        }
    }

    assert_eq!(table.len(), model.len());
    assert!(table.is_well_ordered());

    let listing = table.list_all();
    assert_listing_invariants(&listing.entries, 7);
    let listed: BTreeMap<_, _> = listing
        .into_iter()
        .map(|entry| (entry.key, entry.payload))
        .collect();
    assert_eq!(listed, model);

    let expected_bytes: usize = model.iter().map(|(k, v)| k.len() + v.len()).sum();
    assert_eq!(table.stats().memory.current_used, expected_bytes);
}

#[test]
fn test_zero_length_payloads() {
    let mut table = ChainedTable::default();
    table.insert("empty", &[]).unwrap();
    table.insert("also_empty", b"").unwrap();

    assert_eq!(table.find("empty").unwrap(), Vec::<u8>::new());
    let listing = table.list_all();
    assert!(listing.entries.iter().all(|entry| entry.payload_size == 0));
}
