//! 演示程序 - 用50个名字构建哈希表并做校验
//!
//! 运行: `RUST_LOG=debug cargo run --example name_table`

use chained_hashtable::{ChainedTable, DEFAULT_BUCKET_COUNT};
use env_logger::Env;

const NAMES: [&str; 50] = [
    "Jack", "Oliver", "Charlie", "Harry", "Jacob", "Alfie", "Noah", "Oscar", "George", "James",
    "Thomas", "Leo", "William", "Joshua", "Logan", "Freddie", "Archie", "Max", "Henry", "Ethan",
    "Mason", "Lucas", "Riley", "Daniel", "Joseph", "Jake", "Harrison", "Theo", "Alexander",
    "Samuel", "Isaac", "Dylan", "Finley", "Edward", "Adam", "Benjamin", "Lewis", "Harley",
    "Tyler", "Sebastian", "Luke", "Toby", "Jayden", "Kian", "Tommy", "Alex", "Ollie", "Harvey",
    "Matthew", "Blake",
];

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    println!("Building hash table of buckets:{} ...", DEFAULT_BUCKET_COUNT);
    let mut table = ChainedTable::default();

    for name in NAMES {
        // 负载带结尾NUL，与C字符串长度一致
        let mut payload = format!("{}_data", name).into_bytes();
        payload.push(0);
        if let Err(err) = table.insert(name, &payload) {
            println!("Insert {} failed: {}", name, err);
        }
    }

    let key = "Matthew";
    if table.insert(key, &[]).is_ok() {
        println!("Duplicated key: {} insertion validation fails", key);
    }
    match table.find(key) {
        Ok(payload) => println!(
            "Key: {} found with user_data: {}, size: {}",
            key,
            String::from_utf8_lossy(payload.strip_suffix(&[0]).unwrap_or(&payload)),
            payload.len()
        ),
        Err(_) => println!("Existed key: {} searching validation fails", key),
    }

    let key = "Dummy";
    if table.find(key).is_ok() {
        println!("Non-existed key: {} searching validation fails", key);
    }
    if table.delete(key).is_ok() {
        println!("Non-existed key: {} deletion validation fails", key);
    }

    let listing = table.list_all();
    for entry in &listing.entries {
        println!("Find {}", entry);
    }
    println!(
        "End of hash keys listing, empty bucket:{}",
        listing.empty_bucket_count
    );

    for name in NAMES {
        if let Err(err) = table.delete(name) {
            println!("Delete {} failed: {}", name, err);
        }
    }

    println!("{}", table.export_prometheus());
}
