//! spillkv load generator
//!
//! Fills a storage with synthetic records, reads them back and reports how
//! much spilling and swapping it took.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use spillkv::{JsonCodec, Storage, Utf8Codec};
use tracing_subscriber::{fmt, EnvFilter};

/// spillkv load generator
#[derive(Parser, Debug)]
#[command(name = "spillkv")]
#[command(about = "Fill a disk-spilling key-value buffer and read it back")]
#[command(version)]
struct Args {
    /// Number of records to add
    #[arg(short = 'n', long, default_value = "100000")]
    records: usize,

    /// Partition size limit in KB before spilling
    #[arg(short, long, default_value = "1024")]
    limit_kb: u64,

    /// Compress partition files
    #[arg(short, long)]
    compress: bool,

    /// Directory for partition files (defaults to the system temp dir)
    #[arg(short, long)]
    temp_dir: Option<PathBuf>,

    /// Order in which records are read back
    #[arg(short, long, value_enum, default_value = "sequential")]
    order: ReadOrder,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReadOrder {
    /// Insertion order
    Sequential,
    /// Fixed-stride jumps across the key space
    Scattered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Member {
    id: String,
    name: String,
    age: u32,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,spillkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    tracing::info!("spillkv v{}", spillkv::VERSION);

    match run(&args) {
        Ok(0) => tracing::info!("All records read back intact"),
        Ok(mismatches) => {
            tracing::error!("{} records did not read back intact", mismatches);
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns the number of records that did not read back intact
fn run(args: &Args) -> spillkv::Result<usize> {
    let mut builder = Storage::<String, Member>::builder()
        .key_codec(Utf8Codec)
        .value_codec(JsonCodec::<Member>::new())
        .partition_size_limit(args.limit_kb * 1024)
        .compress(args.compress);
    if let Some(dir) = &args.temp_dir {
        builder = builder.temp_dir(dir);
    }
    let mut storage = builder.open()?;

    tracing::info!(
        "Adding {} records (limit={} KB, compress={})",
        args.records,
        args.limit_kb,
        args.compress
    );

    let started = Instant::now();
    let mut keys = Vec::with_capacity(args.records);
    for i in 0..args.records {
        let key = uuid::Uuid::new_v4().to_string();
        storage.add(key.clone(), member(i))?;
        keys.push(key);
    }
    tracing::info!(
        "Added {} records into {} partitions in {:?}",
        storage.record_count(),
        storage.partition_count(),
        started.elapsed()
    );

    let started = Instant::now();
    let mut mismatches = 0usize;
    for i in read_order(args.order, keys.len()) {
        match storage.get(&keys[i])? {
            Some(found) if *found == member(i) => {}
            _ => mismatches += 1,
        }
    }
    tracing::info!(
        "Read back {} records in {:?}: {} mismatches, {}",
        keys.len(),
        started.elapsed(),
        mismatches,
        storage.stats()
    );

    storage.close();

    Ok(mismatches)
}

fn member(i: usize) -> Member {
    Member {
        id: format!("0000{}", i),
        name: format!("Member {}", i),
        age: 18,
    }
}

/// Indices `0..n` in the requested order
fn read_order(order: ReadOrder, n: usize) -> Vec<usize> {
    match order {
        ReadOrder::Sequential => (0..n).collect(),
        ReadOrder::Scattered => {
            // A stride coprime with n visits every index exactly once
            let mut stride = 7919 % n.max(1);
            while n > 1 && gcd(stride, n) != 1 {
                stride += 1;
            }
            (0..n).map(|i| (i * stride.max(1)) % n).collect()
        }
    }
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}
