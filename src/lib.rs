//! # spillkv
//!
//! A memory-bounded key-value buffer for accumulating large numbers of
//! records in one pass:
//! - New entries stay in memory until a byte-size limit is reached
//! - Full partitions are spilled to disk in a compact binary layout
//! - Reads swap a spilled partition back in, one resident partition at a time
//! - Optional Snappy compression of partition files
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Storage                               │
//! │          add / get / contains_key / close                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────────┐
//!   │   Active    │   swap   │    Persisted    │
//!   │  Partition  │◀────────▶│   Partitions    │
//!   │ (values in  │          │ (keys in RAM,   │
//!   │    RAM)     │          │ values on disk) │
//!   └──────┬──────┘          └────────┬────────┘
//!          │                          │
//!          ▼                          ▼
//!   ┌─────────────────────────────────────────┐
//!   │         Codec (UTF-8 / JSON)            │
//!   │     <uuid>.tsp files in temp_dir        │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use spillkv::{JsonCodec, Storage, Utf8Codec};
//!
//! # fn main() -> spillkv::Result<()> {
//! let mut storage = Storage::<String, Vec<u32>>::builder()
//!     .key_codec(Utf8Codec)
//!     .value_codec(JsonCodec::<Vec<u32>>::new())
//!     .partition_size_limit(64 * 1024)
//!     .compress(true)
//!     .open()?;
//!
//! storage.add("primes".to_string(), vec![2, 3, 5, 7])?;
//! assert_eq!(storage.get(&"primes".to_string())?, Some(&vec![2, 3, 5, 7]));
//!
//! storage.close();
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod partition;
pub mod storage;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SpillError, Result};
pub use config::Config;
pub use codec::{Codec, JsonCodec, Utf8Codec};
pub use partition::{Partition, RecordState};
pub use storage::{Storage, StorageBuilder, StorageStats};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of spillkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
