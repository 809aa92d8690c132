//! Storage coordinator
//!
//! Owns the active partition and the list of spilled partitions.
//!
//! ## Responsibilities
//! - Validate configuration and prepare the temp directory
//! - Rotate the active partition when it reaches the size limit
//! - Swap spilled partitions into memory on demand
//! - Remove every partition file on close

use std::collections::HashSet;
use std::fs;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::Arc;

use uuid::Uuid;

use crate::codec::Codec;
use crate::config::Config;
use crate::error::{Result, SpillError};
use crate::partition::Partition;

use super::StorageStats;

/// Memory-bounded key-value buffer
///
/// ## Ownership:
/// - `active`: the only partition that accepts writes and keeps values in RAM
/// - `persisted`: spilled partitions, keys in RAM, values on disk
/// - All mutating and swapping methods take `&mut self`; callers sharing a
///   storage across threads must serialize access themselves
pub struct Storage<K, T> {
    /// Storage configuration
    config: Config,

    /// Partition receiving writes (or most recently swapped in)
    active: Partition<K, T>,

    /// Spilled partitions, in spill order
    persisted: Vec<Partition<K, T>>,

    key_codec: Arc<dyn Codec<K>>,
    value_codec: Arc<dyn Codec<T>>,

    stats: StorageStats,
}

impl<K, T> Storage<K, T>
where
    K: Eq + Hash + Clone,
{
    /// Open a storage with explicit codecs
    ///
    /// Fails with `Config` if the partition size limit is zero. Creates the
    /// temp directory if it does not exist.
    pub fn open(
        config: Config,
        key_codec: Arc<dyn Codec<K>>,
        value_codec: Arc<dyn Codec<T>>,
    ) -> Result<Self> {
        if config.partition_size_limit == 0 {
            return Err(SpillError::Config(
                "partition size limit must be greater than zero".to_string(),
            ));
        }

        fs::create_dir_all(&config.temp_dir)?;

        let active = Partition::new(
            &config.temp_dir,
            config.compress,
            Arc::clone(&key_codec),
            Arc::clone(&value_codec),
        );

        tracing::debug!(
            "Storage opened: limit={} bytes, compress={}, dir={}",
            config.partition_size_limit,
            config.compress,
            config.temp_dir.display()
        );

        Ok(Self {
            config,
            active,
            persisted: Vec::new(),
            key_codec,
            value_codec,
            stats: StorageStats::default(),
        })
    }

    /// Start building a storage
    pub fn builder() -> StorageBuilder<K, T> {
        StorageBuilder::default()
    }

    /// Add a key-value pair
    ///
    /// Steps:
    /// 1. If the active partition has reached the limit, spill it and start a
    ///    fresh one. A failed spill is logged and the add carries on with the
    ///    over-limit partition still in memory.
    /// 2. Add to the active partition
    pub fn add(&mut self, key: K, value: T) -> Result<()> {
        if self.active.size() >= self.config.partition_size_limit {
            self.rotate();
        }

        self.active.add(key, value)
    }

    /// Get a value by key
    ///
    /// Search order:
    /// 1. Active partition (no I/O)
    /// 2. Key sets of persisted partitions, in spill order (no I/O)
    /// 3. On a hit, swap that partition in and read from memory
    ///
    /// Returns `Ok(None)` if no partition knows the key. Fails with
    /// `InvalidArgument` for an absent key and with an I/O error if the swap
    /// cannot complete.
    ///
    /// A key re-added after its partition was spilled lives in two partitions,
    /// and only the active one is consulted first: once a swap makes the older
    /// partition active again, `get` returns the older value.
    pub fn get(&mut self, key: &K) -> Result<Option<&T>> {
        if self.key_codec.is_absent(key) {
            return Err(SpillError::InvalidArgument(
                "key can not be null".to_string(),
            ));
        }

        if self.active.contains_key(key) {
            return Ok(self.active.get(key));
        }

        let pos = match self.persisted.iter().position(|p| p.contains_key(key)) {
            Some(pos) => pos,
            None => return Ok(None),
        };

        self.swap(pos)?;

        Ok(self.active.get(key))
    }

    /// Whether any partition knows the key (never touches disk)
    pub fn contains_key(&self, key: &K) -> bool {
        self.active.contains_key(key) || self.persisted.iter().any(|p| p.contains_key(key))
    }

    /// Distinct keys across all partitions (never touches disk)
    pub fn len(&self) -> usize {
        let mut keys: HashSet<&K> = self.active.key_set().collect();
        for partition in &self.persisted {
            keys.extend(partition.key_set());
        }
        keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.persisted.iter().all(|p| p.is_empty())
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Spill the active partition and replace it with a fresh one
    fn rotate(&mut self) {
        let writes = !self.active.is_persisted();
        match self.active.save() {
            Ok(()) => {
                if writes {
                    self.stats.spills += 1;
                }

                let fresh = self.new_partition();
                let spilled = std::mem::replace(&mut self.active, fresh);

                tracing::debug!(
                    "Storage rotated: partition {} spilled ({} bytes), {} now active",
                    spilled.id(),
                    spilled.size(),
                    self.active.id()
                );

                // Ownership guarantees the spilled partition is not listed yet
                self.persisted.push(spilled);
            }
            Err(e) => {
                self.stats.spill_failures += 1;
                tracing::error!(
                    "Storage failed to spill partition {}: {}",
                    self.active.id(),
                    e
                );
            }
        }
    }

    /// Move `persisted[pos]` into the active slot, spilling the current one
    fn swap(&mut self, pos: usize) -> Result<()> {
        tracing::info!(
            "Storage swap {} for {}",
            self.active.id(),
            self.persisted[pos].id()
        );

        self.persisted[pos].load()?;
        self.stats.loads += 1;

        let writes = !self.active.is_persisted();
        if let Err(e) = self.active.save() {
            // Keep the memory ceiling: the candidate goes back to evicted
            self.persisted[pos].evict();
            return Err(e);
        }
        if writes {
            self.stats.spills += 1;
        }

        let candidate = self.persisted.remove(pos);
        let displaced = std::mem::replace(&mut self.active, candidate);
        self.persisted.push(displaced);
        self.stats.swaps += 1;

        Ok(())
    }

    fn new_partition(&self) -> Partition<K, T> {
        Partition::new(
            &self.config.temp_dir,
            self.config.compress,
            Arc::clone(&self.key_codec),
            Arc::clone(&self.value_codec),
        )
    }
}

impl<K, T> Storage<K, T> {
    /// Close every partition and delete its file. Never fails.
    pub fn close(mut self) {
        self.active.close();
        for partition in self.persisted.iter_mut() {
            partition.close();
        }
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Size limit of a partition, in bytes
    pub fn limit_size(&self) -> u64 {
        self.config.partition_size_limit
    }

    pub fn is_compressed(&self) -> bool {
        self.config.compress
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Total partitions, active included
    pub fn partition_count(&self) -> usize {
        1 + self.persisted.len()
    }

    /// Number of spilled partitions
    pub fn persisted_count(&self) -> usize {
        self.persisted.len()
    }

    /// Size counter of the active partition
    pub fn active_size(&self) -> u64 {
        self.active.size()
    }

    pub fn active_id(&self) -> Uuid {
        self.active.id()
    }

    /// Records across all partitions. A key re-added after its partition was
    /// spilled is counted once per partition holding it.
    pub fn record_count(&self) -> usize {
        self.active.len() + self.persisted.iter().map(|p| p.len()).sum::<usize>()
    }

    /// Backing file paths: active partition first, then persisted in order
    pub fn partition_files(&self) -> Vec<PathBuf> {
        std::iter::once(&self.active)
            .chain(self.persisted.iter())
            .map(|p| p.file_path().to_path_buf())
            .collect()
    }

    pub fn stats(&self) -> StorageStats {
        self.stats
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for Storage
pub struct StorageBuilder<K, T> {
    config: Config,
    key_codec: Option<Arc<dyn Codec<K>>>,
    value_codec: Option<Arc<dyn Codec<T>>>,
}

impl<K, T> Default for StorageBuilder<K, T> {
    fn default() -> Self {
        Self {
            config: Config::default(),
            key_codec: None,
            value_codec: None,
        }
    }
}

impl<K, T> StorageBuilder<K, T>
where
    K: Eq + Hash + Clone,
{
    /// Replace the whole configuration
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set the directory for spilled partition files
    pub fn temp_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.temp_dir = path.into();
        self
    }

    /// Set the partition size limit (in bytes)
    pub fn partition_size_limit(mut self, size: u64) -> Self {
        self.config.partition_size_limit = size;
        self
    }

    /// Enable or disable streaming compression of partition files
    pub fn compress(mut self, compress: bool) -> Self {
        self.config.compress = compress;
        self
    }

    /// Set the key codec
    pub fn key_codec(mut self, codec: impl Codec<K> + 'static) -> Self {
        self.key_codec = Some(Arc::new(codec));
        self
    }

    /// Set the value codec
    pub fn value_codec(mut self, codec: impl Codec<T> + 'static) -> Self {
        self.value_codec = Some(Arc::new(codec));
        self
    }

    /// Validate and open the storage
    pub fn open(self) -> Result<Storage<K, T>> {
        let key_codec = self
            .key_codec
            .ok_or_else(|| SpillError::Config("key codec is required".to_string()))?;
        let value_codec = self
            .value_codec
            .ok_or_else(|| SpillError::Config("value codec is required".to_string()))?;

        Storage::open(self.config, key_codec, value_codec)
    }
}
