//! Partition implementation
//!
//! Insertion-ordered in-memory index with spill/reload to a private file.

use std::collections::HashMap;
use std::fs;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use uuid::Uuid;

use crate::codec::{bytes_to_string, len_to_u32, utf8_len, Codec};
use crate::error::{Result, SpillError};

use super::{file, reader, writer, RecordState, FILE_EXTENSION};

/// A bounded shard of the key-value map
///
/// Keys are always held in memory. Values are `Resident` until the partition
/// is saved, after which they are `Evicted` and only the file holds them.
pub struct Partition<K, T> {
    /// Unique id, also the file stem of the backing file
    id: Uuid,
    /// Key → position in `records`
    index: HashMap<K, usize>,
    /// Records in insertion order
    records: Vec<(K, RecordState<T>)>,
    /// Encoded value bytes added so far (never decremented)
    size: u64,
    /// Backing file matches the index
    persisted: bool,
    compress: bool,
    path: PathBuf,
    key_codec: Arc<dyn Codec<K>>,
    value_codec: Arc<dyn Codec<T>>,
}

impl<K, T> Partition<K, T>
where
    K: Eq + Hash + Clone,
{
    /// Create an empty partition whose file will live in `dir`
    pub fn new(
        dir: &Path,
        compress: bool,
        key_codec: Arc<dyn Codec<K>>,
        value_codec: Arc<dyn Codec<T>>,
    ) -> Self {
        let id = Uuid::new_v4();
        let path = dir.join(format!("{}.{}", id, FILE_EXTENSION));

        tracing::debug!("Partition {} created (compress={})", id, compress);

        Self {
            id,
            index: HashMap::new(),
            records: Vec::new(),
            size: 0,
            persisted: false,
            compress,
            path,
            key_codec,
            value_codec,
        }
    }

    /// Add or overwrite a record
    ///
    /// The encoded length of `value` is added to `size` every time, even when
    /// the key already exists. Adding to a persisted partition makes its file
    /// stale: evicted values are reloaded first so the next save is complete.
    pub fn add(&mut self, key: K, value: T) -> Result<()> {
        let value_len = utf8_len(&self.value_codec.encode(&value)?) as u64;

        if self.persisted {
            if self.records.iter().any(|(_, state)| state.is_evicted()) {
                self.load()?;
            }
            self.persisted = false;
        }

        self.size += value_len;

        match self.index.get(&key) {
            Some(&pos) => self.records[pos].1 = RecordState::Resident(value),
            None => {
                self.index.insert(key.clone(), self.records.len());
                self.records.push((key, RecordState::Resident(value)));
            }
        }

        Ok(())
    }

    /// Get a value if it is in memory
    ///
    /// Returns `None` both for unknown keys and for evicted records.
    pub fn get(&self, key: &K) -> Option<&T> {
        let &pos = self.index.get(key)?;
        self.records[pos].1.as_resident()
    }

    /// Whether the key is indexed (never touches disk)
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in insertion order
    pub fn key_set(&self) -> impl Iterator<Item = &K> + '_ {
        self.records.iter().map(|(key, _)| key)
    }

    /// Spill to disk and evict values
    ///
    /// When the file is already current the write is skipped; values are
    /// evicted either way. Every record is encoded and its lengths checked
    /// against the 4-byte fields before the file is opened, so an encoding
    /// failure leaves both the partition and any previous file untouched. On
    /// any failure the partition stays unpersisted with its values in memory.
    pub fn save(&mut self) -> Result<()> {
        if !self.persisted {
            len_to_u32(self.records.len())?;

            let mut entries = Vec::with_capacity(self.records.len());
            for (key, state) in &self.records {
                let value = state.as_resident().ok_or_else(|| {
                    SpillError::Serialization(format!(
                        "partition {} holds an evicted record but has no current file",
                        self.id
                    ))
                })?;
                let key = self.key_codec.encode(key)?;
                let value = self.value_codec.encode(value)?;
                len_to_u32(key.len())?;
                len_to_u32(value.len())?;
                entries.push((key, value));
            }

            let count = entries.len();
            let written = {
                let mut out = file::create(&self.path, self.compress)
                    .map_err(|e| SpillError::partition_io(&self.path, e))?;
                writer::write_entries(&mut out, &entries).map_err(|e| self.with_path(e))?
            };
            drop(entries);

            self.persisted = true;

            tracing::debug!(
                "Partition {} saved: {} entries, {} bytes",
                self.id,
                count,
                written
            );
        }

        self.evict();
        Ok(())
    }

    /// Reload every record from disk
    ///
    /// No-op unless persisted. The index is replaced with the file contents in
    /// file order; the persisted flag stays set.
    pub fn load(&mut self) -> Result<()> {
        if !self.persisted {
            return Ok(());
        }

        let outcome = {
            let mut input = file::open(&self.path, self.compress)
                .map_err(|e| SpillError::partition_io(&self.path, e))?;
            reader::read_entries(&mut input).map_err(|e| SpillError::partition_io(&self.path, e))?
        };

        if outcome.dropped > 0 {
            tracing::warn!(
                "Partition {}: {} of {} entries truncated on load, dropped",
                self.id,
                outcome.dropped,
                outcome.declared
            );
        }

        let mut index: HashMap<K, usize> = HashMap::with_capacity(outcome.entries.len());
        let mut records: Vec<(K, RecordState<T>)> = Vec::with_capacity(outcome.entries.len());

        for raw in outcome.entries {
            let key = self.key_codec.decode(bytes_to_string(raw.key)?)?;
            let value = self.value_codec.decode(bytes_to_string(raw.value)?)?;

            match index.get(&key) {
                Some(&pos) => records[pos].1 = RecordState::Resident(value),
                None => {
                    index.insert(key.clone(), records.len());
                    records.push((key, RecordState::Resident(value)));
                }
            }
        }

        tracing::debug!("Partition {} loaded: {} entries", self.id, records.len());

        self.index = index;
        self.records = records;

        Ok(())
    }

    /// Drop every in-memory value, keeping the keys
    pub(crate) fn evict(&mut self) {
        for (_, state) in self.records.iter_mut() {
            *state = RecordState::Evicted;
        }
    }

    fn with_path(&self, err: SpillError) -> SpillError {
        match err {
            SpillError::Io(e) => SpillError::partition_io(&self.path, e),
            other => other,
        }
    }
}

impl<K, T> Partition<K, T> {
    /// Delete the backing file and forget every record. Never fails.
    pub fn close(&mut self) {
        if self.path.is_file() && fs::remove_file(&self.path).is_ok() {
            tracing::info!("Partition {} temporary file removed", self.id);
        }

        self.index.clear();
        self.records.clear();
        self.persisted = false;
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Encoded value bytes added so far
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of indexed keys
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose value is in memory
    pub fn resident_count(&self) -> usize {
        self.records
            .iter()
            .filter(|(_, state)| !state.is_evicted())
            .count()
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub fn is_compressed(&self) -> bool {
        self.compress
    }

    /// Path of the backing file (exists only after a save)
    pub fn file_path(&self) -> &Path {
        &self.path
    }
}

impl<K, T> Drop for Partition<K, T> {
    fn drop(&mut self) {
        self.close();
    }
}
