//! Storage statistics tracking.

use std::fmt;

/// Counters maintained by a [`Storage`](super::Storage).
///
/// Storage is single-owner (`&mut self` for every mutating call), so plain
/// integers are enough.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageStats {
    /// Partitions written to disk (rotation and swap)
    pub spills: u64,

    /// Add-triggered spills that failed and were swallowed
    pub spill_failures: u64,

    /// Partitions read back from disk
    pub loads: u64,

    /// Persisted partitions swapped into the active slot
    pub swaps: u64,
}

impl StorageStats {
    /// Disk operations performed (spills + loads)
    pub fn disk_operations(&self) -> u64 {
        self.spills + self.loads
    }
}

impl fmt::Display for StorageStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "spills={} spill_failures={} loads={} swaps={}",
            self.spills, self.spill_failures, self.loads, self.swaps
        )
    }
}
