//! Partition Module
//!
//! A bounded shard of the key-value map that can spill itself to one private
//! file and reload from it.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Count (4, big-endian)                                   │
//! ├─────────────────────────────────────────────────────────┤
//! │ Header Block (variable)                                 │
//! │   [KeyLen: u32][ValLen: u32][Key]                       │
//! │   ... repeated Count times ...                          │
//! ├─────────────────────────────────────────────────────────┤
//! │ Value Block (variable)                                  │
//! │   [Value]  (ValLen bytes, same order as header)         │
//! │   ... repeated Count times ...                          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//! Keys and values are the UTF-8 bytes of their codec encoding. The whole
//! stream is optionally wrapped in a Snappy frame stream.

mod file;
mod reader;
mod table;
mod writer;

pub use reader::{read_entries, RawEntry, ReadOutcome};
pub use table::Partition;
pub use writer::write_entries;

// =============================================================================
// Shared Constants (used by writer, reader, table)
// =============================================================================

/// Extension of spilled partition files
pub const FILE_EXTENSION: &str = "tsp";

/// Buffer size for file reads and writes
pub(crate) const BUFFER_SIZE: usize = 8192;

// =============================================================================
// Record State
// =============================================================================

/// State of a record held by a partition
#[derive(Debug, Clone, PartialEq)]
pub enum RecordState<T> {
    /// The value is in memory
    Resident(T),

    /// The value lives only in the partition file
    Evicted,
}

impl<T> RecordState<T> {
    /// Borrow the value if it is in memory
    pub fn as_resident(&self) -> Option<&T> {
        match self {
            RecordState::Resident(value) => Some(value),
            RecordState::Evicted => None,
        }
    }

    pub fn is_evicted(&self) -> bool {
        matches!(self, RecordState::Evicted)
    }
}
