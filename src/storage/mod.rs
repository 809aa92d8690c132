//! Storage Module
//!
//! Coordinates one active partition and any number of spilled partitions.
//!
//! ## Responsibilities
//! - Route every write to the active partition
//! - Spill and rotate the active partition once it reaches the size limit
//! - Resolve reads across partitions using in-memory key sets
//! - Swap a spilled partition back into memory on a read miss
//!
//! ## Swap Policy
//! ```text
//!   get(k) ── active has k? ──yes──▶ return (no I/O)
//!                 │ no
//!                 ▼
//!   first persisted partition whose key set has k?
//!                 │ none ──▶ Ok(None)
//!                 ▼
//!   load(candidate) ─▶ save(active) ─▶ candidate becomes active,
//!                                      active joins the persisted list
//! ```
//! At most one partition holds its values in memory: a single-slot cache
//! over the partition set.

mod manager;
mod stats;

pub use manager::{Storage, StorageBuilder};
pub use stats::StorageStats;
