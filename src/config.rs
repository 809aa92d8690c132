//! Configuration for spillkv
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a spillkv storage instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Disk Configuration
    // -------------------------------------------------------------------------
    /// Directory that receives spilled partition files
    /// Internal structure:
    ///   {temp_dir}/
    ///     ├── <uuid>.tsp      (one file per spilled partition)
    ///     └── ...
    pub temp_dir: PathBuf,

    /// Wrap every partition file in a Snappy frame stream
    pub compress: bool,

    // -------------------------------------------------------------------------
    // Memory Configuration
    // -------------------------------------------------------------------------
    /// Encoded value bytes a partition may accumulate before it is spilled.
    /// Must be greater than zero.
    pub partition_size_limit: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            temp_dir: std::env::temp_dir(),
            compress: false,
            partition_size_limit: 1024 * 1024, // 1 MB
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the directory for spilled partition files
    pub fn temp_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.temp_dir = path.into();
        self
    }

    /// Enable or disable streaming compression of partition files
    pub fn compress(mut self, compress: bool) -> Self {
        self.config.compress = compress;
        self
    }

    /// Set the partition size limit (in bytes)
    pub fn partition_size_limit(mut self, size: u64) -> Self {
        self.config.partition_size_limit = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
