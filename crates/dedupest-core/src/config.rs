//! Run configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Block sizes must be a positive multiple of this many bytes.
pub const BLOCK_ALIGNMENT: u64 = 512;

/// Configuration for a dedup estimation run.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct RunConfig {
    /// Root directory to scan.
    pub root: PathBuf,

    /// Block size in bytes (positive multiple of 512).
    pub block_size: u64,

    /// Follow symbolic links during enumeration.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// File/directory name patterns to skip during enumeration.
    #[builder(default)]
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Number of worker threads for hashing (0 = auto-detect).
    #[builder(default = "0")]
    #[serde(default)]
    pub threads: usize,
}

impl RunConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        match self.block_size {
            None => return Err("Block size is required".to_string()),
            Some(bs) if !RunConfig::is_valid_block_size(bs) => {
                return Err(format!(
                    "Block size must be a positive multiple of {BLOCK_ALIGNMENT}, got {bs}"
                ));
            }
            Some(_) => {}
        }
        Ok(())
    }
}

impl RunConfig {
    /// Create a new run config builder.
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    /// Create a simple config for a root path and block size.
    ///
    /// The block size is not validated here; use [`RunConfig::builder`] or
    /// [`RunConfig::is_valid_block_size`] when accepting external input.
    pub fn new(root: impl Into<PathBuf>, block_size: u64) -> Self {
        Self {
            root: root.into(),
            block_size,
            follow_symlinks: false,
            ignore_patterns: Vec::new(),
            threads: 0,
        }
    }

    /// Check that a block size is a positive multiple of 512.
    pub fn is_valid_block_size(block_size: u64) -> bool {
        block_size > 0 && block_size % BLOCK_ALIGNMENT == 0
    }

    /// Check if a path component should be skipped based on patterns.
    pub fn should_ignore(&self, name: &str) -> bool {
        for pattern in &self.ignore_patterns {
            if name == pattern {
                return true;
            }
            if let Some(prefix) = pattern.strip_suffix('*') {
                if name.starts_with(prefix) {
                    return true;
                }
            }
            if let Some(suffix) = pattern.strip_prefix('*') {
                if name.ends_with(suffix) {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = RunConfig::builder()
            .root("/data")
            .block_size(4096u64)
            .threads(4usize)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/data"));
        assert_eq!(config.block_size, 4096);
        assert_eq!(config.threads, 4);
        assert!(!config.follow_symlinks);
    }

    #[test]
    fn test_block_size_validation() {
        assert!(RunConfig::is_valid_block_size(512));
        assert!(RunConfig::is_valid_block_size(4096));
        assert!(!RunConfig::is_valid_block_size(0));
        assert!(!RunConfig::is_valid_block_size(1000));
        assert!(!RunConfig::is_valid_block_size(513));

        let err = RunConfig::builder()
            .root("/data")
            .block_size(1000u64)
            .build();
        assert!(err.is_err());
    }

    #[test]
    fn test_should_ignore() {
        let config = RunConfig::builder()
            .root("/data")
            .block_size(512u64)
            .ignore_patterns(vec!["node_modules".to_string(), "*.log".to_string()])
            .build()
            .unwrap();

        assert!(config.should_ignore("node_modules"));
        assert!(config.should_ignore("test.log"));
        assert!(!config.should_ignore("src"));
    }
}
