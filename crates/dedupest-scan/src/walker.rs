//! JWalk-based parallel file enumeration.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use jwalk::{Parallelism, WalkDir};
use tracing::warn;

use dedupest_core::{ConfigError, FailureKind, FileFailure, RunConfig};

/// Result of enumerating a directory tree.
#[derive(Debug)]
pub struct WalkedFiles {
    /// Canonicalized root that was walked.
    pub root: PathBuf,
    /// Absolute paths of all regular files found, sorted.
    pub files: Vec<PathBuf>,
    /// Entries that could not be visited.
    pub warnings: Vec<FileFailure>,
    /// Duration of the walk.
    pub duration: Duration,
}

/// Recursive file enumerator using jwalk for parallel traversal.
///
/// Produces the already-flattened file list the engine treats as opaque
/// input. Symlinks are skipped unless the config says to follow them;
/// directories and special files are never included.
#[derive(Debug, Default)]
pub struct JwalkEnumerator {
    _priv: (),
}

impl JwalkEnumerator {
    /// Create a new enumerator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk the configured root and collect every regular file under it.
    pub fn enumerate(&self, config: &RunConfig) -> Result<WalkedFiles, ConfigError> {
        let start = Instant::now();
        let root = config
            .root
            .canonicalize()
            .map_err(|e| ConfigError::io(&config.root, e))?;

        if !root.is_dir() {
            return Err(ConfigError::NotADirectory { path: root });
        }

        let parallelism = match config.threads {
            0 => Parallelism::RayonDefaultPool {
                busy_timeout: Duration::from_millis(100),
            },
            n => Parallelism::RayonNewPool(n),
        };

        // Prune ignored names while directories are being read, so the
        // walker never descends into an ignored directory in the first
        // place. Read errors are kept to surface as warnings below.
        let ignore_config = config.clone();
        let walker = WalkDir::new(&root)
            .parallelism(parallelism)
            .follow_links(config.follow_symlinks)
            .skip_hidden(false)
            .process_read_dir(move |_depth, _path, _state, children| {
                children.retain(|entry_result| {
                    entry_result.as_ref().map_or(true, |entry| {
                        !ignore_config.should_ignore(&entry.file_name().to_string_lossy())
                    })
                });
            });

        let mut files = Vec::new();
        let mut warnings = Vec::new();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
                    warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                    warnings.push(FileFailure::new(path, err.to_string(), FailureKind::Open));
                    continue;
                }
            };

            if entry.file_type().is_file() {
                files.push(entry.path());
            }
        }

        // Deterministic order so repeated runs report identically.
        files.sort();

        Ok(WalkedFiles {
            root,
            files,
            warnings,
            duration: start.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("dir1")).unwrap();
        fs::create_dir(root.join("dir1/subdir")).unwrap();
        fs::create_dir(root.join("dir2")).unwrap();

        fs::write(root.join("file1.txt"), "hello").unwrap();
        fs::write(root.join("dir1/file2.txt"), "world world world").unwrap();
        fs::write(root.join("dir1/subdir/file3.txt"), "test").unwrap();
        fs::write(root.join("dir2/file4.txt"), "another file here").unwrap();

        temp
    }

    #[test]
    fn test_enumerates_all_files() {
        let temp = create_test_tree();
        let config = RunConfig::new(temp.path(), 512);

        let walked = JwalkEnumerator::new().enumerate(&config).unwrap();

        assert_eq!(walked.files.len(), 4);
        assert!(walked.files.iter().all(|p| p.is_file()));
        assert!(walked.warnings.is_empty());
    }

    #[test]
    fn test_files_are_sorted() {
        let temp = create_test_tree();
        let config = RunConfig::new(temp.path(), 512);

        let walked = JwalkEnumerator::new().enumerate(&config).unwrap();

        let mut sorted = walked.files.clone();
        sorted.sort();
        assert_eq!(walked.files, sorted);
    }

    #[test]
    fn test_ignore_patterns() {
        let temp = create_test_tree();
        let mut config = RunConfig::new(temp.path(), 512);
        config.ignore_patterns = vec!["dir2".to_string()];

        let walked = JwalkEnumerator::new().enumerate(&config).unwrap();

        assert_eq!(walked.files.len(), 3);
        assert!(
            !walked
                .files
                .iter()
                .any(|p| p.components().any(|c| c.as_os_str() == "dir2"))
        );
    }

    #[test]
    fn test_ignored_dir_contents_are_pruned() {
        let temp = create_test_tree();
        let root = temp.path();
        // Files nested below an ignored directory must not leak into the
        // list, no matter how deep.
        fs::create_dir(root.join("dir2/nested")).unwrap();
        fs::write(root.join("dir2/nested/deep.txt"), "deep").unwrap();

        let mut config = RunConfig::new(root, 512);
        config.ignore_patterns = vec!["dir2".to_string()];

        let walked = JwalkEnumerator::new().enumerate(&config).unwrap();

        assert_eq!(walked.files.len(), 3);
        assert!(
            !walked
                .files
                .iter()
                .any(|p| p.components().any(|c| c.as_os_str() == "dir2"))
        );
    }

    #[test]
    fn test_threaded_walk_matches_default() {
        let temp = create_test_tree();

        let default_config = RunConfig::new(temp.path(), 512);
        let mut threaded_config = RunConfig::new(temp.path(), 512);
        threaded_config.threads = 2;

        let enumerator = JwalkEnumerator::new();
        let default_walk = enumerator.enumerate(&default_config).unwrap();
        let threaded_walk = enumerator.enumerate(&threaded_config).unwrap();

        assert_eq!(default_walk.files, threaded_walk.files);
    }

    #[test]
    fn test_missing_root_is_config_error() {
        let config = RunConfig::new("/definitely/not/a/path", 512);
        let err = JwalkEnumerator::new().enumerate(&config).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_file_root_is_not_a_directory() {
        let temp = create_test_tree();
        let config = RunConfig::new(temp.path().join("file1.txt"), 512);
        let err = JwalkEnumerator::new().enumerate(&config).unwrap_err();
        assert!(matches!(err, ConfigError::NotADirectory { .. }));
    }
}
