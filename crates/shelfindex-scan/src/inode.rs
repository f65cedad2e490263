//! File identity tracking for duplicate suppression.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

/// Identity of a physical file, independent of the path used to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileKey {
    /// Inode and device pair.
    Inode { inode: u64, device: u64 },
    /// Canonicalized path, where inodes are unavailable.
    Path(PathBuf),
}

impl FileKey {
    /// Identify the file at `path`, following symlinks.
    #[cfg(unix)]
    pub fn for_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        Ok(Self::Inode {
            inode: metadata.ino(),
            device: metadata.dev(),
        })
    }

    #[cfg(not(unix))]
    pub fn for_path(path: &Path) -> std::io::Result<Self> {
        Ok(Self::Path(path.canonicalize()?))
    }
}

/// Tracks seen files so the same file reached twice is recorded once.
///
/// Symlinked trees and hardlinks both resolve to the same key.
#[derive(Debug, Default)]
pub struct InodeTracker {
    seen: HashSet<FileKey>,
}

impl InodeTracker {
    /// Create a new tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a file. Returns `true` if this is the first time seeing it.
    pub fn track(&mut self, key: FileKey) -> bool {
        self.seen.insert(key)
    }

    /// Check if a file has been seen (without tracking).
    pub fn has_seen(&self, key: &FileKey) -> bool {
        self.seen.contains(key)
    }

    /// Get the number of unique files tracked.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Check if nothing has been tracked.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
