//! JWalk-based catalog scanner.

use std::path::Path;
use std::time::{Duration, Instant};

use jwalk::{Parallelism, WalkDir};
use tracing::{debug, info, warn};

use shelfindex_core::{
    BookRecord, CatalogConfig, CatalogManifest, CatalogStats, ScanError, ScanWarning,
};

use crate::inode::{FileKey, InodeTracker};

/// Result of scanning every configured root.
#[derive(Debug, Clone)]
pub struct CatalogScan {
    /// Records in discovery order.
    pub manifest: CatalogManifest,
    /// Summary counts.
    pub stats: CatalogStats,
    /// Non-fatal problems, one per skipped root.
    pub warnings: Vec<ScanWarning>,
    /// Time spent scanning.
    pub duration: Duration,
}

/// Walks scan roots and classifies the book files under them.
pub struct CatalogScanner {
    config: CatalogConfig,
}

impl CatalogScanner {
    /// Create a scanner for the given configuration.
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    /// Scan every root in configured order.
    ///
    /// Missing roots are skipped with a warning. Any traversal failure
    /// aborts the scan.
    pub fn scan(&self) -> Result<CatalogScan, ScanError> {
        let start = Instant::now();
        let mut manifest = CatalogManifest::new();
        let mut stats = CatalogStats::new();
        let mut warnings = Vec::new();
        let mut tracker = self.config.dedupe.then(InodeTracker::new);

        for root in &self.config.scan_roots {
            let root_path = self.config.resolve(root);

            if !root_path.is_dir() {
                let warning = if root_path.exists() {
                    ScanWarning::root_not_a_directory(root, &root_path)
                } else {
                    ScanWarning::missing_root(root, &root_path)
                };
                warn!(root = %root, "{}", warning.message);
                stats.roots_missing += 1;
                warnings.push(warning);
                continue;
            }

            info!(root = %root, "Scanning root");
            stats.roots_scanned += 1;
            self.scan_root(
                root,
                &root_path,
                &mut manifest,
                &mut stats,
                tracker.as_mut(),
            )?;
        }

        Ok(CatalogScan {
            manifest,
            stats,
            warnings,
            duration: start.elapsed(),
        })
    }

    /// Walk a single root that is known to be a directory.
    fn scan_root(
        &self,
        root: &str,
        root_path: &Path,
        manifest: &mut CatalogManifest,
        stats: &mut CatalogStats,
        mut tracker: Option<&mut InodeTracker>,
    ) -> Result<(), ScanError> {
        // Serial and sorted so the manifest order is reproducible.
        let walker = WalkDir::new(root_path)
            .parallelism(Parallelism::Serial)
            .sort(true)
            .skip_hidden(false)
            .follow_links(false);

        for entry_result in walker {
            let entry = entry_result.map_err(|err| walk_error(&err, root_path))?;
            let path = entry.path();

            // jwalk reports an unreadable directory on the entry itself.
            if let Some(err) = &entry.read_children_error {
                return Err(walk_error(err, &path));
            }

            if !is_regular_file(&entry.file_type(), &path) {
                continue;
            }
            stats.files_visited += 1;

            let suffix = path.strip_prefix(root_path).map_err(|_| ScanError::Walk {
                path: path.clone(),
                message: format!("entry escaped scan root {}", root_path.display()),
            })?;
            let rel = Path::new(root).join(suffix);

            let Some(record) = BookRecord::classify(&self.config, &rel)? else {
                continue;
            };

            if let Some(tracker) = tracker.as_deref_mut() {
                let key = FileKey::for_path(&path).map_err(|e| ScanError::io(&path, e))?;
                if !tracker.track(key) {
                    debug!(path = %record.path, "Skipping duplicate");
                    stats.duplicates_skipped += 1;
                    continue;
                }
            }

            debug!(path = %record.path, "Found book");
            stats.record_book(&record);
            manifest.push(record);
        }

        Ok(())
    }
}

/// Convert a jwalk error, keeping the io error kind when there is one.
fn walk_error(err: &jwalk::Error, fallback: &Path) -> ScanError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| fallback.to_path_buf());
    match err.io_error() {
        Some(io) => ScanError::io(path, std::io::Error::new(io.kind(), io.to_string())),
        None => ScanError::Walk {
            path,
            message: err.to_string(),
        },
    }
}

/// Regular files, and symlinks that resolve to one, count as files.
fn is_regular_file(file_type: &std::fs::FileType, path: &Path) -> bool {
    if file_type.is_file() {
        return true;
    }
    file_type.is_symlink() && std::fs::metadata(path).is_ok_and(|m| m.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join("library/poetry")).unwrap();
        fs::create_dir_all(root.join("library/prose/essays")).unwrap();
        fs::create_dir_all(root.join("archive")).unwrap();

        fs::write(root.join("library/poetry/Odes.epub"), "odes").unwrap();
        fs::write(root.join("library/Notes.txt"), "notes").unwrap();
        fs::write(root.join("library/Top.epub"), "top").unwrap();
        fs::write(root.join("library/prose/essays/Essays.epub"), "essays").unwrap();
        fs::write(root.join("archive/Old.epub"), "old").unwrap();

        temp
    }

    fn config_for(temp: &TempDir, roots: &[&str]) -> CatalogConfig {
        CatalogConfig::builder()
            .base_dir(temp.path())
            .scan_roots(roots.iter().map(|r| r.to_string()).collect::<Vec<_>>())
            .build()
            .unwrap()
    }

    #[test]
    fn test_basic_scan() {
        let temp = create_test_tree();
        let scanner = CatalogScanner::new(config_for(&temp, &["library"]));
        let scan = scanner.scan().unwrap();

        assert_eq!(scan.manifest.len(), 3);
        assert_eq!(scan.stats.files_visited, 4);
        assert_eq!(scan.stats.roots_scanned, 1);
        assert!(scan.warnings.is_empty());
        assert!(scan.manifest.iter().all(|r| r.category == "library"));
    }

    #[test]
    fn test_sorted_discovery_order() {
        let temp = create_test_tree();
        let scanner = CatalogScanner::new(config_for(&temp, &["library", "archive"]));
        let scan = scanner.scan().unwrap();

        let paths: Vec<_> = scan.manifest.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "library/Top.epub",
                "library/poetry/Odes.epub",
                "library/prose/essays/Essays.epub",
                "archive/Old.epub",
            ]
        );
    }

    #[test]
    fn test_missing_root_is_skipped() {
        let temp = create_test_tree();
        let scanner = CatalogScanner::new(config_for(&temp, &["missing_dir", "archive"]));
        let scan = scanner.scan().unwrap();

        assert_eq!(scan.manifest.len(), 1);
        assert_eq!(scan.stats.roots_missing, 1);
        assert_eq!(scan.warnings.len(), 1);
        assert_eq!(
            scan.warnings[0].kind,
            shelfindex_core::WarningKind::MissingRoot
        );
    }

    #[test]
    fn test_root_that_is_a_file() {
        let temp = create_test_tree();
        fs::write(temp.path().join("plain"), "not a dir").unwrap();
        let scanner = CatalogScanner::new(config_for(&temp, &["plain"]));
        let scan = scanner.scan().unwrap();

        assert!(scan.manifest.is_empty());
        assert_eq!(
            scan.warnings[0].kind,
            shelfindex_core::WarningKind::NotADirectory
        );
    }

    #[test]
    fn test_hidden_files_included() {
        let temp = create_test_tree();
        fs::create_dir_all(temp.path().join("library/.hidden")).unwrap();
        fs::write(temp.path().join("library/.hidden/Secret.epub"), "s").unwrap();

        let scanner = CatalogScanner::new(config_for(&temp, &["library"]));
        let scan = scanner.scan().unwrap();

        assert!(scan
            .manifest
            .iter()
            .any(|r| r.subcategory == ".hidden" && r.title == "Secret"));
    }
}
