//! Directory scanning and manifest writing for shelfindex.
//!
//! This crate walks the configured scan roots, classifies every book file it
//! finds, and writes the resulting manifest.
//!
//! # Example
//!
//! ```rust,no_run
//! use shelfindex_scan::{CatalogConfig, build_catalog};
//!
//! let config = CatalogConfig::default();
//! let report = build_catalog(&config).unwrap();
//!
//! println!("Found {} books.", report.scan.manifest.len());
//! println!("Wrote {}", report.output.display());
//! ```
//!
//! Scanning and writing can also be driven separately:
//!
//! ```rust,no_run
//! use shelfindex_scan::{CatalogConfig, CatalogScanner, write_manifest};
//!
//! let config = CatalogConfig::default();
//! let scan = CatalogScanner::new(config.clone()).scan().unwrap();
//! for warning in &scan.warnings {
//!     eprintln!("Warning: {}", warning.message);
//! }
//! write_manifest(&config, &scan.manifest).unwrap();
//! ```

mod inode;
mod scanner;
mod writer;

pub use inode::{FileKey, InodeTracker};
pub use scanner::{CatalogScan, CatalogScanner};
pub use writer::{CatalogReport, OutputPlan, build_catalog, write_manifest};

// Re-export core types for convenience
pub use shelfindex_core::{
    BookRecord, CatalogConfig, CatalogConfigBuilder, CatalogManifest, CatalogStats, ScanError,
    ScanWarning, WarningKind,
};
