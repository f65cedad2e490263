//! Core types and configuration for shelfindex.
//!
//! This crate provides the data model shared by the scanner and the CLI:
//! the catalog configuration, book records, the manifest they are collected
//! into, and the error types for a catalog build.

mod config;
mod error;
mod manifest;
mod record;

pub use config::{CatalogConfig, CatalogConfigBuilder};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use manifest::{CatalogManifest, CatalogStats};
pub use record::BookRecord;
