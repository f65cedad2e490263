//! Book record derivation.

use std::path::{Component, Path};

use compact_str::CompactString;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::config::CatalogConfig;
use crate::error::ScanError;

/// One manifest entry describing a discovered book file.
///
/// Field order matches the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    /// File name without the book extension.
    pub title: CompactString,
    /// Scan root the file was found under.
    pub category: CompactString,
    /// Directories between the scan root and the file, joined by `/`.
    pub subcategory: String,
    /// Forward-slash path relative to the base directory.
    pub path: String,
    /// Absolute download URL for `path`.
    pub download_url: String,
}

impl BookRecord {
    /// Classify a file path relative to the base directory.
    ///
    /// Returns `Ok(None)` when the file name does not end with the configured
    /// extension.
    pub fn classify(config: &CatalogConfig, rel: &Path) -> Result<Option<Self>, ScanError> {
        // Non-books are ignored before their names need to be valid UTF-8.
        if !rel.file_name().is_some_and(|name| config.is_book(name)) {
            return Ok(None);
        }

        let mut segments = Vec::new();
        for component in rel.components() {
            match component {
                Component::Normal(part) => {
                    let part = part
                        .to_str()
                        .ok_or_else(|| ScanError::InvalidPath { path: rel.to_path_buf() })?;
                    segments.push(part);
                }
                Component::CurDir => {}
                _ => {
                    return Err(ScanError::InvalidPath {
                        path: rel.to_path_buf(),
                    });
                }
            }
        }

        let Some((name, dirs)) = segments.split_last() else {
            return Ok(None);
        };
        let Some(title) = name.strip_suffix(config.extension.as_str()) else {
            return Ok(None);
        };

        let category = dirs.first().copied().unwrap_or_default();
        let subcategory = dirs.iter().skip(1).join("/");
        let path = segments.iter().join("/");
        let download_url = config.download_url(&path);

        Ok(Some(Self {
            title: title.into(),
            category: category.into(),
            subcategory,
            path,
            download_url,
        }))
    }

    /// Check if the file sits directly in its scan root.
    pub fn is_top_level(&self) -> bool {
        self.subcategory.is_empty()
    }
}
