//! Catalog manifest and run statistics.

use compact_str::CompactString;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::record::BookRecord;

/// Ordered list of book records, serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogManifest {
    records: Vec<BookRecord>,
}

impl CatalogManifest {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record in discovery order.
    pub fn push(&mut self, record: BookRecord) {
        self.records.push(record);
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the manifest has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, BookRecord> {
        self.records.iter()
    }

    /// Records as a slice.
    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: IndexMap<&str, ()> = IndexMap::new();
        for record in &self.records {
            seen.entry(record.category.as_str()).or_default();
        }
        seen.into_keys().collect()
    }

    /// Serialize to pretty JSON with two-space indentation.
    ///
    /// Non-ASCII text is written literally and there is no trailing newline.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a manifest from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl From<Vec<BookRecord>> for CatalogManifest {
    fn from(records: Vec<BookRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a CatalogManifest {
    type Item = &'a BookRecord;
    type IntoIter = std::slice::Iter<'a, BookRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Summary statistics for a catalog build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Scan roots that were walked.
    pub roots_scanned: u64,
    /// Scan roots skipped because they were absent.
    pub roots_missing: u64,
    /// Regular files visited, books or not.
    pub files_visited: u64,
    /// Records added to the manifest.
    pub books_found: u64,
    /// Files skipped because they were already recorded.
    pub duplicates_skipped: u64,
    /// Book count per category, in first-seen order.
    pub per_category: IndexMap<CompactString, u64>,
}

impl CatalogStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update stats with a recorded book.
    pub fn record_book(&mut self, record: &BookRecord) {
        self.books_found += 1;
        *self.per_category.entry(record.category.clone()).or_insert(0) += 1;
    }
}
