//! Output provisioning and manifest writing.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use shelfindex_core::{CatalogConfig, CatalogManifest, ScanError};

use crate::scanner::{CatalogScan, CatalogScanner};

/// Directories to create before the manifest is written.
///
/// The plan is computed up front from the current filesystem state, then
/// executed in one pass by [`OutputPlan::provision`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPlan {
    /// Manifest file location.
    pub manifest: PathBuf,
    /// Directories that do not exist yet, parents first.
    pub directories: Vec<PathBuf>,
}

impl OutputPlan {
    /// Plan the output directories for a configuration.
    ///
    /// Companion directories are only planned when the manifest's own
    /// directory is missing, i.e. on the first run in a fresh tree.
    pub fn from_config(config: &CatalogConfig) -> Self {
        let manifest = config.manifest_location();
        let mut directories = Vec::new();

        if let Some(parent) = manifest.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                directories.push(parent.to_path_buf());
                directories.extend(
                    config
                        .companion_dirs
                        .iter()
                        .map(|dir| config.resolve(dir))
                        .filter(|dir| !dir.exists()),
                );
            }
        }

        Self {
            manifest,
            directories,
        }
    }

    /// Create every planned directory. Returns the directories created.
    pub fn provision(&self) -> Result<Vec<PathBuf>, ScanError> {
        for dir in &self.directories {
            fs::create_dir_all(dir).map_err(|e| ScanError::io(dir, e))?;
            debug!(dir = %dir.display(), "Created directory");
        }

        if let Some(parent) = self.manifest.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(ScanError::NotADirectory {
                    path: parent.to_path_buf(),
                });
            }
        }

        Ok(self.directories.clone())
    }
}

/// Outcome of a full catalog build.
#[derive(Debug, Clone)]
pub struct CatalogReport {
    /// What the scan found.
    pub scan: CatalogScan,
    /// Where the manifest was written.
    pub output: PathBuf,
    /// Directories created for the output.
    pub created_dirs: Vec<PathBuf>,
}

/// Write a manifest to the configured output path, replacing any existing file.
pub fn write_manifest(
    config: &CatalogConfig,
    manifest: &CatalogManifest,
) -> Result<PathBuf, ScanError> {
    let plan = OutputPlan::from_config(config);
    write_planned(&plan, manifest)?;
    Ok(plan.manifest)
}

/// Scan every root and write the manifest.
pub fn build_catalog(config: &CatalogConfig) -> Result<CatalogReport, ScanError> {
    let scan = CatalogScanner::new(config.clone()).scan()?;
    info!(books = scan.manifest.len(), "Scan complete");

    let plan = OutputPlan::from_config(config);
    let created_dirs = write_planned(&plan, &scan.manifest)?;

    Ok(CatalogReport {
        scan,
        output: plan.manifest,
        created_dirs,
    })
}

fn write_planned(plan: &OutputPlan, manifest: &CatalogManifest) -> Result<Vec<PathBuf>, ScanError> {
    let created = plan.provision()?;
    let json = manifest.to_json()?;
    fs::write(&plan.manifest, json).map_err(|e| ScanError::io(&plan.manifest, e))?;
    info!(path = %plan.manifest.display(), records = manifest.len(), "Wrote manifest");
    Ok(created)
}
