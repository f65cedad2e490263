//! Catalog configuration types.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default raw-content host that serves repository files.
pub const DEFAULT_HOST: &str = "https://raw.githubusercontent.com";

/// Configuration for a catalog build.
///
/// Every field has a compiled-in default, so `CatalogConfig::default()` is
/// the configuration the CLI runs with. Tests and embedders override fields
/// through the builder.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct CatalogConfig {
    /// Repository owner used in download URLs.
    #[builder(default = "\"cfopuser\".to_string()")]
    pub owner: String,

    /// Repository name used in download URLs.
    #[builder(default = "\"epub-Jewish-books\".to_string()")]
    pub repo: String,

    /// Branch used in download URLs.
    #[builder(default = "\"main\".to_string()")]
    pub branch: String,

    /// Host prefix for download URLs.
    #[builder(default = "DEFAULT_HOST.to_string()")]
    #[serde(default = "default_host")]
    pub host: String,

    /// Directory names to scan, in order.
    #[builder(default = "Self::default_scan_roots()")]
    pub scan_roots: Vec<String>,

    /// File name suffix that marks a book (case-sensitive).
    #[builder(default = "\".epub\".to_string()")]
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Directory scan roots and the output path are resolved against.
    #[builder(default = "PathBuf::from(\".\")")]
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Where the manifest is written, relative to `base_dir`.
    #[builder(default = "PathBuf::from(\"docs/data/books.json\")")]
    pub output_path: PathBuf,

    /// Directories provisioned alongside a freshly created output directory.
    #[builder(default = "Self::default_companion_dirs()")]
    #[serde(default)]
    pub companion_dirs: Vec<PathBuf>,

    /// Skip files already reached through another path.
    #[builder(default = "false")]
    #[serde(default)]
    pub dedupe: bool,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_extension() -> String {
    ".epub".to_string()
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

impl CatalogConfigBuilder {
    fn default_scan_roots() -> Vec<String> {
        [
            "daat",
            "kindle seforim",
            "orayta",
            "oyw",
            "sefaria",
            "torat emet old",
            "torat emet website",
            "תורת אמת",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    fn default_companion_dirs() -> Vec<PathBuf> {
        vec![PathBuf::from("docs/css"), PathBuf::from("docs/js")]
    }

    fn validate(&self) -> Result<(), String> {
        let required = [
            ("owner", &self.owner),
            ("repo", &self.repo),
            ("branch", &self.branch),
            ("host", &self.host),
            ("extension", &self.extension),
        ];
        for (name, value) in required {
            if value.as_ref().is_some_and(|v| v.is_empty()) {
                return Err(format!("{name} cannot be empty"));
            }
        }

        if let Some(ref roots) = self.scan_roots {
            for root in roots {
                if root.is_empty() {
                    return Err("Scan root cannot be empty".to_string());
                }
                if Path::new(root).is_absolute() {
                    return Err(format!("Scan root must be relative: {root}"));
                }
                // Records take their category from the root's first component.
                if Path::new(root)
                    .components()
                    .any(|c| !matches!(c, Component::Normal(_)))
                {
                    return Err(format!("Scan root must name a directory: {root}"));
                }
            }
        }

        if let Some(ref output) = self.output_path {
            if output.as_os_str().is_empty() {
                return Err("Output path cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl CatalogConfig {
    /// Create a new catalog config builder.
    pub fn builder() -> CatalogConfigBuilder {
        CatalogConfigBuilder::default()
    }

    /// URL every download link starts with; the file path follows it.
    pub fn url_prefix(&self) -> String {
        let host = self.host.strip_suffix('/').unwrap_or(&self.host);
        format!("{host}/{}/{}/{}/", self.owner, self.repo, self.branch)
    }

    /// Build the download URL for a forward-slash relative path.
    ///
    /// The path is inserted literally, without percent-encoding.
    pub fn download_url(&self, path: &str) -> String {
        let mut url = self.url_prefix();
        url.push_str(path);
        url
    }

    /// Resolve a path relative to the base directory.
    pub fn resolve(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.base_dir.join(rel)
    }

    /// Absolute-or-cwd-relative location of the manifest file.
    pub fn manifest_location(&self) -> PathBuf {
        self.resolve(&self.output_path)
    }

    /// Check whether a file name carries the book extension.
    ///
    /// Works on the raw name, so it does not need to be valid UTF-8.
    pub fn is_book(&self, name: impl AsRef<OsStr>) -> bool {
        name.as_ref()
            .as_encoded_bytes()
            .ends_with(self.extension.as_bytes())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            owner: "cfopuser".to_string(),
            repo: "epub-Jewish-books".to_string(),
            branch: "main".to_string(),
            host: default_host(),
            scan_roots: CatalogConfigBuilder::default_scan_roots(),
            extension: default_extension(),
            base_dir: default_base_dir(),
            output_path: PathBuf::from("docs/data/books.json"),
            companion_dirs: CatalogConfigBuilder::default_companion_dirs(),
            dedupe: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = CatalogConfig::builder()
            .owner("someone")
            .scan_roots(vec!["library".to_string()])
            .base_dir("/srv/books")
            .build()
            .unwrap();

        assert_eq!(config.owner, "someone");
        assert_eq!(config.repo, "epub-Jewish-books");
        assert_eq!(config.scan_roots, vec!["library"]);
        assert_eq!(config.base_dir, PathBuf::from("/srv/books"));
        assert!(!config.dedupe);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let built = CatalogConfig::builder().build().unwrap();
        let default = CatalogConfig::default();

        assert_eq!(built.scan_roots, default.scan_roots);
        assert_eq!(built.companion_dirs, default.companion_dirs);
        assert_eq!(built.output_path, default.output_path);
        assert_eq!(built.url_prefix(), default.url_prefix());
    }

    #[test]
    fn test_builder_rejects_invalid() {
        assert!(CatalogConfig::builder().owner("").build().is_err());
        assert!(CatalogConfig::builder().extension("").build().is_err());
        assert!(CatalogConfig::builder()
            .scan_roots(vec![String::new()])
            .build()
            .is_err());
        assert!(CatalogConfig::builder()
            .scan_roots(vec!["/etc".to_string()])
            .build()
            .is_err());
        assert!(CatalogConfig::builder().output_path("").build().is_err());
    }

    #[test]
    fn test_builder_rejects_dot_roots() {
        for root in [".", "..", "./library", "library/../other"] {
            assert!(
                CatalogConfig::builder()
                    .scan_roots(vec![root.to_string()])
                    .build()
                    .is_err(),
                "accepted {root}"
            );
        }
        assert!(CatalogConfig::builder()
            .scan_roots(vec!["kindle seforim".to_string(), "a/b".to_string()])
            .build()
            .is_ok());
    }

    #[test]
    fn test_download_url() {
        let config = CatalogConfig::default();
        assert_eq!(
            config.download_url("daat/Odes.epub"),
            "https://raw.githubusercontent.com/cfopuser/epub-Jewish-books/main/daat/Odes.epub"
        );
    }

    #[test]
    fn test_host_trailing_slash() {
        let config = CatalogConfig::builder()
            .host("https://cdn.example.org/")
            .build()
            .unwrap();
        assert_eq!(
            config.download_url("a/b.epub"),
            "https://cdn.example.org/cfopuser/epub-Jewish-books/main/a/b.epub"
        );
    }

    #[test]
    fn test_is_book_is_case_sensitive() {
        let config = CatalogConfig::default();
        assert!(config.is_book("Odes.epub"));
        assert!(!config.is_book("Odes.EPUB"));
        assert!(!config.is_book("Notes.txt"));
    }
}
