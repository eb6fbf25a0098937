//! Stylesheet URL resolution across the configured sources.
//!
//! Precedence, first non-empty wins: explicit option, `ICONFONT_URL`,
//! `iconfont.toml`, then project package metadata. The file-backed sources
//! are injected through [`UrlSource`] so the resolver itself never touches
//! the filesystem.

use crate::config::{ConfigError, FileConfig, URL_ENV_VAR};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// A loader that may provide the stylesheet URL.
///
/// `Ok(None)` means the source exists but has no URL (or is absent);
/// errors are logged by the resolver and treated the same way.
pub trait UrlSource {
    fn load_url(&self) -> Result<Option<String>, ConfigError>;
}

impl<F> UrlSource for F
where
    F: Fn() -> Result<Option<String>, ConfigError>,
{
    fn load_url(&self) -> Result<Option<String>, ConfigError> {
        self()
    }
}

/// Which source the resolved URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlOrigin {
    Option,
    Environment,
    ConfigFile,
    PackageMetadata,
}

impl fmt::Display for UrlOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UrlOrigin::Option => "option",
            UrlOrigin::Environment => URL_ENV_VAR,
            UrlOrigin::ConfigFile => "iconfont.toml",
            UrlOrigin::PackageMetadata => "package metadata",
        };
        f.write_str(s)
    }
}

/// Outcome of resolution. An empty `url` (origin `None`) is a miss, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    pub url: String,
    pub origin: Option<UrlOrigin>,
}

impl Resolution {
    pub fn miss() -> Self {
        Self::default()
    }

    pub fn found(url: impl Into<String>, origin: UrlOrigin) -> Self {
        Self {
            url: url.into(),
            origin: Some(origin),
        }
    }

    pub fn is_miss(&self) -> bool {
        self.url.is_empty()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn from_source(source: &dyn UrlSource, origin: UrlOrigin) -> Option<String> {
    match source.load_url() {
        Ok(url) => non_empty(url.as_deref()),
        Err(e) => {
            tracing::warn!(%origin, "ignoring unreadable url source: {}", e);
            None
        }
    }
}

/// Resolve the stylesheet URL. Never fails; exhaustion yields [`Resolution::miss`].
///
/// Sources are consulted lazily, so a loader is only invoked when every
/// higher-priority source came up empty.
pub fn resolve(
    explicit: Option<&str>,
    env_value: Option<&str>,
    config_file: &dyn UrlSource,
    package_metadata: &dyn UrlSource,
) -> Resolution {
    let resolution = if let Some(url) = non_empty(explicit) {
        Resolution::found(url, UrlOrigin::Option)
    } else if let Some(url) = non_empty(env_value) {
        Resolution::found(url, UrlOrigin::Environment)
    } else if let Some(url) = from_source(config_file, UrlOrigin::ConfigFile) {
        Resolution::found(url, UrlOrigin::ConfigFile)
    } else if let Some(url) = from_source(package_metadata, UrlOrigin::PackageMetadata) {
        Resolution::found(url, UrlOrigin::PackageMetadata)
    } else {
        Resolution::miss()
    };

    match resolution.origin {
        Some(origin) => tracing::info!(%origin, url = %resolution.url, "resolved iconfont url"),
        None => tracing::warn!("no iconfont url configured"),
    }
    resolution
}

/// Current value of `ICONFONT_URL`, if set.
pub fn env_url() -> Option<String> {
    std::env::var(URL_ENV_VAR).ok()
}

/// Reads `url` (or `[default].url`) from `<root>/iconfont.toml`.
#[derive(Debug, Clone)]
pub struct ConfigFileSource {
    root: PathBuf,
}

impl ConfigFileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl UrlSource for ConfigFileSource {
    fn load_url(&self) -> Result<Option<String>, ConfigError> {
        let cfg = FileConfig::load_from_root(&self.root)?;
        Ok(cfg.and_then(|c| c.url().map(str::to_string)))
    }
}

#[derive(Debug, Deserialize)]
struct PackageJson {
    #[serde(default)]
    iconfont: Option<IconfontMetadata>,
}

#[derive(Debug, Deserialize)]
struct IconfontMetadata {
    #[serde(default)]
    url: Option<String>,
}

/// Reads `iconfont.url` from `<root>/package.json`, then
/// `package.metadata.iconfont.url` from `<root>/Cargo.toml`.
#[derive(Debug, Clone)]
pub struct PackageMetadataSource {
    root: PathBuf,
}

impl PackageMetadataSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn from_package_json(path: &Path) -> Result<Option<String>, ConfigError> {
        let data = read_optional(path)?;
        let Some(data) = data else {
            return Ok(None);
        };
        let pkg: PackageJson = serde_json::from_str(&data).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(pkg.iconfont.and_then(|m| non_empty(m.url.as_deref())))
    }

    fn from_cargo_manifest(path: &Path) -> Result<Option<String>, ConfigError> {
        let data = read_optional(path)?;
        let Some(data) = data else {
            return Ok(None);
        };
        let manifest: toml::Value = toml::from_str(&data).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        let url = manifest
            .get("package")
            .and_then(|p| p.get("metadata"))
            .and_then(|m| m.get("iconfont"))
            .and_then(|i| i.get("url"))
            .and_then(toml::Value::as_str);
        Ok(non_empty(url))
    }
}

impl UrlSource for PackageMetadataSource {
    fn load_url(&self) -> Result<Option<String>, ConfigError> {
        let package_json = self.root.join("package.json");
        match Self::from_package_json(&package_json) {
            Ok(Some(url)) => return Ok(Some(url)),
            Ok(None) => {}
            Err(e) => tracing::warn!("ignoring package.json: {}", e),
        }
        Self::from_cargo_manifest(&self.root.join("Cargo.toml"))
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, ConfigError> {
    if !path.exists() {
        tracing::debug!("{} not found", path.display());
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn some(url: &'static str) -> impl Fn() -> Result<Option<String>, ConfigError> {
        move || Ok(Some(url.to_string()))
    }

    fn none() -> Result<Option<String>, ConfigError> {
        Ok(None)
    }

    fn broken() -> Result<Option<String>, ConfigError> {
        Err(ConfigError::Io {
            path: PathBuf::from("iconfont.toml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        })
    }

    #[test]
    fn explicit_option_wins() {
        let r = resolve(
            Some("https://a.example.com/a.css"),
            Some("https://b.example.com/b.css"),
            &some("https://c.example.com/c.css"),
            &some("https://d.example.com/d.css"),
        );
        assert_eq!(r.url, "https://a.example.com/a.css");
        assert_eq!(r.origin, Some(UrlOrigin::Option));
    }

    #[test]
    fn env_beats_config_file_and_metadata() {
        let r = resolve(
            None,
            Some("//b.example.com/b.css"),
            &some("https://c.example.com/c.css"),
            &some("https://d.example.com/d.css"),
        );
        assert_eq!(r.url, "//b.example.com/b.css");
        assert_eq!(r.origin, Some(UrlOrigin::Environment));
    }

    #[test]
    fn config_file_beats_metadata() {
        let r = resolve(
            Some(""),
            None,
            &some("https://c.example.com/c.css"),
            &some("https://d.example.com/d.css"),
        );
        assert_eq!(r.url, "https://c.example.com/c.css");
        assert_eq!(r.origin, Some(UrlOrigin::ConfigFile));
    }

    #[test]
    fn metadata_is_last_resort() {
        let r = resolve(None, Some("   "), &none, &some("https://d.example.com/d.css"));
        assert_eq!(r.url, "https://d.example.com/d.css");
        assert_eq!(r.origin, Some(UrlOrigin::PackageMetadata));
    }

    #[test]
    fn loader_failure_falls_through() {
        let r = resolve(None, None, &broken, &some("https://d.example.com/d.css"));
        assert_eq!(r.origin, Some(UrlOrigin::PackageMetadata));
    }

    #[test]
    fn exhausted_sources_are_a_miss() {
        let r = resolve(None, None, &broken, &none);
        assert!(r.is_miss());
        assert_eq!(r.url, "");
        assert!(r.origin.is_none());
    }

    #[test]
    fn lower_sources_not_consulted_when_higher_found() {
        let calls = Cell::new(0);
        let counting = || -> Result<Option<String>, ConfigError> {
            calls.set(calls.get() + 1);
            Ok(None)
        };
        resolve(Some("https://a.example.com/a.css"), None, &counting, &counting);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn config_file_source_reads_default_table() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("iconfont.toml"),
            "[default]\nurl = \"//at.alicdn.com/t/c_9.css\"\n",
        )
        .unwrap();
        let src = ConfigFileSource::new(dir.path());
        assert_eq!(
            src.load_url().unwrap().as_deref(),
            Some("//at.alicdn.com/t/c_9.css")
        );
    }

    #[test]
    fn package_json_source() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{ "name": "app", "iconfont": { "url": "//at.alicdn.com/t/c_1.css" } }"#,
        )
        .unwrap();
        let src = PackageMetadataSource::new(dir.path());
        assert_eq!(
            src.load_url().unwrap().as_deref(),
            Some("//at.alicdn.com/t/c_1.css")
        );
    }

    #[test]
    fn cargo_metadata_used_when_package_json_lacks_url() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "name": "app" }"#).unwrap();
        fs::write(
            dir.path().join("Cargo.toml"),
            "[package]\nname = \"app\"\n\n[package.metadata.iconfont]\nurl = \"https://cdn.example.com/i.css\"\n",
        )
        .unwrap();
        let src = PackageMetadataSource::new(dir.path());
        assert_eq!(
            src.load_url().unwrap().as_deref(),
            Some("https://cdn.example.com/i.css")
        );
    }

    #[test]
    fn malformed_package_json_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{ not json").unwrap();
        let r = resolve(None, None, &none, &PackageMetadataSource::new(dir.path()));
        assert!(r.is_miss());
    }
}
