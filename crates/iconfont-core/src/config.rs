use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Project-local config file, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "iconfont.toml";

/// Environment variable consulted after an explicit `url` option.
pub const URL_ENV_VAR: &str = "ICONFONT_URL";

pub const DEFAULT_FONT_OUTPUT_DIR: &str = "public/fonts";
pub const DEFAULT_FONT_PUBLIC_PATH: &str = "/fonts/";

/// Failure to read or parse one of the configuration sources.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Transport limits applied to every stylesheet and font request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Total time allowed for one request, in seconds.
    pub timeout_secs: u64,
    /// Time allowed for the TCP/TLS connect phase, in seconds.
    pub connect_timeout_secs: u64,
    /// Redirect hops followed before giving up.
    pub max_redirects: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 15,
            max_redirects: 10,
        }
    }
}

/// Options for one build-time run of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Explicit stylesheet URL; highest precedence when set.
    pub url: Option<String>,
    /// Abort the build when the stylesheet cannot be fetched.
    pub fail_on_error: bool,
    /// Vendor referenced font files next to the build output.
    pub download_fonts: bool,
    /// Directory font files are written to.
    pub font_output_dir: PathBuf,
    /// Prefix the rewritten stylesheet uses to reference written fonts.
    pub font_public_path: String,
    pub fetch: FetchConfig,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            url: None,
            fail_on_error: true,
            download_fonts: true,
            font_output_dir: PathBuf::from(DEFAULT_FONT_OUTPUT_DIR),
            font_public_path: DEFAULT_FONT_PUBLIC_PATH.to_string(),
            fetch: FetchConfig::default(),
        }
    }
}

/// `[default]` table, the alternative location of `url` in the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultSection {
    #[serde(default)]
    pub url: Option<String>,
}

/// Contents of `iconfont.toml`. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub default: Option<DefaultSection>,
    #[serde(default)]
    pub fail_on_error: Option<bool>,
    #[serde(default)]
    pub download_fonts: Option<bool>,
    #[serde(default)]
    pub font_output_dir: Option<PathBuf>,
    #[serde(default)]
    pub font_public_path: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    #[serde(default)]
    pub max_redirects: Option<u32>,
}

impl FileConfig {
    /// Parse a config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&data).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `<root>/iconfont.toml`; `Ok(None)` when the file does not exist.
    pub fn load_from_root(root: &Path) -> Result<Option<Self>, ConfigError> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }
        Self::load(&path).map(Some)
    }

    /// Stylesheet URL: top-level `url`, else `[default].url`. Blank values count as unset.
    pub fn url(&self) -> Option<&str> {
        let top = self.url.as_deref().map(str::trim).filter(|u| !u.is_empty());
        top.or_else(|| {
            self.default
                .as_ref()
                .and_then(|d| d.url.as_deref())
                .map(str::trim)
                .filter(|u| !u.is_empty())
        })
    }

    /// Overlay the values present in the file onto `opts`. `url` is left to the resolver.
    pub fn apply_to(&self, opts: &mut BuildOptions) {
        if let Some(v) = self.fail_on_error {
            opts.fail_on_error = v;
        }
        if let Some(v) = self.download_fonts {
            opts.download_fonts = v;
        }
        if let Some(v) = &self.font_output_dir {
            opts.font_output_dir = v.clone();
        }
        if let Some(v) = &self.font_public_path {
            opts.font_public_path = v.clone();
        }
        // libcurl reads 0 as "no timeout"; keep the bound.
        match self.timeout_secs {
            Some(0) => tracing::warn!("ignoring timeout_secs = 0 in {}", CONFIG_FILE_NAME),
            Some(v) => opts.fetch.timeout_secs = v,
            None => {}
        }
        match self.connect_timeout_secs {
            Some(0) => tracing::warn!("ignoring connect_timeout_secs = 0 in {}", CONFIG_FILE_NAME),
            Some(v) => opts.fetch.connect_timeout_secs = v,
            None => {}
        }
        if let Some(v) = self.max_redirects {
            opts.fetch.max_redirects = v;
        }
    }
}
