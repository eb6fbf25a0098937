//! Build-time pipeline: fetch the stylesheet, rewrite it, vendor its fonts and
//! render the result as a compile-time constant.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{BuildOptions, CONFIG_FILE_NAME, URL_ENV_VAR};
use crate::fetch::{Fetch, FetchError};
use crate::materialize::{materialize, MaterializeOptions, Materialized};
use crate::resolver::Resolution;
use crate::rewrite::rewrite_relative;

/// Name of the bundler define holding the JSON-escaped stylesheet.
pub const DEFINE_NAME: &str = "__ICONFONT_CSS__";

/// Name of the constant in the generated Rust module.
pub const CONST_NAME: &str = "ICONFONT_CSS";

/// File name of the generated Rust module inside an output directory.
pub const MODULE_FILE_NAME: &str = "iconfont_css.rs";

#[derive(Debug, Error)]
pub enum BuildError {
    /// The stylesheet itself could not be downloaded and `fail_on_error` is set.
    #[error("failed to download iconfont stylesheet: {0}")]
    Fetch(#[from] FetchError),
}

/// Final stylesheet of one build.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedStylesheet {
    pub css: String,
    /// URL the stylesheet was fetched from; `None` when nothing was fetched.
    pub source_url: Option<String>,
    /// Font materialization report, when fonts were downloaded.
    pub fonts: Option<Materialized>,
}

impl EmbeddedStylesheet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.css.is_empty()
    }

    /// Stylesheet as a JSON string literal.
    pub fn define_value(&self) -> String {
        serde_json::Value::String(self.css.clone()).to_string()
    }

    /// `{"__ICONFONT_CSS__": "<css>"}`, the define map handed to a bundler.
    pub fn define_json(&self) -> String {
        let mut map = serde_json::Map::new();
        map.insert(
            DEFINE_NAME.to_string(),
            serde_json::Value::String(self.css.clone()),
        );
        serde_json::Value::Object(map).to_string()
    }

    /// Rust source declaring `pub const ICONFONT_CSS: &str`. An empty stylesheet
    /// yields the fallback module exporting `""`.
    pub fn rust_module(&self) -> String {
        let origin = self.source_url.as_deref().unwrap_or("no source");
        format!(
            "// @generated by iconfont-loader from {}. Do not edit.\npub const {}: &str = {:?};\n",
            origin, CONST_NAME, self.css
        )
    }

    /// Write [`rust_module`](Self::rust_module) to `<out_dir>/iconfont_css.rs`,
    /// for `include!` from a build script's `OUT_DIR`.
    pub fn write_module(&self, out_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir.display()))?;
        let path = out_dir.join(MODULE_FILE_NAME);
        fs::write(&path, self.rust_module()).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }
}

/// Fetch `url`, absolutise its relative references and, when enabled, vendor
/// its fonts. Font problems never fail this call.
pub fn build_stylesheet(
    url: &str,
    opts: &BuildOptions,
    fetcher: &dyn Fetch,
) -> Result<EmbeddedStylesheet, FetchError> {
    tracing::info!(%url, "downloading iconfont stylesheet");
    let downloaded = fetcher.fetch_text(url)?;
    let css = rewrite_relative(&downloaded, url);

    let mut sheet = EmbeddedStylesheet {
        css,
        source_url: Some(url.to_string()),
        fonts: None,
    };

    if opts.download_fonts {
        let mopts = MaterializeOptions {
            output_dir: opts.font_output_dir.clone(),
            public_path: opts.font_public_path.clone(),
        };
        match materialize(&sheet.css, &mopts, fetcher) {
            Ok(report) => {
                sheet.css = report.css.clone();
                sheet.fonts = Some(report);
            }
            Err(e) => tracing::warn!("font materialization skipped: {:#}", e),
        }
    }

    tracing::info!(
        size_kib = %format!("{:.2}", sheet.css.len() as f64 / 1024.0),
        "iconfont stylesheet ready"
    );
    Ok(sheet)
}

/// Run the build step for a resolved URL, applying the `fail_on_error` policy.
///
/// A resolution miss is never fatal: it logs how to configure the URL and
/// yields an empty stylesheet.
pub fn run(
    resolution: &Resolution,
    opts: &BuildOptions,
    fetcher: &dyn Fetch,
) -> Result<EmbeddedStylesheet, BuildError> {
    if resolution.is_miss() {
        tracing::warn!(
            "no iconfont url configured; embedding an empty stylesheet. Configure one of: \
             the url option, the {} environment variable, `url` in {}, \
             or `iconfont.url` in package.json",
            URL_ENV_VAR,
            CONFIG_FILE_NAME
        );
        return Ok(EmbeddedStylesheet::empty());
    }

    match build_stylesheet(&resolution.url, opts, fetcher) {
        Ok(sheet) => Ok(sheet),
        Err(e) if opts.fail_on_error => {
            tracing::error!("iconfont stylesheet download failed: {}", e);
            Err(BuildError::Fetch(e))
        }
        Err(e) => {
            tracing::warn!("iconfont stylesheet download failed, embedding empty stylesheet: {}", e);
            Ok(EmbeddedStylesheet::empty())
        }
    }
}
