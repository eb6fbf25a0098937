//! Font materialization: vendor every font a stylesheet references.
//!
//! Downloads run one at a time in discovery order. A failed font is logged
//! and skipped; its reference stays pointed at the original URL.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::fetch::Fetch;
use crate::rewrite::{extract_font_refs, replace_font_refs, FontMap};
use crate::url_model::{font_filename, normalize_url};

/// Where fonts are written and how the stylesheet refers to them.
#[derive(Debug, Clone)]
pub struct MaterializeOptions {
    pub output_dir: PathBuf,
    pub public_path: String,
}

/// `public_path` with a trailing `/` (empty stays empty).
pub fn public_prefix(public_path: &str) -> String {
    if public_path.is_empty() || public_path.ends_with('/') {
        public_path.to_string()
    } else {
        format!("{}/", public_path)
    }
}

/// Rewritten stylesheet plus what happened to each reference.
#[derive(Debug, Clone, Default)]
pub struct Materialized {
    pub css: String,
    /// Original reference → public path, for fonts that were written.
    pub map: FontMap,
    /// Files written under the output directory, in download order.
    pub written: Vec<PathBuf>,
    /// References that could not be downloaded or written.
    pub failed: Vec<String>,
}

impl Materialized {
    fn unchanged(css: &str) -> Self {
        Self {
            css: css.to_string(),
            ..Self::default()
        }
    }
}

/// Downloads every distinct font referenced by `css` into
/// `opts.output_dir` and rewrites the references to `opts.public_path`.
///
/// Only creating the output directory is fatal; per-font failures are
/// recorded in [`Materialized::failed`].
pub fn materialize(css: &str, opts: &MaterializeOptions, fetcher: &dyn Fetch) -> Result<Materialized> {
    let refs = extract_font_refs(css);
    if refs.is_empty() {
        tracing::info!("no font references found");
        return Ok(Materialized::unchanged(css));
    }
    tracing::info!(count = refs.len(), "found font references");

    fs::create_dir_all(&opts.output_dir)
        .with_context(|| format!("create font dir {}", opts.output_dir.display()))?;

    let prefix = public_prefix(&opts.public_path);
    let mut out = Materialized::default();
    for original in refs {
        let filename = font_filename(&original);
        let dest = opts.output_dir.join(&filename);
        let source = normalize_url(&original);
        tracing::debug!(url = %source, file = %filename, "downloading font");
        match download_to(fetcher, &source, &dest) {
            Ok(len) => {
                tracing::info!(url = %original, file = %filename, bytes = len, "font downloaded");
                out.map.insert(original, format!("{}{}", prefix, filename));
                out.written.push(dest);
            }
            Err(e) => {
                tracing::warn!(url = %original, "font download failed, keeping remote reference: {:#}", e);
                out.failed.push(original);
            }
        }
    }

    out.css = replace_font_refs(css, &out.map);
    tracing::info!(
        downloaded = out.written.len(),
        failed = out.failed.len(),
        "font materialization finished"
    );
    Ok(out)
}

fn download_to(fetcher: &dyn Fetch, url: &str, dest: &Path) -> Result<usize> {
    let bytes = fetcher.fetch_bytes(url)?;
    fs::write(dest, &bytes).with_context(|| format!("write {}", dest.display()))?;
    Ok(bytes.len())
}
