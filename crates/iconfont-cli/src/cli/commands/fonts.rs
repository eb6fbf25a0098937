//! `iconfont fonts <css>` – list font references and their local names.

use anyhow::{Context, Result};
use iconfont_core::materialize::public_prefix;
use iconfont_core::rewrite::extract_font_refs;
use iconfont_core::url_model::font_filename;
use std::fs;
use std::path::Path;

/// `(local path, original reference)` for each font in `css`, using the same
/// prefix normalisation as the build.
pub(crate) fn font_listing(css: &str, public_path: &str) -> Vec<(String, String)> {
    let prefix = public_prefix(public_path);
    extract_font_refs(css)
        .into_iter()
        .map(|url| (format!("{}{}", prefix, font_filename(&url)), url))
        .collect()
}

pub fn run_fonts(css_path: &Path, public_path: &str) -> Result<()> {
    let css = fs::read_to_string(css_path)
        .with_context(|| format!("read {}", css_path.display()))?;
    let listing = font_listing(&css, public_path);
    if listing.is_empty() {
        println!("No font references.");
        return Ok(());
    }
    for (local, url) in &listing {
        println!("{}  {}", local, url);
    }
    println!("{} font reference(s)", listing.len());
    Ok(())
}
