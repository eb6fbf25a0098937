//! Deterministic local filenames for downloaded fonts.

use sha2::{Digest, Sha256};

use super::font_extension;

const FALLBACK_EXTENSION: &str = "woff2";

/// First 8 lowercase hex characters of SHA-256 over the exact URL string.
pub fn url_hash8(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let mut hex = hex::encode(digest);
    hex.truncate(8);
    hex
}

/// Local filename for a font reference: `iconfont-<hash8>.<ext>`.
///
/// The hash covers the original reference as written in the stylesheet
/// (before protocol normalisation), so the same reference always maps to the
/// same file. The extension falls back to `woff2` when unrecognised.
pub fn font_filename(original_url: &str) -> String {
    let ext = font_extension(original_url).unwrap_or(FALLBACK_EXTENSION);
    format!("iconfont-{}.{}", url_hash8(original_url), ext)
}
