//! `url(...)` reference rewriting over stylesheet text.
//!
//! Pattern matching only; no CSS grammar. Every pass returns a new string.

mod patterns;

use crate::url_model::{font_extension, resolve_against};
use regex::{Captures, Regex};
use std::collections::{HashMap, HashSet};

/// Original font reference → path the rewritten stylesheet should use.
pub type FontMap = HashMap<String, String>;

/// Resolves every `url(./...)` / `url(../...)` against `base_url` and writes
/// it back as `url('<absolute>')`.
///
/// References that cannot be resolved are left exactly as written.
pub fn rewrite_relative(css: &str, base_url: &str) -> String {
    patterns::relative_url()
        .replace_all(css, |caps: &Captures<'_>| {
            let rel = &caps[1];
            match resolve_against(base_url, rel) {
                Some(abs) => format!("url('{}')", abs),
                None => {
                    tracing::debug!(reference = rel, base = base_url, "left relative reference as-is");
                    caps[0].to_string()
                }
            }
        })
        .into_owned()
}

/// Distinct absolute or protocol-relative font references, in order of first
/// appearance.
pub fn extract_font_refs(css: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    patterns::absolute_url()
        .captures_iter(css)
        .map(|caps| caps[1].to_string())
        .filter(|url| font_extension(url).is_some())
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

/// Replaces each `url(...)` token whose reference is a key of `map` with
/// `url('<mapped path>')`. References not in `map` are untouched.
pub fn replace_font_refs(css: &str, map: &FontMap) -> String {
    let mut out = css.to_string();
    for (original, local) in map {
        let pattern = format!(r#"url\(\s*['"]?{}['"]?\s*\)"#, regex::escape(original));
        let re = match Regex::new(&pattern) {
            Ok(re) => re,
            Err(e) => {
                tracing::warn!(url = %original, "skipping font reference: {}", e);
                continue;
            }
        };
        let replacement = format!("url('{}')", local);
        out = re
            .replace_all(&out, regex::NoExpand(&replacement))
            .into_owned();
    }
    out
}
