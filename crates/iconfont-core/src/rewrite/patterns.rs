//! Compiled `url(...)` patterns.
//!
//! Each accessor uses a `OnceLock` to compile the pattern at most once.

use regex::Regex;
use std::sync::OnceLock;

/// `url(...)` whose reference starts with `./` or `../`. Group 1 is the path.
pub(super) fn relative_url() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"url\(\s*['"]?(\.\.?/[^'")\s]+)['"]?\s*\)"#)
            .expect("relative_url: pattern is valid and should always compile")
    })
}

/// `url(...)` whose reference is `http(s)://...` or `//...`. Group 1 is the URL.
pub(super) fn absolute_url() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"url\(\s*['"]?((?:https?:)?//[^'")\s]+)['"]?\s*\)"#)
            .expect("absolute_url: pattern is valid and should always compile")
    })
}
