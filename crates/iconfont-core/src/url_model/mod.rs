//! URL normalisation and local font filename derivation.

mod font_name;
mod path;

pub use font_name::{font_filename, url_hash8};
pub use path::{font_extension, FONT_EXTENSIONS};

use std::borrow::Cow;

/// Turns a protocol-relative URL (`//host/path`) into an `https:` URL.
/// Anything else is returned unchanged.
///
/// # Examples
///
/// - `"//at.alicdn.com/t/c_1.css"` → `"https://at.alicdn.com/t/c_1.css"`
/// - `"http://example.com/a.css"` → unchanged
pub fn normalize_url(url: &str) -> Cow<'_, str> {
    if url.starts_with("//") {
        Cow::Owned(format!("https:{}", url))
    } else {
        Cow::Borrowed(url)
    }
}

/// Resolves `reference` against `base` per standard URL rules.
///
/// `base` may be protocol-relative. Returns `None` when either side does not
/// parse.
pub fn resolve_against(base: &str, reference: &str) -> Option<String> {
    let base = url::Url::parse(&normalize_url(base)).ok()?;
    base.join(reference).ok().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_protocol_relative() {
        assert_eq!(
            normalize_url("//at.alicdn.com/t/c_1.css"),
            "https://at.alicdn.com/t/c_1.css"
        );
    }

    #[test]
    fn normalize_leaves_absolute_and_relative_alone() {
        assert_eq!(normalize_url("http://example.com/a.css"), "http://example.com/a.css");
        assert_eq!(normalize_url("/fonts/a.woff"), "/fonts/a.woff");
        assert!(matches!(normalize_url("https://x.com/"), Cow::Borrowed(_)));
    }

    #[test]
    fn resolve_parent_reference() {
        assert_eq!(
            resolve_against("https://cdn.example.com/css/style.css", "../img/a.png").as_deref(),
            Some("https://cdn.example.com/img/a.png")
        );
    }

    #[test]
    fn resolve_against_protocol_relative_base() {
        assert_eq!(
            resolve_against("//cdn.example.com/css/style.css", "./font/i.woff2").as_deref(),
            Some("https://cdn.example.com/css/font/i.woff2")
        );
    }

    #[test]
    fn resolve_against_unparseable_base() {
        assert_eq!(resolve_against("not a url", "../a.png"), None);
    }
}
