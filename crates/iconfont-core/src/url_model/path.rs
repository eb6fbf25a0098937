//! Extension extraction from URL paths.

/// Font file extensions recognised in stylesheets, longest first so that
/// `woff2` is never mistaken for `woff`.
pub const FONT_EXTENSIONS: [&str; 5] = ["woff2", "woff", "ttf", "eot", "svg"];

/// Returns the font extension of the last path segment of `url`, ignoring
/// query string and fragment.
///
/// Returns `None` if the URL cannot be parsed or the extension is not one of
/// [`FONT_EXTENSIONS`]. Protocol-relative URLs are accepted.
pub fn font_extension(url: &str) -> Option<&'static str> {
    let parsed = url::Url::parse(&super::normalize_url(url)).ok()?;
    let segment = parsed.path().rsplit('/').next()?;
    let (_, ext) = segment.rsplit_once('.')?;
    FONT_EXTENSIONS
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions() {
        assert_eq!(font_extension("https://x.com/a/f.woff2"), Some("woff2"));
        assert_eq!(font_extension("https://x.com/a/f.woff"), Some("woff"));
        assert_eq!(font_extension("//x.com/f.ttf"), Some("ttf"));
        assert_eq!(font_extension("//x.com/f.EOT"), Some("eot"));
    }

    #[test]
    fn query_and_fragment_ignored() {
        assert_eq!(font_extension("//x.com/f.eot?#iefix"), Some("eot"));
        assert_eq!(font_extension("https://x.com/f.svg#iconfont"), Some("svg"));
        assert_eq!(font_extension("https://x.com/f.woff2?t=1700000000"), Some("woff2"));
    }

    #[test]
    fn unknown_or_missing() {
        assert_eq!(font_extension("https://x.com/font"), None);
        assert_eq!(font_extension("https://x.com/f.otf"), None);
        assert_eq!(font_extension("https://x.com/"), None);
        assert_eq!(font_extension("no scheme"), None);
    }
}
