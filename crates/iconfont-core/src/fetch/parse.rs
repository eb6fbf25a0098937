//! Header line parsing for a single (non-followed) response.

/// Returns the `Location` header value from collected header lines.
///
/// Only the last header block counts: curl reports interim responses
/// (e.g. `100 Continue`) before the final one.
pub(crate) fn location(lines: &[String]) -> Option<String> {
    let start = lines
        .iter()
        .rposition(|l| l.starts_with("HTTP/"))
        .unwrap_or(0);
    lines[start..].iter().find_map(|line| {
        let (name, value) = line.trim().split_once(':')?;
        if name.trim().eq_ignore_ascii_case("location") {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        } else {
            None
        }
    })
}

/// Redirect statuses followed by the fetcher.
pub(crate) fn is_redirect(status: u32) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}
