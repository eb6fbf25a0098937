//! Documents the injector can write into.

use regex::Regex;
use std::sync::OnceLock;

/// Marker attribute carried by the embedded `<style>` element.
pub const LOCAL_STYLE_MARKER: &str = "data-iconfont-local";

/// Element the injector appends to the document head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadElement {
    /// `<link rel="stylesheet" href="...">`
    StylesheetLink { href: String },
    /// `<style data-iconfont-local="true">...</style>`
    MarkedStyle { css: String },
}

impl HeadElement {
    pub fn to_html(&self) -> String {
        match self {
            HeadElement::StylesheetLink { href } => {
                format!(r#"<link rel="stylesheet" href="{}">"#, escape_attr(href))
            }
            HeadElement::MarkedStyle { css } => format!(
                r#"<style {}="true">{}</style>"#,
                LOCAL_STYLE_MARKER,
                // `</` would let the text close the element early; `\/` is the same character in CSS.
                css.replace("</", "<\\/")
            ),
        }
    }
}

/// Head of a page, as far as the injector needs it.
pub trait Document {
    /// True if a stylesheet link with exactly this `href` is present.
    fn has_stylesheet_link(&self, href: &str) -> bool;
    /// True if a `<style>` carrying [`LOCAL_STYLE_MARKER`] is present.
    fn has_marked_style(&self) -> bool;
    fn append_to_head(&mut self, element: HeadElement);
}

/// In-memory list of head elements.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    pub head: Vec<HeadElement>,
}

impl Document for MemoryDocument {
    fn has_stylesheet_link(&self, href: &str) -> bool {
        self.head
            .iter()
            .any(|e| matches!(e, HeadElement::StylesheetLink { href: h } if h == href))
    }

    fn has_marked_style(&self) -> bool {
        self.head
            .iter()
            .any(|e| matches!(e, HeadElement::MarkedStyle { .. }))
    }

    fn append_to_head(&mut self, element: HeadElement) {
        self.head.push(element);
    }
}

/// An HTML page held as text. Elements are inserted before `</head>`, or
/// appended at the end when the page has no closing head tag.
#[derive(Debug, Clone, Default)]
pub struct HtmlDocument {
    html: String,
}

impl HtmlDocument {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }
}

fn link_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<link\b[^>]*>")
            .expect("link_tag: pattern is valid and should always compile")
    })
}

fn href_attr() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("href_attr: pattern is valid and should always compile")
    })
}

fn marked_style_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<style\b[^>]*\bdata-iconfont-local\b")
            .expect("marked_style_tag: pattern is valid and should always compile")
    })
}

fn head_close() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)</head\s*>")
            .expect("head_close: pattern is valid and should always compile")
    })
}

impl Document for HtmlDocument {
    fn has_stylesheet_link(&self, href: &str) -> bool {
        link_tag().find_iter(&self.html).any(|tag| {
            href_attr()
                .captures(tag.as_str())
                .and_then(|c| c.get(1).or_else(|| c.get(2)))
                .is_some_and(|h| unescape_attr(h.as_str()) == href)
        })
    }

    fn has_marked_style(&self) -> bool {
        marked_style_tag().is_match(&self.html)
    }

    fn append_to_head(&mut self, element: HeadElement) {
        let markup = element.to_html();
        match head_close().find(&self.html) {
            Some(m) => self.html.insert_str(m.start(), &markup),
            None => self.html.push_str(&markup),
        }
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn unescape_attr(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
