//! Runtime style injection.
//!
//! Decides per page load whether to link the live stylesheet or to insert
//! the stylesheet embedded at build time. The build mode is passed in
//! explicitly; nothing here reads process state.

mod document;

pub use document::{Document, HeadElement, HtmlDocument, MemoryDocument, LOCAL_STYLE_MARKER};

use crate::url_model::normalize_url;
use std::fmt;
use std::str::FromStr;

/// Build mode the page was produced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Development,
    #[default]
    Production,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Mode::Development),
            "production" | "prod" => Ok(Mode::Production),
            other => Err(format!(
                "unknown mode {:?} (expected development or production)",
                other
            )),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Development => "development",
            Mode::Production => "production",
        })
    }
}

/// Stylesheet text captured at build time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddedCss(String);

impl EmbeddedCss {
    pub fn new(css: impl Into<String>) -> Self {
        Self(css.into())
    }

    /// Guarded read of the build-time constant: absent means empty.
    pub fn guarded(constant: Option<&str>) -> Self {
        Self(constant.unwrap_or_default().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InjectorOptions {
    /// Live stylesheet URL, possibly protocol-relative.
    pub url: String,
    pub mode: Mode,
    pub force_online: bool,
    pub force_local: bool,
}

/// What one injection pass did to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectOutcome {
    /// Appended a `<link>` to the live stylesheet.
    LinkedLive { href: String },
    /// A `<link>` with the same href already existed.
    AlreadyLinked,
    /// Appended the marked `<style>` block.
    EmbeddedLocal,
    /// A marked `<style>` already existed.
    AlreadyEmbedded,
    /// Local mode, but the embedded stylesheet is empty.
    NothingToEmbed,
    /// No URL and local mode not forced; nothing was done.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectorState {
    Uninitialized,
    Injected,
}

/// Injects the icon-font stylesheet into a [`Document`].
#[derive(Debug, Clone)]
pub struct StyleInjector {
    options: InjectorOptions,
    embedded: EmbeddedCss,
    state: InjectorState,
}

impl StyleInjector {
    pub fn new(options: InjectorOptions, embedded: EmbeddedCss) -> Self {
        Self {
            options,
            embedded,
            state: InjectorState::Uninitialized,
        }
    }

    pub fn state(&self) -> InjectorState {
        self.state
    }

    /// Switch mode; takes effect on the next [`reload`](Self::reload).
    pub fn set_mode(&mut self, mode: Mode) {
        self.options.mode = mode;
    }

    /// Live when forced online, or in development unless forced local.
    pub fn is_live(&self) -> bool {
        let o = &self.options;
        o.force_online || (o.mode == Mode::Development && !o.force_local)
    }

    /// First injection for this page load.
    pub fn install(&mut self, doc: &mut dyn Document) -> InjectOutcome {
        let outcome = self.apply(doc);
        if outcome != InjectOutcome::Skipped {
            self.state = InjectorState::Injected;
        }
        outcome
    }

    /// Re-runs the same decision against the current options.
    pub fn reload(&mut self, doc: &mut dyn Document) -> InjectOutcome {
        self.install(doc)
    }

    fn apply(&self, doc: &mut dyn Document) -> InjectOutcome {
        let url = self.options.url.trim();
        if url.is_empty() && !self.options.force_local {
            tracing::error!("no iconfont url provided; stylesheet not injected");
            return InjectOutcome::Skipped;
        }

        if self.is_live() {
            if url.is_empty() {
                tracing::error!("live mode requested without an iconfont url");
                return InjectOutcome::Skipped;
            }
            let href = normalize_url(url).into_owned();
            if doc.has_stylesheet_link(&href) {
                return InjectOutcome::AlreadyLinked;
            }
            doc.append_to_head(HeadElement::StylesheetLink { href: href.clone() });
            tracing::info!(%href, "linked live iconfont stylesheet");
            InjectOutcome::LinkedLive { href }
        } else {
            if self.embedded.is_empty() {
                tracing::warn!("embedded iconfont stylesheet is empty");
                return InjectOutcome::NothingToEmbed;
            }
            if doc.has_marked_style() {
                return InjectOutcome::AlreadyEmbedded;
            }
            doc.append_to_head(HeadElement::MarkedStyle {
                css: self.embedded.as_str().to_string(),
            });
            tracing::info!(bytes = self.embedded.as_str().len(), "embedded local iconfont stylesheet");
            InjectOutcome::EmbeddedLocal
        }
    }
}
