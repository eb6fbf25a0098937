//! CLI command handlers, one per file.

mod build;
mod fonts;
mod inject;
mod resolve;

pub use build::run_build;
#[cfg(test)]
pub(crate) use build::build_options;
#[cfg(test)]
pub(crate) use fonts::font_listing;
pub use fonts::run_fonts;
pub use inject::run_inject;
pub use resolve::run_resolve;

use iconfont_core::resolver::{self, ConfigFileSource, PackageMetadataSource, Resolution};
use std::path::Path;

/// Resolve the stylesheet URL for the project at `root`.
pub(crate) fn resolve_for_project(explicit: Option<&str>, root: &Path) -> Resolution {
    resolver::resolve(
        explicit,
        resolver::env_url().as_deref(),
        &ConfigFileSource::new(root),
        &PackageMetadataSource::new(root),
    )
}
