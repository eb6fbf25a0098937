//! `iconfont resolve` – show which source provides the URL.

use anyhow::Result;
use std::path::Path;

use super::resolve_for_project;

pub fn run_resolve(url: Option<&str>, root: &Path) -> Result<()> {
    let resolution = resolve_for_project(url, root);
    match resolution.origin {
        Some(origin) => println!("{}  ({})", resolution.url, origin),
        None => println!("No iconfont URL configured."),
    }
    Ok(())
}
