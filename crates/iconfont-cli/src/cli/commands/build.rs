//! `iconfont build` – fetch, rewrite, vendor fonts, emit the embedded constant.

use anyhow::{Context, Result};
use iconfont_core::config::{BuildOptions, FileConfig};
use iconfont_core::embed::{self, EmbeddedStylesheet};
use iconfont_core::fetch::CurlFetcher;
use std::fs;
use std::path::Path;

use super::resolve_for_project;
use crate::cli::BuildArgs;

/// Defaults, then `iconfont.toml`, then command-line flags.
pub(crate) fn build_options(args: &BuildArgs) -> BuildOptions {
    let root = &args.project.root;
    let mut opts = BuildOptions::default();
    match FileConfig::load_from_root(root) {
        Ok(Some(cfg)) => cfg.apply_to(&mut opts),
        Ok(None) => {}
        Err(e) => tracing::warn!("ignoring config file: {}", e),
    }

    opts.url = args.url.clone();
    if args.no_fail_on_error {
        opts.fail_on_error = false;
    }
    if args.no_download_fonts {
        opts.download_fonts = false;
    }
    if let Some(dir) = &args.font_output_dir {
        opts.font_output_dir = dir.clone();
    }
    if let Some(prefix) = &args.font_public_path {
        opts.font_public_path = prefix.clone();
    }
    if let Some(secs) = args.timeout_secs {
        opts.fetch.timeout_secs = secs;
    }
    if let Some(secs) = args.connect_timeout_secs {
        opts.fetch.connect_timeout_secs = secs;
    }
    if let Some(n) = args.max_redirects {
        opts.fetch.max_redirects = n;
    }
    if opts.font_output_dir.is_relative() {
        opts.font_output_dir = root.join(&opts.font_output_dir);
    }
    opts
}

fn write_outputs(sheet: &EmbeddedStylesheet, args: &BuildArgs) -> Result<()> {
    let mut wrote_any = false;
    if let Some(path) = &args.css_out {
        write_file(path, &sheet.css)?;
        println!("  CSS:     {}", path.display());
        wrote_any = true;
    }
    if let Some(path) = &args.define_out {
        write_file(path, &sheet.define_json())?;
        println!("  Define:  {}", path.display());
        wrote_any = true;
    }
    if let Some(dir) = &args.module_dir {
        let path = sheet.write_module(dir)?;
        println!("  Module:  {}", path.display());
        wrote_any = true;
    }
    if !wrote_any {
        println!("{}", sheet.define_json());
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}

pub async fn run_build(args: BuildArgs) -> Result<()> {
    let opts = build_options(&args);
    let resolution = resolve_for_project(opts.url.as_deref(), &args.project.root);
    if resolution.is_miss() {
        println!("Warning: no iconfont URL configured. Configure one of:");
        println!("  1. iconfont build --url \"//at.alicdn.com/t/c_XXXXXX.css\"");
        println!("  2. the ICONFONT_URL environment variable");
        println!("  3. url = \"...\" in iconfont.toml");
        println!("  4. \"iconfont\": {{ \"url\": \"...\" }} in package.json");
    } else {
        println!("Downloading iconfont stylesheet");
        println!("  URL: {}", resolution.url);
    }

    let sheet = tokio::task::spawn_blocking(move || {
        let fetcher = CurlFetcher::new(opts.fetch);
        embed::run(&resolution, &opts, &fetcher)
    })
    .await
    .context("build task join")??;

    if let Some(report) = &sheet.fonts {
        println!(
            "Fonts: {} downloaded, {} failed",
            report.written.len(),
            report.failed.len()
        );
        for url in &report.failed {
            println!("  kept remote: {}", url);
        }
    }
    if sheet.source_url.is_some() {
        println!("Stylesheet ready: {:.2} KB", sheet.css.len() as f64 / 1024.0);
    }

    write_outputs(&sheet, &args)
}
