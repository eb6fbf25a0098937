//! `iconfont inject <html>` – run the style injector over an HTML page.

use anyhow::{Context, Result};
use iconfont_core::inject::{EmbeddedCss, HtmlDocument, InjectOutcome, InjectorOptions, StyleInjector};
use std::fs;

use super::resolve_for_project;
use crate::cli::InjectArgs;

pub fn run_inject(args: &InjectArgs) -> Result<()> {
    let html = fs::read_to_string(&args.html)
        .with_context(|| format!("read {}", args.html.display()))?;

    let embedded = match &args.css_file {
        Some(path) => EmbeddedCss::new(
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?,
        ),
        None => EmbeddedCss::guarded(None),
    };

    let url = resolve_for_project(args.url.as_deref(), &args.project.root).url;
    let mut injector = StyleInjector::new(
        InjectorOptions {
            url,
            mode: args.mode,
            force_online: args.force_online,
            force_local: args.force_local,
        },
        embedded,
    );

    let mut doc = HtmlDocument::new(html);
    let outcome = injector.install(&mut doc);
    match &outcome {
        InjectOutcome::LinkedLive { href } => println!("Linked live stylesheet {}", href),
        InjectOutcome::EmbeddedLocal => println!("Embedded local stylesheet"),
        InjectOutcome::AlreadyLinked | InjectOutcome::AlreadyEmbedded => {
            println!("Stylesheet already present; nothing to do")
        }
        InjectOutcome::NothingToEmbed => println!("Embedded stylesheet is empty; nothing inserted"),
        InjectOutcome::Skipped => println!("No iconfont URL provided; nothing inserted"),
    }

    let modified = matches!(
        outcome,
        InjectOutcome::LinkedLive { .. } | InjectOutcome::EmbeddedLocal
    );
    let out = args.out.as_ref().unwrap_or(&args.html);
    if modified || args.out.is_some() {
        fs::write(out, doc.as_str()).with_context(|| format!("write {}", out.display()))?;
    }
    Ok(())
}
