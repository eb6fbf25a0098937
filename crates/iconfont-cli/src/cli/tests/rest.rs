//! Tests for resolve, inject and fonts.

use super::parse;
use crate::cli::commands::{font_listing, run_inject};
use crate::cli::CliCommand;
use clap::Parser;
use iconfont_core::inject::Mode;
use std::fs;
use std::path::PathBuf;

#[test]
fn cli_parse_resolve() {
    match parse(&["iconfont", "resolve", "--url", "https://x.com/a.css"]) {
        CliCommand::Resolve { url, project } => {
            assert_eq!(url.as_deref(), Some("https://x.com/a.css"));
            assert_eq!(project.root, PathBuf::from("."));
        }
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_parse_inject_defaults_to_production() {
    match parse(&["iconfont", "inject", "dist/index.html"]) {
        CliCommand::Inject(a) => {
            assert_eq!(a.html, PathBuf::from("dist/index.html"));
            assert_eq!(a.mode, Mode::Production);
            assert!(!a.force_online);
            assert!(!a.force_local);
            assert!(a.out.is_none());
        }
        _ => panic!("expected Inject"),
    }
}

#[test]
fn cli_parse_inject_mode() {
    match parse(&["iconfont", "inject", "index.html", "--mode", "development", "--force-local"]) {
        CliCommand::Inject(a) => {
            assert_eq!(a.mode, Mode::Development);
            assert!(a.force_local);
        }
        _ => panic!("expected Inject"),
    }
}

#[test]
fn cli_parse_inject_rejects_unknown_mode() {
    assert!(crate::cli::Cli::try_parse_from(["iconfont", "inject", "i.html", "--mode", "staging"]).is_err());
}

#[test]
fn cli_parse_fonts() {
    match parse(&["iconfont", "fonts", "icons.css"]) {
        CliCommand::Fonts { css, public_path } => {
            assert_eq!(css, PathBuf::from("icons.css"));
            assert_eq!(public_path, "/fonts/");
        }
        _ => panic!("expected Fonts"),
    }
}

#[test]
fn font_listing_adds_missing_slash_to_prefix() {
    let css = "@font-face{src:url('https://cdn.example.com/i.woff2') format('woff2')}";
    let listing = font_listing(css, "/static");
    let name = iconfont_core::url_model::font_filename("https://cdn.example.com/i.woff2");
    assert_eq!(
        listing,
        vec![(format!("/static/{}", name), "https://cdn.example.com/i.woff2".to_string())]
    );
    assert_eq!(font_listing(css, "/static/"), listing);
}

#[test]
fn inject_command_embeds_once() {
    let dir = tempfile::tempdir().unwrap();
    let html = dir.path().join("index.html");
    let css = dir.path().join("iconfont.css");
    fs::write(&html, "<html><head><title>x</title></head><body></body></html>").unwrap();
    fs::write(&css, ".icon-home:before{content:\"\\e600\"}").unwrap();

    let root = dir.path().to_str().unwrap();
    let html_arg = html.to_str().unwrap();
    let css_arg = css.to_str().unwrap();
    let args = [
        "iconfont", "inject", html_arg, "--root", root, "--url", "//at.alicdn.com/t/c_1.css",
        "--css-file", css_arg,
    ];
    for _ in 0..2 {
        match parse(&args) {
            CliCommand::Inject(a) => run_inject(&a).unwrap(),
            _ => panic!("expected Inject"),
        }
    }

    let out = fs::read_to_string(&html).unwrap();
    assert_eq!(out.matches("data-iconfont-local").count(), 1);
    assert!(out.contains(".icon-home:before"));
    assert!(out.find("data-iconfont-local").unwrap() < out.find("</head>").unwrap());
}
