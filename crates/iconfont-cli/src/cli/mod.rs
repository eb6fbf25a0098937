//! CLI for vendoring icon-font stylesheets.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use iconfont_core::inject::Mode;
use std::path::PathBuf;

use commands::{run_build, run_fonts, run_inject, run_resolve};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "iconfont")]
#[command(about = "Fetch an icon-font stylesheet and vendor it into a front-end build", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Project whose `iconfont.toml` / `package.json` are consulted.
#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
    /// Project root directory.
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub root: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct BuildArgs {
    /// Stylesheet URL (overrides ICONFONT_URL, iconfont.toml and package.json).
    #[arg(long)]
    pub url: Option<String>,

    #[command(flatten)]
    pub project: ProjectArgs,

    /// Embed an empty stylesheet instead of failing when the download fails.
    #[arg(long)]
    pub no_fail_on_error: bool,

    /// Keep font references pointed at the remote host.
    #[arg(long)]
    pub no_download_fonts: bool,

    /// Directory font files are written to (relative to the project root).
    #[arg(long, value_name = "DIR")]
    pub font_output_dir: Option<PathBuf>,

    /// Path prefix the stylesheet uses for written fonts.
    #[arg(long, value_name = "PREFIX")]
    pub font_public_path: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Connect-phase timeout in seconds.
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub connect_timeout_secs: Option<u64>,

    /// Maximum redirects followed per request.
    #[arg(long, value_name = "N")]
    pub max_redirects: Option<u32>,

    /// Write the final stylesheet to this file.
    #[arg(long, value_name = "FILE")]
    pub css_out: Option<PathBuf>,

    /// Write the `{"__ICONFONT_CSS__": ...}` define map to this file.
    #[arg(long, value_name = "FILE")]
    pub define_out: Option<PathBuf>,

    /// Write `iconfont_css.rs` (declaring `ICONFONT_CSS`) into this directory.
    #[arg(long, value_name = "DIR")]
    pub module_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct InjectArgs {
    /// HTML file to inject into.
    pub html: PathBuf,

    /// Live stylesheet URL; resolved from the project when omitted.
    #[arg(long)]
    pub url: Option<String>,

    #[command(flatten)]
    pub project: ProjectArgs,

    /// Build mode: development links the live URL, production embeds.
    #[arg(long, default_value = "production")]
    pub mode: Mode,

    /// Always link the live URL.
    #[arg(long)]
    pub force_online: bool,

    /// Always embed the local stylesheet.
    #[arg(long)]
    pub force_local: bool,

    /// Stylesheet to embed (e.g. the `--css-out` of `iconfont build`).
    #[arg(long, value_name = "FILE")]
    pub css_file: Option<PathBuf>,

    /// Output file; defaults to rewriting the input in place.
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the resolved stylesheet URL and where it came from.
    Resolve {
        /// Explicit URL; highest precedence.
        #[arg(long)]
        url: Option<String>,

        #[command(flatten)]
        project: ProjectArgs,
    },

    /// Download the stylesheet and its fonts and emit the embedded constant.
    Build(BuildArgs),

    /// Insert the stylesheet link or embedded style into an HTML page.
    Inject(InjectArgs),

    /// List the font references of a stylesheet and their local filenames.
    Fonts {
        /// Stylesheet file.
        css: PathBuf,

        /// Path prefix shown for each local file.
        #[arg(long, default_value = "/fonts/", value_name = "PREFIX")]
        public_path: String,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        tracing::debug!("parsed command: {:?}", cli.command);

        match cli.command {
            CliCommand::Resolve { url, project } => run_resolve(url.as_deref(), &project.root)?,
            CliCommand::Build(args) => run_build(args).await?,
            CliCommand::Inject(args) => run_inject(&args)?,
            CliCommand::Fonts { css, public_path } => run_fonts(&css, &public_path)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
