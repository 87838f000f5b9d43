//! CLI for the imgex image localizer.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use imgex_core::config::{self, ExtractorConfig};

use commands::{run_html, run_name, run_payload, run_site};

/// Top-level CLI for imgex.
#[derive(Debug, Parser)]
#[command(name = "imgex")]
#[command(about = "imgex: download remote CMS images into a generated site", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/imgex/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log to ~/.local/state/imgex/imgex.log instead of stderr.
    #[arg(long, global = true)]
    pub log_file: bool,

    /// Generated site root (overrides `output_dir`).
    #[arg(long, global = true, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Public asset path, e.g. /assets (overrides `path`).
    #[arg(long, global = true, value_name = "PATH")]
    pub path: Option<String>,

    /// Router base used in payload links (overrides `router_base`).
    #[arg(long, global = true, value_name = "BASE")]
    pub router_base: Option<String>,

    /// Fetch every occurrence again instead of reusing earlier downloads.
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Exit non-zero if any image could not be downloaded.
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Localize every page and payload of a generated site.
    Site {
        /// Site root (defaults to `output_dir` from config).
        dir: Option<PathBuf>,
    },

    /// Localize images in one HTML file, in place.
    Html {
        /// Path to the HTML file.
        file: PathBuf,

        /// Route reported in logs (defaults to the file path).
        #[arg(long, value_name = "ROUTE")]
        route: Option<String>,
    },

    /// Localize images in one payload file, in place.
    Payload {
        /// Path to the payload file.
        file: PathBuf,
    },

    /// Print the local file name an image URL maps to.
    Name {
        /// Absolute image URL.
        url: String,
    },
}

impl Cli {
    /// Loads the config file and applies flag overrides.
    pub fn load_config(&self) -> Result<ExtractorConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        self.apply_overrides(&mut cfg);
        tracing::debug!("loaded config: {:?}", cfg);
        Ok(cfg)
    }

    fn apply_overrides(&self, cfg: &mut ExtractorConfig) {
        if let Some(dir) = &self.out_dir {
            cfg.output_dir = dir.clone();
        }
        if let Some(path) = &self.path {
            cfg.path = path.clone();
        }
        if let Some(base) = &self.router_base {
            cfg.router_base = base.clone();
        }
        if self.no_cache {
            cfg.reuse_downloads = false;
        }
        if let CliCommand::Site { dir: Some(dir) } = &self.command {
            cfg.output_dir = dir.clone();
        }
    }

    pub async fn run(&self) -> Result<()> {
        let cfg = self.load_config()?;

        let failures = match &self.command {
            CliCommand::Site { .. } => run_site(cfg).await?,
            CliCommand::Html { file, route } => run_html(cfg, file, route.as_deref()).await?,
            CliCommand::Payload { file } => run_payload(cfg, file).await?,
            CliCommand::Name { url } => {
                run_name(cfg, url)?;
                0
            }
        };

        if self.strict && failures > 0 {
            anyhow::bail!("{} image(s) could not be downloaded", failures);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
