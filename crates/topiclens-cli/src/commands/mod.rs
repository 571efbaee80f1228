//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use topiclens_core::render::View;
use topiclens_core::result::ResultStore;
use topiclens_core::Config;

pub mod ask;
pub mod serve;
pub mod show;

/// TopicLens - image questions answered and mapped to study units
#[derive(Parser)]
#[command(name = "topiclens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./topiclens.toml)
    #[arg(short, long, global = true, env = "TOPICLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the last stored result
    #[arg(long, global = true, env = "TOPICLENS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the generation server
    Serve(serve::ServeArgs),

    /// Ask a question about an image
    Ask(ask::AskArgs),

    /// Show the last stored result
    Show(show::ShowArgs),
}

impl Cli {
    /// Data directory: `--data-dir`, else the platform data dir.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    pub async fn execute(self) -> Result<()> {
        let config = Config::load(self.config.as_deref()).context("Failed to load configuration")?;
        let store = ResultStore::new(self.data_dir());

        match self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Ask(args) => ask::execute(args, &config, &store).await,
            Commands::Show(args) => show::execute(args, &store),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("topiclens"))
        .unwrap_or_else(|| PathBuf::from(".topiclens"))
}

/// Views selected by a `--view` value; absent or `all` selects every view.
pub fn resolve_views(arg: Option<&str>) -> Result<Vec<View>> {
    match arg.map(str::trim) {
        None => Ok(View::ALL.to_vec()),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(View::ALL.to_vec()),
        Some(s) => Ok(vec![s.parse::<View>()?]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_views() {
        assert_eq!(resolve_views(None).unwrap(), View::ALL.to_vec());
        assert_eq!(resolve_views(Some("ALL")).unwrap(), View::ALL.to_vec());
        assert_eq!(resolve_views(Some("key-points")).unwrap(), vec![View::KeyPoints]);
        assert!(resolve_views(Some("summary")).is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "topiclens",
            "--data-dir",
            "/tmp/tl",
            "ask",
            "What is this?",
            "--image",
            "photo.png",
            "--demo",
        ])
        .unwrap();
        assert_eq!(cli.data_dir(), PathBuf::from("/tmp/tl"));
        match cli.command {
            Commands::Ask(args) => {
                assert_eq!(args.question, "What is this?");
                assert!(args.demo);
            }
            _ => panic!("expected ask"),
        }
    }
}
