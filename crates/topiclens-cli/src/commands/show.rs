//! Show command: render the last stored result.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use topiclens_core::render::html::render_html;
use topiclens_core::render::ResultView;
use topiclens_core::result::ResultStore;
use topiclens_core::TopicLensError;

use super::resolve_views;
use crate::output;

#[derive(Args)]
pub struct ShowArgs {
    /// View to show: answer, visualization, key-points, insights or all
    #[arg(long)]
    pub view: Option<String>,

    /// Write all views to a standalone HTML page instead
    #[arg(long)]
    pub html: Option<PathBuf>,
}

pub fn execute(args: ShowArgs, store: &ResultStore) -> Result<()> {
    let stored = match store.load() {
        Ok(stored) => stored,
        Err(TopicLensError::ResultNotFound(_)) => {
            println!(
                "{}",
                "No result stored yet. Run `topiclens ask` first.".dimmed()
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let view = ResultView::new(&stored);

    if let Some(path) = args.html {
        let html = render_html(&view)?;
        std::fs::write(&path, html)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{} Wrote {}", "✓".green(), path.display());
        return Ok(());
    }

    let views = resolve_views(args.view.as_deref())?;
    output::print_result(&view, &views);
    Ok(())
}
