//! Ask command: upload a question and image, then show the answer.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;
use topiclens_core::client::{validate_submission, AnswerClient, ImageFile};
use topiclens_core::render::ResultView;
use topiclens_core::result::ResultStore;
use topiclens_core::Config;

use super::resolve_views;
use crate::output;
use crate::progress::UploadProgress;

/// Pause between storing the result and rendering it.
const NAVIGATE_DELAY: Duration = Duration::from_millis(500);

#[derive(Args)]
pub struct AskArgs {
    /// The question about the image
    pub question: String,

    /// Image file to ask about
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// Use the demo endpoint (no model call)
    #[arg(long)]
    pub demo: bool,

    /// Server base URL (defaults to the configured host and port)
    #[arg(long, env = "TOPICLENS_SERVER")]
    pub server: Option<String>,

    /// View to show: answer, visualization, key-points, insights or all
    #[arg(long)]
    pub view: Option<String>,
}

pub async fn execute(args: AskArgs, config: &Config, store: &ResultStore) -> Result<()> {
    let views = resolve_views(args.view.as_deref())?;
    let image = args.image.as_deref().map(ImageFile::from_path).transpose()?;

    validate_submission(&args.question, image.as_ref())?;

    let server = args
        .server
        .unwrap_or_else(|| format!("http://{}:{}", config.server.host, config.server.port));
    tracing::debug!(server = %server, demo = args.demo, "Using answer server");
    let client = AnswerClient::new(&server);

    let progress = UploadProgress::start(if args.demo { "Asking (demo)" } else { "Asking" });
    let outcome = client
        .ask(&args.question, image.as_ref(), args.demo, store)
        .await;
    progress.finish(outcome.is_ok());

    let stored = outcome?;

    println!("{} {}", "✓".green(), "Answer received".bold());
    tokio::time::sleep(NAVIGATE_DELAY).await;

    output::print_result(&ResultView::new(&stored), &views);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use topiclens_core::client::ClientError;

    #[tokio::test]
    async fn test_client_error_propagates() {
        let dir = std::env::temp_dir().join(format!("topiclens-ask-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let image = dir.join("photo.png");
        std::fs::write(&image, b"\x89PNG").unwrap();

        let args = AskArgs {
            question: "What is this?".into(),
            image: Some(image),
            demo: true,
            server: Some("http://127.0.0.1:1".into()),
            view: None,
        };
        let store = ResultStore::new(dir.join("data"));
        let err = execute(args, &Config::default(), &store).await.unwrap_err();

        assert!(matches!(err.downcast_ref::<ClientError>(), Some(ClientError::Network(_))));
        assert!(store.load().is_err());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_validation_happens_before_upload() {
        let args = AskArgs {
            question: "   ".into(),
            image: None,
            demo: true,
            server: Some("http://127.0.0.1:1".into()),
            view: None,
        };
        let store = ResultStore::new(std::env::temp_dir().join("topiclens-ask-unused"));
        let err = execute(args, &Config::default(), &store).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<ClientError>(), Some(ClientError::BlankQuestion)));
    }
}
