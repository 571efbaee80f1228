//! TopicLens CLI
//!
//! Ask a question about an image, then study the answer by topic and unit.

use anyhow::Result;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;
mod progress;

use commands::{Cli, Commands};

const DEFAULT_FILTER: &str = "topiclens=info,topiclens_web=debug,topiclens_core=info";

/// Initialize tracing with optional file logging.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process.
fn init_tracing(log_file: Option<&std::path::Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    if let Some(path) = log_file {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => std::path::PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;
        let file_name = path
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("invalid log file path: {}", path.display()))?;

        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(&dir, file_name));

        // Log to both stdout and file when --log is used
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false),
            )
            .init();
        Ok(Some(guard))
    } else {
        // Keep stdout for rendered results
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
        Ok(None)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = match &cli.command {
        Commands::Serve(args) if args.log => Some(
            args.log_file
                .clone()
                .unwrap_or_else(|| cli.data_dir().join("serve.log")),
        ),
        _ => None,
    };

    let _guard = init_tracing(log_file.as_deref())?;

    cli.execute().await
}
