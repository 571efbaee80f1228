//! Generation server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use topiclens_core::Config;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (defaults to <data-dir>/serve.log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, mut config: Config) -> Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let base = format!("http://{}:{}", config.server.host, config.server.port);

    println!();
    println!("  {} {}", "TopicLens".cyan().bold(), "Server".bold());
    println!();
    println!("  {}       {}/api/generate", "Live".green(), base);
    println!("  {}       {}/api/generate-demo", "Demo".green(), base);
    println!("  {}     {}/health", "Health".green(), base);
    println!("  {}      {}", "Model".green(), config.model.name);
    if config.api_key().is_none() {
        println!();
        println!(
            "  {}",
            "GEMINI_API_KEY not set: only the demo endpoint will answer".yellow()
        );
    }
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    topiclens_web::run_server(config).await?;

    Ok(())
}
