mod config;
mod context;
mod domain;
mod error;
mod event;
mod infra;
mod services;
mod workflow;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, Mode};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::event::EventContext;
use crate::infra::git::GitCli;
use crate::infra::github::GitHubClient;
use crate::infra::openai::OpenAiClient;

#[derive(Parser)]
#[command(
    name = "changelog-summarizer",
    author,
    version,
    about = "Summarizes PR commits and rolls them up into a changelog"
)]
struct Cli {
    /// Operation to perform: summarize_commits or generate_changelog.
    #[arg(long)]
    mode: Option<String>,
    /// Language model API key.
    #[arg(long)]
    api_key: Option<String>,
    /// Source-control host token.
    #[arg(long)]
    github_token: Option<String>,
    /// Changelog path relative to the repository root.
    #[arg(long)]
    changelog_file: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let config = AppConfig::resolve(cli.mode, cli.api_key, cli.github_token, cli.changelog_file)?;
    // Reject a bad mode before touching the event payload or any service.
    let mode = Mode::parse(&config.mode)?;
    let event = EventContext::from_env()?;

    let host = Arc::new(GitHubClient::new(config.github_token.clone()));
    let language_model = Arc::new(OpenAiClient::new(config.api_key.clone()));
    let version_control = Arc::new(GitCli::new(config.workspace_root.clone()));

    let ctx = AppContext::new(config, event, host, language_model, version_control);

    match mode {
        Mode::SummarizeCommits => workflow::summarize::run(&ctx).await,
        Mode::GenerateChangelog => workflow::changelog::run(&ctx).await,
    }
}
