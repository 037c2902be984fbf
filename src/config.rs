use std::env;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Which of the two workflow operations this invocation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    SummarizeCommits,
    GenerateChangelog,
}

impl Mode {
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "summarize_commits" => Ok(Mode::SummarizeCommits),
            "generate_changelog" => Ok(Mode::GenerateChangelog),
            other => Err(AppError::InvalidMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: String,
    pub api_key: String,
    pub github_token: String,
    pub changelog_file: PathBuf,
    pub workspace_root: PathBuf,
}

impl AppConfig {
    /// Resolves each input from the CLI flag first, then the GitHub Actions
    /// `INPUT_*` environment variable the runner sets for `with:` inputs.
    pub fn resolve(
        mode: Option<String>,
        api_key: Option<String>,
        github_token: Option<String>,
        changelog_file: Option<String>,
    ) -> AppResult<Self> {
        let mode = required_input(mode, "mode", "INPUT_MODE")?;
        let api_key = required_input(api_key, "api-key", "INPUT_API_KEY")?;
        let github_token = required_input(github_token, "github-token", "INPUT_GITHUB_TOKEN")?;
        let changelog_file = changelog_file
            .or_else(|| env_input("INPUT_CHANGELOG_FILE"))
            .unwrap_or_else(|| "CHANGELOG.md".to_string());

        let workspace_root = env::var("GITHUB_WORKSPACE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Ok(Self {
            mode,
            api_key,
            github_token,
            changelog_file: PathBuf::from(changelog_file),
            workspace_root,
        })
    }
}

fn required_input(flag: Option<String>, name: &str, env_key: &str) -> AppResult<String> {
    flag.or_else(|| env_input(env_key))
        .ok_or_else(|| AppError::Configuration(format!("missing required input: {name}")))
}

fn env_input(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
