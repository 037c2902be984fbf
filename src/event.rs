use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Repository coordinates as the host API addresses them.
#[derive(Debug, Clone)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    #[serde(default)]
    pub merged: bool,
    #[serde(default)]
    pub title: String,
}

/// The workflow event the runner was triggered with, read once at startup
/// from `GITHUB_REPOSITORY` and the JSON payload at `GITHUB_EVENT_PATH`.
#[derive(Debug, Clone)]
pub struct EventContext {
    pub repository: Repository,
    pub pull_request: Option<PullRequest>,
}

#[derive(Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequest>,
}

impl EventContext {
    pub fn from_env() -> AppResult<Self> {
        let repository = env::var("GITHUB_REPOSITORY").map_err(|_| {
            AppError::Configuration("GITHUB_REPOSITORY is not set".to_string())
        })?;
        let event_path = env::var("GITHUB_EVENT_PATH").map_err(|_| {
            AppError::Configuration("GITHUB_EVENT_PATH is not set".to_string())
        })?;

        let repository = parse_repository(&repository)?;
        let pull_request = read_payload(Path::new(&event_path))?.pull_request;

        Ok(Self {
            repository,
            pull_request,
        })
    }

    /// The operations only make sense against a pull request; anything else
    /// is a misconfigured trigger.
    pub fn require_pull_request(&self) -> AppResult<&PullRequest> {
        self.pull_request.as_ref().ok_or_else(|| {
            AppError::Precondition("This action must run in a pull_request context.".to_string())
        })
    }
}

fn parse_repository(value: &str) -> AppResult<Repository> {
    let (owner, name) = value.split_once('/').ok_or_else(|| {
        AppError::Configuration(format!(
            "GITHUB_REPOSITORY must be owner/name, got '{value}'"
        ))
    })?;
    if owner.is_empty() || name.is_empty() {
        return Err(AppError::Configuration(format!(
            "GITHUB_REPOSITORY must be owner/name, got '{value}'"
        )));
    }
    Ok(Repository {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}

fn read_payload(path: &Path) -> AppResult<EventPayload> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|err| AppError::Configuration(format!("invalid event payload: {err}")))
}
