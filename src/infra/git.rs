use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

const BOT_NAME: &str = "github-actions[bot]";
const BOT_EMAIL: &str = "github-actions[bot]@users.noreply.github.com";

pub struct GitCli {
    workspace_root: PathBuf,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }

    async fn run(&self, args: &[&str]) -> AppResult<()> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.workspace_root)
            .args(args)
            .output()
            .await
            .map_err(|err| AppError::VersionControl(format!("failed to run git: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::VersionControl(format!(
                "git {} failed: {}",
                args.first().copied().unwrap_or(""),
                stderr.trim()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn commit_and_push(&self, path: &Path, message: &str) -> AppResult<()> {
        let path = path.to_str().ok_or_else(|| {
            AppError::VersionControl(format!("non-UTF-8 path: {}", path.display()))
        })?;

        self.run(&["add", path]).await?;
        self.run(&[
            "-c",
            &format!("user.name={BOT_NAME}"),
            "-c",
            &format!("user.email={BOT_EMAIL}"),
            "commit",
            "-m",
            message,
        ])
        .await?;
        self.run(&["push"]).await?;
        Ok(())
    }
}
