use std::path::Path;

use async_trait::async_trait;

use crate::error::AppResult;

#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Stage the given path, commit with the message, and push to the
    /// current branch.
    async fn commit_and_push(&self, path: &Path, message: &str) -> AppResult<()>;
}
