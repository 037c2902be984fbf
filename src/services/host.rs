use async_trait::async_trait;

use crate::domain::comment::IssueComment;
use crate::domain::commit::Commit;
use crate::error::AppResult;
use crate::event::Repository;

/// Source-control host API surface the workflows consume.
#[async_trait]
pub trait HostService: Send + Sync {
    async fn list_pull_request_commits(
        &self,
        repo: &Repository,
        pr_number: u64,
    ) -> AppResult<Vec<Commit>>;

    async fn list_issue_comments(
        &self,
        repo: &Repository,
        pr_number: u64,
    ) -> AppResult<Vec<IssueComment>>;

    async fn create_comment(&self, repo: &Repository, pr_number: u64, body: &str)
    -> AppResult<()>;

    async fn update_comment(&self, repo: &Repository, comment_id: u64, body: &str)
    -> AppResult<()>;

    /// Decoded file content from the default branch, or `None` when the host
    /// reports the path as not found. Other failures propagate.
    async fn get_file_content(&self, repo: &Repository, path: &str)
    -> AppResult<Option<String>>;
}
