use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
};
use serde::{Deserialize, Serialize};

use crate::domain::comment::IssueComment;
use crate::domain::commit::Commit;
use crate::error::{AppError, AppResult};
use crate::event::Repository;
use crate::services::HostService;

const DEFAULT_API_BASE: &str = "https://api.github.com";
const ACCEPT_JSON: &str = "application/vnd.github+json";

pub struct GitHubClient {
    http: Client,
    token: String,
    api_base: String,
}

impl GitHubClient {
    pub fn new(token: String) -> Self {
        Self::with_api_base(token, DEFAULT_API_BASE.to_string())
    }

    pub fn with_api_base(token: String, api_base: String) -> Self {
        Self {
            http: Client::new(),
            token,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    /// The changelog path lands in the URL, so its segments need
    /// percent-encoding (spaces, `#`).
    fn contents_url(&self, repo: &Repository, path: &str) -> AppResult<String> {
        let mut url = reqwest::Url::parse(&self.api_base)
            .map_err(|err| AppError::Host(format!("invalid API base URL: {err}")))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Host("API base URL cannot carry paths".to_string()))?
            .pop_if_empty()
            .extend(["repos", repo.owner.as_str(), repo.name.as_str(), "contents"])
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url.to_string())
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, ACCEPT_JSON)
            .header(USER_AGENT, "changelog-summarizer")
    }

    async fn check_status(response: reqwest::Response) -> AppResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Host(format!(
                "GitHub responded with {status}: {body}"
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl HostService for GitHubClient {
    async fn list_pull_request_commits(
        &self,
        repo: &Repository,
        pr_number: u64,
    ) -> AppResult<Vec<Commit>> {
        let url = self.url(&format!(
            "/repos/{}/{}/pulls/{pr_number}/commits",
            repo.owner, repo.name
        ));
        let response = self
            .request(self.http.get(url))
            .send()
            .await
            .map_err(|err| AppError::Host(format!("failed to call GitHub: {err}")))?;
        let response = Self::check_status(response).await?;

        let payload: Vec<PullCommitPayload> = response.json().await.map_err(|err| {
            AppError::Host(format!("failed to parse commit list: {err}"))
        })?;

        Ok(payload
            .into_iter()
            .map(|commit| Commit {
                sha: commit.sha,
                message: commit.commit.message,
            })
            .collect())
    }

    async fn list_issue_comments(
        &self,
        repo: &Repository,
        pr_number: u64,
    ) -> AppResult<Vec<IssueComment>> {
        let url = self.url(&format!(
            "/repos/{}/{}/issues/{pr_number}/comments",
            repo.owner, repo.name
        ));
        let response = self
            .request(self.http.get(url))
            .send()
            .await
            .map_err(|err| AppError::Host(format!("failed to call GitHub: {err}")))?;
        let response = Self::check_status(response).await?;

        let payload: Vec<IssueCommentPayload> = response.json().await.map_err(|err| {
            AppError::Host(format!("failed to parse comment list: {err}"))
        })?;

        Ok(payload
            .into_iter()
            .map(|comment| IssueComment {
                id: comment.id,
                body: comment.body.unwrap_or_default(),
            })
            .collect())
    }

    async fn create_comment(
        &self,
        repo: &Repository,
        pr_number: u64,
        body: &str,
    ) -> AppResult<()> {
        let url = self.url(&format!(
            "/repos/{}/{}/issues/{pr_number}/comments",
            repo.owner, repo.name
        ));
        let response = self
            .request(self.http.post(url))
            .json(&CommentBody { body })
            .send()
            .await
            .map_err(|err| AppError::Host(format!("failed to call GitHub: {err}")))?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn update_comment(
        &self,
        repo: &Repository,
        comment_id: u64,
        body: &str,
    ) -> AppResult<()> {
        let url = self.url(&format!(
            "/repos/{}/{}/issues/comments/{comment_id}",
            repo.owner, repo.name
        ));
        let response = self
            .request(self.http.patch(url))
            .json(&CommentBody { body })
            .send()
            .await
            .map_err(|err| AppError::Host(format!("failed to call GitHub: {err}")))?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn get_file_content(
        &self,
        repo: &Repository,
        path: &str,
    ) -> AppResult<Option<String>> {
        let url = self.contents_url(repo, path)?;
        let response = self
            .request(self.http.get(url))
            .send()
            .await
            .map_err(|err| AppError::Host(format!("failed to call GitHub: {err}")))?;

        // A missing changelog is expected on first run.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check_status(response).await?;

        let payload: ContentsPayload = response.json().await.map_err(|err| {
            AppError::Host(format!("failed to parse file content: {err}"))
        })?;

        Ok(Some(decode_contents(&payload.content)?))
    }
}

/// The contents API wraps base64 across multiple lines.
fn decode_contents(encoded: &str) -> AppResult<String> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let bytes = BASE64_STANDARD
        .decode(compact)
        .map_err(|err| AppError::Host(format!("invalid base64 file content: {err}")))?;
    String::from_utf8(bytes)
        .map_err(|err| AppError::Host(format!("file content is not UTF-8: {err}")))
}

#[derive(Deserialize)]
struct PullCommitPayload {
    sha: String,
    commit: CommitDetail,
}

#[derive(Deserialize)]
struct CommitDetail {
    message: String,
}

#[derive(Deserialize)]
struct IssueCommentPayload {
    id: u64,
    body: Option<String>,
}

#[derive(Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

#[derive(Deserialize)]
struct ContentsPayload {
    content: String,
}
