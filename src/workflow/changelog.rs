use chrono::Utc;
use tracing::info;

use crate::context::AppContext;
use crate::domain::changelog::ChangelogEntry;
use crate::domain::comment::{extract_summary_block, find_summary_comment};
use crate::error::{AppError, AppResult};

const CHANGELOG_SUMMARY_TOKENS: u32 = 100;

/// Rolls the PR's commit summaries up into a dated changelog entry and
/// commits the updated file back to the repository.
pub async fn run(ctx: &AppContext) -> AppResult<()> {
    let pr = ctx.event.require_pull_request()?;
    if !pr.merged {
        info!(pr = pr.number, "pull request is not merged; skipping changelog");
        return Ok(());
    }
    let repo = &ctx.event.repository;

    info!(pr = pr.number, "locating commit summary comment");
    let comments = ctx.host.list_issue_comments(repo, pr.number).await?;
    let comment = find_summary_comment(&comments).ok_or_else(|| {
        AppError::Precondition(format!(
            "no commit summary comment found on PR #{}; run summarize_commits first",
            pr.number
        ))
    })?;
    let block = extract_summary_block(&comment.body).ok_or_else(|| {
        AppError::Precondition(format!(
            "commit summary comment on PR #{} is missing its end marker",
            pr.number
        ))
    })?;

    info!("requesting overall summary");
    let prompt = format!(
        "Write a short bullet-point summary of the following changes for a changelog:\n{block}"
    );
    let summary = ctx
        .language_model
        .complete(&prompt, CHANGELOG_SUMMARY_TOKENS)
        .await?;

    let entry = ChangelogEntry {
        date: Utc::now().date_naive(),
        pr_number: pr.number,
        pr_title: pr.title.clone(),
        body: summary,
    };

    let changelog_path = ctx.config.changelog_file.to_str().ok_or_else(|| {
        AppError::Configuration(format!(
            "changelog path is not UTF-8: {}",
            ctx.config.changelog_file.display()
        ))
    })?;

    info!(path = changelog_path, "reading current changelog");
    let existing = ctx
        .host
        .get_file_content(repo, changelog_path)
        .await?
        .unwrap_or_default();

    let combined = entry.prepend_to(&existing);
    let full_path = ctx.config.workspace_root.join(&ctx.config.changelog_file);
    tokio::fs::write(&full_path, combined).await?;

    let message = format!("Update changelog for PR #{}", pr.number);
    info!(path = changelog_path, "committing changelog");
    ctx.version_control
        .commit_and_push(&ctx.config.changelog_file, &message)
        .await?;

    info!("changelog updated");
    Ok(())
}
