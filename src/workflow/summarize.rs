use std::sync::Arc;

use futures::future::try_join_all;
use tracing::info;

use crate::context::AppContext;
use crate::domain::comment::{find_summary_comment, render_summary_comment};
use crate::domain::commit::CommitSummary;
use crate::error::{AppError, AppResult};

const COMMIT_SUMMARY_TOKENS: u32 = 50;

/// Summarizes every commit on the PR and upserts the aggregated comment.
pub async fn run(ctx: &AppContext) -> AppResult<()> {
    let pr = ctx.event.require_pull_request()?;
    let repo = &ctx.event.repository;

    info!(pr = pr.number, "fetching commits");
    let commits = ctx.host.list_pull_request_commits(repo, pr.number).await?;

    // Fan out one request per commit; the join is all-or-nothing and the
    // result order matches the commit order.
    info!(count = commits.len(), "summarizing commits");
    let requests = commits.into_iter().map(|commit| {
        let model = Arc::clone(&ctx.language_model);
        async move {
            let prompt = format!(
                "Summarize this commit message in one sentence: \"{}\"",
                commit.first_line()
            );
            let text = model.complete(&prompt, COMMIT_SUMMARY_TOKENS).await?;
            Ok::<_, AppError>(CommitSummary {
                sha: commit.sha,
                text,
            })
        }
    });
    let summaries = try_join_all(requests).await?;

    let body = render_summary_comment(&summaries);

    info!(pr = pr.number, "updating PR comment");
    let comments = ctx.host.list_issue_comments(repo, pr.number).await?;
    match find_summary_comment(&comments) {
        Some(existing) => ctx.host.update_comment(repo, existing.id, &body).await?,
        None => ctx.host.create_comment(repo, pr.number, &body).await?,
    }

    info!("commit summaries posted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::comment::{SUMMARY_END, SUMMARY_START};
    use crate::domain::commit::Commit;
    use crate::event::PullRequest;
    use crate::workflow::testing::{MockHost, MockModel, MockVcs, test_context};

    fn pull_request() -> PullRequest {
        PullRequest {
            number: 5,
            merged: false,
            title: "Title".to_string(),
        }
    }

    fn commit(sha: &str, message: &str) -> Commit {
        Commit {
            sha: sha.to_string(),
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn summarizes_first_line_and_posts_sentinel_comment() {
        let workspace = tempfile::tempdir().unwrap();
        let host = Arc::new(MockHost::with_commits(vec![commit(
            "a1",
            "Fix bug\n\nlonger body",
        )]));
        let model = Arc::new(MockModel::replying("Fixes a bug."));
        let ctx = test_context(
            workspace.path(),
            Some(pull_request()),
            Arc::clone(&host),
            Arc::clone(&model),
            Arc::new(MockVcs::default()),
        );

        run(&ctx).await.unwrap();

        let prompts = model.prompts.lock().unwrap().clone();
        assert_eq!(
            prompts,
            vec!["Summarize this commit message in one sentence: \"Fix bug\"".to_string()]
        );

        let comments = host.comments.lock().unwrap().clone();
        assert_eq!(comments.len(), 1);
        let body = &comments[0].body;
        assert!(body.contains(SUMMARY_START));
        assert!(body.contains("- Fixes a bug. (Commit: a1)"));
        assert!(body.contains(SUMMARY_END));
    }

    #[tokio::test]
    async fn second_run_updates_instead_of_duplicating() {
        let workspace = tempfile::tempdir().unwrap();
        let host = Arc::new(MockHost::with_commits(vec![
            commit("a1", "Fix bug"),
            commit("b2", "Add feature"),
        ]));
        let model = Arc::new(MockModel::replying("A change."));
        let ctx = test_context(
            workspace.path(),
            Some(pull_request()),
            Arc::clone(&host),
            model,
            Arc::new(MockVcs::default()),
        );

        run(&ctx).await.unwrap();
        run(&ctx).await.unwrap();

        let comments = host.comments.lock().unwrap().clone();
        assert_eq!(comments.len(), 1);

        let calls = host.call_log();
        assert_eq!(calls.iter().filter(|c| *c == "create_comment").count(), 1);
        assert_eq!(calls.iter().filter(|c| *c == "update_comment").count(), 1);
    }

    #[tokio::test]
    async fn bullet_order_matches_commit_order() {
        let workspace = tempfile::tempdir().unwrap();
        let host = Arc::new(MockHost::with_commits(vec![
            commit("a1", "First"),
            commit("b2", "Second"),
            commit("c3", "Third"),
        ]));
        let model = Arc::new(MockModel::replying("Summary."));
        let ctx = test_context(
            workspace.path(),
            Some(pull_request()),
            Arc::clone(&host),
            model,
            Arc::new(MockVcs::default()),
        );

        run(&ctx).await.unwrap();

        let comments = host.comments.lock().unwrap().clone();
        let body = &comments[0].body;
        let a1 = body.find("(Commit: a1)").unwrap();
        let b2 = body.find("(Commit: b2)").unwrap();
        let c3 = body.find("(Commit: c3)").unwrap();
        assert!(a1 < b2 && b2 < c3);
    }

    #[tokio::test]
    async fn single_model_failure_aborts_the_batch_without_posting() {
        let workspace = tempfile::tempdir().unwrap();
        let host = Arc::new(MockHost::with_commits(vec![
            commit("a1", "Fix bug"),
            commit("b2", "Add feature"),
        ]));
        let model = Arc::new(MockModel::failing_on_call("A change.", 2));
        let ctx = test_context(
            workspace.path(),
            Some(pull_request()),
            Arc::clone(&host),
            model,
            Arc::new(MockVcs::default()),
        );

        let error = run(&ctx).await.unwrap_err();
        assert!(error.to_string().contains("model unavailable"));

        // The join is all-or-nothing: no comment is posted or touched.
        assert!(host.comments.lock().unwrap().is_empty());
        assert_eq!(host.call_log(), vec!["list_commits".to_string()]);
    }

    #[tokio::test]
    async fn missing_pull_request_fails_before_any_host_call() {
        let workspace = tempfile::tempdir().unwrap();
        let host = Arc::new(MockHost::default());
        let ctx = test_context(
            workspace.path(),
            None,
            Arc::clone(&host),
            Arc::new(MockModel::default()),
            Arc::new(MockVcs::default()),
        );

        let error = run(&ctx).await.unwrap_err();
        assert_eq!(
            error.to_string(),
            "This action must run in a pull_request context."
        );
        assert!(host.call_log().is_empty());
    }
}
