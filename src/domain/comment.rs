use crate::domain::commit::CommitSummary;

pub const SUMMARY_START: &str = "<!-- COMMIT_SUMMARIES_START -->";
pub const SUMMARY_END: &str = "<!-- COMMIT_SUMMARIES_END -->";

/// A PR/issue comment as returned by the host API.
#[derive(Debug, Clone)]
pub struct IssueComment {
    pub id: u64,
    pub body: String,
}

/// Renders the full comment body: heading, sentinel-delimited bullet block,
/// and attribution footer. The sentinels let a later run find and replace
/// the machine-managed region.
pub fn render_summary_comment(summaries: &[CommitSummary]) -> String {
    let bullets = summaries
        .iter()
        .map(CommitSummary::bullet_line)
        .collect::<Vec<_>>()
        .join("\n");

    [
        "### Commit Summaries",
        SUMMARY_START,
        &bullets,
        SUMMARY_END,
        "",
        "_Automatically updated by changelog-summarizer._",
    ]
    .join("\n")
}

/// Locates the aggregated comment by substring containment of the start
/// sentinel. Linear scan; at most one such comment exists per PR.
pub fn find_summary_comment(comments: &[IssueComment]) -> Option<&IssueComment> {
    comments
        .iter()
        .find(|comment| comment.body.contains(SUMMARY_START))
}

/// Extracts the text strictly between the two sentinels, trimmed. Returns
/// `None` when either sentinel is absent.
pub fn extract_summary_block(body: &str) -> Option<String> {
    let after_start = body.split_once(SUMMARY_START)?.1;
    let between = after_start.split_once(SUMMARY_END)?.0;
    Some(between.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summaries() -> Vec<CommitSummary> {
        vec![
            CommitSummary {
                sha: "a1".to_string(),
                text: "Fixes the parser bug.".to_string(),
            },
            CommitSummary {
                sha: "b2".to_string(),
                text: "Adds retry logging.".to_string(),
            },
        ]
    }

    #[test]
    fn rendered_body_wraps_bullets_in_sentinels() {
        let body = render_summary_comment(&summaries());
        assert!(body.starts_with("### Commit Summaries"));
        assert!(body.contains(SUMMARY_START));
        assert!(body.contains("- Fixes the parser bug. (Commit: a1)"));
        assert!(body.contains(SUMMARY_END));
        assert!(body.ends_with("_Automatically updated by changelog-summarizer._"));
    }

    #[test]
    fn extraction_round_trips_the_rendered_block() {
        let body = render_summary_comment(&summaries());
        let block = extract_summary_block(&body).unwrap();
        assert_eq!(
            block,
            "- Fixes the parser bug. (Commit: a1)\n- Adds retry logging. (Commit: b2)"
        );
    }

    #[test]
    fn finds_the_sentinel_comment_among_others() {
        let comments = vec![
            IssueComment {
                id: 1,
                body: "LGTM".to_string(),
            },
            IssueComment {
                id: 2,
                body: render_summary_comment(&summaries()),
            },
        ];
        assert_eq!(find_summary_comment(&comments).unwrap().id, 2);
    }

    #[test]
    fn no_sentinel_means_no_match() {
        let comments = vec![IssueComment {
            id: 1,
            body: "plain human comment".to_string(),
        }];
        assert!(find_summary_comment(&comments).is_none());
    }

    #[test]
    fn extraction_requires_both_sentinels() {
        assert!(extract_summary_block("no markers at all").is_none());
        let dangling = format!("{SUMMARY_START}\n- orphan line");
        assert!(extract_summary_block(&dangling).is_none());
    }
}
