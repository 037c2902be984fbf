/// A commit as listed on the pull request.
#[derive(Debug, Clone)]
pub struct Commit {
    pub sha: String,
    pub message: String,
}

impl Commit {
    /// Only the subject line is summarized; the body is ignored.
    pub fn first_line(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

/// One model-produced summary, paired with the commit it describes.
#[derive(Debug, Clone)]
pub struct CommitSummary {
    pub sha: String,
    pub text: String,
}

impl CommitSummary {
    pub fn bullet_line(&self) -> String {
        format!("- {} (Commit: {})", self.text, self.sha)
    }
}
