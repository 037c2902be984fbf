use chrono::NaiveDate;

/// One dated changelog section, prepended so the file stays
/// most-recent-first.
#[derive(Debug, Clone)]
pub struct ChangelogEntry {
    pub date: NaiveDate,
    pub pr_number: u64,
    pub pr_title: String,
    pub body: String,
}

impl ChangelogEntry {
    pub fn render(&self) -> String {
        format!(
            "## [{}] PR #{}: {}\n\n{}\n\n",
            self.date.format("%Y-%m-%d"),
            self.pr_number,
            self.pr_title,
            self.body.trim()
        )
    }

    /// New entry first, prior content untouched after it.
    pub fn prepend_to(&self, existing: &str) -> String {
        format!("{}{}", self.render(), existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> ChangelogEntry {
        ChangelogEntry {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            pr_number: 5,
            pr_title: "Title".to_string(),
            body: "Summary".to_string(),
        }
    }

    #[test]
    fn renders_dated_header() {
        assert_eq!(entry().render(), "## [2024-01-01] PR #5: Title\n\nSummary\n\n");
    }

    #[test]
    fn prepends_without_losing_prior_content() {
        let combined = entry().prepend_to("## old entry\n");
        assert_eq!(
            combined,
            "## [2024-01-01] PR #5: Title\n\nSummary\n\n## old entry\n"
        );
    }

    #[test]
    fn prepends_to_empty_file() {
        assert_eq!(entry().prepend_to(""), entry().render());
    }
}
