use regex::Regex;
use std::sync::LazyLock;

/// Matches 3 or more consecutive new lines
static EXTRA_NEW_LINES_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Matches `#123` style issue / PR references not already inside a link
static ISSUE_REFERENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[\s(])#(\d+)\b").unwrap());

/// Normalize changelog formatting by replacing consecutive blank lines (3+)
/// with double newlines and trimming whitespace.
pub fn strip_extra_lines(changelog: &str) -> String {
    EXTRA_NEW_LINES_REGEX
        .replace_all(changelog, "\n\n")
        .trim()
        .to_string()
}

/// Turn `#123` references into links to the repository's issue tracker.
pub fn link_issue_references(text: &str, repository_url: &str) -> String {
    ISSUE_REFERENCE_REGEX
        .replace_all(text, |caps: &regex::Captures| {
            format!(
                "{}[#{}]({}/issues/{})",
                &caps[1], &caps[2], repository_url, &caps[2]
            )
        })
        .to_string()
}
