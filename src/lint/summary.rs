//! Issue counts and the summary shown after a save

use regex::RegexSet;

use crate::lint::compact::Issue;

/// Reasons that are not worth reporting after a save
pub const IGNORED_REASONS: &[&str] = &["^File ignored because of a matching ignore pattern"];

/// Appended to a non-empty save summary
pub const FULL_REPORT_HINT: &str = "\r\rPress Shift-Ctrl-V to view the full report.";

/// Issues left out of the save summary and gutter marks
#[derive(Debug, Clone)]
pub struct IgnoreList {
    reasons: RegexSet,
}

impl IgnoreList {
    pub fn new() -> Self {
        Self {
            reasons: RegexSet::new(IGNORED_REASONS).unwrap(),
        }
    }

    pub fn is_ignored(&self, issue: &Issue) -> bool {
        self.reasons.is_match(&issue.reason)
    }

    /// Issues that are not ignored
    pub fn reported<'a>(&'a self, issues: &'a [Issue]) -> impl Iterator<Item = &'a Issue> {
        issues.iter().filter(|issue| !self.is_ignored(issue))
    }
}

impl Default for IgnoreList {
    fn default() -> Self {
        Self::new()
    }
}

/// Error and warning counts
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub errors: usize,
    pub warnings: usize,
}

impl Tally {
    pub fn count<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> Self {
        issues.into_iter().fold(Self::default(), |mut tally, issue| {
            if issue.is_error() {
                tally.errors += 1;
            }
            if issue.is_warning() {
                tally.warnings += 1;
            }
            tally
        })
    }

    pub fn has_issues(&self) -> bool {
        self.errors + self.warnings > 0
    }

    /// `1 error`, `3 errors`, or `None` without errors
    pub fn error_label(&self) -> Option<String> {
        count_label(self.errors, "error")
    }

    /// `1 warning`, `3 warnings`, or `None` without warnings
    pub fn warning_label(&self) -> Option<String> {
        count_label(self.warnings, "warning")
    }

    /// `2 errors, 1 warning` followed by the full-report hint; empty when clean
    pub fn summary(&self) -> String {
        let parts: Vec<String> = [self.error_label(), self.warning_label()]
            .into_iter()
            .flatten()
            .collect();

        if parts.is_empty() {
            return String::new();
        }
        format!("{}{}", parts.join(", "), FULL_REPORT_HINT)
    }
}

fn count_label(count: usize, noun: &str) -> Option<String> {
    match count {
        0 => None,
        1 => Some(format!("1 {}", noun)),
        n => Some(format!("{} {}s", n, noun)),
    }
}

/// Summary shown after a save. Ignored issues are not counted.
pub fn save_summary(issues: &[Issue], ignore: &IgnoreList) -> String {
    Tally::count(ignore.reported(issues)).summary()
}

/// Counts for the full report. Every issue is counted.
pub fn report_tally(issues: &[Issue]) -> Tally {
    Tally::count(issues)
}
