//! Gutter marks for the editor
//!
//! Each reported issue gets a warning mark on its line. The marks are set
//! through the editor's `mate` tool, a few per invocation.

use crate::lint::compact::Issue;
use crate::lint::summary::IgnoreList;

/// Editor command used when none is configured
pub const DEFAULT_MATE: &str = "mate";

/// Marks set per `mate` invocation
pub const MARKS_PER_COMMAND: usize = 10;

/// A mark on one line of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GutterMark {
    pub message: String,
    /// `line:column`
    pub position: String,
}

impl GutterMark {
    pub fn for_issue(issue: &Issue) -> Self {
        Self {
            message: issue.message(),
            // Document-level issues carry line 0; mark the first line instead
            position: format!("{}:{}", issue.line.max(1), issue.character),
        }
    }
}

/// Command lines that replace the marks of `file` with the reported issues.
///
/// The first command clears existing marks; the rest set up to
/// [`MARKS_PER_COMMAND`] marks each.
pub fn mark_commands(
    mate: &str,
    file: &str,
    issues: &[Issue],
    ignore: &IgnoreList,
) -> Vec<Vec<String>> {
    let marks: Vec<GutterMark> = ignore.reported(issues).map(GutterMark::for_issue).collect();

    let clear = vec![
        mate.to_string(),
        "--clear-mark=warning".to_string(),
        file.to_string(),
    ];

    let set = marks.chunks(MARKS_PER_COMMAND).map(|chunk| {
        let mut args = vec![mate.to_string()];
        for mark in chunk {
            args.push(format!("--set-mark=warning:[ESLint] {}", mark.message));
            args.push(format!("--line={}", mark.position));
        }
        args.push(file.to_string());
        args
    });

    std::iter::once(clear).chain(set).collect()
}
