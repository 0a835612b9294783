//! ESLint `compact` formatter output
//!
//! ESLint runs with `-f compact` and prints one issue per line:
//!
//! ```text
//! /work/app.js: line 3, col 10, Error - Missing semicolon. (semi)
//! ```
//!
//! Lines that are not issues (blank lines, the trailing problem count) are
//! skipped.

use regex::Regex;
use tracing::debug;

/// Severity taken from the first letter of the compact code (`Error`, `Warning`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Other,
}

impl Severity {
    fn from_code(code: &str) -> Self {
        match code.chars().next() {
            Some('E') => Severity::Error,
            Some('W') => Severity::Warning,
            _ => Severity::Other,
        }
    }
}

/// One problem reported by ESLint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// 1-based line in the whole document
    pub line: u32,
    /// 1-based column as the editor counts it
    pub character: u32,
    pub severity: Severity,
    pub reason: String,
    /// Rule name, e.g. `semi`
    pub shortname: Option<String>,
}

impl Issue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// Reason with the rule name appended: `Missing semicolon. (semi)`
    pub fn message(&self) -> String {
        match &self.shortname {
            Some(shortname) => format!("{} ({})", self.reason, shortname),
            None => self.reason.clone(),
        }
    }

    /// Editor link that jumps to the issue. Unsaved documents have no file.
    pub fn open_url(&self, file: Option<&str>) -> String {
        match file {
            Some(file) => format!(
                "txmt://open?url=file://{}&line={}&column={}",
                file, self.line, self.character
            ),
            None => format!("txmt://open?line={}&column={}", self.line, self.character),
        }
    }
}

/// Parser for `eslint -f compact` output
#[derive(Debug, Clone)]
pub struct CompactParser {
    /// Regex for an issue line: `<path>: line N, col M, <Code> - <reason> [(<rule>)]`
    issue_re: Regex,
}

impl CompactParser {
    pub fn new() -> Self {
        Self {
            issue_re: Regex::new(
                r"^[^:]+: line (?P<line>\d+), col (?P<character>\d+), (?P<code>\w+) - (?P<reason>.+?)(?:\s\((?P<shortname>[\w\-]+)\))?$",
            )
            .unwrap(),
        }
    }

    /// Parse compact output.
    ///
    /// `line_offset` is added to every line number, for when ESLint was given
    /// only part of the document (a selection starting further down).
    pub fn parse(&self, output: &str, line_offset: u32) -> Vec<Issue> {
        output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| self.parse_line(line, line_offset))
            .collect()
    }

    fn parse_line(&self, line: &str, line_offset: u32) -> Option<Issue> {
        let caps = self.issue_re.captures(line)?;

        let (Ok(number), Ok(column)) = (
            caps["line"].parse::<u32>(),
            caps["character"].parse::<u32>(),
        ) else {
            debug!("Skipping issue with out of range position: {}", line);
            return None;
        };

        Some(Issue {
            line: number.saturating_add(line_offset),
            // compact columns are one behind the editor's
            character: column.saturating_add(1),
            severity: Severity::from_code(&caps["code"]),
            reason: caps["reason"].to_string(),
            shortname: caps.name("shortname").map(|m| m.as_str().to_string()),
        })
    }
}

impl Default for CompactParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Line offset for a document whose input starts at `start_line` (1-based)
pub fn line_offset(start_line: u32) -> u32 {
    start_line.saturating_sub(1)
}
