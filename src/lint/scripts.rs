//! Script extraction from HTML documents
//!
//! ESLint only reads JavaScript, so an HTML document is linted with every
//! character outside `<script>` elements blanked. Line numbers and the
//! columns of script text are unchanged, so reported positions still point
//! into the original document.

use std::iter::repeat_n;

use regex::Regex;

/// Scope prefix of documents that are plain JavaScript
pub const JAVASCRIPT_SCOPE: &str = "source.js";

/// Whether a document in `scope` needs its scripts extracted before linting
pub fn is_html_scope(scope: &str) -> bool {
    !scope.starts_with(JAVASCRIPT_SCOPE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Markup,
    OpeningTag,
    Script,
}

/// Keeps the content of `<script>` elements and blanks the rest
#[derive(Debug, Clone)]
pub struct ScriptExtractor {
    /// Regex for an opening tag: `<script` followed by whitespace, `>` or line end
    start_tag_re: Regex,
    /// Regex for a closing tag: `</script` followed by whitespace, `>` or line end
    end_tag_re: Regex,
}

impl ScriptExtractor {
    pub fn new() -> Self {
        Self {
            // Group 1 ends right after the tag name
            start_tag_re: Regex::new(r"(?i)(<\s*script)(?:[\s>]|$)").unwrap(),
            end_tag_re: Regex::new(r"(?i)</\s*script(?:[\s>]|$)").unwrap(),
        }
    }

    /// Returns only the script text of `html`, with the same number of lines.
    ///
    /// Lines without script text come out empty. Script text keeps its
    /// column; blanked markup before it on the same line becomes spaces.
    pub fn extract(&self, html: &str) -> String {
        let mut scan = Scan::Markup;
        let mut out = String::with_capacity(html.len());

        for line in html.split_inclusive('\n') {
            let (body, newline) = match line.strip_suffix('\n') {
                Some(body) => (body, "\n"),
                None => (line, ""),
            };
            out.push_str(&self.extract_line(body, &mut scan));
            out.push_str(newline);
        }

        out
    }

    fn extract_line(&self, line: &str, scan: &mut Scan) -> String {
        let mut kept = String::new();
        // Blanked columns not yet written; dropped when no script text follows
        let mut pad = 0;
        let mut rest = line;

        while !rest.is_empty() {
            match *scan {
                Scan::Markup => {
                    let Some(tag_name_end) = self
                        .start_tag_re
                        .captures(rest)
                        .and_then(|caps| caps.get(1))
                        .map(|m| m.end())
                    else {
                        break;
                    };
                    pad += rest[..tag_name_end].chars().count();
                    rest = &rest[tag_name_end..];
                    *scan = Scan::OpeningTag;
                }
                Scan::OpeningTag => {
                    let Some(gt) = rest.find('>') else {
                        break;
                    };
                    pad += rest[..=gt].chars().count();
                    rest = &rest[gt + 1..];
                    *scan = Scan::Script;
                }
                Scan::Script => {
                    let end_tag = self.end_tag_re.find(rest);
                    let script = end_tag.map_or(rest, |m| &rest[..m.start()]);
                    if !script.is_empty() {
                        kept.extend(repeat_n(' ', pad));
                        kept.push_str(script);
                        pad = 0;
                    }

                    let Some(end_tag) = end_tag else {
                        break;
                    };
                    pad += end_tag.as_str().chars().count();
                    rest = &rest[end_tag.end()..];
                    *scan = Scan::Markup;
                }
            }
        }

        if kept.trim().is_empty() {
            kept.clear();
        }
        kept
    }
}

impl Default for ScriptExtractor {
    fn default() -> Self {
        Self::new()
    }
}
