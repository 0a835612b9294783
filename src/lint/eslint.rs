//! ESLint command lines
//!
//! ESLint reads the document on stdin and reports in the `compact` format.
//! Node tools are often installed outside the editor's default `PATH`, so the
//! search path is widened before running it.

use std::path::Path;

/// ESLint executable used when none is configured
pub const DEFAULT_ESLINT: &str = "eslint";

/// Directories always searched for ESLint and Node
const SYSTEM_BIN_DIRS: &[&str] = &["/bin", "/usr/bin", "/usr/local/bin"];

/// How to invoke ESLint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EslintCommand {
    program: String,
}

impl EslintCommand {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments for linting stdin.
    ///
    /// With a file name, ESLint is told the name relative to `cwd` so it can
    /// pick the matching config and report the path.
    pub fn lint_args(&self, file: Option<&Path>, cwd: Option<&Path>) -> Vec<String> {
        let mut args = vec![
            self.program.clone(),
            "-f".to_string(),
            "compact".to_string(),
            "--no-color".to_string(),
            "--stdin".to_string(),
        ];

        if let Some(file) = file {
            let shown = cwd
                .and_then(|cwd| file.strip_prefix(cwd).ok())
                .unwrap_or(file);
            args.push("--stdin-filename".to_string());
            args.push(shown.to_string_lossy().into_owned());
        }

        args
    }

    /// Arguments for fixing a saved file in place
    pub fn fix_args(&self, file: &Path) -> Vec<String> {
        vec![
            self.program.clone(),
            "--fix".to_string(),
            file.to_string_lossy().into_owned(),
        ]
    }
}

impl Default for EslintCommand {
    fn default() -> Self {
        Self::new(DEFAULT_ESLINT)
    }
}

/// Search path to run ESLint with.
///
/// Starts from `path`, adds the `NODE_PATH` entries, puts the project's
/// `node_modules/.bin` first and makes sure the system bin directories are
/// present.
pub fn search_path(
    path: Option<&str>,
    node_path: Option<&str>,
    project_dir: Option<&Path>,
) -> String {
    let mut parts: Vec<String> = path
        .into_iter()
        .chain(node_path)
        .flat_map(|value| value.split(':'))
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();

    if let Some(project_dir) = project_dir {
        let node_bin = project_dir
            .join("node_modules")
            .join(".bin")
            .to_string_lossy()
            .into_owned();
        if !parts.contains(&node_bin) {
            parts.insert(0, node_bin);
        }
    }

    for dir in SYSTEM_BIN_DIRS {
        if !parts.iter().any(|part| part == dir) {
            parts.push(dir.to_string());
        }
    }

    parts.join(":")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, vec!["eslint", "-f", "compact", "--no-color", "--stdin"])]
    #[case(
        Some("/work/src/app.js"),
        Some("/work"),
        vec!["eslint", "-f", "compact", "--no-color", "--stdin", "--stdin-filename", "src/app.js"]
    )]
    #[case(
        Some("/elsewhere/app.js"),
        Some("/work"),
        vec!["eslint", "-f", "compact", "--no-color", "--stdin", "--stdin-filename", "/elsewhere/app.js"]
    )]
    #[case(
        Some("/work/app.js"),
        None,
        vec!["eslint", "-f", "compact", "--no-color", "--stdin", "--stdin-filename", "/work/app.js"]
    )]
    fn lint_args_returns_expected(
        #[case] file: Option<&str>,
        #[case] cwd: Option<&str>,
        #[case] expected: Vec<&str>,
    ) {
        let args = EslintCommand::default().lint_args(file.map(Path::new), cwd.map(Path::new));

        assert_eq!(args, expected);
    }

    #[test]
    fn fix_args_use_configured_program() {
        let command = EslintCommand::new("/opt/node/bin/eslint");

        assert_eq!(
            command.fix_args(Path::new("/work/app.js")),
            vec!["/opt/node/bin/eslint", "--fix", "/work/app.js"]
        );
        assert_eq!(command.program(), "/opt/node/bin/eslint");
    }

    #[rstest]
    #[case(None, None, None, "/bin:/usr/bin:/usr/local/bin")]
    #[case(Some("/usr/bin:/bin"), None, None, "/usr/bin:/bin:/usr/local/bin")]
    #[case(
        Some("/usr/bin"),
        Some("/opt/node/lib"),
        None,
        "/usr/bin:/opt/node/lib:/bin:/usr/local/bin"
    )]
    #[case(
        Some("/usr/local/bin:/usr/bin:/bin"),
        None,
        Some("/work"),
        "/work/node_modules/.bin:/usr/local/bin:/usr/bin:/bin"
    )]
    #[case(
        Some("/work/node_modules/.bin:/usr/bin"),
        None,
        Some("/work"),
        "/work/node_modules/.bin:/usr/bin:/bin:/usr/local/bin"
    )]
    #[case(Some(""), Some(""), None, "/bin:/usr/bin:/usr/local/bin")]
    fn search_path_returns_expected(
        #[case] path: Option<&str>,
        #[case] node_path: Option<&str>,
        #[case] project_dir: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(
            search_path(path, node_path, project_dir.map(Path::new)),
            expected
        );
    }
}
