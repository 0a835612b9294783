//! Commands the page asks the editor host to run

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use tracing::{debug, info};

/// AppleScript sent to close the frontmost results window
pub const CLOSE_WINDOW_SCRIPT: &str =
    r#"tell application "System Events" to keystroke "w" using command down"#;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    ExitStatus {
        program: &'static str,
        status: std::process::ExitStatus,
    },

    #[error("Failed to remove marker {path:?}: {source}")]
    RemoveMarker {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Action requested from the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// Send Cmd-W to the results window
    CloseWindow,
    /// Open an already validated URL in the user's browser
    OpenExternal(String),
    /// Delete the "report window is showing" marker file
    RemoveMarker(PathBuf),
}

impl HostCommand {
    /// Shell form of the command, as the editor's `system` bridge would run it
    pub fn to_shell(&self) -> String {
        match self {
            HostCommand::CloseWindow => {
                format!("osascript -e {}", shell_quote(CLOSE_WINDOW_SCRIPT))
            }
            HostCommand::OpenExternal(url) => format!("open {}", shell_quote(url)),
            HostCommand::RemoveMarker(path) => {
                format!("/bin/rm {}", shell_quote(&path.to_string_lossy()))
            }
        }
    }
}

/// Quote one argument for a POSIX shell
pub fn shell_quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}

/// Trait for executing host commands
#[cfg_attr(test, automock)]
pub trait Host: Send + Sync {
    fn run(&self, command: &HostCommand) -> Result<(), HostError>;
}

/// Host that runs commands on the local machine
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellHost;

impl Host for ShellHost {
    fn run(&self, command: &HostCommand) -> Result<(), HostError> {
        match command {
            HostCommand::CloseWindow => run_program("osascript", &["-e", CLOSE_WINDOW_SCRIPT]),
            HostCommand::OpenExternal(url) => run_program("open", &[url.as_str()]),
            HostCommand::RemoveMarker(path) => remove_marker(path),
        }
    }
}

fn run_program(program: &'static str, args: &[&str]) -> Result<(), HostError> {
    debug!("Running {} {:?}", program, args);

    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|source| HostError::Spawn { program, source })?;

    if status.success() {
        Ok(())
    } else {
        Err(HostError::ExitStatus { program, status })
    }
}

fn remove_marker(path: &Path) -> Result<(), HostError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            info!("Removed marker file {:?}", path);
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Marker file {:?} already gone", path);
            Ok(())
        }
        Err(source) => Err(HostError::RemoveMarker {
            path: path.to_path_buf(),
            source,
        }),
    }
}
