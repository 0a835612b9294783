use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::debug;

use results_page::config::{PageConfig, log_path};
use results_page::lint::compact::{CompactParser, line_offset};
use results_page::lint::eslint::{EslintCommand, search_path};
use results_page::lint::marks::mark_commands;
use results_page::lint::scripts::ScriptExtractor;
use results_page::lint::summary::{IgnoreList, report_tally, save_summary};
use results_page::page::host::{Host, ShellHost, shell_quote};
use results_page::page::links::LinkFilter;
use results_page::version::checker::{Renderer, UpdateChecker};
use results_page::version::parse::is_newer;
use results_page::version::remote::RemoteLatestSource;
use results_page::version::state::{UpdateCheckResult, Visibility};

#[derive(Parser)]
#[command(name = "results-page")]
#[command(version, about = "Update checking and page glue for the ESLint results window")]
struct Cli {
    /// JSON config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether a newer version has been published
    Check {
        /// Version to compare against (defaults to the configured version)
        #[arg(long)]
        current: Option<String>,
        /// URL of latest.json
        #[arg(long)]
        url: Option<String>,
    },
    /// Report whether TARGET is newer than CURRENT
    Compare { current: String, target: String },
    /// Validate an external link and show the command that opens it
    Open {
        href: String,
        /// Actually open the link
        #[arg(long)]
        run: bool,
    },
    /// Read HTML on stdin and print only its script text, line for line
    Scripts,
    /// Read ESLint compact output on stdin and print the save summary
    Summary {
        /// Line of the document the linted input started at
        #[arg(long, default_value_t = 1)]
        start_line: u32,
        /// Print the full report counts instead
        #[arg(long)]
        full: bool,
    },
    /// Read ESLint compact output on stdin and print the gutter mark commands
    Marks {
        /// Document the marks belong to
        file: String,
        /// Line of the document the linted input started at
        #[arg(long, default_value_t = 1)]
        start_line: u32,
    },
    /// Print the ESLint command line and the search path it runs with
    Eslint {
        /// Document being linted
        #[arg(long)]
        file: Option<PathBuf>,
        /// Project directory ESLint runs in
        #[arg(long)]
        cwd: Option<PathBuf>,
        /// Fix FILE in place instead of linting stdin
        #[arg(long, requires = "file")]
        fix: bool,
    },
}

/// Renderer for the terminal: regions only go to the log
struct LogRenderer;

impl Renderer for LogRenderer {
    fn render(&self, visibility: &Visibility) {
        debug!("Showing region {:?}", visibility.shown());
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let _log_guard = results_page::logging::init(&log_path())
        .inspect_err(|e| eprintln!("Warning: Failed to set up logging: {e}"))
        .ok()
        .flatten();

    let config = match &cli.config {
        Some(path) => PageConfig::load(path)?,
        None => PageConfig::default(),
    };

    match cli.command {
        Command::Check { current, url } => {
            let current = current.unwrap_or(config.current_version);
            let url = url.unwrap_or(config.update.latest_url);
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(cmd_check(&current, &url, config.update.timeout))
        }
        Command::Compare { current, target } => {
            if is_newer(&current, &target) {
                println!("newer");
            } else {
                println!("not newer");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Open { href, run } => cmd_open(&href, run),
        Command::Scripts => {
            let html = std::io::read_to_string(std::io::stdin())?;
            print!("{}", ScriptExtractor::new().extract(&html));
            Ok(ExitCode::SUCCESS)
        }
        Command::Summary { start_line, full } => cmd_summary(start_line, full),
        Command::Marks { file, start_line } => {
            let output = std::io::read_to_string(std::io::stdin())?;
            let issues = CompactParser::new().parse(&output, line_offset(start_line));
            for args in mark_commands(&config.lint.mate, &file, &issues, &IgnoreList::new()) {
                println!("{}", shell_line(&args));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Eslint { file, cwd, fix } => {
            let eslint = EslintCommand::new(&config.lint.eslint);
            let args = match (&file, fix) {
                (Some(file), true) => eslint.fix_args(file),
                _ => eslint.lint_args(file.as_deref(), cwd.as_deref()),
            };
            let path = search_path(
                std::env::var("PATH").ok().as_deref(),
                std::env::var("NODE_PATH").ok().as_deref(),
                cwd.as_deref(),
            );
            println!("PATH={}", shell_quote(&path));
            println!("{}", shell_line(&args));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cmd_summary(start_line: u32, full: bool) -> anyhow::Result<ExitCode> {
    let output = std::io::read_to_string(std::io::stdin())?;
    let issues = CompactParser::new().parse(&output, line_offset(start_line));
    debug!("Parsed {} issues", issues.len());

    if full {
        let tally = report_tally(&issues);
        let labels: Vec<String> = [tally.error_label(), tally.warning_label()]
            .into_iter()
            .flatten()
            .collect();
        if labels.is_empty() {
            println!("No errors or warnings");
        } else {
            println!("{}", labels.join(", "));
        }
    } else {
        let summary = save_summary(&issues, &IgnoreList::new());
        if !summary.is_empty() {
            println!("{summary}");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn shell_line(args: &[String]) -> String {
    args.iter()
        .map(|arg| shell_quote(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

async fn cmd_check(current: &str, url: &str, timeout_ms: u64) -> anyhow::Result<ExitCode> {
    let source = RemoteLatestSource::with_timeout(url, Duration::from_millis(timeout_ms))?;
    let checker = UpdateChecker::new(current, Arc::new(source), Arc::new(LogRenderer));

    match checker.check_for_update().await {
        Some(UpdateCheckResult::UpdateAvailable(latest)) => {
            println!("Update available: v{current} -> v{latest}");
            Ok(ExitCode::SUCCESS)
        }
        Some(UpdateCheckResult::UpToDate) => {
            println!("Up to date (v{current})");
            Ok(ExitCode::SUCCESS)
        }
        Some(UpdateCheckResult::Error) | None => {
            eprintln!("Could not check for updates");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn cmd_open(href: &str, run: bool) -> anyhow::Result<ExitCode> {
    let Some(command) = LinkFilter::new().open_command(href) else {
        eprintln!("Not a web URL: {href}");
        return Ok(ExitCode::FAILURE);
    };

    println!("{}", command.to_shell());

    if run {
        ShellHost.run(&command)?;
    }

    Ok(ExitCode::SUCCESS)
}
