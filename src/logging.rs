//! File logging setup

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter
pub const LOG_ENV: &str = "RESULTS_PAGE_LOG";

const DEFAULT_FILTER: &str = "info";

/// Install a file subscriber writing to `log_path`.
///
/// The returned guard flushes buffered lines on drop and must be kept alive
/// for the lifetime of the process. Returns `Ok(None)` when a global
/// subscriber is already installed.
pub fn init(log_path: &Path) -> std::io::Result<Option<WorkerGuard>> {
    let dir = log_path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;

    let file_name = log_path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "results-page.log".into());

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(std::env::var(LOG_ENV).ok().as_deref()))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .is_ok();

    Ok(installed.then_some(guard))
}

fn env_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::new(filter_directives(directives))
}

/// Directives to use, falling back to the default when unset or unparseable
fn filter_directives(directives: Option<&str>) -> &str {
    match directives {
        Some(d) if EnvFilter::try_new(d).is_ok() => d,
        _ => DEFAULT_FILTER,
    }
}
