//! Tracing setup for a kneegrade session.
//!
//! Each launch writes to stdout and to its own file
//! `kneegrade_<YYYY-MM-DD_HH-MM-SS>.log` under `.kneegrade/logs`. The
//! timestamped names sort chronologically, so pruning simply drops the
//! lexically oldest session logs.

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
    sync::OnceLock,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs::{self, AppDirError};
use crate::config::ServiceSettings;

/// Session logs kept on disk, including the current one.
const MAX_SESSION_LOGS: usize = 10;
const LOG_FILE_PREFIX: &str = "kneegrade_";
const LOG_FILE_SUFFIX: &str = ".log";
/// Filter directives override, e.g. `KNEEGRADE_LOG=debug`.
pub const LOG_FILTER_ENV: &str = "KNEEGRADE_LOG";
/// Quiet the transport and windowing crates unless asked otherwise.
const DEFAULT_FILTER: &str = "info,ureq=warn,rustls=warn,eframe=warn,egui_glow=warn,winit=warn";

struct LogSession {
    log_path: PathBuf,
    _guard: WorkerGuard,
}

static SESSION: OnceLock<LogSession> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error(transparent)]
    AppDir(#[from] AppDirError),
    #[error("Failed to create log file at {path}: {source}")]
    CreateLogFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to prune session logs in {path}: {source}")]
    Prune {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to format log filename time: {0}")]
    FormatTime(#[from] time::error::Format),
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Start session logging and return the path of this launch's log file.
///
/// Later calls return the same path without touching the subscriber.
pub fn init() -> Result<PathBuf, LoggingError> {
    if let Some(session) = SESSION.get() {
        return Ok(session.log_path.clone());
    }

    let log_dir = app_dirs::logs_dir()?;
    let file_name = session_log_name(now_local_or_utc())?;
    let log_path = log_dir.join(&file_name);
    File::create(&log_path).map_err(|source| LoggingError::CreateLogFile {
        path: log_path.clone(),
        source,
    })?;
    prune_session_logs(&log_dir, MAX_SESSION_LOGS)?;

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::never(&log_dir, &file_name));
    let timer = build_timer();
    let filter = EnvFilter::new(filter_directives(std::env::var(LOG_FILTER_ENV).ok()));
    let subscriber = Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_timer(timer.clone())
                .with_writer(std::io::stdout),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(file_writer),
        );
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = SESSION.set(LogSession {
        log_path: log_path.clone(),
        _guard: guard,
    });

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_file = %log_path.display(),
        "kneegrade starting"
    );
    Ok(log_path)
}

/// Record which prediction service this session talks to.
pub fn log_service_settings(settings: &ServiceSettings) {
    match settings.predict_url() {
        Ok(url) => tracing::info!(
            endpoint = %url,
            timeout_secs = ?settings.request_timeout_secs,
            max_response_bytes = settings.max_response_bytes,
            "Prediction service configured"
        ),
        Err(err) => tracing::warn!("Prediction service misconfigured: {err}"),
    }
}

fn filter_directives(from_env: Option<String>) -> String {
    from_env
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

fn is_session_log(name: &str) -> bool {
    name.starts_with(LOG_FILE_PREFIX) && name.ends_with(LOG_FILE_SUFFIX)
}

fn prune_session_logs(dir: &Path, keep: usize) -> Result<(), LoggingError> {
    let prune_err = |source| LoggingError::Prune {
        path: dir.to_path_buf(),
        source,
    };
    let mut names: Vec<String> = fs::read_dir(dir)
        .map_err(prune_err)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| is_session_log(name))
        .collect();
    names.sort();
    let excess = names.len().saturating_sub(keep);
    for name in names.into_iter().take(excess) {
        fs::remove_file(dir.join(name)).map_err(prune_err)?;
    }
    Ok(())
}

fn session_log_name(started: OffsetDateTime) -> Result<String, LoggingError> {
    const NAME_FORMAT: &[FormatItem<'_>] =
        format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    Ok(format!(
        "{LOG_FILE_PREFIX}{}{LOG_FILE_SUFFIX}",
        started.format(NAME_FORMAT)?
    ))
}

fn build_timer() -> fmt::time::OffsetTime<time::format_description::BorrowedFormatItem<'static>> {
    const DISPLAY_FORMAT: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, DISPLAY_FORMAT.into())
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
