//! Sink construction: the rotating log file and the console.
//!
//! Rotation itself belongs to `logroller`; this module only translates
//! validated settings into its builder and wraps the result in a
//! background writer.

use crate::validate::LogSettings;
use applog_types::{LogInitError, Result};
use chrono::{DateTime, Duration, Utc};
use logroller::{Compression, LogRoller, LogRollerBuilder, Rotation, RotationSize, TimeZone};
use regex::Regex;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Rotation size used when the configured maximum is 0.
pub const DEFAULT_ROTATION_SIZE_MB: u64 = 100;

/// Build the rotating file writer for `settings`.
///
/// Dropping the writer waits for any in-flight rotation, so archives are
/// complete once the logger is gone.
pub fn rotating_file(settings: &LogSettings) -> Result<LogRoller> {
    let (directory, file_name) = split_log_path(&settings.path)?;

    let size_mb = match settings.max_size_mb {
        0 => DEFAULT_ROTATION_SIZE_MB,
        n => n,
    };
    let mut builder = LogRollerBuilder::new(directory.as_str(), file_name.as_str())
        .rotation(Rotation::SizeBased(RotationSize::MB(size_mb)))
        .time_zone(time_zone(settings))
        .graceful_shutdown(true);

    if settings.max_backups > 0 {
        builder = builder.max_keep_files(settings.max_backups);
    }
    if settings.compress {
        builder = builder.compression(Compression::Gzip);
    }

    builder
        .build()
        .map_err(|e| LogInitError::Sink(format!("failed to open {}: {}", settings.path.display(), e)))
}

/// Time zone for rotation timestamps.
pub fn time_zone(settings: &LogSettings) -> TimeZone {
    if settings.local_time {
        TimeZone::Local
    } else {
        TimeZone::UTC
    }
}

/// Rotating file behind a background writer thread.
///
/// The queue is not lossy: when it is full, emitting threads block until the
/// writer catches up rather than dropping file records.
pub fn file_writer(settings: &LogSettings) -> Result<(NonBlocking, WorkerGuard)> {
    let roller = rotating_file(settings)?;
    Ok(NonBlockingBuilder::default().lossy(false).finish(roller))
}

/// Standard error behind a background writer thread.
pub fn stderr_writer() -> (BoxMakeWriter, WorkerGuard) {
    let (writer, guard) = tracing_appender::non_blocking(io::stderr());
    (BoxMakeWriter::new(writer), guard)
}

/// Whether console output should carry ANSI colors.
pub fn stderr_is_terminal() -> bool {
    io::stderr().is_terminal()
}

/// Matches the archives `logroller` leaves behind for `file_name` under
/// size-based rotation: `<file_name>.<n>`, optionally `.gz`.
pub fn archive_pattern(file_name: &str) -> std::result::Result<Regex, regex::Error> {
    Regex::new(&format!(r"^{}\.\d+(\.gz)?$", regex::escape(file_name)))
}

/// Remove rotated archives of the log file that are older than
/// `max_age_days`. Returns the removed paths.
///
/// Only names matching [`archive_pattern`] are considered, so the live file,
/// in-flight `.pending` files and unrelated files sharing the prefix are left
/// alone. Files that cannot be inspected or removed are skipped.
pub fn prune_expired(settings: &LogSettings) -> Vec<PathBuf> {
    if settings.max_age_days == 0 {
        return Vec::new();
    }
    let Ok((directory, file_name)) = split_log_path(&settings.path) else {
        return Vec::new();
    };
    let Ok(archive) = archive_pattern(&file_name) else {
        return Vec::new();
    };
    let Ok(entries) = fs::read_dir(&directory) else {
        return Vec::new();
    };

    let days = i64::try_from(settings.max_age_days).unwrap_or(i64::MAX);
    let cutoff = Duration::try_days(days)
        .and_then(|age| Utc::now().checked_sub_signed(age))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    let mut removed = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if !archive.is_match(&name) {
            continue;
        }
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }
        let Ok(modified) = metadata.modified() else {
            continue;
        };
        if DateTime::<Utc>::from(modified) < cutoff && fs::remove_file(entry.path()).is_ok() {
            removed.push(entry.path());
        }
    }
    removed
}

// Directory and file name of the log path; a bare file name lives in ".".
fn split_log_path(path: &Path) -> Result<(String, String)> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or(LogInitError::UnavailableLogFile)?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_string_lossy().into_owned(),
        _ => ".".to_string(),
    };
    Ok((directory, file_name))
}
