//! Logger initialization.
//!
//! `init_logging` validates a [`LogConfig`], builds a JSON rotating-file
//! sink and a human-readable console sink, filters both at the configured
//! minimum severity and combines them on one `tracing` registry. The result
//! is an explicit [`Logger`] handle; publishing it process-wide is up to the
//! caller (see [`crate::global`]).

use crate::sink;
use crate::validate::LogSettings;
use applog_types::{LogConfig, Result, Severity};
use tracing::dispatcher::DefaultGuard;
use tracing::{Dispatch, Level, Metadata};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{filter_fn, FilterFn};
use tracing_subscriber::fmt::{self, writer::BoxMakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, Registry};

/// Target that marks an `ERROR` record as fatal.
///
/// Only records emitted with this target rank as [`Severity::Fatal`]; fields
/// named `fatal` on ordinary records have no effect on filtering.
pub const FATAL_TARGET: &str = "applog::fatal";

/// A ready-to-use logger writing to a rotating file and the console.
///
/// Dropping the logger flushes both background writers and closes the log
/// file.
#[derive(Debug)]
pub struct Logger {
    dispatch: Dispatch,
    settings: LogSettings,
    _guards: Vec<WorkerGuard>,
}

impl Logger {
    /// Settings this logger was built from.
    pub fn settings(&self) -> &LogSettings {
        &self.settings
    }

    /// The composed `tracing` dispatcher.
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Run `f` with this logger as the current dispatcher.
    ///
    /// `tracing` macros called inside `f` reach both sinks.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Make this logger the current thread's dispatcher until the guard drops.
    pub fn set_default(&self) -> DefaultGuard {
        tracing::dispatcher::set_default(&self.dispatch)
    }

    /// Whether a record at `severity` would reach the sinks.
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.settings.severity
    }
}

/// Validate `config` and build a logger that writes to the rotating file and
/// standard error.
pub fn init_logging(config: &LogConfig) -> Result<Logger> {
    let settings = LogSettings::from_config(config)?;
    let (console, console_guard) = sink::stderr_writer();
    build(settings, console, sink::stderr_is_terminal(), vec![console_guard])
}

/// Like [`init_logging`], with `console` in place of standard error.
pub fn init_logging_with_console(config: &LogConfig, console: BoxMakeWriter) -> Result<Logger> {
    let settings = LogSettings::from_config(config)?;
    build(settings, console, false, Vec::new())
}

fn build(
    settings: LogSettings,
    console: BoxMakeWriter,
    ansi: bool,
    mut guards: Vec<WorkerGuard>,
) -> Result<Logger> {
    sink::prune_expired(&settings);
    let (file, file_guard) = sink::file_writer(&settings)?;
    guards.push(file_guard);

    let file_layer = fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(severity_filter(settings.severity));

    let console_layer = fmt::layer()
        .with_writer(console)
        .with_ansi(ansi)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(severity_filter(settings.severity));

    let subscriber = Registry::default().with(file_layer).with(console_layer);

    Ok(Logger {
        dispatch: Dispatch::new(subscriber),
        settings,
        _guards: guards,
    })
}

/// Severity of a record, from its level and the fatal target.
pub fn record_severity(metadata: &Metadata<'_>) -> Severity {
    match *metadata.level() {
        Level::ERROR if metadata.target() == FATAL_TARGET => Severity::Fatal,
        Level::ERROR => Severity::Error,
        Level::WARN => Severity::Warning,
        Level::INFO => Severity::Info,
        // trace has no counterpart and ranks with debug
        _ => Severity::Debug,
    }
}

fn severity_filter(min: Severity) -> FilterFn<impl Fn(&Metadata<'_>) -> bool> {
    filter_fn(move |metadata| record_severity(metadata) >= min)
}
