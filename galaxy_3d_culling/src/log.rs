//! Internal logging system for Galaxy3D culling
//!
//! This module provides a flexible logging system with:
//! - Customizable logger via Logger trait
//! - Severity levels (Trace, Debug, Info, Warn, Error)
//! - A global minimum severity so filtered macros never format their message
//! - Colored console output by default
//! - Thread-safe logging with RwLock
//! - File and line information for detailed ERROR logs
//!
//! Query paths (`Frustum::is_sphere_inside` and friends) never log; only
//! frustum construction, extra-plane edits and validation failures do.

use colored::*;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// Implement this trait to route culling diagnostics elsewhere
/// (file logging, an in-editor console, etc.)
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_culling::galaxy3d::log::{Logger, LogEntry};
///
/// struct FileLogger {
///     file: std::fs::File,
/// }
///
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Write to file...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level (Trace, Debug, Info, Warn, Error)
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source module (e.g., "galaxy3d::Frustum", "galaxy3d::FrustumDesc")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for detailed ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for detailed ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Very verbose debug information (frustum rebuilds, every frame)
    Trace,

    /// Development/debugging information
    Debug,

    /// Important informational messages
    Info,

    /// Warning messages (potential issues)
    Warn,

    /// Error messages (critical issues with file:line details)
    Error,
}

impl LogSeverity {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => LogSeverity::Trace,
            1 => LogSeverity::Debug,
            2 => LogSeverity::Info,
            3 => LogSeverity::Warn,
            _ => LogSeverity::Error,
        }
    }
}

/// Default logger implementation using colored console output
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl DefaultLogger {
    /// Render an entry as the line `log()` prints (colors included).
    pub fn format(entry: &LogEntry) -> String {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let severity_str = match entry.severity {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        };

        let source = entry.source.bright_blue();

        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            format!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp,
                severity_str,
                source,
                entry.message,
                file,
                line
            )
        } else {
            format!(
                "[{}] [{}] [{}] {}",
                timestamp,
                severity_str,
                source,
                entry.message
            )
        }
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        println!("{}", Self::format(entry));
    }
}

// ===== GLOBAL LOGGER =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Minimum severity forwarded to the logger (Info by default)
static MIN_SEVERITY: AtomicU8 = AtomicU8::new(LogSeverity::Info as u8);

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

/// Replace the global logger with a custom implementation
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_culling::galaxy3d::log::{self, Logger, LogEntry};
///
/// struct ConsoleWidgetLogger;
/// impl Logger for ConsoleWidgetLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Forward to the editor console...
///     }
/// }
///
/// log::set_logger(ConsoleWidgetLogger);
/// ```
pub fn set_logger<L: Logger + 'static>(logger: L) {
    if let Ok(mut lock) = logger_lock().write() {
        *lock = Box::new(logger);
    }
}

/// Reset logger to default (DefaultLogger)
pub fn reset_logger() {
    if let Ok(mut lock) = logger_lock().write() {
        *lock = Box::new(DefaultLogger);
    }
}

/// Set the minimum severity forwarded to the logger.
///
/// Entries below this level are dropped by the `culling_*!` macros
/// before their message is formatted.
pub fn set_min_severity(severity: LogSeverity) {
    MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
}

/// Current minimum severity.
pub fn min_severity() -> LogSeverity {
    LogSeverity::from_u8(MIN_SEVERITY.load(Ordering::Relaxed))
}

/// Whether entries of `severity` currently reach the logger.
#[inline]
pub fn enabled(severity: LogSeverity) -> bool {
    severity as u8 >= MIN_SEVERITY.load(Ordering::Relaxed)
}

/// Forward an entry without file:line to the global logger.
///
/// Used by macros like culling_info!, culling_warn!, etc.
/// Calling this directly bypasses the minimum severity filter.
pub fn log(severity: LogSeverity, source: &str, message: String) {
    if let Ok(lock) = logger_lock().read() {
        lock.log(&LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: None,
            line: None,
        });
    }
}

/// Forward an entry with file:line information to the global logger.
///
/// Used by culling_error! to include source location.
pub fn log_detailed(
    severity: LogSeverity,
    source: &str,
    message: String,
    file: &'static str,
    line: u32,
) {
    if let Ok(lock) = logger_lock().read() {
        lock.log(&LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: Some(file),
            line: Some(line),
        });
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message (very verbose, disabled by default)
///
/// # Example
///
/// ```ignore
/// culling_trace!("galaxy3d::Frustum", "Rebuilt {} planes", count);
/// ```
#[macro_export]
macro_rules! culling_trace {
    ($source:expr, $($arg:tt)*) => {
        if $crate::galaxy3d::log::enabled($crate::galaxy3d::log::LogSeverity::Trace) {
            $crate::galaxy3d::log::log(
                $crate::galaxy3d::log::LogSeverity::Trace,
                $source,
                format!($($arg)*)
            )
        }
    };
}

/// Log a DEBUG message (development information)
#[macro_export]
macro_rules! culling_debug {
    ($source:expr, $($arg:tt)*) => {
        if $crate::galaxy3d::log::enabled($crate::galaxy3d::log::LogSeverity::Debug) {
            $crate::galaxy3d::log::log(
                $crate::galaxy3d::log::LogSeverity::Debug,
                $source,
                format!($($arg)*)
            )
        }
    };
}

/// Log an INFO message (important events)
#[macro_export]
macro_rules! culling_info {
    ($source:expr, $($arg:tt)*) => {
        if $crate::galaxy3d::log::enabled($crate::galaxy3d::log::LogSeverity::Info) {
            $crate::galaxy3d::log::log(
                $crate::galaxy3d::log::LogSeverity::Info,
                $source,
                format!($($arg)*)
            )
        }
    };
}

/// Log a WARN message (potential issues)
#[macro_export]
macro_rules! culling_warn {
    ($source:expr, $($arg:tt)*) => {
        if $crate::galaxy3d::log::enabled($crate::galaxy3d::log::LogSeverity::Warn) {
            $crate::galaxy3d::log::log(
                $crate::galaxy3d::log::LogSeverity::Warn,
                $source,
                format!($($arg)*)
            )
        }
    };
}

/// Log an ERROR message with file:line information
///
/// # Example
///
/// ```ignore
/// culling_error!("galaxy3d::FrustumDesc", "Validation failed: {}", error);
/// ```
#[macro_export]
macro_rules! culling_error {
    ($source:expr, $($arg:tt)*) => {
        if $crate::galaxy3d::log::enabled($crate::galaxy3d::log::LogSeverity::Error) {
            $crate::galaxy3d::log::log_detailed(
                $crate::galaxy3d::log::LogSeverity::Error,
                $source,
                format!($($arg)*),
                file!(),
                line!()
            )
        }
    };
}

/// Log an error and evaluate to it.
///
/// # Example
///
/// ```ignore
/// return Err(culling_err!("galaxy3d::FrustumDesc",
///     Error::InvalidProjection("ratio must be positive".to_string())));
/// ```
#[macro_export]
macro_rules! culling_err {
    ($source:expr, $err:expr) => {{
        let err: $crate::galaxy3d::Error = $err;
        $crate::culling_error!($source, "{}", err);
        err
    }};
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
