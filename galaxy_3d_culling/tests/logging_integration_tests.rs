//! Integration tests for the culling logging system
//!
//! These tests verify logger replacement, severity filtering, and the
//! diagnostics emitted by frustum construction and camera validation.
//!
//! Run with: cargo test --test logging_integration_tests

use galaxy_3d_culling::galaxy3d::camera::{Frustum, FrustumDesc, Planes};
use galaxy_3d_culling::galaxy3d::log::{self, Logger, LogEntry, LogSeverity};
use galaxy_3d_culling::galaxy3d::Error;
use galaxy_3d_culling::glam::{Mat4, Vec3};
use galaxy_3d_culling::{culling_debug, culling_info, culling_warn};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

/// Install a capturing logger at `severity`.
fn capture(severity: LogSeverity) -> Arc<Mutex<Vec<LogEntry>>> {
    let (test_logger, entries) = TestLogger::new();
    log::set_logger(test_logger);
    log::set_min_severity(severity);
    entries
}

/// Restore the default logger and severity.
fn restore() {
    log::reset_logger();
    log::set_min_severity(LogSeverity::Info);
}

fn perspective() -> Frustum {
    let mut frustum = Frustum::new();
    frustum.compute_perspective(Vec3::ZERO, Vec3::Z, Vec3::Y, 1.2, 1.5, 0.5, 200.0);
    frustum
}

// ============================================================================
// LOGGER TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let entries = capture(LogSeverity::Info);

    log::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    log::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());
    log::log(LogSeverity::Error, "test::module", "Test error message".to_string());

    {
        let captured_entries = entries.lock().unwrap();
        assert_eq!(captured_entries.len(), 3);

        assert_eq!(captured_entries[0].severity, LogSeverity::Info);
        assert_eq!(captured_entries[0].source, "test::module");
        assert_eq!(captured_entries[0].message, "Test info message");

        assert_eq!(captured_entries[1].severity, LogSeverity::Warn);
        assert_eq!(captured_entries[1].message, "Test warning message");

        assert_eq!(captured_entries[2].severity, LogSeverity::Error);
        assert_eq!(captured_entries[2].message, "Test error message");
    }

    restore();
}

#[test]
#[serial]
fn test_integration_error_logging_with_location() {
    let entries = capture(LogSeverity::Info);

    log::log_detailed(
        LogSeverity::Error,
        "test::error",
        "Critical error occurred".to_string(),
        "test_file.rs",
        42,
    );

    {
        let captured_entries = entries.lock().unwrap();
        assert_eq!(captured_entries.len(), 1);

        let entry = &captured_entries[0];
        assert_eq!(entry.severity, LogSeverity::Error);
        assert_eq!(entry.source, "test::error");
        assert_eq!(entry.message, "Critical error occurred");
        assert_eq!(entry.file, Some("test_file.rs"));
        assert_eq!(entry.line, Some(42));
    }

    restore();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let entries = capture(LogSeverity::Info);

    log::log(LogSeverity::Info, "test", "Message 1".to_string());
    assert_eq!(entries.lock().unwrap().len(), 1);

    restore();

    // Goes to the default logger, not captured
    log::log(LogSeverity::Info, "test", "Message 2".to_string());
    assert_eq!(entries.lock().unwrap().len(), 1);
}

#[test]
#[serial]
fn test_integration_direct_log_bypasses_filter() {
    let entries = capture(LogSeverity::Error);

    log::log(LogSeverity::Trace, "test", "Trace message".to_string());
    log::log(LogSeverity::Debug, "test", "Debug message".to_string());

    {
        let captured_entries = entries.lock().unwrap();
        assert_eq!(captured_entries.len(), 2);
        assert_eq!(captured_entries[0].severity, LogSeverity::Trace);
        assert_eq!(captured_entries[1].severity, LogSeverity::Debug);
    }

    restore();
}

// ============================================================================
// SEVERITY FILTER
// ============================================================================

static FORMAT_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Counts how many times it gets formatted
struct Counted;

impl fmt::Display for Counted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        FORMAT_COUNT.fetch_add(1, Ordering::SeqCst);
        write!(f, "counted")
    }
}

#[test]
#[serial]
fn test_integration_filtered_macros_do_not_format() {
    let entries = capture(LogSeverity::Warn);
    FORMAT_COUNT.store(0, Ordering::SeqCst);

    culling_debug!("test", "debug {}", Counted);
    culling_info!("test", "info {}", Counted);
    assert_eq!(FORMAT_COUNT.load(Ordering::SeqCst), 0);
    assert!(entries.lock().unwrap().is_empty());

    culling_warn!("test", "warn {}", Counted);
    assert_eq!(FORMAT_COUNT.load(Ordering::SeqCst), 1);

    {
        let captured_entries = entries.lock().unwrap();
        assert_eq!(captured_entries.len(), 1);
        assert_eq!(captured_entries[0].severity, LogSeverity::Warn);
        assert_eq!(captured_entries[0].message, "warn counted");
        assert_eq!(captured_entries[0].file, None);
    }

    restore();
}

// ============================================================================
// CULLING DIAGNOSTICS
// ============================================================================

#[test]
#[serial]
fn test_integration_frustum_rebuild_traced() {
    let entries = capture(LogSeverity::Trace);

    let _frustum = perspective();
    let _extracted = Frustum::from_view_projection(&Mat4::IDENTITY);

    {
        let captured_entries = entries.lock().unwrap();
        assert_eq!(captured_entries.len(), 2);
        for entry in captured_entries.iter() {
            assert_eq!(entry.severity, LogSeverity::Trace);
            assert_eq!(entry.source, "galaxy3d::Frustum");
        }
        assert!(captured_entries[0].message.starts_with("Perspective frustum"));
    }

    restore();
}

#[test]
#[serial]
fn test_integration_frustum_rebuild_silent_by_default() {
    let entries = capture(LogSeverity::Info);

    let _frustum = perspective();
    assert!(entries.lock().unwrap().is_empty());

    restore();
}

#[test]
#[serial]
fn test_integration_extra_plane_edits_logged_at_debug() {
    let mut frustum = perspective();
    let entries = capture(LogSeverity::Debug);

    frustum.set_plane(Planes::Extra0, Vec3::X, Vec3::ZERO);
    frustum.clear_plane(Planes::Extra0);
    // Standard slots are not reported
    frustum.set_plane(Planes::Near, Vec3::Z, Vec3::new(0.0, 0.0, 0.5));

    {
        let captured_entries = entries.lock().unwrap();
        assert_eq!(captured_entries.len(), 2);
        assert_eq!(captured_entries[0].severity, LogSeverity::Debug);
        assert_eq!(captured_entries[0].source, "galaxy3d::Frustum");
        assert!(captured_entries[0].message.contains("Extra0"));
        assert!(captured_entries[1].message.contains("cleared"));
    }

    restore();
}

#[test]
#[serial]
fn test_integration_queries_never_log() {
    let frustum = perspective();
    let entries = capture(LogSeverity::Trace);

    for i in 0..64 {
        let center = Vec3::new(i as f32 * 10.0 - 320.0, 0.0, 50.0);
        let _ = frustum.is_sphere_inside(center, 1.0);
        let _ = frustum.culling_plane(center, 1.0);
        let _ = frustum.intersect_near_plane(center, 1.0);
    }
    assert!(entries.lock().unwrap().is_empty());

    restore();
}

#[test]
#[serial]
fn test_integration_validation_error_logged_with_location() {
    let entries = capture(LogSeverity::Info);

    let mut desc = FrustumDesc::default();
    desc.far_distance = desc.near_distance;
    let result = Frustum::try_from_desc(&desc);
    assert!(matches!(result, Err(Error::InvalidProjection(_))));

    {
        let captured_entries = entries.lock().unwrap();
        assert_eq!(captured_entries.len(), 1);

        let entry = &captured_entries[0];
        assert_eq!(entry.severity, LogSeverity::Error);
        assert_eq!(entry.source, "galaxy3d::FrustumDesc");
        assert!(entry.message.starts_with("Invalid projection:"));
        assert!(entry.file.is_some_and(|file| file.ends_with("projection.rs")));
        assert!(entry.line.is_some());
    }

    restore();
}

#[test]
#[serial]
fn test_integration_valid_desc_logs_nothing() {
    let entries = capture(LogSeverity::Info);

    assert!(Frustum::try_from_desc(&FrustumDesc::default()).is_ok());
    assert!(entries.lock().unwrap().is_empty());

    restore();
}
