use nats_server::logger::{LOG_FILE_NAME, initialize};

use log::{LevelFilter, info};

/// **VALUE**: Verifies the logger installs once, writes to its file, and tolerates repeat calls.
///
/// **WHY THIS MATTERS**: Shared test helpers call `initialize` from every test. The first
/// call must install the logger and every later call must be a harmless no-op.
///
/// **BUG THIS CATCHES**: Would catch if the file dispatch is dropped or the guard is removed,
/// causing fern to fail when a global logger is already set.
#[test]
fn given_log_dir_when_initialized_twice_then_writes_file_and_returns_ok() {
    // GIVEN: A scratch log directory
    let log_dir = tempfile::tempdir().unwrap();

    // WHEN: Initializing twice and logging
    let first = initialize(LevelFilter::Debug, Some(log_dir.path()));
    let second = initialize(LevelFilter::Debug, Some(log_dir.path()));
    info!("integration logger check");
    log::logger().flush();

    // THEN: Both calls succeed and the file exists
    assert!(first.is_ok(), "First initialization should succeed");
    assert!(second.is_ok(), "Second initialization should be a no-op");
    assert!(log_dir.path().join(LOG_FILE_NAME).exists());
}
