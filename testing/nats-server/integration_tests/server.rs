use nats_server::error::ServerError;
use nats_server::{FailureReporter, HarnessConfig, NatsServer, RecordingReporter, Signal};

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// Public API tests for the test-server handle
// These test the PUBLIC interface from a test suite's perspective
// ============================================================================

fn recording_server() -> (NatsServer, RecordingReporter) {
    let reporter = RecordingReporter::new();
    (NatsServer::with_reporter(reporter.clone()), reporter)
}

// ----------------------------------------------------------------------------
// start()
// ----------------------------------------------------------------------------

/// **VALUE**: Verifies the canonical example: port 4222 yields `nats://localhost:4222`.
///
/// **WHY THIS MATTERS**: This is the URL every test hands to its NATS client.
///
/// **BUG THIS CATCHES**: Would catch a wrong host, scheme, or separator in the client URL.
#[test]
fn given_new_handle_when_started_on_4222_then_client_url_is_nats_localhost() {
    // GIVEN: An unbound handle
    let (mut server, reporter) = recording_server();

    // WHEN: Binding to the default NATS port
    server.start(4222, None);

    // THEN: Client URL points at localhost, websocket URL stays empty
    assert_eq!(server.client_url(), "nats://localhost:4222");
    assert_eq!(server.client_websocket_url(), "");
    assert_eq!(server.port(), Some(4222));
    assert!(server.is_bound());
    assert!(!server.tls_enabled());
    assert!(reporter.is_empty());
}

/// **VALUE**: Verifies every strictly positive port binds and derives a matching URL.
///
/// **BUG THIS CATCHES**: Would catch off-by-one validation (rejecting 1) or truncation of
/// large values.
#[test]
fn given_positive_ports_when_started_then_each_binds() {
    for port in [1, 80, 4222, 65535, i32::MAX] {
        // GIVEN: An unbound handle
        let (mut server, reporter) = recording_server();

        // WHEN: Starting
        server.start(port, None);

        // THEN: Bound with the matching URL
        assert_eq!(server.port(), Some(port as u32));
        assert_eq!(server.client_url(), format!("nats://localhost:{port}"));
        assert!(reporter.is_empty(), "Port {port} should not be reported");
    }
}

/// **VALUE**: Verifies non-positive ports are reported once each and never bind.
///
/// **WHY THIS MATTERS**: A test that forgot to configure its port must fail loudly instead
/// of connecting to `nats://localhost:0`.
///
/// **BUG THIS CATCHES**: Would catch if validation uses `< 0`, or reports more than once.
#[test]
fn given_non_positive_ports_when_started_then_reports_exactly_one_failure_each() {
    for port in [0, -1, -4222, i32::MIN] {
        // GIVEN: An unbound handle
        let (mut server, reporter) = recording_server();

        // WHEN: Starting with an invalid port
        server.start(port, None);

        // THEN: One InvalidPort failure, still unbound
        let failures = reporter.failures();
        assert_eq!(failures.len(), 1, "Port {port} should be reported once");
        match &failures[0] {
            ServerError::InvalidPort {
                port: reported,
                message,
                ..
            } => {
                assert_eq!(*reported, port);
                assert!(message.contains("positive port"));
            }
        }
        assert_eq!(server.port(), None);
        assert_eq!(server.client_url(), "");
    }
}

/// **VALUE**: Verifies an invalid `start` on a bound handle keeps the previous binding.
///
/// **BUG THIS CATCHES**: Would catch if state is cleared before the port is validated.
#[test]
fn given_bound_handle_when_started_with_invalid_port_then_previous_port_kept() {
    // GIVEN: A handle bound to 4222
    let (mut server, reporter) = recording_server();
    server.start(4222, None);

    // WHEN: Starting with port 0
    server.start(0, None);

    // THEN: Still bound to 4222, one failure reported
    assert_eq!(server.port(), Some(4222));
    assert_eq!(server.client_url(), "nats://localhost:4222");
    assert_eq!(reporter.failure_count(), 1);
}

/// **VALUE**: Verifies failures are attributed to the test line that called `start`.
///
/// **WHY THIS MATTERS**: The failure message is the only pointer a developer gets to the
/// broken test. It must name the test file, not a line inside this crate.
///
/// **BUG THIS CATCHES**: Would catch if `#[track_caller]` is removed from `start`.
#[test]
fn given_invalid_port_when_started_then_failure_attributed_to_call_site() {
    // GIVEN: An unbound handle
    let (mut server, reporter) = recording_server();

    // WHEN: Starting with a bad port
    let expected_line = line!() + 1;
    server.start(-1, None);

    // THEN: Location is this file and line
    let location = reporter.failures()[0].location();
    assert!(location.file.ends_with("server.rs"), "got {}", location.file);
    assert!(location.file.contains("integration_tests"));
    assert_eq!(location.line, expected_line);
}

/// **VALUE**: Verifies rebinding replaces the port without any trace of the old one.
///
/// **BUG THIS CATCHES**: Would catch if `start` refuses to rebind a bound handle.
#[test]
fn given_bound_handle_when_started_on_other_port_then_rebinds() {
    // GIVEN: A handle bound to 5222
    let (mut server, reporter) = recording_server();
    server.start(5222, None);

    // WHEN: Binding to 5333
    server.start(5333, None);

    // THEN: Only 5333 remains
    assert_eq!(server.port(), Some(5333));
    assert_eq!(server.client_url(), "nats://localhost:5333");
    assert!(reporter.is_empty());
}

/// **VALUE**: Verifies a config file path does not influence the derived URLs.
///
/// **BUG THIS CATCHES**: Would catch if TLS or websocket settings start being inferred from
/// `cfg` without an explicit option.
#[test]
fn given_config_file_when_started_then_urls_unchanged() {
    let (mut server, _reporter) = recording_server();

    server.start(4222, Some(Path::new("tests/configs/tls.conf")));

    assert_eq!(server.client_url(), "nats://localhost:4222");
    assert_eq!(server.client_websocket_url(), "");
    assert!(!server.tls_enabled());
}

// ----------------------------------------------------------------------------
// start_with_config()
// ----------------------------------------------------------------------------

/// **VALUE**: Verifies a harness config with a port binds like `start`.
#[test]
fn given_harness_config_with_port_when_started_then_binds() {
    let (mut server, reporter) = recording_server();
    let config = HarnessConfig::new(6222).with_config_file("nats.conf");

    server.start_with_config(&config);

    assert_eq!(server.port(), Some(6222));
    assert!(reporter.is_empty());
}

/// **VALUE**: Verifies a harness config without a port is reported as port -1.
///
/// **WHY THIS MATTERS**: A CI job that forgot to export the port must fail the test that
/// relies on it, attributed to that test.
#[test]
fn given_harness_config_without_port_when_started_then_reports_default_port() {
    let (mut server, reporter) = recording_server();

    server.start_with_config(&HarnessConfig::default());

    match &reporter.failures()[..] {
        [ServerError::InvalidPort { port, location, .. }] => {
            assert_eq!(*port, -1);
            assert!(location.file.ends_with("server.rs"));
        }
        other => panic!("Expected one InvalidPort failure, got {other:?}"),
    }
    assert!(!server.is_bound());
}

// ----------------------------------------------------------------------------
// stop()
// ----------------------------------------------------------------------------

/// **VALUE**: Verifies `stop` unbinds a bound handle and clears both URLs.
#[test]
fn given_bound_handle_when_stopped_then_unbound() {
    // GIVEN: A bound handle
    let (mut server, _reporter) = recording_server();
    server.start(4222, None);

    // WHEN: Stopping
    server.stop();

    // THEN: Unbound
    assert_eq!(server.port(), None);
    assert_eq!(server.client_url(), "");
    assert_eq!(server.client_websocket_url(), "");
    assert!(!server.is_bound());
}

/// **VALUE**: Verifies `stop` is idempotent and safe on a never-bound handle.
///
/// **BUG THIS CATCHES**: Would catch if stopping an unbound handle panics or reports.
#[test]
fn given_unbound_handle_when_stopped_twice_then_still_unbound_without_failures() {
    let (mut server, reporter) = recording_server();

    server.stop();
    server.stop();

    assert_eq!(server.port(), None);
    assert_eq!(server.client_url(), "");
    assert!(reporter.is_empty());
}

/// **VALUE**: Verifies a stopped handle can be bound again.
#[test]
fn given_stopped_handle_when_started_then_bound_again() {
    let (mut server, _reporter) = recording_server();
    server.start(4222, None);
    server.stop();

    server.start(4223, None);

    assert_eq!(server.client_url(), "nats://localhost:4223");
}

// ----------------------------------------------------------------------------
// send_signal()
// ----------------------------------------------------------------------------

/// **VALUE**: Verifies signals never change state or URLs, bound or unbound.
///
/// **WHY THIS MATTERS**: The handle does not own a process. A signal that silently unbound
/// the handle would break the test that sent it.
#[test]
fn given_any_state_when_signal_sent_then_state_unchanged() {
    let (mut server, reporter) = recording_server();

    for signal in Signal::ALL {
        // Unbound
        server.send_signal(signal);
        assert_eq!(server.port(), None);
        assert_eq!(server.client_url(), "");

        // Bound
        server.start(4222, None);
        server.send_signal(signal);
        assert_eq!(server.port(), Some(4222));
        assert!(!server.tls_enabled());
        assert_eq!(server.client_url(), "nats://localhost:4222");
        assert_eq!(server.client_websocket_url(), "");
        server.stop();
    }

    assert!(reporter.is_empty());
}

// ----------------------------------------------------------------------------
// Drop
// ----------------------------------------------------------------------------

/// **VALUE**: Verifies dropping a bound handle releases everything it holds.
///
/// **BUG THIS CATCHES**: Would catch a `Drop` that leaks the reporter or panics on a
/// bound handle.
#[test]
fn given_bound_handle_when_dropped_then_reporter_released() {
    // GIVEN: A bound handle sharing its reporter
    let reporter = Arc::new(RecordingReporter::new());
    let shared: Arc<dyn FailureReporter> = reporter.clone();
    let mut server = NatsServer::with_shared_reporter(shared);
    server.start(4222, None);
    assert_eq!(Arc::strong_count(&reporter), 2);

    // WHEN: The handle goes out of scope
    drop(server);

    // THEN: Only our reference remains, nothing was reported
    assert_eq!(Arc::strong_count(&reporter), 1);
    assert!(reporter.is_empty());
}

/// **VALUE**: Verifies a fresh handle always starts in the unbound state.
///
/// **WHY THIS MATTERS**: Each test builds its own handle; none may observe a binding left
/// behind by a previous test.
#[test]
fn given_dropped_bound_handle_when_new_handle_created_then_unbound() {
    {
        let mut server = NatsServer::new();
        server.start(4222, None);
    }

    let server = NatsServer::new();

    assert_eq!(server.port(), None);
    assert_eq!(server.client_url(), "");
    assert_eq!(server.client_websocket_url(), "");
}

/// **VALUE**: Verifies the default reporter lets the test continue, then fails it at scope exit.
///
/// **WHY THIS MATTERS**: `start` is non-throwing. With the default reporter a bad port must
/// still end up failing the test, or the mistake would go unnoticed.
///
/// **BUG THIS CATCHES**: Would catch if `NatsServer::new()` stops using `DeferredReporter`.
#[test]
fn given_default_reporter_when_invalid_port_used_then_fails_on_drop() {
    // GIVEN: A handle with the default reporter
    let mut server = NatsServer::new();

    // WHEN: Starting with a bad port, then continuing
    server.start(0, None);
    assert_eq!(server.port(), None, "start should return normally");

    // THEN: Dropping the handle panics with the failure
    let result = catch_unwind(AssertUnwindSafe(move || drop(server)));
    let payload = result.unwrap_err();
    let message = payload.downcast_ref::<String>().unwrap();
    assert!(message.contains("Invalid Port Error"));
}

/// **VALUE**: Verifies `Debug` output shows the state fields.
#[test]
fn given_bound_handle_when_debug_formatted_then_shows_port() {
    let (mut server, _reporter) = recording_server();
    server.start(4222, None);

    let rendered = format!("{server:?}");

    assert!(rendered.starts_with("NatsServer"));
    assert!(rendered.contains("4222"));
    assert!(rendered.contains("tls_enabled: false"));
}
