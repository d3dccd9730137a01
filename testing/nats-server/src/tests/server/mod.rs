// Unit tests for URL derivation from state no public operation can reach yet
// Lifecycle tests for the public API are in integration_tests/server.rs

mod signal;

use crate::{NatsServer, RecordingReporter};

use std::num::NonZeroU32;

fn bound_server(port: i32) -> NatsServer {
    let mut server = NatsServer::with_reporter(RecordingReporter::new());
    server.start(port, None);
    server
}

/// **VALUE**: Verifies the TLS flag switches the client URL scheme to `tls://`.
///
/// **WHY THIS MATTERS**: TLS is kept as an extension point. When a future `start` option
/// enables it, clients must receive a secure URL without further changes to derivation.
///
/// **BUG THIS CATCHES**: Would catch if the scheme selection ignores `tls_enabled` or
/// swaps the two prefixes.
#[test]
fn given_tls_enabled_when_client_url_read_then_uses_tls_scheme() {
    // GIVEN: A bound handle with TLS switched on
    let mut server = bound_server(4443);
    server.set_transport(None, true);

    // WHEN: Reading the client URL
    let url = server.client_url();

    // THEN: Should use the secure scheme
    assert_eq!(url, "tls://localhost:4443");
}

/// **VALUE**: Verifies a websocket port produces a `ws://` URL.
///
/// **BUG THIS CATCHES**: Would catch if the websocket URL reads the TCP port instead of
/// the websocket port.
#[test]
fn given_websocket_port_when_websocket_url_read_then_uses_ws_scheme() {
    // GIVEN: A bound handle with a websocket port
    let mut server = bound_server(4222);
    server.set_transport(NonZeroU32::new(8080), false);

    // WHEN / THEN: Websocket URL points at the websocket port
    assert_eq!(server.client_websocket_url(), "ws://localhost:8080");
    assert_eq!(server.client_url(), "nats://localhost:4222");
}

/// **VALUE**: Verifies TLS plus a websocket port produces a `wss://` URL.
///
/// **BUG THIS CATCHES**: Would catch if only the raw-protocol URL honors the TLS flag.
#[test]
fn given_websocket_port_and_tls_when_websocket_url_read_then_uses_wss_scheme() {
    // GIVEN: A bound handle with TLS and a websocket port
    let mut server = bound_server(4222);
    server.set_transport(NonZeroU32::new(8443), true);

    // WHEN / THEN: Both URLs use the secure schemes
    assert_eq!(server.client_websocket_url(), "wss://localhost:8443");
    assert_eq!(server.client_url(), "tls://localhost:4222");
}

/// **VALUE**: Verifies `start` clears transport state left from an earlier binding.
///
/// **WHY THIS MATTERS**: Rebinding must not carry a websocket port or TLS flag over to a
/// server that never offered them.
///
/// **BUG THIS CATCHES**: Would catch if `start` only assigns the port.
#[test]
fn given_transport_state_when_started_again_then_resets_websocket_and_tls() {
    // GIVEN: A handle with websocket and TLS state
    let mut server = bound_server(4222);
    server.set_transport(NonZeroU32::new(8443), true);

    // WHEN: Rebinding to another port
    server.start(5222, None);

    // THEN: Only the new port remains
    assert_eq!(server.port(), Some(5222));
    assert_eq!(server.websocket_port(), None);
    assert!(!server.tls_enabled());
    assert_eq!(server.client_websocket_url(), "");
}

/// **VALUE**: Verifies `stop` clears websocket and TLS state too.
///
/// **BUG THIS CATCHES**: Would catch if `stop` forgets one of the three fields, which would
/// leave a stale websocket URL visible after teardown.
#[test]
fn given_transport_state_when_stopped_then_all_state_cleared() {
    // GIVEN: A handle with every field populated
    let mut server = bound_server(4222);
    server.set_transport(NonZeroU32::new(8443), true);

    // WHEN: Stopping
    server.stop();

    // THEN: Everything is back to the unbound defaults
    assert_eq!(server.port(), None);
    assert_eq!(server.websocket_port(), None);
    assert!(!server.tls_enabled());
    assert_eq!(server.client_url(), "");
    assert_eq!(server.client_websocket_url(), "");
}

/// **VALUE**: Verifies a rejected `start` leaves transport state untouched as well.
///
/// **BUG THIS CATCHES**: Would catch if the reset of websocket/TLS happens before validation.
#[test]
fn given_transport_state_when_started_with_invalid_port_then_state_unchanged() {
    // GIVEN: A handle with every field populated
    let mut server = bound_server(4222);
    server.set_transport(NonZeroU32::new(8443), true);

    // WHEN: Starting with an invalid port
    server.start(0, None);

    // THEN: Nothing moved
    assert_eq!(server.port(), Some(4222));
    assert_eq!(server.websocket_port(), Some(8443));
    assert!(server.tls_enabled());
}
