use crate::Signal;
use crate::error::SignalError;

/// **VALUE**: Verifies each signal maps to the name nats-server expects.
///
/// **WHY THIS MATTERS**: These names are what `nats-server --signal` accepts. A typo would
/// make a future delivery mechanism silently send the wrong command.
///
/// **BUG THIS CATCHES**: Would catch if `ldm` or `reload` is renamed.
#[test]
fn given_signals_when_named_then_match_nats_server_vocabulary() {
    assert_eq!(Signal::LameDuckMode.as_str(), "ldm");
    assert_eq!(Signal::Reload.as_str(), "reload");
    assert_eq!(Signal::LameDuckMode.to_string(), "ldm");
}

/// **VALUE**: Verifies every signal parses back from its own name.
///
/// **BUG THIS CATCHES**: Would catch if `FromStr` and `as_str` drift apart.
#[test]
fn given_signal_names_when_parsed_then_return_matching_signal() {
    for signal in Signal::ALL {
        let parsed: Signal = signal.as_str().parse().unwrap();
        assert_eq!(parsed, signal);
    }
}

/// **VALUE**: Verifies unknown names are rejected with the offending name in the message.
///
/// **BUG THIS CATCHES**: Would catch if parsing falls back to a default signal.
#[test]
fn given_unknown_name_when_parsed_then_returns_unknown_error() {
    // GIVEN: A name nats-server does not know
    // WHEN: Parsing
    let result = "quit".parse::<Signal>();

    // THEN: Should return an Unknown error naming the input
    match result {
        Err(SignalError::Unknown { message, .. }) => {
            assert!(message.contains("'quit'"));
        }
        Ok(signal) => panic!("Expected error, parsed {signal:?}"),
    }
}

/// **VALUE**: Verifies `from_name` blames the line that asked for an unknown signal.
///
/// **WHY THIS MATTERS**: The location is the only pointer back to the test with the typo.
///
/// **BUG THIS CATCHES**: Would catch if `#[track_caller]` is removed from `from_name`, or if
/// the location is captured somewhere `#[track_caller]` does not reach.
#[test]
fn given_unknown_name_when_looked_up_then_error_attributed_to_call_site() {
    // GIVEN: A name nats-server does not know
    // WHEN: Looking it up directly
    let expected_line = line!() + 1;
    let result = Signal::from_name("quit");

    // THEN: Location is this file and line
    match result {
        Err(SignalError::Unknown { location, .. }) => {
            assert!(location.file.ends_with("signal.rs"), "got {}", location.file);
            assert!(location.file.contains("tests"));
            assert_eq!(location.line, expected_line);
        }
        Ok(signal) => panic!("Expected error, got {signal:?}"),
    }
}

/// **VALUE**: Verifies `from_name` accepts both known names.
#[test]
fn given_known_names_when_looked_up_then_return_signals() {
    assert_eq!(Signal::from_name("ldm").unwrap(), Signal::LameDuckMode);
    assert_eq!(Signal::from_name("reload").unwrap(), Signal::Reload);
}
