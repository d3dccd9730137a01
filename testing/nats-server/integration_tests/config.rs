use nats_server::HarnessConfig;
use nats_server::config::{CONFIG_FILE_VARIABLE, PORT_VARIABLE};
use nats_server::error::ConfigError;

use std::env;
use std::path::PathBuf;

use serial_test::serial;

// Process environment is global, so every test here runs serially.

fn set_env(name: &str, value: &str) {
    // SAFETY: serialized by #[serial]; no other thread reads these variables.
    unsafe { env::set_var(name, value) };
}

fn clear_env() {
    // SAFETY: serialized by #[serial]; no other thread reads these variables.
    unsafe {
        env::remove_var(PORT_VARIABLE);
        env::remove_var(CONFIG_FILE_VARIABLE);
    }
}

/// **VALUE**: Verifies `from_env` reads the variables a CI harness exports.
///
/// **BUG THIS CATCHES**: Would catch if `from_env` stops consulting the process environment.
#[test]
#[serial]
fn given_exported_variables_when_loaded_from_env_then_populated() {
    // GIVEN: Exported harness variables
    clear_env();
    set_env(PORT_VARIABLE, "7422");
    set_env(CONFIG_FILE_VARIABLE, "/tmp/nats.conf");

    // WHEN: Loading
    let config = HarnessConfig::from_env().unwrap();

    // THEN: Both fields are populated
    assert_eq!(config.port, Some(7422));
    assert_eq!(config.config_file, Some(PathBuf::from("/tmp/nats.conf")));
    clear_env();
}

/// **VALUE**: Verifies an invalid exported port surfaces as a ConfigError.
#[test]
#[serial]
fn given_invalid_exported_port_when_loaded_from_env_then_returns_error() {
    clear_env();
    set_env(PORT_VARIABLE, "not-a-port");

    let result = HarnessConfig::from_env();

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    clear_env();
}

/// **VALUE**: Verifies `from_env` passes its caller's location through to the error.
#[test]
#[serial]
fn given_invalid_exported_port_when_loaded_from_env_then_error_attributed_to_call_site() {
    clear_env();
    set_env(PORT_VARIABLE, "not-a-port");

    let expected_line = line!() + 1;
    let result = HarnessConfig::from_env();

    match result {
        Err(ConfigError::InvalidValue { location, .. }) => {
            assert!(location.file.ends_with("config.rs"), "got {}", location.file);
            assert!(location.file.contains("integration_tests"));
            assert_eq!(location.line, expected_line);
        }
        Ok(config) => panic!("Expected error, got {config:?}"),
    }
    clear_env();
}
