pub mod config;
pub mod error;
pub mod logger;
pub mod reporter;
pub mod server;

#[cfg(test)]
mod tests;

pub use config::HarnessConfig;
pub use reporter::{DeferredReporter, FailureReporter, PanicReporter, RecordingReporter};
pub use server::{NatsServer, Signal};

pub const NATS_SERVER_HOSTNAME: &str = "localhost";

pub const NATS_SCHEME: &str = "nats";
pub const TLS_SCHEME: &str = "tls";
pub const WS_SCHEME: &str = "ws";
pub const WSS_SCHEME: &str = "wss";

pub const NATS_URL_PREFIX: &str =
    const_format::concatcp!(NATS_SCHEME, "://", NATS_SERVER_HOSTNAME, ":");
pub const TLS_URL_PREFIX: &str =
    const_format::concatcp!(TLS_SCHEME, "://", NATS_SERVER_HOSTNAME, ":");
pub const WS_URL_PREFIX: &str =
    const_format::concatcp!(WS_SCHEME, "://", NATS_SERVER_HOSTNAME, ":");
pub const WSS_URL_PREFIX: &str =
    const_format::concatcp!(WSS_SCHEME, "://", NATS_SERVER_HOSTNAME, ":");
