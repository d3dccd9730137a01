pub mod config;
pub mod logger;
pub mod server;
pub mod signal;

pub use config::ConfigError;
pub use logger::LoggerError;
pub use server::ServerError;
pub use signal::SignalError;
