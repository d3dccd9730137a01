//! Shared building blocks for the NATS test-support workspace.
//!
//! This crate holds the small value types that every other crate in the
//! workspace depends on. It has no knowledge of servers, ports, or URLs.
//!
//! ## Architecture
//!
//! - **common** (this crate): Call-site tracking for error reporting
//! - **nats-server**: The test-server handle and its failure reporting

pub mod error;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
