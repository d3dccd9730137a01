//! Test-failure reporting for [`NatsServer`](crate::NatsServer).
//!
//! A handle never returns errors to the test that misuses it. It hands a
//! [`ServerError`] to its reporter and carries on with its state untouched.
//! What "failing the test" means is up to the reporter:
//!
//! - [`DeferredReporter`] (the default) logs immediately and fails the test
//!   when the handle goes out of scope
//! - [`PanicReporter`] fails the test on the spot
//! - [`RecordingReporter`] only records, so tests can assert on what was reported
//!
//! Any `Fn(&ServerError) + Send + Sync` closure is also a reporter.

use crate::error::ServerError;

use std::sync::{Arc, Mutex, PoisonError};
use std::thread::panicking;

use log::error;

/// Channel through which a handle reports misuse by test code.
pub trait FailureReporter: Send + Sync {
    fn report_failure(&self, failure: &ServerError);
}

impl<F> FailureReporter for F
where
    F: Fn(&ServerError) + Send + Sync,
{
    fn report_failure(&self, failure: &ServerError) {
        self(failure)
    }
}

/// Records every reported failure for later inspection.
///
/// Clones share the same list, so a test can keep one clone and hand the
/// other to [`NatsServer::with_reporter`](crate::NatsServer::with_reporter).
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    failures: Arc<Mutex<Vec<ServerError>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the failures reported so far, oldest first.
    pub fn failures(&self) -> Vec<ServerError> {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn failure_count(&self) -> usize {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.failure_count() == 0
    }

    pub fn clear(&self) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl FailureReporter for RecordingReporter {
    fn report_failure(&self, failure: &ServerError) {
        error!("{failure}");
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(failure.clone());
    }
}

/// Fails the current test immediately by panicking with the failure message.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicReporter;

impl FailureReporter for PanicReporter {
    fn report_failure(&self, failure: &ServerError) {
        panic!("{failure}");
    }
}

/// Lets the test keep running after a failure, then fails it at scope exit.
///
/// Each failure is logged as it happens. When the reporter is dropped with
/// failures outstanding it panics with all of them, unless the thread is
/// already unwinding from another panic.
#[derive(Debug, Default)]
pub struct DeferredReporter {
    failures: Mutex<Vec<ServerError>>,
}

impl DeferredReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failure_count(&self) -> usize {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Takes the outstanding failures, so dropping the reporter no longer panics.
    pub fn take_failures(&self) -> Vec<ServerError> {
        std::mem::take(
            &mut *self
                .failures
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }
}

impl FailureReporter for DeferredReporter {
    fn report_failure(&self, failure: &ServerError) {
        error!("{failure}");
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(failure.clone());
    }
}

impl Drop for DeferredReporter {
    fn drop(&mut self) {
        let failures = self.take_failures();
        if failures.is_empty() || panicking() {
            return;
        }

        let rendered: Vec<String> = failures.iter().map(ToString::to_string).collect();
        panic!(
            "{} test failure(s) reported:\n{}",
            rendered.len(),
            rendered.join("\n")
        );
    }
}
