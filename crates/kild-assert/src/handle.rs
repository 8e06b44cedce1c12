//! The test-handle capability and the in-memory [`Recorder`] handle.
//!
//! A handle stands for the currently executing test case. The assertion
//! functions in [`crate::assert`] only ever talk to a handle through
//! [`TestHandle`]; they never keep it past a single call.

use std::fmt;
use std::panic::Location;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::AssertConfig;

/// Which predicate produced a [`Failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    Error,
    NoError,
    Zero,
    NotZero,
    Equal,
    NotEqual,
    Contains,
    NotContains,
}

impl Check {
    pub fn as_str(&self) -> &'static str {
        match self {
            Check::Error => "error",
            Check::NoError => "no_error",
            Check::Zero => "zero",
            Check::NotZero => "not_zero",
            Check::Equal => "equal",
            Check::NotEqual => "not_equal",
            Check::Contains => "contains",
            Check::NotContains => "not_contains",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failed assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Predicate that failed.
    pub check: Check,
    /// Human readable failure message.
    pub message: String,
    /// Source position of the code that called the predicate.
    pub location: &'static Location<'static>,
}

impl Failure {
    /// Build a failure located at the caller.
    #[track_caller]
    pub fn new(check: Check, message: impl Into<String>) -> Self {
        Self {
            check,
            message: message.into(),
            location: Location::caller(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.location.file(),
            self.location.line(),
            self.location.column(),
            self.message
        )
    }
}

/// Capability object representing the current test's execution context.
///
/// Implementations use interior mutability so a handle can be passed around
/// by shared reference, the way a test body holds it.
pub trait TestHandle {
    /// Marks the calling frame as an assertion helper.
    ///
    /// Locations are already attributed to the caller through
    /// `#[track_caller]`; adapters over runners that keep their own frame
    /// bookkeeping hook in here.
    fn helper(&self) {}

    /// Records a failure. The test keeps running.
    fn error(&self, failure: Failure);

    /// Records a failure and stops the test immediately.
    fn fatal(&self, failure: Failure) -> !;

    /// Settings that shape failure messages.
    fn config(&self) -> AssertConfig {
        AssertConfig::default()
    }
}

impl<H: TestHandle + ?Sized> TestHandle for &H {
    fn helper(&self) {
        (**self).helper()
    }

    fn error(&self, failure: Failure) {
        (**self).error(failure)
    }

    fn fatal(&self, failure: Failure) -> ! {
        (**self).fatal(failure)
    }

    fn config(&self) -> AssertConfig {
        (**self).config()
    }
}

impl<H: TestHandle + ?Sized> TestHandle for Box<H> {
    fn helper(&self) {
        (**self).helper()
    }

    fn error(&self, failure: Failure) {
        (**self).error(failure)
    }

    fn fatal(&self, failure: Failure) -> ! {
        (**self).fatal(failure)
    }

    fn config(&self) -> AssertConfig {
        (**self).config()
    }
}

impl<H: TestHandle + ?Sized> TestHandle for Arc<H> {
    fn helper(&self) {
        (**self).helper()
    }

    fn error(&self, failure: Failure) {
        (**self).error(failure)
    }

    fn fatal(&self, failure: Failure) -> ! {
        (**self).fatal(failure)
    }

    fn config(&self) -> AssertConfig {
        (**self).config()
    }
}

/// Thread-safe handle that keeps every failure in memory.
///
/// Useful on its own for checking what an assertion reported, and as the
/// storage behind [`TestContext`](crate::TestContext).
#[derive(Debug, Default)]
pub struct Recorder {
    failures: Mutex<Vec<Failure>>,
    config: AssertConfig,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AssertConfig) -> Self {
        Self {
            failures: Mutex::new(Vec::new()),
            config,
        }
    }

    /// Whether any failure has been recorded.
    pub fn failed(&self) -> bool {
        !self.lock().is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.lock().len()
    }

    /// Snapshot of the recorded failures, oldest first.
    pub fn failures(&self) -> Vec<Failure> {
        self.lock().clone()
    }

    /// Recorded failure messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|f| f.message.clone()).collect()
    }

    /// Drain the recorded failures, leaving the recorder clean.
    pub fn take(&self) -> Vec<Failure> {
        std::mem::take(&mut *self.lock())
    }

    // A panic while holding the lock cannot leave the Vec half-written,
    // so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Vec<Failure>> {
        self.failures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TestHandle for Recorder {
    fn error(&self, failure: Failure) {
        self.lock().push(failure);
    }

    fn fatal(&self, failure: Failure) -> ! {
        let rendered = failure.to_string();
        self.lock().push(failure);
        panic!("{}", rendered);
    }

    fn config(&self) -> AssertConfig {
        self.config
    }
}
