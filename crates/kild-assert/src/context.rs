//! Binding soft failures to a single `#[test]` function.
//!
//! A [`TestContext`] collects every failure recorded during a test and fails
//! the test once it is over: either explicitly through
//! [`TestContext::finish`] or implicitly when the context is dropped.

use crate::config::AssertConfig;
use crate::errors::TestFailed;
use crate::handle::{Failure, Recorder, TestHandle};

/// Named handle for one test case.
///
/// ```should_panic
/// use kild_assert::{assert, TestContext};
///
/// let t = TestContext::new("sums_match");
/// assert::equal(&t, &4, &(2 + 2));
/// assert::equal(&t, &5, &(2 + 2)); // recorded, test keeps going
/// assert::contains(&t, &[1, 2, 3], &2);
/// // dropping `t` here panics with both the failure and its location
/// ```
#[derive(Debug)]
pub struct TestContext {
    name: String,
    recorder: Recorder,
    finished: bool,
}

impl TestContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, AssertConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: AssertConfig) -> Self {
        let name = name.into();
        tracing::debug!(event = "assert.context.started", test = %name);
        Self {
            name,
            recorder: Recorder::with_config(config),
            finished: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether any failure has been recorded so far.
    pub fn failed(&self) -> bool {
        self.recorder.failed()
    }

    /// Snapshot of the failures recorded so far.
    pub fn failures(&self) -> Vec<Failure> {
        self.recorder.failures()
    }

    /// End the test and report its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`TestFailed`] listing every recorded failure when the test
    /// recorded at least one.
    pub fn finish(mut self) -> Result<(), TestFailed> {
        self.finished = true;
        self.outcome()
    }

    fn outcome(&self) -> Result<(), TestFailed> {
        let failures = self.recorder.take();
        if failures.is_empty() {
            tracing::debug!(event = "assert.context.finished", test = %self.name);
            return Ok(());
        }

        tracing::warn!(
            event = "assert.context.failed",
            test = %self.name,
            failures = failures.len()
        );
        Err(TestFailed {
            name: self.name.clone(),
            failures,
        })
    }
}

impl TestHandle for TestContext {
    fn error(&self, failure: Failure) {
        self.recorder.error(failure);
    }

    fn fatal(&self, failure: Failure) -> ! {
        tracing::error!(
            event = "assert.context.fatal",
            test = %self.name,
            check = %failure.check,
            location = %failure.location,
            message = %failure.message
        );
        self.recorder.fatal(failure)
    }

    fn config(&self) -> AssertConfig {
        self.recorder.config()
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if self.finished || std::thread::panicking() {
            return;
        }
        if let Err(failed) = self.outcome()
            && self.recorder.config().panic_on_drop
        {
            panic!("{}", failed);
        }
    }
}
