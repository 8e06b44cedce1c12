//! kild-assert: soft-fail assertion helpers for test suites.
//!
//! Predicates compare values and, on failure, record a message on a test
//! handle instead of panicking, so one test can report every broken
//! expectation in a single run.
//!
//! # Main Entry Points
//!
//! - [`assert`] - `error`, `no_error`, `zero`, `not_zero`, `equal`,
//!   `not_equal`, `contains`, `not_contains`
//! - [`TestContext`] - handle bound to one `#[test]`, fails it at the end
//! - [`Recorder`] - in-memory handle for inspecting what was reported
//! - [`AssertConfig`] - rendering and drop behaviour, loadable from TOML
//!
//! ```
//! use kild_assert::{assert, TestContext};
//!
//! let t = TestContext::new("parse_roundtrip");
//! let parsed: Result<Vec<&str>, String> = Ok(vec!["a", "b"]);
//! if assert::no_error(&t, &parsed) {
//!     let items = parsed.unwrap();
//!     assert::equal(&t, &vec!["a", "b"], &items);
//!     assert::not_contains(&t, &items, "z");
//! }
//! t.finish().unwrap();
//! ```

pub mod assert;
pub mod config;
pub mod context;
pub mod errors;
pub mod handle;
pub mod inspect;
pub mod logging;

pub use assert::MaybeError;
pub use config::{AssertConfig, Render};
pub use context::TestContext;
pub use errors::{ConfigError, InspectError, MembershipError, TestFailed};
pub use handle::{Check, Failure, Recorder, TestHandle};
pub use inspect::{Shape, inspect};
pub use logging::init_test_logging;
