//! Error types for kild-assert.

use crate::handle::Failure;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config file: {message}")]
    ConfigParseError { message: String },

    #[error("IO error reading config: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParseError {
            message: e.to_string(),
        }
    }
}

/// A value could not be turned into an inspectable tree.
#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    #[error("serialization failed: {message}")]
    Custom { message: String },
}

/// Usage mistakes detected by the membership check.
///
/// These never escape the public predicates; they are rendered into the
/// failure message recorded on the handle.
#[derive(Debug, thiserror::Error)]
pub enum MembershipError {
    #[error("Invalid collection type. Expected sequence or text, got: {type_name}")]
    InvalidCollection { type_name: &'static str },

    #[error("Invalid item type for text collection. Expected text, got: {type_name}")]
    InvalidItem { type_name: &'static str },

    #[error("Cannot inspect item {type_name}: {source}")]
    InvalidItemValue {
        type_name: &'static str,
        #[source]
        source: InspectError,
    },
}

/// Returned by [`TestContext::finish`](crate::TestContext::finish) when the
/// test recorded at least one failure.
#[derive(Debug, thiserror::Error)]
#[error("{}", render_summary(.name, .failures))]
pub struct TestFailed {
    pub name: String,
    pub failures: Vec<Failure>,
}

fn render_summary(name: &str, failures: &[Failure]) -> String {
    let mut out = format!("test '{}' recorded {} failure(s)", name, failures.len());
    for failure in failures {
        out.push_str("\n\n");
        out.push_str(&failure.to_string());
    }
    out
}
