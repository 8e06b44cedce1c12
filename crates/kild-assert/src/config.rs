//! Assertion settings and their TOML loading.
//!
//! Settings are opt-in: nothing is read from disk unless a caller asks for
//! it, and every key falls back to a default when absent.
//!
//! ```toml
//! render = "pretty"      # "compact" (default) or "pretty"
//! panic_on_drop = false  # default true
//! ```

use std::fmt::Debug;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::ConfigError;

/// How values are rendered inside failure messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Render {
    /// Single-line `{:?}` rendering.
    #[default]
    Compact,
    /// Multi-line `{:#?}` rendering.
    Pretty,
}

impl Render {
    pub fn render(&self, value: &dyn Debug) -> String {
        match self {
            Render::Compact => format!("{:?}", value),
            Render::Pretty => format!("{:#?}", value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AssertConfig {
    #[serde(default)]
    pub render: Render,

    /// Whether a [`TestContext`](crate::TestContext) dropped with recorded
    /// failures panics. Defaults to true.
    #[serde(default = "default_panic_on_drop")]
    pub panic_on_drop: bool,
}

fn default_panic_on_drop() -> bool {
    true
}

impl Default for AssertConfig {
    fn default() -> Self {
        Self {
            render: Render::default(),
            panic_on_drop: default_panic_on_drop(),
        }
    }
}

impl AssertConfig {
    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::IoError` if the file cannot be read and
    /// `ConfigError::ConfigParseError` if it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| std::io::Error::new(e.kind(), format!("'{}': {}", path.display(), e)))?;
        toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
            message: format!("'{}': {}", path.display(), e),
        })
    }

    /// Load settings from a TOML file, falling back to defaults when the
    /// file does not exist. Parse errors still fail.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(ConfigError::IoError { source }) if source.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    event = "assert.config.not_found",
                    path = %path.display(),
                    "Using default assertion settings"
                );
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let config = AssertConfig::default();
        assert_eq!(config.render, Render::Compact);
        assert!(config.panic_on_drop);
    }

    #[test]
    fn test_from_toml_str_empty_uses_defaults() {
        let config = AssertConfig::from_toml_str("").unwrap();
        assert_eq!(config, AssertConfig::default());
    }

    #[test]
    fn test_from_toml_str_all_keys() {
        let config = AssertConfig::from_toml_str(
            r#"
            render = "pretty"
            panic_on_drop = false
            "#,
        )
        .unwrap();
        assert_eq!(config.render, Render::Pretty);
        assert!(!config.panic_on_drop);
    }

    #[test]
    fn test_from_toml_str_unknown_render() {
        let err = AssertConfig::from_toml_str(r#"render = "fancy""#).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("assert.toml");
        fs::write(&path, "render = \"pretty\"\n").unwrap();

        let config = AssertConfig::load(&path).unwrap();
        assert_eq!(config.render, Render::Pretty);
        assert!(config.panic_on_drop);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = AssertConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = AssertConfig::load_or_default(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, AssertConfig::default());
    }

    #[test]
    fn test_load_or_default_malformed_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("assert.toml");
        fs::write(&path, "not valid toml [[[").unwrap();

        let err = AssertConfig::load_or_default(&path).unwrap_err();
        assert!(err.to_string().contains("assert.toml"));
    }

    #[test]
    fn test_render_modes() {
        let value = vec![1, 2];
        assert_eq!(Render::Compact.render(&value), "[1, 2]");
        assert_eq!(Render::Pretty.render(&value), "[\n    1,\n    2,\n]");
    }
}
