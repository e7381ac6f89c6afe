//! Error types for option loading and the collaborator seams.
//!
//! Assembly itself never fails. These errors only surface where data
//! crosses into or out of the decision layer.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Input shape errors (caller contract violations)
    #[error("invalid value for `{field}`{}", format_hint(.hint))]
    InvalidValue { field: String, hint: Option<String> },

    // Version detection
    #[error("unsupported bundler version: {0:?}")]
    UnsupportedBundlerVersion(String),

    // Reading plugin specs back out of a resolved configuration
    #[error("unknown plugin entry at position {index}: {message}")]
    UnknownPlugin { index: usize, message: String },

    // Plugin construction collaborator
    #[error("failed to construct plugin `{plugin}`: {message}")]
    PluginConstruction { plugin: String, message: String },
}

fn format_hint(hint: &Option<String>) -> String {
    hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default()
}

impl ConfigError {
    pub(crate) fn invalid_value(field: impl Into<String>, err: impl ToString) -> Self {
        Self::InvalidValue {
            field: field.into(),
            hint: Some(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_includes_hint() {
        let err = ConfigError::invalid_value("crossOrigin", "unknown variant `maybe`");
        assert_eq!(
            err.to_string(),
            "invalid value for `crossOrigin`: unknown variant `maybe`"
        );
    }

    #[test]
    fn invalid_value_without_hint() {
        let err = ConfigError::InvalidValue {
            field: "options".to_string(),
            hint: None,
        };
        assert_eq!(err.to_string(), "invalid value for `options`");
    }
}
