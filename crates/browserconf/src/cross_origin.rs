//! Resolution of `output.crossOriginLoading`.

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::options::CrossOriginMode;

/// Value written to `output.crossOriginLoading`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossOriginLoading {
    /// Serialised as `false`
    Disabled,
    Anonymous,
    UseCredentials,
}

impl CrossOriginLoading {
    pub fn to_value(self) -> Value {
        match self {
            Self::Disabled => Value::Bool(false),
            Self::Anonymous => Value::String("anonymous".to_string()),
            Self::UseCredentials => Value::String("use-credentials".to_string()),
        }
    }
}

impl Serialize for CrossOriginLoading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Disabled => serializer.serialize_bool(false),
            Self::Anonymous => serializer.serialize_str("anonymous"),
            Self::UseCredentials => serializer.serialize_str("use-credentials"),
        }
    }
}

/// Integrity attributes are only honoured on cross-origin requests, so an
/// integrity build without an explicit mode falls back to `anonymous`.
pub fn resolve_cross_origin(integrity: bool, mode: CrossOriginMode) -> CrossOriginLoading {
    let resolved = match (integrity, mode) {
        (true, CrossOriginMode::None) => CrossOriginLoading::Anonymous,
        (false, CrossOriginMode::None) => CrossOriginLoading::Disabled,
        (_, CrossOriginMode::Anonymous) => CrossOriginLoading::Anonymous,
        (_, CrossOriginMode::UseCredentials) => CrossOriginLoading::UseCredentials,
    };
    tracing::debug!(integrity, ?mode, ?resolved, "resolved cross-origin loading");
    resolved
}
