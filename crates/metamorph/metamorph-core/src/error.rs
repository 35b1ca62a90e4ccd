//! Error types for the morph engine

use serde::{Deserialize, Serialize};

/// Errors reported by the engine and its loaders.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MorphError {
    /// An operation that needs an anchor keyframe ran before any `add`.
    #[error("Cannot {operation}: timeline has no keyframes")]
    EmptyTimeline { operation: String },

    /// Configuration rejected by validation
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Stored timeline document is structurally invalid
    #[error("Invalid timeline: {reason}")]
    InvalidTimeline { reason: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl MorphError {
    pub(crate) fn empty_timeline(operation: &str) -> Self {
        Self::EmptyTimeline {
            operation: operation.to_string(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::EmptyTimeline { .. } => "precondition",
            Self::InvalidConfig { .. } => "config",
            Self::InvalidTimeline { .. } => "validation",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for MorphError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_timeline_message() {
        let error = MorphError::empty_timeline("tick");
        assert_eq!(error.to_string(), "Cannot tick: timeline has no keyframes");
        assert_eq!(error.category(), "precondition");
    }

    #[test]
    fn test_json_errors_convert() {
        let err: MorphError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, MorphError::Serialization { .. }));
        assert_eq!(err.category(), "serialization");
    }

    #[test]
    fn test_serialization() {
        let error = MorphError::InvalidConfig {
            reason: "frame rate".to_string(),
        };
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: MorphError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
