//! Error types for editor operations.

use std::fmt;

use thiserror::Error;

use crate::element::ElementId;

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Which history stack an operation tried to consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    /// Undo stack.
    Undo,
    /// Redo stack.
    Redo,
}

impl fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undo => f.write_str("undo"),
            Self::Redo => f.write_str("redo"),
        }
    }
}

/// Errors that can occur in editor operations.
///
/// Every variant is recoverable: a failing operation leaves the document,
/// the selection and the history exactly as they were.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The referenced element is not in the document.
    #[error("Element not found: {0}")]
    NotFound(ElementId),

    /// Creation was requested with a kind outside the palette.
    #[error("Unknown element kind: {0}")]
    InvalidKind(String),

    /// Undo or redo with an empty stack.
    #[error("Nothing to {0}")]
    EmptyHistory(HistoryDirection),

    /// A selection-scoped operation ran with nothing selected.
    #[error("No element selected")]
    NoSelection,

    /// A property value was rejected.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Field being edited.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// External content insertion with an empty payload.
    #[error("No content to insert")]
    EmptyContent,

    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration rejected.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl EditorError {
    /// Create an invalid value error.
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Stable code for logs and host integrations.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::InvalidKind(_) => "invalid_kind",
            Self::EmptyHistory(_) => "empty_history",
            Self::NoSelection => "no_selection",
            Self::InvalidValue { .. } => "invalid_value",
            Self::EmptyContent => "empty_content",
            Self::Serialization(_) => "serialization_error",
            Self::Config(_) => "config_error",
        }
    }

    /// Whether the error is a user-facing condition rather than a fault.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Serialization(_) | Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EditorError::NotFound(ElementId::from_raw(1)).code(), "not_found");
        assert_eq!(EditorError::InvalidKind("x".into()).code(), "invalid_kind");
        assert_eq!(
            EditorError::EmptyHistory(HistoryDirection::Redo).code(),
            "empty_history"
        );
        assert_eq!(EditorError::NoSelection.code(), "no_selection");
    }

    #[test]
    fn test_empty_history_messages() {
        assert_eq!(
            EditorError::EmptyHistory(HistoryDirection::Undo).to_string(),
            "Nothing to undo"
        );
        assert_eq!(
            EditorError::EmptyHistory(HistoryDirection::Redo).to_string(),
            "Nothing to redo"
        );
    }

    #[test]
    fn test_recoverable() {
        assert!(EditorError::NoSelection.is_recoverable());
        assert!(EditorError::EmptyContent.is_recoverable());
        assert!(!EditorError::Config("bad".into()).is_recoverable());
    }

    #[test]
    fn test_from_serde_error() {
        let result: Result<i32, serde_json::Error> = serde_json::from_str("not json");
        let err: EditorError = result.unwrap_err().into();
        assert_eq!(err.code(), "serialization_error");
    }
}
