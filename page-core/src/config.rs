//! Editor configuration.

use serde::{Deserialize, Serialize};

use crate::document::DEFAULT_DUPLICATE_OFFSET;
use crate::element::Position;
use crate::error::{EditorError, EditorResult};
use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::selection::EditGranularity;

/// Where externally generated blocks land by default.
pub const DEFAULT_INSERT_POSITION: Position = Position::new(50, 50);

/// Tunables for one editing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Maximum entries on each history stack.
    pub history_capacity: usize,
    /// History entries per field change or per committed edit group.
    pub edit_granularity: EditGranularity,
    /// Offset applied to duplicated elements.
    pub duplicate_offset: (i32, i32),
    /// Position of blocks inserted by the generation subsystem.
    pub insert_position: Position,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            edit_granularity: EditGranularity::default(),
            duplicate_offset: DEFAULT_DUPLICATE_OFFSET,
            insert_position: DEFAULT_INSERT_POSITION,
        }
    }
}

impl EditorConfig {
    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Config`] if the history capacity is zero.
    pub fn validate(&self) -> EditorResult<()> {
        if self.history_capacity == 0 {
            return Err(EditorError::Config(
                "history_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails validation.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.history_capacity, 50);
        assert_eq!(config.edit_granularity, EditGranularity::PerField);
        assert_eq!(config.duplicate_offset, (20, 20));
        assert_eq!(config.insert_position, Position::new(50, 50));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json(r#"{"edit_granularity":"per-commit"}"#)
            .expect("should parse");
        assert_eq!(config.edit_granularity, EditGranularity::PerCommit);
        assert_eq!(config.history_capacity, 50);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = EditorConfig::from_json(r#"{"history_capacity":0}"#).unwrap_err();
        assert_eq!(err.code(), "config_error");
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(EditorConfig::from_json(r#"{"autosave":true}"#).is_err());
    }
}
