//! Selection tracking and property edits.
//!
//! The editor has a single-selection model: at most one element is selected
//! and selecting another replaces it. Property edits always target the
//! selected element and are expressed as [`PropertyEdit`] values so the
//! session can validate, snapshot and apply them uniformly.

use serde::{Deserialize, Serialize};

use crate::document::{Document, DocumentStore};
use crate::element::{AnimationPatch, AnimationType, ElementId, Position};
use crate::error::{EditorError, EditorResult};

/// Accepted animation durations, in seconds.
pub const DURATION_RANGE: std::ops::RangeInclusive<f32> = 0.1..=5.0;

/// Accepted animation delays, in seconds.
pub const DELAY_RANGE: std::ops::RangeInclusive<f32> = 0.0..=5.0;

/// Style keys that would shadow the element position.
const POSITION_KEYS: [&str; 2] = ["left", "top"];

/// The currently selected element, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<ElementId>,
}

impl Selection {
    /// Nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`, replacing any previous selection.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotFound`] if `id` is not in `document`; the
    /// previous selection is kept in that case.
    pub fn select(&mut self, id: ElementId, document: &Document) -> EditorResult<()> {
        if !document.contains(id) {
            return Err(EditorError::NotFound(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// The selected element.
    #[must_use]
    pub const fn current(&self) -> Option<ElementId> {
        self.selected
    }

    /// The selected element, or [`EditorError::NoSelection`].
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoSelection`] when nothing is selected.
    pub fn require(&self) -> EditorResult<ElementId> {
        self.selected.ok_or(EditorError::NoSelection)
    }

    /// Drop the selection if its element is no longer in `document`.
    pub fn reconcile(&mut self, document: &Document) {
        if let Some(id) = self.selected {
            if !document.contains(id) {
                tracing::debug!(%id, "Selected element gone, clearing selection");
                self.selected = None;
            }
        }
    }
}

/// How property edits map onto history entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditGranularity {
    /// One history entry per field change.
    #[default]
    PerField,
    /// One history entry per committed group of field changes.
    PerCommit,
}

/// A single field change on the selected element.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyEdit {
    /// Set one style property.
    Style {
        /// Property name.
        key: String,
        /// New value.
        value: String,
    },
    /// Set or clear the animation type.
    AnimationType(Option<AnimationType>),
    /// Set the animation duration in seconds.
    AnimationDuration(f32),
    /// Set the animation delay in seconds.
    AnimationDelay(f32),
    /// Move the element.
    Position(Position),
}

impl PropertyEdit {
    /// Style edit shorthand.
    #[must_use]
    pub fn style(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Style {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Check the edit before anything is recorded.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidValue`] for empty style keys, for the
    /// `left`/`top` keys owned by [`Element::position`], and for durations or
    /// delays outside the panel's range.
    ///
    /// [`Element::position`]: crate::element::Element::position
    pub fn validate(&self) -> EditorResult<()> {
        match self {
            Self::Style { key, .. } if key.trim().is_empty() => Err(EditorError::invalid_value(
                "style",
                "property name must not be empty",
            )),
            Self::Style { key, .. }
                if POSITION_KEYS
                    .iter()
                    .any(|k| k.eq_ignore_ascii_case(key.trim())) =>
            {
                Err(EditorError::invalid_value(
                    "style",
                    format!("'{}' is the element position; use a position edit", key.trim()),
                ))
            }
            Self::AnimationDuration(seconds) if !DURATION_RANGE.contains(seconds) => {
                Err(EditorError::invalid_value(
                    "duration",
                    format!("{seconds}s is outside 0.1s..=5s"),
                ))
            }
            Self::AnimationDelay(seconds) if !DELAY_RANGE.contains(seconds) => {
                Err(EditorError::invalid_value(
                    "delay",
                    format!("{seconds}s is outside 0s..=5s"),
                ))
            }
            _ => Ok(()),
        }
    }

    /// Apply the edit to element `id`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotFound`] if the element does not exist.
    pub fn apply(&self, store: &mut DocumentStore, id: ElementId) -> EditorResult<()> {
        match self {
            Self::Style { key, value } => store.update_style(id, key, value),
            Self::AnimationType(kind) => store.update_animation(id, &AnimationPatch::kind(*kind)),
            Self::AnimationDuration(seconds) => {
                store.update_animation(id, &AnimationPatch::duration(*seconds))
            }
            Self::AnimationDelay(seconds) => {
                store.update_animation(id, &AnimationPatch::delay(*seconds))
            }
            Self::Position(position) => store.update_position(id, *position),
        }
    }

    /// Confirmation shown after the edit is applied.
    #[must_use]
    pub fn confirmation(&self) -> String {
        match self {
            Self::Style { key, .. } => format!("Updated {key}"),
            Self::AnimationType(Some(kind)) => format!("Applied {kind} animation"),
            Self::AnimationType(None) => "Animation removed".to_string(),
            Self::AnimationDuration(seconds) => format!("Animation duration set to {seconds}s"),
            Self::AnimationDelay(seconds) => format!("Animation delay set to {seconds}s"),
            Self::Position(_) => "Updated position".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    #[test]
    fn test_select_is_exclusive() {
        let mut store = DocumentStore::new();
        let a = store.create(ElementKind::Text, Position::default());
        let b = store.create(ElementKind::Button, Position::default());

        let mut selection = Selection::new();
        selection.select(a, store.document()).expect("select a");
        selection.select(b, store.document()).expect("select b");
        assert_eq!(selection.current(), Some(b));
    }

    #[test]
    fn test_select_missing_keeps_previous() {
        let mut store = DocumentStore::new();
        let a = store.create(ElementKind::Text, Position::default());

        let mut selection = Selection::new();
        selection.select(a, store.document()).expect("select");
        let err = selection
            .select(ElementId::from_raw(42), store.document())
            .unwrap_err();
        assert!(matches!(err, EditorError::NotFound(_)));
        assert_eq!(selection.current(), Some(a));
    }

    #[test]
    fn test_require_without_selection() {
        assert!(matches!(
            Selection::new().require(),
            Err(EditorError::NoSelection)
        ));
    }

    #[test]
    fn test_reconcile_drops_removed_element() {
        let mut store = DocumentStore::new();
        let a = store.create(ElementKind::Image, Position::default());
        let mut selection = Selection::new();
        selection.select(a, store.document()).expect("select");

        store.remove(a).expect("remove");
        selection.reconcile(store.document());
        assert_eq!(selection.current(), None);
    }

    #[test]
    fn test_validate_bounds() {
        assert!(PropertyEdit::AnimationDuration(0.1).validate().is_ok());
        assert!(PropertyEdit::AnimationDuration(5.0).validate().is_ok());
        assert!(PropertyEdit::AnimationDuration(0.0).validate().is_err());
        assert!(PropertyEdit::AnimationDelay(0.0).validate().is_ok());
        assert!(PropertyEdit::AnimationDelay(-0.5).validate().is_err());
        assert!(PropertyEdit::AnimationDelay(f32::NAN).validate().is_err());
        assert!(PropertyEdit::style(" ", "x").validate().is_err());
    }

    #[test]
    fn test_position_style_keys_rejected() {
        for key in ["left", "top", "Left", " top "] {
            let err = PropertyEdit::style(key, "100px").validate().unwrap_err();
            assert!(matches!(err, EditorError::InvalidValue { ref field, .. } if field == "style"));
        }
        assert!(PropertyEdit::style("marginLeft", "4px").validate().is_ok());
    }

    #[test]
    fn test_confirmation_messages() {
        assert_eq!(
            PropertyEdit::style("backgroundColor", "#fff").confirmation(),
            "Updated backgroundColor"
        );
        assert_eq!(
            PropertyEdit::AnimationType(Some(AnimationType::FadeIn)).confirmation(),
            "Applied fadeIn animation"
        );
        assert_eq!(
            PropertyEdit::AnimationDelay(0.5).confirmation(),
            "Animation delay set to 0.5s"
        );
    }
}
