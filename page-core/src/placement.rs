//! Drag-and-drop placement.
//!
//! The drag source reports the kind token of the block being dragged when
//! the gesture begins; a later drop turns that token and the drop coordinate
//! into a creation in the document store.

use crate::element::ElementKind;
use crate::error::EditorResult;

/// In-progress drag gesture, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    token: Option<String>,
}

impl DragState {
    /// No drag in progress.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A drag of `token` started. Replaces any earlier drag.
    pub fn begin(&mut self, token: impl Into<String>) {
        let token = token.into();
        tracing::trace!(%token, "Drag started");
        self.token = Some(token);
    }

    /// The drag ended without a drop on the canvas.
    pub fn end(&mut self) {
        self.token = None;
    }

    /// Token of the active drag.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.token.is_some()
    }

    /// Resolve a drop.
    ///
    /// Returns `Ok(None)` when no drag is active. On a valid token the drag
    /// is consumed and the kind is returned; the caller snapshots and creates.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EditorError::InvalidKind`] if the active token names no
    /// kind. The drag is consumed either way, matching a real drop gesture.
    pub fn take_drop(&mut self) -> EditorResult<Option<ElementKind>> {
        let Some(token) = self.token.take() else {
            return Ok(None);
        };
        token.parse::<ElementKind>().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditorError;

    #[test]
    fn test_drop_without_drag_is_noop() {
        let mut drag = DragState::new();
        assert!(matches!(drag.take_drop(), Ok(None)));
    }

    #[test]
    fn test_drop_consumes_drag() {
        let mut drag = DragState::new();
        drag.begin("button");
        assert_eq!(drag.active(), Some("button"));

        assert_eq!(drag.take_drop().ok().flatten(), Some(ElementKind::Button));
        assert!(!drag.is_active());
    }

    #[test]
    fn test_unknown_token() {
        let mut drag = DragState::new();
        drag.begin("marquee");
        assert!(matches!(drag.take_drop(), Err(EditorError::InvalidKind(_))));
        assert!(!drag.is_active());
    }

    #[test]
    fn test_end_clears() {
        let mut drag = DragState::new();
        drag.begin("text");
        drag.end();
        assert!(drag.active().is_none());
    }
}
