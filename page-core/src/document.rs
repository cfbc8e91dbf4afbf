//! The document model and its store.
//!
//! A [`Document`] is the ordered element sequence (order is z-order is
//! insertion order). The [`DocumentStore`] owns the current document together
//! with the id sequence and exposes the mutating operations. It does no
//! history bookkeeping: every call is a plain state transition and callers
//! take snapshots before mutating.

use serde::{Deserialize, Serialize};

use crate::element::{AnimationPatch, Content, Element, ElementId, ElementKind, Position};
use crate::error::{EditorError, EditorResult};
use crate::history::Snapshot;

/// Offset applied to duplicated elements by default.
pub const DEFAULT_DUPLICATE_OFFSET: (i32, i32) = (20, 20);

/// An ordered sequence of canvas elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All elements, bottom of the z-order first.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Get an element by ID.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Whether an element with this ID exists.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Element IDs in z-order.
    #[must_use]
    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(|e| e.id).collect()
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the document has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Serialize the document to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> EditorResult<String> {
        serde_json::to_string(self).map_err(EditorError::Serialization)
    }

    /// Deserialize a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or contains duplicate IDs.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let document: Self = serde_json::from_str(json)?;
        let mut ids = document.ids();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(EditorError::invalid_value(
                "id",
                format!("duplicate element id {}", pair[0]),
            ));
        }
        Ok(document)
    }

    fn position_of(&self, id: ElementId) -> EditorResult<usize> {
        self.elements
            .iter()
            .position(|e| e.id == id)
            .ok_or(EditorError::NotFound(id))
    }

    fn get_mut(&mut self, id: ElementId) -> EditorResult<&mut Element> {
        self.elements
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(EditorError::NotFound(id))
    }
}

/// Owns the current document and hands out element IDs.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    document: Document,
    next_id: u64,
    duplicate_offset: (i32, i32),
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore {
    /// Create a store holding an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            next_id: 1,
            duplicate_offset: DEFAULT_DUPLICATE_OFFSET,
        }
    }

    /// Set the offset applied by [`DocumentStore::duplicate`].
    #[must_use]
    pub fn with_duplicate_offset(mut self, dx: i32, dy: i32) -> Self {
        self.duplicate_offset = (dx, dy);
        self
    }

    /// The current document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// All elements in z-order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        self.document.elements()
    }

    /// Get an element by ID.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.document.get(id)
    }

    fn allocate_id(&mut self) -> ElementId {
        let id = ElementId::from_raw(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a new element of `kind` at `position`.
    pub fn create(&mut self, kind: ElementKind, position: Position) -> ElementId {
        let id = self.allocate_id();
        self.document.elements.push(Element::new(id, kind, position));
        tracing::debug!(%id, %kind, x = position.x, y = position.y, "Element created");
        id
    }

    /// Append a new element from a raw drag-source token.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidKind`] if the token names no kind.
    pub fn create_from_token(&mut self, token: &str, position: Position) -> EditorResult<ElementId> {
        let kind = token.parse::<ElementKind>()?;
        Ok(self.create(kind, position))
    }

    /// Append a new element carrying the given content.
    pub fn create_with_content(
        &mut self,
        kind: ElementKind,
        position: Position,
        content: Content,
    ) -> ElementId {
        let id = self.allocate_id();
        self.document
            .elements
            .push(Element::new(id, kind, position).with_content(content));
        tracing::debug!(%id, %kind, "Element created with content");
        id
    }

    /// Remove an element, keeping the order of the rest.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotFound`] if the element does not exist.
    pub fn remove(&mut self, id: ElementId) -> EditorResult<Element> {
        let index = self.document.position_of(id)?;
        let removed = self.document.elements.remove(index);
        tracing::debug!(%id, "Element removed");
        Ok(removed)
    }

    /// Set one style property on an element.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotFound`] if the element does not exist.
    pub fn update_style(&mut self, id: ElementId, key: &str, value: &str) -> EditorResult<()> {
        let element = self.document.get_mut(id)?;
        element.style.set(key, value);
        tracing::debug!(%id, key, value, "Style updated");
        Ok(())
    }

    /// Merge an animation patch into an element.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotFound`] if the element does not exist.
    pub fn update_animation(&mut self, id: ElementId, patch: &AnimationPatch) -> EditorResult<()> {
        let element = self.document.get_mut(id)?;
        patch.apply_to(&mut element.animation);
        tracing::debug!(%id, ?patch, "Animation updated");
        Ok(())
    }

    /// Move an element.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotFound`] if the element does not exist.
    pub fn update_position(&mut self, id: ElementId, position: Position) -> EditorResult<()> {
        let element = self.document.get_mut(id)?;
        element.position = position;
        tracing::debug!(%id, x = position.x, y = position.y, "Position updated");
        Ok(())
    }

    /// Append a copy of an element with a fresh ID, offset from the source.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotFound`] if the element does not exist.
    pub fn duplicate(&mut self, id: ElementId) -> EditorResult<ElementId> {
        let source = self.document.get(id).ok_or(EditorError::NotFound(id))?;
        let mut clone = source.clone();
        let (dx, dy) = self.duplicate_offset;
        clone.position = clone.position.offset(dx, dy);
        clone.id = self.allocate_id();
        let new_id = clone.id;
        self.document.elements.push(clone);
        tracing::debug!(source = %id, clone = %new_id, "Element duplicated");
        Ok(new_id)
    }

    /// Capture the current document.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.document.clone())
    }

    /// Replace the current document with a captured one.
    ///
    /// The id sequence is not rewound, so IDs stay unique for the session.
    pub fn restore(&mut self, document: Document) {
        if let Some(max) = document.elements().iter().map(|e| e.id.as_raw()).max() {
            self.next_id = self.next_id.max(max + 1);
        }
        self.document = document;
    }
}
