//! # Editing Session
//!
//! The [`Session`] composes the document store, the history, the selection
//! and the drag state into one session context and is the only path through
//! which user-triggered mutations reach the document.
//!
//! Every mutation follows the same shape:
//!
//! ```text
//! validate ─► snapshot ─► mutate ─► record snapshot ─► on_change ─► notice
//!    │
//!    └─ error ─► warning notice (document, selection and history untouched)
//! ```
//!
//! Store operations check their preconditions before writing, so the
//! snapshot taken ahead of a mutation is only recorded once the mutation has
//! succeeded. The observable result is identical to recording first.

use std::fmt;

use uuid::Uuid;

use crate::command::Command;
use crate::config::EditorConfig;
use crate::document::{Document, DocumentStore};
use crate::element::{AnimationType, Content, Element, ElementId, ElementKind, Position};
use crate::error::{EditorError, EditorResult};
use crate::history::History;
use crate::notice::Notice;
use crate::placement::DragState;
use crate::selection::{EditGranularity, PropertyEdit, Selection};

/// Callback receiving the complete element sequence after every mutation.
pub type OnChangeCallback = Box<dyn Fn(&[Element]) + Send + Sync>;

/// Callback receiving every notice the session emits.
pub type OnNoticeCallback = Box<dyn Fn(&Notice) + Send + Sync>;

/// All mutable state of one editing session.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Current document and id sequence.
    pub store: DocumentStore,
    /// Undo/redo stacks.
    pub history: History,
    /// Selected element.
    pub selection: Selection,
    /// In-progress drag.
    pub drag: DragState,
    /// Whether a coalesced edit group has already recorded its snapshot.
    edit_group_open: bool,
}

impl SessionContext {
    fn new(config: &EditorConfig) -> Self {
        let (dx, dy) = config.duplicate_offset;
        Self {
            store: DocumentStore::new().with_duplicate_offset(dx, dy),
            history: History::new(config.history_capacity),
            selection: Selection::new(),
            drag: DragState::new(),
            edit_group_open: false,
        }
    }
}

/// One editing session.
pub struct Session {
    id: Uuid,
    config: EditorConfig,
    ctx: SessionContext,
    on_change: Option<OnChangeCallback>,
    on_notice: Option<OnNoticeCallback>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}

impl Default for Session {
    fn default() -> Self {
        let config = EditorConfig::default();
        Self {
            id: Uuid::new_v4(),
            ctx: SessionContext::new(&config),
            config,
            on_change: None,
            on_notice: None,
        }
    }
}

impl Session {
    /// Start a session with an empty document.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Config`] if the configuration is invalid.
    pub fn new(config: EditorConfig) -> EditorResult<Self> {
        config.validate()?;
        let id = Uuid::new_v4();
        tracing::info!(session = %id, ?config, "Editing session started");
        Ok(Self {
            id,
            ctx: SessionContext::new(&config),
            config,
            on_change: None,
            on_notice: None,
        })
    }

    /// Set the presentation callback.
    pub fn set_on_change<F>(&mut self, callback: F)
    where
        F: Fn(&[Element]) + Send + Sync + 'static,
    {
        self.on_change = Some(Box::new(callback));
    }

    /// Set the notification callback.
    pub fn set_on_notice<F>(&mut self, callback: F)
    where
        F: Fn(&Notice) + Send + Sync + 'static,
    {
        self.on_notice = Some(Box::new(callback));
    }

    /// Session identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Read access to the whole session context.
    #[must_use]
    pub const fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// The current document.
    #[must_use]
    pub fn document(&self) -> &Document {
        self.ctx.store.document()
    }

    /// All elements in z-order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        self.ctx.store.elements()
    }

    /// The selected element's ID.
    #[must_use]
    pub const fn selection(&self) -> Option<ElementId> {
        self.ctx.selection.current()
    }

    /// The selected element.
    #[must_use]
    pub fn selected_element(&self) -> Option<&Element> {
        self.selection().and_then(|id| self.ctx.store.get(id))
    }

    /// Whether an undo is possible.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.ctx.history.can_undo()
    }

    /// Whether a redo is possible.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.ctx.history.can_redo()
    }

    fn notify(&self, notice: &Notice) {
        if let Some(ref callback) = self.on_notice {
            callback(notice);
        }
    }

    fn changed(&self) {
        if let Some(ref callback) = self.on_change {
            callback(self.ctx.store.elements());
        }
    }

    fn fail<T>(&self, err: EditorError) -> EditorResult<T> {
        tracing::debug!(session = %self.id, code = err.code(), "{err}");
        self.notify(&Notice::from(&err));
        Err(err)
    }

    /// Run a store mutation, recording the prior document on success.
    fn mutate<T>(
        &mut self,
        f: impl FnOnce(&mut DocumentStore) -> EditorResult<T>,
    ) -> EditorResult<T> {
        let before = self.ctx.store.snapshot();
        match f(&mut self.ctx.store) {
            Ok(value) => {
                self.ctx.history.record(before);
                self.ctx.edit_group_open = false;
                self.changed();
                Ok(value)
            }
            Err(err) => self.fail(err),
        }
    }

    // ---------------------------------------------------------------------
    // Placement
    // ---------------------------------------------------------------------

    /// The drag source started dragging a block of `token`.
    pub fn begin_drag(&mut self, token: impl Into<String>) {
        self.ctx.drag.begin(token);
    }

    /// The drag source ended a drag without dropping.
    pub fn end_drag(&mut self) {
        self.ctx.drag.end();
    }

    /// Drop the dragged block at `(x, y)`.
    ///
    /// Returns `Ok(None)` if no drag is in progress.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidKind`] if the dragged token names no
    /// kind. Nothing is recorded in that case.
    pub fn drop_at(&mut self, x: i32, y: i32) -> EditorResult<Option<ElementId>> {
        let kind = match self.ctx.drag.take_drop() {
            Ok(Some(kind)) => kind,
            Ok(None) => {
                tracing::debug!(session = %self.id, "Drop without an active drag ignored");
                return Ok(None);
            }
            Err(err) => return self.fail(err),
        };
        let id = self.mutate(|store| Ok(store.create(kind, Position::new(x, y))))?;
        self.notify(&Notice::info(format!("{kind} added to canvas")));
        Ok(Some(id))
    }

    // ---------------------------------------------------------------------
    // Selection and properties
    // ---------------------------------------------------------------------

    /// Select an element, replacing the previous selection.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotFound`] if the element does not exist.
    pub fn select(&mut self, id: ElementId) -> EditorResult<()> {
        if self.ctx.selection.current() == Some(id) {
            return Ok(());
        }
        if let Err(err) = self.ctx.selection.select(id, self.ctx.store.document()) {
            return self.fail(err);
        }
        self.ctx.edit_group_open = false;
        tracing::debug!(session = %self.id, %id, "Element selected");
        Ok(())
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.ctx.selection.clear();
        self.ctx.edit_group_open = false;
    }

    /// Apply one field edit to the selected element.
    ///
    /// With [`EditGranularity::PerField`] every call records a history entry.
    /// With [`EditGranularity::PerCommit`] only the first edit after a commit
    /// (or after any other action) records one.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoSelection`] if nothing is selected and
    /// [`EditorError::InvalidValue`] if the value is rejected.
    pub fn edit(&mut self, edit: &PropertyEdit) -> EditorResult<()> {
        let id = match self.ctx.selection.require() {
            Ok(id) => id,
            Err(err) => return self.fail(err),
        };
        if let Err(err) = edit.validate() {
            return self.fail(err);
        }

        let coalesce = self.config.edit_granularity == EditGranularity::PerCommit;
        let before = self.ctx.store.snapshot();
        if let Err(err) = edit.apply(&mut self.ctx.store, id) {
            return self.fail(err);
        }
        if !(coalesce && self.ctx.edit_group_open) {
            self.ctx.history.record(before);
        }
        self.ctx.edit_group_open = coalesce;

        self.changed();
        self.notify(&Notice::info(edit.confirmation()));
        Ok(())
    }

    /// Close the current coalesced edit group.
    pub fn commit_edits(&mut self) {
        self.ctx.edit_group_open = false;
    }

    /// Set a style property on the selected element.
    ///
    /// # Errors
    ///
    /// See [`Session::edit`].
    pub fn update_style(&mut self, key: &str, value: &str) -> EditorResult<()> {
        self.edit(&PropertyEdit::style(key, value))
    }

    /// Set or clear the selected element's animation.
    ///
    /// # Errors
    ///
    /// See [`Session::edit`].
    pub fn set_animation_type(&mut self, kind: Option<AnimationType>) -> EditorResult<()> {
        self.edit(&PropertyEdit::AnimationType(kind))
    }

    /// Set the selected element's animation duration.
    ///
    /// # Errors
    ///
    /// See [`Session::edit`].
    pub fn set_animation_duration(&mut self, seconds: f32) -> EditorResult<()> {
        self.edit(&PropertyEdit::AnimationDuration(seconds))
    }

    /// Set the selected element's animation delay.
    ///
    /// # Errors
    ///
    /// See [`Session::edit`].
    pub fn set_animation_delay(&mut self, seconds: f32) -> EditorResult<()> {
        self.edit(&PropertyEdit::AnimationDelay(seconds))
    }

    /// Move the selected element.
    ///
    /// # Errors
    ///
    /// See [`Session::edit`].
    pub fn set_position(&mut self, x: i32, y: i32) -> EditorResult<()> {
        self.edit(&PropertyEdit::Position(Position::new(x, y)))
    }

    /// Replay the selected element's animation. Does not touch the document.
    ///
    /// Returns the animation that was previewed, or `None` if the element has
    /// no animation.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoSelection`] if nothing is selected.
    pub fn preview_animation(&self) -> EditorResult<Option<AnimationType>> {
        let Some(element) = self.selected_element() else {
            return self.fail(EditorError::NoSelection);
        };
        let kind = element.animation.kind;
        match kind {
            Some(_) => self.notify(&Notice::info("Animation previewed")),
            None => self.notify(&Notice::warning("No animation selected")),
        }
        Ok(kind)
    }

    /// Duplicate the selected element. The source stays selected.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoSelection`] if nothing is selected.
    pub fn duplicate_selected(&mut self) -> EditorResult<ElementId> {
        let id = match self.ctx.selection.require() {
            Ok(id) => id,
            Err(err) => return self.fail(err),
        };
        let clone = self.mutate(|store| store.duplicate(id))?;
        self.notify(&Notice::info("Element duplicated"));
        Ok(clone)
    }

    /// Delete the selected element and clear the selection.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoSelection`] if nothing is selected.
    pub fn delete_selected(&mut self) -> EditorResult<Element> {
        let id = match self.ctx.selection.require() {
            Ok(id) => id,
            Err(err) => return self.fail(err),
        };
        self.delete_element(id)
    }

    /// Delete a specific element.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotFound`] if the element does not exist.
    pub fn delete_element(&mut self, id: ElementId) -> EditorResult<Element> {
        let removed = self.mutate(|store| store.remove(id))?;
        self.ctx.selection.reconcile(self.ctx.store.document());
        self.notify(&Notice::info("Element deleted"));
        Ok(removed)
    }

    // ---------------------------------------------------------------------
    // History
    // ---------------------------------------------------------------------

    /// Restore the document as it was before the last recorded mutation.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::EmptyHistory`] if there is nothing to undo.
    pub fn undo(&mut self) -> EditorResult<()> {
        let current = self.ctx.store.snapshot();
        match self.ctx.history.undo(current) {
            Ok(previous) => {
                self.restore(previous);
                self.notify(&Notice::info("Undo performed"));
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    /// Re-apply the last undone mutation.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::EmptyHistory`] if there is nothing to redo.
    pub fn redo(&mut self) -> EditorResult<()> {
        let current = self.ctx.store.snapshot();
        match self.ctx.history.redo(current) {
            Ok(next) => {
                self.restore(next);
                self.notify(&Notice::info("Redo performed"));
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    fn restore(&mut self, document: Document) {
        self.ctx.store.restore(document);
        self.ctx.selection.reconcile(self.ctx.store.document());
        self.ctx.edit_group_open = false;
        tracing::debug!(
            session = %self.id,
            undo_depth = self.ctx.history.undo_depth(),
            redo_depth = self.ctx.history.redo_depth(),
            "Document restored from history"
        );
        self.changed();
    }

    // ---------------------------------------------------------------------
    // External content
    // ---------------------------------------------------------------------

    /// Insert a generated text block at the configured insert position.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::EmptyContent`] if `payload` is blank.
    pub fn insert_text_block(&mut self, payload: &str) -> EditorResult<ElementId> {
        if payload.trim().is_empty() {
            return self.fail(EditorError::EmptyContent);
        }
        let position = self.config.insert_position;
        let content = Content::Text(payload.to_string());
        let id = self.mutate(|store| {
            Ok(store.create_with_content(ElementKind::ExternalContent, position, content))
        })?;
        self.notify(&Notice::info("AI content inserted into editor!"));
        Ok(id)
    }

    /// Insert a generated image block at the configured insert position.
    pub fn insert_image_block(&mut self, style_tag: &str, prompt_summary: &str) -> ElementId {
        let position = self.config.insert_position;
        let content = Content::GeneratedImage {
            style_tag: style_tag.to_string(),
            prompt_summary: prompt_summary.to_string(),
        };
        let before = self.ctx.store.snapshot();
        let id = self
            .ctx
            .store
            .create_with_content(ElementKind::ExternalContent, position, content);
        self.ctx.history.record(before);
        self.ctx.edit_group_open = false;
        self.changed();
        self.notify(&Notice::info("AI image inserted into editor!"));
        id
    }

    // ---------------------------------------------------------------------
    // Command surface
    // ---------------------------------------------------------------------

    /// Run a host-level command.
    ///
    /// # Errors
    ///
    /// Returns whatever the underlying operation returns.
    pub fn execute(&mut self, command: Command) -> EditorResult<()> {
        match command {
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::DuplicateSelected => self.duplicate_selected().map(|_| ()),
            Command::DeleteSelected => self.delete_selected().map(|_| ()),
        }
    }
}
