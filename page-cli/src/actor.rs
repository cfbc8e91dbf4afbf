//! Single-owner editor task.
//!
//! The session lives inside one tokio task. Every mutation, whether typed by
//! the user or delivered by a finished generation request, arrives as a
//! message on the same channel and runs to completion before the next one is
//! taken, so document and history changes never interleave.

use std::time::Duration;

use page_core::{
    AnimationType, Command, Document, EditorResult, Element, ElementId, PropertyEdit, Session,
};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Messages buffered before senders wait.
const CHANNEL_CAPACITY: usize = 64;

/// An operation on the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Drag source started dragging a block.
    BeginDrag(String),
    /// Drag source ended a drag without dropping.
    EndDrag,
    /// Drag source dropped at a canvas coordinate.
    Drop {
        /// X coordinate.
        x: i32,
        /// Y coordinate.
        y: i32,
    },
    /// Select an element.
    Select(ElementId),
    /// Clear the selection.
    ClearSelection,
    /// Edit a field of the selected element.
    Edit(PropertyEdit),
    /// Close the current edit group.
    CommitEdits,
    /// Replay the selected element's animation.
    PreviewAnimation,
    /// Delete a specific element.
    Delete(ElementId),
    /// Host-level command.
    Command(Command),
    /// Generated text finished.
    InsertText(String),
    /// Generated image finished.
    InsertImage {
        /// Visual style.
        style_tag: String,
        /// Prompt summary.
        prompt_summary: String,
    },
    /// Read the current document.
    Inspect,
}

/// Successful outcome of a [`Request`].
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// The request completed with nothing to report.
    Done,
    /// A drop landed without an active drag.
    Ignored,
    /// An element was created.
    Created(ElementId),
    /// An element was removed.
    Removed(Element),
    /// Result of an animation preview.
    Previewed(Option<AnimationType>),
    /// Current document and selection.
    Document {
        /// The document.
        document: Document,
        /// Selected element.
        selection: Option<ElementId>,
    },
}

struct Envelope {
    request: Request,
    reply: oneshot::Sender<EditorResult<Reply>>,
}

/// Errors talking to the editor task.
#[derive(Debug, thiserror::Error)]
pub enum ActorError {
    /// The editor task has stopped.
    #[error("Editor task stopped")]
    Stopped,
}

/// Cloneable handle to the editor task.
#[derive(Debug, Clone)]
pub struct EditorHandle {
    tx: mpsc::Sender<Envelope>,
}

/// Spawn the editor task owning `session`.
///
/// The task ends once every handle has been dropped.
#[must_use]
pub fn spawn_editor(session: Session) -> (EditorHandle, JoinHandle<Session>) {
    let (tx, mut rx) = mpsc::channel::<Envelope>(CHANNEL_CAPACITY);
    let task = tokio::spawn(async move {
        let mut session = session;
        while let Some(Envelope { request, reply }) = rx.recv().await {
            tracing::trace!(?request, "Editor request");
            let outcome = apply(&mut session, request);
            if reply.send(outcome).is_err() {
                tracing::debug!("Requester went away before the reply");
            }
        }
        tracing::debug!(session = %session.id(), "Editor task finished");
        session
    });
    (EditorHandle { tx }, task)
}

fn apply(session: &mut Session, request: Request) -> EditorResult<Reply> {
    match request {
        Request::BeginDrag(token) => {
            session.begin_drag(token);
            Ok(Reply::Done)
        }
        Request::EndDrag => {
            session.end_drag();
            Ok(Reply::Done)
        }
        Request::Drop { x, y } => Ok(session
            .drop_at(x, y)?
            .map_or(Reply::Ignored, Reply::Created)),
        Request::Select(id) => session.select(id).map(|()| Reply::Done),
        Request::ClearSelection => {
            session.clear_selection();
            Ok(Reply::Done)
        }
        Request::Edit(edit) => session.edit(&edit).map(|()| Reply::Done),
        Request::CommitEdits => {
            session.commit_edits();
            Ok(Reply::Done)
        }
        Request::PreviewAnimation => session.preview_animation().map(Reply::Previewed),
        Request::Delete(id) => session.delete_element(id).map(Reply::Removed),
        Request::Command(command) => session.execute(command).map(|()| Reply::Done),
        Request::InsertText(payload) => session.insert_text_block(&payload).map(Reply::Created),
        Request::InsertImage {
            style_tag,
            prompt_summary,
        } => Ok(Reply::Created(
            session.insert_image_block(&style_tag, &prompt_summary),
        )),
        Request::Inspect => Ok(Reply::Document {
            document: session.document().clone(),
            selection: session.selection(),
        }),
    }
}

impl EditorHandle {
    /// Send a request and wait for its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::Stopped`] if the editor task is gone. Editor
    /// failures come back inside the `Ok` value.
    pub async fn request(&self, request: Request) -> Result<EditorResult<Reply>, ActorError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Envelope { request, reply })
            .await
            .map_err(|_| ActorError::Stopped)?;
        rx.await.map_err(|_| ActorError::Stopped)
    }

    /// Start a simulated generation that inserts `request` after `delay`.
    ///
    /// Returns immediately. The insertion re-enters the editor as an ordinary
    /// message once the delay elapses; there is no cancellation, and
    /// concurrent generations land in completion order.
    pub fn generate(&self, request: Request, delay: Duration) -> JoinHandle<()> {
        let handle = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match handle.request(request).await {
                Ok(Ok(reply)) => tracing::debug!(?reply, "Generated block inserted"),
                Ok(Err(err)) => tracing::debug!(code = err.code(), "Generated block rejected"),
                Err(err) => tracing::warn!("Generation finished after shutdown: {err}"),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_core::{EditorError, ElementKind};

    async fn drop_block(handle: &EditorHandle, token: &str, x: i32, y: i32) -> ElementId {
        handle
            .request(Request::BeginDrag(token.to_string()))
            .await
            .expect("editor alive")
            .expect("drag");
        match handle
            .request(Request::Drop { x, y })
            .await
            .expect("editor alive")
            .expect("drop")
        {
            Reply::Created(id) => id,
            other => panic!("Expected Created, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_requests_are_applied_in_order() {
        let (handle, task) = spawn_editor(Session::default());
        let a = drop_block(&handle, "text", 10, 10).await;
        let b = drop_block(&handle, "button", 50, 50).await;

        handle
            .request(Request::Command(Command::Undo))
            .await
            .expect("editor alive")
            .expect("undo");

        drop(handle);
        let session = task.await.expect("task joins");
        assert_eq!(session.document().ids(), vec![a]);
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_errors_come_back_as_values() {
        let (handle, _task) = spawn_editor(Session::default());
        let outcome = handle
            .request(Request::Command(Command::DeleteSelected))
            .await
            .expect("editor alive");
        assert!(matches!(outcome, Err(EditorError::NoSelection)));
    }

    #[tokio::test]
    async fn test_drop_without_drag_is_ignored() {
        let (handle, _task) = spawn_editor(Session::default());
        let outcome = handle
            .request(Request::Drop { x: 1, y: 1 })
            .await
            .expect("editor alive");
        assert!(matches!(outcome, Ok(Reply::Ignored)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_reenters_later() {
        let (handle, _task) = spawn_editor(Session::default());
        let pending = handle.generate(
            Request::InsertText("Fresh copy".to_string()),
            Duration::from_millis(500),
        );

        let Ok(Ok(Reply::Document { document, .. })) = handle.request(Request::Inspect).await
        else {
            panic!("Expected document");
        };
        assert!(document.is_empty());

        pending.await.expect("generation task");
        let Ok(Ok(Reply::Document { document, .. })) = handle.request(Request::Inspect).await
        else {
            panic!("Expected document");
        };
        assert_eq!(document.len(), 1);
        assert_eq!(document.elements()[0].kind, ElementKind::ExternalContent);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_generations_land_in_completion_order() {
        let (handle, _task) = spawn_editor(Session::default());
        let slow = handle.generate(
            Request::InsertText("submitted first".to_string()),
            Duration::from_millis(900),
        );
        let fast = handle.generate(
            Request::InsertImage {
                style_tag: "flat".to_string(),
                prompt_summary: "submitted second".to_string(),
            },
            Duration::from_millis(100),
        );
        fast.await.expect("fast");
        slow.await.expect("slow");

        let Ok(Ok(Reply::Document { document, .. })) = handle.request(Request::Inspect).await
        else {
            panic!("Expected document");
        };
        let contents: Vec<_> = document.elements().iter().map(|e| e.content.clone()).collect();
        assert!(matches!(
            contents.as_slice(),
            [
                page_core::Content::GeneratedImage { .. },
                page_core::Content::Text(_)
            ]
        ));
    }
}
