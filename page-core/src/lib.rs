//! # Page Builder Core
//!
//! Document model and undo/redo engine for a drag-and-drop page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  Session                    │
//! │   snapshot-before-mutate, callbacks, cmds   │
//! ├──────────────────────┬──────────────────────┤
//! │  Placement           │  Selection           │
//! │  - Drag state        │  - Single select     │
//! │  - Drop → create     │  - Property edits    │
//! ├──────────────────────┼──────────────────────┤
//! │  Document Store      │  History             │
//! │  - Ordered elements  │  - Bounded undo/redo │
//! │  - Id sequence       │  - Whole snapshots   │
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! The core is single-threaded. Hosts that share a session between threads
//! or tasks must funnel every call through one owner.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod history;
pub mod notice;
pub mod placement;
pub mod selection;
pub mod session;

pub use command::{Command, KeyChord, KeyModifiers};
pub use config::EditorConfig;
pub use document::{Document, DocumentStore};
pub use element::{
    Animation, AnimationPatch, AnimationType, Content, Element, ElementId, ElementKind, Position,
    Style,
};
pub use error::{EditorError, EditorResult, HistoryDirection};
pub use history::{History, Snapshot, DEFAULT_HISTORY_CAPACITY};
pub use notice::{Notice, NoticeLevel};
pub use placement::DragState;
pub use selection::{EditGranularity, PropertyEdit, Selection};
pub use session::{Session, SessionContext};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
