//! # Page Builder Host
//!
//! Line-oriented host for `page-core`. It stands in for the collaborators the
//! core talks to: the drag source, the keyboard/menu command surface, the
//! notification sink, the presentation layer and the content generators.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p page-cli -- --coalesce-edits --generation-delay-ms 250
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `EditorHandle` - Handle to the task that owns the session
//! - `parse_line` - Maps input lines onto editor requests

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub mod actor;
pub mod args;
pub mod render;
pub mod repl;

pub use actor::{spawn_editor, ActorError, EditorHandle, Reply, Request};
pub use args::{CliArgs, HostSettings};
pub use repl::{parse_line, Line, ParseError};
