//! Host-level commands and their keyboard shortcuts.

use serde::{Deserialize, Serialize};

/// Commands a keyboard or menu surface can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Step back one history entry.
    Undo,
    /// Step forward one history entry.
    Redo,
    /// Duplicate the selected element.
    DuplicateSelected,
    /// Delete the selected element.
    DeleteSelected,
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct KeyModifiers {
    /// Shift key pressed.
    pub shift: bool,
    /// Control key pressed.
    pub ctrl: bool,
    /// Alt/Option key pressed.
    pub alt: bool,
    /// Meta/Command key pressed.
    pub meta: bool,
}

impl KeyModifiers {
    /// Control, or Command on macOS.
    #[must_use]
    pub const fn primary(self) -> bool {
        self.ctrl || self.meta
    }
}

/// A key press with its modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyChord {
    /// Key name as reported by the host (`"z"`, `"Delete"`, ...).
    pub key: String,
    /// Active modifier keys.
    pub modifiers: KeyModifiers,
}

impl KeyChord {
    /// A chord from a key and modifiers.
    #[must_use]
    pub fn new(key: impl Into<String>, modifiers: KeyModifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    /// Map the chord to a command, if it is bound.
    ///
    /// `Ctrl+Z` undo, `Ctrl+Shift+Z` and `Ctrl+Y` redo, `Ctrl+D` duplicate,
    /// `Delete` delete. `Cmd` works in place of `Ctrl`. `Ctrl+S` stays
    /// unbound: it never changed the document, only flashed a message.
    #[must_use]
    pub fn command(&self) -> Option<Command> {
        if self.modifiers.primary() {
            return match self.key.to_ascii_lowercase().as_str() {
                "z" if self.modifiers.shift => Some(Command::Redo),
                "z" => Some(Command::Undo),
                "y" => Some(Command::Redo),
                "d" => Some(Command::DuplicateSelected),
                _ => None,
            };
        }
        (self.key == "Delete").then_some(Command::DeleteSelected)
    }
}
