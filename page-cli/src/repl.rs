//! Text command parsing for the interactive host.
//!
//! Each input line maps onto one editor request, a generation request, or a
//! host action such as `help`.

use page_core::{AnimationType, Command, ElementId, KeyChord, KeyModifiers, PropertyEdit, Position};

use crate::actor::Request;

/// Help text listing every command.
pub const HELP: &str = "\
Placement:
  drag <text|image|button|container|external>   start dragging a block
  cancel                                         end the drag without dropping
  drop <x> <y>                                   drop the dragged block
Selection and properties:
  select <id> | deselect
  style <property> <value>                       e.g. style backgroundColor #667eea
  animate <fadeIn|slideInLeft|...|none>
  duration <seconds> | delay <seconds>
  move <x> <y>
  commit                                         close the current edit group
  preview                                        replay the selected animation
Actions:
  undo | redo | duplicate | delete [id]
  key <chord>                                    e.g. key ctrl+z, key ctrl+shift+z, key Delete
Generation:
  gen-text <text...>
  gen-image <style> <summary...>
Other:
  show | help | quit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// Apply immediately.
    Request(Request),
    /// Apply after the simulated generation delay.
    Generate(Request),
    /// Print the current document.
    Show,
    /// Print help.
    Help,
    /// Leave the session.
    Quit,
    /// Blank input.
    Empty,
}

/// Reasons a line could not be parsed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    /// Unknown command word.
    #[error("Unknown command '{0}' (try 'help')")]
    UnknownCommand(String),
    /// Wrong number or shape of arguments.
    #[error("Usage: {0}")]
    Usage(&'static str),
    /// Argument could not be read.
    #[error("Invalid argument '{value}': {reason}")]
    InvalidArgument {
        /// The offending argument.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
    /// Key chord with no binding.
    #[error("No command bound to '{0}'")]
    UnboundKey(String),
}

fn number<T: std::str::FromStr>(value: &str) -> Result<T, ParseError>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ParseError::InvalidArgument {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn element_id(value: &str) -> Result<ElementId, ParseError> {
    value.parse().map_err(|e: page_core::EditorError| ParseError::InvalidArgument {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn point(args: &[&str], usage: &'static str) -> Result<(i32, i32), ParseError> {
    match args {
        [x, y] => Ok((number(x)?, number(y)?)),
        _ => Err(ParseError::Usage(usage)),
    }
}

/// Parse a chord such as `ctrl+shift+z` or `Delete`.
///
/// # Errors
///
/// Returns [`ParseError::UnboundKey`] if the chord maps to no command.
pub fn parse_chord(chord: &str) -> Result<Command, ParseError> {
    let mut modifiers = KeyModifiers::default();
    let mut key = "";
    for part in chord.split('+') {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers.ctrl = true,
            "cmd" | "meta" => modifiers.meta = true,
            "shift" => modifiers.shift = true,
            "alt" | "option" => modifiers.alt = true,
            _ => key = part,
        }
    }
    KeyChord::new(key, modifiers)
        .command()
        .ok_or_else(|| ParseError::UnboundKey(chord.to_string()))
}

/// Parse one input line.
///
/// # Errors
///
/// Returns a [`ParseError`] describing what is wrong with the line.
pub fn parse_line(line: &str) -> Result<Line, ParseError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, args)) = words.split_first() else {
        return Ok(Line::Empty);
    };

    let request = match head {
        "help" | "?" => return Ok(Line::Help),
        "quit" | "exit" => return Ok(Line::Quit),
        "show" => return Ok(Line::Show),
        "drag" => match args {
            [token] => Request::BeginDrag((*token).to_string()),
            _ => return Err(ParseError::Usage("drag <kind>")),
        },
        "cancel" => Request::EndDrag,
        "drop" => {
            let (x, y) = point(args, "drop <x> <y>")?;
            Request::Drop { x, y }
        }
        "select" => match args {
            [id] => Request::Select(element_id(id)?),
            _ => return Err(ParseError::Usage("select <id>")),
        },
        "deselect" => Request::ClearSelection,
        "style" => match args {
            [key, value @ ..] if !value.is_empty() => {
                Request::Edit(PropertyEdit::style(*key, value.join(" ")))
            }
            _ => return Err(ParseError::Usage("style <property> <value>")),
        },
        "animate" => match args {
            [name] if name.eq_ignore_ascii_case("none") => {
                Request::Edit(PropertyEdit::AnimationType(None))
            }
            [name] => {
                let kind = name
                    .parse::<AnimationType>()
                    .map_err(|e| ParseError::InvalidArgument {
                        value: (*name).to_string(),
                        reason: e.to_string(),
                    })?;
                Request::Edit(PropertyEdit::AnimationType(Some(kind)))
            }
            _ => return Err(ParseError::Usage("animate <name|none>")),
        },
        "duration" => match args {
            [seconds] => Request::Edit(PropertyEdit::AnimationDuration(number(seconds)?)),
            _ => return Err(ParseError::Usage("duration <seconds>")),
        },
        "delay" => match args {
            [seconds] => Request::Edit(PropertyEdit::AnimationDelay(number(seconds)?)),
            _ => return Err(ParseError::Usage("delay <seconds>")),
        },
        "move" => {
            let (x, y) = point(args, "move <x> <y>")?;
            Request::Edit(PropertyEdit::Position(Position::new(x, y)))
        }
        "commit" => Request::CommitEdits,
        "preview" => Request::PreviewAnimation,
        "undo" => Request::Command(Command::Undo),
        "redo" => Request::Command(Command::Redo),
        "duplicate" => Request::Command(Command::DuplicateSelected),
        "delete" => match args {
            [] => Request::Command(Command::DeleteSelected),
            [id] => Request::Delete(element_id(id)?),
            _ => return Err(ParseError::Usage("delete [id]")),
        },
        "key" => match args {
            [chord] => Request::Command(parse_chord(chord)?),
            _ => return Err(ParseError::Usage("key <chord>")),
        },
        "gen-text" => {
            return Ok(Line::Generate(Request::InsertText(args.join(" "))));
        }
        "gen-image" => match args {
            [style, summary @ ..] if !summary.is_empty() => {
                return Ok(Line::Generate(Request::InsertImage {
                    style_tag: (*style).to_string(),
                    prompt_summary: summary.join(" "),
                }));
            }
            _ => return Err(ParseError::Usage("gen-image <style> <summary...>")),
        },
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Line::Request(request))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_lines() {
        assert_eq!(
            parse_line("drag button"),
            Ok(Line::Request(Request::BeginDrag("button".into())))
        );
        assert_eq!(
            parse_line("drop 10 -5"),
            Ok(Line::Request(Request::Drop { x: 10, y: -5 }))
        );
        assert_eq!(
            parse_line("drop 10"),
            Err(ParseError::Usage("drop <x> <y>"))
        );
    }

    #[test]
    fn test_property_lines() {
        assert_eq!(
            parse_line("style border 2px solid red"),
            Ok(Line::Request(Request::Edit(PropertyEdit::style(
                "border",
                "2px solid red"
            ))))
        );
        assert_eq!(
            parse_line("animate slideInRight"),
            Ok(Line::Request(Request::Edit(PropertyEdit::AnimationType(
                Some(AnimationType::SlideInRight)
            ))))
        );
        assert_eq!(
            parse_line("animate none"),
            Ok(Line::Request(Request::Edit(PropertyEdit::AnimationType(
                None
            ))))
        );
        assert!(matches!(
            parse_line("duration fast"),
            Err(ParseError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_select_accepts_display_form() {
        assert_eq!(
            parse_line("select element-3"),
            Ok(Line::Request(Request::Select(ElementId::from_raw(3))))
        );
        assert_eq!(
            parse_line("delete 3"),
            Ok(Line::Request(Request::Delete(ElementId::from_raw(3))))
        );
    }

    #[test]
    fn test_key_chords() {
        assert_eq!(parse_chord("ctrl+z"), Ok(Command::Undo));
        assert_eq!(parse_chord("ctrl+shift+z"), Ok(Command::Redo));
        assert_eq!(parse_chord("cmd+y"), Ok(Command::Redo));
        assert_eq!(parse_chord("ctrl+d"), Ok(Command::DuplicateSelected));
        assert_eq!(parse_chord("Delete"), Ok(Command::DeleteSelected));
        assert!(matches!(parse_chord("ctrl+s"), Err(ParseError::UnboundKey(_))));
    }

    #[test]
    fn test_generation_lines() {
        assert_eq!(
            parse_line("gen-text Hello   world"),
            Ok(Line::Generate(Request::InsertText("Hello world".into())))
        );
        assert_eq!(
            parse_line("gen-image watercolor a red barn"),
            Ok(Line::Generate(Request::InsertImage {
                style_tag: "watercolor".into(),
                prompt_summary: "a red barn".into(),
            }))
        );
        assert!(parse_line("gen-image watercolor").is_err());
    }

    #[test]
    fn test_misc_lines() {
        assert_eq!(parse_line("   "), Ok(Line::Empty));
        assert_eq!(parse_line("quit"), Ok(Line::Quit));
        assert!(matches!(
            parse_line("bold"),
            Err(ParseError::UnknownCommand(_))
        ));
    }
}
