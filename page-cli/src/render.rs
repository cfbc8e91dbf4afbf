//! Text presentation of documents and notices.

use std::fmt::Write;

use page_core::{Content, Element, ElementId, Notice, NoticeLevel};

/// One-line summary of an element.
#[must_use]
pub fn element_line(element: &Element) -> String {
    let mut line = format!(
        "{:<12} {:<10} ({}, {})",
        element.id.to_string(),
        element.kind.to_string(),
        element.position.x,
        element.position.y
    );
    match element.content {
        Content::Text(ref text) => {
            let _ = write!(line, " \"{}\"", truncate(text, 40));
        }
        Content::Placeholder(ref label) | Content::Button(ref label) => {
            let _ = write!(line, " [{label}]");
        }
        Content::GeneratedImage {
            ref style_tag,
            ref prompt_summary,
        } => {
            let _ = write!(line, " <{style_tag}: {}>", truncate(prompt_summary, 30));
        }
    }
    if let Some(kind) = element.animation.kind {
        let _ = write!(
            line,
            " ~{kind} {}s+{}s",
            element.animation.duration_seconds, element.animation.delay_seconds
        );
    }
    line
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push('…');
    cut
}

/// Multi-line listing of a document, marking the selected element.
#[must_use]
pub fn document_listing(elements: &[Element], selection: Option<ElementId>) -> String {
    if elements.is_empty() {
        return "(canvas is empty)".to_string();
    }
    elements
        .iter()
        .map(|element| {
            let marker = if Some(element.id) == selection { '*' } else { ' ' };
            format!("{marker} {}", element_line(element))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A notice as shown to the user.
#[must_use]
pub fn notice_line(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Info => format!("✓ {}", notice.message),
        NoticeLevel::Warning => format!("! {}", notice.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_core::{ElementKind, Position};

    #[test]
    fn test_listing_marks_selection() {
        let a = Element::new(ElementId::from_raw(1), ElementKind::Text, Position::new(10, 10));
        let b = Element::new(ElementId::from_raw(2), ElementKind::Button, Position::new(50, 50));
        let listing = document_listing(&[a, b], Some(ElementId::from_raw(2)));

        let lines: Vec<_> = listing.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  element-1"));
        assert!(lines[0].contains("\"Sample text block\""));
        assert!(lines[1].starts_with("* element-2"));
        assert!(lines[1].contains("[Button]"));
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(document_listing(&[], None), "(canvas is empty)");
    }

    #[test]
    fn test_truncate_long_text() {
        let long = "x".repeat(50);
        assert_eq!(truncate(&long, 40).chars().count(), 41);
        assert_eq!(truncate("short", 40), "short");
    }

    #[test]
    fn test_notice_line() {
        assert_eq!(notice_line(&Notice::info("Undo performed")), "✓ Undo performed");
        assert_eq!(notice_line(&Notice::warning("Nothing to redo")), "! Nothing to redo");
    }
}
