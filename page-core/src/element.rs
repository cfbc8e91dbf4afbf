//! Canvas elements - the typed blocks a page is assembled from.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// Unique identifier for an element.
///
/// Identifiers are handed out by the document store from a monotonic sequence
/// and are never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(u64);

impl ElementId {
    /// Create from a raw sequence value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw sequence value.
    #[must_use]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element-{}", self.0)
    }
}

impl FromStr for ElementId {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("element-").unwrap_or(s);
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| EditorError::InvalidValue {
                field: "id".to_string(),
                reason: format!("'{s}' is not an element id"),
            })
    }
}

/// The fixed set of placeable block types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// A paragraph of text.
    Text,
    /// An image placeholder.
    Image,
    /// A call-to-action button.
    Button,
    /// A layout container.
    Container,
    /// A block produced by the generation subsystem.
    ExternalContent,
}

impl ElementKind {
    /// Every kind, in palette order.
    pub const ALL: [Self; 5] = [
        Self::Text,
        Self::Image,
        Self::Button,
        Self::Container,
        Self::ExternalContent,
    ];

    /// The drag-source token for this kind.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Button => "button",
            Self::Container => "container",
            Self::ExternalContent => "external",
        }
    }

    /// Base style shared by every freshly placed element.
    #[must_use]
    pub fn default_style(self) -> Style {
        let mut style = Style::new();
        style.set("padding", "10px");
        style.set("border", "1px solid #ccc");
        style.set("borderRadius", "4px");
        style.set("background", "white");
        style
    }

    /// Default style for an element of this kind carrying `content`.
    ///
    /// External text blocks are wider-padded and width-capped; external
    /// images keep the base style.
    #[must_use]
    pub fn style_for(self, content: &Content) -> Style {
        let mut style = self.default_style();
        if self == Self::ExternalContent && matches!(content, Content::Text(_)) {
            style.set("padding", "15px");
            style.set("maxWidth", "400px");
        }
        style
    }

    /// Default rendering payload for a freshly placed element of this kind.
    #[must_use]
    pub fn default_content(self) -> Content {
        match self {
            Self::Text => Content::Text("Sample text block".to_string()),
            Self::Image => Content::Placeholder("Image".to_string()),
            Self::Button => Content::Button("Button".to_string()),
            Self::Container => Content::Placeholder("Container".to_string()),
            Self::ExternalContent => Content::Text(String::new()),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ElementKind {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.token().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EditorError::InvalidKind(s.to_string()))
    }
}

/// Position relative to the canvas origin, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Pixels from the left edge.
    pub x: i32,
    /// Pixels from the top edge.
    pub y: i32,
}

impl Position {
    /// Create a position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This position shifted by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Style properties keyed by property name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(BTreeMap<String, String>);

impl Style {
    /// An empty style.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Look up a property.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Set a property, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no properties are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(property, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Entrance or attention animations offered by the property panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationType {
    /// Fade in.
    FadeIn,
    /// Slide in from the left.
    SlideInLeft,
    /// Slide in from the right.
    SlideInRight,
    /// Bounce in.
    BounceIn,
    /// Pulse.
    Pulse,
    /// Shake.
    Shake,
}

impl AnimationType {
    /// Every animation type, in panel order.
    pub const ALL: [Self; 6] = [
        Self::FadeIn,
        Self::SlideInLeft,
        Self::SlideInRight,
        Self::BounceIn,
        Self::Pulse,
        Self::Shake,
    ];

    /// The CSS keyframes name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FadeIn => "fadeIn",
            Self::SlideInLeft => "slideInLeft",
            Self::SlideInRight => "slideInRight",
            Self::BounceIn => "bounceIn",
            Self::Pulse => "pulse",
            Self::Shake => "shake",
        }
    }
}

impl fmt::Display for AnimationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnimationType {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EditorError::InvalidValue {
                field: "animation".to_string(),
                reason: format!("unknown animation '{s}'"),
            })
    }
}

/// Animation settings of an element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Selected animation, if any.
    pub kind: Option<AnimationType>,
    /// Duration in seconds.
    pub duration_seconds: f32,
    /// Delay before starting, in seconds.
    pub delay_seconds: f32,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            kind: None,
            duration_seconds: 1.0,
            delay_seconds: 0.0,
        }
    }
}

/// A partial update to an [`Animation`]. Absent fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationPatch {
    /// New animation type; `Some(None)` clears it.
    pub kind: Option<Option<AnimationType>>,
    /// New duration in seconds.
    pub duration_seconds: Option<f32>,
    /// New delay in seconds.
    pub delay_seconds: Option<f32>,
}

impl AnimationPatch {
    /// Patch that sets the animation type.
    #[must_use]
    pub fn kind(kind: Option<AnimationType>) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Patch that sets the duration.
    #[must_use]
    pub fn duration(seconds: f32) -> Self {
        Self {
            duration_seconds: Some(seconds),
            ..Self::default()
        }
    }

    /// Patch that sets the delay.
    #[must_use]
    pub fn delay(seconds: f32) -> Self {
        Self {
            delay_seconds: Some(seconds),
            ..Self::default()
        }
    }

    /// Merge this patch into `animation`.
    pub fn apply_to(&self, animation: &mut Animation) {
        if let Some(kind) = self.kind {
            animation.kind = kind;
        }
        if let Some(duration) = self.duration_seconds {
            animation.duration_seconds = duration;
        }
        if let Some(delay) = self.delay_seconds {
            animation.delay_seconds = delay;
        }
    }
}

/// Opaque rendering payload of an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Content {
    /// Plain text.
    Text(String),
    /// A labelled placeholder box.
    Placeholder(String),
    /// A button with a label.
    Button(String),
    /// An image described by the generation subsystem.
    GeneratedImage {
        /// Visual style requested by the user.
        style_tag: String,
        /// Short summary of the prompt.
        prompt_summary: String,
    },
}

/// A block placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// Block type.
    pub kind: ElementKind,
    /// Position relative to the canvas origin.
    pub position: Position,
    /// Style properties.
    pub style: Style,
    /// Animation settings.
    pub animation: Animation,
    /// Rendering payload.
    pub content: Content,
}

impl Element {
    /// Create an element with the kind's default style and content.
    #[must_use]
    pub fn new(id: ElementId, kind: ElementKind, position: Position) -> Self {
        let content = kind.default_content();
        Self {
            id,
            kind,
            position,
            style: kind.style_for(&content),
            animation: Animation::default(),
            content,
        }
    }

    /// Replace the content of a freshly created element.
    ///
    /// The style is reset to the default for the new content.
    #[must_use]
    pub fn with_content(mut self, content: Content) -> Self {
        self.style = self.kind.style_for(&content);
        self.content = content;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tokens_parse() {
        for kind in ElementKind::ALL {
            assert_eq!(kind.token().parse::<ElementKind>().ok(), Some(kind));
        }
        assert_eq!("TEXT".parse::<ElementKind>().ok(), Some(ElementKind::Text));
    }

    #[test]
    fn test_unknown_kind_is_invalid() {
        let err = "video".parse::<ElementKind>().unwrap_err();
        assert!(matches!(err, EditorError::InvalidKind(ref token) if token == "video"));
    }

    #[test]
    fn test_default_style_per_kind() {
        let text = ElementKind::Text.default_style();
        assert_eq!(text.get("padding"), Some("10px"));
        assert_eq!(text.get("maxWidth"), None);

        let external_text =
            ElementKind::ExternalContent.style_for(&Content::Text("Copy".to_string()));
        assert_eq!(external_text.get("padding"), Some("15px"));
        assert_eq!(external_text.get("maxWidth"), Some("400px"));

        let external_image = ElementKind::ExternalContent.style_for(&Content::GeneratedImage {
            style_tag: "watercolor".to_string(),
            prompt_summary: "a lighthouse".to_string(),
        });
        assert_eq!(external_image.get("padding"), Some("10px"));
        assert_eq!(external_image.get("maxWidth"), None);
    }

    #[test]
    fn test_with_content_restyles_fresh_element() {
        let id = ElementId::from_raw(1);
        let text = Element::new(id, ElementKind::ExternalContent, Position::default());
        assert_eq!(text.style.get("maxWidth"), Some("400px"));

        let image = text.with_content(Content::GeneratedImage {
            style_tag: "flat".to_string(),
            prompt_summary: "a barn".to_string(),
        });
        assert_eq!(image.style, ElementKind::ExternalContent.default_style());
    }

    #[test]
    fn test_animation_patch_merges_only_present_fields() {
        let mut animation = Animation::default();
        AnimationPatch::kind(Some(AnimationType::Pulse)).apply_to(&mut animation);
        AnimationPatch::delay(0.5).apply_to(&mut animation);

        assert_eq!(animation.kind, Some(AnimationType::Pulse));
        assert!((animation.duration_seconds - 1.0).abs() < f32::EPSILON);
        assert!((animation.delay_seconds - 0.5).abs() < f32::EPSILON);

        AnimationPatch::kind(None).apply_to(&mut animation);
        assert_eq!(animation.kind, None);
    }

    #[test]
    fn test_element_id_display_and_parse() {
        let id = ElementId::from_raw(7);
        assert_eq!(id.to_string(), "element-7");
        assert_eq!("element-7".parse::<ElementId>().ok(), Some(id));
        assert_eq!("7".parse::<ElementId>().ok(), Some(id));
        assert!("seven".parse::<ElementId>().is_err());
    }

    #[test]
    fn test_position_offset() {
        assert_eq!(Position::new(10, 10).offset(20, 20), Position::new(30, 30));
    }
}
