//! Rich text components.
//!
//! A [`Text`] is a small tree: each node carries literal or translatable
//! content, an optional color, and children that inherit the color unless they
//! set their own. Literal content is never parsed for markup, so player input
//! can be embedded verbatim.

use serde::{Deserialize, Serialize};

/// Legacy formatting escape used by `to_legacy`.
pub const SECTION_SIGN: char = '\u{00A7}';

/// Named palette colors understood by every client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl NamedColor {
    /// Legacy color code character.
    pub fn legacy_code(&self) -> char {
        match self {
            Self::Black => '0',
            Self::DarkBlue => '1',
            Self::DarkGreen => '2',
            Self::DarkAqua => '3',
            Self::DarkRed => '4',
            Self::DarkPurple => '5',
            Self::Gold => '6',
            Self::Gray => '7',
            Self::DarkGray => '8',
            Self::Blue => '9',
            Self::Green => 'a',
            Self::Aqua => 'b',
            Self::Red => 'c',
            Self::LightPurple => 'd',
            Self::Yellow => 'e',
            Self::White => 'f',
        }
    }
}

/// How much decoration a player's rendered name carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameStyle {
    /// Bare username.
    Plain,
    /// Colored by party, with flair.
    Fancy,
    /// Fancy plus status decorations (used in chat).
    Verbose,
}

/// Content of a single text node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextContent {
    Literal(String),
    /// Rendered by the host in the viewer's locale.
    Translatable { key: String, args: Vec<Text> },
}

/// A rich text component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub content: TextContent,
    pub color: Option<NamedColor>,
    pub children: Vec<Text>,
}

impl Text {
    /// Literal text, never interpreted as markup.
    pub fn literal(content: impl Into<String>) -> Self {
        Self {
            content: TextContent::Literal(content.into()),
            color: None,
            children: Vec::new(),
        }
    }

    pub fn colored(content: impl Into<String>, color: NamedColor) -> Self {
        Self::literal(content).with_color(color)
    }

    pub fn empty() -> Self {
        Self::literal("")
    }

    pub fn translatable(key: impl Into<String>, args: Vec<Text>) -> Self {
        Self {
            content: TextContent::Translatable {
                key: key.into(),
                args,
            },
            color: None,
            children: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: NamedColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Append a child component.
    pub fn append(mut self, child: Text) -> Self {
        self.children.push(child);
        self
    }

    /// Join components with a separator.
    pub fn join(separator: Text, items: impl IntoIterator<Item = Text>) -> Self {
        let mut joined = Self::empty();
        for (index, item) in items.into_iter().enumerate() {
            if index > 0 {
                joined.children.push(separator.clone());
            }
            joined.children.push(item);
        }
        joined
    }

    /// Whether the node and all of its children carry no visible content.
    pub fn is_empty(&self) -> bool {
        let own_empty = match &self.content {
            TextContent::Literal(s) => s.is_empty(),
            TextContent::Translatable { .. } => false,
        };
        own_empty && self.children.iter().all(Text::is_empty)
    }

    /// Plain rendering without colors. Translatable nodes render as their key.
    pub fn to_plain(&self) -> String {
        let mut out = String::new();
        self.write_plain(&mut out);
        out
    }

    fn write_plain(&self, out: &mut String) {
        match &self.content {
            TextContent::Literal(s) => out.push_str(s),
            TextContent::Translatable { key, .. } => out.push_str(key),
        }
        for child in &self.children {
            child.write_plain(out);
        }
    }

    /// Legacy section-sign rendering, as consumed by console logs and old clients.
    pub fn to_legacy(&self) -> String {
        let mut out = String::new();
        let mut current = None;
        self.write_legacy(&mut out, None, &mut current);
        out
    }

    fn write_legacy(
        &self,
        out: &mut String,
        inherited: Option<NamedColor>,
        current: &mut Option<NamedColor>,
    ) {
        let effective = self.color.or(inherited);
        let content = match &self.content {
            TextContent::Literal(s) => s.as_str(),
            TextContent::Translatable { key, .. } => key.as_str(),
        };
        if !content.is_empty() && effective != *current {
            out.push(SECTION_SIGN);
            out.push(effective.map(|c| c.legacy_code()).unwrap_or('r'));
            *current = effective;
        }
        out.push_str(content);
        for child in &self.children {
            child.write_legacy(out, effective, current);
        }
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Self::literal(value)
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Self::literal(value)
    }
}

/// Resolves translation keys for a locale.
///
/// Full i18n rendering belongs to the host; the chat core only needs single
/// keys, such as the console display name.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str, locale: &str) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_keeps_markup_verbatim() {
        let text = Text::literal("<b>&chello</b>");
        assert_eq!(text.to_plain(), "<b>&chello</b>");
    }

    #[test]
    fn test_legacy_rendering_tracks_inherited_colors() {
        let text = Text::empty()
            .append(Text::colored("[", NamedColor::White))
            .append(Text::colored("A", NamedColor::Gold))
            .append(Text::colored("] ", NamedColor::White))
            .append(Text::literal("hi"));

        assert_eq!(text.to_legacy(), "§f[§6A§f] §rhi");
    }

    #[test]
    fn test_children_inherit_parent_color() {
        let text = Text::colored("a", NamedColor::Gray).append(Text::literal("b"));
        assert_eq!(text.to_legacy(), "§7ab");
    }

    #[test]
    fn test_join_places_separator_between_items() {
        let joined = Text::join(
            Text::colored(", ", NamedColor::Gray),
            vec![Text::literal("a"), Text::literal("b"), Text::literal("c")],
        );
        assert_eq!(joined.to_plain(), "a, b, c");
    }

    #[test]
    fn test_empty_detection() {
        assert!(Text::empty().is_empty());
        assert!(Text::empty().append(Text::empty()).is_empty());
        assert!(!Text::translatable("key", vec![]).is_empty());
    }

    #[test]
    fn test_serde_shape() {
        let text = Text::colored("x", NamedColor::Gold);
        let value = serde_json::to_value(&text).unwrap();
        assert_eq!(value["color"], "gold");
        assert_eq!(value["content"]["literal"], "x");
    }
}
