//! Style tags, fonts and colors.
//!
//! Styles are opaque string tags. Turning a tag into a concrete font, color
//! or margin is the job of a [`FontChooser`] supplied by the embedding
//! application.

use std::fmt;

/// Ordered list of style tags attached to a primitive.
///
/// Insertion order is kept and duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleTags(Vec<String>);

impl StyleTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tag: impl Into<String>) {
        self.0.push(tag.into());
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StyleTags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// RGB color packed as 0xRRGGBB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xffffff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
}

/// A resolved font. The canvas never interprets it beyond passing it on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    pub family: String,
    pub style: FontStyle,
    /// Size in points
    pub size: u32,
}

impl Font {
    pub fn new(family: impl Into<String>, size: u32) -> Self {
        Self {
            family: family.into(),
            style: FontStyle::Normal,
            size,
        }
    }
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    Center,
    #[default]
    Left,
    Right,
}

/// Vertical text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    Center,
    Top,
    #[default]
    Bottom,
}

/// Style service resolving tags into fonts, colors and vertical metrics.
///
/// The chooser also owns the base font size that every tag is scaled from.
/// [`TextGroup::fit_fonts`](super::text::TextGroup::fit_fonts) shrinks it
/// in place, so text groups fitted with the same chooser share one
/// shrinking pass.
pub trait FontChooser {
    fn font(&self, style: &str) -> Font;

    fn color(&self, style: &str) -> Color;

    fn margin_top(&self, style: &str) -> i32;

    fn text_height(&self, style: &str) -> i32;

    fn margin_bottom(&self, style: &str) -> i32;

    /// Current base font size in points
    fn base_font_size(&self) -> u32;

    /// Shrink the base font size by one step and return the new size
    fn decrease_base_font_size(&mut self) -> u32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_tags_keep_order_and_duplicates() {
        let mut tags = StyleTags::new();
        tags.push("task");
        tags.push("critical");
        tags.push("task");
        assert_eq!(tags.len(), 3);
        assert!(tags.contains("critical"));
        assert!(!tags.contains("milestone"));
        assert_eq!(tags.iter().collect::<Vec<_>>(), ["task", "critical", "task"]);
    }

    #[test]
    fn color_components() {
        let c = Color::rgb(0x12, 0x34, 0x56);
        assert_eq!(c, Color(0x123456));
        assert_eq!((c.red(), c.green(), c.blue()), (0x12, 0x34, 0x56));
        assert_eq!(c.to_string(), "#123456");
    }
}
