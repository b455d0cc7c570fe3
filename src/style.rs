//! Builder for the attribute set a [`Cell`](crate::cell::Cell) carries.

use crate::color::Color;

/// A bundle of the attributes a single cell can carry: colors and the
/// three SGR toggles the frame pipeline tracks (bold, italic, underline).
///
/// This is a convenience builder for constructing cells, not a type stored
/// inside [`Cell`](crate::cell::Cell) itself — `Cell`'s fields are flat so
/// that cell equality stays componentwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Style {
    /// Foreground color, or `None` to leave the terminal default.
    pub fg: Option<Color>,
    /// Background color, or `None` to leave the terminal default.
    pub bg: Option<Color>,
    /// Bold text.
    pub bold: bool,
    /// Italic text.
    pub italic: bool,
    /// Underlined text.
    pub underline: bool,
}

impl Style {
    /// Create an empty style with no attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the foreground color.
    #[must_use]
    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Set bold.
    #[must_use]
    pub fn bold(mut self, val: bool) -> Self {
        self.bold = val;
        self
    }

    /// Set italic.
    #[must_use]
    pub fn italic(mut self, val: bool) -> Self {
        self.italic = val;
        self
    }

    /// Set underline.
    #[must_use]
    pub fn underline(mut self, val: bool) -> Self {
        self.underline = val;
        self
    }

    /// Merge another style on top of this one. Set values in `other` take
    /// priority; booleans are OR'd.
    #[must_use]
    pub fn merge(&self, other: &Style) -> Style {
        Style {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
        }
    }

    /// Returns true if no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }

    /// Resolve the colors and flatten this style into the fields a `Cell`
    /// stores, given theme fallbacks for unset colors.
    pub fn resolve(&self, fg_fallback: Color, bg_fallback: Color) -> (Color, Color, bool, bool, bool) {
        (
            self.fg.unwrap_or(fg_fallback),
            self.bg.unwrap_or(bg_fallback),
            self.bold,
            self.italic,
            self.underline,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(Style::new().is_empty());
    }

    #[test]
    fn builder_sets_fields() {
        let s = Style::new().fg(Color::rgb(1, 2, 3)).bold(true);
        assert_eq!(s.fg, Some(Color::rgb(1, 2, 3)));
        assert!(s.bold);
        assert!(!s.is_empty());
    }

    #[test]
    fn merge_prefers_other_colors_ors_bools() {
        let base = Style::new().fg(Color::rgb(1, 1, 1)).bold(true);
        let over = Style::new().bg(Color::rgb(2, 2, 2)).italic(true);
        let merged = base.merge(&over);
        assert_eq!(merged.fg, Some(Color::rgb(1, 1, 1)));
        assert_eq!(merged.bg, Some(Color::rgb(2, 2, 2)));
        assert!(merged.bold);
        assert!(merged.italic);
    }

    #[test]
    fn resolve_falls_back_on_unset_colors() {
        let s = Style::new().bold(true);
        let (fg, bg, bold, italic, underline) =
            s.resolve(Color::rgb(9, 9, 9), Color::rgb(0, 0, 0));
        assert_eq!(fg, Color::rgb(9, 9, 9));
        assert_eq!(bg, Color::rgb(0, 0, 0));
        assert!(bold);
        assert!(!italic);
        assert!(!underline);
    }
}
