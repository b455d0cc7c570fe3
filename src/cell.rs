//! Cell type — a single terminal cell.

use crate::color::Color;
use crate::width::utf8_display_width;

/// A single cell in the terminal screen buffer.
///
/// `content` is either a single grapheme of display width 1 or 2, or the
/// empty string, which marks this cell as the continuation half of a
/// preceding width-2 cell. Equality is componentwise across every field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    /// The grapheme displayed in this cell, or empty for a continuation cell.
    pub content: String,
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Bold text.
    pub bold: bool,
    /// Italic text.
    pub italic: bool,
    /// Underlined text.
    pub underline: bool,
}

impl Cell {
    /// Create a new cell from a grapheme and explicit attributes.
    pub fn new(
        content: impl Into<String>,
        fg: Color,
        bg: Color,
        bold: bool,
        italic: bool,
        underline: bool,
    ) -> Self {
        Self {
            content: content.into(),
            fg,
            bg,
            bold,
            italic,
            underline,
        }
    }

    /// A blank cell: a single space in default colors with no attributes.
    pub fn blank() -> Self {
        Self {
            content: " ".into(),
            fg: Color::DEFAULT,
            bg: Color::DEFAULT,
            bold: false,
            italic: false,
            underline: false,
        }
    }

    /// The continuation sentinel for the second half of a width-2 cell.
    /// `bg` should match the leading cell's background.
    pub fn continuation(bg: Color) -> Self {
        Self {
            content: String::new(),
            fg: Color::DEFAULT,
            bg,
            bold: false,
            italic: false,
            underline: false,
        }
    }

    /// Returns true if this cell is the continuation half of a wide cell.
    pub fn is_continuation(&self) -> bool {
        self.content.is_empty()
    }

    /// Display width of this cell's content: 0, 1, or 2.
    pub fn width(&self) -> u8 {
        if self.content.is_empty() {
            0
        } else {
            utf8_display_width(&self.content) as u8
        }
    }

    /// Returns true if this cell is a default-styled space.
    pub fn is_blank(&self) -> bool {
        self.content == " "
            && self.fg == Color::DEFAULT
            && self.bg == Color::DEFAULT
            && !self.bold
            && !self.italic
            && !self.underline
    }
}
