//! Terminal color model and the process-wide theme record.

use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};

/// A 24-bit terminal color, or the terminal's own default.
///
/// `is_default` is the discriminant: when true, `r`/`g`/`b` are ignored for
/// every purpose except that two default colors always compare equal
/// (SGR 39/49 carries no RGB payload of its own).
#[derive(Clone, Copy, Debug, Default)]
pub struct Color {
    /// Red component. Meaningless when `is_default` is true.
    pub r: u8,
    /// Green component. Meaningless when `is_default` is true.
    pub g: u8,
    /// Blue component. Meaningless when `is_default` is true.
    pub b: u8,
    /// Whether this color is the terminal's default fg/bg (SGR 39/49).
    pub is_default: bool,
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_default, other.is_default) {
            (true, true) => true,
            (false, false) => self.r == other.r && self.g == other.g && self.b == other.b,
            _ => false,
        }
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_default.hash(state);
        if !self.is_default {
            self.r.hash(state);
            self.g.hash(state);
            self.b.hash(state);
        }
    }
}

impl Color {
    /// The terminal's default color (SGR 39 for fg, 49 for bg).
    pub const DEFAULT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        is_default: true,
    };

    /// Create a truecolor RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            is_default: false,
        }
    }

    /// Parse a `"#rrggbb"` or `"#rgb"` hex string into an RGB color.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let expand = |s: &str| u8::from_str_radix(s, 16).map_err(|e| Error::Widget(e.to_string()));
        match hex.len() {
            6 => Ok(Color::rgb(
                expand(&hex[0..2])?,
                expand(&hex[2..4])?,
                expand(&hex[4..6])?,
            )),
            3 => {
                let r = expand(&hex[0..1])?;
                let g = expand(&hex[1..2])?;
                let b = expand(&hex[2..3])?;
                Ok(Color::rgb(r * 17, g * 17, b * 17))
            }
            n => Err(Error::Widget(format!(
                "invalid hex color length: expected 3 or 6, got {n}"
            ))),
        }
    }

    /// Return this color, or `fallback` if this color is the terminal default.
    pub const fn resolve(self, fallback: Color) -> Color {
        if self.is_default { fallback } else { self }
    }

    /// Relative luminance per ITU-R BT.709, computed in linear (gamma-expanded)
    /// sRGB space. Default colors are treated as mid-gray (0.5) since their
    /// true luminance is unknown until the terminal resolves them.
    fn relative_luminance(self) -> f64 {
        if self.is_default {
            return 0.5;
        }
        let expand = |c: u8| {
            let c = f64::from(c) / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * expand(self.r) + 0.7152 * expand(self.g) + 0.0722 * expand(self.b)
    }

    /// Pick black or white, whichever contrasts better against this color
    /// used as a background.
    ///
    /// Uses a 0.4 luminance threshold rather than the WCAG-recommended
    /// 0.179. This is a deliberate choice, tuned for this core's default
    /// theme rather than for general accessibility conformance; callers
    /// that need WCAG-conformant contrast must compute it themselves.
    pub fn contrast_color(self) -> Color {
        if self.relative_luminance() > 0.4 {
            Color::rgb(0, 0, 0)
        } else {
            Color::rgb(255, 255, 255)
        }
    }

    /// Scale a color towards black by `factor` (0.0 = unchanged, 1.0 = black).
    /// Used for dialog shadows and dimmed/disabled widget chrome.
    pub fn shade(self, factor: f64) -> Color {
        if self.is_default {
            return self;
        }
        let factor = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (f64::from(c) * (1.0 - factor)).round() as u8;
        Color::rgb(scale(self.r), scale(self.g), scale(self.b))
    }
}

/// A process-wide, read-only theme record.
///
/// Widgets read theme colors; the application swaps the whole record
/// atomically between event-loop iterations (single-threaded, so a plain
/// assignment is sufficient — see the concurrency model).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Theme {
    /// Application background.
    pub background: Color,
    /// Default text foreground.
    pub foreground: Color,
    /// Panel/container background.
    pub panel: Color,
    /// Unfocused border color.
    pub border: Color,
    /// Focused border color.
    pub border_focus: Color,
    /// Input widget background.
    pub input_bg: Color,
    /// Input widget foreground.
    pub input_fg: Color,
    /// Selection highlight background.
    pub selection: Color,
    /// Hover highlight background.
    pub hover: Color,
    /// Primary accent color.
    pub primary: Color,
    /// Secondary accent color.
    pub secondary: Color,
    /// Success state color.
    pub success: Color,
    /// Warning state color.
    pub warning: Color,
    /// Error state color.
    pub error: Color,
    /// Scrollbar track color.
    pub scrollbar_track: Color,
    /// Scrollbar thumb color.
    pub scrollbar_thumb: Color,
    /// Table header background.
    pub table_header_bg: Color,
    /// Table header foreground.
    pub table_header_fg: Color,
    /// Table header background when the table has focus.
    pub table_header_bg_focus: Color,
    /// Table header foreground when the table has focus.
    pub table_header_fg_focus: Color,
    /// Menu bar background.
    pub menubar_bg: Color,
    /// Menu bar foreground.
    pub menubar_fg: Color,
}

impl Default for Theme {
    /// A neutral dark theme, used until the host application swaps in its own.
    fn default() -> Self {
        Self {
            background: Color::rgb(0x1e, 0x1e, 0x2e),
            foreground: Color::rgb(0xcd, 0xd6, 0xf4),
            panel: Color::rgb(0x31, 0x32, 0x44),
            border: Color::rgb(0x45, 0x47, 0x5a),
            border_focus: Color::rgb(0x89, 0xb4, 0xfa),
            input_bg: Color::rgb(0x31, 0x32, 0x44),
            input_fg: Color::rgb(0xcd, 0xd6, 0xf4),
            selection: Color::rgb(0x58, 0x5b, 0x70),
            hover: Color::rgb(0x3a, 0x3c, 0x51),
            primary: Color::rgb(0x89, 0xb4, 0xfa),
            secondary: Color::rgb(0xf5, 0xc2, 0xe7),
            success: Color::rgb(0xa6, 0xe3, 0xa1),
            warning: Color::rgb(0xf9, 0xe2, 0xaf),
            error: Color::rgb(0xf3, 0x8b, 0xa8),
            scrollbar_track: Color::rgb(0x31, 0x32, 0x44),
            scrollbar_thumb: Color::rgb(0x58, 0x5b, 0x70),
            table_header_bg: Color::rgb(0x31, 0x32, 0x44),
            table_header_fg: Color::rgb(0xcd, 0xd6, 0xf4),
            table_header_bg_focus: Color::rgb(0x45, 0x47, 0x5a),
            table_header_fg_focus: Color::rgb(0x89, 0xb4, 0xfa),
            menubar_bg: Color::rgb(0x31, 0x32, 0x44),
            menubar_fg: Color::rgb(0xcd, 0xd6, 0xf4),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_colors_compare_equal() {
        assert_eq!(Color::DEFAULT, Color::default());
        assert_eq!(
            Color::DEFAULT,
            Color {
                r: 9,
                g: 9,
                b: 9,
                is_default: true
            }
        );
    }

    #[test]
    fn resolve_returns_fallback_for_default() {
        let c = Color::DEFAULT;
        assert_eq!(c.resolve(Color::rgb(1, 2, 3)), Color::rgb(1, 2, 3));
    }

    #[test]
    fn resolve_returns_self_when_set() {
        let c = Color::rgb(9, 9, 9);
        assert_eq!(c.resolve(Color::rgb(1, 2, 3)), c);
    }

    #[test]
    fn contrast_color_black_on_white() {
        assert_eq!(
            Color::rgb(255, 255, 255).contrast_color(),
            Color::rgb(0, 0, 0)
        );
    }

    #[test]
    fn contrast_color_white_on_black() {
        assert_eq!(
            Color::rgb(0, 0, 0).contrast_color(),
            Color::rgb(255, 255, 255)
        );
    }

    #[test]
    fn hex_6_digit() {
        assert_eq!(Color::from_hex("#1e1e2e").unwrap(), Color::rgb(30, 30, 46));
    }

    #[test]
    fn hex_3_digit() {
        assert_eq!(Color::from_hex("f0a").unwrap(), Color::rgb(255, 0, 170));
    }

    #[test]
    fn hex_invalid_length_errors() {
        assert!(Color::from_hex("#1234").is_err());
    }

    #[test]
    fn shade_towards_black() {
        let c = Color::rgb(100, 100, 100).shade(0.5);
        assert_eq!(c, Color::rgb(50, 50, 50));
    }

    #[test]
    fn shade_default_is_noop() {
        assert_eq!(Color::DEFAULT.shade(0.5), Color::DEFAULT);
    }

    #[test]
    fn theme_default_is_internally_consistent() {
        let t = Theme::default();
        assert_ne!(t.background, t.foreground);
        assert_eq!(t, t.clone());
    }
}
