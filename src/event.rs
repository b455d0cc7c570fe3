//! Event types for terminal input handling.
//!
//! Key codes are plain `i32`: ASCII 0-127 for ordinary keys, and synthetic
//! codes at or above 1000 for arrows, navigation, and function keys (see
//! the `key` module). This keeps the wire-level parser free of an
//! intermediate enum translation on every byte it decodes.

/// A terminal event.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// The terminal was resized. Fields are the new width and height.
    Resize(u16, u16),
    /// The application should terminate (exit key or fatal I/O).
    Quit,
}

/// Synthetic key codes for non-printable keys, offset above the ASCII
/// range so they never collide with a plain character key.
pub mod key {
    /// Page Up.
    pub const PAGE_UP: i32 = 1001;
    /// Page Down.
    pub const PAGE_DOWN: i32 = 1002;
    /// Home.
    pub const HOME: i32 = 1003;
    /// End.
    pub const END: i32 = 1004;
    /// Delete.
    pub const DELETE: i32 = 1005;
    /// Insert.
    pub const INSERT: i32 = 1006;
    /// F1.
    pub const F1: i32 = 1011;
    /// F2.
    pub const F2: i32 = 1012;
    /// F3.
    pub const F3: i32 = 1013;
    /// F4.
    pub const F4: i32 = 1014;
    /// Arrow up.
    pub const UP: i32 = 1065;
    /// Arrow down.
    pub const DOWN: i32 = 1066;
    /// Arrow right.
    pub const RIGHT: i32 = 1067;
    /// Arrow left.
    pub const LEFT: i32 = 1068;

    /// Tab (ASCII).
    pub const TAB: i32 = 9;
    /// Enter / Return (ASCII, carriage return).
    pub const ENTER: i32 = 13;
    /// Line feed, accepted as an Enter alias.
    pub const LINE_FEED: i32 = 10;
    /// Backspace (ASCII DEL).
    pub const BACKSPACE: i32 = 127;
    /// Escape (ASCII).
    pub const ESCAPE: i32 = 27;
}

/// A keyboard event: a key code plus the modifiers active when it fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// ASCII 0-127 for plain keys, or a synthetic code (see [`key`]).
    pub key: i32,
    /// Shift is held.
    pub shift: bool,
    /// Ctrl is held.
    pub ctrl: bool,
    /// Alt is held.
    pub alt: bool,
}

impl KeyEvent {
    /// Create a key event with explicit modifier state.
    pub fn new(key: i32, shift: bool, ctrl: bool, alt: bool) -> Self {
        Self {
            key,
            shift,
            ctrl,
            alt,
        }
    }

    /// Create a plain key event with no modifiers.
    pub fn plain(key: i32) -> Self {
        Self {
            key,
            shift: false,
            ctrl: false,
            alt: false,
        }
    }

    /// The key as a printable `char`, for keys in the ASCII range with no
    /// Ctrl modifier applied (Ctrl-remapped keys already carry the plain
    /// letter in `key` with `ctrl` set).
    pub fn as_char(&self) -> Option<char> {
        if (0..=127).contains(&self.key) {
            char::from_u32(self.key as u32)
        } else {
            None
        }
    }
}

/// Raw mouse button/motion bits, as carried by SGR 1006 / X10 reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    /// Column (0-based).
    pub x: u16,
    /// Row (0-based).
    pub y: u16,
    /// Raw button bitfield: bits 0-1 button id (0=left,1=middle,2=right,
    /// 3=release), bit 5 (0x20) motion, bit 6 (0x40) wheel. An SGR release
    /// report (trailing `m`) forces the low bits to 3 regardless of which
    /// button was originally down.
    pub button: u8,
}

const BUTTON_MASK: u8 = 0b0000_0011;
const MOTION_BIT: u8 = 0x20;
const WHEEL_BIT: u8 = 0x40;
const RELEASE_BITS: u8 = 3;

impl MouseEvent {
    /// Left button involved, not a wheel event.
    pub fn mouse_left(&self) -> bool {
        !self.mouse_wheel() && self.button & BUTTON_MASK == 0
    }

    /// Middle button involved, not a wheel event.
    pub fn mouse_middle(&self) -> bool {
        !self.mouse_wheel() && self.button & BUTTON_MASK == 1
    }

    /// Right button involved, not a wheel event.
    pub fn mouse_right(&self) -> bool {
        !self.mouse_wheel() && self.button & BUTTON_MASK == 2
    }

    /// This report is a button release.
    pub fn mouse_release(&self) -> bool {
        self.button & BUTTON_MASK == RELEASE_BITS
    }

    /// The mouse moved, with or without a button held.
    pub fn mouse_motion(&self) -> bool {
        self.button & MOTION_BIT != 0
    }

    /// The mouse moved while a button was held.
    pub fn mouse_drag(&self) -> bool {
        self.mouse_motion() && !self.mouse_release()
    }

    /// The mouse moved with no button held.
    pub fn mouse_move(&self) -> bool {
        self.mouse_motion() && self.mouse_release()
    }

    /// This report is a scroll-wheel event.
    pub fn mouse_wheel(&self) -> bool {
        self.button & WHEEL_BIT != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_plain_has_no_modifiers() {
        let k = KeyEvent::plain(b'a' as i32);
        assert!(!k.ctrl);
        assert!(!k.alt);
        assert!(!k.shift);
    }

    #[test]
    fn key_event_as_char() {
        let k = KeyEvent::plain(b'x' as i32);
        assert_eq!(k.as_char(), Some('x'));
    }

    #[test]
    fn synthetic_code_has_no_char() {
        let k = KeyEvent::plain(key::UP);
        assert_eq!(k.as_char(), None);
    }

    #[test]
    fn ctrl_letter_remap() {
        // Ctrl-C arrives as ASCII 3, remapped to 'c' with ctrl set.
        let k = KeyEvent::new(b'c' as i32, false, true, false);
        assert_eq!(k.as_char(), Some('c'));
        assert!(k.ctrl);
    }

    #[test]
    fn resize_event() {
        let e = Event::Resize(80, 24);
        assert!(matches!(e, Event::Resize(80, 24)));
    }

    #[test]
    fn mouse_left_press() {
        let m = MouseEvent { x: 10, y: 5, button: 0 };
        assert!(m.mouse_left());
        assert!(!m.mouse_right());
        assert!(!m.mouse_release());
    }

    #[test]
    fn mouse_release_flag() {
        let m = MouseEvent { x: 0, y: 0, button: RELEASE_BITS };
        assert!(m.mouse_release());
        assert!(!m.mouse_left());
        assert!(!m.mouse_right());
    }

    #[test]
    fn mouse_drag_vs_move() {
        let drag = MouseEvent { x: 0, y: 0, button: MOTION_BIT };
        assert!(drag.mouse_drag());
        assert!(!drag.mouse_move());

        let mv = MouseEvent {
            x: 0,
            y: 0,
            button: MOTION_BIT | RELEASE_BITS,
        };
        assert!(mv.mouse_move());
        assert!(!mv.mouse_drag());
    }

    #[test]
    fn mouse_wheel_not_a_button() {
        let m = MouseEvent { x: 0, y: 0, button: WHEEL_BIT };
        assert!(m.mouse_wheel());
        assert!(!m.mouse_left());
    }
}
