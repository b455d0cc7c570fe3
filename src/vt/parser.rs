//! Byte-fed VT/ANSI state machine.

use crate::event::{key, Event, KeyEvent, MouseEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Start,
    Escape,
    Csi,
    Ss3,
    MouseX10,
    MouseSgr,
}

/// Decodes a byte stream from a terminal into [`Event`]s.
///
/// Feed bytes one at a time with [`process`](VTParser::process). Most calls
/// return `None`, meaning the byte was consumed into an in-progress escape
/// sequence; the caller keeps feeding bytes until an event comes back or
/// input runs dry with the parser back at rest (`is_idle`).
#[derive(Debug, Default)]
pub struct VTParser {
    state: State,
    csi_params: Vec<u8>,
    mouse_x10: Vec<u8>,
    mouse_sgr: Vec<u8>,
}

impl Default for State {
    fn default() -> Self {
        State::Start
    }
}

impl VTParser {
    /// Create a parser at rest.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the parser is not in the middle of an escape sequence.
    pub fn is_idle(&self) -> bool {
        self.state == State::Start
    }

    /// Feed one byte. Returns `Some(event)` when a complete key, mouse, or
    /// (via the caller) resize event is ready; `None` while more bytes are
    /// needed.
    pub fn process(&mut self, byte: u8) -> Option<Event> {
        match self.state {
            State::Start => self.process_start(byte),
            State::Escape => self.process_escape(byte),
            State::Csi => self.process_csi(byte),
            State::Ss3 => self.process_ss3(byte),
            State::MouseX10 => self.process_mouse_x10(byte),
            State::MouseSgr => self.process_mouse_sgr(byte),
        }
    }

    fn process_start(&mut self, byte: u8) -> Option<Event> {
        match byte {
            0x1B => {
                self.state = State::Escape;
                None
            }
            0x00 => Some(key_event(b' ' as i32, false, true, false)),
            0x01..=0x1A if !matches!(byte, 8 | 9 | 10 | 13) => {
                Some(key_event(i32::from(byte) + 96, false, true, false))
            }
            other => Some(key_event(i32::from(other), false, false, false)),
        }
    }

    fn process_escape(&mut self, byte: u8) -> Option<Event> {
        match byte {
            b'[' => {
                self.state = State::Csi;
                self.csi_params.clear();
                None
            }
            b'O' => {
                self.state = State::Ss3;
                None
            }
            other => {
                self.state = State::Start;
                Some(key_event(i32::from(other), false, false, true))
            }
        }
    }

    fn process_ss3(&mut self, byte: u8) -> Option<Event> {
        self.state = State::Start;
        let code = match byte {
            b'P' => key::F1,
            b'Q' => key::F2,
            b'R' => key::F3,
            b'S' => key::F4,
            _ => 0,
        };
        Some(key_event(code, false, false, false))
    }

    fn process_csi(&mut self, byte: u8) -> Option<Event> {
        match byte {
            b'M' => {
                self.state = State::MouseX10;
                self.mouse_x10.clear();
                None
            }
            b'<' => {
                self.state = State::MouseSgr;
                self.mouse_sgr.clear();
                None
            }
            b'A' | b'B' | b'C' | b'D' | b'Z' | b'H' | b'F' | b'~' => {
                self.state = State::Start;
                Some(self.parse_csi_final(byte))
            }
            // Digits and ';' are parameters; any other intermediate byte is
            // folded into the parameter buffer too, so a stray byte never
            // strands the parser mid-sequence.
            _ => {
                self.csi_params.push(byte);
                None
            }
        }
    }

    fn parse_csi_final(&mut self, final_byte: u8) -> Event {
        let mut parts = self
            .csi_params
            .split(|&b| b == b';')
            .map(|p| std::str::from_utf8(p).ok().and_then(|s| s.parse::<u32>().ok()));
        let p1 = parts.next().flatten().filter(|&n| n != 0).unwrap_or(1);
        let p2 = parts.next().flatten().filter(|&n| n != 0).unwrap_or(1);
        let mod_bits = p2.saturating_sub(1);
        let shift = mod_bits & 1 != 0;
        let alt = mod_bits & 2 != 0;
        let ctrl = mod_bits & 4 != 0;

        match final_byte {
            b'A' => key_event(key::UP, shift, ctrl, alt),
            b'B' => key_event(key::DOWN, shift, ctrl, alt),
            b'C' => key_event(key::RIGHT, shift, ctrl, alt),
            b'D' => key_event(key::LEFT, shift, ctrl, alt),
            b'Z' => key_event(key::TAB, true, ctrl, alt),
            b'H' => key_event(key::HOME, shift, ctrl, alt),
            b'F' => key_event(key::END, shift, ctrl, alt),
            b'~' => {
                let code = match p1 {
                    2 => key::INSERT,
                    3 => key::DELETE,
                    5 => key::PAGE_UP,
                    6 => key::PAGE_DOWN,
                    _ => 0,
                };
                key_event(code, shift, ctrl, alt)
            }
            _ => key_event(0, false, false, false),
        }
    }

    fn process_mouse_x10(&mut self, byte: u8) -> Option<Event> {
        self.mouse_x10.push(byte);
        if self.mouse_x10.len() < 3 {
            return None;
        }
        self.state = State::Start;
        let bytes = std::mem::take(&mut self.mouse_x10);
        let button = bytes[0].wrapping_sub(32);
        let x = u16::from(bytes[1].wrapping_sub(32)).saturating_sub(1);
        let y = u16::from(bytes[2].wrapping_sub(32)).saturating_sub(1);
        Some(Event::Mouse(MouseEvent { x, y, button }))
    }

    fn process_mouse_sgr(&mut self, byte: u8) -> Option<Event> {
        if byte != b'M' && byte != b'm' {
            self.mouse_sgr.push(byte);
            return None;
        }
        self.state = State::Start;
        let text = String::from_utf8_lossy(&self.mouse_sgr).into_owned();
        let mut fields = text.split(';').map(|s| s.parse::<i64>().unwrap_or(0));
        let raw_button = fields.next().unwrap_or(0).clamp(0, u8::MAX as i64) as u8;
        let x_raw = fields.next().unwrap_or(1);
        let y_raw = fields.next().unwrap_or(1);
        let x = u16::try_from((x_raw - 1).max(0)).unwrap_or(0);
        let y = u16::try_from((y_raw - 1).max(0)).unwrap_or(0);

        let mut button = raw_button & !(4 | 8 | 16);
        if byte == b'm' {
            button = (button & !0b11) | 0b11;
        }
        Some(Event::Mouse(MouseEvent { x, y, button }))
    }
}

fn key_event(key: i32, shift: bool, ctrl: bool, alt: bool) -> Event {
    Event::Key(KeyEvent::new(key, shift, ctrl, alt))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(parser: &mut VTParser, bytes: &[u8]) -> Option<Event> {
        let mut last = None;
        for &b in bytes {
            last = parser.process(b);
        }
        last
    }

    #[test]
    fn plain_ascii_key() {
        let mut p = VTParser::new();
        let ev = p.process(b'a').unwrap();
        assert_eq!(ev, Event::Key(KeyEvent::new(b'a' as i32, false, false, false)));
    }

    #[test]
    fn ctrl_letter_remap() {
        let mut p = VTParser::new();
        let ev = p.process(0x03).unwrap(); // Ctrl-C
        assert_eq!(ev, Event::Key(KeyEvent::new(b'c' as i32, false, true, false)));
    }

    #[test]
    fn ctrl_space() {
        let mut p = VTParser::new();
        let ev = p.process(0x00).unwrap();
        assert_eq!(ev, Event::Key(KeyEvent::new(b' ' as i32, false, true, false)));
    }

    #[test]
    fn tab_enter_backspace_pass_through_unmodified() {
        let mut p = VTParser::new();
        assert_eq!(p.process(9).unwrap(), Event::Key(KeyEvent::plain(9)));
        assert_eq!(p.process(13).unwrap(), Event::Key(KeyEvent::plain(13)));
        assert_eq!(p.process(8).unwrap(), Event::Key(KeyEvent::plain(8)));
    }

    #[test]
    fn lone_escape_stays_pending() {
        let mut p = VTParser::new();
        assert_eq!(p.process(0x1B), None);
        assert!(!p.is_idle());
    }

    #[test]
    fn alt_plus_char() {
        let mut p = VTParser::new();
        p.process(0x1B);
        let ev = p.process(b'x').unwrap();
        assert_eq!(ev, Event::Key(KeyEvent::new(b'x' as i32, false, false, true)));
    }

    #[test]
    fn arrow_up_no_modifiers() {
        let mut p = VTParser::new();
        let ev = feed(&mut p, &[0x1B, b'[', b'A']).unwrap();
        assert_eq!(ev, Event::Key(KeyEvent::new(key::UP, false, false, false)));
    }

    #[test]
    fn arrow_up_with_ctrl_modifier() {
        let mut p = VTParser::new();
        let ev = feed(&mut p, b"\x1b[1;5A").unwrap();
        assert_eq!(ev, Event::Key(KeyEvent::new(key::UP, false, true, false)));
    }

    #[test]
    fn function_keys_via_ss3() {
        let mut p = VTParser::new();
        assert_eq!(
            feed(&mut p, b"\x1bOP").unwrap(),
            Event::Key(KeyEvent::plain(key::F1))
        );
        assert_eq!(
            feed(&mut p, b"\x1bOS").unwrap(),
            Event::Key(KeyEvent::plain(key::F4))
        );
    }

    #[test]
    fn tilde_navigation_keys() {
        let mut p = VTParser::new();
        assert_eq!(feed(&mut p, b"\x1b[5~").unwrap(), Event::Key(KeyEvent::plain(key::PAGE_UP)));
        let mut p = VTParser::new();
        assert_eq!(feed(&mut p, b"\x1b[3~").unwrap(), Event::Key(KeyEvent::plain(key::DELETE)));
    }

    #[test]
    fn shift_tab() {
        let mut p = VTParser::new();
        let ev = feed(&mut p, b"\x1b[Z").unwrap();
        assert_eq!(ev, Event::Key(KeyEvent::new(key::TAB, true, false, false)));
    }

    #[test]
    fn sgr_mouse_left_press() {
        let mut p = VTParser::new();
        let ev = feed(&mut p, b"\x1b[<0;10;20M").unwrap();
        let Event::Mouse(m) = ev else { panic!("expected mouse event") };
        assert_eq!((m.x, m.y), (9, 19));
        assert!(m.mouse_left());
        assert!(!m.mouse_release());
    }

    #[test]
    fn sgr_mouse_release() {
        let mut p = VTParser::new();
        let ev = feed(&mut p, b"\x1b[<0;10;20m").unwrap();
        let Event::Mouse(m) = ev else { panic!("expected mouse event") };
        assert!(m.mouse_release());
    }

    #[test]
    fn sgr_mouse_wheel_up() {
        let mut p = VTParser::new();
        let ev = feed(&mut p, b"\x1b[<64;5;5M").unwrap();
        let Event::Mouse(m) = ev else { panic!("expected mouse event") };
        assert!(m.mouse_wheel());
    }

    #[test]
    fn x10_mouse_left_press() {
        let mut p = VTParser::new();
        // button byte 32 (left, no mods), x=10 -> byte 42, y=20 -> byte 52
        let ev = feed(&mut p, &[0x1B, b'[', b'M', 32, 42, 52]).unwrap();
        let Event::Mouse(m) = ev else { panic!("expected mouse event") };
        assert_eq!((m.x, m.y), (9, 19));
        assert!(m.mouse_left());
    }

    #[test]
    fn ctrl_c_raw_byte_path() {
        let mut p = VTParser::new();
        let ev = p.process(0x03).unwrap();
        assert_eq!(ev, Event::Key(KeyEvent::new(b'c' as i32, false, true, false)));
    }

    #[test]
    fn malformed_csi_param_defaults_to_one() {
        let mut p = VTParser::new();
        let ev = feed(&mut p, b"\x1b[A").unwrap();
        assert_eq!(ev, Event::Key(KeyEvent::new(key::UP, false, false, false)));
    }

    #[test]
    fn unrecognized_tilde_code_yields_zero_key() {
        let mut p = VTParser::new();
        let ev = feed(&mut p, b"\x1b[9~").unwrap();
        assert_eq!(ev, Event::Key(KeyEvent::plain(0)));
    }
}
