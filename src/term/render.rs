//! Diff-based frame flush: walks two buffers and emits the minimal ANSI
//! delta between them.

use std::fmt::Write as _;
use std::io::Write;

use crate::buffer::Buffer;
use crate::color::Color;
use crate::error::Result;

/// Diff `current` against `previous` and write the minimal sequence of
/// cursor moves, SGR attribute changes, and content bytes needed to bring
/// the terminal from `previous` to `current`. The whole frame is built in
/// one string and written with a single syscall.
pub fn flush_frame<W: Write>(out: &mut W, current: &Buffer, previous: &Buffer) -> Result<()> {
    let mut frame = String::new();
    let mut cursor: Option<(u16, u16)> = None;
    let mut fg = None::<Color>;
    let mut bg = None::<Color>;
    let mut bold = false;
    let mut italic = false;
    let mut underline = false;

    let same_size = current.size() == previous.size();

    for y in 0..current.height() {
        let mut x = 0u16;
        while x < current.width() {
            let cur = current.get(x, y);
            let changed = !same_size || cur != previous.get(x, y);

            if !changed || cur.is_continuation() {
                x += 1;
                continue;
            }

            if cursor != Some((x, y)) {
                let _ = write!(frame, "\x1b[{};{}H", y + 1, x + 1);
            }

            write_fg(&mut frame, &mut fg, cur.fg);
            write_bg(&mut frame, &mut bg, cur.bg);
            write_toggle(&mut frame, &mut bold, cur.bold, 1, 22);
            write_toggle(&mut frame, &mut italic, cur.italic, 3, 23);
            write_toggle(&mut frame, &mut underline, cur.underline, 4, 24);

            frame.push_str(&cur.content);

            let width = u16::from(cur.width().max(1));
            x += width;
            cursor = Some((x, y));
        }
    }

    frame.push_str("\x1b[0m");
    out.write_all(frame.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn write_fg(frame: &mut String, tracked: &mut Option<Color>, wanted: Color) {
    if *tracked == Some(wanted) {
        return;
    }
    if wanted.is_default {
        frame.push_str("\x1b[39m");
    } else {
        let _ = write!(frame, "\x1b[38;2;{};{};{}m", wanted.r, wanted.g, wanted.b);
    }
    *tracked = Some(wanted);
}

fn write_bg(frame: &mut String, tracked: &mut Option<Color>, wanted: Color) {
    if *tracked == Some(wanted) {
        return;
    }
    if wanted.is_default {
        frame.push_str("\x1b[49m");
    } else {
        let _ = write!(frame, "\x1b[48;2;{};{};{}m", wanted.r, wanted.g, wanted.b);
    }
    *tracked = Some(wanted);
}

fn write_toggle(frame: &mut String, tracked: &mut bool, wanted: bool, on: u8, off: u8) {
    if *tracked == wanted {
        return;
    }
    let _ = write!(frame, "\x1b[{}m", if wanted { on } else { off });
    *tracked = wanted;
}
