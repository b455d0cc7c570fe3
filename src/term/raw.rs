//! Raw-mode terminal acquisition: termios, alternate screen, mouse
//! reporting, and the SIGWINCH resize flag.

use std::io::{self, Read, Write};
use std::os::unix::io::RawFd;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};
use crate::geometry::Size;
use crate::vt::VTParser;

static RESIZE_PENDING: AtomicBool = AtomicBool::new(false);

extern "C" fn on_sigwinch(_signum: libc::c_int) {
    RESIZE_PENDING.store(true, Ordering::SeqCst);
}

/// Owns the terminal's raw-mode session: acquires it on construction,
/// restores the original mode on drop (including on panic unwind).
pub struct Terminal {
    fd: RawFd,
    original: libc::termios,
    parser: VTParser,
}

impl Terminal {
    /// Acquire raw mode, switch to the alternate screen, hide the cursor,
    /// and enable any-motion SGR 1006 mouse reporting. Installs the
    /// SIGWINCH handler and drains any input the mode switch itself
    /// produced.
    pub fn acquire() -> Result<Self> {
        let fd = libc::STDIN_FILENO;
        let original = unsafe {
            let mut tios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &mut tios) != 0 {
                return Err(Error::Terminal(
                    io::Error::last_os_error().to_string(),
                ));
            }
            tios
        };

        let mut raw = original;
        unsafe {
            libc::cfmakeraw(&mut raw);
            if libc::tcsetattr(fd, libc::TCSAFLUSH, &raw) != 0 {
                return Err(Error::Terminal(
                    io::Error::last_os_error().to_string(),
                ));
            }
        }

        install_sigwinch_handler()?;

        let mut stdout = io::stdout();
        stdout.write_all(b"\x1b[?1049h\x1b[?25l\x1b[?1003h\x1b[?1006h")?;
        stdout.flush()?;

        let mut term = Self {
            fd,
            original,
            parser: VTParser::new(),
        };
        term.drain_input_buffer();

        tracing::info!("terminal acquired: raw mode, alt screen, mouse reporting enabled");
        Ok(term)
    }

    /// Consume any bytes already queued on stdin, discarding whatever
    /// spurious events the mode switch itself produced.
    fn drain_input_buffer(&mut self) {
        let mut buf = [0u8; 256];
        loop {
            match set_nonblocking_read(self.fd, &mut buf) {
                Ok(0) | Err(_) => break,
                Ok(_) => continue,
            }
        }
    }

    /// Current terminal dimensions in cells.
    pub fn size(&self) -> Result<Size> {
        let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
        let rc = unsafe { libc::ioctl(self.fd, libc::TIOCGWINSZ, &mut ws) };
        if rc != 0 {
            return Err(Error::Terminal(io::Error::last_os_error().to_string()));
        }
        Ok(Size::new(ws.ws_col, ws.ws_row))
    }

    /// True if a SIGWINCH has arrived since the last call (clears the flag).
    pub fn take_resize_pending(&self) -> bool {
        RESIZE_PENDING.swap(false, Ordering::SeqCst)
    }

    /// Wait up to `timeout_ms` (`None` = indefinite) for an event.
    ///
    /// Checks the resize flag first; otherwise reads one byte and feeds
    /// the VT parser, retrying with a short bounded follow-up read when
    /// the parser is left mid-sequence (fragmented escape sequences can
    /// straddle OS read boundaries).
    pub fn read_event(&mut self, timeout_ms: Option<u64>) -> Result<Option<crate::event::Event>> {
        if self.take_resize_pending() {
            let size = self.size()?;
            return Ok(Some(crate::event::Event::Resize(size.width, size.height)));
        }

        if !wait_readable(self.fd, timeout_ms)? {
            return Ok(None);
        }

        let mut byte = [0u8; 1];
        match io::stdin().read(&mut byte) {
            Ok(0) => Ok(None),
            Ok(_) => {
                if let Some(event) = self.parser.process(byte[0]) {
                    return Ok(Some(event));
                }
                while !self.parser.is_idle() {
                    if !wait_readable(self.fd, Some(20))? {
                        break;
                    }
                    match io::stdin().read(&mut byte) {
                        Ok(0) => break,
                        Ok(_) => {
                            if let Some(event) = self.parser.process(byte[0]) {
                                return Ok(Some(event));
                            }
                        }
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        Err(e) => return Err(e.into()),
                    }
                }
                Ok(None)
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn restore(&mut self) {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(b"\x1b[?1006l\x1b[?1003l\x1b[?1049l\x1b[?25h");
        let _ = stdout.flush();
        unsafe {
            libc::tcsetattr(self.fd, libc::TCSAFLUSH, &self.original);
        }
        tracing::info!("terminal restored");
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        self.restore();
    }
}

fn install_sigwinch_handler() -> Result<()> {
    unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = on_sigwinch as usize;
        libc::sigemptyset(&mut action.sa_mask);
        if libc::sigaction(libc::SIGWINCH, &action, std::ptr::null_mut()) != 0 {
            return Err(Error::Terminal(io::Error::last_os_error().to_string()));
        }
    }
    Ok(())
}

fn wait_readable(fd: RawFd, timeout_ms: Option<u64>) -> Result<bool> {
    let mut pollfd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let timeout = timeout_ms.map_or(-1, |ms| ms.min(i32::MAX as u64) as i32);
    let rc = unsafe { libc::poll(&mut pollfd, 1, timeout) };
    if rc < 0 {
        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            return Ok(false);
        }
        return Err(err.into());
    }
    Ok(rc > 0 && pollfd.revents & libc::POLLIN != 0)
}

fn set_nonblocking_read(fd: RawFd, buf: &mut [u8]) -> io::Result<usize> {
    if !wait_readable(fd, Some(0)).unwrap_or(false) {
        return Ok(0);
    }
    io::stdin().read(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_flag_round_trips() {
        RESIZE_PENDING.store(false, Ordering::SeqCst);
        on_sigwinch(libc::SIGWINCH);
        assert!(RESIZE_PENDING.swap(false, Ordering::SeqCst));
    }
}
