// SPDX-License-Identifier: MIT
//
// Terminal handle — raw mode, screen modes, and guaranteed restore.
//
// Showing labels on a real terminal takes three things: termios in raw
// mode so every byte reaches the parser, the alternate screen so the
// shell's scrollback is left alone, and the input reports the parser
// understands (SGR mouse, bracketed paste, focus). `Terminal::enter` does
// all of it; `leave` undoes it in reverse and `Drop` calls `leave`.
//
// A panic skips `Drop` ordering guarantees, so the panic hook writes the
// teardown bytes straight to fd 1 (the stdout lock may be held by the
// panicking frame) and puts the saved termios back before the message
// prints.
//
// The `unsafe` blocks here are the POSIX calls for terminal control:
// tcgetattr/tcsetattr/cfmakeraw, ioctl(TIOCGWINSZ), isatty, and write(2).
#![allow(unsafe_code)]

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Once, OnceLock};

use crate::ansi::{self, DecMode};

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal or surface dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    /// Columns.
    pub cols: u16,
    /// Rows.
    pub rows: u16,
}

impl Size {
    /// Build a size from columns and rows.
    #[inline]
    #[must_use]
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }
}

/// Size assumed when the real one cannot be queried.
const FALLBACK_SIZE: Size = Size::new(80, 24);

// ─── Queries ────────────────────────────────────────────────────────────────

/// Query the window size via `ioctl(TIOCGWINSZ)` on stdout.
///
/// `None` if stdout is not a terminal or reports a zero dimension.
#[cfg(unix)]
#[must_use]
pub fn query_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let ok = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &raw mut ws) } == 0;
    (ok && ws.ws_col > 0 && ws.ws_row > 0).then(|| Size::new(ws.ws_col, ws.ws_row))
}

#[cfg(not(unix))]
#[must_use]
pub fn query_size() -> Option<Size> {
    None
}

/// Whether stdin is a terminal.
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) == 1 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

// ─── Screen Modes ───────────────────────────────────────────────────────────

/// Modes `enter` turns on, in order. Teardown resets them in reverse, so
/// the alternate screen is left last and the shell reappears clean.
const SCREEN_MODES: [DecMode; 5] = [
    DecMode::AltScreen,
    DecMode::MouseButtons,
    DecMode::SgrMouse,
    DecMode::BracketedPaste,
    DecMode::FocusEvents,
];

fn write_setup(w: &mut impl Write) -> io::Result<()> {
    for mode in SCREEN_MODES {
        ansi::set_mode(w, mode, true)?;
    }
    ansi::set_mode(w, DecMode::ShowCursor, false)?;
    ansi::clear_screen(w)
}

fn write_teardown(w: &mut impl Write) -> io::Result<()> {
    // A frame cut short by a panic may have left the update open.
    ansi::set_mode(w, DecMode::SyncUpdate, false)?;
    ansi::reset(w)?;
    ansi::set_mode(w, DecMode::ShowCursor, true)?;
    for mode in SCREEN_MODES.iter().rev() {
        ansi::set_mode(w, *mode, false)?;
    }
    Ok(())
}

// ─── Raw Mode ───────────────────────────────────────────────────────────────

/// Termios as it was before the first `enter`, for the panic hook.
#[cfg(unix)]
static SAVED_TERMIOS: OnceLock<libc::termios> = OnceLock::new();

#[cfg(unix)]
fn set_termios(termios: &libc::termios, when: libc::c_int) -> io::Result<()> {
    if unsafe { libc::tcsetattr(libc::STDIN_FILENO, when, termios) } == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

/// Stdin in raw mode; `restore` puts the saved settings back.
#[cfg(unix)]
struct RawMode {
    saved: libc::termios,
}

#[cfg(unix)]
impl RawMode {
    /// Switch stdin to raw mode. `None` when stdin is not a terminal.
    fn enable() -> io::Result<Option<Self>> {
        if !is_tty() {
            return Ok(None);
        }

        let mut termios: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(libc::STDIN_FILENO, &raw mut termios) } != 0 {
            return Err(io::Error::last_os_error());
        }
        let saved = termios;
        let _ = SAVED_TERMIOS.set(saved);

        unsafe { libc::cfmakeraw(&raw mut termios) };
        // Block until at least one byte; poll() handles the timeout.
        termios.c_cc[libc::VMIN] = 1;
        termios.c_cc[libc::VTIME] = 0;
        set_termios(&termios, libc::TCSAFLUSH)?;

        Ok(Some(Self { saved }))
    }

    fn restore(&self) -> io::Result<()> {
        set_termios(&self.saved, libc::TCSAFLUSH)
    }
}

#[cfg(not(unix))]
struct RawMode;

#[cfg(not(unix))]
impl RawMode {
    #[allow(clippy::unnecessary_wraps)]
    const fn enable() -> io::Result<Option<Self>> {
        Ok(None)
    }

    #[allow(clippy::unnecessary_wraps)]
    const fn restore(&self) -> io::Result<()> {
        Ok(())
    }
}

// ─── Panic Restore ──────────────────────────────────────────────────────────

/// Whether some `Terminal` is between `enter` and `leave`.
static SCREEN_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Teardown bytes, encoded ahead of time so the hook does not format.
static TEARDOWN: OnceLock<Vec<u8>> = OnceLock::new();

static PANIC_HOOK: Once = Once::new();

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let mut bytes = Vec::new();
        if write_teardown(&mut bytes).is_ok() {
            let _ = TEARDOWN.set(bytes);
        }

        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if SCREEN_ACTIVE.swap(false, Ordering::SeqCst) {
                emergency_restore();
            }
            previous(info);
        }));
    });
}

fn emergency_restore() {
    if let Some(bytes) = TEARDOWN.get() {
        write_stdout_unlocked(bytes);
    }

    #[cfg(unix)]
    if let Some(termios) = SAVED_TERMIOS.get() {
        let _ = set_termios(termios, libc::TCSANOW);
    }
}

#[cfg(unix)]
fn write_stdout_unlocked(bytes: &[u8]) {
    unsafe {
        let _ = libc::write(libc::STDOUT_FILENO, bytes.as_ptr().cast(), bytes.len());
    }
}

#[cfg(not(unix))]
fn write_stdout_unlocked(bytes: &[u8]) {
    let mut out = io::stdout();
    let _ = out.write_all(bytes);
    let _ = out.flush();
}

// ─── Terminal ───────────────────────────────────────────────────────────────

/// Terminal handle with RAII cleanup.
///
/// ```no_run
/// use bl_term::terminal::Terminal;
///
/// let mut term = Terminal::new();
/// term.enter()?;
/// // ... paint frames, read input ...
/// // Restored automatically on drop.
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct Terminal {
    size: Size,
    raw: Option<RawMode>,
    active: bool,
}

impl Terminal {
    /// A handle sized to the current window, or 80×24 when stdout is not
    /// a terminal. Does not touch terminal state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            size: query_size().unwrap_or(FALLBACK_SIZE),
            raw: None,
            active: false,
        }
    }

    /// Cached size.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Re-query the size (after SIGWINCH). Keeps the cached value if the
    /// query fails.
    pub fn refresh_size(&mut self) -> Size {
        if let Some(size) = query_size() {
            self.size = size;
        }
        self.size
    }

    /// Whether `enter` has been called without a matching `leave`.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Raw mode, alternate screen, hidden cursor, mouse, paste and focus
    /// reports. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if termios or terminal output fails.
    pub fn enter(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }

        install_panic_hook();
        self.raw = RawMode::enable()?;

        let mut setup = Vec::new();
        write_setup(&mut setup)?;
        let mut out = io::stdout().lock();
        out.write_all(&setup)?;
        out.flush()?;

        self.active = true;
        SCREEN_ACTIVE.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Undo `enter`. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal output or termios restore fails.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        SCREEN_ACTIVE.store(false, Ordering::SeqCst);

        let mut teardown = Vec::new();
        write_teardown(&mut teardown)?;
        let mut out = io::stdout().lock();
        out.write_all(&teardown)?;
        out.flush()?;
        drop(out);

        match self.raw.take() {
            Some(raw) => raw.restore(),
            None => Ok(()),
        }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
