// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Event loop — delivers input and resize notifications to the host app.
//
// Everything runs on one thread. Each iteration waits on stdin with
// `poll()` and a short timeout:
//
//   1. Bytes arrive: parse them, hand each event to the app in order.
//   2. Timeout: flush a pending lone ESC as a real Escape keypress, or an
//      open paste as the text received so far.
//   3. SIGWINCH: the handler only sets an `AtomicBool`; the signal also
//      interrupts `poll()`, so the resize is seen immediately.
//
// The app is repainted only when something happened (input, resize, or
// the first frame). Painting is a full repaint of a fresh surface.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::input::{Event, Parser};
use crate::render::Renderer;
use crate::surface::Surface;
use crate::terminal::{Size, Terminal};

// ─── SIGWINCH ────────────────────────────────────────────────────────────────

/// Set by the SIGWINCH handler, cleared by the loop.
static SIGWINCH_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Install the SIGWINCH handler. No `SA_RESTART`: the signal must
/// interrupt a blocked `poll()`.
#[cfg(unix)]
fn install_sigwinch_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigwinch_handler as *const () as usize;
        sa.sa_flags = 0;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGWINCH, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigwinch_handler(_sig: libc::c_int) {
    SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
fn install_sigwinch_handler() {}

// ─── App Trait ───────────────────────────────────────────────────────────────

/// What the app wants after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep running.
    Continue,
    /// Leave the loop.
    Quit,
}

/// Host application driven by [`EventLoop`].
///
/// Per iteration the loop calls [`on_event`](App::on_event) for each input
/// event, [`on_resize`](App::on_resize) after a terminal resize, then
/// [`paint`](App::paint) if anything changed.
pub trait App {
    /// Handle one input event. Return [`Action::Quit`] to stop.
    fn on_event(&mut self, _event: &Event) -> Action {
        Action::Continue
    }

    /// The terminal was resized to `size`.
    fn on_resize(&mut self, _size: Size) {}

    /// Paint the whole frame. The surface is freshly cleared and sized to
    /// the terminal. Its cursor flag starts hidden; set it to show one.
    fn paint(&mut self, frame: &mut Surface);
}

// ─── Loop Config ─────────────────────────────────────────────────────────────

/// Event loop timing.
#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    /// How long `poll()` waits for input before the loop flushes a
    /// pending ESC (milliseconds). Default: 25 ms.
    pub poll_timeout_ms: i32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self { poll_timeout_ms: 25 }
    }
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// The terminal event loop.
///
/// ```no_run
/// use bl_term::event_loop::{Action, App, EventLoop};
/// use bl_term::input::Event;
/// use bl_term::surface::Surface;
///
/// struct AnyKeyQuits;
///
/// impl App for AnyKeyQuits {
///     fn on_event(&mut self, event: &Event) -> Action {
///         if event.is_user_input() { Action::Quit } else { Action::Continue }
///     }
///
///     fn paint(&mut self, _frame: &mut Surface) {}
/// }
///
/// EventLoop::new().run(&mut AnyKeyQuits)?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct EventLoop {
    terminal: Terminal,
    parser: Parser,
    renderer: Renderer,
    config: LoopConfig,
}

impl EventLoop {
    /// Create an event loop with default timing.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LoopConfig::default())
    }

    /// Create an event loop with custom timing.
    #[must_use]
    pub fn with_config(config: LoopConfig) -> Self {
        Self {
            terminal: Terminal::new(),
            parser: Parser::new(),
            renderer: Renderer::new(),
            config,
        }
    }

    /// The current terminal size.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.terminal.size()
    }

    /// Run until the app returns [`Action::Quit`] or stdin closes.
    /// The terminal is restored even when the loop fails.
    ///
    /// # Errors
    ///
    /// Returns an error if entering/leaving TUI mode, reading stdin, or
    /// writing a frame fails.
    pub fn run(&mut self, app: &mut impl App) -> io::Result<()> {
        self.terminal.enter()?;
        install_sigwinch_handler();

        let result = self.run_inner(app);
        self.terminal.leave()?;
        result
    }

    fn run_inner(&mut self, app: &mut impl App) -> io::Result<()> {
        let size = self.terminal.size();
        let mut frame = Surface::new(size.cols, size.rows);
        let mut dirty = true;
        let mut buf = [0u8; 4096];

        loop {
            if dirty {
                frame.clear();
                frame.set_cursor_visible(false);
                app.paint(&mut frame);
                self.renderer.render(&frame);
                self.renderer.flush()?;
                dirty = false;
            }

            let events = match read_stdin(&mut buf, self.config.poll_timeout_ms)? {
                Input::Bytes(n) => self.parser.advance(&buf[..n]),
                Input::Timeout if self.parser.has_pending() => self.parser.flush(),
                Input::Timeout | Input::Interrupted => Vec::new(),
                Input::Closed => return Ok(()),
            };

            for event in &events {
                if app.on_event(event) == Action::Quit {
                    return Ok(());
                }
                dirty = true;
            }

            if SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed) {
                let new_size = self.terminal.refresh_size();
                frame.resize(new_size.cols, new_size.rows);
                app.on_resize(new_size);
                dirty = true;
            }
        }
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Stdin ───────────────────────────────────────────────────────────────────

/// Outcome of one wait on stdin.
enum Input {
    Bytes(usize),
    Timeout,
    Interrupted,
    Closed,
}

#[cfg(unix)]
fn read_stdin(buf: &mut [u8], timeout_ms: i32) -> io::Result<Input> {
    let fd = libc::STDIN_FILENO;
    let ready = unsafe {
        let mut pfd = libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        };
        libc::poll(&raw mut pfd, 1, timeout_ms)
    };

    if ready < 0 {
        let err = io::Error::last_os_error();
        return if err.kind() == io::ErrorKind::Interrupted {
            Ok(Input::Interrupted)
        } else {
            Err(err)
        };
    }
    if ready == 0 {
        return Ok(Input::Timeout);
    }

    let n = unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) };
    match n {
        0 => Ok(Input::Closed),
        // n > 0 checked by the arm.
        #[allow(clippy::cast_sign_loss)]
        n if n > 0 => Ok(Input::Bytes(n as usize)),
        _ => {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                Ok(Input::Interrupted)
            } else {
                Err(err)
            }
        }
    }
}

#[cfg(not(unix))]
fn read_stdin(buf: &mut [u8], _timeout_ms: i32) -> io::Result<Input> {
    use std::io::Read;

    match io::stdin().lock().read(buf)? {
        0 => Ok(Input::Closed),
        n => Ok(Input::Bytes(n)),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    struct MinimalApp;
    impl App for MinimalApp {
        fn paint(&mut self, _frame: &mut Surface) {}
    }

    #[test]
    fn default_config() {
        assert_eq!(LoopConfig::default().poll_timeout_ms, 25);
    }

    #[test]
    fn app_defaults() {
        let mut app = MinimalApp;
        assert_eq!(app.on_event(&Event::FocusGained), Action::Continue);
        app.on_resize(Size::new(100, 50));
    }

    #[test]
    fn event_loop_reports_a_size() {
        let event_loop = EventLoop::new();
        assert!(event_loop.size().cols > 0);
        assert!(event_loop.size().rows > 0);
    }

    #[test]
    fn sigwinch_flag_swap() {
        SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
        assert!(SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed));
        assert!(!SIGWINCH_RECEIVED.load(Ordering::Relaxed));
    }
}
