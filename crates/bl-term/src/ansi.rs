// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state,
// no decisions about when to emit; that belongs to the renderer and the
// terminal handle.
//
// Private modes (`CSI ? n h` / `CSI ? n l`) are named by `DecMode` and
// toggled through one function, so setup and teardown can be written as
// lists of modes and played forwards or backwards.
//
// Cursor positions are 0-indexed in our API and converted to the 1-indexed
// form the terminal expects.

use std::io::{self, Write};

use crate::color::CellColor;

// ─── Private Modes ───────────────────────────────────────────────────────────

/// DEC private modes the label host toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum DecMode {
    /// Cursor visible (DECTCEM).
    ShowCursor = 25,
    /// Report button presses and releases.
    MouseButtons = 1000,
    /// Report focus in/out.
    FocusEvents = 1004,
    /// Encode mouse reports as SGR (`CSI < b ; x ; y M`).
    SgrMouse = 1006,
    /// Alternate screen buffer, saving the cursor.
    AltScreen = 1049,
    /// Wrap pasted text in `CSI 200 ~` / `CSI 201 ~`.
    BracketedPaste = 2004,
    /// Hold output until the mode is reset (synchronized update).
    SyncUpdate = 2026,
}

impl DecMode {
    /// The mode number.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u16 {
        self as u16
    }
}

/// Set (`h`) or reset (`l`) a private mode.
#[inline]
pub fn set_mode(w: &mut impl Write, mode: DecMode, on: bool) -> io::Result<()> {
    write!(w, "\x1b[?{}{}", mode.code(), if on { 'h' } else { 'l' })
}

// ─── Cursor & Screen ─────────────────────────────────────────────────────────

/// Move the cursor to `(x, y)` (CUP).
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1)
}

/// Clear the entire screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Reset all SGR attributes (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

// ─── Colors ──────────────────────────────────────────────────────────────────

/// Which half of a cell a color applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    Foreground,
    Background,
}

impl Plane {
    /// SGR base: 30 for foreground, 40 for background. The extended (`8`)
    /// and default (`9`) forms derive from it.
    const fn base(self) -> u16 {
        match self {
            Self::Foreground => 30,
            Self::Background => 40,
        }
    }
}

/// Set the color of one plane. `Fixed` is always written as 24-bit RGB;
/// the `38;5;n` palette form is never emitted.
pub fn color(w: &mut impl Write, plane: Plane, color: CellColor) -> io::Result<()> {
    let base = plane.base();
    match color.to_rgb() {
        None => write!(w, "\x1b[{}m", base + 9),
        Some((r, g, b)) => write!(w, "\x1b[{};2;{r};{g};{b}m", base + 8),
    }
}

/// Set the foreground color.
#[inline]
pub fn fg(w: &mut impl Write, c: CellColor) -> io::Result<()> {
    color(w, Plane::Foreground, c)
}

/// Set the background color.
#[inline]
pub fn bg(w: &mut impl Write, c: CellColor) -> io::Result<()> {
    color(w, Plane::Background, c)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn emit(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn cursor_to_is_one_indexed() {
        assert_eq!(emit(|w| cursor_to(w, 0, 0)), "\x1b[1;1H");
        assert_eq!(emit(|w| cursor_to(w, 9, 4)), "\x1b[5;10H");
        assert_eq!(emit(|w| cursor_to(w, u16::MAX, 0)), "\x1b[1;65536H");
    }

    #[test]
    fn modes_set_and_reset() {
        assert_eq!(emit(|w| set_mode(w, DecMode::ShowCursor, false)), "\x1b[?25l");
        assert_eq!(emit(|w| set_mode(w, DecMode::AltScreen, true)), "\x1b[?1049h");
        assert_eq!(emit(|w| set_mode(w, DecMode::SyncUpdate, false)), "\x1b[?2026l");
        assert_eq!(DecMode::SgrMouse.code(), 1006);
    }

    #[test]
    fn fixed_colors_bypass_the_palette() {
        assert_eq!(emit(|w| fg(w, CellColor::Fixed(15))), "\x1b[38;2;255;255;255m");
        assert_eq!(emit(|w| bg(w, CellColor::Fixed(95))), "\x1b[48;2;135;95;95m");
        // Low indices too: no 30–37 / 90–97 shortcut.
        assert_eq!(emit(|w| fg(w, CellColor::Fixed(1))), "\x1b[38;2;205;0;0m");
        assert_eq!(emit(|w| bg(w, CellColor::Fixed(12))), "\x1b[48;2;92;92;255m");
    }

    #[test]
    fn default_colors() {
        assert_eq!(emit(|w| fg(w, CellColor::Default)), "\x1b[39m");
        assert_eq!(emit(|w| bg(w, CellColor::Default)), "\x1b[49m");
    }
}
