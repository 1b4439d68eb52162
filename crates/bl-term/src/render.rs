// SPDX-License-Identifier: MIT
//
// Frame renderer — turns a Surface into one batch of terminal output.
//
// Labels change rarely (entry, resize, exit), so every frame is a full
// repaint: no previous-frame diffing. The renderer still avoids redundant
// bytes: it only emits a color change when the color actually changes,
// and only positions the cursor at the start of each row.
//
// All output for a frame is accumulated in memory and written with a
// single `write_all` inside a synchronized-update bracket, so terminals
// that support DEC 2026 show the frame atomically.

use std::io::{self, Write};

use crate::ansi::{self, DecMode};
use crate::cell::Cell;
use crate::color::CellColor;
use crate::surface::Surface;

/// Initial capacity of the output buffer. A full 200×50 repaint with a
/// handful of color changes fits comfortably.
const DEFAULT_CAPACITY: usize = 16_384;

// ─── Renderer ────────────────────────────────────────────────────────────────

/// Full-repaint renderer with color-change tracking.
pub struct Renderer {
    buf: Vec<u8>,
    last_fg: Option<CellColor>,
    last_bg: Option<CellColor>,
}

impl Renderer {
    /// Create a renderer with an empty output buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
            last_fg: None,
            last_bg: None,
        }
    }

    /// Encode `frame` into the output buffer, replacing anything pending.
    ///
    /// The hardware cursor is shown or hidden according to the frame's
    /// cursor-visibility flag.
    pub fn render(&mut self, frame: &Surface) {
        self.buf.clear();
        self.last_fg = None;
        self.last_bg = None;

        // Writes to a Vec<u8> cannot fail.
        let _ = self.encode(frame);
    }

    fn encode(&mut self, frame: &Surface) -> io::Result<()> {
        ansi::set_mode(&mut self.buf, DecMode::SyncUpdate, true)?;
        ansi::set_mode(&mut self.buf, DecMode::ShowCursor, false)?;
        ansi::reset(&mut self.buf)?;

        for y in 0..frame.height() {
            ansi::cursor_to(&mut self.buf, 0, y)?;
            if let Some(row) = frame.row(y) {
                for cell in row {
                    self.write_cell(cell)?;
                }
            }
        }

        ansi::reset(&mut self.buf)?;
        if frame.cursor_visible() {
            ansi::set_mode(&mut self.buf, DecMode::ShowCursor, true)?;
        }
        ansi::set_mode(&mut self.buf, DecMode::SyncUpdate, false)
    }

    fn write_cell(&mut self, cell: &Cell) -> io::Result<()> {
        // The wide character before it already covered this column.
        if cell.is_continuation() {
            return Ok(());
        }

        if self.last_fg != Some(cell.fg) {
            ansi::fg(&mut self.buf, cell.fg)?;
            self.last_fg = Some(cell.fg);
        }
        if self.last_bg != Some(cell.bg) {
            ansi::bg(&mut self.buf, cell.bg)?;
            self.last_bg = Some(cell.bg);
        }

        let ch = cell.character().unwrap_or(' ');
        let ch = if ch.is_control() { ' ' } else { ch };
        let mut utf8 = [0u8; 4];
        self.buf.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
        Ok(())
    }

    /// The encoded bytes of the last rendered frame.
    #[inline]
    #[must_use]
    pub fn output_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Write the pending frame to stdout with a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush(&mut self) -> io::Result<()> {
        self.flush_to(&mut io::stdout().lock())
    }

    /// Write the pending frame to `w` and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        w.write_all(&self.buf)?;
        w.flush()?;
        self.buf.clear();
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
