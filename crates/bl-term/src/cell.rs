// SPDX-License-Identifier: MIT
//
// Cell — one character position on a surface.
//
// A cell is a codepoint plus a foreground and background color. Labels
// never need bold/italic/underline, so there are no attribute bits here.
//
// Wide characters (CJK, some emoji) occupy two columns. The first cell
// holds the codepoint; the second is a continuation cell (ch = 0) that
// still carries colors so the background fills correctly.

use crate::color::CellColor;

/// Continuation marker: a cell whose `ch` is 0 belongs to the preceding
/// wide character and produces no character output.
const CONTINUATION: u32 = 0;

/// Default character for empty cells.
const SPACE: u32 = b' ' as u32;

// ─── Cell ────────────────────────────────────────────────────────────────────

/// A single surface cell.
///
/// ```
/// use bl_term::cell::Cell;
/// use bl_term::color::CellColor;
///
/// let cell = Cell::new('A').with_bg(CellColor::Fixed(96));
/// assert_eq!(cell.character(), Some('A'));
/// assert_eq!(cell.bg, CellColor::Fixed(96));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Unicode codepoint, or `0` for a continuation cell.
    pub ch: u32,
    /// Foreground (text) color.
    pub fg: CellColor,
    /// Background color.
    pub bg: CellColor,
}

impl Cell {
    /// An empty cell: space, default colors.
    pub const EMPTY: Self = Self {
        ch: SPACE,
        fg: CellColor::Default,
        bg: CellColor::Default,
    };

    /// A cell with a character and default colors.
    #[inline]
    #[must_use]
    pub const fn new(ch: char) -> Self {
        Self {
            ch: ch as u32,
            fg: CellColor::Default,
            bg: CellColor::Default,
        }
    }

    /// A cell with a character and both colors.
    #[inline]
    #[must_use]
    pub const fn styled(ch: char, fg: CellColor, bg: CellColor) -> Self {
        Self {
            ch: ch as u32,
            fg,
            bg,
        }
    }

    /// The second column of a wide character.
    #[inline]
    #[must_use]
    pub const fn continuation(fg: CellColor, bg: CellColor) -> Self {
        Self {
            ch: CONTINUATION,
            fg,
            bg,
        }
    }

    /// Whether this is a continuation cell.
    #[inline]
    #[must_use]
    pub const fn is_continuation(self) -> bool {
        self.ch == CONTINUATION
    }

    /// Whether this cell is a space with default colors.
    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }

    /// The codepoint as a `char`. `None` for continuation cells.
    #[inline]
    #[must_use]
    pub const fn character(self) -> Option<char> {
        if self.ch == CONTINUATION {
            return None;
        }
        char::from_u32(self.ch)
    }

    /// Replace the background color.
    #[inline]
    #[must_use]
    pub const fn with_bg(self, bg: CellColor) -> Self {
        Self { bg, ..self }
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self::EMPTY
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_continuation() {
            return write!(f, "Cell(continuation)");
        }
        let ch = char::from_u32(self.ch).unwrap_or('?');
        write!(f, "Cell({ch:?}")?;
        if !self.fg.is_default() {
            write!(f, ", fg={:?}", self.fg)?;
        }
        if !self.bg.is_default() {
            write!(f, ", bg={:?}", self.bg)?;
        }
        write!(f, ")")
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
