// SPDX-License-Identifier: MIT
//
// CellColor — what a cell's foreground and background actually hold.
//
// A label must look the same on every terminal, whatever theme the user
// has loaded. So there is no palette-indexed color here at all: `Fixed(n)`
// names an xterm-256 index but is emitted as the 24-bit RGB value xterm
// gives that index, which the terminal's palette cannot remap.
//
// `Default` inherits the terminal's own foreground/background and is what
// an untouched cell holds.

use std::fmt;

// ─── CellColor ───────────────────────────────────────────────────────────────

/// Compact color stored in a [`Cell`](crate::cell::Cell).
///
/// Small, `Copy`, and cheap to compare.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// xterm-256 index rendered as its canonical RGB value.
    ///
    /// ```
    /// use bl_term::color::CellColor;
    ///
    /// assert_eq!(CellColor::Fixed(15).to_rgb(), Some((255, 255, 255)));
    /// assert_eq!(CellColor::Fixed(95).to_rgb(), Some((135, 95, 95)));
    /// ```
    Fixed(u8),

    /// Terminal default color.
    #[default]
    Default,
}

impl CellColor {
    /// The RGB triple this color is emitted as, using xterm defaults. Returns `None` for [`CellColor::Default`].
    #[must_use]
    pub fn to_rgb(self) -> Option<(u8, u8, u8)> {
        match self {
            Self::Fixed(idx) => Some(ansi::ansi256_to_rgb(idx)),
            Self::Default => None,
        }
    }

    /// Whether this is the terminal default.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

impl fmt::Debug for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(idx) => write!(f, "fixed({idx})"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ─── ANSI Palette ────────────────────────────────────────────────────────────

pub mod ansi {
    //! The xterm 256-color palette.
    //!
    //! - Colors 0–7: standard colors
    //! - Colors 8–15: bright variants
    //! - Colors 16–231: a 6×6×6 RGB cube
    //! - Colors 232–255: a 24-step grayscale ramp

    /// The ANSI-16 palette as RGB, using xterm defaults.
    pub const ANSI16_RGB: [(u8, u8, u8); 16] = [
        (0, 0, 0),       // 0: Black
        (205, 0, 0),     // 1: Red
        (0, 205, 0),     // 2: Green
        (205, 205, 0),   // 3: Yellow
        (0, 0, 238),     // 4: Blue
        (205, 0, 205),   // 5: Magenta
        (0, 205, 205),   // 6: Cyan
        (229, 229, 229), // 7: White
        (127, 127, 127), // 8: Bright Black
        (255, 0, 0),     // 9: Bright Red
        (0, 255, 0),     // 10: Bright Green
        (255, 255, 0),   // 11: Bright Yellow
        (92, 92, 255),   // 12: Bright Blue
        (255, 0, 255),   // 13: Bright Magenta
        (0, 255, 255),   // 14: Bright Cyan
        (255, 255, 255), // 15: Bright White
    ];

    /// Convert an ANSI-256 palette index to RGB.
    #[must_use]
    pub fn ansi256_to_rgb(idx: u8) -> (u8, u8, u8) {
        match idx {
            0..=15 => ANSI16_RGB[idx as usize],

            16..=231 => {
                let idx = idx - 16;
                let r_idx = idx / 36;
                let g_idx = (idx % 36) / 6;
                let b_idx = idx % 6;

                // Cube steps: 0, 95, 135, 175, 215, 255
                let to_value = |i: u8| -> u8 { if i == 0 { 0 } else { 55 + 40 * i } };

                (to_value(r_idx), to_value(g_idx), to_value(b_idx))
            }

            232..=255 => {
                let v = 8 + 10 * (idx - 232);
                (v, v, v)
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cube_corners() {
        assert_eq!(ansi::ansi256_to_rgb(16), (0, 0, 0));
        assert_eq!(ansi::ansi256_to_rgb(231), (255, 255, 255));
        assert_eq!(ansi::ansi256_to_rgb(196), (255, 0, 0));
    }

    #[test]
    fn pastel_indices_resolve() {
        // 137 = cube (3, 2, 1)
        assert_eq!(ansi::ansi256_to_rgb(137), (175, 135, 95));
        assert_eq!(ansi::ansi256_to_rgb(145), (175, 175, 175));
    }

    #[test]
    fn grayscale_ramp() {
        assert_eq!(ansi::ansi256_to_rgb(232), (8, 8, 8));
        assert_eq!(ansi::ansi256_to_rgb(255), (238, 238, 238));
    }

    #[test]
    fn fixed_resolves_through_xterm_table() {
        for idx in [0u8, 15, 95, 139, 244] {
            assert_eq!(CellColor::Fixed(idx).to_rgb(), Some(ansi::ansi256_to_rgb(idx)));
        }
    }

    #[test]
    fn default_has_no_rgb() {
        assert!(CellColor::Default.to_rgb().is_none());
        assert_eq!(CellColor::default(), CellColor::Default);
        assert!(CellColor::Default.is_default());
        assert!(!CellColor::Fixed(0).is_default());
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", CellColor::Fixed(101)), "fixed(101)");
        assert_eq!(format!("{}", CellColor::Fixed(7)), "fixed(7)");
        assert_eq!(format!("{:?}", CellColor::Default), "default");
    }
}
