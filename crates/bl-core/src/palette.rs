//! The label palette: twelve muted xterm-256 tones.
//!
//! Backgrounds come from this fixed, ordered list. All of them are dark
//! enough that the light pixel color reads clearly on top.

use std::fmt;

use bl_term::color::CellColor;

/// A palette color: an xterm-256 index rendered as a fixed color.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaletteColor(u8);

impl PaletteColor {
    /// Wrap an xterm-256 index.
    #[inline]
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// The xterm-256 index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// This color as a cell color the terminal palette cannot remap.
    #[inline]
    #[must_use]
    pub const fn to_cell_color(self) -> CellColor {
        CellColor::Fixed(self.0)
    }
}

impl fmt::Debug for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "colour{}", self.0)
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<PaletteColor> for CellColor {
    fn from(color: PaletteColor) -> Self {
        color.to_cell_color()
    }
}

/// Number of palette entries.
pub const PALETTE_SIZE: usize = 12;

/// The candidate backgrounds, in search order.
pub const PASTELS: [PaletteColor; PALETTE_SIZE] = [
    PaletteColor(95),
    PaletteColor(96),
    PaletteColor(101),
    PaletteColor(102),
    PaletteColor(103),
    PaletteColor(131),
    PaletteColor(132),
    PaletteColor(137),
    PaletteColor(138),
    PaletteColor(139),
    PaletteColor(144),
    PaletteColor(145),
];

/// Default color of lit pixels and fallback text: bright white.
pub const DEFAULT_LIGHT: u8 = 15;
