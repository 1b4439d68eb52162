//! Compositor — paints a label onto a surface.
//!
//! Rendering is a pure function of (text, style, surface size): every call
//! fills the whole surface with the background first, so repainting after a
//! resize or repainting twice gives the same grid.
//!
//! Two modes:
//!
//! - **Block**: each character becomes a 5×7 glyph of light-colored cells,
//!   one blank column between glyphs, centered on the surface.
//! - **Fallback**: when the block rendering would not fit, the text is
//!   written once at normal size on the middle row, centered when it fits
//!   and clipped at the right edge when it does not. Clipping keeps whole
//!   grapheme clusters, so a wide character is never cut in half.

use bl_term::cell::Cell;
use bl_term::color::CellColor;
use bl_term::surface::{self, Surface};

use crate::glyph::{self, GLYPH_HEIGHT, GLYPH_WIDTH, STEP};
use crate::palette::PaletteColor;

/// The two colors a label is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Fills the surface; also the text color of lit glyph pixels.
    pub background: CellColor,
    /// Lit glyph pixels and fallback text.
    pub light: CellColor,
}

impl Style {
    /// A style from a palette color and an xterm-256 light index, both as
    /// fixed colors.
    #[must_use]
    pub const fn fixed(background: PaletteColor, light: u8) -> Self {
        Self {
            background: background.to_cell_color(),
            light: CellColor::Fixed(light),
        }
    }
}

/// Where and how a label lands on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Nothing to draw: empty text or a zero-sized surface.
    Blank,
    /// One line of plain text starting at (`x`, `y`).
    Fallback { x: u16, y: u16 },
    /// Block glyphs with the top-left pixel of the first glyph at (`x`, `y`).
    Block { x: u16, y: u16 },
}

/// Columns the block rendering of `chars` characters needs.
#[must_use]
pub const fn content_width(chars: usize) -> usize {
    if chars == 0 {
        return 0;
    }
    chars * STEP as usize - 1
}

/// Decide the layout of `text` on a `width` × `height` surface.
#[must_use]
pub fn layout(text: &str, width: u16, height: u16) -> Layout {
    if text.is_empty() || width == 0 || height == 0 {
        return Layout::Blank;
    }

    let needed = content_width(text.chars().count());
    let cols = usize::from(width);
    if cols < needed || height < GLYPH_HEIGHT {
        let text_cols = surface::text_width(text);
        let x = if cols > text_cols {
            // Less than `width`, so it fits.
            #[allow(clippy::cast_possible_truncation)]
            let x = ((cols - text_cols) / 2) as u16;
            x
        } else {
            0
        };
        return Layout::Fallback { x, y: height / 2 };
    }

    // `needed <= cols`, so the difference fits in u16.
    #[allow(clippy::cast_possible_truncation)]
    let x = ((cols - needed) / 2) as u16;
    Layout::Block {
        x,
        y: (height - GLYPH_HEIGHT) / 2,
    }
}

/// Repaint `target` with `text` in `style`. Returns the layout used.
pub fn render(target: &mut Surface, text: &str, style: Style) -> Layout {
    if target.is_empty() {
        return Layout::Blank;
    }
    target.clear_with_bg(style.background);

    let layout = layout(text, target.width(), target.height());
    match layout {
        Layout::Blank => {}
        Layout::Fallback { x, y } => {
            let max_cols = target.width() - x;
            let shown = surface::clip_to_width(text, usize::from(max_cols));
            target.paint_text(x, y, shown, style.light, style.background, max_cols);
        }
        Layout::Block { x, y } => paint_blocks(target, text, x, y, style),
    }
    layout
}

fn paint_blocks(target: &mut Surface, text: &str, x0: u16, y0: u16, style: Style) {
    let pixel = Cell::styled(' ', style.background, style.light);
    let mut x = x0;

    for ch in text.chars() {
        let rows = glyph::lookup(ch);
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                if glyph::lit(rows, col, row) {
                    target.set(x + col, y0 + row, pixel);
                }
            }
        }
        x = x.saturating_add(STEP);
    }
}
