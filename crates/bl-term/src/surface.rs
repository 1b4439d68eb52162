// SPDX-License-Identifier: MIT
//
// Surface — the character-cell grid a label is composed onto.
//
// Design:
//
//   - Flat `Vec<Cell>` with row-major indexing (`y * width + x`). Rows are
//     contiguous, so left-to-right scans are linear.
//
//   - A surface carries a cursor-visibility flag. Hosts read it after
//     painting to decide whether to show the hardware cursor.
//
//   - Text painting clips at a column limit and never leaves half a wide
//     character behind: a wide glyph that does not fit is dropped, not
//     split.
//
//   - Zero-sized surfaces are valid. Every accessor degrades to "nothing
//     there" instead of panicking.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::cell::Cell;
use crate::color::CellColor;

// ─── Surface ────────────────────────────────────────────────────────────────────

/// A 2D grid of cells.
///
/// ```
/// use bl_term::surface::Surface;
/// use bl_term::cell::Cell;
///
/// let mut s = Surface::new(20, 4);
/// assert_eq!((s.width(), s.height()), (20, 4));
///
/// s.set(5, 3, Cell::new('X'));
/// assert_eq!(s.get(5, 3).unwrap().character(), Some('X'));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    cursor_visible: bool,
}

impl Surface {
    // ─── Construction ────────────────────────────────────────────────────

    /// A surface of empty cells with the cursor visible.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; size],
            cursor_visible: true,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// Width in columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Whether either dimension is zero.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether `(x, y)` is inside the surface.
    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    const fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// The cell at `(x, y)`, or `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// All cells in row-major order.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row as a slice. `None` if `y` is out of bounds.
    #[inline]
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y < self.height {
            let start = self.index(0, y);
            Some(&self.cells[start..start + usize::from(self.width)])
        } else {
            None
        }
    }

    /// Iterate cells with their `(x, y)` coordinates.
    #[allow(clippy::cast_possible_truncation)]
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Cell)> {
        let w = usize::from(self.width).max(1);
        self.cells.iter().enumerate().map(move |(i, cell)| {
            // x < width and y < height, both u16.
            ((i % w) as u16, (i / w) as u16, cell)
        })
    }

    /// Whether the host should show a cursor over this surface.
    #[inline]
    #[must_use]
    pub const fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Set or clear the cursor-visibility flag.
    #[inline]
    pub const fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    // ─── Clear & Resize ──────────────────────────────────────────────────

    /// Reset every cell to an empty cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Reset every cell to a space on `bg`.
    pub fn clear_with_bg(&mut self, bg: CellColor) {
        self.cells.fill(Cell::EMPTY.with_bg(bg));
    }

    /// Change dimensions. All content is cleared; the cursor flag is kept.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let size = usize::from(width) * usize::from(height);
        self.cells.clear();
        self.cells.resize(size, Cell::EMPTY);
    }

    // ─── Writing ─────────────────────────────────────────────────────────

    /// Write a cell. Returns `false` if `(x, y)` is out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        self.break_wide_char_at(x, y);
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        true
    }

    /// Break any wide character touching `(x, y)` before it is overwritten.
    fn break_wide_char_at(&mut self, x: u16, y: u16) {
        let idx = self.index(x, y);

        if self.cells[idx].is_continuation() && x > 0 {
            let prev = self.index(x - 1, y);
            self.cells[prev].ch = u32::from(b' ');
        }

        if x + 1 < self.width {
            let next = self.index(x + 1, y);
            if self.cells[next].is_continuation() {
                let bg = self.cells[next].bg;
                self.cells[next] = Cell::EMPTY.with_bg(bg);
            }
        }
    }

    /// Paint `text` left to right from `(x, y)`, using at most `max_cols`
    /// columns and never crossing the right edge.
    ///
    /// Zero-width characters are skipped. A wide character that would not
    /// fit entirely is dropped along with everything after it.
    ///
    /// Returns the number of columns painted.
    pub fn paint_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: CellColor,
        bg: CellColor,
        max_cols: u16,
    ) -> u16 {
        if y >= self.height || x >= self.width {
            return 0;
        }
        let limit = x.saturating_add(max_cols).min(self.width);
        let mut col = x;

        for ch in text.chars() {
            let w = match ch.width() {
                Some(0) | None => continue,
                Some(w) => w,
            };
            // w is 1 or 2.
            #[allow(clippy::cast_possible_truncation)]
            let w = w as u16;
            if col + w > limit {
                break;
            }

            self.set(col, y, Cell::styled(ch, fg, bg));
            if w == 2 {
                self.set(col + 1, y, Cell::continuation(fg, bg));
            }
            col += w;
        }

        col - x
    }

    /// Copy `src` into this surface with its top-left corner at `(x, y)`.
    /// Anything falling outside this surface is dropped.
    pub fn blit(&mut self, src: &Self, x: u16, y: u16) {
        for (sx, sy, cell) in src.iter() {
            let (Some(dx), Some(dy)) = (x.checked_add(sx), y.checked_add(sy)) else {
                continue;
            };
            if self.in_bounds(dx, dy) {
                let idx = self.index(dx, dy);
                self.cells[idx] = *cell;
            }
        }
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Surface({}x{})", self.width, self.height)
    }
}

// ─── Text Width Utilities ───────────────────────────────────────────────────────

/// Display width of a string in terminal columns.
///
/// ```
/// use bl_term::surface::text_width;
///
/// assert_eq!(text_width("HELLO"), 5);
/// assert_eq!(text_width("中文"), 4);
/// ```
#[must_use]
pub fn text_width(s: &str) -> usize {
    s.width()
}

/// The longest prefix of `s` that fits in `cols` columns, cut on a
/// grapheme boundary.
///
/// ```
/// use bl_term::surface::clip_to_width;
///
/// assert_eq!(clip_to_width("ABCDEF", 3), "ABC");
/// assert_eq!(clip_to_width("A中B", 2), "A");
/// assert_eq!(clip_to_width("AB", 10), "AB");
/// ```
#[must_use]
pub fn clip_to_width(s: &str, cols: usize) -> &str {
    let mut used = 0;
    let mut end = 0;
    for (offset, grapheme) in s.grapheme_indices(true) {
        let w = grapheme.width();
        if used + w > cols {
            break;
        }
        used += w;
        end = offset + grapheme.len();
    }
    &s[..end]
}

// ─── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row_text(s: &Surface, y: u16) -> String {
        s.row(y)
            .unwrap()
            .iter()
            .filter_map(|c| c.character())
            .collect()
    }

    fn filled(width: u16, height: u16, bg: CellColor) -> Surface {
        let mut s = Surface::new(width, height);
        s.clear_with_bg(bg);
        s
    }

    #[test]
    fn new_creates_correct_size() {
        let s = Surface::new(80, 24);
        assert_eq!(s.width(), 80);
        assert_eq!(s.height(), 24);
        assert_eq!(s.cells().len(), 80 * 24);
        assert!(s.cursor_visible());
    }

    #[test]
    fn zero_sized_surfaces_are_inert() {
        let mut s = Surface::new(0, 5);
        assert!(s.is_empty());
        assert!(s.get(0, 0).is_none());
        assert!(!s.set(0, 0, Cell::new('x')));
        assert_eq!(s.paint_text(0, 0, "hi", CellColor::Default, CellColor::Default, 10), 0);
        assert_eq!(s.iter().count(), 0);
    }

    #[test]
    fn clear_with_bg_fills_every_cell() {
        let s = filled(4, 3, CellColor::Fixed(102));
        assert!(s.iter().all(|(_, _, c)| c.bg == CellColor::Fixed(102) && c.ch == u32::from(b' ')));
    }

    #[test]
    fn iter_yields_coordinates() {
        let s = Surface::new(3, 2);
        let coords: Vec<_> = s.iter().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn resize_clears_and_keeps_cursor_flag() {
        let mut s = filled(4, 4, CellColor::Fixed(1));
        s.set_cursor_visible(false);
        s.resize(6, 2);
        assert_eq!((s.width(), s.height()), (6, 2));
        assert!(s.iter().all(|(_, _, c)| c.is_empty()));
        assert!(!s.cursor_visible());
    }

    #[test]
    fn set_out_of_bounds_is_rejected() {
        let mut s = Surface::new(2, 2);
        assert!(s.set(1, 1, Cell::new('a')));
        assert!(!s.set(2, 0, Cell::new('a')));
        assert!(!s.set(0, 2, Cell::new('a')));
    }

    #[test]
    fn paint_text_clips_at_limit() {
        let mut s = Surface::new(10, 1);
        let n = s.paint_text(2, 0, "HELLO", CellColor::Default, CellColor::Default, 3);
        assert_eq!(n, 3);
        assert_eq!(row_text(&s, 0), "  HEL     ");
    }

    #[test]
    fn paint_text_clips_at_right_edge() {
        let mut s = Surface::new(4, 1);
        let n = s.paint_text(1, 0, "HELLO", CellColor::Default, CellColor::Default, 100);
        assert_eq!(n, 3);
        assert_eq!(row_text(&s, 0), " HEL");
    }

    #[test]
    fn paint_text_never_splits_wide_chars() {
        let mut s = Surface::new(3, 1);
        let n = s.paint_text(0, 0, "A中", CellColor::Default, CellColor::Default, 2);
        assert_eq!(n, 1);
        assert_eq!(s.get(1, 0).unwrap().ch, u32::from(b' '));

        let n = s.paint_text(0, 0, "A中", CellColor::Default, CellColor::Default, 3);
        assert_eq!(n, 3);
        assert!(s.get(2, 0).unwrap().is_continuation());
    }

    #[test]
    fn overwriting_half_a_wide_char_breaks_it() {
        let mut s = Surface::new(4, 1);
        s.paint_text(0, 0, "中", CellColor::Default, CellColor::Fixed(9), 4);
        s.set(1, 0, Cell::new('x'));
        assert_eq!(s.get(0, 0).unwrap().character(), Some(' '));
        assert_eq!(s.get(1, 0).unwrap().character(), Some('x'));
    }

    #[test]
    fn blit_copies_with_offset_and_clips() {
        let src = filled(3, 2, CellColor::Fixed(138));
        let mut dst = Surface::new(4, 3);
        dst.blit(&src, 2, 2);
        assert_eq!(dst.get(2, 2).unwrap().bg, CellColor::Fixed(138));
        assert_eq!(dst.get(3, 2).unwrap().bg, CellColor::Fixed(138));
        assert!(dst.get(1, 2).unwrap().is_empty());
        assert!(dst.get(2, 1).unwrap().is_empty());
    }

    #[test]
    fn clip_to_width_respects_graphemes() {
        assert_eq!(clip_to_width("", 4), "");
        assert_eq!(clip_to_width("ABC", 0), "");
        assert_eq!(clip_to_width("e\u{301}X", 1), "e\u{301}");
        assert_eq!(clip_to_width("中文", 3), "中");
    }

    #[test]
    fn text_width_counts_columns() {
        assert_eq!(text_width(""), 0);
        assert_eq!(text_width("AB"), 2);
        assert_eq!(text_width("A中"), 3);
    }
}
