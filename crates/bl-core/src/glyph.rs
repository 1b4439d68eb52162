//! The 5×7 block glyph catalog.
//!
//! Each glyph is seven rows of a 5-bit mask. The most significant of the
//! five bits is the leftmost pixel:
//!
//! ```text
//! 'A'  0x0e  . # # # .
//!      0x11  # . . . #
//!      0x11  # . . . #
//!      0x1f  # # # # #
//!      0x11  # . . . #
//!      0x11  # . . . #
//!      0x11  # . . . #
//! ```
//!
//! Lookup is total: unknown characters render as `?`.

/// Glyph width in pixels (cells).
pub const GLYPH_WIDTH: u16 = 5;

/// Glyph height in pixels (cells).
pub const GLYPH_HEIGHT: u16 = 7;

/// Blank columns between adjacent glyphs.
pub const SPACING: u16 = 1;

/// Horizontal advance per character.
pub const STEP: u16 = GLYPH_WIDTH + SPACING;

/// Seven rows of 5-bit masks.
pub type Rows = [u8; GLYPH_HEIGHT as usize];

/// Character rendered in place of anything the catalog lacks.
const FALLBACK: char = '?';

#[rustfmt::skip]
static GLYPHS: [(char, Rows); 45] = [
    ('A', [0x0e, 0x11, 0x11, 0x1f, 0x11, 0x11, 0x11]),
    ('B', [0x1e, 0x11, 0x11, 0x1e, 0x11, 0x11, 0x1e]),
    ('C', [0x0e, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0e]),
    ('D', [0x1e, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1e]),
    ('E', [0x1f, 0x10, 0x10, 0x1e, 0x10, 0x10, 0x1f]),
    ('F', [0x1f, 0x10, 0x10, 0x1e, 0x10, 0x10, 0x10]),
    ('G', [0x0e, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0e]),
    ('H', [0x11, 0x11, 0x11, 0x1f, 0x11, 0x11, 0x11]),
    ('I', [0x1f, 0x04, 0x04, 0x04, 0x04, 0x04, 0x1f]),
    ('J', [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0c]),
    ('K', [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11]),
    ('L', [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1f]),
    ('M', [0x11, 0x1b, 0x15, 0x15, 0x11, 0x11, 0x11]),
    ('N', [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11]),
    ('O', [0x0e, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0e]),
    ('P', [0x1e, 0x11, 0x11, 0x1e, 0x10, 0x10, 0x10]),
    ('Q', [0x0e, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0d]),
    ('R', [0x1e, 0x11, 0x11, 0x1e, 0x14, 0x12, 0x11]),
    ('S', [0x0f, 0x10, 0x10, 0x0e, 0x01, 0x01, 0x1e]),
    ('T', [0x1f, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04]),
    ('U', [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0e]),
    ('V', [0x11, 0x11, 0x11, 0x11, 0x11, 0x0a, 0x04]),
    ('W', [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0a]),
    ('X', [0x11, 0x11, 0x0a, 0x04, 0x0a, 0x11, 0x11]),
    ('Y', [0x11, 0x11, 0x0a, 0x04, 0x04, 0x04, 0x04]),
    ('Z', [0x1f, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1f]),

    ('0', [0x0e, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0e]),
    ('1', [0x04, 0x0c, 0x04, 0x04, 0x04, 0x04, 0x0e]),
    ('2', [0x0e, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1f]),
    ('3', [0x1e, 0x01, 0x01, 0x0e, 0x01, 0x01, 0x1e]),
    ('4', [0x02, 0x06, 0x0a, 0x12, 0x1f, 0x02, 0x02]),
    ('5', [0x1f, 0x10, 0x10, 0x1e, 0x01, 0x01, 0x1e]),
    ('6', [0x0e, 0x10, 0x10, 0x1e, 0x11, 0x11, 0x0e]),
    ('7', [0x1f, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08]),
    ('8', [0x0e, 0x11, 0x11, 0x0e, 0x11, 0x11, 0x0e]),
    ('9', [0x0e, 0x11, 0x11, 0x0f, 0x01, 0x01, 0x0e]),

    (' ', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('-', [0x00, 0x00, 0x00, 0x1f, 0x00, 0x00, 0x00]),
    ('_', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1f]),
    ('.', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04]),
    (':', [0x00, 0x04, 0x00, 0x00, 0x00, 0x04, 0x00]),
    ('!', [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04]),
    ('+', [0x00, 0x04, 0x04, 0x1f, 0x04, 0x04, 0x00]),
    ('/', [0x01, 0x02, 0x04, 0x08, 0x10, 0x00, 0x00]),
    ('?', [0x0e, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04]),
];

fn find(ch: char) -> Option<&'static Rows> {
    GLYPHS.iter().find(|(c, _)| *c == ch).map(|(_, rows)| rows)
}

/// The bitmap for `ch`, case-folded. Unknown characters get the `?` glyph.
#[must_use]
pub fn lookup(ch: char) -> &'static Rows {
    find(ch.to_ascii_uppercase())
        .or_else(|| find(FALLBACK))
        .unwrap_or(&GLYPHS[0].1)
}

/// Whether the catalog has a glyph of its own for `ch` (case-folded).
#[must_use]
pub fn contains(ch: char) -> bool {
    find(ch.to_ascii_uppercase()).is_some()
}

/// Whether the pixel at (`col`, `row`) of `rows` is lit.
///
/// Out-of-range coordinates are unlit.
#[inline]
#[must_use]
pub const fn lit(rows: &Rows, col: u16, row: u16) -> bool {
    if col >= GLYPH_WIDTH || row >= GLYPH_HEIGHT {
        return false;
    }
    rows[row as usize] & (1 << (GLYPH_WIDTH - 1 - col)) != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn picture(ch: char) -> Vec<String> {
        let rows = lookup(ch);
        (0..GLYPH_HEIGHT)
            .map(|r| {
                (0..GLYPH_WIDTH)
                    .map(|c| if lit(rows, c, r) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn lookup_is_case_insensitive() {
        for ch in 'a'..='z' {
            assert_eq!(lookup(ch), lookup(ch.to_ascii_uppercase()), "{ch}");
            assert!(contains(ch));
        }
    }

    #[test]
    fn unknown_characters_fall_back_to_question_mark() {
        let fallback = lookup('?');
        for ch in ['@', '#', 'é', '中', '\n', '\0', '~'] {
            assert_eq!(lookup(ch), fallback, "{ch:?}");
            assert!(!contains(ch));
        }
    }

    #[test]
    fn catalog_has_no_duplicates_and_fits_five_bits() {
        for (i, (ch, rows)) in GLYPHS.iter().enumerate() {
            assert!(GLYPHS[i + 1..].iter().all(|(c, _)| c != ch), "duplicate {ch}");
            assert!(rows.iter().all(|r| *r < 0x20), "{ch} overflows 5 bits");
        }
    }

    #[test]
    fn full_character_set_is_present() {
        let expected = ('A'..='Z').chain('0'..='9').chain(" -_.:!+/?".chars());
        for ch in expected {
            assert!(contains(ch), "{ch:?}");
        }
    }

    #[test]
    fn leftmost_pixel_is_high_bit() {
        assert_eq!(
            picture('A'),
            vec![".###.", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"]
        );
        assert_eq!(picture('/')[0], "....#");
        assert_eq!(picture('/')[4], "#....");
    }

    #[test]
    fn space_is_blank() {
        assert!(lookup(' ').iter().all(|r| *r == 0));
    }

    #[test]
    fn lit_out_of_range_is_false() {
        let rows = lookup('H');
        assert!(lit(rows, 0, 0));
        assert!(!lit(rows, GLYPH_WIDTH, 0));
        assert!(!lit(rows, 0, GLYPH_HEIGHT));
    }
}
