//! Color assignment — choosing a background for a new label.
//!
//! A pick has two halves:
//!
//! - **Seeding** ([`ColorPicker::start_index`]) turns the wall clock, the
//!   surface id and a running serial into a starting offset, so that
//!   consecutive picks for the same surface begin their search in different
//!   places.
//! - **Selection** ([`select`]) scans the palette from that offset, wrapping,
//!   against an ordered list of predicates. The first tier with a match
//!   wins:
//!
//! | Tier                     | Candidate must be                         |
//! |--------------------------|-------------------------------------------|
//! | [`Tier::Fresh`]          | unused by live labels and not the last    |
//! | [`Tier::Uncontested`]    | unused by live labels                     |
//! | [`Tier::NotRepeated`]    | not the color this surface had last       |
//! | [`Tier::Start`]          | anything: the color at the start index    |
//!
//! Selection is pure. All state lives in [`ColorPicker`].

use std::time::{SystemTime, UNIX_EPOCH};

use crate::palette::PaletteColor;

/// Multiplier spreading surface ids across the palette.
const SURFACE_SPREAD: u64 = 97;

// ─── Tiers ───────────────────────────────────────────────────────────────────

/// Which search pass produced a pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Not used by any live label, and not this surface's last color.
    Fresh,
    /// Not used by any live label. Repeats the last color.
    Uncontested,
    /// Collides with a live label but differs from the last color.
    NotRepeated,
    /// Nothing qualified; the start color is taken as is.
    Start,
}

impl Tier {
    /// The scanning tiers, in priority order. [`Tier::Start`] is the
    /// unconditional fallback and is not scanned.
    pub const SEARCH: [Self; 3] = [Self::Fresh, Self::Uncontested, Self::NotRepeated];

    /// Whether `color` qualifies under this tier.
    #[must_use]
    pub fn admits(self, color: PaletteColor, used: &[PaletteColor], last: Option<PaletteColor>) -> bool {
        let free = !used.contains(&color);
        let new = last != Some(color);
        match self {
            Self::Fresh => free && new,
            Self::Uncontested => free,
            Self::NotRepeated => new,
            Self::Start => true,
        }
    }
}

// ─── Selection ───────────────────────────────────────────────────────────────

/// The outcome of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick {
    /// The chosen color.
    pub color: PaletteColor,
    /// The pass that chose it.
    pub tier: Tier,
    /// The palette index the scan started from.
    pub start: usize,
}

/// Choose a color from `palette`, scanning from `start` (taken modulo the
/// palette length) and wrapping.
///
/// `used` holds the colors of every live label; `last` is the color the
/// target surface was given most recently, if any.
#[must_use]
pub fn select<const N: usize>(
    palette: &[PaletteColor; N],
    start: usize,
    used: &[PaletteColor],
    last: Option<PaletteColor>,
) -> Pick {
    const { assert!(N > 0, "palette must not be empty") };

    let start = start % N;
    for tier in Tier::SEARCH {
        let hit = (0..N)
            .map(|offset| palette[(start + offset) % N])
            .find(|&color| tier.admits(color, used, last));
        if let Some(color) = hit {
            return Pick { color, tier, start };
        }
    }

    Pick {
        color: palette[start],
        tier: Tier::Start,
        start,
    }
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

/// Source of wall-clock seconds.
pub type Clock = fn() -> u64;

/// Seconds since the Unix epoch, or 0 if the clock is before it.
#[must_use]
pub fn system_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

/// Stateful half of the assignment engine: the pick serial and the clock.
#[derive(Debug, Clone)]
pub struct ColorPicker {
    serial: u32,
    clock: Clock,
}

impl ColorPicker {
    /// A picker reading the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(system_clock)
    }

    /// A picker reading `clock`.
    #[must_use]
    pub const fn with_clock(clock: Clock) -> Self {
        Self { serial: 0, clock }
    }

    /// Picks made so far (wrapping).
    #[inline]
    #[must_use]
    pub const fn serial(&self) -> u32 {
        self.serial
    }

    /// Starting offset for the next pick on `surface_id`, out of `len`
    /// palette entries. Advances the serial.
    pub fn start_index(&mut self, surface_id: u32, len: usize) -> usize {
        let seed = (self.clock)()
            .wrapping_add(u64::from(surface_id).wrapping_mul(SURFACE_SPREAD))
            .wrapping_add(u64::from(self.serial));
        self.serial = self.serial.wrapping_add(1);

        // The remainder is below `len`, so it fits back into usize.
        #[allow(clippy::cast_possible_truncation)]
        let start = (seed % len.max(1) as u64) as usize;
        start
    }

    /// Seed and select in one step.
    pub fn pick<const N: usize>(
        &mut self,
        palette: &[PaletteColor; N],
        surface_id: u32,
        used: &[PaletteColor],
        last: Option<PaletteColor>,
    ) -> Pick {
        let start = self.start_index(surface_id, N);
        let pick = select(palette, start, used, last);
        log::debug!(
            "surface {surface_id}: picked {} via {:?} (start {}, {} in use, last {:?})",
            pick.color,
            pick.tier,
            pick.start,
            used.len(),
            last,
        );
        pick
    }
}

impl Default for ColorPicker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PASTELS;
    use pretty_assertions::assert_eq;

    fn zero_clock() -> u64 {
        0
    }

    fn huge_clock() -> u64 {
        u64::MAX
    }

    fn c(index: u8) -> PaletteColor {
        PaletteColor::new(index)
    }

    #[test]
    fn fresh_tier_takes_start_when_free() {
        let pick = select(&PASTELS, 3, &[], None);
        assert_eq!(pick, Pick { color: PASTELS[3], tier: Tier::Fresh, start: 3 });
    }

    #[test]
    fn fresh_tier_skips_used_and_last() {
        let used = [PASTELS[3]];
        let pick = select(&PASTELS, 3, &used, Some(PASTELS[4]));
        assert_eq!(pick.color, PASTELS[5]);
        assert_eq!(pick.tier, Tier::Fresh);
    }

    #[test]
    fn scan_wraps_around() {
        let pick = select(&PASTELS, 11, &[PASTELS[11]], None);
        assert_eq!(pick.color, PASTELS[0]);
    }

    #[test]
    fn start_is_taken_modulo_palette() {
        assert_eq!(select(&PASTELS, 12 + 2, &[], None).start, 2);
    }

    #[test]
    fn uncontested_tier_allows_repeat() {
        // Every color but the last one is in use.
        let used: Vec<_> = PASTELS.iter().copied().filter(|&p| p != PASTELS[7]).collect();
        let pick = select(&PASTELS, 0, &used, Some(PASTELS[7]));
        assert_eq!(pick.color, PASTELS[7]);
        assert_eq!(pick.tier, Tier::Uncontested);
    }

    #[test]
    fn not_repeated_tier_allows_collision() {
        let pick = select(&PASTELS, 0, &PASTELS, Some(PASTELS[0]));
        assert_eq!(pick.color, PASTELS[1]);
        assert_eq!(pick.tier, Tier::NotRepeated);
    }

    #[test]
    fn start_tier_is_last_resort() {
        let palette = [c(95)];
        let pick = select(&palette, 0, &[c(95)], Some(c(95)));
        assert_eq!(pick, Pick { color: c(95), tier: Tier::Start, start: 0 });
    }

    #[test]
    fn tier_predicates() {
        let used = [c(95)];
        let last = Some(c(96));
        assert!(Tier::Fresh.admits(c(101), &used, last));
        assert!(!Tier::Fresh.admits(c(95), &used, last));
        assert!(!Tier::Fresh.admits(c(96), &used, last));
        assert!(Tier::Uncontested.admits(c(96), &used, last));
        assert!(!Tier::Uncontested.admits(c(95), &used, last));
        assert!(Tier::NotRepeated.admits(c(95), &used, last));
        assert!(!Tier::NotRepeated.admits(c(96), &used, last));
        assert!(Tier::Start.admits(c(96), &used, last));
    }

    #[test]
    fn start_index_mixes_clock_surface_and_serial() {
        let mut picker = ColorPicker::with_clock(zero_clock);
        assert_eq!(picker.start_index(0, 12), 0);
        assert_eq!(picker.start_index(0, 12), 1);
        // 1 * 97 + serial 2 = 99 = 8 * 12 + 3.
        assert_eq!(picker.start_index(1, 12), 3);
        assert_eq!(picker.serial(), 3);
    }

    #[test]
    fn start_index_wraps_instead_of_overflowing() {
        let mut picker = ColorPicker::with_clock(huge_clock);
        let start = picker.start_index(u32::MAX, 12);
        assert!(start < 12);
    }

    #[test]
    fn serial_wraps() {
        let mut picker = ColorPicker { serial: u32::MAX, clock: zero_clock };
        picker.start_index(0, 12);
        assert_eq!(picker.serial(), 0);
    }

    #[test]
    fn pick_never_leaves_palette() {
        let mut picker = ColorPicker::new();
        let mut used = Vec::new();
        for id in 0..40 {
            let pick = picker.pick(&PASTELS, id, &used, used.last().copied());
            assert!(PASTELS.contains(&pick.color));
            used.push(pick.color);
        }
    }

    #[test]
    fn successive_picks_for_lone_surface_differ() {
        let mut picker = ColorPicker::with_clock(zero_clock);
        let mut last = None;
        for _ in 0..24 {
            let pick = picker.pick(&PASTELS, 5, &[], last);
            assert_ne!(Some(pick.color), last);
            last = Some(pick.color);
        }
    }
}
