use std::fmt;

/// Width of the words a [`BitRange`] operates on.
pub const WORD_BITS: u32 = u64::BITS;

/// One contiguous run of positions pulled out of a word and relocated.
///
/// `position` is the highest source bit of the run (counted from the low
/// end), so the run covers `position - length + 1 ..= position` and lands at
/// `final_position - length + 1 ..= final_position` in the assembled output.
///
/// Invariants: `1 ≤ length`, `length - 1 ≤ position < 64`,
/// `0 ≤ left_shift ≤ right_shift < 64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct BitRange {
    position: u32,
    length: u32,
    final_position: u32,
    right_shift: u32,
    left_shift: u32,
    field: u64,
}

impl BitRange {
    /// Create a run of `length` bits ending at `position`, relocated so it
    /// ends at `final_position`.
    ///
    /// # Panics
    /// Panics if any invariant listed on the type is violated.
    pub fn new(position: u32, length: u32, final_position: u32) -> Self {
        assert!(length >= 1, "bit range must cover at least one position");
        assert!(
            position < WORD_BITS,
            "bit range position {position} outside a {WORD_BITS}-bit word"
        );
        assert!(
            position + 1 >= length,
            "bit range of length {length} cannot end at position {position}"
        );
        assert!(
            final_position + 1 >= length,
            "bit range of length {length} cannot land at final position {final_position}"
        );
        let right_shift = position + 1 - length;
        let left_shift = final_position + 1 - length;
        assert!(
            left_shift <= right_shift,
            "bit range may only move towards the low end (left shift {left_shift} > right shift {right_shift})"
        );

        Self {
            position,
            length,
            final_position,
            right_shift,
            left_shift,
            field: u64::MAX >> (WORD_BITS - length),
        }
    }

    /// Highest source bit covered.
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Number of bits covered.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Highest output bit written.
    pub fn final_position(&self) -> u32 {
        self.final_position
    }

    /// Lowest source bit covered.
    pub fn right_shift(&self) -> u32 {
        self.right_shift
    }

    /// Lowest output bit written.
    pub fn left_shift(&self) -> u32 {
        self.left_shift
    }

    /// Extract the run from `word` and move it to its output slot.
    #[inline]
    pub fn mask(&self, word: u64) -> u64 {
        ((word >> self.right_shift) & self.field) << self.left_shift
    }

    /// Same as [`mask`](Self::mask) but reads the run `tweak` positions
    /// higher (or lower, when negative) in the source word.
    ///
    /// Source bits past the top of the word read as zero.
    ///
    /// # Panics
    /// Panics if `right_shift + tweak < 0`.
    #[inline]
    pub fn mask_tweaked(&self, word: u64, tweak: i32) -> u64 {
        let shift = self.right_shift as i64 + tweak as i64;
        assert!(shift >= 0, "tweak {tweak} moves bit range {} below bit 0", self);
        let shifted = u32::try_from(shift)
            .ok()
            .and_then(|s| word.checked_shr(s))
            .unwrap_or(0);
        (shifted & self.field) << self.left_shift
    }
}

impl fmt::Display for BitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.right_shift, self.position)?;
        if self.left_shift != self.right_shift {
            write!(f, "->{}", self.left_shift)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_shifts() {
        let range = BitRange::new(11, 4, 3);
        assert_eq!(range.right_shift(), 8);
        assert_eq!(range.left_shift(), 0);
    }

    #[test]
    fn mask_relocates_field() {
        let range = BitRange::new(11, 4, 5);
        let word = (0b1010u64 << 8) | 0xff;
        assert_eq!(range.mask(word), 0b1010 << 2);
    }

    #[test]
    fn full_word_range() {
        let range = BitRange::new(63, 64, 63);
        assert_eq!(range.mask(u64::MAX), u64::MAX);
    }

    #[test]
    fn tweak_reads_shifted_source() {
        let range = BitRange::new(7, 4, 3);
        let word = 0b1101u64 << 6;
        assert_eq!(range.mask_tweaked(word, 2), 0b1101);
        assert_eq!(range.mask_tweaked(word << 1, 3), 0b1101);
        assert_eq!(range.mask_tweaked(word >> 3, -1), 0b1101);
        assert_eq!(range.mask_tweaked(word, 0), range.mask(word));
    }

    #[test]
    fn tweak_past_top_of_word_reads_zero() {
        let range = BitRange::new(63, 4, 3);
        assert_eq!(range.mask_tweaked(u64::MAX, 4), 0);
        assert_eq!(range.mask_tweaked(u64::MAX, 2), 0b0011);
    }

    #[test]
    #[should_panic(expected = "below bit 0")]
    fn negative_effective_shift_panics() {
        BitRange::new(3, 2, 1).mask_tweaked(0, -3);
    }

    #[test]
    #[should_panic(expected = "only move towards the low end")]
    fn upward_relocation_rejected() {
        BitRange::new(3, 2, 5);
    }

    #[test]
    #[should_panic(expected = "cannot end at position")]
    fn range_below_zero_rejected() {
        BitRange::new(2, 4, 3);
    }

    #[test]
    fn display_shows_source_and_destination() {
        assert_eq!(BitRange::new(11, 4, 3).to_string(), "8..=11->0");
        assert_eq!(BitRange::new(3, 4, 3).to_string(), "0..=3");
    }
}
