use std::fmt;

use super::{BitRange, MaskExtractor, WORD_BITS};

/// Liquid (still mutable) form of a [`SingleMask`].
///
/// Ranges are appended in ascending source order together with the gap, in
/// positions, separating each range from the previous one (or from bit 0 for
/// the first range). [`freeze`](Self::freeze) consumes the builder, so a
/// frozen mask can never be extended and a liquid one can never be extracted
/// from.
#[derive(Debug, Clone)]
pub struct SingleMaskBuilder {
    ranges: Vec<BitRange>,
    gaps: Vec<u32>,
    capacity: usize,
    window_length: u32,
    filled: u32,
    indels: u32,
    indel_length: u32,
}

impl SingleMaskBuilder {
    /// Start an empty mask holding at most `capacity` ranges that together
    /// cover exactly `window_length` positions once frozen.
    ///
    /// # Panics
    /// Panics if `indel_length` is zero.
    pub fn new(capacity: usize, window_length: u32, indels: u32, indel_length: u32) -> Self {
        assert!(indel_length >= 1, "indel length must be at least 1");
        Self {
            ranges: Vec::with_capacity(capacity),
            gaps: Vec::with_capacity(capacity),
            capacity,
            window_length,
            filled: 0,
            indels,
            indel_length,
        }
    }

    /// Append `range`, preceded by `gap` unused positions.
    ///
    /// # Panics
    /// Panics when the capacity or the window length would be exceeded, when
    /// a range after the first has a zero gap (adjacent runs must be merged
    /// into one range), or when `range` does not start above the previous one.
    pub fn add(&mut self, range: BitRange, gap: u32) -> &mut Self {
        assert!(
            self.ranges.len() < self.capacity,
            "mask already holds its {} ranges",
            self.capacity
        );
        assert!(
            self.filled + range.length() <= self.window_length,
            "range {range} overflows window of length {} ({} already used)",
            self.window_length,
            self.filled
        );
        if let Some(previous) = self.ranges.last() {
            assert!(gap > 0, "range {range} touches {previous}; contiguous runs must be merged");
            assert!(
                range.right_shift() > previous.position(),
                "range {range} does not start above {previous}"
            );
        }

        self.filled += range.length();
        self.ranges.push(range);
        self.gaps.push(gap);
        self
    }

    /// Positions covered so far.
    pub fn filled(&self) -> u32 {
        self.filled
    }

    /// Seal the mask.
    ///
    /// # Panics
    /// Panics if no range was added or the ranges do not cover the full
    /// window length.
    pub fn freeze(self) -> SingleMask {
        assert!(!self.ranges.is_empty(), "cannot freeze a mask without ranges");
        assert_eq!(
            self.filled, self.window_length,
            "mask ranges cover {} of {} window positions",
            self.filled, self.window_length
        );
        SingleMask {
            ranges: self.ranges,
            gaps: self.gaps,
            window_length: self.window_length,
            indels: self.indels,
            indel_length: self.indel_length,
        }
    }
}

/// Frozen seed window: ordered bit ranges plus the gaps in front of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct SingleMask {
    ranges: Vec<BitRange>,
    gaps: Vec<u32>,
    window_length: u32,
    indels: u32,
    indel_length: u32,
}

impl SingleMask {
    /// Shorthand for [`SingleMaskBuilder::new`].
    pub fn builder(
        capacity: usize,
        window_length: u32,
        indels: u32,
        indel_length: u32,
    ) -> SingleMaskBuilder {
        SingleMaskBuilder::new(capacity, window_length, indels, indel_length)
    }

    /// Ranges in ascending source order.
    pub fn ranges(&self) -> &[BitRange] {
        &self.ranges
    }

    /// Gap (in positions) in front of each range; `gaps()[i]` precedes
    /// `ranges()[i]`.
    ///
    /// Gaps are read positions (inactive chunks times chunk length), not a
    /// raw count of inactive chunks.
    pub fn gaps(&self) -> &[u32] {
        &self.gaps
    }

    /// Total positions extracted per bit-plane.
    pub fn window_length(&self) -> u32 {
        self.window_length
    }

    /// Indel budget tolerated by [`MaskExtractor::extract_indel`].
    pub fn indels(&self) -> u32 {
        self.indels
    }

    /// Longest single indel tolerated.
    pub fn indel_length(&self) -> u32 {
        self.indel_length
    }

    /// Extraction view over this mask.
    pub fn extractor(&self) -> MaskExtractor<'_> {
        MaskExtractor::new(self)
    }

    /// Number of values one `extract_indel` call emits.
    ///
    /// Saturates at `u64::MAX`.
    pub fn placement_count(&self) -> u64 {
        let mut memo = vec![None; self.ranges.len() * (self.indels as usize + 1)];
        self.count_from(0, self.indels, &mut memo)
    }

    fn count_from(&self, index: usize, remaining: u32, memo: &mut [Option<u64>]) -> u64 {
        if index + 1 == self.ranges.len() {
            return 1;
        }
        let slot = index * (self.indels as usize + 1) + remaining as usize;
        if let Some(count) = memo[slot] {
            return count;
        }

        let (low, high) = self.tweak_bounds(index + 1, remaining);
        let count = (low..=high).fold(0u64, |acc, tweak| {
            let rest = remaining - self.indels_consumed(tweak);
            acc.saturating_add(self.count_from(index + 1, rest, memo))
        });
        memo[slot] = Some(count);
        count
    }

    /// Inclusive tweak interval allowed across the gap in front of range
    /// `next`, given `remaining` indels.
    ///
    /// The reach is capped at the word width: a range shifted that far only
    /// reads zeros.
    pub(crate) fn tweak_bounds(&self, next: usize, remaining: u32) -> (i32, i32) {
        let reach = u64::from(remaining) * u64::from(self.indel_length);
        let reach = reach.min(u64::from(WORD_BITS)) as u32;
        let shrink = reach.min(self.gaps[next]);
        (-(shrink as i32), reach as i32)
    }

    /// Indels needed to account for a shift of `tweak` positions.
    #[inline]
    pub(crate) fn indels_consumed(&self, tweak: i32) -> u32 {
        tweak.unsigned_abs().div_ceil(self.indel_length)
    }
}

impl fmt::Display for SingleMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (range, gap)) in self.ranges.iter().zip(&self.gaps).enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "[+{gap}] {range}")?;
        }
        Ok(())
    }
}
