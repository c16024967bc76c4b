use std::collections::HashSet;
use std::hash::BuildHasher;
use std::iter::FusedIterator;

use super::SingleMask;

/// Receiver for assembled window values.
///
/// Index construction typically inserts into a table while index search
/// looks values up; both plug in here.
pub trait WindowSink {
    /// Accept one assembled window value.
    fn emit(&mut self, bits: u64);
}

impl<F> WindowSink for F
where
    F: FnMut(u64),
{
    fn emit(&mut self, bits: u64) {
        self(bits)
    }
}

impl WindowSink for Vec<u64> {
    fn emit(&mut self, bits: u64) {
        self.push(bits);
    }
}

impl<S: BuildHasher> WindowSink for HashSet<u64, S> {
    fn emit(&mut self, bits: u64) {
        self.insert(bits);
    }
}

/// Applies a frozen [`SingleMask`] to bit-plane words.
#[derive(Debug, Clone, Copy)]
pub struct MaskExtractor<'a> {
    mask: &'a SingleMask,
}

impl<'a> MaskExtractor<'a> {
    /// Wrap a frozen mask.
    pub fn new(mask: &'a SingleMask) -> Self {
        Self { mask }
    }

    /// Mask being applied.
    pub fn mask(&self) -> &'a SingleMask {
        self.mask
    }

    /// Assemble the window from a single word, without indel tolerance.
    pub fn extract(&self, word: u64) -> u64 {
        self.mask
            .ranges()
            .iter()
            .fold(0, |acc, range| acc | range.mask(word))
    }

    /// Assemble both planes into one key: `extract(v0)` above `extract(v1)`.
    ///
    /// # Panics
    /// Panics if the mask's window length exceeds 32.
    pub fn extract_pair(&self, v0: u64, v1: u64) -> u64 {
        combine(self.mask.window_length(), self.extract(v0), self.extract(v1))
    }

    /// Hand the [`extract_pair`](Self::extract_pair) key to `sink`.
    pub fn emit_pair<S: WindowSink + ?Sized>(&self, v0: u64, v1: u64, sink: &mut S) {
        sink.emit(self.extract_pair(v0, v1));
    }

    /// Emit the key for every admissible indel placement across the mask's
    /// gaps, in the order produced by [`indel_windows`](Self::indel_windows).
    pub fn extract_indel<S: WindowSink + ?Sized>(&self, v0: u64, v1: u64, sink: &mut S) {
        for bits in self.indel_windows(v0, v1) {
            sink.emit(bits);
        }
    }

    /// Lazily enumerate the indel-tolerant keys for one pair of words.
    ///
    /// Range `i + 1` is read with a cumulative tweak built from one shift per
    /// gap. A shift across the gap in front of range `i + 1` lies in
    /// `[-min(reach, gap), reach]` where `reach = remaining × indel_length`,
    /// and consumes `ceil(|shift| / indel_length)` indels. Shifts are visited
    /// in ascending order, depth first, one key per complete placement.
    pub fn indel_windows(&self, v0: u64, v1: u64) -> IndelWindows<'a> {
        IndelWindows {
            mask: self.mask,
            v0,
            v1,
            stack: vec![Placement {
                acc0: 0,
                acc1: 0,
                index: 0,
                remaining: self.mask.indels(),
                tweak: 0,
            }],
        }
    }
}

fn combine(window_length: u32, hi: u64, lo: u64) -> u64 {
    assert!(
        window_length <= 32,
        "window length {window_length} does not fit two planes into 64 bits"
    );
    (hi << window_length) | lo
}

#[derive(Debug, Clone, Copy)]
struct Placement {
    acc0: u64,
    acc1: u64,
    index: usize,
    remaining: u32,
    tweak: i32,
}

/// Iterator returned by [`MaskExtractor::indel_windows`].
#[derive(Debug, Clone)]
pub struct IndelWindows<'a> {
    mask: &'a SingleMask,
    v0: u64,
    v1: u64,
    stack: Vec<Placement>,
}

impl Iterator for IndelWindows<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let mask = self.mask;
        let ranges = mask.ranges();
        while let Some(frame) = self.stack.pop() {
            let range = &ranges[frame.index];
            let acc0 = frame.acc0 | range.mask_tweaked(self.v0, frame.tweak);
            let acc1 = frame.acc1 | range.mask_tweaked(self.v1, frame.tweak);

            let next = frame.index + 1;
            if next == ranges.len() {
                return Some(combine(mask.window_length(), acc0, acc1));
            }

            let (low, high) = mask.tweak_bounds(next, frame.remaining);
            // reversed so the lowest shift is popped first
            for shift in (low..=high).rev() {
                self.stack.push(Placement {
                    acc0,
                    acc1,
                    index: next,
                    remaining: frame.remaining - mask.indels_consumed(shift),
                    tweak: frame.tweak + shift,
                });
            }
        }
        None
    }
}

impl FusedIterator for IndelWindows<'_> {}
