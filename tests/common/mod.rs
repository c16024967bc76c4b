//! Read construction and mutation helpers shared by the integration tests.

#![allow(dead_code)]

use seedmask::{BitPlanes, SingleMask};

const BASES: [u8; 4] = *b"ACGT";

/// Turn 2-bit codes into bit-planes (codes beyond 64 are dropped).
pub fn planes_from_codes(codes: &[u8]) -> BitPlanes {
    let ascii: Vec<u8> = codes
        .iter()
        .take(64)
        .map(|&code| BASES[(code & 0b11) as usize])
        .collect();
    BitPlanes::encode(&ascii).expect("codes always encode")
}

/// Replace the base at each position with a different one; `shifts[i]` in
/// `1..=3` picks which.
pub fn substitute(codes: &[u8], positions: &[usize], shifts: &[u8]) -> Vec<u8> {
    let mut mutated = codes.to_vec();
    for (&pos, &shift) in positions.iter().zip(shifts) {
        mutated[pos] = (mutated[pos] + shift) % 4;
    }
    mutated
}

/// One indel placed inside the gap in front of a mask range.
#[derive(Debug, Clone, Copy)]
pub struct GapIndel {
    /// Range whose gap receives the indel (always ≥ 1).
    pub range: usize,
    /// Insert when `true`, delete otherwise.
    pub insertion: bool,
    /// Requested length (deletions are clamped to the gap).
    pub length: usize,
    /// Arbitrary seed choosing the offset inside the gap.
    pub offset: usize,
}

/// Read-coordinate interval `[start, end)` of the gap in front of `ranges()[range]`.
pub fn gap_span(mask: &SingleMask, range: usize) -> (usize, usize) {
    let ranges = mask.ranges();
    let start = ranges[range - 1].position() as usize + 1;
    let end = ranges[range].right_shift() as usize;
    (start, end)
}

/// Apply indels that each sit in a distinct gap of `mask`.
///
/// Indels are applied from the highest gap down so earlier coordinates stay
/// valid.
pub fn apply_gap_indels(codes: &[u8], mask: &SingleMask, indels: &[GapIndel]) -> Vec<u8> {
    let mut ordered = indels.to_vec();
    ordered.sort_by(|a, b| b.range.cmp(&a.range));

    let mut mutated = codes.to_vec();
    for indel in ordered {
        let (start, end) = gap_span(mask, indel.range);
        let gap_len = end - start;
        if indel.insertion {
            let at = start + indel.offset % (gap_len + 1);
            let inserted = (0..indel.length).map(|i| ((indel.offset + i) % 4) as u8);
            mutated.splice(at..at, inserted);
        } else {
            let len = indel.length.min(gap_len);
            let at = start + indel.offset % (gap_len - len + 1);
            mutated.drain(at..at + len);
        }
    }
    mutated
}

/// All `k`-subsets of `0..n` as bitmasks, by brute force over `0..2^n`.
pub fn brute_force_subsets(n: usize, k: usize) -> Vec<u32> {
    (0u32..(1u32 << n))
        .filter(|mask| mask.count_ones() as usize == k)
        .collect()
}
