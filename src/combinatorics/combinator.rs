//! Exhaustive k-subset enumeration by recursive backtracking.

use bitvec::prelude::*;

/// Enumerates every `to_be_set`-subset of `{0, …, size-1}`.
///
/// Subsets are produced in lexicographic order of their member indices and
/// reported through a callback that sees the current selection as a bit
/// slice (bit `i` set ⇔ index `i` is a member).
#[derive(Debug, Clone)]
pub struct Combinator {
    to_be_set: usize,
    selection: BitVec,
}

impl Combinator {
    /// Create an enumerator over `size` indices choosing `to_be_set` of them.
    ///
    /// # Panics
    /// Panics if `to_be_set > size`.
    pub fn new(size: usize, to_be_set: usize) -> Self {
        assert!(
            to_be_set <= size,
            "cannot choose {to_be_set} members out of {size}"
        );
        Self {
            to_be_set,
            selection: bitvec![0; size],
        }
    }

    /// Number of indices in the ground set.
    pub fn size(&self) -> usize {
        self.selection.len()
    }

    /// Number of members in each produced subset.
    pub fn to_be_set(&self) -> usize {
        self.to_be_set
    }

    /// Invoke `visit` once per subset and return how many were visited.
    ///
    /// The selection is cleared again before this returns, so an enumerator
    /// may be driven any number of times.
    pub fn for_each<F>(&mut self, mut visit: F) -> u64
    where
        F: FnMut(&BitSlice),
    {
        let mut visited = 0u64;
        let left = self.to_be_set;
        comb(&mut self.selection, 0, left, &mut |bits: &BitSlice| {
            visited += 1;
            visit(bits);
        });
        visited
    }

    /// Collect every subset as an owned bit vector.
    pub fn collect(&mut self) -> Vec<BitVec> {
        let mut out = Vec::new();
        self.for_each(|bits| out.push(bits.to_bitvec()));
        out
    }
}

// `i` stops at `n - left` so the remaining `left` members always fit.
fn comb(selection: &mut BitVec, start: usize, left: usize, visit: &mut dyn FnMut(&BitSlice)) {
    if left == 0 {
        visit(selection.as_bitslice());
        return;
    }
    let n = selection.len();
    for i in start..=(n - left) {
        selection.set(i, true);
        comb(selection, i + 1, left - 1, visit);
        selection.set(i, false);
    }
}
