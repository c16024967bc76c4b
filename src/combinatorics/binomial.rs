//! Precomputed binomial coefficients for `n ≤ 64`.

use std::fmt;

/// Largest `n` covered by the table.
pub const MAX_N: usize = 64;

const WIDTH: usize = MAX_N + 1;

/// Pascal's triangle for `0 ≤ k ≤ n ≤ 64`, stored row-major.
///
/// Built once and shared (typically behind an `Arc`) by whichever component
/// needs combinatorial counts. `C(64, 32)` still fits in a `u64`.
#[derive(Clone, PartialEq, Eq)]
pub struct BinomialTable {
    rows: Box<[u64]>,
}

impl BinomialTable {
    /// Build the full triangle via `C(n,k) = C(n-1,k-1) + C(n-1,k)`.
    pub fn new() -> Self {
        let mut rows = vec![0u64; WIDTH * WIDTH].into_boxed_slice();
        for n in 0..WIDTH {
            rows[n * WIDTH] = 1;
            for k in 1..=n {
                let above_left = rows[(n - 1) * WIDTH + (k - 1)];
                let above = if k < n { rows[(n - 1) * WIDTH + k] } else { 0 };
                rows[n * WIDTH + k] = above_left + above;
            }
        }
        Self { rows }
    }

    /// Number of `k`-subsets of an `n`-set. Zero when `k > n`.
    ///
    /// # Panics
    /// Panics if `n > 64`.
    #[inline]
    pub fn get(&self, n: usize, k: usize) -> u64 {
        assert!(n <= MAX_N, "binomial table covers n <= {MAX_N}, got n = {n}");
        if k > n {
            return 0;
        }
        self.rows[n * WIDTH + k]
    }

    /// Signed variant of [`get`](Self::get): negative `k` yields zero.
    pub fn get_signed(&self, n: usize, k: i64) -> u64 {
        if k < 0 {
            return 0;
        }
        self.get(n, k as usize)
    }
}

impl fmt::Debug for BinomialTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinomialTable")
            .field("max_n", &MAX_N)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_rows_match_pascal() {
        let table = BinomialTable::new();
        assert_eq!(table.get(0, 0), 1);
        assert_eq!(table.get(4, 2), 6);
        assert_eq!(table.get(5, 3), 10);
        assert_eq!(table.get(10, 0), 1);
        assert_eq!(table.get(10, 10), 1);
    }

    #[test]
    fn out_of_domain_k_is_zero() {
        let table = BinomialTable::new();
        assert_eq!(table.get(3, 4), 0);
        assert_eq!(table.get_signed(3, -1), 0);
        assert_eq!(table.get_signed(3, 0), 1);
    }

    #[test]
    fn largest_entry_fits() {
        let table = BinomialTable::new();
        assert_eq!(table.get(64, 32), 1_832_624_140_942_590_534);
        assert_eq!(table.get(64, 1), 64);
        assert_eq!(table.get(64, 63), 64);
    }

    #[test]
    #[should_panic(expected = "binomial table covers")]
    fn n_above_limit_panics() {
        BinomialTable::new().get(65, 1);
    }
}
