//! Combinatorial building blocks for seed tiling.
//!
//! - [`BinomialTable`]: O(1) lookups of `C(n, k)` for `n ≤ 64`
//! - [`Combinator`]: exhaustive k-subset enumeration, exactly `C(n, k)` visits

mod binomial;
mod combinator;

pub use binomial::{BinomialTable, MAX_N};
pub use combinator::Combinator;
