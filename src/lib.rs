//! # Spaced-Seed Masks for Approximate-Match Read Indexing
//!
//! This library designs the seed windows an index uses to guarantee that a
//! read with up to `s` substitutions (and up to `i` indels of length ≤ `l`)
//! still shares at least one exact hash key with its source location.
//!
//! ## Core Algorithm
//!
//! 1. **Tiling**: cut the read into `c = k + s` equal chunks of length `t`
//! 2. **Enumeration**: one mask per choice of `k` active chunks, `C(c, s)` masks
//! 3. **Extraction**: shift/mask the active chunks of two bit-plane words into
//!    a key of at most 64 bits
//! 4. **Indel tolerance**: re-read each later run under every admissible
//!    shift of the gaps in front of it
//!
//! ## Usage Example
//!
//! ```
//! use seedmask::{BitPlanes, SeedConfig, SeedPlan};
//!
//! let plan = SeedPlan::from_config(SeedConfig::new(64, 16, 1, 0, 1));
//! assert!(plan.valid());
//! assert_eq!(plan.number_windows(), plan.masks().len() as u64);
//!
//! let read = BitPlanes::encode(b"ACGTACGTACGTACGTACGTACGTACGTACGT").unwrap();
//! let keys: Vec<u64> = plan.masks().iter().map(|mask| read.window_key(mask)).collect();
//! assert_eq!(keys.len(), 2);
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod combinatorics; // Binomial table and subset enumeration
pub mod mask;          // Bit ranges, masks and extraction
pub mod plan;          // Seed tiling search
pub mod planes;        // Two-bit-plane read encoding
pub mod explore;       // Cost / miss-rate analysis

// Re-exports for convenience
pub use combinatorics::{BinomialTable, Combinator};
pub use mask::{BitRange, IndelWindows, MaskExtractor, SingleMask, SingleMaskBuilder, WindowSink};
pub use plan::{SeedConfig, SeedConfigError, SeedPlan, Tiling};
pub use planes::{BitPlanes, PlaneEncodingError};
pub use explore::{explore, ExploreConfig, ExploreError, ExploreRow};
