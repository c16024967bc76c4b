//! Seed tiling: from a sensitivity target to the full set of window masks.
//!
//! The used part of a read is cut into `c = k + s` equal chunks. Any `s`
//! substitutions touch at most `s` chunks, so at least `k` chunks survive
//! intact; emitting one mask per `k`-subset of chunks (`C(c, s)` masks)
//! guarantees one of them sees only intact chunks.

mod config;
mod seed_plan;

pub use config::{SeedConfig, SeedConfigError, MAX_READ_LENGTH, MAX_WINDOW_SPAN};
pub use seed_plan::{SeedPlan, Tiling, INVALID};
