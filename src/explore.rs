//! What-if analysis over candidate window lengths.
//!
//! For a read length and error budget, every window length that tiles is
//! scored by how many windows it needs (index build cost), how much lookup
//! work a read triggers (search cost) and how likely a read with random
//! substitutions escapes every window (miss probability).

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::combinatorics::BinomialTable;
use crate::plan::{SeedConfig, SeedPlan, Tiling, MAX_READ_LENGTH, MAX_WINDOW_SPAN};

/// Errors rejecting an [`ExploreConfig`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExploreError {
    /// Read length outside `1..=64`.
    #[error("read length {0} must be in 1..=64")]
    ReadLength(u32),

    /// Per-base error rate outside `[0, 1]`.
    #[error("error rate {0} must be within [0, 1]")]
    ErrorRate(f64),

    /// Genome size not strictly positive.
    #[error("genome size {0} must be positive")]
    GenomeSize(f64),
}

/// Inputs of an exploration run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExploreConfig {
    /// Bases per read.
    pub read_length: u32,
    /// Guaranteed substitutions.
    pub substitutions: u32,
    /// Guaranteed indels.
    pub indels: u32,
    /// Longest single indel.
    pub indel_length: u32,
    /// Independent per-base substitution probability.
    pub error_rate: f64,
    /// Reference length in bases, for random-hit estimates.
    pub genome_size: f64,
}

impl ExploreConfig {
    /// Human-genome-sized defaults with a 1% error rate.
    pub fn new(read_length: u32, substitutions: u32, indels: u32, indel_length: u32) -> Self {
        Self {
            read_length,
            substitutions,
            indels,
            indel_length,
            error_rate: 0.01,
            genome_size: 3.1e9,
        }
    }

    fn validate(&self) -> Result<(), ExploreError> {
        if self.read_length == 0 || self.read_length > MAX_READ_LENGTH {
            return Err(ExploreError::ReadLength(self.read_length));
        }
        if !(0.0..=1.0).contains(&self.error_rate) {
            return Err(ExploreError::ErrorRate(self.error_rate));
        }
        if !(self.genome_size > 0.0) {
            return Err(ExploreError::GenomeSize(self.genome_size));
        }
        Ok(())
    }
}

/// Scores for one distinct tiling.
#[derive(Debug, Clone, PartialEq)]
pub struct ExploreRow {
    /// Smallest requested window length resolving to this tiling.
    pub requested_window: u32,
    /// Resolved tiling.
    pub tiling: Tiling,
    /// Number of masks.
    pub windows: u64,
    /// Hash insertions per reference position (one per mask).
    pub build_cost: u64,
    /// Expected lookups plus random hits per read.
    pub search_cost: f64,
    /// Probability that more than `s` chunks carry a substitution.
    pub miss_probability: f64,
}

/// Score every window length from 1 up to `min(r - s, 32 - s)`.
///
/// Window lengths that resolve to an already reported tiling are skipped.
pub fn explore(
    config: &ExploreConfig,
    table: &Arc<BinomialTable>,
) -> Result<Vec<ExploreRow>, ExploreError> {
    config.validate()?;

    let s = config.substitutions;
    let max_window = config
        .read_length
        .saturating_sub(s)
        .min(MAX_WINDOW_SPAN.saturating_sub(s));

    let mut seen = HashSet::new();
    let mut rows = Vec::new();
    for window_length in 1..=max_window {
        let seed = SeedConfig::new(
            config.read_length,
            window_length,
            s,
            config.indels,
            config.indel_length,
        );
        let plan = SeedPlan::new(seed, Arc::clone(table));
        let Some(tiling) = plan.tiling().copied() else {
            debug!(window_length, reason = ?plan.invalid_reason(), "skipping window length");
            continue;
        };
        if !seen.insert(tiling) {
            continue;
        }

        let windows = plan.number_windows();
        let random_hits = config.genome_size / 4f64.powi(tiling.window_length as i32);
        let placements: u64 = if config.indels == 0 {
            windows
        } else {
            plan.masks().iter().map(|mask| mask.placement_count()).sum()
        };

        rows.push(ExploreRow {
            requested_window: window_length,
            tiling,
            windows,
            build_cost: windows,
            search_cost: placements as f64 * (1.0 + random_hits),
            miss_probability: miss_probability(table, &tiling, s, config.error_rate),
        });
    }
    Ok(rows)
}

/// `P[Binomial(c, q) > s]` where `q` is the chance a chunk holds at least
/// one substitution.
pub fn miss_probability(
    table: &BinomialTable,
    tiling: &Tiling,
    substitutions: u32,
    error_rate: f64,
) -> f64 {
    let q = 1.0 - (1.0 - error_rate).powi(tiling.chunk_length as i32);
    let c = tiling.chunks;
    ((substitutions + 1)..=c)
        .map(|j| {
            table.get(c as usize, j as usize) as f64
                * q.powi(j as i32)
                * (1.0 - q).powi((c - j) as i32)
        })
        .sum()
}
