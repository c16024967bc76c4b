use std::fmt;
use std::sync::Arc;

use bitvec::slice::BitSlice;
use tracing::{debug, trace};

use crate::combinatorics::{BinomialTable, Combinator};
use crate::mask::{BitRange, SingleMask};

use super::{SeedConfig, SeedConfigError, MAX_WINDOW_SPAN};

/// Value reported by derived getters of an invalid plan.
pub const INVALID: i32 = -1;

/// Resolved chunk layout of a valid plan.
///
/// The first `chunks × chunk_length` read positions are cut into `chunks`
/// equal chunks; every seed window keeps `active_chunks` of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Tiling {
    /// Positions per chunk (`t`).
    pub chunk_length: u32,
    /// Chunks covering the used part of the read (`c = k + s`).
    pub chunks: u32,
    /// Chunks kept per window (`k`).
    pub active_chunks: u32,
    /// Actual window length (`w' = k·t`).
    pub window_length: u32,
    /// Actual read length covered (`r' = c·t`).
    pub read_length: u32,
}

impl Tiling {
    /// Find the tiling with the fewest active chunks satisfying `config`.
    ///
    /// # Panics
    /// Panics if no tiling exists; validated configs always admit `k = w`.
    fn resolve(config: &SeedConfig) -> Self {
        let w = config.window_length;
        for k in 1..=w {
            let chunk_length = w.div_ceil(k);
            let chunks = k + config.substitutions;
            let window_length = k * chunk_length;
            let read_length = chunks * chunk_length;
            if window_length >= w
                && window_length <= MAX_WINDOW_SPAN
                && read_length <= config.read_length
            {
                return Self {
                    chunk_length,
                    chunks,
                    active_chunks: k,
                    window_length,
                    read_length,
                };
            }
        }
        panic!("validated seed configuration {config:?} admits no tiling");
    }
}

/// Seed layout for one read length and sensitivity target.
///
/// Construction never fails: an unusable [`SeedConfig`] produces a plan whose
/// [`valid`](Self::valid) is `false`, whose derived getters return
/// [`INVALID`], and which produces no masks.
#[derive(Debug, Clone)]
pub struct SeedPlan {
    config: SeedConfig,
    table: Arc<BinomialTable>,
    layout: Result<Tiling, SeedConfigError>,
}

impl SeedPlan {
    /// Resolve `config` using a shared binomial table.
    pub fn new(config: SeedConfig, table: Arc<BinomialTable>) -> Self {
        let layout = config.validate().map(|()| Tiling::resolve(&config));
        match &layout {
            Ok(tiling) => debug!(
                read_length = tiling.read_length,
                window_length = tiling.window_length,
                chunk_length = tiling.chunk_length,
                chunks = tiling.chunks,
                active_chunks = tiling.active_chunks,
                "resolved seed tiling"
            ),
            Err(reason) => debug!(?config, %reason, "rejected seed configuration"),
        }
        Self {
            config,
            table,
            layout,
        }
    }

    /// Resolve `config` with a freshly built binomial table.
    pub fn from_config(config: SeedConfig) -> Self {
        Self::new(config, Arc::new(BinomialTable::new()))
    }

    /// Requested configuration.
    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    /// Whether the configuration could be tiled.
    pub fn valid(&self) -> bool {
        self.layout.is_ok()
    }

    /// Why the configuration was rejected, if it was.
    pub fn invalid_reason(&self) -> Option<&SeedConfigError> {
        self.layout.as_ref().err()
    }

    /// Resolved tiling of a valid plan.
    pub fn tiling(&self) -> Option<&Tiling> {
        self.layout.as_ref().ok()
    }

    fn derived(&self, field: impl FnOnce(&Tiling) -> u32) -> i32 {
        self.tiling().map_or(INVALID, |tiling| field(tiling) as i32)
    }

    /// Read positions covered by the chunks (`r'`).
    pub fn read_length(&self) -> i32 {
        self.derived(|t| t.read_length)
    }

    /// Actual window length (`w'`).
    pub fn window_length(&self) -> i32 {
        self.derived(|t| t.window_length)
    }

    /// Width of a two-bit-per-base key for one window (`2·w'`).
    pub fn window_bits(&self) -> i32 {
        self.derived(|t| 2 * t.window_length)
    }

    /// Chunk length (`t`).
    pub fn chunk_length(&self) -> i32 {
        self.derived(|t| t.chunk_length)
    }

    /// Chunk count (`c`).
    pub fn chunks(&self) -> i32 {
        self.derived(|t| t.chunks)
    }

    /// Active chunks per window (`k`).
    pub fn active_chunks(&self) -> i32 {
        self.derived(|t| t.active_chunks)
    }

    /// Number of masks, `C(c, s)`; zero for an invalid plan.
    pub fn number_windows(&self) -> u64 {
        self.tiling().map_or(0, |tiling| {
            self.table
                .get(tiling.chunks as usize, self.config.substitutions as usize)
        })
    }

    /// Build every seed window mask, one per choice of active chunks.
    ///
    /// Order is deterministic: active chunk sets in lexicographic order.
    pub fn masks(&self) -> Vec<SingleMask> {
        let Some(tiling) = self.tiling() else {
            return Vec::new();
        };

        let expected = self.number_windows();
        let mut masks = Vec::with_capacity(expected as usize);
        let produced = Combinator::new(tiling.chunks as usize, tiling.active_chunks as usize)
            .for_each(|active| {
                let mask = build_mask(tiling, &self.config, active);
                trace!(%mask, "seed window");
                masks.push(mask);
            });

        assert_eq!(
            produced, expected,
            "enumerated {produced} chunk selections, expected C({}, {})",
            tiling.chunks, self.config.substitutions
        );
        masks
    }
}

/// Merge runs of adjacent active chunks into single ranges, packing them
/// towards the low end of the output.
fn build_mask(tiling: &Tiling, config: &SeedConfig, active: &BitSlice) -> SingleMask {
    let t = tiling.chunk_length;
    let mut builder = SingleMask::builder(
        tiling.chunks as usize,
        tiling.window_length,
        config.indels,
        config.indel_length,
    );

    let mut gap = 0u32;
    let mut run_start: Option<u32> = None;
    for chunk in 0..=tiling.chunks {
        let is_active = chunk < tiling.chunks && active[chunk as usize];
        match (is_active, run_start) {
            (true, None) => run_start = Some(chunk),
            (true, Some(_)) => {}
            (false, Some(start)) => {
                let length = (chunk - start) * t;
                let final_position = builder.filled() + length - 1;
                builder.add(BitRange::new(chunk * t - 1, length, final_position), gap * t);
                run_start = None;
                gap = 1;
            }
            (false, None) => gap += 1,
        }
    }

    builder.freeze()
}

impl fmt::Display for SeedPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let SeedConfig {
            read_length,
            window_length,
            substitutions,
            indels,
            indel_length,
        } = self.config;
        write!(
            f,
            "r={read_length} w={window_length} s={substitutions} i={indels} l={indel_length}: "
        )?;
        match &self.layout {
            Ok(tiling) => write!(
                f,
                "{} chunks of {} ({} active), window {} ({} bits), read {}, {} windows",
                tiling.chunks,
                tiling.chunk_length,
                tiling.active_chunks,
                tiling.window_length,
                2 * tiling.window_length,
                tiling.read_length,
                self.number_windows()
            ),
            Err(reason) => write!(f, "invalid ({reason})"),
        }
    }
}
