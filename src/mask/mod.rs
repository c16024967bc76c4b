//! Seed window masks and bit extraction.
//!
//! A [`SingleMask`] is an ordered list of [`BitRange`]s. Each range pulls a
//! contiguous run of positions out of a 64-bit bit-plane word and packs it
//! next to the previous run, so applying every range yields the seed window
//! with the inactive chunks squeezed out.
//!
//! Masks start out liquid as a [`SingleMaskBuilder`] and are frozen before
//! use; only frozen masks hand out a [`MaskExtractor`]. Frozen masks are
//! plain immutable values and can be shared across threads freely.

mod bit_range;
mod extractor;
mod single_mask;

pub use bit_range::{BitRange, WORD_BITS};
pub use extractor::{IndelWindows, MaskExtractor, WindowSink};
pub use single_mask::{SingleMask, SingleMaskBuilder};
