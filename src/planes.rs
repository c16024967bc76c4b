//! Two-bit-plane encoding of short reads.
//!
//! A base's 2-bit code is split across two words: bit 0 of the code for base
//! `i` is stored at bit `i` of [`BitPlanes::lo`], bit 1 at bit `i` of
//! [`BitPlanes::hi`]. One bit per base per word lets the masks work at
//! single-position granularity.

use std::fmt;

use thiserror::Error;

use crate::mask::{SingleMask, WindowSink};

/// Bases held by one pair of plane words.
pub const MAX_BASES: usize = 64;

/// Errors raised while splitting a read into bit-planes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaneEncodingError {
    /// Encountered a byte that is not A, C, G, T or U.
    #[error("unsupported nucleotide '{0}' at position {1}")]
    UnsupportedBase(char, usize),

    /// Read does not fit a 64-bit plane.
    #[error("read of {0} bases exceeds the 64-base plane width")]
    TooLong(usize),
}

/// A read of up to 64 bases as two parallel bit-plane words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BitPlanes {
    lo: u64,
    hi: u64,
    len: usize,
}

impl BitPlanes {
    /// Encode ASCII bases (case-insensitive, `U` read as `T`).
    pub fn encode(sequence: &[u8]) -> Result<Self, PlaneEncodingError> {
        if sequence.len() > MAX_BASES {
            return Err(PlaneEncodingError::TooLong(sequence.len()));
        }

        let mut planes = Self {
            lo: 0,
            hi: 0,
            len: sequence.len(),
        };
        for (idx, &base) in sequence.iter().enumerate() {
            let code = encode_base(base)
                .ok_or(PlaneEncodingError::UnsupportedBase(base as char, idx))?;
            planes.set_code(idx, code);
        }
        Ok(planes)
    }

    /// Assemble planes from raw words.
    ///
    /// # Panics
    /// Panics if `len > 64`.
    pub fn from_words(lo: u64, hi: u64, len: usize) -> Self {
        assert!(len <= MAX_BASES, "length {len} exceeds plane width {MAX_BASES}");
        Self { lo, hi, len }
    }

    /// Plane holding bit 0 of each base code.
    pub fn lo(&self) -> u64 {
        self.lo
    }

    /// Plane holding bit 1 of each base code.
    pub fn hi(&self) -> u64 {
        self.hi
    }

    /// Number of encoded bases.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when no base is encoded.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 2-bit code of the base at `idx`.
    pub fn code_at(&self, idx: usize) -> Option<u8> {
        if idx >= self.len {
            return None;
        }
        Some((((self.hi >> idx) & 1) << 1 | ((self.lo >> idx) & 1)) as u8)
    }

    /// Base at `idx` as an uppercase ASCII byte.
    pub fn base_at(&self, idx: usize) -> Option<u8> {
        self.code_at(idx).map(decode_base)
    }

    /// Decode into a newly allocated vector of uppercase ASCII bases.
    pub fn to_vec(&self) -> Vec<u8> {
        (0..self.len).filter_map(|idx| self.base_at(idx)).collect()
    }

    /// Window key of `mask` for this read, high plane in the upper half.
    pub fn window_key(&self, mask: &SingleMask) -> u64 {
        mask.extractor().extract_pair(self.hi, self.lo)
    }

    /// Emit every indel-tolerant window key of `mask` for this read.
    pub fn indel_keys<S: WindowSink + ?Sized>(&self, mask: &SingleMask, sink: &mut S) {
        mask.extractor().extract_indel(self.hi, self.lo, sink);
    }

    fn set_code(&mut self, idx: usize, code: u8) {
        let bit = 1u64 << idx;
        if code & 0b01 != 0 {
            self.lo |= bit;
        }
        if code & 0b10 != 0 {
            self.hi |= bit;
        }
    }
}

impl fmt::Display for BitPlanes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decoded = self.to_vec();
        write!(f, "{}", String::from_utf8_lossy(&decoded))
    }
}

fn encode_base(base: u8) -> Option<u8> {
    match base {
        b'A' | b'a' => Some(0b00),
        b'C' | b'c' => Some(0b01),
        b'G' | b'g' => Some(0b10),
        b'T' | b't' | b'U' | b'u' => Some(0b11),
        _ => None,
    }
}

fn decode_base(code: u8) -> u8 {
    match code & 0b11 {
        0b00 => b'A',
        0b01 => b'C',
        0b10 => b'G',
        _ => b'T',
    }
}
