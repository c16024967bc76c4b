use thiserror::Error;

/// Largest read length a single bit-plane word can hold.
pub const MAX_READ_LENGTH: u32 = 64;
/// Upper bound on `window_length + substitutions`; keeps a two-plane key
/// within 64 bits.
pub const MAX_WINDOW_SPAN: u32 = 32;

/// Reasons a [`SeedConfig`] cannot be tiled.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeedConfigError {
    /// Read length outside `1..=64`.
    #[error("read length {read_length} must be in 1..=64")]
    ReadLength {
        /// Requested read length.
        read_length: u32,
    },

    /// Window length outside `1..=read_length`.
    #[error("window length {window_length} must be in 1..={read_length}")]
    WindowLength {
        /// Requested window length.
        window_length: u32,
        /// Requested read length.
        read_length: u32,
    },

    /// `window_length + substitutions` exceeds the two-plane key budget.
    #[error(
        "window length {window_length} plus {substitutions} substitutions exceeds 32"
    )]
    WindowSpan {
        /// Requested window length.
        window_length: u32,
        /// Requested substitution budget.
        substitutions: u32,
    },

    /// More substitutions than positions left outside the window.
    #[error(
        "{substitutions} substitutions do not fit beside a {window_length}-long window in a {read_length}-long read"
    )]
    Substitutions {
        /// Requested substitution budget.
        substitutions: u32,
        /// Requested window length.
        window_length: u32,
        /// Requested read length.
        read_length: u32,
    },

    /// Indel budget larger than the substitution budget.
    #[error("{indels} indels exceed the {substitutions} substitution budget")]
    Indels {
        /// Requested indel budget.
        indels: u32,
        /// Requested substitution budget.
        substitutions: u32,
    },

    /// Maximum indel length of zero.
    #[error("maximum indel length must be at least 1")]
    IndelLength,
}

/// Requested sensitivity for a seed layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct SeedConfig {
    /// Bases per read (`r`).
    pub read_length: u32,

    /// Minimum seed window length in bases (`w`).
    pub window_length: u32,

    /// Substitutions that must never cause a miss (`s`).
    pub substitutions: u32,

    /// Indels that must never cause a miss (`i`, at most `s`).
    pub indels: u32,

    /// Longest single indel covered by the indel budget (`l`).
    pub indel_length: u32,
}

impl SeedConfig {
    /// Create a configuration; nothing is checked until [`validate`](Self::validate).
    pub fn new(
        read_length: u32,
        window_length: u32,
        substitutions: u32,
        indels: u32,
        indel_length: u32,
    ) -> Self {
        Self {
            read_length,
            window_length,
            substitutions,
            indels,
            indel_length,
        }
    }

    /// Substitution-only configuration (no indel budget, indel length 1).
    pub fn substitutions_only(read_length: u32, window_length: u32, substitutions: u32) -> Self {
        Self::new(read_length, window_length, substitutions, 0, 1)
    }

    /// Check the inputs in order and report the first violated constraint.
    pub fn validate(&self) -> Result<(), SeedConfigError> {
        let Self {
            read_length,
            window_length,
            substitutions,
            indels,
            indel_length,
        } = *self;

        if read_length == 0 || read_length > MAX_READ_LENGTH {
            return Err(SeedConfigError::ReadLength { read_length });
        }
        if window_length == 0 || window_length > read_length {
            return Err(SeedConfigError::WindowLength {
                window_length,
                read_length,
            });
        }
        if window_length.saturating_add(substitutions) > MAX_WINDOW_SPAN {
            return Err(SeedConfigError::WindowSpan {
                window_length,
                substitutions,
            });
        }
        if substitutions > read_length - window_length {
            return Err(SeedConfigError::Substitutions {
                substitutions,
                window_length,
                read_length,
            });
        }
        if indels > substitutions {
            return Err(SeedConfigError::Indels {
                indels,
                substitutions,
            });
        }
        if indel_length == 0 {
            return Err(SeedConfigError::IndelLength);
        }
        Ok(())
    }
}
