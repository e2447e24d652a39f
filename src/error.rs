//! Error types for ABI schema operations.
//!
//! All errors are represented by the [`Error`] enum, which provides detailed
//! error variants for different failure modes. The [`Result`] type alias
//! provides convenient error handling.

use thiserror::Error as ThisError;

/// Result type alias using this crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during ABI schema operations.
///
/// A malformed type descriptor or signature is [`Error::Parse`], an
/// out-of-range integer is [`Error::InvalidRange`], a value that doesn't
/// match its declared type is [`Error::InvalidValue`], a malformed byte
/// stream is [`Error::InvalidEncoding`], an ambiguous packed decode is
/// [`Error::PackedAmbiguous`], a bad EIP-55 checksum is
/// [`Error::ChecksumMismatch`], and a non-hex character is [`Error::InvalidHex`].
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[non_exhaustive]
pub enum Error {
    /// Malformed type descriptor or canonical signature.
    #[error("parse error at byte {offset}: {message}")]
    Parse {
        /// Byte offset into the input at which parsing failed.
        offset: usize,
        /// Human-readable cause.
        message: String,
    },

    /// A number is out of the signed/unsigned range for its declared bit-width.
    #[error("value out of range for {bits}-bit integer: {limit}")]
    InvalidRange {
        /// The declared bit-width.
        bits: u16,
        /// Description of the violated limit.
        limit: String,
    },

    /// Class mismatch, tuple arity mismatch, scale mismatch, or array
    /// length mismatch, with a `tuple index i: ` / `array index i: ` path
    /// prefix accumulated as the error bubbles up through nested types.
    #[error("{path}")]
    InvalidValue {
        /// Full path-qualified message, e.g. `tuple index 2: array index 3: <cause>`.
        path: String,
    },

    /// Malformed standard ABI byte stream: backward offset, offset below
    /// one word, buffer underflow, or unconsumed trailing bytes.
    #[error("invalid ABI encoding: {0}")]
    InvalidEncoding(String),

    /// Packed decode encountered a tuple with more than one dynamic direct
    /// child at some nesting level, making the decomposition ambiguous.
    #[error("ambiguous packed decode: {path}")]
    PackedAmbiguous {
        /// Path to the ambiguous tuple.
        path: String,
    },

    /// EIP-55 checksum does not match the re-derived checksum.
    #[error("EIP-55 checksum mismatch")]
    ChecksumMismatch,

    /// Non-hex character encountered while decoding a hex string.
    #[error("invalid hex at byte {offset}: {message}")]
    InvalidHex {
        /// Byte offset within the (possibly `0x`-prefixed) input string.
        offset: usize,
        /// Human-readable cause.
        message: String,
    },

    /// Invalid length for the operation (internal plumbing, e.g. fixed-size
    /// byte array construction from a slice of the wrong length).
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Invalid input that does not fit another, more specific variant.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a [`Error::Parse`] error.
    #[inline]
    pub fn parse(offset: usize, message: impl Into<String>) -> Self {
        Self::Parse { offset, message: message.into() }
    }

    /// Create an [`Error::InvalidRange`] error.
    #[inline]
    pub fn invalid_range(bits: u16, limit: impl Into<String>) -> Self {
        Self::InvalidRange { bits, limit: limit.into() }
    }

    /// Create an [`Error::InvalidValue`] error with no path context yet.
    #[inline]
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidValue { path: message.into() }
    }

    /// Create an [`Error::InvalidEncoding`] error.
    #[inline]
    pub fn invalid_encoding(message: impl Into<String>) -> Self {
        Self::InvalidEncoding(message.into())
    }

    /// Create an [`Error::PackedAmbiguous`] error with no path context yet.
    #[inline]
    pub fn packed_ambiguous(path: impl Into<String>) -> Self {
        Self::PackedAmbiguous { path: path.into() }
    }

    /// Create an [`Error::InvalidHex`] error.
    #[inline]
    pub fn invalid_hex(message: impl Into<String>) -> Self {
        Self::InvalidHex { offset: 0, message: message.into() }
    }

    /// Create an [`Error::InvalidHex`] error carrying a byte offset.
    #[inline]
    pub fn invalid_hex_at(offset: usize, message: impl Into<String>) -> Self {
        Self::InvalidHex { offset, message: message.into() }
    }

    /// Create an [`Error::InvalidLength`] error.
    #[inline]
    pub fn invalid_length(expected: usize, actual: usize) -> Self {
        Self::InvalidLength { expected, actual }
    }

    /// Create an [`Error::InvalidInput`] error.
    #[inline]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Prepend a `tuple index i: ` / `array index i: ` path segment to an
    /// [`Error::InvalidValue`] or [`Error::PackedAmbiguous`] error,
    /// composing on recursive calls. Other variants pass through unchanged.
    pub fn with_path_segment(self, segment: impl Into<String>) -> Self {
        let segment = segment.into();
        match self {
            Self::InvalidValue { path } => Self::InvalidValue {
                path: format!("{segment}: {path}"),
            },
            Self::PackedAmbiguous { path } => Self::PackedAmbiguous {
                path: format!("{segment}: {path}"),
            },
            other => other,
        }
    }
}
