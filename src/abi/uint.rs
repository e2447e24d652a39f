//! Bit-width-parameterised signed/unsigned integer conversions.
//!
//! Every ABI integer, regardless of its declared bit-width, is stored on
//! the wire as a 32-byte two's-complement [`Word`]. [`Uint`] carries only
//! the logical bit-width and performs the range-checked conversions
//! between a value's signed and unsigned interpretation.

use crate::error::{Error, Result};
use crate::primitives::U256;

/// Widest bit-width any ABI integer type may declare.
pub const MAX_BITS: u16 = 256;

/// 32-byte two's-complement word: the fixed on-wire width for every scalar
/// ABI value, independent of the type's logical bit-width.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Word(U256);

impl Word {
    /// All-zero word.
    pub const ZERO: Self = Self(U256::ZERO);

    /// Build a word from its big-endian two's-complement bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(U256::new(bytes))
    }

    /// Raw big-endian bytes.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// Raw big-endian bytes, by reference.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Wrap a [`U256`] as-is (its bit pattern is already the two's-complement word).
    #[inline]
    pub const fn from_u256(value: U256) -> Self {
        Self(value)
    }

    /// View this word as an unsigned [`U256`].
    #[inline]
    pub const fn to_u256(self) -> U256 {
        self.0
    }

    /// Build a word from a native signed integer, sign-extended to 256 bits.
    pub fn from_i64(value: i64) -> Self {
        if value >= 0 {
            Self(U256::from(value as u64))
        } else {
            Self(U256::ZERO.wrapping_sub(U256::from(value.unsigned_abs())))
        }
    }

    /// Build a word from a native unsigned integer.
    pub fn from_u64(value: u64) -> Self {
        Self(U256::from(value))
    }

    /// Whether the 256-bit two's-complement interpretation of this word is negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.as_bytes()[0] & 0x80 != 0
    }
}

impl From<U256> for Word {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<Word> for U256 {
    fn from(word: Word) -> Self {
        word.0
    }
}

/// `2^exp` as a [`U256`]. `exp` must be `< 256`.
fn pow2(exp: u32) -> U256 {
    U256::ONE.shl(exp)
}

/// A bit-width-parameterised integer bound.
///
/// `Uint(bits)` performs the four total conversions between a value's
/// signed and unsigned interpretation within `bits` bits, each guarded by
/// a range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uint {
    bits: u16,
}

impl Uint {
    /// Construct a bound for the given bit-width.
    ///
    /// `bits` must be in `[1, 256]`; this is a precondition enforced by the
    /// type-string parser and JSON boundary, not re-validated here.
    pub const fn new(bits: u16) -> Self {
        Self { bits }
    }

    /// The bit-width this bound was constructed with.
    #[inline]
    pub const fn bits(&self) -> u16 {
        self.bits
    }

    fn range_error(&self, limit: impl Into<String>) -> Error {
        Error::invalid_range(self.bits, limit)
    }

    /// `toUnsignedLong(signed)`. Requires `signed` to fit in `bits - 1`
    /// signed bits; returns `signed` if non-negative, else
    /// `signed + 2^bits` (two's-complement reinterpretation).
    pub fn to_unsigned_long(&self, signed: i64) -> Result<u64> {
        let bits = self.bits as u32;
        if bits == 0 || bits > 64 {
            return Err(self.range_error(format!("{bits}-bit width not representable as i64/u64")));
        }
        let v = signed as i128;
        let low = -(1i128 << (bits - 1));
        let high = (1i128 << (bits - 1)) - 1;
        if v < low || v > high {
            return Err(self.range_error(format!("signed value {signed} out of range for {bits}-bit integer")));
        }
        let result = if v >= 0 { v } else { v + (1i128 << bits) };
        Ok(result as u64)
    }

    /// `toSignedLong(unsigned)`. Requires `0 <= unsigned < 2^bits`; returns
    /// `unsigned` if less than `2^(bits-1)`, else `unsigned - 2^bits`.
    pub fn to_signed_long(&self, unsigned: u64) -> Result<i64> {
        let bits = self.bits as u32;
        if bits == 0 || bits > 64 {
            return Err(self.range_error(format!("{bits}-bit width not representable as i64/u64")));
        }
        let v = unsigned as i128;
        let bound = 1i128 << bits;
        if v >= bound {
            return Err(self.range_error(format!("unsigned value {unsigned} out of range for {bits}-bit integer")));
        }
        let half = 1i128 << (bits - 1);
        let result = if v < half { v } else { v - bound };
        Ok(result as i64)
    }

    /// `toUnsigned`, over arbitrary-precision (up to 256-bit) two's-complement
    /// words. `signed` must fit in `bits` signed bits.
    pub fn to_unsigned(&self, signed: Word) -> Result<Word> {
        self.check_signed_range(signed)?;
        if self.bits >= MAX_BITS {
            return Ok(signed);
        }
        let mask = pow2(self.bits as u32).checked_sub(U256::ONE).expect("bits < 256");
        Ok(Word(signed.0.bit_and(mask)))
    }

    /// `toSigned`, over arbitrary-precision (up to 256-bit) two's-complement
    /// words. `unsigned` must satisfy `0 <= unsigned < 2^bits`.
    pub fn to_signed(&self, unsigned: Word) -> Result<Word> {
        self.check_unsigned_range(unsigned)?;
        if self.bits >= MAX_BITS {
            return Ok(unsigned);
        }
        let half = pow2((self.bits - 1) as u32);
        if unsigned.0 < half {
            Ok(unsigned)
        } else {
            let bound = pow2(self.bits as u32);
            Ok(Word(unsigned.0.wrapping_sub(bound)))
        }
    }

    /// Whether `word`, read as a signed 256-bit two's-complement value, fits
    /// in `self.bits` signed bits: `-2^(bits-1) <= v <= 2^(bits-1) - 1`.
    pub fn check_signed_range(&self, word: Word) -> Result<()> {
        if self.bits >= MAX_BITS {
            return Ok(());
        }
        let high = pow2((self.bits - 1) as u32);
        let in_range = if word.is_negative() {
            let low = U256::ZERO.wrapping_sub(high);
            word.0 >= low
        } else {
            word.0 < high
        };
        if in_range {
            Ok(())
        } else {
            Err(self.range_error(format!("value out of range for {}-bit signed integer", self.bits)))
        }
    }

    /// Whether `word` satisfies `0 <= word < 2^bits`.
    pub fn check_unsigned_range(&self, word: Word) -> Result<()> {
        if self.bits >= MAX_BITS {
            return Ok(());
        }
        let bound = pow2(self.bits as u32);
        if word.0 < bound {
            Ok(())
        } else {
            Err(self.range_error(format!("value out of range for {}-bit unsigned integer", self.bits)))
        }
    }

    /// Range-check `word` according to `signed`, dispatching to
    /// [`Self::check_signed_range`] or [`Self::check_unsigned_range`].
    pub fn check_range(&self, word: Word, signed: bool) -> Result<()> {
        if signed {
            self.check_signed_range(word)
        } else {
            self.check_unsigned_range(word)
        }
    }
}
