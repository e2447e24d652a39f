//! Standard ABI decoding: the cursor/state-machine of §4.8.
//!
//! The decoder mirrors [`crate::abi::encode`]'s head/tail layout. Offsets
//! are interpreted relative to the start of the tuple frame they appear
//! in. Lenient mode tolerates a dynamic child's offset pointing strictly
//! forward of the previous dynamic child's offset (so extra zero padding
//! between head and tail does not break decoding); a backward-pointing
//! offset is rejected. Every buffer access is bounds-checked up front —
//! no slice index is ever allowed to panic.

use crate::abi::types::{AbiType, ArrayLen};
use crate::abi::uint::{Uint, Word};
use crate::abi::validate::{padded_len, static_byte_length, UNIT};
use crate::abi::value::AbiValue;
use crate::error::{Error, Result};
use crate::primitives::Address;

/// Largest offset/length value accepted in a head-word: fits a 31-bit
/// unsigned range (§4.4, "an integer that overflows the 31-bit positive
/// range... raises INVALID_ENCODING").
const MAX_OFFSET: u64 = (1u64 << 31) - 1;

fn read_word(buf: &[u8], pos: usize) -> Result<[u8; 32]> {
    let end = pos
        .checked_add(UNIT)
        .ok_or_else(|| Error::invalid_encoding("position overflow"))?;
    if buf.len() < end {
        return Err(Error::invalid_encoding("buffer underflow"));
    }
    let mut word = [0u8; 32];
    word.copy_from_slice(&buf[pos..end]);
    Ok(word)
}

/// Read a 32-byte big-endian offset/length word, rejecting values outside
/// the 31-bit positive range.
fn read_bounded_word(buf: &[u8], pos: usize) -> Result<usize> {
    let word = read_word(buf, pos)?;
    if word[..24].iter().any(|&b| b != 0) {
        return Err(Error::invalid_encoding("offset or length exceeds 31-bit range"));
    }
    let value = u64::from_be_bytes(word[24..].try_into().expect("8-byte slice"));
    if value > MAX_OFFSET {
        return Err(Error::invalid_encoding("offset or length exceeds 31-bit range"));
    }
    Ok(value as usize)
}

fn slice(buf: &[u8], start: usize, len: usize) -> Result<&[u8]> {
    let end = start
        .checked_add(len)
        .ok_or_else(|| Error::invalid_encoding("slice overflow"))?;
    buf.get(start..end).ok_or_else(|| Error::invalid_encoding("buffer underflow"))
}

/// Decode a single value of type `ty` starting at absolute position `pos`,
/// returning the value and the number of bytes its own encoding occupies.
fn decode_value(ty: &AbiType, buf: &[u8], pos: usize) -> Result<(AbiValue, usize)> {
    match ty {
        AbiType::Bool => {
            let word = read_word(buf, pos)?;
            if word[..31].iter().any(|&b| b != 0) || word[31] > 1 {
                return Err(Error::invalid_encoding("malformed bool word"));
            }
            Ok((AbiValue::Bool(word[31] == 1), UNIT))
        }
        AbiType::Byte => {
            let word = read_word(buf, pos)?;
            Ok((AbiValue::Byte(word[0]), UNIT))
        }
        AbiType::Int { bits, signed } => {
            let word = Word::from_bytes(read_word(buf, pos)?);
            Uint::new(*bits).check_range(word, *signed)?;
            Ok((AbiValue::Int(word), UNIT))
        }
        AbiType::BigDecimal { bits, scale, signed } => {
            let word = Word::from_bytes(read_word(buf, pos)?);
            Uint::new(*bits).check_range(word, *signed)?;
            Ok((AbiValue::BigDecimal { unscaled: word, scale: *scale }, UNIT))
        }
        AbiType::Address => {
            let word = read_word(buf, pos)?;
            if word[..12].iter().any(|&b| b != 0) {
                return Err(Error::invalid_encoding("address padding bytes not zero"));
            }
            let address = Address::from_slice(&word[12..])?;
            Ok((AbiValue::Address(address), UNIT))
        }
        AbiType::FixedBytes(len) => {
            let word = read_word(buf, pos)?;
            Ok((AbiValue::FixedBytes(word[..*len as usize].to_vec()), UNIT))
        }
        AbiType::String => {
            let len = read_bounded_word(buf, pos)?;
            let payload = slice(buf, pos + UNIT, padded_len(len))?;
            let s = String::from_utf8(payload[..len].to_vec())
                .map_err(|_| Error::invalid_encoding("string payload is not valid UTF-8"))?;
            Ok((AbiValue::String(s), UNIT + padded_len(len)))
        }
        AbiType::Bytes => {
            let len = read_bounded_word(buf, pos)?;
            let payload = slice(buf, pos + UNIT, padded_len(len))?;
            Ok((AbiValue::Bytes(payload[..len].to_vec()), UNIT + padded_len(len)))
        }
        AbiType::Array { element, len } => {
            let (count, head_start) = match len {
                ArrayLen::Dynamic => (read_bounded_word(buf, pos)?, pos + UNIT),
                ArrayLen::Fixed(n) => (*n as usize, pos),
            };
            let types: Vec<&AbiType> = std::iter::repeat(&element.ty).take(count).collect();
            let (values, consumed) = decode_record(&types, buf, head_start, None, "array index")?;
            Ok((AbiValue::Array(values), (head_start - pos) + consumed))
        }
        AbiType::Tuple(fields) => {
            let types: Vec<&AbiType> = fields.iter().map(|f| &f.ty).collect();
            let (values, consumed) = decode_record(&types, buf, pos, None, "tuple index")?;
            Ok((AbiValue::Tuple(values), consumed))
        }
    }
}

/// Decode a head/tail record: one entry per type in `types`, starting at
/// `base`. When `wanted` is `Some`, only those indices are eagerly
/// decoded; the rest become [`AbiValue::Absent`] without their tails ever
/// being visited (§4.4 "Partial decode"). Returns the decoded values and
/// the number of bytes from `base` to the furthest point any decoded tail
/// reached.
fn decode_record(
    types: &[&AbiType],
    buf: &[u8],
    base: usize,
    wanted: Option<&[usize]>,
    segment_label: &str,
) -> Result<(Vec<AbiValue>, usize)> {
    let head_length: usize = types
        .iter()
        .map(|ty| if ty.is_dynamic() { UNIT } else { static_byte_length(ty) })
        .sum();
    let head_end = base
        .checked_add(head_length)
        .ok_or_else(|| Error::invalid_encoding("head length overflow"))?;
    if buf.len() < head_end {
        return Err(Error::invalid_encoding("buffer underflow reading head"));
    }

    let mut values = Vec::with_capacity(types.len());
    let mut head_pos = base;
    let mut cursor_min = head_end;
    let mut tail_end = head_end;

    for (i, ty) in types.iter().enumerate() {
        let want = wanted.map_or(true, |indices| indices.contains(&i));
        if ty.is_dynamic() {
            if want {
                let offset = read_bounded_word(buf, head_pos)?;
                if offset < UNIT {
                    return Err(Error::invalid_encoding("offset below one unit"));
                }
                let abs = base
                    .checked_add(offset)
                    .ok_or_else(|| Error::invalid_encoding("offset overflow"))?;
                if abs < cursor_min {
                    return Err(Error::invalid_encoding("offset points backward"));
                }
                let (value, consumed) = decode_value(ty, buf, abs)
                    .map_err(|e| e.with_path_segment(format!("{segment_label} {i}")))?;
                cursor_min = abs;
                tail_end = tail_end.max(abs + consumed);
                values.push(value);
            } else {
                values.push(AbiValue::Absent);
            }
            head_pos += UNIT;
        } else {
            if want {
                let (value, _) = decode_value(ty, buf, head_pos)
                    .map_err(|e| e.with_path_segment(format!("{segment_label} {i}")))?;
                values.push(value);
            } else {
                values.push(AbiValue::Absent);
            }
            head_pos += static_byte_length(ty);
        }
    }

    Ok((values, tail_end - base))
}

/// Decode a full parameter list, rejecting any byte past the decoded
/// region at the top level (§8 property 9).
pub fn decode_parameters(types: &[AbiType], data: &[u8]) -> Result<Vec<AbiValue>> {
    let refs: Vec<&AbiType> = types.iter().collect();
    let (values, consumed) = decode_record(&refs, data, 0, None, "parameter")?;
    if data.len() != consumed {
        return Err(Error::invalid_encoding("unconsumed trailing bytes"));
    }
    Ok(values)
}

/// Decode only the parameters at `indices` (strictly increasing; a
/// precondition the caller must uphold, not re-validated here), leaving
/// the rest as [`AbiValue::Absent`]. No trailing-byte check is performed,
/// since a partial decode never visits every tail.
pub fn decode_parameters_partial(types: &[AbiType], data: &[u8], indices: &[usize]) -> Result<Vec<AbiValue>> {
    let refs: Vec<&AbiType> = types.iter().collect();
    let (values, _) = decode_record(&refs, data, 0, Some(indices), "parameter")?;
    Ok(values)
}

/// Decode a single standalone value (not part of a parameter list).
pub fn decode_single(ty: &AbiType, data: &[u8]) -> Result<AbiValue> {
    let (value, consumed) = decode_value(ty, data, 0)?;
    if data.len() != consumed {
        return Err(Error::invalid_encoding("unconsumed trailing bytes"));
    }
    Ok(value)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::abi::encode::{encode_parameters, encode_single};
    use crate::abi::types::Field;
    use proptest::prelude::*;

    proptest! {
        // §8 property 1: decode(T, encode(T, v)) == v whenever v validates.
        #[test]
        fn roundtrip_uint256(raw in any::<u64>()) {
            let ty = AbiType::uint256();
            let value = AbiValue::uint(raw);
            let encoded = encode_single(&ty, &value).unwrap();
            prop_assert_eq!(decode_single(&ty, &encoded).unwrap(), value);
        }

        #[test]
        fn roundtrip_int256(raw in any::<i64>()) {
            let ty = AbiType::int256();
            let value = AbiValue::int(raw);
            let encoded = encode_single(&ty, &value).unwrap();
            prop_assert_eq!(decode_single(&ty, &encoded).unwrap(), value);
        }

        #[test]
        fn roundtrip_bytes(data in prop::collection::vec(any::<u8>(), 0..256)) {
            let ty = AbiType::Bytes;
            let value = AbiValue::Bytes(data);
            let encoded = encode_single(&ty, &value).unwrap();
            prop_assert_eq!(decode_single(&ty, &encoded).unwrap(), value);
        }

        #[test]
        fn roundtrip_string(s in ".{0,64}") {
            let ty = AbiType::String;
            let value = AbiValue::String(s);
            let encoded = encode_single(&ty, &value).unwrap();
            prop_assert_eq!(decode_single(&ty, &encoded).unwrap(), value);
        }

        #[test]
        fn roundtrip_dynamic_uint_array(values in prop::collection::vec(any::<u64>(), 0..8)) {
            let ty = AbiType::Array {
                element: Box::new(Field::unnamed(AbiType::uint256())),
                len: ArrayLen::Dynamic,
            };
            let value = AbiValue::Array(values.into_iter().map(AbiValue::uint).collect());
            let types = vec![ty];
            let values = vec![value.clone()];
            let encoded = encode_parameters(&types, &values).unwrap();
            let decoded = decode_parameters(&types, &encoded).unwrap();
            prop_assert_eq!(decoded[0].clone(), value);
        }
    }
}
