//! Value validation and standard-encoding byte-length pre-computation.
//!
//! `validate(ty, value)` is independent of [`crate::abi::encode`]: it
//! checks that `value` is legal for `ty` and returns the exact number of
//! bytes that subtree will occupy in the standard encoding (head and tail
//! contribution together), so the encoder can pre-size its output buffer
//! instead of growing it incrementally.

use crate::abi::types::{AbiType, ArrayLen};
use crate::abi::uint::Uint;
use crate::abi::value::AbiValue;
use crate::error::{Error, Result};

/// Encoding unit width (32 bytes).
pub const UNIT: usize = 32;

pub(crate) fn padded_len(len: usize) -> usize {
    (len + UNIT - 1) / UNIT * UNIT
}

fn mismatch(ty: &AbiType, value: &AbiValue) -> Error {
    Error::invalid_value(format!("value {value:?} does not match type {ty}"))
}

/// Validate `value` against `ty`, returning the byte length it will occupy
/// in the standard ABI encoding.
pub fn validate(ty: &AbiType, value: &AbiValue) -> Result<usize> {
    match (ty, value) {
        (AbiType::Bool, AbiValue::Bool(_)) => Ok(UNIT),
        (AbiType::Byte, AbiValue::Byte(_)) => Ok(UNIT),
        (AbiType::Int { bits, signed }, AbiValue::Int(word)) => {
            Uint::new(*bits).check_range(*word, *signed)?;
            Ok(UNIT)
        }
        (AbiType::BigDecimal { bits, scale, signed }, AbiValue::BigDecimal { unscaled, scale: value_scale }) => {
            if value_scale != scale {
                return Err(Error::invalid_value(format!(
                    "scale mismatch: type declares {scale}, value carries {value_scale}"
                )));
            }
            Uint::new(*bits).check_range(*unscaled, *signed)?;
            Ok(UNIT)
        }
        (AbiType::Address, AbiValue::Address(_)) => Ok(UNIT),
        (AbiType::FixedBytes(len), AbiValue::FixedBytes(bytes)) => {
            if bytes.len() != *len as usize {
                return Err(Error::invalid_value(format!(
                    "expected {len} bytes, got {}",
                    bytes.len()
                )));
            }
            Ok(UNIT)
        }
        (AbiType::String, AbiValue::String(s)) => Ok(UNIT + padded_len(s.len())),
        (AbiType::Bytes, AbiValue::Bytes(b)) => Ok(UNIT + padded_len(b.len())),
        (AbiType::Array { element, len }, AbiValue::Array(items)) => {
            if let ArrayLen::Fixed(n) = len {
                if items.len() as u64 != *n {
                    return Err(Error::invalid_value(format!(
                        "array length mismatch: expected {n}, got {}",
                        items.len()
                    )));
                }
            }
            let mut body = 0usize;
            let element_dynamic = element.ty.is_dynamic();
            for (i, item) in items.iter().enumerate() {
                let size = validate(&element.ty, item)
                    .map_err(|e| e.with_path_segment(format!("array index {i}")))?;
                body += if element_dynamic { UNIT + size } else { size };
            }
            let prefix = if len.is_dynamic() { UNIT } else { 0 };
            Ok(prefix + body)
        }
        (AbiType::Tuple(fields), AbiValue::Tuple(values)) => {
            if fields.len() != values.len() {
                return Err(Error::invalid_value(format!(
                    "tuple arity mismatch: expected {}, got {}",
                    fields.len(),
                    values.len()
                )));
            }
            let mut total = 0usize;
            for (i, (field, value)) in fields.iter().zip(values.iter()).enumerate() {
                let size = validate(&field.ty, value)
                    .map_err(|e| e.with_path_segment(format!("tuple index {i}")))?;
                total += if field.ty.is_dynamic() { UNIT + size } else { size };
            }
            Ok(total)
        }
        _ => Err(mismatch(ty, value)),
    }
}

/// The static byte length of `ty`, valid only for non-dynamic types.
///
/// Used by the encoder to size a tuple's head without needing a value for
/// every static child up front.
pub fn static_byte_length(ty: &AbiType) -> usize {
    debug_assert!(!ty.is_dynamic(), "static_byte_length called on a dynamic type");
    match ty {
        AbiType::Tuple(fields) => fields.iter().map(|f| static_byte_length(&f.ty)).sum(),
        AbiType::Array { element, len } => match len {
            ArrayLen::Fixed(n) => *n as usize * static_byte_length(&element.ty),
            ArrayLen::Dynamic => unreachable!("dynamic-length arrays are always dynamic"),
        },
        _ => UNIT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::parser::TypeFactory;
    use crate::abi::uint::Word;

    #[test]
    fn test_validate_scalar_sizes() {
        let ty = TypeFactory::parse("uint256").unwrap();
        assert_eq!(validate(&ty, &AbiValue::uint(5)).unwrap(), 32);
    }

    #[test]
    fn test_validate_rejects_out_of_range_int() {
        let ty = TypeFactory::parse("uint8").unwrap();
        assert!(validate(&ty, &AbiValue::uint(256)).is_err());
        assert!(validate(&ty, &AbiValue::uint(255)).is_ok());
    }

    #[test]
    fn test_validate_dynamic_bytes_rounds_up() {
        let ty = TypeFactory::parse("bytes").unwrap();
        assert_eq!(validate(&ty, &AbiValue::Bytes(vec![1, 2, 3])).unwrap(), 32 + 32);
        assert_eq!(validate(&ty, &AbiValue::Bytes(vec![])).unwrap(), 32);
        assert_eq!(validate(&ty, &AbiValue::Bytes(vec![0u8; 32])).unwrap(), 32 + 32);
        assert_eq!(validate(&ty, &AbiValue::Bytes(vec![0u8; 33])).unwrap(), 32 + 64);
    }

    #[test]
    fn test_validate_static_array() {
        let ty = TypeFactory::parse("uint256[3]").unwrap();
        let value = AbiValue::Array(vec![AbiValue::uint(1), AbiValue::uint(2), AbiValue::uint(3)]);
        assert_eq!(validate(&ty, &value).unwrap(), 96);
    }

    #[test]
    fn test_validate_array_length_mismatch() {
        let ty = TypeFactory::parse("uint256[3]").unwrap();
        let value = AbiValue::Array(vec![AbiValue::uint(1), AbiValue::uint(2)]);
        assert!(validate(&ty, &value).is_err());
    }

    #[test]
    fn test_validate_dynamic_array_of_dynamic_elements() {
        let ty = TypeFactory::parse("string[]").unwrap();
        let value = AbiValue::Array(vec![
            AbiValue::String("ab".to_string()),
            AbiValue::String("cd".to_string()),
        ]);
        // length word + 2 offsets + 2 tails (32 + 32 each)
        assert_eq!(validate(&ty, &value).unwrap(), 32 + 2 * 32 + 2 * 64);
    }

    #[test]
    fn test_validate_tuple_arity_mismatch() {
        let ty = TypeFactory::parse("(bool,bool)").unwrap();
        let value = AbiValue::Tuple(vec![AbiValue::Bool(true)]);
        assert!(validate(&ty, &value).is_err());
    }

    #[test]
    fn test_validate_path_context() {
        let ty = TypeFactory::parse("(uint8[2])").unwrap();
        let value = AbiValue::Tuple(vec![AbiValue::Array(vec![
            AbiValue::Int(Word::from_u64(1000)),
            AbiValue::uint(1),
        ])]);
        let err = validate(&ty, &value).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("tuple index 0"));
        assert!(message.contains("array index 0"));
    }
}
