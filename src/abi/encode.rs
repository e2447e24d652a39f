//! Standard ABI encoding (head/tail, §4.4).
//!
//! [`encode_parameters`] implements the two-pass algorithm directly: a
//! first pass lays down one 32-byte head slot per top-level value (either
//! the value itself, for static types, or a placeholder offset, for
//! dynamic ones), and a second pass appends each dynamic value's own
//! encoding to the tail, patching its head slot with the tail's running
//! offset.

use crate::abi::types::{AbiType, ArrayLen};
use crate::abi::validate::{validate, UNIT};
use crate::abi::value::AbiValue;
use crate::error::{Error, Result};

fn mismatch(ty: &AbiType, value: &AbiValue) -> Error {
    Error::invalid_value(format!("value {value:?} does not match type {ty}"))
}

fn write_word(out: &mut Vec<u8>, word: &[u8; 32]) {
    out.extend_from_slice(word);
}

fn write_offset(out: &mut Vec<u8>, offset: usize) {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&(offset as u64).to_be_bytes());
    write_word(out, &word);
}

fn write_length(out: &mut Vec<u8>, len: usize) {
    write_offset(out, len);
}

fn write_padded(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(bytes);
    let padding = (UNIT - (bytes.len() % UNIT)) % UNIT;
    out.extend(std::iter::repeat(0u8).take(padding));
}

/// Encode a single value of type `ty`, appending it to `out`.
///
/// For dynamic types this writes the value's own head/tail block (with no
/// external pointer); callers composing a tuple or array are responsible
/// for the pointer slot that refers to it.
fn encode_value(ty: &AbiType, value: &AbiValue, out: &mut Vec<u8>) -> Result<()> {
    match (ty, value) {
        (AbiType::Bool, AbiValue::Bool(b)) => {
            let mut word = [0u8; 32];
            word[31] = *b as u8;
            write_word(out, &word);
            Ok(())
        }
        (AbiType::Byte, AbiValue::Byte(b)) => {
            let mut word = [0u8; 32];
            word[0] = *b;
            write_word(out, &word);
            Ok(())
        }
        (AbiType::Int { .. }, AbiValue::Int(word)) => {
            write_word(out, word.as_bytes());
            Ok(())
        }
        (AbiType::BigDecimal { .. }, AbiValue::BigDecimal { unscaled, .. }) => {
            write_word(out, unscaled.as_bytes());
            Ok(())
        }
        (AbiType::Address, AbiValue::Address(address)) => {
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(address.as_bytes());
            write_word(out, &word);
            Ok(())
        }
        (AbiType::FixedBytes(len), AbiValue::FixedBytes(bytes)) => {
            let mut word = [0u8; 32];
            word[..*len as usize].copy_from_slice(bytes);
            write_word(out, &word);
            Ok(())
        }
        (AbiType::String, AbiValue::String(s)) => {
            write_length(out, s.len());
            write_padded(out, s.as_bytes());
            Ok(())
        }
        (AbiType::Bytes, AbiValue::Bytes(bytes)) => {
            write_length(out, bytes.len());
            write_padded(out, bytes);
            Ok(())
        }
        (AbiType::Array { element, len }, AbiValue::Array(items)) => {
            if let ArrayLen::Fixed(n) = len {
                if items.len() as u64 != *n {
                    return Err(Error::invalid_value(format!(
                        "array length mismatch: expected {n}, got {}",
                        items.len()
                    )));
                }
            }
            if len.is_dynamic() {
                write_length(out, items.len());
            }
            encode_record(items.iter().map(|item| (&element.ty, item)).enumerate(), out, "array index")
        }
        (AbiType::Tuple(fields), AbiValue::Tuple(values)) => {
            if fields.len() != values.len() {
                return Err(Error::invalid_value(format!(
                    "tuple arity mismatch: expected {}, got {}",
                    fields.len(),
                    values.len()
                )));
            }
            encode_record(
                fields.iter().map(|f| &f.ty).zip(values.iter()).enumerate(),
                out,
                "tuple index",
            )
        }
        _ => Err(mismatch(ty, value)),
    }
}

/// Encode a sequence of `(type, value)` pairs as a head/tail record: one
/// head slot per pair (direct value for static types, offset for dynamic
/// ones), followed by the tail bytes of the dynamic pairs in order.
///
/// Shared by [`encode_value`]'s `Tuple` and `Array` arms and by
/// [`encode_parameters`], since a parameter list is itself a head/tail
/// record with no enclosing length prefix.
fn encode_record<'a>(
    pairs: impl Iterator<Item = (usize, (&'a AbiType, &'a AbiValue))>,
    out: &mut Vec<u8>,
    segment_label: &str,
) -> Result<()> {
    let pairs: Vec<_> = pairs.collect();
    let mut head_size = 0usize;
    for (_, (ty, _)) in &pairs {
        head_size += if ty.is_dynamic() { UNIT } else { crate::abi::validate::static_byte_length(ty) };
    }

    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();
    for (i, (ty, value)) in pairs {
        if ty.is_dynamic() {
            let offset = head_size + tail.len();
            write_offset(&mut head, offset);
            encode_value(ty, value, &mut tail).map_err(|e| e.with_path_segment(format!("{segment_label} {i}")))?;
        } else {
            encode_value(ty, value, &mut head).map_err(|e| e.with_path_segment(format!("{segment_label} {i}")))?;
        }
    }
    out.extend_from_slice(&head);
    out.extend_from_slice(&tail);
    Ok(())
}

/// Encode an ordered parameter list the way a function call's argument
/// tuple is encoded: as a head/tail record with no enclosing length word,
/// matching the selector-prefixed calldata layout (§4.7).
pub fn encode_parameters(types: &[AbiType], values: &[AbiValue]) -> Result<Vec<u8>> {
    if types.len() != values.len() {
        return Err(Error::invalid_value(format!(
            "parameter count mismatch: expected {}, got {}",
            types.len(),
            values.len()
        )));
    }
    let mut total = 0usize;
    for (i, (ty, value)) in types.iter().zip(values.iter()).enumerate() {
        let size = validate(ty, value).map_err(|e| e.with_path_segment(format!("parameter {i}")))?;
        total += if ty.is_dynamic() { UNIT + size } else { size };
    }
    let mut out = Vec::with_capacity(total);
    encode_record(types.iter().zip(values.iter()).enumerate(), &mut out, "parameter")?;
    Ok(out)
}

/// Encode a single value standing alone (not inside a parameter list),
/// pre-sized via [`validate`].
pub fn encode_single(ty: &AbiType, value: &AbiValue) -> Result<Vec<u8>> {
    let size = validate(ty, value)?;
    let mut out = Vec::with_capacity(size + if ty.is_dynamic() { UNIT } else { 0 });
    encode_value(ty, value, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::parser::TypeFactory;
    use crate::primitives::{Address, Hex};

    fn hex(bytes: &[u8]) -> String {
        Hex::encode(bytes)
    }

    #[test]
    fn test_encode_bool_and_uint() {
        let types = vec![AbiType::Bool, AbiType::uint256()];
        let values = vec![AbiValue::Bool(true), AbiValue::uint(69)];
        let out = encode_parameters(&types, &values).unwrap();
        assert_eq!(out.len(), 64);
        assert_eq!(out[31], 1);
        assert_eq!(out[63], 69);
    }

    #[test]
    fn test_encode_dynamic_bytes_vector() {
        // sam(bytes,bool,uint256[]) with ("dave", true, [1,2,3])
        let types = vec![
            AbiType::Bytes,
            AbiType::Bool,
            AbiType::Array { element: Box::new(crate::abi::types::Field::unnamed(AbiType::uint256())), len: ArrayLen::Dynamic },
        ];
        let values = vec![
            AbiValue::Bytes(b"dave".to_vec()),
            AbiValue::Bool(true),
            AbiValue::Array(vec![AbiValue::uint(1), AbiValue::uint(2), AbiValue::uint(3)]),
        ];
        let out = encode_parameters(&types, &values).unwrap();
        let expected = "0000000000000000000000000000000000000000000000000000000000000060\
0000000000000000000000000000000000000000000000000000000000000001\
00000000000000000000000000000000000000000000000000000000000000a0\
0000000000000000000000000000000000000000000000000000000000000004\
6461766500000000000000000000000000000000000000000000000000000000\
0000000000000000000000000000000000000000000000000000000000000003\
0000000000000000000000000000000000000000000000000000000000000001\
0000000000000000000000000000000000000000000000000000000000000002\
0000000000000000000000000000000000000000000000000000000000000003"
            .replace('\n', "");
        assert_eq!(hex(&out), expected);
    }

    #[test]
    fn test_encode_static_array_inline() {
        let ty = TypeFactory::parse("uint8[2]").unwrap();
        let value = AbiValue::Array(vec![AbiValue::uint(1), AbiValue::uint(2)]);
        let out = encode_single(&ty, &value).unwrap();
        assert_eq!(out.len(), 64);
    }

    #[test]
    fn test_encode_address() {
        let ty = AbiType::Address;
        let address = Address::from_hex("0x0000000000000000000000000000000000dEaD").unwrap();
        let out = encode_single(&ty, &AbiValue::Address(address)).unwrap();
        assert_eq!(out.len(), 32);
        assert!(out[..12].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_encode_tuple_arity_mismatch() {
        let ty = TypeFactory::parse("(bool,bool)").unwrap();
        let value = AbiValue::Tuple(vec![AbiValue::Bool(true)]);
        assert!(encode_single(&ty, &value).is_err());
    }
}
