//! EIP-55 checksummed address codec (§4.6).
//!
//! Thin free-function wrapper around [`crate::primitives::Address`]'s
//! existing checksum logic, named to match the ABI type system's own
//! `format`/`wrap` vocabulary rather than the primitive's method names.

use crate::error::{Error, Result};
use crate::primitives::Address;

/// Render `address` as its `0x`-prefixed EIP-55 mixed-case checksum string.
pub fn format(address: Address) -> String {
    address.to_checksum()
}

/// Parse a 42-character `0x`-prefixed checksummed address string,
/// rejecting any string whose case does not match the re-derived
/// checksum.
pub fn wrap(s: &str) -> Result<Address> {
    let hex_part = s.strip_prefix("0x").ok_or_else(|| Error::invalid_hex_at(0, "missing 0x prefix"))?;
    if hex_part.len() != 40 {
        return Err(Error::invalid_length(40, hex_part.len()));
    }
    for (i, c) in hex_part.chars().enumerate() {
        if !c.is_ascii_hexdigit() {
            return Err(Error::invalid_hex_at(i + 2, format!("non-hex character '{c}'")));
        }
    }
    let address = Address::from_hex(hex_part)?;
    if address.to_checksum() != s {
        return Err(Error::ChecksumMismatch);
    }
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_roundtrip() {
        let checksummed = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
        let address = wrap(checksummed).unwrap();
        assert_eq!(format(address), checksummed);
    }

    #[test]
    fn test_vector_passes() {
        assert!(wrap("0x52908400098527886E0F7030069857D2E4169EE7").is_ok());
    }

    #[test]
    fn test_lowercase_equivalent_fails_checksum() {
        let lower = "0x52908400098527886e0f7030069857d2e4169ee7";
        assert_eq!(wrap(lower).unwrap_err(), Error::ChecksumMismatch);
    }

    #[test]
    fn test_non_hex_reports_offset() {
        let bad = "0xzz908400098527886E0F7030069857D2E4169EE7";
        match wrap(bad) {
            Err(Error::InvalidHex { offset, .. }) => assert_eq!(offset, 2),
            other => panic!("expected InvalidHex, got {other:?}"),
        }
    }
}
