//! Hexadecimal encoding/decoding utilities.
//!
//! Provides functions for converting between bytes and hex strings.

use crate::error::{Error, Result};

/// Hex encoding/decoding utilities.
pub struct Hex;

impl Hex {
    /// Decode hex string to bytes.
    ///
    /// Accepts with or without `0x` prefix.
    pub fn decode(s: &str) -> Result<Vec<u8>> {
        let s = s.strip_prefix("0x").unwrap_or(s);

        // Handle odd-length hex by prepending zero
        let s = if s.len() % 2 == 1 {
            format!("0{}", s)
        } else {
            s.to_string()
        };

        hex::decode(&s).map_err(|e| Error::invalid_hex(e.to_string()))
    }

    /// Decode hex string to fixed-size array.
    pub fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N]> {
        let bytes = Self::decode(s)?;
        if bytes.len() != N {
            return Err(Error::invalid_length(N, bytes.len()));
        }

        let mut arr = [0u8; N];
        arr.copy_from_slice(&bytes);
        Ok(arr)
    }

    /// Encode bytes to hex string with 0x prefix.
    pub fn encode(bytes: &[u8]) -> String {
        format!("0x{}", hex::encode(bytes))
    }

    /// Encode bytes to hex string without prefix.
    pub fn encode_raw(bytes: &[u8]) -> String {
        hex::encode(bytes)
    }

    /// Check if string is valid hex.
    pub fn is_valid(s: &str) -> bool {
        let s = s.strip_prefix("0x").unwrap_or(s);
        s.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Get the byte length that a hex string would decode to.
    pub fn decoded_len(s: &str) -> usize {
        let s = s.strip_prefix("0x").unwrap_or(s);
        (s.len() + 1) / 2
    }

    /// Concatenate multiple byte slices into a single Vec.
    pub fn concat(slices: &[&[u8]]) -> Vec<u8> {
        let total_len: usize = slices.iter().map(|s| s.len()).sum();
        let mut result = Vec::with_capacity(total_len);
        for slice in slices {
            result.extend_from_slice(slice);
        }
        result
    }

    /// Concatenate multiple hex strings into bytes.
    ///
    /// Each hex string can have an optional `0x` prefix.
    pub fn concat_hex(hexes: &[&str]) -> Result<Vec<u8>> {
        let mut result = Vec::new();
        for hex_str in hexes {
            let bytes = Self::decode(hex_str)?;
            result.extend_from_slice(&bytes);
        }
        Ok(result)
    }

    /// Slice bytes from start to end.
    ///
    /// If end is None, slices to the end of data.
    /// If end exceeds length, slices to the end of data.
    pub fn slice(data: &[u8], start: usize, end: Option<usize>) -> Vec<u8> {
        let len = data.len();
        let start = start.min(len);
        let end = end.map(|e| e.min(len)).unwrap_or(len);
        if start >= end {
            return Vec::new();
        }
        data[start..end].to_vec()
    }

    /// Left-pad data with zeros to reach target length.
    ///
    /// If data is already >= target_len, returns data unchanged.
    pub fn pad_left(data: &[u8], target_len: usize) -> Vec<u8> {
        if data.len() >= target_len {
            return data.to_vec();
        }
        let mut result = vec![0u8; target_len - data.len()];
        result.extend_from_slice(data);
        result
    }

    /// Right-pad data with zeros to reach target length.
    ///
    /// If data is already >= target_len, returns data unchanged.
    pub fn pad_right(data: &[u8], target_len: usize) -> Vec<u8> {
        if data.len() >= target_len {
            return data.to_vec();
        }
        let mut result = data.to_vec();
        result.resize(target_len, 0);
        result
    }

    /// Remove leading zeros from data.
    pub fn trim_left(data: &[u8]) -> Vec<u8> {
        let first_nonzero = data.iter().position(|&b| b != 0).unwrap_or(data.len());
        data[first_nonzero..].to_vec()
    }

    /// Remove trailing zeros from data.
    pub fn trim_right(data: &[u8]) -> Vec<u8> {
        let last_nonzero = data.iter().rposition(|&b| b != 0).map(|i| i + 1).unwrap_or(0);
        data[..last_nonzero].to_vec()
    }

    /// XOR two byte slices. They must be the same length.
    pub fn xor(a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
        if a.len() != b.len() {
            return Err(Error::invalid_length(a.len(), b.len()));
        }
        Ok(a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect())
    }

    /// Convert UTF-8 string to bytes.
    pub fn from_utf8(s: &str) -> Vec<u8> {
        s.as_bytes().to_vec()
    }

    /// Convert bytes to UTF-8 string.
    pub fn to_utf8(data: &[u8]) -> Result<String> {
        String::from_utf8(data.to_vec())
            .map_err(|e| Error::invalid_hex(format!("invalid UTF-8: {}", e)))
    }

    /// Convert bool to bytes: true -> [1], false -> [0].
    pub fn from_bool(b: bool) -> Vec<u8> {
        vec![if b { 1 } else { 0 }]
    }

    /// Convert bytes to bool.
    ///
    /// - `[]` or `[0]` -> false
    /// - `[1]` -> true
    /// - Anything else -> error
    pub fn to_bool(data: &[u8]) -> Result<bool> {
        match data {
            [] | [0] => Ok(false),
            [1] => Ok(true),
            _ => Err(Error::invalid_hex(format!(
                "invalid bool bytes: expected [], [0], or [1], got {:?}",
                data
            ))),
        }
    }

    /// Check if all bytes are zero.
    pub fn is_zero(data: &[u8]) -> bool {
        data.iter().all(|&b| b == 0)
    }
}
