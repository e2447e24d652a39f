//! Canonical type-descriptor parser.
//!
//! Recursive-descent over the grammar:
//!
//! ```text
//! type    := base suffix*
//! suffix  := '[' digits? ']'
//! base    := tuple | 'uint' digits? | 'int' digits? | 'address' | 'bool'
//!          | 'bytes' digits? | 'string'
//!          | ('u'|'') 'fixed' (digits 'x' digits)?
//! tuple   := '(' (type (',' type)*)? ')'
//! ```
//!
//! Primitive nodes are interned in a process-wide table keyed by canonical
//! name, so repeated parses of `uint256` share one cached value instead of
//! rebuilding it. Tuples and arrays are never interned — their children
//! already are.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;

use crate::abi::types::{AbiType, ArrayLen, Field};
use crate::error::{Error, Result};

/// Parser recursion depth bound (§7).
pub const MAX_RECURSION_DEPTH: usize = 64;

/// Suggested maximum canonical type string length (§7).
pub const MAX_TYPE_STRING_LEN: usize = 8 * 1024;

static INTERN_TABLE: Lazy<Mutex<HashMap<String, Arc<AbiType>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn intern(ty: AbiType) -> AbiType {
    let name = ty.canonical_name();
    let mut table = INTERN_TABLE.lock().unwrap();
    if let Some(existing) = table.get(&name) {
        return (**existing).clone();
    }
    table.insert(name, Arc::new(ty.clone()));
    ty
}

/// Parses canonical type descriptors into [`AbiType`] trees.
pub struct TypeFactory;

impl TypeFactory {
    /// Parse a complete canonical type descriptor, e.g. `"(uint256,bytes)[3]"`.
    ///
    /// The entire input must be consumed; trailing characters are a parse
    /// error.
    pub fn parse(input: &str) -> Result<AbiType> {
        if input.len() > MAX_TYPE_STRING_LEN {
            return Err(Error::parse(0, format!("type string longer than {MAX_TYPE_STRING_LEN} bytes")));
        }
        let mut parser = Parser { src: input.as_bytes(), pos: 0, depth: 0 };
        let ty = parser.parse_type()?;
        if parser.pos != parser.src.len() {
            return Err(Error::parse(parser.pos, "unexpected trailing characters"));
        }
        Ok(ty)
    }
}

struct Parser<'a> {
    src: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn err(&self, message: impl Into<String>) -> Error {
        Error::parse(self.pos, message)
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_RECURSION_DEPTH {
            return Err(self.err("type nesting exceeds maximum recursion depth"));
        }
        Ok(())
    }

    fn exit(&mut self) {
        self.depth -= 1;
    }

    fn parse_type(&mut self) -> Result<AbiType> {
        self.enter()?;
        let result = (|| {
            let mut ty = self.parse_base()?;
            while self.peek() == Some(b'[') {
                self.bump();
                let len = self.parse_array_len()?;
                if self.bump() != Some(b']') {
                    return Err(self.err("expected ']'"));
                }
                ty = AbiType::Array { element: Box::new(Field::unnamed(ty)), len };
            }
            Ok(ty)
        })();
        self.exit();
        result
    }

    fn parse_array_len(&mut self) -> Result<ArrayLen> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
        if self.pos == start {
            return Ok(ArrayLen::Dynamic);
        }
        let digits = self.slice_str(start, self.pos);
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(Error::parse(start, "leading zero in array length"));
        }
        let n: u64 = digits
            .parse()
            .map_err(|_| Error::parse(start, "array length out of range"))?;
        Ok(ArrayLen::Fixed(n))
    }

    fn parse_base(&mut self) -> Result<AbiType> {
        match self.peek() {
            Some(b'(') => self.parse_tuple(),
            Some(_) => self.parse_keyword(),
            None => Err(self.err("unexpected end of input")),
        }
    }

    fn parse_tuple(&mut self) -> Result<AbiType> {
        self.bump(); // '('
        let mut fields = Vec::new();
        if self.peek() == Some(b')') {
            self.bump();
            return Ok(AbiType::Tuple(fields));
        }
        loop {
            let ty = self.parse_type()?;
            fields.push(Field::unnamed(ty));
            match self.bump() {
                Some(b',') => continue,
                Some(b')') => break,
                _ => return Err(self.err("expected ',' or ')' in tuple")),
            }
        }
        Ok(AbiType::Tuple(fields))
    }

    fn parse_keyword(&mut self) -> Result<AbiType> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
            self.bump();
        }
        let word = self.slice_str(start, self.pos).to_string();
        match word.as_str() {
            "bool" => Ok(AbiType::Bool),
            "address" => Ok(AbiType::Address),
            "string" => Ok(AbiType::String),
            "bytes" => self.parse_bytes(start),
            "uint" => self.parse_int(start, false),
            "int" => self.parse_int(start, true),
            "fixed" => self.parse_fixed(start, true),
            "ufixed" => self.parse_fixed(start, false),
            _ => Err(Error::parse(start, format!("unknown type keyword '{word}'"))),
        }
    }

    fn take_digits(&mut self) -> Option<(usize, usize)> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
        if self.pos == start {
            None
        } else {
            Some((start, self.pos))
        }
    }

    fn parse_width(&mut self, start: usize, end: usize, max: u32) -> Result<u16> {
        let digits = self.slice_str(start, end);
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(Error::parse(start, "leading zero in bit-width"));
        }
        let value: u32 = digits
            .parse()
            .map_err(|_| Error::parse(start, "bit-width out of range"))?;
        if value == 0 || value > max {
            return Err(Error::parse(start, format!("bit-width {value} out of range")));
        }
        Ok(value as u16)
    }

    fn parse_int(&mut self, _name_start: usize, signed: bool) -> Result<AbiType> {
        match self.take_digits() {
            None => Ok(intern(AbiType::Int { bits: 256, signed })),
            Some((start, end)) => {
                let bits = self.parse_width(start, end, 256)?;
                Ok(intern(AbiType::Int { bits, signed }))
            }
        }
    }

    fn parse_bytes(&mut self, _name_start: usize) -> Result<AbiType> {
        match self.take_digits() {
            None => Ok(intern(AbiType::Bytes)),
            Some((start, end)) => {
                let len = self.parse_width(start, end, 32)?;
                Ok(intern(AbiType::FixedBytes(len as u8)))
            }
        }
    }

    fn parse_fixed(&mut self, _name_start: usize, signed: bool) -> Result<AbiType> {
        let Some((bits_start, bits_end)) = self.take_digits() else {
            return Ok(intern(AbiType::BigDecimal { bits: 128, scale: 18, signed }));
        };
        let bits = self.parse_width(bits_start, bits_end, 256)?;
        if self.bump() != Some(b'x') {
            return Err(self.err("expected 'x' between fixed bit-width and scale"));
        }
        let Some((scale_start, scale_end)) = self.take_digits() else {
            return Err(self.err("expected scale digits after 'x'"));
        };
        let scale_digits = self.slice_str(scale_start, scale_end);
        if scale_digits.len() > 1 && scale_digits.starts_with('0') {
            return Err(Error::parse(scale_start, "leading zero in fixed-point scale"));
        }
        let scale: u32 = scale_digits
            .parse()
            .map_err(|_| Error::parse(scale_start, "scale out of range"))?;
        if scale > 80 {
            return Err(Error::parse(scale_start, format!("scale {scale} exceeds maximum of 80")));
        }
        Ok(intern(AbiType::BigDecimal { bits, scale: scale as u16, signed }))
    }

    fn slice_str(&self, start: usize, end: usize) -> &'a str {
        std::str::from_utf8(&self.src[start..end]).expect("ASCII-only lexer input")
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // §8 property 3: a type's own canonical name reparses to the same type.
        #[test]
        fn canonical_name_roundtrips_int(bits in 1u16..=256, signed in any::<bool>()) {
            let keyword = if signed { "int" } else { "uint" };
            let ty = TypeFactory::parse(&format!("{keyword}{bits}")).unwrap();
            let reparsed = TypeFactory::parse(&ty.canonical_name()).unwrap();
            prop_assert_eq!(reparsed, ty);
        }

        #[test]
        fn canonical_name_roundtrips_bytes(len in 1u16..=32) {
            let ty = TypeFactory::parse(&format!("bytes{len}")).unwrap();
            let reparsed = TypeFactory::parse(&ty.canonical_name()).unwrap();
            prop_assert_eq!(reparsed, ty);
        }

        #[test]
        fn canonical_name_roundtrips_fixed(bits in 1u16..=256, scale in 0u16..=80, signed in any::<bool>()) {
            let keyword = if signed { "fixed" } else { "ufixed" };
            let ty = TypeFactory::parse(&format!("{keyword}{bits}x{scale}")).unwrap();
            let reparsed = TypeFactory::parse(&ty.canonical_name()).unwrap();
            prop_assert_eq!(reparsed, ty);
        }

        #[test]
        fn canonical_name_roundtrips_array(bits in 1u16..=256, len in 0u64..=16) {
            let ty = TypeFactory::parse(&format!("uint{bits}[{len}]")).unwrap();
            let reparsed = TypeFactory::parse(&ty.canonical_name()).unwrap();
            prop_assert_eq!(reparsed, ty);
        }
    }
}
