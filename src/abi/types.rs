//! ABI type descriptors.
//!
//! [`AbiType`] is an immutable tagged union mirroring the Contract ABI type
//! grammar: one variant per primitive/compound shape, built bottom-up by
//! [`crate::abi::parser`] or by [`crate::abi::json`]. Equality, ordering,
//! and hashing all key off [`AbiType::canonical_name`] alone, per the ABI's
//! own notion of type identity — two trees built from different surface
//! syntax (`uint` vs `uint256`) but the same canonical form are the same
//! type.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Sentinel array length denoting a dynamically-sized array (`T[]`).
pub const DYNAMIC_LENGTH: i64 = -1;

/// The declared length of an [`AbiType::Array`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayLen {
    /// A fixed number of elements, `T[n]`.
    Fixed(u64),
    /// A variable number of elements, `T[]`.
    Dynamic,
}

impl ArrayLen {
    /// Whether this length is the dynamic sentinel.
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic)
    }
}

/// A type paired with an optional user-supplied field name.
///
/// The name is never part of a type's canonical identity (§3): two fields
/// wrapping the same [`AbiType`] under different names describe the same
/// wire shape. Keeping the name here, rather than as a mutable attribute on
/// the type node itself, lets primitive nodes stay interned and shared.
#[derive(Debug, Clone)]
pub struct Field {
    /// Field name, absent for unnamed tuple/array elements.
    pub name: Option<String>,
    /// The field's type.
    pub ty: AbiType,
}

impl Field {
    /// An unnamed field.
    pub fn unnamed(ty: AbiType) -> Self {
        Self { name: None, ty }
    }

    /// A named field.
    pub fn named(name: impl Into<String>, ty: AbiType) -> Self {
        Self { name: Some(name.into()), ty }
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
    }
}
impl Eq for Field {}

/// An ABI type node.
///
/// Built bottom-up and treated as immutable and freely shareable once
/// constructed (§3 "Lifecycle"). `Tuple` and `Array` hold their children
/// directly rather than through a shared type hierarchy with per-variant
/// storage classes: decoded values mirror this same shape as a plain sum
/// type (§9 "Type node polymorphism").
#[derive(Debug, Clone)]
pub enum AbiType {
    /// `bool`.
    Bool,
    /// `byte`, an `int8`-sized byte slot. Not reachable via
    /// [`crate::abi::parser::TypeFactory::parse`] (absent from the type
    /// grammar); constructible only programmatically.
    Byte,
    /// `int<bits>` / `uint<bits>`, any bit-width in `[1, 256]`.
    Int {
        /// Logical bit-width.
        bits: u16,
        /// `true` for `int<bits>`, `false` for `uint<bits>`.
        signed: bool,
    },
    /// `fixed<bits>x<scale>` / `ufixed<bits>x<scale>`.
    BigDecimal {
        /// Logical bit-width of the underlying integer.
        bits: u16,
        /// Number of fractional decimal digits, `0 <= scale <= 80`.
        scale: u16,
        /// `true` for `fixed`, `false` for `ufixed`.
        signed: bool,
    },
    /// `address`, a 160-bit unsigned integer.
    Address,
    /// `bytes<len>`, `1 <= len <= 32`.
    FixedBytes(u8),
    /// `<element>[<len>]` or `<element>[]`.
    Array {
        /// Element type.
        element: Box<Field>,
        /// Declared length.
        len: ArrayLen,
    },
    /// `string`, a dynamic UTF-8 byte sequence.
    String,
    /// `bytes`, a dynamic byte sequence.
    Bytes,
    /// `(<t1>,<t2>,…)`, possibly empty.
    Tuple(Vec<Field>),
}

impl AbiType {
    /// `uint256`.
    pub fn uint256() -> Self {
        Self::Int { bits: 256, signed: false }
    }

    /// `int256`.
    pub fn int256() -> Self {
        Self::Int { bits: 256, signed: true }
    }

    /// The canonical textual form of this type. Identical to the signature
    /// fragment this type occupies inside a function signature.
    pub fn canonical_name(&self) -> String {
        match self {
            Self::Bool => "bool".to_string(),
            Self::Byte => "byte".to_string(),
            Self::Int { bits, signed } => {
                format!("{}{}", if *signed { "int" } else { "uint" }, bits)
            }
            Self::BigDecimal { bits, scale, signed } => {
                format!("{}fixed{}x{}", if *signed { "" } else { "u" }, bits, scale)
            }
            Self::Address => "address".to_string(),
            Self::FixedBytes(len) => format!("bytes{len}"),
            Self::Array { element, len } => match len {
                ArrayLen::Fixed(n) => format!("{}[{}]", element.ty.canonical_name(), n),
                ArrayLen::Dynamic => format!("{}[]", element.ty.canonical_name()),
            },
            Self::String => "string".to_string(),
            Self::Bytes => "bytes".to_string(),
            Self::Tuple(fields) => {
                let inner = fields
                    .iter()
                    .map(|f| f.ty.canonical_name())
                    .collect::<Vec<_>>()
                    .join(",");
                format!("({inner})")
            }
        }
    }

    /// Whether this type's encoded length depends on its value: a variable-
    /// length array, `bytes`, `string`, or any tuple/array transitively
    /// containing one.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::Bool
            | Self::Byte
            | Self::Int { .. }
            | Self::BigDecimal { .. }
            | Self::Address
            | Self::FixedBytes(_) => false,
            Self::String | Self::Bytes => true,
            Self::Array { element, len } => len.is_dynamic() || element.ty.is_dynamic(),
            Self::Tuple(fields) => fields.iter().any(|f| f.ty.is_dynamic()),
        }
    }

    /// For a `Tuple`, the number of children; for an `Array`, `1`
    /// (a single element type repeated `len` times). `size()` matches the
    /// arity a value tree must present to [`crate::abi::validate::validate`].
    pub fn size(&self) -> usize {
        match self {
            Self::Tuple(fields) => fields.len(),
            _ => 1,
        }
    }
}

impl PartialEq for AbiType {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_name() == other.canonical_name()
    }
}
impl Eq for AbiType {}

impl PartialOrd for AbiType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for AbiType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_name().cmp(&other.canonical_name())
    }
}
impl Hash for AbiType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_name().hash(state);
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}
