//! The ABI type system: type descriptors, values, codecs, and schema.
//!
//! This module is the crate's core, mirroring spec.md's component list:
//!
//! - [`types`] - [`AbiType`], the immutable type-descriptor tree (§3, §4.2)
//! - [`value`] - [`AbiValue`], the value model encode/decode traffic in (§3)
//! - [`parser`] - [`parser::TypeFactory`], the canonical type-string parser (§4.2)
//! - [`uint`] - bit-width-parameterised signed/unsigned conversions (§4.1)
//! - [`validate`] - value validation and byte-length pre-computation (§4.3)
//! - [`encode`] / [`decode`] - standard head/tail ABI encoding (§4.4, §4.8)
//! - [`packed`] - the dense, ambiguous packed encoding (§4.5)
//! - [`address`] - the EIP-55 checksummed address codec (§4.6)
//! - [`function`] - function/event/error schema, selectors, topics (§4.7)
//! - [`digest`] - the injected hash seam selector/topic/checksum derive from (§5)
//! - [`json`] - Solidity ABI JSON fragment (de)serialization (feature `json`)

pub mod address;
pub mod decode;
pub mod digest;
pub mod encode;
pub mod function;
#[cfg(feature = "json")]
pub mod json;
pub mod packed;
pub mod parser;
pub mod types;
pub mod uint;
pub mod validate;
pub mod value;

pub use decode::{decode_parameters, decode_parameters_partial, decode_single};
pub use encode::{encode_parameters, encode_single};
pub use function::{ContractError, Event, Function, FunctionKind};
pub use parser::TypeFactory;
pub use types::{AbiType, ArrayLen, Field};
pub use uint::{Uint, Word};
pub use validate::validate;
pub use value::AbiValue;

#[cfg(feature = "json")]
pub use json::{ErrorDescriptor, EventDescriptor, FunctionDescriptor, ParamDescriptor};

impl AbiType {
    /// Parse a canonical type descriptor, e.g. `"(uint256,bytes)[3]"` (§4.2).
    ///
    /// Equivalent to [`TypeFactory::parse`]; provided as an inherent method
    /// so callers can write `AbiType::parse(..)` without importing the parser.
    pub fn parse(input: &str) -> crate::error::Result<Self> {
        TypeFactory::parse(input)
    }
}
