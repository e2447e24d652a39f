//! # abi-schema
//!
//! Idiomatic Rust implementation of the Ethereum Contract ABI type system:
//! type descriptors, values, standard and packed encoding, and the
//! function/event/error schema built on top of them.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Newtype wrappers** with `Deref` for seamless byte access
//! - **`Result` types** instead of error codes
//! - **`From`/`TryFrom` traits** for conversions
//! - **`std::fmt` traits** for display
//! - **`serde` support** (optional, behind the `json` feature)
//!
//! ## Modules
//!
//! - [`primitives`] - Core value types: Address, Hash, U256, Hex
//! - [`crypto`] - Keccak-256, the hash function behind selectors and checksums
//! - [`abi`] - The ABI type system: type descriptors, values, codecs, schema
//!
//! ## Example
//!
//! ```rust
//! use abi_schema::abi::AbiType;
//!
//! let ty = AbiType::parse("uint256[]").unwrap();
//! assert!(ty.is_dynamic());
//! assert_eq!(ty.canonical_name(), "uint256[]");
//! ```
//!
//! ## Feature Flags
//!
//! - `json` (default) - Solidity ABI JSON fragment (de)serialization via `serde`

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod error;
pub mod primitives;
pub mod crypto;
pub mod abi;

// Re-exports
pub use error::{Error, Result};
pub use primitives::{Address, Hash, U256, Hex};
pub use crypto::keccak256;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::abi::{AbiType, AbiValue};
    pub use crate::primitives::{Address, Hash, U256, Hex};
    pub use crate::crypto::keccak256;
    pub use crate::error::{Error, Result};
}
