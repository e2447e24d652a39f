//! Cryptographic operations.
//!
//! This module provides the hash function ABI encoding depends on:
//!
//! - [`keccak256`] - Ethereum's primary hash function, used for function
//!   selectors, event topics, and EIP-55 address checksums.
//!
//! The digest seam exposed to callers ([`crate::abi::digest`]) wraps this
//! implementation by default but accepts any [`crate::abi::digest::Digest`].

mod keccak;

pub use keccak::{keccak256, Keccak256};
