//! Function, event, and error schema (§4.7).
//!
//! Selectors and topics are computed via an injected [`crate::abi::digest::Digest`]
//! rather than a hardcoded call to [`crate::crypto::keccak256`], so a caller
//! can supply a fresh per-thread instance (§5).

use crate::abi::digest::{Digest, Keccak};
use crate::abi::encode;
use crate::abi::types::{AbiType, Field};
use crate::abi::value::AbiValue;
use crate::error::{Error, Result};

/// The four call-convention variants a [`Function`] may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// A named function with a selector.
    Ordinary,
    /// The contract's fallback function.
    Fallback,
    /// A contract's constructor.
    Constructor,
    /// The contract's `receive` function.
    Receive,
}

fn validate_name(name: &str) -> Result<()> {
    for c in name.chars() {
        let ok = (c as u32) >= 0x20 && (c as u32) <= 0x7e && c != '(';
        if !ok {
            return Err(Error::invalid_value(format!("name contains illegal character '{c}'")));
        }
    }
    Ok(())
}

fn tuple_type(fields: Vec<Field>) -> AbiType {
    AbiType::Tuple(fields)
}

fn tuple_fields(ty: &AbiType) -> &[Field] {
    match ty {
        AbiType::Tuple(fields) => fields,
        _ => &[],
    }
}

/// A contract function's schema: name, call-convention variant, parameter
/// tuples, state mutability, and its derived selector.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    kind: FunctionKind,
    name: Option<String>,
    inputs: AbiType,
    outputs: AbiType,
    state_mutability: Option<String>,
    selector: [u8; 4],
}

impl Function {
    /// Build and validate a function schema, computing its selector via
    /// `digest`.
    pub fn new(
        kind: FunctionKind,
        name: Option<String>,
        inputs: Vec<Field>,
        outputs: Vec<Field>,
        state_mutability: Option<String>,
        digest: &impl Digest,
    ) -> Result<Self> {
        match kind {
            FunctionKind::Ordinary => {
                if name.is_none() {
                    return Err(Error::invalid_value("ordinary functions must carry a name".to_string()));
                }
            }
            FunctionKind::Fallback | FunctionKind::Constructor => {
                if name.is_some() {
                    return Err(Error::invalid_value(format!("{kind:?} must not carry a name")));
                }
                if !outputs.is_empty() {
                    return Err(Error::invalid_value(format!("{kind:?} must declare no outputs")));
                }
            }
            FunctionKind::Receive => {
                if !inputs.is_empty() {
                    return Err(Error::invalid_value("receive must declare no inputs".to_string()));
                }
                if !outputs.is_empty() {
                    return Err(Error::invalid_value("receive must declare no outputs".to_string()));
                }
                if state_mutability.as_deref() != Some("payable") {
                    return Err(Error::invalid_value("receive must be payable".to_string()));
                }
            }
        }
        if let Some(name) = &name {
            validate_name(name)?;
        }

        let inputs = tuple_type(inputs);
        let outputs = tuple_type(outputs);
        let signature = format!("{}{}", name.as_deref().unwrap_or(""), inputs.canonical_name());
        let hash = digest.keccak256(signature.as_bytes());
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&hash[..4]);

        Ok(Self { kind, name, inputs, outputs, state_mutability, selector })
    }

    /// Build a function schema using the default [`Keccak`] digest.
    pub fn new_default(
        kind: FunctionKind,
        name: Option<String>,
        inputs: Vec<Field>,
        outputs: Vec<Field>,
        state_mutability: Option<String>,
    ) -> Result<Self> {
        Self::new(kind, name, inputs, outputs, state_mutability, &Keccak)
    }

    /// The call-convention variant.
    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    /// The function's name, absent for fallback/constructor.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The input parameter tuple type.
    pub fn inputs(&self) -> &AbiType {
        &self.inputs
    }

    /// The output parameter tuple type.
    pub fn outputs(&self) -> &AbiType {
        &self.outputs
    }

    /// The declared state mutability string, if any.
    pub fn state_mutability(&self) -> Option<&str> {
        self.state_mutability.as_deref()
    }

    /// `name(type1,type2,…)` with no whitespace, using canonical type names.
    pub fn canonical_signature(&self) -> String {
        format!("{}{}", self.name.as_deref().unwrap_or(""), self.inputs.canonical_name())
    }

    /// The first 4 bytes of `keccak256(canonical_signature)`.
    pub fn selector(&self) -> [u8; 4] {
        self.selector
    }

    /// `selector ∥ tuple-encode(inputs, values)`.
    pub fn encode_call(&self, values: &[AbiValue]) -> Result<Vec<u8>> {
        let types: Vec<AbiType> = tuple_fields(&self.inputs).iter().map(|f| f.ty.clone()).collect();
        let mut out = Vec::with_capacity(4);
        out.extend_from_slice(&self.selector);
        out.extend(encode::encode_parameters(&types, values)?);
        Ok(out)
    }
}

/// An event schema: name, input tuple, indexed-parameter manifest, and
/// anonymity flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    name: String,
    inputs: AbiType,
    indexed: Vec<bool>,
    anonymous: bool,
    topic: Option<[u8; 32]>,
}

impl Event {
    /// Build and validate an event schema, computing its topic (unless
    /// `anonymous`) via `digest`.
    pub fn new(
        name: impl Into<String>,
        inputs: Vec<Field>,
        indexed: Vec<bool>,
        anonymous: bool,
        digest: &impl Digest,
    ) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        if indexed.len() != inputs.len() {
            return Err(Error::invalid_value(format!(
                "indexed manifest arity {} does not match input arity {}",
                indexed.len(),
                inputs.len()
            )));
        }
        let inputs = tuple_type(inputs);
        let signature = format!("{name}{}", inputs.canonical_name());
        let topic = if anonymous {
            None
        } else {
            let hash = digest.keccak256(signature.as_bytes());
            Some(hash)
        };
        Ok(Self { name, inputs, indexed, anonymous, topic })
    }

    /// Build an event schema using the default [`Keccak`] digest.
    pub fn new_default(name: impl Into<String>, inputs: Vec<Field>, indexed: Vec<bool>, anonymous: bool) -> Result<Self> {
        Self::new(name, inputs, indexed, anonymous, &Keccak)
    }

    /// The event's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full input tuple type.
    pub fn inputs(&self) -> &AbiType {
        &self.inputs
    }

    /// Whether the event omits its topic from the log.
    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    /// `keccak256(canonical_signature)`, absent when anonymous.
    pub fn topic(&self) -> Option<[u8; 32]> {
        self.topic
    }

    /// The types of the indexed inputs, in declaration order.
    pub fn get_indexed_params(&self) -> Vec<AbiType> {
        tuple_fields(&self.inputs)
            .iter()
            .zip(&self.indexed)
            .filter(|(_, indexed)| **indexed)
            .map(|(field, _)| field.ty.clone())
            .collect()
    }

    /// The types of the non-indexed inputs, in declaration order.
    pub fn get_non_indexed_params(&self) -> Vec<AbiType> {
        tuple_fields(&self.inputs)
            .iter()
            .zip(&self.indexed)
            .filter(|(_, indexed)| !**indexed)
            .map(|(field, _)| field.ty.clone())
            .collect()
    }

    /// The indexed-parameter manifest, positionally aligned with `inputs()`.
    ///
    /// Unlike [`Event::get_indexed_params`], which projects down to the
    /// indexed *types*, this preserves one flag per input so two
    /// same-typed parameters that differ in indexed-ness stay distinguishable.
    pub fn indexed_manifest(&self) -> &[bool] {
        &self.indexed
    }
}

/// A custom Solidity error schema: name, input tuple, and derived selector.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractError {
    name: String,
    inputs: AbiType,
    selector: [u8; 4],
}

impl ContractError {
    /// Build and validate an error schema, computing its selector via `digest`.
    pub fn new(name: impl Into<String>, inputs: Vec<Field>, digest: &impl Digest) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        let inputs = tuple_type(inputs);
        let signature = format!("{name}{}", inputs.canonical_name());
        let hash = digest.keccak256(signature.as_bytes());
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&hash[..4]);
        Ok(Self { name, inputs, selector })
    }

    /// Build an error schema using the default [`Keccak`] digest.
    pub fn new_default(name: impl Into<String>, inputs: Vec<Field>) -> Result<Self> {
        Self::new(name, inputs, &Keccak)
    }

    /// The error's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The input parameter tuple type.
    pub fn inputs(&self) -> &AbiType {
        &self.inputs
    }

    /// The first 4 bytes of `keccak256(canonical_signature)`.
    pub fn selector(&self) -> [u8; 4] {
        self.selector
    }
}
