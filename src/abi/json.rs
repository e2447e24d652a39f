//! Solidity ABI JSON fragment (de)serialization (§6, feature `json`).
//!
//! Text parsing is entirely `serde_json`'s job; this module's own work is
//! converting the already-deserialized parameter descriptors into
//! [`AbiType`]/[`Function`]/[`Event`]/[`ContractError`] schema objects (tag
//! dispatch, `components` flattening, `tuple[...]` suffix concatenation)
//! and back.

use serde::{Deserialize, Serialize};

use crate::abi::digest::{Digest, Keccak};
use crate::abi::function::{ContractError, Event, Function, FunctionKind};
use crate::abi::parser::TypeFactory;
use crate::abi::types::{AbiType, Field};
use crate::error::{Error, Result};

/// A single parameter entry inside an ABI JSON fragment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParamDescriptor {
    /// Parameter name, empty string if unnamed.
    #[serde(default)]
    pub name: String,
    /// The declared type, e.g. `"uint256"` or `"tuple[]"`.
    #[serde(rename = "type")]
    pub ty: String,
    /// Nested component descriptors, present only when `ty` starts with `tuple`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ParamDescriptor>,
    /// Whether this parameter is an indexed event topic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
}

impl ParamDescriptor {
    /// Build the canonical type string for this descriptor, flattening
    /// `components` into a tuple type and reattaching the array suffix.
    fn canonical_type(&self) -> Result<String> {
        if let Some(tuple_suffix) = self.ty.strip_prefix("tuple") {
            let inner = self
                .components
                .iter()
                .map(|c| c.canonical_type())
                .collect::<Result<Vec<_>>>()?
                .join(",");
            Ok(format!("({inner}){tuple_suffix}"))
        } else {
            Ok(self.ty.clone())
        }
    }

    /// Resolve this descriptor into an [`AbiType`].
    pub fn to_abi_type(&self) -> Result<AbiType> {
        TypeFactory::parse(&self.canonical_type()?)
    }

    /// Resolve this descriptor into a [`Field`], carrying its `name` along
    /// (empty string, the JSON dialect's own "unnamed" spelling, becomes
    /// [`Field::unnamed`]).
    pub fn to_field(&self) -> Result<Field> {
        let ty = self.to_abi_type()?;
        if self.name.is_empty() {
            Ok(Field::unnamed(ty))
        } else {
            Ok(Field::named(self.name.clone(), ty))
        }
    }

    fn from_abi_type(name: &str, ty: &AbiType, indexed: Option<bool>) -> Self {
        match ty {
            AbiType::Tuple(fields) => {
                let components = fields
                    .iter()
                    .map(|f| Self::from_abi_type(f.name.as_deref().unwrap_or(""), &f.ty, None))
                    .collect();
                Self { name: name.to_string(), ty: "tuple".to_string(), components, indexed }
            }
            AbiType::Array { element, len } => {
                let inner = Self::from_abi_type("", &element.ty, None);
                let suffix = match len {
                    crate::abi::types::ArrayLen::Fixed(n) => format!("[{n}]"),
                    crate::abi::types::ArrayLen::Dynamic => "[]".to_string(),
                };
                if inner.ty == "tuple" || inner.ty.starts_with("tuple[") || inner.ty.starts_with("tuple(") {
                    Self {
                        name: name.to_string(),
                        ty: format!("tuple{suffix}"),
                        components: inner.components,
                        indexed,
                    }
                } else {
                    Self { name: name.to_string(), ty: format!("{}{suffix}", inner.ty), components: vec![], indexed }
                }
            }
            other => Self { name: name.to_string(), ty: other.canonical_name(), components: vec![], indexed },
        }
    }
}

fn params_to_fields(params: &[ParamDescriptor]) -> Result<Vec<Field>> {
    params.iter().map(ParamDescriptor::to_field).collect()
}

/// A top-level `function`/`constructor`/`fallback`/`receive` ABI JSON fragment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionDescriptor {
    /// `"function"`, `"constructor"`, `"fallback"`, or `"receive"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Function name, absent for constructor/fallback/receive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Input parameters.
    #[serde(default)]
    pub inputs: Vec<ParamDescriptor>,
    /// Output parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<ParamDescriptor>,
    /// Declared state mutability.
    #[serde(rename = "stateMutability", default, skip_serializing_if = "Option::is_none")]
    pub state_mutability: Option<String>,
}

impl FunctionDescriptor {
    /// Resolve into a [`Function`], computing its selector via `digest`.
    pub fn to_function(&self, digest: &impl Digest) -> Result<Function> {
        let kind = match self.kind.as_str() {
            "function" => FunctionKind::Ordinary,
            "constructor" => FunctionKind::Constructor,
            "fallback" => FunctionKind::Fallback,
            "receive" => FunctionKind::Receive,
            other => return Err(Error::invalid_input(format!("unknown function fragment type '{other}'"))),
        };
        Function::new(
            kind,
            self.name.clone(),
            params_to_fields(&self.inputs)?,
            params_to_fields(&self.outputs)?,
            self.state_mutability.clone(),
            digest,
        )
    }

    /// Resolve into a [`Function`] using the default [`Keccak`] digest.
    pub fn to_function_default(&self) -> Result<Function> {
        self.to_function(&Keccak)
    }
}

impl From<&Function> for FunctionDescriptor {
    fn from(function: &Function) -> Self {
        let kind = match function.kind() {
            FunctionKind::Ordinary => "function",
            FunctionKind::Constructor => "constructor",
            FunctionKind::Fallback => "fallback",
            FunctionKind::Receive => "receive",
        };
        let to_params = |ty: &AbiType| match ty {
            AbiType::Tuple(fields) => fields
                .iter()
                .map(|f| ParamDescriptor::from_abi_type(f.name.as_deref().unwrap_or(""), &f.ty, None))
                .collect(),
            _ => vec![],
        };
        Self {
            kind: kind.to_string(),
            name: function.name().map(str::to_string),
            inputs: to_params(function.inputs()),
            outputs: to_params(function.outputs()),
            state_mutability: function.state_mutability().map(str::to_string),
        }
    }
}

/// A top-level `event` ABI JSON fragment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventDescriptor {
    /// Always `"event"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Event name.
    pub name: String,
    /// Input parameters, each optionally carrying `indexed`.
    #[serde(default)]
    pub inputs: Vec<ParamDescriptor>,
    /// Whether this event omits its topic.
    #[serde(default)]
    pub anonymous: bool,
}

impl EventDescriptor {
    /// Resolve into an [`Event`], computing its topic via `digest`.
    pub fn to_event(&self, digest: &impl Digest) -> Result<Event> {
        let fields = params_to_fields(&self.inputs)?;
        let indexed = self.inputs.iter().map(|p| p.indexed.unwrap_or(false)).collect();
        Event::new(self.name.clone(), fields, indexed, self.anonymous, digest)
    }

    /// Resolve into an [`Event`] using the default [`Keccak`] digest.
    pub fn to_event_default(&self) -> Result<Event> {
        self.to_event(&Keccak)
    }
}

impl From<&Event> for EventDescriptor {
    fn from(event: &Event) -> Self {
        let fields = match event.inputs() {
            AbiType::Tuple(fields) => fields.clone(),
            _ => vec![],
        };
        let inputs = fields
            .iter()
            .zip(event.indexed_manifest().iter().copied())
            .map(|(f, indexed)| ParamDescriptor::from_abi_type(f.name.as_deref().unwrap_or(""), &f.ty, Some(indexed)))
            .collect();
        Self { kind: "event".to_string(), name: event.name().to_string(), inputs, anonymous: event.is_anonymous() }
    }
}

/// A top-level `error` ABI JSON fragment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorDescriptor {
    /// Always `"error"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Error name.
    pub name: String,
    /// Input parameters.
    #[serde(default)]
    pub inputs: Vec<ParamDescriptor>,
}

impl ErrorDescriptor {
    /// Resolve into a [`ContractError`], computing its selector via `digest`.
    pub fn to_error(&self, digest: &impl Digest) -> Result<ContractError> {
        ContractError::new(self.name.clone(), params_to_fields(&self.inputs)?, digest)
    }

    /// Resolve into a [`ContractError`] using the default [`Keccak`] digest.
    pub fn to_error_default(&self) -> Result<ContractError> {
        self.to_error(&Keccak)
    }
}

impl From<&ContractError> for ErrorDescriptor {
    fn from(error: &ContractError) -> Self {
        let fields = match error.inputs() {
            AbiType::Tuple(fields) => fields.clone(),
            _ => vec![],
        };
        let inputs = fields
            .iter()
            .map(|f| ParamDescriptor::from_abi_type(f.name.as_deref().unwrap_or(""), &f.ty, None))
            .collect();
        Self { kind: "error".to_string(), name: error.name().to_string(), inputs }
    }
}
