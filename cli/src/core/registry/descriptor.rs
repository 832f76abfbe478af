use std::collections::BTreeSet;

use alloy_json_abi::{Constructor, Error, Event, Fallback, Function, JsonAbi, Receive};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{ContractId, RegistryError};
use crate::core::resources::artifacts::ContractArtifact;

/// One member of a contract interface.
#[derive(Clone, Debug, PartialEq)]
pub enum AbiEntry {
    Function(Function),
    Event(Event),
    Error(Error),
    Constructor(Constructor),
    Fallback(Fallback),
    Receive(Receive),
    /// An entry the typed model could not read, kept verbatim under its
    /// declared kind. Rejecting it is left to whoever encodes against it.
    Unparsed {
        kind: String,
        raw: Value,
        reason: String,
    },
}

impl AbiEntry {
    /// Parses a single descriptor entry.
    fn parse(value: &Value) -> AbiEntry {
        let kind = entry_kind(value);
        let parsed = match kind {
            "function" => typed(&normalize_function(value)).map(AbiEntry::Function),
            "event" => typed(value).map(AbiEntry::Event),
            "error" => typed(value).map(AbiEntry::Error),
            "constructor" => typed(value).map(AbiEntry::Constructor),
            "fallback" => typed(value).map(AbiEntry::Fallback),
            "receive" => typed(value).map(AbiEntry::Receive),
            other => Err(format!("unknown entry type `{}`", other)),
        };
        parsed.unwrap_or_else(|reason| {
            log::warn!("Keeping {} ABI entry as is: {}", kind, reason);
            AbiEntry::Unparsed {
                kind: kind.to_owned(),
                raw: value.clone(),
                reason,
            }
        })
    }

    /// The entry kind, as spelled in the `type` field.
    pub fn kind(&self) -> &str {
        match self {
            AbiEntry::Function(_) => "function",
            AbiEntry::Event(_) => "event",
            AbiEntry::Error(_) => "error",
            AbiEntry::Constructor(_) => "constructor",
            AbiEntry::Fallback(_) => "fallback",
            AbiEntry::Receive(_) => "receive",
            AbiEntry::Unparsed { kind, .. } => kind,
        }
    }

    /// The member name. Constructors, fallbacks and receives have none.
    pub fn name(&self) -> Option<&str> {
        match self {
            AbiEntry::Function(f) => Some(&f.name),
            AbiEntry::Event(e) => Some(&e.name),
            AbiEntry::Error(e) => Some(&e.name),
            AbiEntry::Unparsed { raw, .. } => raw.get("name").and_then(Value::as_str),
            _ => None,
        }
    }

    /// The canonical signature, e.g. `transfer(address,uint256)`.
    pub fn signature(&self) -> Option<String> {
        match self {
            AbiEntry::Function(f) => Some(f.signature()),
            AbiEntry::Event(e) => Some(e.signature()),
            AbiEntry::Error(e) => Some(e.signature()),
            _ => None,
        }
    }
}

fn typed<T: DeserializeOwned>(value: &Value) -> Result<T, String> {
    serde_json::from_value(value.clone()).map_err(|e| e.to_string())
}

/// Entries without a `type` are functions, as in the Solidity ABI.
fn entry_kind(value: &Value) -> &str {
    value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("function")
}

/// Fills in the fields solc before 0.5 left out of function entries.
///
/// `stateMutability` is derived from the legacy `constant` and `payable`
/// flags, which are then dropped.
fn normalize_function(value: &Value) -> Value {
    let mut value = value.clone();
    if let Some(entry) = value.as_object_mut() {
        entry.entry("type").or_insert(Value::from("function"));
        entry.entry("inputs").or_insert(Value::Array(Vec::new()));
        entry.entry("outputs").or_insert(Value::Array(Vec::new()));
        if !entry.contains_key("stateMutability") {
            let flag = |key: &str| entry.get(key).and_then(Value::as_bool).unwrap_or(false);
            let mutability = if flag("payable") {
                "payable"
            } else if flag("constant") {
                "view"
            } else {
                "nonpayable"
            };
            entry.insert("stateMutability".to_owned(), Value::from(mutability));
        }
        entry.remove("constant");
        entry.remove("payable");
    }
    value
}

/// The interface descriptor of one contract: the `abi` of its artifact.
///
/// Entries keep the order of the artifact. The raw JSON of every entry is
/// kept next to its typed form so the descriptor can be written back out
/// exactly as the build system produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceDescriptor {
    entries: Vec<AbiEntry>,
    raw: Vec<Value>,
}

impl InterfaceDescriptor {
    /// Extracts the descriptor from a resolved artifact.
    pub fn from_artifact(
        contract: ContractId,
        artifact: &ContractArtifact,
    ) -> Result<Self, RegistryError> {
        let extraction_error = |reason: String| RegistryError::DescriptorExtractionError {
            contract,
            reason,
        };

        let abi = artifact
            .abi
            .as_ref()
            .ok_or_else(|| extraction_error("artifact has no `abi` field".to_owned()))?;
        let raw = abi.as_array().ok_or_else(|| {
            extraction_error(format!("`abi` is {}, expected an array", json_kind(abi)))
        })?;

        let mut entries = Vec::with_capacity(raw.len());
        for (i, value) in raw.iter().enumerate() {
            if !value.is_object() {
                return Err(extraction_error(format!(
                    "`abi` entry {} is {}, expected an object",
                    i,
                    json_kind(value)
                )));
            }
            entries.push(AbiEntry::parse(value));
        }

        Ok(InterfaceDescriptor {
            entries,
            raw: raw.clone(),
        })
    }

    pub fn entries(&self) -> &[AbiEntry] {
        &self.entries
    }

    /// The entries as they appeared in the artifact.
    pub fn raw_entries(&self) -> &[Value] {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.entries.iter().filter_map(|entry| match entry {
            AbiEntry::Function(f) => Some(f),
            _ => None,
        })
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.entries.iter().filter_map(|entry| match entry {
            AbiEntry::Event(e) => Some(e),
            _ => None,
        })
    }

    pub fn errors(&self) -> impl Iterator<Item = &Error> {
        self.entries.iter().filter_map(|entry| match entry {
            AbiEntry::Error(e) => Some(e),
            _ => None,
        })
    }

    /// Entries the typed model could not read.
    pub fn unparsed(&self) -> impl Iterator<Item = &AbiEntry> {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, AbiEntry::Unparsed { .. }))
    }

    /// The number of function entries, parsed or not.
    pub fn function_count(&self) -> usize {
        self.raw
            .iter()
            .filter(|value| entry_kind(value) == "function")
            .count()
    }

    /// The names of all function entries, read from the raw entries so that
    /// functions the typed model could not read are still listed.
    pub fn function_names(&self) -> BTreeSet<&str> {
        self.raw
            .iter()
            .filter(|value| entry_kind(value) == "function")
            .filter_map(|value| value.get("name").and_then(Value::as_str))
            .collect()
    }

    /// Returns the descriptor as a JSON array, identical to the artifact's `abi`.
    pub fn to_json(&self) -> Value {
        Value::Array(self.raw.clone())
    }

    /// Builds an alloy [`JsonAbi`] for name and selector lookups.
    ///
    /// `JsonAbi` groups members by name, so positional order is lost here.
    /// Unparsed entries are left out.
    pub fn to_json_abi(&self) -> JsonAbi {
        let mut abi = JsonAbi::default();
        for entry in &self.entries {
            match entry {
                AbiEntry::Function(f) => abi
                    .functions
                    .entry(f.name.clone())
                    .or_default()
                    .push(f.clone()),
                AbiEntry::Event(e) => abi.events.entry(e.name.clone()).or_default().push(e.clone()),
                AbiEntry::Error(e) => abi.errors.entry(e.name.clone()).or_default().push(e.clone()),
                AbiEntry::Constructor(c) => abi.constructor = Some(c.clone()),
                AbiEntry::Fallback(f) => abi.fallback = Some(f.clone()),
                AbiEntry::Receive(r) => abi.receive = Some(r.clone()),
                AbiEntry::Unparsed { .. } => {}
            }
        }
        abi
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
