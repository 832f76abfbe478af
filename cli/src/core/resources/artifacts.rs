use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A compiled contract artifact as written by the contract build system.
///
/// Only the fields this crate reads are typed. `abi` stays a raw JSON value so
/// the registry can decide whether it is a usable interface descriptor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    /// The contract name recorded by the build system, if any.
    /// Foundry omits it, Hardhat writes it.
    #[serde(default)]
    pub contract_name: Option<String>,
    /// The interface descriptor.
    #[serde(default)]
    pub abi: Option<Value>,
    /// The creation bytecode. Unused here.
    #[serde(default)]
    pub bytecode: Option<Value>,
}

#[allow(clippy::enum_variant_names)]
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// The build output for the contract does not exist
    #[error("ArtifactNotFoundError: no artifact at {path}, was the contract compiled?")]
    ArtifactNotFoundError { path: PathBuf },
    /// The build output exists but is not a structured artifact document
    #[error("ArtifactMalformedError: {path}: {source}")]
    ArtifactMalformedError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The build output exists but could not be read
    #[error("ArtifactReadError: {path}: {source}")]
    ArtifactReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The interface for interacting with a store of artifacts.
/// The Artifacts resource is responsible for fetching compiled contract
/// documents from an artifacts store.
pub trait ArtifactsResource {
    /// Get the artifact for a given contract
    ///
    /// `file_name` is the source file name (`Warehouse.sol`) and
    /// `contract_name` the compiled contract inside it (`Warehouse`).
    fn get_artifact(
        &self,
        file_name: &str,
        contract_name: &str,
    ) -> Result<ContractArtifact, ArtifactError>;
}
