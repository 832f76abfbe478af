use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::de::Error as _;
use serde_json::Value;

use crate::core::resources::artifacts::{ArtifactError, ArtifactsResource, ContractArtifact};

/// The Artifacts resource implementation that reads the build output
/// directory of the contract toolchain.
///
/// Artifacts are laid out as `<root>/<file_name>/<contract_name>.json`,
/// e.g. `contracts/out/Warehouse.sol/Warehouse.json`.
#[derive(Clone, Debug)]
pub struct LocalArtifactStore {
    path: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LocalArtifactStore { path: path.into() }
    }

    /// Returns the location of the artifact for a given contract.
    pub fn artifact_path(&self, file_name: &str, contract_name: &str) -> PathBuf {
        self.path
            .join(file_name)
            .join(format!("{}.json", contract_name))
    }
}

impl ArtifactsResource for LocalArtifactStore {
    fn get_artifact(
        &self,
        file_name: &str,
        contract_name: &str,
    ) -> Result<ContractArtifact, ArtifactError> {
        let file_path = self.artifact_path(file_name, contract_name);
        log::debug!("Reading artifact {}", file_path.display());

        let contents = match fs::read_to_string(&file_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ArtifactError::ArtifactNotFoundError { path: file_path })
            }
            Err(e) => {
                return Err(ArtifactError::ArtifactReadError {
                    path: file_path,
                    source: e,
                })
            }
        };

        parse_artifact(&contents).map_err(|e| ArtifactError::ArtifactMalformedError {
            path: file_path,
            source: e,
        })
    }
}

/// Parses an artifact document.
///
/// The document has to be a JSON object; serde would otherwise happily
/// accept a positional array for a struct.
fn parse_artifact(contents: &str) -> Result<ContractArtifact, serde_json::Error> {
    let value: Value = serde_json::from_str(contents)?;
    if !value.is_object() {
        return Err(serde_json::Error::custom(
            "expected an artifact object at the document root",
        ));
    }
    serde_json::from_value(value)
}
