use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::core::resources::artifacts::{ArtifactError, ArtifactsResource};

pub mod descriptor;
pub mod global;

pub use descriptor::{AbiEntry, InterfaceDescriptor};

/// The contracts the frontend talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum ContractId {
    /// The custody and accounting contract
    Warehouse,
    /// The ERC-20 token held by the warehouse
    Token,
}

impl ContractId {
    pub const ALL: [ContractId; 2] = [ContractId::Warehouse, ContractId::Token];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractId::Warehouse => "warehouse",
            ContractId::Token => "token",
        }
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContractId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown contract: {}. Allowed values: warehouse, token", s))
    }
}

/// Where the build system writes the artifact of a tracked contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackedContract {
    pub id: ContractId,
    /// The source file name, e.g. `Warehouse.sol`
    pub file_name: &'static str,
    /// The contract name inside the source file
    pub contract_name: &'static str,
}

/// Artifact locations of the tracked contracts, in resolution order.
pub const TRACKED_CONTRACTS: &[TrackedContract] = &[
    TrackedContract {
        id: ContractId::Warehouse,
        file_name: "Warehouse.sol",
        contract_name: "Warehouse",
    },
    TrackedContract {
        id: ContractId::Token,
        file_name: "Token.sol",
        contract_name: "Token",
    },
];

#[allow(clippy::enum_variant_names)]
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The artifact of a tracked contract could not be resolved
    #[error("{contract}: {source}")]
    ArtifactError {
        contract: ContractId,
        #[source]
        source: ArtifactError,
    },
    /// The artifact was resolved but holds no usable interface descriptor
    #[error("DescriptorExtractionError: {contract}: {reason}")]
    DescriptorExtractionError { contract: ContractId, reason: String },
}

/// The interface descriptors of every tracked contract.
///
/// A registry only exists fully populated: [`Registry::load`] either
/// publishes a descriptor for each entry of [`TRACKED_CONTRACTS`] or fails.
#[derive(Clone, Debug, PartialEq)]
pub struct Registry {
    descriptors: BTreeMap<ContractId, InterfaceDescriptor>,
}

impl Registry {
    /// Resolves the artifact of every tracked contract and extracts its
    /// interface descriptor.
    ///
    /// All artifacts are resolved before any descriptor is extracted, and
    /// the first failure aborts the whole load.
    pub fn load<A: ArtifactsResource>(artifacts_resource: &A) -> Result<Self, RegistryError> {
        let mut artifacts = Vec::with_capacity(TRACKED_CONTRACTS.len());
        for tracked in TRACKED_CONTRACTS {
            let artifact = artifacts_resource
                .get_artifact(tracked.file_name, tracked.contract_name)
                .map_err(|source| RegistryError::ArtifactError {
                    contract: tracked.id,
                    source,
                })?;

            if let Some(name) = &artifact.contract_name {
                if name != tracked.contract_name {
                    log::warn!(
                        "Artifact {}/{} declares contract `{}`",
                        tracked.file_name,
                        tracked.contract_name,
                        name
                    );
                }
            }
            artifacts.push((tracked, artifact));
        }

        let mut descriptors = BTreeMap::new();
        for (tracked, artifact) in artifacts {
            let descriptor = InterfaceDescriptor::from_artifact(tracked.id, &artifact)?;
            log::info!(
                "Published {} interface ({} entries)",
                tracked.id,
                descriptor.len()
            );
            descriptors.insert(tracked.id, descriptor);
        }

        debug_assert_eq!(descriptors.len(), ContractId::ALL.len());

        Ok(Registry { descriptors })
    }

    /// Returns the interface descriptor of a tracked contract.
    pub fn descriptor(&self, id: ContractId) -> &InterfaceDescriptor {
        // `load` guarantees an entry for every id
        &self.descriptors[&id]
    }

    pub fn warehouse(&self) -> &InterfaceDescriptor {
        self.descriptor(ContractId::Warehouse)
    }

    pub fn token(&self) -> &InterfaceDescriptor {
        self.descriptor(ContractId::Token)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContractId, &InterfaceDescriptor)> {
        self.descriptors.iter().map(|(id, descriptor)| (*id, descriptor))
    }
}

#[cfg(test)]
mod tests {
    use super::{ContractId, Registry, RegistryError, TRACKED_CONTRACTS};
    use crate::core::resources::artifacts::{
        ArtifactError, ArtifactsResource, ContractArtifact,
    };
    use crate::resources::artifacts::LocalArtifactStore;
    use std::cell::RefCell;
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    /// Copies the fixture build output into `dir`.
    fn copy_fixtures(dir: &Path) {
        for tracked in TRACKED_CONTRACTS {
            let relative = format!("{}/{}.json", tracked.file_name, tracked.contract_name);
            fs::create_dir_all(dir.join(tracked.file_name)).unwrap();
            fs::copy(
                test_fixture!("resources", format!("out/{}", relative)),
                dir.join(&relative),
            )
            .unwrap();
        }
    }

    /// An artifact store that records every lookup.
    struct RecordingStore {
        inner: LocalArtifactStore,
        lookups: RefCell<Vec<String>>,
    }

    impl ArtifactsResource for RecordingStore {
        fn get_artifact(
            &self,
            file_name: &str,
            contract_name: &str,
        ) -> Result<ContractArtifact, ArtifactError> {
            self.lookups.borrow_mut().push(contract_name.to_owned());
            self.inner.get_artifact(file_name, contract_name)
        }
    }

    #[test]
    fn every_contract_has_one_location() {
        for id in ContractId::ALL {
            let count = TRACKED_CONTRACTS.iter().filter(|t| t.id == id).count();
            assert_eq!(count, 1, "{} must be tracked exactly once", id);
        }
        assert_eq!(TRACKED_CONTRACTS.len(), ContractId::ALL.len());
    }

    #[test]
    fn can_parse_contract_id() {
        assert_eq!("warehouse".parse::<ContractId>().unwrap(), ContractId::Warehouse);
        assert_eq!("Token".parse::<ContractId>().unwrap(), ContractId::Token);
        assert!("vault".parse::<ContractId>().is_err());
        assert_eq!(ContractId::Warehouse.to_string(), "warehouse");
    }

    #[test]
    fn can_load_registry() {
        let store = LocalArtifactStore::new(test_fixture!("resources", "out"));
        let registry = Registry::load(&store).unwrap();

        assert_eq!(registry.iter().count(), 2);
        assert_eq!(registry.warehouse().len(), 2);
        assert_eq!(registry.token().len(), 14);
    }

    #[test]
    fn descriptors_match_artifacts() {
        let store = LocalArtifactStore::new(test_fixture!("resources", "out"));
        let registry = Registry::load(&store).unwrap();

        for tracked in TRACKED_CONTRACTS {
            let artifact = store
                .get_artifact(tracked.file_name, tracked.contract_name)
                .unwrap();
            let descriptor = registry.descriptor(tracked.id);
            assert_eq!(Some(descriptor.to_json()), artifact.abi);

            let artifact_names = artifact
                .abi
                .unwrap()
                .as_array()
                .unwrap()
                .iter()
                .map(|e| e["name"].as_str().map(str::to_owned))
                .collect::<Vec<_>>();
            let descriptor_names = descriptor
                .entries()
                .iter()
                .map(|e| e.name().map(str::to_owned))
                .collect::<Vec<_>>();
            assert_eq!(artifact_names, descriptor_names);
        }
    }

    #[test]
    fn loading_is_idempotent() {
        let store = LocalArtifactStore::new(test_fixture!("resources", "out"));
        let first = Registry::load(&store).unwrap();
        let second = Registry::load(&store).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn warehouse_descriptor_has_deposit_and_event() {
        let store = LocalArtifactStore::new(test_fixture!("resources", "out"));
        let registry = Registry::load(&store).unwrap();

        let signatures = registry
            .warehouse()
            .entries()
            .iter()
            .map(|e| (e.kind(), e.signature().unwrap()))
            .collect::<Vec<_>>();
        assert_eq!(
            signatures,
            vec![
                ("function", "deposit(uint256)".to_owned()),
                ("event", "Deposited(address,uint256)".to_owned()),
            ]
        );
    }

    #[test]
    fn token_function_names_match_artifact() {
        let store = LocalArtifactStore::new(test_fixture!("resources", "out"));
        let registry = Registry::load(&store).unwrap();

        let artifact = store.get_artifact("Token.sol", "Token").unwrap();
        let expected = artifact
            .abi
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .filter(|e| e["type"] == "function")
            .map(|e| e["name"].as_str().unwrap().to_owned())
            .collect::<BTreeSet<_>>();
        let actual = registry
            .token()
            .function_names()
            .into_iter()
            .map(str::to_owned)
            .collect::<BTreeSet<_>>();
        assert_eq!(expected, actual);
        assert!(actual.contains("transfer"));
        assert!(actual.contains("approve"));
        assert!(actual.contains("balanceOf"));
    }

    #[test]
    fn missing_warehouse_aborts_load() {
        let temp_dir = tempdir().unwrap();
        copy_fixtures(temp_dir.path());
        fs::remove_file(temp_dir.path().join("Warehouse.sol/Warehouse.json")).unwrap();

        let store = RecordingStore {
            inner: LocalArtifactStore::new(temp_dir.path()),
            lookups: RefCell::new(Vec::new()),
        };
        let err = Registry::load(&store).unwrap_err();
        match err {
            RegistryError::ArtifactError {
                contract: ContractId::Warehouse,
                source: ArtifactError::ArtifactNotFoundError { .. },
            } => {}
            other => panic!("unexpected error: {}", other),
        }
        // The token artifact is never looked at
        assert_eq!(*store.lookups.borrow(), vec!["Warehouse".to_owned()]);
    }

    #[test]
    fn missing_abi_aborts_load() {
        let temp_dir = tempdir().unwrap();
        copy_fixtures(temp_dir.path());

        let path = temp_dir.path().join("Token.sol/Token.json");
        let mut document: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        document.as_object_mut().unwrap().remove("abi");
        fs::write(&path, serde_json::to_string(&document).unwrap()).unwrap();

        let store = LocalArtifactStore::new(temp_dir.path());
        let err = Registry::load(&store).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::DescriptorExtractionError {
                contract: ContractId::Token,
                ..
            }
        ));
    }

    #[test]
    fn malformed_artifact_aborts_load() {
        let temp_dir = tempdir().unwrap();
        copy_fixtures(temp_dir.path());
        fs::write(temp_dir.path().join("Token.sol/Token.json"), "not json").unwrap();

        let store = LocalArtifactStore::new(temp_dir.path());
        let err = Registry::load(&store).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::ArtifactError {
                contract: ContractId::Token,
                source: ArtifactError::ArtifactMalformedError { .. },
            }
        ));
    }
}
