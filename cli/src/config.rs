use std::path::PathBuf;

use clap::Args;

use crate::core::registry::{Registry, RegistryError};
use crate::resources::artifacts::LocalArtifactStore;

/// Where Foundry writes build output by default.
pub const DEFAULT_ARTIFACTS_DIR: &str = "contracts/out";

/// Settings shared by every command.
#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The build output directory holding `<File>.sol/<Contract>.json` artifacts.
    #[arg(
        long = "artifacts",
        env = "ARTIFACTS_DIR",
        default_value = DEFAULT_ARTIFACTS_DIR,
        global = true
    )]
    pub artifacts_dir: PathBuf,
}

impl Config {
    pub fn artifacts_resource(&self) -> LocalArtifactStore {
        LocalArtifactStore::new(self.artifacts_dir.clone())
    }

    /// Loads the registry from the configured build output.
    pub fn load_registry(&self) -> Result<Registry, RegistryError> {
        log::debug!("Loading artifacts from {}", self.artifacts_dir.display());
        Registry::load(&self.artifacts_resource())
    }
}
