use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use thiserror::Error;

use warehouse_abi::config::Config;
use warehouse_abi::core::registry::{Registry, RegistryError};

#[derive(Args)]
pub struct Export {
    /// The directory to write `<contract>.json` descriptors into
    #[arg(long, short, default_value = "abi")]
    pub out: PathBuf,
}

#[allow(clippy::enum_variant_names)]
#[derive(Error, Debug)]
pub enum ExportError {
    /// Error loading the registry
    #[error("{0}")]
    RegistryError(#[from] RegistryError),
    /// Error serializing a descriptor
    #[error("JsonError: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Error writing a descriptor
    #[error("IoError: {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes every published descriptor as a static JSON asset for the
/// frontend bundle.
impl Export {
    pub fn run(&self, config: &Config) -> Result<(), ExportError> {
        let registry = config.load_registry()?;
        for path in write_descriptors(&registry, &self.out)? {
            println!("{}", path.display());
        }
        Ok(())
    }
}

/// Writes `<out>/<contract>.json` for each tracked contract and returns the
/// written paths.
fn write_descriptors(registry: &Registry, out: &Path) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(out).map_err(|e| ExportError::IoError {
        path: out.to_owned(),
        source: e,
    })?;

    let mut written = Vec::new();
    for (id, descriptor) in registry.iter() {
        let path = out.join(format!("{}.json", id));
        let mut contents = serde_json::to_string_pretty(&descriptor.to_json())?;
        contents.push('\n');
        fs::write(&path, contents).map_err(|e| ExportError::IoError {
            path: path.clone(),
            source: e,
        })?;
        log::info!("Wrote {} interface to {}", id, path.display());
        written.push(path);
    }
    Ok(written)
}
