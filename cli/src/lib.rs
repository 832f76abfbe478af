//! Interface descriptors of the warehouse and token contracts.
//!
//! The [`Registry`] is loaded once from the contract build output and handed
//! to everything that encodes calls or decodes events against the deployed
//! contracts.

#[cfg(test)]
#[macro_use]
mod macros;

pub mod config;
pub mod core;
pub mod resources;

pub use crate::core::registry::{ContractId, InterfaceDescriptor, Registry, RegistryError};
pub use crate::core::resources::artifacts::{ArtifactError, ArtifactsResource, ContractArtifact};
pub use crate::resources::artifacts::LocalArtifactStore;
