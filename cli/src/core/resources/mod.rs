pub mod artifacts;

pub use artifacts::{ArtifactError, ArtifactsResource, ContractArtifact};
