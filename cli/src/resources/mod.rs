pub mod artifacts;

pub use artifacts::LocalArtifactStore;
