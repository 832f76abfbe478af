//! The process-wide registry.
//!
//! The slot is filled at most once. Consumers that cannot be handed a
//! `&Registry` read it from here after startup has called [`init`].

use std::sync::OnceLock;

use super::{Registry, RegistryError};
use crate::core::resources::artifacts::ArtifactsResource;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Loads the registry and installs it for the rest of the process.
///
/// Once a registry is installed, later calls return it without touching the
/// artifacts store. A failed load installs nothing.
pub fn init<A: ArtifactsResource>(
    artifacts_resource: &A,
) -> Result<&'static Registry, RegistryError> {
    if let Some(registry) = REGISTRY.get() {
        return Ok(registry);
    }
    let registry = Registry::load(artifacts_resource)?;
    Ok(REGISTRY.get_or_init(|| registry))
}

/// Returns the installed registry, if startup has loaded one.
pub fn get() -> Option<&'static Registry> {
    REGISTRY.get()
}

#[cfg(test)]
mod tests {
    use crate::resources::artifacts::LocalArtifactStore;

    #[test]
    fn init_installs_once() {
        let missing = LocalArtifactStore::new("does/not/exist");
        if super::get().is_none() {
            assert!(super::init(&missing).is_err());
            assert!(super::get().is_none());
        }

        let store = LocalArtifactStore::new(test_fixture!("resources", "out"));
        let registry = super::init(&store).unwrap();
        assert_eq!(registry.warehouse().len(), 2);

        // Installed registry wins over a broken store
        let again = super::init(&missing).unwrap();
        assert!(std::ptr::eq(registry, again));
        assert!(std::ptr::eq(registry, super::get().unwrap()));
    }
}
