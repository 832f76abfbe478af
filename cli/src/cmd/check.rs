use clap::Args;
use yansi::Paint;

pub use warehouse_abi::core::registry::RegistryError;
use warehouse_abi::config::Config;

#[derive(Args)]
pub struct Check {}

/// Resolves every tracked contract and prints a summary of its interface.
///
/// Fails on the first missing, malformed or abi-less artifact.
impl Check {
    pub fn run(&self, config: &Config) -> Result<(), RegistryError> {
        let registry = config.load_registry()?;

        for (id, descriptor) in registry.iter() {
            println!(
                "{} {}: {} functions, {} events, {} errors",
                Paint::green("ok"),
                Paint::new(id).bold(),
                descriptor.function_count(),
                descriptor.events().count(),
                descriptor.errors().count()
            );
            for entry in descriptor.unparsed() {
                log::warn!(
                    "{}: {} entry `{}` could not be parsed",
                    id,
                    entry.kind(),
                    entry.name().unwrap_or("<unnamed>")
                );
            }
        }

        Ok(())
    }
}
