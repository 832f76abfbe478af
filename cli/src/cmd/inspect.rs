use clap::Args;
use thiserror::Error;
use yansi::Paint;

use warehouse_abi::config::Config;
use warehouse_abi::core::forms::{ContractForms, FormField};
use warehouse_abi::core::registry::{AbiEntry, ContractId, RegistryError};

#[derive(Args)]
pub struct Inspect {
    /// The contract to inspect
    #[arg(value_enum)]
    pub contract: ContractId,

    /// Print the raw interface descriptor as JSON
    #[arg(long)]
    pub json: bool,
}

#[allow(clippy::enum_variant_names)]
#[derive(Error, Debug)]
pub enum InspectError {
    /// Error loading the registry
    #[error("{0}")]
    RegistryError(#[from] RegistryError),
    /// Error rendering the descriptor
    #[error("JsonError: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Lists the functions, events and errors of a tracked contract with their
/// typed parameters, the way the frontend builds its forms.
impl Inspect {
    pub fn run(&self, config: &Config) -> Result<(), InspectError> {
        let registry = config.load_registry()?;
        let descriptor = registry.descriptor(self.contract);

        if self.json {
            let pretty = colored_json::to_colored_json_auto(&descriptor.to_json())?;
            println!("{}", pretty);
            return Ok(());
        }

        for entry in descriptor.unparsed() {
            if let AbiEntry::Unparsed { kind, reason, .. } = entry {
                log::warn!(
                    "{} `{}` is left out of the forms: {}",
                    kind,
                    entry.name().unwrap_or("<unnamed>"),
                    reason
                );
            }
        }

        let forms = ContractForms::from_descriptor(descriptor);
        for (member, field) in forms.unsupported_fields() {
            if let Err(e) = &field.resolved {
                log::warn!("{}.{}: {}", member, field.name, e);
            }
        }

        println!("{}", Paint::new("Functions").bold());
        for function in &forms.functions {
            println!(
                "  0x{} {}({}) {}",
                hex::encode(function.selector),
                Paint::cyan(&function.name),
                render_fields(&function.inputs),
                Paint::new(function.mutability()).dimmed()
            );
            if !function.outputs.is_empty() {
                println!("      returns ({})", render_fields(&function.outputs));
            }
        }

        println!("{}", Paint::new("Events").bold());
        for event in &forms.events {
            let topic = if event.anonymous {
                "anonymous".to_owned()
            } else {
                format!("0x{}", hex::encode(event.topic))
            };
            println!(
                "  {} {}({})",
                topic,
                Paint::yellow(&event.name),
                render_fields(&event.inputs)
            );
        }

        println!("{}", Paint::new("Errors").bold());
        for error in &forms.errors {
            println!(
                "  0x{} {}({})",
                hex::encode(error.selector),
                Paint::red(&error.name),
                render_fields(&error.inputs)
            );
        }

        Ok(())
    }
}

/// Renders fields as a Solidity parameter list, e.g. `address indexed from, uint256 value`.
fn render_fields(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(|field| {
            let mut rendered = field.ty.clone();
            if field.indexed {
                rendered.push_str(" indexed");
            }
            if !field.name.is_empty() {
                rendered.push(' ');
                rendered.push_str(&field.name);
            }
            rendered
        })
        .collect::<Vec<_>>()
        .join(", ")
}
