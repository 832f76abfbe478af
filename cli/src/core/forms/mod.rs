//! Form models for the frontend.
//!
//! A form lists the typed fields of one contract member so the UI can render
//! inputs for a call or columns for an event. Field types are resolved here,
//! not in the registry: an unsupported type only affects its own field.

use alloy_dyn_abi::DynSolType;
use alloy_json_abi::{Event, Function, StateMutability};
use alloy_primitives::{Selector, B256};

use crate::core::registry::InterfaceDescriptor;

pub mod param;

pub use param::{ParamTypeError, ToDynSolType};

/// One input or output of a contract member.
#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
    pub name: String,
    /// The type string as written in the descriptor
    pub ty: String,
    pub resolved: Result<DynSolType, ParamTypeError>,
    /// Only ever set for event fields
    pub indexed: bool,
}

impl FormField {
    fn new<P: ToDynSolType>(param: &P, name: &str, ty: &str, indexed: bool) -> Self {
        FormField {
            name: name.to_owned(),
            ty: ty.to_owned(),
            resolved: param.to_dyn_sol_type(),
            indexed,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionForm {
    pub name: String,
    pub signature: String,
    pub selector: Selector,
    pub state_mutability: StateMutability,
    pub inputs: Vec<FormField>,
    pub outputs: Vec<FormField>,
}

impl FunctionForm {
    fn new(function: &Function) -> Self {
        FunctionForm {
            name: function.name.clone(),
            signature: function.signature(),
            selector: function.selector(),
            state_mutability: function.state_mutability,
            inputs: function
                .inputs
                .iter()
                .map(|p| FormField::new(p, &p.name, &p.ty, false))
                .collect(),
            outputs: function
                .outputs
                .iter()
                .map(|p| FormField::new(p, &p.name, &p.ty, false))
                .collect(),
        }
    }

    /// Whether calling the function needs a transaction.
    pub fn is_read_only(&self) -> bool {
        matches!(
            self.state_mutability,
            StateMutability::Pure | StateMutability::View
        )
    }

    /// The state mutability as spelled in the descriptor.
    pub fn mutability(&self) -> &'static str {
        match self.state_mutability {
            StateMutability::Pure => "pure",
            StateMutability::View => "view",
            StateMutability::NonPayable => "nonpayable",
            StateMutability::Payable => "payable",
        }
    }

    pub fn is_payable(&self) -> bool {
        self.state_mutability == StateMutability::Payable
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EventForm {
    pub name: String,
    pub signature: String,
    /// The first log topic of non-anonymous events
    pub topic: B256,
    pub anonymous: bool,
    pub inputs: Vec<FormField>,
}

impl EventForm {
    fn new(event: &Event) -> Self {
        EventForm {
            name: event.name.clone(),
            signature: event.signature(),
            topic: event.selector(),
            anonymous: event.anonymous,
            inputs: event
                .inputs
                .iter()
                .map(|p| FormField::new(p, &p.name, &p.ty, p.indexed))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ErrorForm {
    pub name: String,
    pub signature: String,
    pub selector: Selector,
    pub inputs: Vec<FormField>,
}

/// The forms of every function, event and error of a contract, in
/// descriptor order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContractForms {
    pub functions: Vec<FunctionForm>,
    pub events: Vec<EventForm>,
    pub errors: Vec<ErrorForm>,
}

impl ContractForms {
    pub fn from_descriptor(descriptor: &InterfaceDescriptor) -> Self {
        ContractForms {
            functions: descriptor.functions().map(FunctionForm::new).collect(),
            events: descriptor.events().map(EventForm::new).collect(),
            errors: descriptor
                .errors()
                .map(|error| ErrorForm {
                    name: error.name.clone(),
                    signature: error.signature(),
                    selector: error.selector(),
                    inputs: error
                        .inputs
                        .iter()
                        .map(|p| FormField::new(p, &p.name, &p.ty, false))
                        .collect(),
                })
                .collect(),
        }
    }

    /// Fields whose type could not be resolved, with the member they belong to.
    pub fn unsupported_fields(&self) -> Vec<(&str, &FormField)> {
        let functions = self
            .functions
            .iter()
            .flat_map(|f| f.inputs.iter().chain(&f.outputs).map(move |p| (f.name.as_str(), p)));
        let events = self
            .events
            .iter()
            .flat_map(|e| e.inputs.iter().map(move |p| (e.name.as_str(), p)));
        let errors = self
            .errors
            .iter()
            .flat_map(|e| e.inputs.iter().map(move |p| (e.name.as_str(), p)));
        functions
            .chain(events)
            .chain(errors)
            .filter(|(_, field)| field.resolved.is_err())
            .collect()
    }
}
