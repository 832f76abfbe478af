use alloy_dyn_abi::DynSolType;
use alloy_json_abi::{EventParam, Param};
use thiserror::Error;

#[allow(clippy::enum_variant_names)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamTypeError {
    /// The type string is not a Solidity type
    #[error("UnsupportedTypeError: `{ty}`: {reason}")]
    UnsupportedTypeError { ty: String, reason: String },
    /// A tuple type carries a malformed array suffix
    #[error("ArraySuffixError: `{ty}`")]
    ArraySuffixError { ty: String },
}

/// Trait to convert to a [`DynSolType`]
pub trait ToDynSolType {
    fn to_dyn_sol_type(&self) -> Result<DynSolType, ParamTypeError>;
}

impl ToDynSolType for Param {
    fn to_dyn_sol_type(&self) -> Result<DynSolType, ParamTypeError> {
        resolve(&self.ty, &self.components)
    }
}

impl ToDynSolType for EventParam {
    fn to_dyn_sol_type(&self) -> Result<DynSolType, ParamTypeError> {
        resolve(&self.ty, &self.components)
    }
}

/// Resolves an ABI type string.
///
/// Tuples are spelled `tuple`, `tuple[]`, `tuple[3][]`... with their fields in
/// `components`, so they are rebuilt from the components and then wrapped in
/// the array dimensions of the suffix.
fn resolve(ty: &str, components: &[Param]) -> Result<DynSolType, ParamTypeError> {
    match ty.strip_prefix("tuple") {
        Some(suffix) => {
            let mut tuple_parts = Vec::with_capacity(components.len());
            for component in components {
                tuple_parts.push(component.to_dyn_sol_type()?);
            }
            wrap_array_suffix(DynSolType::Tuple(tuple_parts), ty, suffix)
        }
        None => ty
            .parse::<DynSolType>()
            .map_err(|e| ParamTypeError::UnsupportedTypeError {
                ty: ty.to_owned(),
                reason: e.to_string(),
            }),
    }
}

fn wrap_array_suffix(
    mut inner: DynSolType,
    ty: &str,
    suffix: &str,
) -> Result<DynSolType, ParamTypeError> {
    let suffix_error = || ParamTypeError::ArraySuffixError { ty: ty.to_owned() };

    let mut rest = suffix;
    while !rest.is_empty() {
        let (size, tail) = rest
            .strip_prefix('[')
            .and_then(|r| r.split_once(']'))
            .ok_or_else(suffix_error)?;
        inner = if size.is_empty() {
            DynSolType::Array(Box::new(inner))
        } else {
            let size = size.parse::<usize>().map_err(|_| suffix_error())?;
            DynSolType::FixedArray(Box::new(inner), size)
        };
        rest = tail;
    }
    Ok(inner)
}
