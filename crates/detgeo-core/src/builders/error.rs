use crate::core::identifiers::IdError;
use crate::core::models::tree::TreeError;
use crate::core::spec::SpecError;
use thiserror::Error;

/// Fatal build-pass failures. No partial tree is ever returned: the tree is
/// handed to the caller by value only when the whole pass succeeds.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Specification error: {0}")]
    Spec(#[from] SpecError),

    #[error("Identifier error: {0}")]
    Id(#[from] IdError),

    #[error("Element tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Material '{name}' not found in catalog")]
    MaterialNotFound { name: String },

    #[error("No layer type at index {index} in the layering table")]
    LayerTypeNotFound { index: usize },
}
