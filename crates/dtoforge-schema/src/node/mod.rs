mod entity;
mod extension;
mod schema;

pub use entity::{Attribute, AttributeMeta, EntityDef};
pub use extension::{ExtensionDecl, ExtensionField};
pub use schema::{PendingRef, SchemaField, SchemaType};

use crate::{MAX_ENTITY_NAME_LEN, MAX_FIELD_NAME_LEN};
use thiserror::Error as ThisError;

///
/// NodeError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum NodeError {
    #[error("identifier cannot be empty")]
    EmptyIdent,

    #[error("identifier '{ident}' exceeds maximum length {max}")]
    IdentTooLong { ident: String, max: usize },

    #[error("entity '{entity}' declares attribute '{attribute}' more than once")]
    DuplicateAttribute { entity: String, attribute: String },
}

/// Check one entity identifier against the naming limits.
pub fn validate_entity_ident(ident: &str) -> Result<(), NodeError> {
    validate_ident(ident, MAX_ENTITY_NAME_LEN)
}

/// Check one attribute or extension-field identifier against the naming limits.
pub fn validate_field_ident(ident: &str) -> Result<(), NodeError> {
    validate_ident(ident, MAX_FIELD_NAME_LEN)
}

fn validate_ident(ident: &str, max: usize) -> Result<(), NodeError> {
    if ident.is_empty() {
        return Err(NodeError::EmptyIdent);
    }
    if ident.len() > max {
        return Err(NodeError::IdentTooLong {
            ident: ident.to_string(),
            max,
        });
    }

    Ok(())
}
