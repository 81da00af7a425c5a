use crate::types::Variant;
use thiserror::Error as ThisError;

///
/// SchemaError
///
/// Deterministic declaration and derivation failures. None of these are
/// retried: given the same declarations and forward-reference map they fail
/// identically.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("field '{field}' on {entity} {variant} is declared both as an attribute and an extension field")]
    FieldNameCollision {
        entity: String,
        variant: Variant,
        field: String,
    },

    #[error("cannot finalize schema '{schema}': unresolved forward references {missing:?}; {hint}")]
    SchemaGeneration {
        schema: String,
        missing: Vec<String>,
        hint: String,
    },

    #[error("entity '{0}' has not been declared")]
    UnknownEntity(String),

    #[error("entity '{0}' is already declared")]
    EntityAlreadyDeclared(String),
}
