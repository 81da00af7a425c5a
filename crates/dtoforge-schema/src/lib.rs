pub mod build;
pub mod builder;
pub mod cache;
pub mod collect;
pub mod error;
pub mod node;
pub mod resolve;
pub mod types;

/// Maximum length for entity identifiers.
pub const MAX_ENTITY_NAME_LEN: usize = 64;

/// Maximum length for attribute and extension-field identifiers.
pub const MAX_FIELD_NAME_LEN: usize = 64;

use crate::{error::SchemaError, node::NodeError};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        build::{
            clear_cache, declare_entity, declare_extension_fields, derive, remove_entity,
            resolve_policy, set_resolve_policy,
        },
        error::SchemaError,
        node::*,
        resolve::{ForwardRefs, ResolvePolicy},
        types::{Primitive, TypeExpr, Variant},
    };
    pub use serde::Serialize;
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    SchemaError(#[from] SchemaError),

    #[error(transparent)]
    NodeError(#[from] NodeError),
}
