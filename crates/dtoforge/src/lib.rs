//! dtoforge — runtime derivation of Create/Update/Response DTO schemas
//! from declarative entity metadata.
//!
//! This is the public meta-crate. Downstream users depend on **dtoforge**
//! only; it re-exports the stable API from `dtoforge-schema`.

pub use dtoforge_schema as schema;

pub use dtoforge_schema::{
    Error,
    build::{
        clear_cache, declare_entity, declare_extension_fields, derive, remove_entity,
        resolve_policy, set_resolve_policy,
    },
};

//
// Prelude
//

pub mod prelude {
    pub use dtoforge_schema::prelude::*;
}
