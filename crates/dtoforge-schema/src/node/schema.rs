use crate::types::{TypeExpr, Variant};
use serde::Serialize;

///
/// SchemaType
///
/// The engine's output: a uniquely named, ordered field-list type definition
/// for one entity/variant combination. Field order matches the entity's
/// declaration order, with extension fields appended for Response.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SchemaType {
    /// Runtime type name, by convention `<EntityName><Variant>`.
    pub name: String,
    pub entity: String,
    pub variant: Variant,
    pub fields: Vec<SchemaField>,

    /// Forward references still awaiting resolution.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pending: Vec<PendingRef>,
}

impl SchemaType {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.pending.is_empty() && self.fields.iter().all(|f| f.ty.is_resolved())
    }
}

///
/// SchemaField
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SchemaField {
    pub name: String,
    pub ty: TypeExpr,
    pub required: bool,
}

///
/// PendingRef
///
/// One unresolved placeholder: the field it was found under and the custom
/// type name a forward-reference entry must supply.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PendingRef {
    pub field: String,
    pub type_name: String,
}
