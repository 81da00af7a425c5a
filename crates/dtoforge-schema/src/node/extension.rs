use crate::types::TypeExpr;
use serde::Serialize;

///
/// ExtensionField
///
/// One declared non-attribute field, contributed only to the Response
/// variant. The declared type may be a `Named` placeholder for a type that
/// does not exist yet at declaration time.
///

#[derive(Clone, Debug, Serialize)]
pub struct ExtensionField {
    pub name: String,
    pub declared_type: TypeExpr,
}

impl ExtensionField {
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: TypeExpr) -> Self {
        Self {
            name: name.into(),
            declared_type,
        }
    }

    /// Shorthand for a field whose type is a placeholder string.
    #[must_use]
    pub fn named(name: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self::new(name, TypeExpr::Named(placeholder.into()))
    }
}

///
/// ExtensionDecl
///
/// The registry entry for one entity: the identifier of the method the
/// declaration is attached to, plus the ordered extension fields it
/// contributes. Recording the declaration never changes the behavior of the
/// method itself; only type metadata is captured.
///

#[derive(Clone, Debug, Serialize)]
pub struct ExtensionDecl {
    pub method: String,
    pub fields: Vec<ExtensionField>,
}

impl ExtensionDecl {
    #[must_use]
    pub fn new(method: impl Into<String>, fields: Vec<ExtensionField>) -> Self {
        Self {
            method: method.into(),
            fields,
        }
    }
}
