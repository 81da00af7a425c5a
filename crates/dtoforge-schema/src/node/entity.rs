use crate::{
    node::{NodeError, validate_entity_ident, validate_field_ident},
    types::{TypeExpr, Variant},
};
use serde::Serialize;
use std::collections::HashSet;

///
/// EntityDef
///
/// The declarative source for one entity: a stable name plus its ordered
/// attribute list. Immutable once declared; the declaration order is
/// authoritative for every derived shape.
///

#[derive(Clone, Debug, Serialize)]
pub struct EntityDef {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

impl EntityDef {
    #[must_use]
    pub fn new(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn validate(&self) -> Result<(), NodeError> {
        validate_entity_ident(&self.name)?;

        let mut seen = HashSet::new();
        for attribute in &self.attributes {
            validate_field_ident(&attribute.name)?;
            if !seen.insert(attribute.name.as_str()) {
                return Err(NodeError::DuplicateAttribute {
                    entity: self.name.clone(),
                    attribute: attribute.name.clone(),
                });
            }
        }

        Ok(())
    }
}

///
/// Attribute
///
/// One declared, storage-backed attribute of an entity.
///

#[derive(Clone, Debug, Serialize)]
pub struct Attribute {
    pub name: String,
    pub ty: TypeExpr,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub system_managed: bool,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub primary_key: bool,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub foreign_key: bool,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub computed: bool,

    pub meta: AttributeMeta,
}

impl Attribute {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            system_managed: false,
            primary_key: false,
            foreign_key: false,
            computed: false,
            meta: AttributeMeta::default(),
        }
    }

    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    #[must_use]
    pub const fn system_managed(mut self) -> Self {
        self.system_managed = true;
        self
    }

    #[must_use]
    pub const fn foreign_key(mut self) -> Self {
        self.foreign_key = true;
        self
    }

    #[must_use]
    pub const fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    #[must_use]
    pub fn meta(mut self, meta: AttributeMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Inclusion decision for one variant.
    ///
    /// Explicit per-variant metadata wins unconditionally; otherwise the
    /// default rule applies: computed accessors never appear, primary-key and
    /// system-managed attributes appear only in Response, everything else
    /// appears everywhere.
    #[must_use]
    pub const fn included_in(&self, variant: Variant) -> bool {
        let explicit = match variant {
            Variant::Create => self.meta.include_in_create,
            Variant::Update => self.meta.include_in_update,
            Variant::Response => self.meta.include_in_response,
        };
        if let Some(include) = explicit {
            return include;
        }

        if self.computed {
            return false;
        }

        match variant {
            Variant::Create | Variant::Update => !(self.primary_key || self.system_managed),
            Variant::Response => true,
        }
    }
}

///
/// AttributeMeta
///
/// Optional per-attribute overrides of the default inclusion rule, plus a
/// human-readable description.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct AttributeMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_in_create: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_in_update: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_in_response: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AttributeMeta {
    #[must_use]
    pub const fn include_in_create(mut self, include: bool) -> Self {
        self.include_in_create = Some(include);
        self
    }

    #[must_use]
    pub const fn include_in_update(mut self, include: bool) -> Self {
        self.include_in_update = Some(include);
        self
    }

    #[must_use]
    pub const fn include_in_response(mut self, include: bool) -> Self {
        self.include_in_response = Some(include);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

///
/// TESTS
///
