use crate::{
    node::{EntityDef, SchemaField},
    types::Variant,
};

///
/// Attribute Collector
///
/// Reads an entity's declared attributes and returns the filtered, ordered
/// field list for one variant. Never errors; an entity with nothing to
/// contribute yields an empty list.
///

#[must_use]
pub fn collect(entity: &EntityDef, variant: Variant) -> Vec<SchemaField> {
    entity
        .attributes
        .iter()
        .filter(|attribute| attribute.included_in(variant))
        .map(|attribute| {
            // A partial update must be able to omit any field.
            let ty = match variant {
                Variant::Update => attribute.ty.clone().optional(),
                Variant::Create | Variant::Response => attribute.ty.clone(),
            };
            let required = !ty.is_optional();

            SchemaField {
                name: attribute.name.clone(),
                ty,
                required,
            }
        })
        .collect()
}

///
/// TESTS
///
