use crate::{
    collect::collect,
    error::SchemaError,
    node::{EntityDef, ExtensionField, PendingRef, SchemaField, SchemaType},
    types::{TypeExpr, Variant},
};

///
/// Schema Builder
///
/// Merges the attribute collector's output with the entity's extension
/// fields (Response only) into a new, uniquely named type definition.
/// Placeholder types are normalized here so that built-in generic wrappers
/// become structural nodes and only named custom types remain pending.
///

pub fn build(
    entity: &EntityDef,
    variant: Variant,
    extensions: &[ExtensionField],
) -> Result<SchemaType, SchemaError> {
    let mut fields = collect(entity, variant);

    if variant == Variant::Response {
        for extension in extensions {
            if fields.iter().any(|f| f.name == extension.name) {
                return Err(SchemaError::FieldNameCollision {
                    entity: entity.name.clone(),
                    variant,
                    field: extension.name.clone(),
                });
            }

            let ty = extension.declared_type.clone();
            fields.push(SchemaField {
                name: extension.name.clone(),
                required: !ty.is_optional(),
                ty,
            });
        }
    }

    for field in &mut fields {
        let ty = std::mem::replace(&mut field.ty, TypeExpr::Any);
        field.ty = ty.normalized();
    }

    let mut pending = Vec::new();
    for field in &fields {
        let mut names = Vec::new();
        field.ty.collect_pending(&mut names);
        for type_name in names {
            pending.push(PendingRef {
                field: field.name.clone(),
                type_name,
            });
        }
    }

    Ok(SchemaType {
        name: format!("{}{}", entity.name, variant),
        entity: entity.name.clone(),
        variant,
        fields,
        pending,
    })
}

///
/// TESTS
///
