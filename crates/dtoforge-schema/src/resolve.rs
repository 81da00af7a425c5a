use crate::{error::SchemaError, node::SchemaType, types::TypeExpr};
use serde::Serialize;
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    sync::Arc,
};

///
/// ForwardRefs
///
/// Caller-supplied mapping from placeholder name to an already-built schema.
/// Sorted keys keep cache-key construction deterministic.
///

pub type ForwardRefs = BTreeMap<String, Arc<SchemaType>>;

///
/// ResolvePolicy
///
/// Strict fails fast on missing references (development-time wiring checks);
/// Lenient logs a warning and degrades the field to `Any` so a partially
/// misconfigured process keeps serving.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum ResolvePolicy {
    Strict,

    #[default]
    Lenient,
}

///
/// ResolveWarning
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolveWarning {
    pub schema: String,
    pub missing: Vec<String>,
    pub hint: String,
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "schema '{}' left {:?} unresolved; {}",
            self.schema, self.missing, self.hint
        )
    }
}

impl ResolveWarning {
    pub fn log(&self) {
        log::warn!("{self}");
    }
}

///
/// ResolveOutcome
///

#[derive(Debug)]
pub struct ResolveOutcome {
    pub schema: SchemaType,
    pub warnings: Vec<ResolveWarning>,
}

/// Finalize a built schema against the caller's forward-reference map.
///
/// Structural containers (`Opt`/`List`/`Map`) recurse automatically; only
/// `Named` leaves consult the map. Leftover placeholders either abort
/// (strict) or degrade to `Any` with a single warning (lenient).
pub fn resolve(
    mut schema: SchemaType,
    forward_refs: &ForwardRefs,
    policy: ResolvePolicy,
) -> Result<ResolveOutcome, SchemaError> {
    let mut missing = BTreeSet::new();

    for field in &mut schema.fields {
        let ty = std::mem::replace(&mut field.ty, TypeExpr::Any);
        field.ty = rebind(ty, forward_refs, &mut missing);
    }

    if missing.is_empty() {
        schema.pending.clear();
        return Ok(ResolveOutcome {
            schema,
            warnings: Vec::new(),
        });
    }

    let missing: Vec<String> = missing.into_iter().collect();
    let hint = remediation_hint(&schema, &missing);

    match policy {
        ResolvePolicy::Strict => Err(SchemaError::SchemaGeneration {
            schema: schema.name,
            missing,
            hint,
        }),
        ResolvePolicy::Lenient => {
            // Unresolved leaves were rebound to Any above; nothing stays pending.
            schema.pending.clear();
            let warning = ResolveWarning {
                schema: schema.name.clone(),
                missing,
                hint,
            };

            Ok(ResolveOutcome {
                schema,
                warnings: vec![warning],
            })
        }
    }
}

fn rebind(ty: TypeExpr, forward_refs: &ForwardRefs, missing: &mut BTreeSet<String>) -> TypeExpr {
    match ty {
        TypeExpr::Named(name) => forward_refs.get(&name).map_or_else(
            || {
                missing.insert(name);
                TypeExpr::Any
            },
            |schema| TypeExpr::Schema(Arc::clone(schema)),
        ),
        TypeExpr::Opt(inner) => TypeExpr::Opt(Box::new(rebind(*inner, forward_refs, missing))),
        TypeExpr::List(inner) => TypeExpr::List(Box::new(rebind(*inner, forward_refs, missing))),
        TypeExpr::Map(key, value) => TypeExpr::Map(
            Box::new(rebind(*key, forward_refs, missing)),
            Box::new(rebind(*value, forward_refs, missing)),
        ),
        resolved @ (TypeExpr::Primitive(_) | TypeExpr::Schema(_) | TypeExpr::Any) => resolved,
    }
}

fn remediation_hint(schema: &SchemaType, missing: &[String]) -> String {
    format!(
        "derive(\"{}\", Variant::{}, forward_refs) needs forward_refs entries for: {}",
        schema.entity,
        schema.variant,
        missing.join(", ")
    )
}

///
/// TESTS
///
