use crate::{
    Error, builder,
    cache::SchemaCache,
    error::SchemaError,
    node::{EntityDef, ExtensionDecl, ExtensionField, SchemaType, validate_field_ident},
    resolve::{ForwardRefs, ResolvePolicy, resolve},
    types::Variant,
};
use std::{
    collections::HashMap,
    sync::{Arc, LazyLock, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

///
/// DECLARATIONS
/// the process-wide declaration tables
///
/// Entity definitions and extension-field declarations are written during
/// startup/import and read on every derivation. The extension table is a
/// side table keyed by entity name; `remove_entity` is the deregistration
/// hook that keeps it from outliving its entity.
///

#[derive(Default)]
struct Declarations {
    entities: HashMap<String, EntityDef>,
    extensions: HashMap<String, ExtensionDecl>,
}

static DECLARATIONS: LazyLock<RwLock<Declarations>> =
    LazyLock::new(|| RwLock::new(Declarations::default()));

static CACHE: LazyLock<RwLock<SchemaCache>> = LazyLock::new(|| RwLock::new(SchemaCache::new()));

static POLICY: LazyLock<RwLock<ResolvePolicy>> =
    LazyLock::new(|| RwLock::new(ResolvePolicy::default()));

fn declarations_read() -> RwLockReadGuard<'static, Declarations> {
    DECLARATIONS
        .read()
        .expect("declarations RwLock poisoned while acquiring read lock")
}

fn declarations_write() -> RwLockWriteGuard<'static, Declarations> {
    DECLARATIONS
        .write()
        .expect("declarations RwLock poisoned while acquiring write lock")
}

fn cache_read() -> RwLockReadGuard<'static, SchemaCache> {
    CACHE
        .read()
        .expect("schema cache RwLock poisoned while acquiring read lock")
}

fn cache_write() -> RwLockWriteGuard<'static, SchemaCache> {
    CACHE
        .write()
        .expect("schema cache RwLock poisoned while acquiring write lock")
}

/// Register an entity definition. Called once per entity by
/// entity-definition code; re-declaring a name is a fatal authoring mistake.
pub fn declare_entity(def: EntityDef) -> Result<(), Error> {
    def.validate()?;

    let mut declarations = declarations_write();
    if declarations.entities.contains_key(&def.name) {
        return Err(SchemaError::EntityAlreadyDeclared(def.name).into());
    }
    declarations.entities.insert(def.name.clone(), def);

    Ok(())
}

/// Register the extension fields contributed by one of the entity's
/// methods. Re-declaring replaces the prior set; it never appends.
///
/// Registration does not invalidate cache entries that were derived before
/// the declaration arrived; those keep their original shape.
pub fn declare_extension_fields(
    entity: &str,
    method: &str,
    fields: Vec<ExtensionField>,
) -> Result<(), Error> {
    for field in &fields {
        validate_field_ident(&field.name)?;
    }

    let mut declarations = declarations_write();
    if !declarations.entities.contains_key(entity) {
        return Err(SchemaError::UnknownEntity(entity.to_string()).into());
    }
    declarations
        .extensions
        .insert(entity.to_string(), ExtensionDecl::new(method, fields));

    Ok(())
}

/// Derive the schema for one entity/variant/forward-reference combination.
///
/// Cache hits return the stored instance without re-running the builder or
/// resolver. On a miss the whole build+resolve+store sequence runs under the
/// cache write lock, so construction is at-most-once per key and every
/// concurrent caller ends up holding the same `Arc`.
pub fn derive(
    entity: &str,
    variant: Variant,
    forward_refs: &ForwardRefs,
) -> Result<Arc<SchemaType>, Error> {
    let key = SchemaCache::key(entity, variant, forward_refs);

    if let Some(hit) = cache_read().get(&key) {
        return Ok(hit);
    }

    let mut cache = cache_write();
    // Re-check: another caller may have built while we waited for the lock.
    if let Some(hit) = cache.get(&key) {
        return Ok(hit);
    }

    let built = {
        let declarations = declarations_read();
        let def = declarations
            .entities
            .get(entity)
            .ok_or_else(|| SchemaError::UnknownEntity(entity.to_string()))?;
        let extensions = declarations
            .extensions
            .get(entity)
            .map_or(&[][..], |decl| decl.fields.as_slice());

        builder::build(def, variant, extensions)?
    };

    let outcome = resolve(built, forward_refs, resolve_policy())?;
    for warning in &outcome.warnings {
        warning.log();
    }

    let schema = Arc::new(outcome.schema);
    cache.insert(key, Arc::clone(&schema));

    Ok(schema)
}

/// Drop cached schemas, either for one entity or for the whole process.
/// Development/test tooling only; declarations are untouched.
pub fn clear_cache(entity: Option<&str>) {
    cache_write().clear(entity);
}

/// Deregistration hook: drop an entity's definition together with its
/// extension declaration and cached schemas. Returns whether the entity was
/// declared.
pub fn remove_entity(name: &str) -> bool {
    let existed = {
        let mut declarations = declarations_write();
        declarations.extensions.remove(name);
        declarations.entities.remove(name).is_some()
    };
    clear_cache(Some(name));

    existed
}

/// Process-wide resolution policy. Lenient by default; strict is intended
/// for development-time wiring checks.
pub fn set_resolve_policy(policy: ResolvePolicy) {
    *POLICY
        .write()
        .expect("policy RwLock poisoned while acquiring write lock") = policy;
}

#[must_use]
pub fn resolve_policy() -> ResolvePolicy {
    *POLICY
        .read()
        .expect("policy RwLock poisoned while acquiring read lock")
}

///
/// TESTS
///
/// Global-state tests use entity names unique to each test so the parallel
/// test runner cannot interleave declarations.
///
