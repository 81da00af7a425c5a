//! End-to-end derivation behavior through the public operations.
//!
//! Every test declares entities with names unique to that test; the
//! declaration store and cache are process-wide and the runner is parallel.

use dtoforge_schema::{
    Error,
    error::SchemaError,
    prelude::*,
    types::{Primitive, TypeExpr, Variant},
};
use std::sync::Arc;
use std::thread;

fn declare_user(name: &str) {
    declare_entity(EntityDef::new(
        name,
        vec![
            Attribute::new("id", TypeExpr::Primitive(Primitive::Ulid))
                .primary_key()
                .system_managed(),
            Attribute::new("name", TypeExpr::Primitive(Primitive::Text)),
            Attribute::new("secret", TypeExpr::Primitive(Primitive::Text))
                .meta(AttributeMeta::default().include_in_response(false)),
        ],
    ))
    .unwrap();
}

#[test]
fn derive_is_idempotent_per_key() {
    declare_user("IdemUser");

    let first = derive("IdemUser", Variant::Response, &ForwardRefs::new()).unwrap();
    let second = derive("IdemUser", Variant::Response, &ForwardRefs::new()).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn different_forward_ref_sets_are_distinct_cache_entries() {
    declare_user("KeyedUser");

    let unreferenced = Arc::new(SchemaType {
        name: "GhostResponse".to_string(),
        entity: "Ghost".to_string(),
        variant: Variant::Response,
        fields: Vec::new(),
        pending: Vec::new(),
    });
    let mut refs = ForwardRefs::new();
    refs.insert("Ghost".to_string(), unreferenced);

    let bare = derive("KeyedUser", Variant::Response, &ForwardRefs::new()).unwrap();
    let keyed = derive("KeyedUser", Variant::Response, &refs).unwrap();

    // "Ghost" is never referenced by any field, yet the entries stay apart.
    assert!(!Arc::ptr_eq(&bare, &keyed));
    assert_eq!(bare.fields, keyed.fields);
}

#[test]
fn variant_exclusion_matches_the_inclusion_table() {
    declare_user("VariantUser");

    let create = derive("VariantUser", Variant::Create, &ForwardRefs::new()).unwrap();
    let update = derive("VariantUser", Variant::Update, &ForwardRefs::new()).unwrap();
    let response = derive("VariantUser", Variant::Response, &ForwardRefs::new()).unwrap();

    assert_eq!(create.field_names(), ["name", "secret"]);
    assert_eq!(update.field_names(), ["name", "secret"]);
    assert!(update.fields.iter().all(|f| f.ty.is_optional() && !f.required));
    assert_eq!(response.field_names(), ["id", "name"]);
}

#[test]
fn field_order_follows_declaration_order() {
    declare_entity(EntityDef::new(
        "OrderedEntity",
        vec![
            Attribute::new("b", TypeExpr::Primitive(Primitive::Text)),
            Attribute::new("a", TypeExpr::Primitive(Primitive::Text)),
            Attribute::new("c", TypeExpr::Primitive(Primitive::Text)),
        ],
    ))
    .unwrap();

    let schema = derive("OrderedEntity", Variant::Create, &ForwardRefs::new()).unwrap();

    assert_eq!(schema.field_names(), ["b", "a", "c"]);
}

#[test]
fn extension_fields_appear_only_in_response() {
    declare_user("ScopedUser");
    declare_extension_fields(
        "ScopedUser",
        "to_response_map",
        vec![ExtensionField::new(
            "avatar_url",
            TypeExpr::Primitive(Primitive::Text),
        )],
    )
    .unwrap();

    let response = derive("ScopedUser", Variant::Response, &ForwardRefs::new()).unwrap();
    let create = derive("ScopedUser", Variant::Create, &ForwardRefs::new()).unwrap();
    let update = derive("ScopedUser", Variant::Update, &ForwardRefs::new()).unwrap();

    assert!(response.field("avatar_url").is_some());
    assert!(create.field("avatar_url").is_none());
    assert!(update.field("avatar_url").is_none());
}

#[test]
fn builtin_wrappers_resolve_without_their_own_mapping() {
    declare_user("WrappedUser");
    declare_extension_fields(
        "WrappedUser",
        "to_response_map",
        vec![ExtensionField::named("badges", "list of Badge")],
    )
    .unwrap();

    let badge = Arc::new(SchemaType {
        name: "BadgeResponse".to_string(),
        entity: "Badge".to_string(),
        variant: Variant::Response,
        fields: Vec::new(),
        pending: Vec::new(),
    });
    let mut refs = ForwardRefs::new();
    refs.insert("Badge".to_string(), Arc::clone(&badge));

    let schema = derive("WrappedUser", Variant::Response, &refs).unwrap();

    assert_eq!(
        schema.field("badges").unwrap().ty,
        TypeExpr::List(Box::new(TypeExpr::Schema(badge)))
    );
}

#[test]
fn strict_policy_aborts_and_lenient_degrades() {
    declare_user("PolicyUser");
    declare_extension_fields(
        "PolicyUser",
        "to_response_map",
        vec![ExtensionField::named("related", "MissingType")],
    )
    .unwrap();

    set_resolve_policy(ResolvePolicy::Strict);
    let err = derive("PolicyUser", Variant::Response, &ForwardRefs::new()).unwrap_err();
    set_resolve_policy(ResolvePolicy::Lenient);

    match err {
        Error::SchemaError(SchemaError::SchemaGeneration { missing, .. }) => {
            assert_eq!(missing, vec!["MissingType".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // The failed derivation was not cached; the lenient retry builds fresh
    // and leaves the unresolved field permissively typed.
    let schema = derive("PolicyUser", Variant::Response, &ForwardRefs::new()).unwrap();
    assert_eq!(schema.field("related").unwrap().ty, TypeExpr::Any);
}

#[test]
fn collision_errors_before_anything_is_cached() {
    declare_entity(EntityDef::new(
        "CollidingEntity",
        vec![
            Attribute::new("id", TypeExpr::Primitive(Primitive::Ulid))
                .primary_key()
                .system_managed(),
            Attribute::new("tags", TypeExpr::Primitive(Primitive::Text)),
        ],
    ))
    .unwrap();
    declare_extension_fields(
        "CollidingEntity",
        "to_response_map",
        vec![ExtensionField::named("tags", "TagSummary")],
    )
    .unwrap();

    for _ in 0..2 {
        let err = derive("CollidingEntity", Variant::Response, &ForwardRefs::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::SchemaError(SchemaError::FieldNameCollision { ref field, .. }) if field == "tags"
        ));
    }

    // Other variants never merge extension fields and stay derivable.
    assert!(derive("CollidingEntity", Variant::Create, &ForwardRefs::new()).is_ok());
}

#[test]
fn concurrent_derivation_yields_one_shared_instance() {
    declare_user("ConcurrentUser");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| derive("ConcurrentUser", Variant::Response, &ForwardRefs::new()))
        })
        .collect();

    let schemas: Vec<Arc<SchemaType>> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();

    for schema in &schemas[1..] {
        assert!(Arc::ptr_eq(&schemas[0], schema));
    }
}

#[test]
fn late_extension_declaration_does_not_invalidate_cached_schemas() {
    declare_user("LateDeclUser");

    let before = derive("LateDeclUser", Variant::Response, &ForwardRefs::new()).unwrap();
    declare_extension_fields(
        "LateDeclUser",
        "to_response_map",
        vec![ExtensionField::new(
            "added_later",
            TypeExpr::Primitive(Primitive::Text),
        )],
    )
    .unwrap();
    let after = derive("LateDeclUser", Variant::Response, &ForwardRefs::new()).unwrap();

    assert!(Arc::ptr_eq(&before, &after));
    assert!(after.field("added_later").is_none());

    // Re-derivation after an explicit cache clear picks the declaration up.
    clear_cache(Some("LateDeclUser"));
    let fresh = derive("LateDeclUser", Variant::Response, &ForwardRefs::new()).unwrap();
    assert!(fresh.field("added_later").is_some());
}

#[test]
fn schema_metadata_serializes_for_diagnostics() {
    declare_user("SerdeUser");

    let schema = derive("SerdeUser", Variant::Response, &ForwardRefs::new()).unwrap();
    let json = serde_json::to_value(schema.as_ref()).unwrap();

    assert_eq!(json["name"], "SerdeUserResponse");
    assert_eq!(json["fields"][0]["name"], "id");
}
