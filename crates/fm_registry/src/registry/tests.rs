use super::*;
use fm_hierarchy::{HierarchyBuilder, TraversalMode};
use pretty_assertions::assert_eq;

/// Error
///  ├── BaseError ── SubError ── SubSubError
///  ├── OtherError
///  └── AuditedError (implements Audited)
/// Retryable, Audited are unrelated interfaces.
/// BothError extends BaseError and implements Retryable.
fn hierarchy() -> Arc<TypeHierarchy> {
    let mut b = HierarchyBuilder::new();
    b.class("Error", None, &[]).expect("Error");
    b.interface("Retryable", &[]).expect("Retryable");
    b.interface("Audited", &[]).expect("Audited");
    b.class("BaseError", Some("Error"), &[]).expect("BaseError");
    b.class("SubError", Some("BaseError"), &[]).expect("SubError");
    b.class("SubSubError", Some("SubError"), &[])
        .expect("SubSubError");
    b.class("OtherError", Some("Error"), &[]).expect("OtherError");
    b.class("AuditedError", Some("Error"), &["Audited"])
        .expect("AuditedError");
    b.class("BothError", Some("BaseError"), &["Retryable"])
        .expect("BothError");
    Arc::new(b.build())
}

fn idx(h: &TypeHierarchy, name: &str) -> TypeIdx {
    h.lookup(name).expect("declared type")
}

fn store() -> HandlerRegistry<&'static str> {
    HandlerRegistry::builder(hierarchy())
        .register_named("BaseError", "base")
        .register_named("SubError", "sub")
        .register_named("OtherError", "other")
        .build()
        .expect("valid registry")
}

#[test]
fn exact_match_has_zero_distance() {
    let registry = store();
    let sub = idx(registry.hierarchy(), "SubError");

    assert_eq!(registry.resolve(sub), Some("sub"));
    let found = registry.best_match(sub).expect("match");
    assert_eq!(found.distance, Distance::ZERO);
    assert_eq!(found.key, sub);
    assert_eq!(found.position, 1);
}

#[test]
fn closest_superclass_wins() {
    let registry = store();
    let h = registry.hierarchy().clone();

    let found = registry
        .best_match(idx(&h, "SubSubError"))
        .expect("match");
    assert_eq!(*found.handler, "sub");
    assert_eq!(found.distance, Distance::Edges(1));

    assert_eq!(registry.resolve(idx(&h, "BaseError")), Some("base"));
}

#[test]
fn unrelated_type_resolves_to_nothing() {
    let registry = store();
    let h = registry.hierarchy().clone();
    assert_eq!(registry.resolve(idx(&h, "Error")), None);
    assert_eq!(registry.resolve(idx(&h, "AuditedError")), None);
    assert_eq!(registry.resolve(TypeIdx::from_raw(4096)), None);
}

#[test]
fn equal_distances_go_to_the_earliest_registration() {
    let h = hierarchy();
    let both = idx(&h, "BothError");

    let base_first = HandlerRegistry::builder(h.clone())
        .register_named("BaseError", "base")
        .register_named("Retryable", "retryable")
        .build()
        .expect("valid registry");
    let retryable_first = HandlerRegistry::builder(h)
        .register_named("Retryable", "retryable")
        .register_named("BaseError", "base")
        .build()
        .expect("valid registry");

    for _ in 0..16 {
        assert_eq!(base_first.resolve(both), Some("base"));
        assert_eq!(retryable_first.resolve(both), Some("retryable"));
    }
    assert_eq!(
        base_first.best_match(both).expect("match").distance,
        Distance::Edges(1)
    );
}

#[test]
fn superclass_only_registry_ignores_interface_keys() {
    let h = hierarchy();
    let registry = HandlerRegistry::builder(h.clone())
        .register_named("Audited", "audited")
        .build_with(GraphDistance::new(TraversalMode::SUPERCLASS))
        .expect("valid registry");

    let audited_error = idx(&h, "AuditedError");
    assert!(h.is_assignable(audited_error, idx(&h, "Audited")));
    assert_eq!(registry.resolve(audited_error), None);

    let both_modes = HandlerRegistry::builder(h)
        .register_named("Audited", "audited")
        .build()
        .expect("valid registry");
    assert_eq!(both_modes.resolve(audited_error), Some("audited"));
}

#[test]
fn keys_beyond_the_depth_budget_never_match() {
    let h = hierarchy();
    let registry = HandlerRegistry::builder(h.clone())
        .register_named("Error", "root")
        .register_named("BaseError", "base")
        .build_with(GraphDistance::default().with_max_depth(2))
        .expect("valid registry");

    // SubSubError -> SubError -> BaseError is within two edges ...
    assert_eq!(registry.resolve(idx(&h, "SubSubError")), Some("base"));
    // ... but Error is three edges away from SubSubError.
    let root_only = HandlerRegistry::builder(h.clone())
        .register_named("Error", "root")
        .build_with(GraphDistance::default().with_max_depth(2))
        .expect("valid registry");
    assert_eq!(root_only.resolve(idx(&h, "SubSubError")), None);
    assert_eq!(root_only.resolve(idx(&h, "SubError")), Some("root"));
}

#[test]
fn duplicate_keys_are_rejected() {
    let err = HandlerRegistry::builder(hierarchy())
        .register_named("BaseError", "first")
        .register_named("OtherError", "other")
        .register_named("BaseError", "second")
        .build()
        .expect_err("duplicate key");
    assert_eq!(
        err,
        RegistryError::DuplicateKey {
            name: "BaseError".to_owned(),
            first: 0
        }
    );
}

#[test]
fn unknown_keys_are_rejected() {
    let err = HandlerRegistry::builder(hierarchy())
        .register_named("MissingError", "missing")
        .build()
        .expect_err("unknown name");
    assert_eq!(
        err,
        RegistryError::UnknownTypeName {
            name: "MissingError".to_owned()
        }
    );

    let foreign = TypeIdx::from_raw(777);
    let err = HandlerRegistry::new(
        hierarchy(),
        [Registration::new(foreign, "foreign")],
        GraphDistance::default(),
    )
    .expect_err("foreign index");
    assert_eq!(err, RegistryError::UnknownKeyType { key: foreign });
}

#[test]
fn introspection_reflects_registration_order() {
    let registry = store();
    let h = registry.hierarchy().clone();
    assert_eq!(registry.len(), 3);
    assert!(!registry.is_empty());
    assert_eq!(registry.get(idx(&h, "OtherError")), Some(&"other"));
    assert_eq!(registry.get(idx(&h, "SubSubError")), None);

    let handlers: Vec<&str> = registry.iter().map(|r| r.handler).collect();
    assert_eq!(handlers, vec!["base", "sub", "other"]);
    assert_eq!(
        registry.evaluator().default_max_depth(),
        fm_hierarchy::DEFAULT_MAX_DEPTH
    );
}

#[test]
fn empty_registry_resolves_nothing() {
    let h = hierarchy();
    let registry: HandlerRegistry<u8> = HandlerRegistry::builder(h.clone())
        .build()
        .expect("empty registry");
    assert!(registry.is_empty());
    assert_eq!(registry.resolve(idx(&h, "SubError")), None);
}
