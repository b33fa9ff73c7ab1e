//! Integration tests for inheritance-aware lookup
//!
//! Tests member resolution, shadowing, capabilities, and enum lookup.

use webshape_catalog::{Catalog, load_catalog};
use webshape_foundation::{EnumValue, ErrorKind, TypeExpr};

fn catalog(source: &str) -> Catalog {
    let outcome = load_catalog(source);
    assert!(outcome.is_clean(), "{:?}", outcome.diagnostics);
    outcome.catalog
}

#[test]
fn derived_type_sees_base_members() {
    let catalog = catalog(
        "(class: BaseType :members [(property value number)])\n\
         (class: DerivedType :extends BaseType :members [(property rate number)])",
    );

    let value = catalog.resolve_member("DerivedType", "value").unwrap();
    assert_eq!(value.owner_name(), "BaseType");
    assert_eq!(value.member.value_type(), TypeExpr::NUMBER);

    let err = catalog.resolve_member("DerivedType", "missing").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MemberNotFound { .. }));
    assert!(err.is_not_found());
}

#[test]
fn nearest_declaration_wins() {
    let catalog = catalog(
        "(class: Root :members [(property x number)])\n\
         (class: Middle :extends Root :members [(property x number :readonly)])\n\
         (class: Leaf :extends Middle)",
    );

    let x = catalog.resolve_member("Leaf", "x").unwrap();
    assert_eq!(x.owner_name(), "Middle");
    assert!(x.member.is_readonly());
    assert_eq!(catalog.override_of("Middle", "x"), Some("Root"));
    assert_eq!(catalog.override_of("Leaf", "x"), None);
}

#[test]
fn parent_chain_shadows_capabilities() {
    let catalog = catalog(
        "(interface: Listener :members [(method handleEvent [] string)])\n\
         (class: Base :members [(method handleEvent [] string)])\n\
         (class: Node :extends Base :implements [Listener])",
    );

    assert_eq!(catalog.resolve_member("Node", "handleEvent").unwrap().owner_name(), "Base");
    assert_eq!(catalog.ancestors("Node").unwrap(), ["Base", "Listener"]);
    assert!(catalog.is_subtype("Node", "Listener"));
    assert!(!catalog.is_subtype("Base", "Listener"));
}

#[test]
fn visible_members_apply_shadowing() {
    let catalog = catalog(
        "(class: AudioNode :members [(property channelCount number) (method connect [])])\n\
         (class: GainNode :extends AudioNode :members [(property gain number) (property channelCount number)])",
    );

    let visible: Vec<_> = catalog
        .visible_members("GainNode")
        .unwrap()
        .into_iter()
        .map(|m| format!("{}/{}", m.owner_name(), m.member.name))
        .collect();
    assert_eq!(visible, ["GainNode/gain", "GainNode/channelCount", "AudioNode/connect"]);
}

#[test]
fn unknown_types_are_not_found() {
    let catalog = catalog("(class: A)");
    let err = catalog.resolve_member("Nope", "x").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeNotFound(_)));
    assert!(catalog.ancestors("Nope").is_err());
    assert!(catalog.search_order("Nope").is_empty());
}

#[test]
fn dangling_parent_ends_the_chain() {
    let outcome = load_catalog(
        "(class: Root :members [(property x number)])\n\
         (class: Orphan :extends Missing :members [(property y number)])",
    );
    let catalog = outcome.catalog;
    assert!(catalog.resolve_member("Orphan", "y").is_ok());
    assert!(catalog.resolve_member("Orphan", "x").is_err());
    assert!(catalog.ancestors("Orphan").unwrap().is_empty());
}

#[test]
fn cyclic_types_expose_only_their_own_members() {
    let outcome = load_catalog(
        "(class: A :extends B :members [(property a number)])\n\
         (class: B :extends A :members [(property b number)])",
    );
    let catalog = outcome.catalog;
    assert!(catalog.resolve_member("A", "a").is_ok());
    assert!(catalog.resolve_member("A", "b").is_err());
}

#[test]
fn typedefs_resolve_through_aliases() {
    let catalog = catalog(
        "(typedef: RequestInfo (union Request string))\n\
         (typedef: Input RequestInfo)\n\
         (class: Request)",
    );

    let input = TypeExpr::named("Input");
    assert_eq!(
        catalog.resolve_typedef(&input),
        &TypeExpr::union(vec![TypeExpr::named("Request"), TypeExpr::STRING])
    );
    assert_eq!(catalog.resolve_typedef(&TypeExpr::NUMBER), &TypeExpr::NUMBER);
}

#[test]
fn enum_lookup_by_symbol() {
    let catalog = catalog(
        "(enum: LifecycleState :of string :values {:ACTIVE \"active\" :CLOSED \"closed\"})",
    );

    assert_eq!(
        catalog.lookup_enum_value("LifecycleState", "ACTIVE").unwrap(),
        &EnumValue::String("active".into())
    );
    assert_eq!(
        catalog
            .lookup_enum_value("LifecycleState", "CLOSED")
            .unwrap()
            .as_str(),
        Some("closed")
    );

    let err = catalog.lookup_enum_value("LifecycleState", "PAUSED").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::EnumValueNotFound { .. }));
    let err = catalog.lookup_enum_value("Missing", "ACTIVE").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::EnumNotFound(_)));
}
