//! Integration tests for catalog validation
//!
//! Tests that every consistency problem is reported, with its position.

use proptest::prelude::*;
use webshape_catalog::{Catalog, Validator, load_catalog, validate};
use webshape_foundation::{Error, ErrorKind, ReferenceRole, Severity};

fn problems(source: &str) -> Vec<Error> {
    load_catalog(source).diagnostics
}

#[test]
fn consistent_catalog_validates_clean() {
    let catalog = load_catalog(
        "(interface: EventTarget)\n\
         (class: AudioNode :implements [EventTarget] :members [(method connect [(destination AudioNode)])])\n\
         (class: GainNode :extends AudioNode\n  :members [(method connectGain [] :deprecated AudioNode/connect)])",
    )
    .catalog;
    assert!(validate(&catalog).is_empty());
}

#[test]
fn dangling_replacement_is_a_resolution_warning() {
    let found = problems(
        "(class: AudioContext\n  :members [(method createGainNode [] :deprecated AudioContext/createGain)])",
    );

    assert_eq!(found.len(), 1);
    assert!(found[0].is_warning());
    let ErrorKind::UnresolvedReference { from, reference, role } = &found[0].kind else {
        panic!("expected an unresolved reference, got {:?}", found[0].kind);
    };
    assert_eq!(from, "AudioContext/createGainNode");
    assert_eq!(reference, "AudioContext/createGain");
    assert_eq!(*role, ReferenceRole::Replacement);
}

#[test]
fn replacements_may_name_enum_values() {
    let found = problems(
        "(enum: State :of string :values {:ON \"on\"})\n\
         (class: Legacy :members [(property on string :deprecated State/ON)])",
    );
    assert!(found.is_empty(), "{found:?}");
}

#[test]
fn orphaned_parent_is_reported_at_its_declaration() {
    let found = problems("(class: EventTarget)\n\n(class: GainNode\n  :extends AudioNode)");

    assert_eq!(found.len(), 1);
    let ctx = found[0].context.as_ref().unwrap();
    assert_eq!(ctx.declaration.as_deref(), Some("GainNode"));
    assert_eq!((ctx.line, ctx.column), (Some(3), Some(1)));
    assert!(matches!(
        found[0].kind,
        ErrorKind::UnresolvedReference { role: ReferenceRole::Extends, .. }
    ));
}

#[test]
fn duplicate_members_need_manual_resolution() {
    let outcome = load_catalog(
        "(class: AudioParam :members [(property value number) (property value string)])",
    );

    let found = &outcome.diagnostics;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity(), Severity::Error);
    assert!(matches!(&found[0].kind, ErrorKind::DuplicateMember { member, .. } if member == "value"));

    let value = outcome.catalog.resolve_member("AudioParam", "value").unwrap();
    assert_eq!(value.member.value_type(), webshape_foundation::TypeExpr::NUMBER);
}

#[test]
fn duplicate_enum_symbols() {
    let found = problems("(enum: State :of string :values {:ON \"on\" :ON \"enabled\"})");
    assert!(matches!(&found[..], [e] if matches!(e.kind, ErrorKind::DuplicateEnumValue { .. })));
}

#[test]
fn widening_override_is_reported() {
    let found = problems(
        "(class: AudioNode)\n\
         (class: GainNode :extends AudioNode)\n\
         (class: Base :members [(property node !GainNode)])\n\
         (class: Derived :extends Base :members [(property node AudioNode)])",
    );

    assert_eq!(found.len(), 1);
    let ErrorKind::InvalidOverride { owner, ancestor, .. } = &found[0].kind else {
        panic!("expected an invalid override, got {:?}", found[0].kind);
    };
    assert_eq!(owner, "Derived");
    assert_eq!(ancestor, "Base");
}

#[test]
fn narrowing_override_is_accepted() {
    let found = problems(
        "(class: AudioNode)\n\
         (class: GainNode :extends AudioNode)\n\
         (class: Base :members [(method create [(size number)] AudioNode)])\n\
         (class: Derived :extends Base :members [(method create [(size number) (hint string :optional)] !GainNode)])",
    );
    assert!(found.is_empty(), "{found:?}");
}

#[test]
fn mutating_a_read_only_property() {
    let found = problems(
        "(class: AudioParam\n\
         \x20 :members [(property defaultValue number :readonly)\n\
         \x20           (property value number)\n\
         \x20           (method reset [] :mutates [defaultValue value])])",
    );

    assert_eq!(found.len(), 1);
    assert!(matches!(
        &found[0].kind,
        ErrorKind::ReadOnlyMutation { property, .. } if property == "defaultValue"
    ));
}

#[test]
fn mutating_an_undeclared_property() {
    let found = problems("(class: A :members [(method reset [] :mutates [nothing])])");
    assert!(matches!(
        &found[..],
        [e] if matches!(e.kind, ErrorKind::UnresolvedReference { role: ReferenceRole::Mutates, .. })
    ));
}

#[test]
fn type_references_are_only_checked_on_request() {
    let catalog: Catalog = load_catalog(
        "(class: Holder :template [T]\n  :members [(property buffer ?AudioBuffer) (property item T)])",
    )
    .catalog;

    assert!(validate(&catalog).is_empty());

    let found = Validator::new(&catalog).with_type_reference_check(true).run();
    assert_eq!(found.len(), 1);
    assert!(matches!(
        &found[0].kind,
        ErrorKind::UnknownTypeReference { name, from } if name == "AudioBuffer" && from == "Holder/buffer"
    ));
}

#[test]
fn validation_reports_every_problem() {
    let found = problems(
        "(class: A :extends Missing :implements [AlsoMissing]\n\
         \x20 :members [(property x number) (property x number)])\n\
         (class: B :deprecated Gone)",
    );
    assert_eq!(found.len(), 4);
}

#[test]
fn emitted_catalog_reloads_unchanged() {
    let outcome = load_catalog(
        "(interface: EventTarget)\n\
         (class: AudioNode :implements [EventTarget]\n\
         \x20 :members [(property channelCount number)\n\
         \x20           (method connect [(destination !AudioNode) (output number :optional)] !AudioNode)])\n\
         (class: GainNode :extends AudioNode :members [(property channelCount number :readonly)])\n\
         (enum: ChannelCountMode :of string :values {:MAX \"max\" :EXPLICIT \"explicit\"})",
    );
    assert!(outcome.is_clean(), "{:?}", outcome.diagnostics);

    let reloaded = load_catalog(&outcome.catalog.to_source());
    assert!(reloaded.is_clean(), "{:?}", reloaded.diagnostics);
    assert_eq!(reloaded.catalog, outcome.catalog);
}

#[test]
fn chain_into_a_cycle_is_reported_and_inherits_nothing() {
    let outcome = load_catalog(
        "(class: A :extends B :members [(property a number)])\n\
         (class: B :extends A :members [(property b number)])\n\
         (class: C :extends A :members [(property c number)])",
    );

    let for_c: Vec<_> = outcome
        .diagnostics
        .iter()
        .filter(|e| e.context.as_ref().and_then(|c| c.declaration.as_deref()) == Some("C"))
        .collect();
    assert_eq!(for_c.len(), 1);
    let ErrorKind::CyclicInheritance { type_name, cycle } = &for_c[0].kind else {
        panic!("expected a cycle, got {:?}", for_c[0].kind);
    };
    assert_eq!(type_name, "C");
    assert_eq!(cycle, &["C", "A", "B", "A"]);
    assert_eq!(for_c[0].context.as_ref().unwrap().line, Some(3));

    let catalog = &outcome.catalog;
    assert!(catalog.resolve_member("C", "c").is_ok());
    assert!(catalog.resolve_member("C", "a").is_err());
    assert!(catalog.resolve_member("C", "b").is_err());
    assert!(catalog.ancestors("C").unwrap().is_empty());
}

/// Type expression source for a member of `T{owner}`, referring only to earlier types.
fn member_type(owner: usize) -> impl Strategy<Value = String> {
    let earlier = 0..owner.max(1);
    prop_oneof![
        Just("number".to_string()),
        Just("string".to_string()),
        Just("(union number string)".to_string()),
        earlier.clone().prop_map(|t| format!("?T{t}")),
        earlier.clone().prop_map(|t| format!("(array !T{t})")),
        earlier.prop_map(|t| format!("(promise T{t})")),
    ]
}

fn member(owner: usize, index: usize) -> impl Strategy<Value = String> {
    (member_type(owner), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        move |(ty, method, flag, deprecated)| {
            let note = if deprecated { " :deprecated \"Legacy.\"" } else { "" };
            if method {
                let optional = if flag { " :optional" } else { "" };
                format!("(method m{index} [(arg {ty}{optional})] {ty}{note})")
            } else {
                let readonly = if flag { " :readonly" } else { "" };
                format!("(property p{index} {ty}{readonly}{note})")
            }
        },
    )
}

fn type_form(i: usize) -> impl Strategy<Value = String> {
    let parent = if i == 0 { Just(None).boxed() } else { prop::option::of(0..i).boxed() };
    let members = (0..4usize)
        .map(move |index| member(i, index))
        .collect::<Vec<_>>();
    (parent, prop::sample::subsequence((0..4usize).collect::<Vec<_>>(), 0..=4), members).prop_map(
        move |(parent, keep, members)| {
            let extends = parent.map(|p| format!(" :extends T{p}")).unwrap_or_default();
            let kept: Vec<_> = keep.into_iter().map(|k| members[k].clone()).collect();
            format!("(class: T{i}{extends}\n  :members [{}])\n", kept.join("\n            "))
        },
    )
}

fn catalog_source() -> impl Strategy<Value = String> {
    (1usize..8).prop_flat_map(|n| (0..n).map(type_form).collect::<Vec<_>>().prop_map(|forms| forms.concat()))
}

proptest! {
    #[test]
    fn generated_catalogs_survive_emit_and_reload(source in catalog_source()) {
        let loaded = load_catalog(&source);
        prop_assert!(!loaded.has_errors(), "{:?}", loaded.diagnostics);

        let emitted = loaded.catalog.to_source();
        let reloaded = load_catalog(&emitted);
        prop_assert_eq!(&reloaded.catalog, &loaded.catalog);
        prop_assert_eq!(reloaded.diagnostics.len(), loaded.diagnostics.len());
    }
}
