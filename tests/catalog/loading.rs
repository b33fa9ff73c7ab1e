//! Integration tests for catalog loading
//!
//! Tests multi-source loading, best-effort recovery, and load options.

use webshape_catalog::{CatalogLoader, DuplicatePolicy, LoadOptions, Source, load_catalog, load_sources};
use webshape_foundation::{ErrorKind, ReferenceRole};

#[test]
fn forward_references_resolve_in_the_second_pass() {
    let outcome = load_catalog(
        "(class: GainNode :extends AudioNode)\n(class: AudioNode :members [(property channelCount number)])\n",
    );
    assert!(outcome.is_clean(), "{:?}", outcome.diagnostics);
    assert_eq!(
        outcome.catalog.resolve_member("GainNode", "channelCount").unwrap().owner_name(),
        "AudioNode"
    );
}

#[test]
fn sources_share_one_namespace() {
    let outcome = load_sources(
        [
            Source::new("base.decl", "(interface: EventTarget)"),
            Source::new("audio.decl", "(class: AudioNode :implements [EventTarget])"),
            Source::new("nav.decl", "(augment: AudioNode :members [(property context *)])"),
        ],
        LoadOptions::strict(),
    );
    assert!(outcome.is_clean(), "{:?}", outcome.diagnostics);
    assert!(outcome.catalog.resolve_member("AudioNode", "context").is_ok());
}

#[test]
fn a_bad_block_loses_only_itself() {
    let outcome = load_catalog(
        "(class: A)\n(class: B :members [(property x)])\n(class: C :extends A)\n",
    );

    assert_eq!(outcome.catalog.type_count(), 2);
    assert!(outcome.catalog.get_type("B").is_none());
    assert_eq!(outcome.diagnostics.len(), 1);

    let problem = &outcome.diagnostics[0];
    assert!(matches!(problem.kind, ErrorKind::Parse { line: 2, .. }));
    assert_eq!(problem.context.as_ref().unwrap().source.as_deref(), Some("<input>"));
}

#[test]
fn an_unterminated_block_does_not_swallow_the_next() {
    let outcome = load_catalog("(class: A :members [(property x number)\n(class: B)\n");
    assert!(outcome.has_errors());
    assert!(outcome.catalog.get_type("B").is_some());
}

#[test]
fn duplicate_declarations_keep_first_by_default() {
    let outcome = load_catalog("(class: A :extends B)\n(class: B)\n(class: A)\n");
    assert!(
        outcome
            .errors()
            .any(|e| matches!(&e.kind, ErrorKind::DuplicateDeclaration(name) if name == "A"))
    );
    assert_eq!(outcome.catalog.lookup_type("A").unwrap().extends.as_deref(), Some("B"));
}

#[test]
fn duplicate_declarations_keep_last_when_asked() {
    let loader = CatalogLoader::new()
        .with_options(LoadOptions::default().with_duplicates(DuplicatePolicy::KeepLast))
        .with_source(Source::new("a.decl", "(class: A :extends B)\n(class: B)"))
        .with_source(Source::new("b.decl", "(class: A)"));

    let outcome = loader.load();
    assert!(outcome.has_errors());
    assert_eq!(outcome.catalog.lookup_type("A").unwrap().extends, None);
}

#[test]
fn augment_of_missing_type_is_dropped() {
    let outcome = load_catalog("(augment: Navigator :members [(property serviceWorker *)])");
    assert!(outcome.catalog.is_empty());
    assert!(outcome.diagnostics.iter().any(|e| matches!(
        &e.kind,
        ErrorKind::UnresolvedReference { role: ReferenceRole::AugmentTarget, reference, .. }
            if reference == "Navigator"
    )));
}

#[test]
fn strictness_decides_whether_warnings_fail() {
    let source = Source::new("gain.decl", "(class: GainNode :extends AudioNode)");

    let lenient = load_sources([source.clone()], LoadOptions::default());
    assert!(!lenient.has_errors());
    assert!(lenient.into_result().is_ok());

    let strict = load_sources([source], LoadOptions::strict());
    assert!(strict.into_result().is_err());
}

#[test]
fn missing_files_are_io_errors() {
    let err = Source::from_path("/nonexistent/web_audio.decl").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
}
