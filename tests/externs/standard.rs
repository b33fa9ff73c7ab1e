//! Integration tests for the standard catalog
//!
//! Tests lookups a checker performs against the bundled declarations.

use std::sync::Arc;

use webshape::catalog::{CatalogLoader, LoadOptions, SharedCatalog, Validator, load_catalog};
use webshape::externs::{Api, standard_catalog, standard_sources};
use webshape::foundation::{ErrorKind, TypeExpr};

#[test]
fn standard_catalog_is_consistent() {
    let catalog = standard_catalog();
    assert!(Validator::new(&catalog).with_type_reference_check(true).run().is_empty());
    assert!(catalog.type_count() > 90);
}

#[test]
fn every_worker_scope_sees_event_target() {
    let catalog = standard_catalog();
    for scope in ["WorkerGlobalScope", "ServiceWorkerGlobalScope"] {
        let found = catalog.resolve_member(scope, "addEventListener").unwrap();
        assert_eq!(found.owner_name(), "EventTarget");
    }
    assert_eq!(
        catalog.resolve_member("ServiceWorkerGlobalScope", "importScripts").unwrap().owner_name(),
        "WorkerGlobalScope"
    );
}

#[test]
fn audio_param_automation() {
    let catalog = standard_catalog();
    let set_value = catalog.resolve_member("AudioParam", "setValueAtTime").unwrap();
    assert!(set_value.member.is_method());
    assert_eq!(set_value.member.params().len(), 2);

    let err = catalog.resolve_member("AudioParam", "setValueCurve").unwrap_err();
    assert_eq!(err.to_string(), "member not found: AudioParam/setValueCurve");
}

#[test]
fn unknown_types_and_enums() {
    let catalog = standard_catalog();
    assert!(matches!(
        catalog.resolve_member("AudioWorkletNode", "port").unwrap_err().kind,
        ErrorKind::TypeNotFound(_)
    ));
    assert_eq!(
        catalog.lookup_enum_value("ServiceWorkerState", "PAUSED").unwrap_err().to_string(),
        "enum value not found: ServiceWorkerState.PAUSED"
    );
}

#[test]
fn cache_match_returns_a_response_promise() {
    let catalog = standard_catalog();
    let matched = catalog.resolve_member("Cache", "match").unwrap();
    let returns = matched.member.return_type().unwrap();
    assert!(returns.referenced_names().contains(&"Response"));
    assert_ne!(returns, &TypeExpr::VOID);
}

#[test]
fn individual_files_load_with_dom() {
    let loader = CatalogLoader::new()
        .with_source(Api::Dom.source())
        .with_source(Api::ServiceWorker.source());
    let outcome = loader.load();
    assert!(outcome.is_clean(), "{:#?}", outcome.diagnostics);
    assert!(outcome.catalog.get_type("AudioContext").is_none());
    assert!(outcome.catalog.get_type("ServiceWorker").is_some());
}

#[test]
fn files_without_their_base_types_warn() {
    let outcome = CatalogLoader::new().with_source(Api::WebAudio.source()).load();
    assert!(!outcome.has_errors());
    assert!(outcome.warnings().count() > 0);
    assert!(outcome.warnings().all(|w| {
        w.context
            .as_ref()
            .is_some_and(|c| c.source.as_deref() == Some("web_audio.decl"))
    }));
}

#[test]
fn shared_catalog_serves_the_standard_catalog() {
    let shared = SharedCatalog::new(standard_catalog());
    let before = shared.snapshot();

    let loader = standard_sources()
        .into_iter()
        .fold(CatalogLoader::new().with_options(LoadOptions::strict()), CatalogLoader::with_source);
    let after = shared.reload(&loader).unwrap();

    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(*before, *after);
}

#[test]
fn standard_catalog_survives_emit_and_reload() {
    let catalog = standard_catalog();
    let emitted = catalog.to_source();

    let reloaded = load_catalog(&emitted);
    assert!(reloaded.is_clean(), "{:#?}", reloaded.diagnostics);
    assert_eq!(reloaded.catalog, catalog);
    assert_eq!(reloaded.catalog.to_source(), emitted);
}

#[cfg(feature = "serde")]
#[test]
fn standard_catalog_snapshot_roundtrip() {
    use webshape::catalog::snapshot::{from_bytes, to_bytes};

    let catalog = standard_catalog();
    let restored = from_bytes(&to_bytes(&catalog).unwrap()).unwrap();
    assert_eq!(restored, catalog);
    assert_eq!(
        restored.resolve_member("GainNode", "connect").unwrap().owner_name(),
        "AudioNode"
    );
}
