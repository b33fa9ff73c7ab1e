//! Integration tests for Error types
//!
//! Tests error construction, display, context, and severities.

use webshape_foundation::{Error, ErrorContext, ErrorKind, ReferenceRole, Severity};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_type_not_found() {
    let err = Error::type_not_found("AudioNode");
    assert!(matches!(err.kind, ErrorKind::TypeNotFound(_)));
    assert!(err.is_not_found());
    assert!(format!("{err}").contains("AudioNode"));
}

#[test]
fn error_member_not_found() {
    let err = Error::member_not_found("GainNode", "frobnicate");
    assert!(matches!(err.kind, ErrorKind::MemberNotFound { .. }));
    assert_eq!(format!("{err}"), "member not found: GainNode/frobnicate");
}

#[test]
fn error_unresolved_reference() {
    let err = Error::unresolved("GainNode", "AudioNode", ReferenceRole::Extends);
    assert_eq!(format!("{err}"), "unresolved parent `AudioNode` in GainNode");
}

#[test]
fn error_parse_carries_position() {
    let err = Error::parse("unterminated list", 3, 7, "(class: A");
    let ErrorKind::Parse { line, column, context, .. } = &err.kind else {
        panic!("expected a parse error");
    };
    assert_eq!((*line, *column), (3, 7));
    assert_eq!(context, "(class: A");
}

// =============================================================================
// Severity
// =============================================================================

#[test]
fn resolution_problems_are_warnings() {
    let err = Error::unresolved("A/b", "C", ReferenceRole::Replacement);
    assert_eq!(err.kind.severity(), Severity::Warning);

    let err = Error::new(ErrorKind::ReadOnlyMutation {
        owner: "AudioParam".into(),
        method: "reset".into(),
        property: "defaultValue".into(),
    });
    assert_eq!(err.kind.severity(), Severity::Warning);
}

#[test]
fn structural_problems_are_errors() {
    let err = Error::new(ErrorKind::CyclicInheritance {
        type_name: "A".into(),
        cycle: vec!["A".into(), "B".into(), "A".into()],
    });
    assert_eq!(err.kind.severity(), Severity::Error);
    assert_eq!(format!("{err}"), "cyclic inheritance for A: A -> B -> A");

    let err = Error::new(ErrorKind::DuplicateMember {
        owner: "AudioNode".into(),
        member: "connect".into(),
    });
    assert_eq!(err.kind.severity(), Severity::Error);
}

#[test]
fn severities_order_warning_below_error() {
    assert!(Severity::Warning < Severity::Error);
    assert_eq!(Severity::Error.to_string(), "error");
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_builder() {
    let err = Error::type_not_found("Missing").with_context(
        ErrorContext::new()
            .with_source("web_audio.decl")
            .with_position(12, 3)
            .with_declaration("GainNode"),
    );

    let ctx = err.context.as_ref().unwrap();
    assert_eq!(ctx.source.as_deref(), Some("web_audio.decl"));
    assert_eq!((ctx.line, ctx.column), (Some(12), Some(3)));
    assert_eq!(ctx.declaration.as_deref(), Some("GainNode"));
    assert!(ctx.to_string().starts_with("at web_audio.decl:12:3"));
}

#[test]
fn in_source_keeps_existing_context() {
    let err = Error::type_not_found("Missing")
        .with_context(ErrorContext::new().with_declaration("GainNode"))
        .in_source("dom.decl");

    let ctx = err.context.unwrap();
    assert_eq!(ctx.source.as_deref(), Some("dom.decl"));
    assert_eq!(ctx.declaration.as_deref(), Some("GainNode"));
}
