//! Integration tests for the reader
//!
//! Tests parsing of declaration sources to AST, including error recovery.

use webshape_language::{Ast, parse, parse_one, parse_recovering};

#[test]
fn read_declaration_form() {
    let ast = parse_one("(class: GainNode :extends AudioNode)").unwrap();
    assert_eq!(ast.head(), Some("class:"));
    let elements = ast.as_list().unwrap();
    assert_eq!(elements.len(), 4);
    assert_eq!(elements[2].as_keyword(), Some("extends"));
}

#[test]
fn read_nested_collections() {
    let ast = parse_one("[(x number) {:scope string}]").unwrap();
    let items = ast.as_vector().unwrap();
    assert!(matches!(items[0], Ast::List(..)));
    let entries = items[1].as_map().unwrap();
    assert_eq!(entries[0].0.as_keyword(), Some("scope"));
    assert_eq!(entries[0].1.as_symbol(), Some("string"));
}

#[test]
fn read_many_forms_skipping_comments() {
    let forms = parse("; header\n(class: A)\n; middle\n(class: B)\n").unwrap();
    assert_eq!(forms.len(), 2);
}

#[test]
fn discard_skips_exactly_one_form() {
    let forms = parse("#_ (enum: PushPermissionStatus :of string) (class: PushManager)").unwrap();
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0].as_list().unwrap()[1].as_symbol(), Some("PushManager"));

    let ast = parse_one("[a #_ b c]").unwrap();
    assert_eq!(ast.as_vector().unwrap().len(), 2);
}

#[test]
fn read_errors() {
    assert!(parse("(class: A").is_err());
    assert!(parse("(class: A))").is_err());
    assert!(parse("{:k}").is_err());
    assert!(parse("#_").is_err());
}

#[test]
fn spans_point_at_source() {
    let source = "(class: A)\n(interface: EventTarget)";
    let forms = parse(source).unwrap();
    let span = forms[1].span();
    assert_eq!(span.line, 2);
    assert_eq!(span.text(source), "(interface: EventTarget)");
    assert_eq!(span.line_text(source), "(interface: EventTarget)");
}

#[test]
fn recovery_keeps_forms_after_a_bad_block() {
    let source = "(class: A)\n(class: B :members [(property x number)\n(class: C)\n";
    let (forms, errors) = parse_recovering(source);

    let names: Vec<_> = forms
        .iter()
        .filter_map(|f| f.as_list()?.get(1)?.as_symbol())
        .collect();
    assert_eq!(names, ["A", "C"]);
    assert_eq!(errors.len(), 1);
}

#[test]
fn recovery_on_clean_source_matches_parse() {
    let source = "(class: A)\n(class: B :extends A)\n";
    let (forms, errors) = parse_recovering(source);
    assert!(errors.is_empty());
    assert_eq!(forms, parse(source).unwrap());
}
