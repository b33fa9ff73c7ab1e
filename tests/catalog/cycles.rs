//! Property tests for cyclic inheritance
//!
//! Synthetic catalogs with random parent links: exactly the types whose
//! `extends` chain revisits a type are reported as cyclic.

use std::collections::BTreeSet;

use proptest::prelude::*;
use webshape_catalog::load_catalog;
use webshape_foundation::ErrorKind;

/// Parent index per type; `None` is a root, an index past the end is dangling.
fn parent_links() -> impl Strategy<Value = Vec<Option<usize>>> {
    (1usize..16).prop_flat_map(|n| prop::collection::vec(prop::option::of(0..n + 2), n))
}

fn source(links: &[Option<usize>]) -> String {
    links
        .iter()
        .enumerate()
        .map(|(i, parent)| match parent {
            Some(p) => format!("(class: T{i} :extends T{p} :members [(property own{i} number)])\n"),
            None => format!("(class: T{i} :members [(property own{i} number)])\n"),
        })
        .collect()
}

/// Types whose parent walk never reaches a root or a dangling name.
fn expected_cyclic(links: &[Option<usize>]) -> BTreeSet<String> {
    (0..links.len())
        .filter(|&start| {
            let mut current = Some(start);
            for _ in 0..=links.len() {
                match current {
                    Some(i) if i < links.len() => current = links[i],
                    _ => return false,
                }
            }
            true
        })
        .map(|i| format!("T{i}"))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn cycles_are_reported_exactly(links in parent_links()) {
        let outcome = load_catalog(&source(&links));

        let reported: BTreeSet<String> = outcome
            .diagnostics
            .iter()
            .filter_map(|e| match &e.kind {
                ErrorKind::CyclicInheritance { type_name, .. } => Some(type_name.clone()),
                _ => None,
            })
            .collect();
        let expected = expected_cyclic(&links);

        prop_assert_eq!(&reported, &expected);
        let flagged: BTreeSet<String> = outcome.catalog.cyclic_types().map(String::from).collect();
        prop_assert_eq!(&flagged, &expected);
    }

    #[test]
    fn lookup_terminates_on_any_catalog(links in parent_links()) {
        let catalog = load_catalog(&source(&links)).catalog;

        for i in 0..links.len() {
            let name = format!("T{i}");
            let own = format!("own{i}");
            prop_assert!(catalog.resolve_member(&name, &own).is_ok());
            prop_assert!(catalog.resolve_member(&name, "absent").is_err());
            prop_assert!(catalog.ancestors(&name).unwrap().len() < links.len());
        }
    }

    #[test]
    fn acyclic_types_inherit_from_their_whole_chain(links in parent_links()) {
        let catalog = load_catalog(&source(&links)).catalog;
        let cyclic = expected_cyclic(&links);

        for (i, parent) in links.iter().enumerate() {
            let name = format!("T{i}");
            if cyclic.contains(&name) {
                continue;
            }
            if let Some(p) = parent.filter(|&p| p < links.len()) {
                let inherited = format!("own{p}");
                prop_assert!(catalog.resolve_member(&name, &inherited).is_ok());
            }
        }
    }
}

#[test]
fn reported_cycle_starts_at_the_type() {
    let outcome = load_catalog("(class: A :extends B)\n(class: B :extends C)\n(class: C :extends A)\n(class: D :extends A)");

    let cycles: Vec<_> = outcome
        .diagnostics
        .iter()
        .filter_map(|e| match &e.kind {
            ErrorKind::CyclicInheritance { type_name, cycle } => Some((type_name.as_str(), cycle.join(" "))),
            _ => None,
        })
        .collect();

    assert_eq!(
        cycles,
        [
            ("A", "A B C A".to_string()),
            ("B", "B C A B".to_string()),
            ("C", "C A B C".to_string()),
            ("D", "D A B C A".to_string())
        ]
    );
    assert!(outcome.catalog.is_cyclic("D"));
    assert!(outcome.catalog.ancestors("D").unwrap().is_empty());
}
