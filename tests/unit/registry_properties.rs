//! Property-based tests for alias sharing and attribute deduplication.
//!
//! Class and attribute names start with a lowercase letter so they can never
//! collide with the uppercase clause keywords.

use crate::common::fixtures::TOP;
use ldap_schema::schema::dedup_preserving_order;
use ldap_schema::{SchemaRegistry, parse_object_class};
use proptest::prelude::*;

fn class_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-zA-Z0-9]{0,8}", 1..5).prop_map(|names| {
        dedup_preserving_order(names)
            .into_iter()
            .filter(|name| name != "top")
            .collect()
    })
}

fn attribute_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-zA-Z0-9]{0,6}", 1..8)
}

fn definition(names: &[String], must: &[String], may: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{}'", n)).collect();
    format!(
        "( 1.3.6.1.4.1.99999.7 NAME ( {} ) SUP top STRUCTURAL MUST ( {} ) MAY ( {} ) )",
        quoted.join(" "),
        must.join(" $ "),
        may.join(" $ ")
    )
}

fn base_registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    parse_object_class(TOP, &mut registry).unwrap();
    registry
}

proptest! {
    #[test]
    fn every_alias_resolves_to_the_same_record(
        names in class_names().prop_filter("need a name", |n| !n.is_empty()),
        must in attribute_names(),
        may in attribute_names(),
    ) {
        let mut registry = base_registry();
        let parsed = parse_object_class(&definition(&names, &must, &may), &mut registry).unwrap();
        prop_assert_eq!(&parsed.names, &names);

        let primary = registry.get(&names[0]).unwrap();
        for name in &names {
            let class = registry.get(name).unwrap();
            prop_assert!(std::ptr::eq(primary, class));
            prop_assert_eq!(&class.names[0], &names[0]);
        }

        let mut expected_chain = names.clone();
        expected_chain.push("top".to_string());
        prop_assert_eq!(registry.inheritance_chain(names.last().unwrap()), expected_chain);
    }

    #[test]
    fn aggregated_attributes_are_stable_and_unique(
        names in class_names().prop_filter("need a name", |n| !n.is_empty()),
        must in attribute_names(),
        may in attribute_names(),
    ) {
        let mut registry = base_registry();
        let text = definition(&names, &must, &may);
        parse_object_class(&text, &mut registry).unwrap();

        let mut expected_must = must.clone();
        expected_must.push("objectClass".to_string());
        let expected_must = dedup_preserving_order(expected_must);
        let expected_may = dedup_preserving_order(may.clone());

        for name in &names {
            let (got_must, got_may) = registry.aggregated_attributes(name);
            prop_assert_eq!(&got_must, &expected_must);
            prop_assert_eq!(&got_may, &expected_may);
        }

        // Registering the same text again changes nothing observable
        parse_object_class(&text, &mut registry).unwrap();
        let (again_must, again_may) = registry.aggregated_attributes(&names[0]);
        prop_assert_eq!(again_must, expected_must);
        prop_assert_eq!(again_may, expected_may);
        prop_assert_eq!(registry.len(), 2);
    }
}
