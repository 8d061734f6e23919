//! Inheritance resolution over the OpenLDAP core object classes.

use crate::common::fixtures::{self, core_definitions};
use ldap_schema::{IngestConfig, IngestPolicy, ObjectClassKind, SchemaRegistry, ingest};

fn core_registry() -> SchemaRegistry {
    let (registry, report) =
        ingest(core_definitions(), &IngestConfig::default()).expect("Failed to ingest core schema");
    assert!(report.is_clean());
    registry
}

#[test]
fn test_core_schema_loads() {
    let registry = core_registry();
    assert_eq!(registry.len(), 11);
    assert_eq!(registry.names().len(), 12);
    assert_eq!(registry.get("dcObject").unwrap().kind, ObjectClassKind::Auxiliary);
    assert_eq!(registry.get("top").unwrap().kind, ObjectClassKind::Abstract);
}

#[test]
fn test_deep_inheritance_chain() {
    let registry = core_registry();
    assert_eq!(
        registry.inheritance_chain("inetOrgPerson"),
        vec!["inetOrgPerson", "organizationalPerson", "person", "top"]
    );
}

#[test]
fn test_deep_inheritance_attributes() {
    let registry = core_registry();
    let (must, may) = registry.aggregated_attributes("inetOrgPerson");

    // inetOrgPerson and organizationalPerson declare no MUST of their own
    assert_eq!(must, vec!["sn", "cn", "objectClass"]);

    // Own MAY first, then each ancestor's new ones
    assert_eq!(may[0], "audio");
    assert_eq!(may[26], "userPKCS12");
    assert_eq!(may[27], "title");
    assert_eq!(may.last().map(String::as_str), Some("description"));
    assert_eq!(may.iter().filter(|a| *a == "telephoneNumber").count(), 1);
    assert_eq!(may.iter().filter(|a| *a == "businessCategory").count(), 1);

    let own_may = registry.own_attributes("inetOrgPerson").unwrap().1.len();
    assert!(may.len() > own_may);
}

#[test]
fn test_description_with_parentheses() {
    let registry = core_registry();
    let group = registry.get("groupOfNames").unwrap();
    assert_eq!(group.description, "RFC2256: a group of names (DNs)");
    assert_eq!(group.must, vec!["member", "cn"]);
    assert_eq!(group.may.len(), 6);
}

#[test]
fn test_validate_inet_org_person_entry() {
    let registry = core_registry();

    assert!(
        registry
            .validate_entry(
                &["inetOrgPerson", "uidObject"],
                &["objectClass", "cn", "sn", "uid", "mail", "title", "userPassword"],
            )
            .is_ok()
    );

    // uidObject brings in its own MUST
    assert!(
        registry
            .validate_entry(&["inetOrgPerson", "uidObject"], &["cn", "sn"])
            .is_err()
    );

    // c is only allowed for country
    assert!(
        registry
            .validate_entry(&["inetOrgPerson"], &["cn", "sn", "c"])
            .is_err()
    );
}

#[test]
fn test_skip_invalid_keeps_the_rest() {
    let mut definitions = core_definitions();
    definitions.insert(3, fixtures::BROKEN);

    let config = IngestConfig::default().with_policy(IngestPolicy::SkipInvalid);
    let (registry, report) = ingest(&definitions, &config).unwrap();

    assert_eq!(report.parsed, 11);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 3);
    assert!(!registry.contains("brokenClass"));
    assert!(registry.contains("inetOrgPerson"));
}

#[test]
fn test_abort_on_error_publishes_nothing() {
    let mut definitions = core_definitions();
    definitions.insert(3, fixtures::BROKEN);

    let result = ingest(&definitions, &IngestConfig::default());
    assert!(matches!(
        result,
        Err(ldap_schema::IngestError::Definition { index: 3, .. })
    ));
}
