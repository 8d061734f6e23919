//! Parser for RFC 4512 object-class descriptions.
//!
//! Schema text as served by directory servers does not keep its clauses in a
//! fixed order, so every clause is located on its own over the whole
//! definition instead of walking the text token by token.
//!
//! ```rust
//! use ldap_schema::schema::{ObjectClassKind, SchemaRegistry, parse_object_class};
//!
//! let mut registry = SchemaRegistry::new();
//! let top = parse_object_class(
//!     "( 2.5.6.0 NAME 'top' DESC 'top of the superclass chain' ABSTRACT MUST objectClass )",
//!     &mut registry,
//! ).unwrap();
//!
//! assert_eq!(top.oid, "2.5.6.0");
//! assert_eq!(top.kind, ObjectClassKind::Abstract);
//! assert!(registry.contains("top"));
//! ```

use super::registry::SchemaRegistry;
use super::types::{ObjectClass, ObjectClassKind};
use crate::error::{SchemaError, SchemaResult};

use log::trace;
use regex::Regex;
use std::sync::LazyLock;

static OID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d.]+").expect("valid OID pattern"));

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bNAME\s+'([-\w;.]+)'|\bNAME\s+\(\s*([^)]+)\s*\)").expect("valid NAME pattern")
});

static DESC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bDESC\s+'([^']*)'").expect("valid DESC pattern"));

static SUP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bSUP\s+([-\w;.]+)|\bSUP\s+\(\s*([-\w;.]+)").expect("valid SUP pattern")
});

static MUST_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bMUST\s+([-\w;.]+)|\bMUST\s+\(\s*([^)]+)\s*\)").expect("valid MUST pattern")
});

static MAY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bMAY\s+([-\w;.]+)|\bMAY\s+\(\s*([^)]+)\s*\)").expect("valid MAY pattern")
});

/// Name of the root class. It never has a superclass.
pub const TOP: &str = "top";

/// Parse one object-class definition and register it under all of its names.
///
/// On success the returned record is a copy of the one now stored in
/// `registry`. On failure the registry is left untouched.
///
/// # Errors
///
/// * [`SchemaError::MissingName`] if no NAME clause is present
/// * [`SchemaError::MissingKind`] if none of STRUCTURAL, AUXILIARY or
///   ABSTRACT appears
pub fn parse_object_class(text: &str, registry: &mut SchemaRegistry) -> SchemaResult<ObjectClass> {
    let class = parse_definition(text)?;
    trace!(
        "Parsed object class '{}' ({}) with {} MUST / {} MAY attributes",
        class.primary_name(),
        class.oid,
        class.must.len(),
        class.may.len()
    );
    registry.register(class.clone());
    Ok(class)
}

/// Parse a definition into a record without registering it.
pub fn parse_definition(text: &str) -> SchemaResult<ObjectClass> {
    let text = trim_definition(text);

    let oid = OID_PATTERN
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let names = extract_names(text).ok_or_else(|| SchemaError::missing_name(text))?;

    let description = DESC_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let parent = if names[0] == TOP {
        String::new()
    } else {
        SUP_PATTERN
            .captures(text)
            .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    };

    let kind = detect_kind(text).ok_or_else(|| SchemaError::missing_kind(text))?;

    let must = extract_attributes(&MUST_PATTERN, "MUST", text)?;
    let may = extract_attributes(&MAY_PATTERN, "MAY", text)?;

    Ok(ObjectClass {
        oid,
        names,
        parent,
        description,
        kind,
        must,
        may,
    })
}

/// Split the inside of `NAME ( 'a' 'b' )` into its names.
pub fn parse_names(names: &str) -> Vec<String> {
    names
        .split_whitespace()
        .map(|item| item.trim_matches(|c| c == ' ' || c == '\''))
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split the inside of `MUST ( a $ b )` into attribute names.
///
/// Pieces are trimmed but not filtered, so `a $ $ b` keeps an empty entry.
pub fn parse_attribute_list(attrs: &str) -> SchemaResult<Vec<String>> {
    Ok(attrs
        .split('$')
        .map(|field| field.trim().to_string())
        .collect())
}

// Strips one enclosing pair at most. The trailing `)` only goes when it has no
// opening partner inside, so `MAY ( a $ b )` survives a missing outer paren.
fn trim_definition(text: &str) -> &str {
    let text = text.trim();
    let Some(inner) = text.strip_prefix('(') else {
        return text;
    };
    let unmatched_close = inner.matches(')').count() > inner.matches('(').count();
    match inner.strip_suffix(')') {
        Some(stripped) if unmatched_close => stripped.trim(),
        _ => inner.trim(),
    }
}

fn extract_names(text: &str) -> Option<Vec<String>> {
    let caps = NAME_PATTERN.captures(text)?;
    let names = if let Some(single) = caps.get(1) {
        vec![single.as_str().to_string()]
    } else {
        parse_names(caps.get(2)?.as_str())
    };
    if names.is_empty() { None } else { Some(names) }
}

// STRUCTURAL is checked first, then AUXILIARY, then ABSTRACT.
fn detect_kind(text: &str) -> Option<ObjectClassKind> {
    [
        ObjectClassKind::Structural,
        ObjectClassKind::Auxiliary,
        ObjectClassKind::Abstract,
    ]
    .into_iter()
    .find(|kind| text.contains(kind.as_str()))
}

fn extract_attributes(pattern: &Regex, keyword: &str, text: &str) -> SchemaResult<Vec<String>> {
    let Some(caps) = pattern.captures(text) else {
        return Ok(Vec::new());
    };
    if let Some(single) = caps.get(1) {
        return Ok(vec![single.as_str().to_string()]);
    }
    match caps.get(2) {
        Some(list) => parse_attribute_list(list.as_str()),
        // Both alternatives capture a group, so this arm is reserved.
        None => Err(SchemaError::AttributeList {
            keyword: keyword.to_string(),
            list: caps[0].to_string(),
        }),
    }
}
