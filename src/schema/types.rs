//! Core type definitions for LDAP object classes.
//!
//! This module contains the record produced for every parsed object-class
//! definition and the kind marker that classifies it, as described in
//! RFC 4512 section 4.1.1.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed object-class definition.
///
/// One record exists per distinct class, even when the class is known under
/// several names. The first entry of `names` is the primary name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectClass {
    /// Dotted numeric identifier, empty when the definition has none
    pub oid: String,
    /// Aliases in order of appearance
    #[serde(rename = "name")]
    pub names: Vec<String>,
    /// Superclass name, empty for `top` or when no SUP clause is present
    pub parent: String,
    /// Free-text description
    pub description: String,
    /// Structural, abstract or auxiliary
    #[serde(rename = "type")]
    pub kind: ObjectClassKind,
    /// Attributes this class itself requires
    pub must: Vec<String>,
    /// Attributes this class itself permits
    pub may: Vec<String>,
}

impl ObjectClass {
    /// The primary (first declared) name of the class.
    pub fn primary_name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }

    /// Whether `name` is one of this class's aliases.
    pub fn has_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Whether this class is the root of the hierarchy.
    pub fn is_root(&self) -> bool {
        self.parent.is_empty()
    }
}

/// Object class kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ObjectClassKind {
    /// Can be the base class of an entry
    Structural,
    /// Only usable as a superclass
    Abstract,
    /// Adds attributes to entries of other structural classes
    Auxiliary,
}

impl ObjectClassKind {
    /// The literal token used in schema text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structural => "STRUCTURAL",
            Self::Abstract => "ABSTRACT",
            Self::Auxiliary => "AUXILIARY",
        }
    }
}

impl fmt::Display for ObjectClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
