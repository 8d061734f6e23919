//! Object-class schema model for LDAP directories.
//!
//! This module parses the object-class descriptions a directory server
//! publishes in its subschema subentry and answers inheritance questions
//! over them: which classes a class extends and which attributes an entry of
//! that class must or may carry.
//!
//! # Key Types
//!
//! - [`ObjectClass`] - One parsed object-class definition
//! - [`SchemaRegistry`] - Name-indexed registry with chain and attribute queries
//! - [`parse_object_class`] - Parse a definition and register it
//!
//! # Examples
//!
//! ```rust
//! use ldap_schema::schema::{SchemaRegistry, parse_object_class};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = SchemaRegistry::new();
//! parse_object_class("( 2.5.6.0 NAME 'top' ABSTRACT MUST objectClass )", &mut registry)?;
//! parse_object_class(
//!     "( 2.5.6.4 NAME 'organization' SUP top STRUCTURAL MUST o MAY ( userPassword $ seeAlso ) )",
//!     &mut registry,
//! )?;
//!
//! let (must, may) = registry.aggregated_attributes("organization");
//! assert_eq!(must, vec!["o", "objectClass"]);
//! assert_eq!(may, vec!["userPassword", "seeAlso"]);
//! # Ok(())
//! # }
//! ```

pub mod parser;
pub mod registry;
pub mod types;


// Re-export the main types for convenience
pub use parser::{TOP, parse_attribute_list, parse_definition, parse_names, parse_object_class};
pub use registry::{SchemaRegistry, dedup_preserving_order};
pub use types::{ObjectClass, ObjectClassKind};
