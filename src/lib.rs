//! LDAP object-class schema engine.
//!
//! Parses the RFC 4512 object-class descriptions a directory server exposes
//! in its subschema subentry and resolves class inheritance, so callers can
//! ask which attributes an entry of a given class must and may carry.
//!
//! # Core Components
//!
//! - [`SchemaRegistry`] - Name-indexed object classes with chain and attribute queries
//! - [`parse_object_class`] - Parse one definition into the registry
//! - [`SchemaCache`] - Load a directory's schema once and share it
//! - [`SchemaSource`] - Trait for whatever fetches the raw definitions
//!
//! # Quick Start
//!
//! ```rust
//! use ldap_schema::{IngestConfig, SchemaCache, StaticSchemaSource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = StaticSchemaSource::new([
//!     "( 2.5.6.0 NAME 'top' ABSTRACT MUST objectClass )",
//!     "( 2.5.6.6 NAME 'person' SUP top STRUCTURAL MUST ( sn $ cn ) )",
//! ]);
//! let cache = SchemaCache::new(IngestConfig::default());
//! let schema = cache.get_or_load(&source).await?;
//!
//! let (must, _may) = schema.registry.aggregated_attributes("person");
//! assert_eq!(must, vec!["sn", "cn", "objectClass"]);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod ingest;
pub mod schema;

// Re-export commonly used types for convenience
pub use error::{IngestError, IngestResult, SchemaError, SchemaResult, ValidationError};
pub use ingest::{
    IngestConfig, IngestPolicy, IngestReport, LdifSchemaSource, LoadedSchema, SchemaCache,
    SchemaSource, StaticSchemaSource, ingest,
};
pub use schema::{ObjectClass, ObjectClassKind, SchemaRegistry, parse_object_class};
