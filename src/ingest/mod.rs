//! Batch ingestion of object-class definitions into a registry.
//!
//! Ingestion always builds a fresh [`SchemaRegistry`]. Whether a single bad
//! definition aborts the batch or is skipped is decided by
//! [`IngestPolicy`]; with the default policy a failed batch yields no
//! registry at all rather than a partially populated one.
//!
//! # Examples
//!
//! ```rust
//! use ldap_schema::ingest::{IngestConfig, IngestPolicy, ingest};
//!
//! let definitions = [
//!     "( 2.5.6.0 NAME 'top' ABSTRACT MUST objectClass )",
//!     "( 9.9.9 NAME 'broken' SUP top )",
//!     "( 2.5.6.4 NAME 'organization' SUP top STRUCTURAL MUST o )",
//! ];
//!
//! let config = IngestConfig::default().with_policy(IngestPolicy::SkipInvalid);
//! let (registry, report) = ingest(definitions, &config).unwrap();
//!
//! assert_eq!(report.parsed, 2);
//! assert_eq!(report.skipped.len(), 1);
//! assert!(registry.contains("organization"));
//! ```

pub mod cache;
pub mod config;
pub mod source;

pub use cache::{LoadedSchema, SchemaCache, load_schema};
pub use config::{IngestConfig, IngestPolicy};
pub use source::{LdifSchemaSource, SchemaSource, StaticSchemaSource, parse_ldif_values};

use crate::error::{IngestError, IngestResult, SchemaError};
use crate::schema::{SchemaRegistry, TOP, parse_object_class};

use log::{debug, info, warn};
use serde::Serialize;

/// Outcome of an ingestion run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    /// Number of definitions parsed and registered
    pub parsed: usize,
    /// Definitions that were skipped under [`IngestPolicy::SkipInvalid`]
    pub skipped: Vec<SkippedDefinition>,
}

/// A definition that failed to parse and was left out of the registry.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedDefinition {
    /// Position in the batch, starting at 0
    pub index: usize,
    /// Why it failed
    #[serde(serialize_with = "serialize_error")]
    pub error: SchemaError,
}

impl IngestReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Parse a batch of definitions into a new registry.
///
/// # Errors
///
/// * [`IngestError::Definition`] for the first bad definition under
///   [`IngestPolicy::AbortOnError`]
/// * [`IngestError::EmptySchema`] if nothing was registered
pub fn ingest<I, S>(definitions: I, config: &IngestConfig) -> IngestResult<(SchemaRegistry, IngestReport)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut registry = SchemaRegistry::new();
    let mut report = IngestReport::default();

    for (index, definition) in definitions.into_iter().enumerate() {
        match parse_object_class(definition.as_ref(), &mut registry) {
            Ok(_) => report.parsed += 1,
            Err(error) => match config.policy {
                IngestPolicy::AbortOnError => {
                    debug!("Aborting schema ingestion at definition #{}", index);
                    return Err(IngestError::Definition {
                        index,
                        source: error,
                    });
                }
                IngestPolicy::SkipInvalid => {
                    warn!("Skipping object class definition #{}: {}", index, error);
                    report.skipped.push(SkippedDefinition { index, error });
                }
            },
        }
    }

    if registry.is_empty() {
        return Err(IngestError::EmptySchema);
    }
    if config.warn_without_top && !registry.contains(TOP) {
        warn!("Schema has no '{}' class; inheritance chains end early", TOP);
    }

    info!(
        "Ingested {} object classes ({} names, {} skipped)",
        registry.len(),
        registry.names().len(),
        report.skipped.len()
    );
    Ok((registry, report))
}

fn serialize_error<S>(error: &SchemaError, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(error)
}
