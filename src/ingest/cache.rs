//! Populate-once schema cache for a directory connection.
//!
//! The schema is fetched and parsed at most once per cache. Concurrent
//! callers share the same load; a failed load stores nothing, so the schema
//! stays unavailable until a later call succeeds.

use super::config::IngestConfig;
use super::source::SchemaSource;
use super::{IngestReport, ingest};
use crate::error::{IngestError, IngestResult};
use crate::schema::SchemaRegistry;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use chrono::{DateTime, Utc};
use log::{debug, info};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// A registry together with where and when it came from.
#[derive(Debug, Clone)]
pub struct LoadedSchema {
    pub registry: SchemaRegistry,
    pub report: IngestReport,
    pub loaded_at: DateTime<Utc>,
    /// Content hash of the raw definitions, stable across reloads of an
    /// unchanged schema
    pub fingerprint: String,
}

impl LoadedSchema {
    /// JSON document for schema browsing: the name-keyed classes plus metadata.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        Ok(serde_json::json!({
            "schemas": self.registry.to_json()?,
            "loadedAt": self.loaded_at.to_rfc3339(),
            "fingerprint": self.fingerprint,
            "report": serde_json::to_value(&self.report)?,
        }))
    }
}

/// Caches the schema of one directory connection.
#[derive(Debug, Default)]
pub struct SchemaCache {
    config: IngestConfig,
    cell: OnceCell<Arc<LoadedSchema>>,
}

impl SchemaCache {
    pub fn new(config: IngestConfig) -> Self {
        Self {
            config,
            cell: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Return the cached schema, loading it from `source` on first use.
    ///
    /// Once a load has succeeded, later calls return the same schema without
    /// touching the source.
    pub async fn get_or_load<S>(&self, source: &S) -> IngestResult<Arc<LoadedSchema>>
    where
        S: SchemaSource + Sync,
    {
        if let Some(schema) = self.cell.get() {
            debug!("Schema already loaded, skipping fetch");
            return Ok(Arc::clone(schema));
        }
        self.cell
            .get_or_try_init(|| async { load_schema(source, &self.config).await.map(Arc::new) })
            .await
            .map(Arc::clone)
    }

    /// The loaded schema, or `None` while the schema is unavailable.
    pub fn get(&self) -> Option<Arc<LoadedSchema>> {
        self.cell.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}

/// Fetch and parse a schema without caching it.
pub async fn load_schema<S>(source: &S, config: &IngestConfig) -> IngestResult<LoadedSchema>
where
    S: SchemaSource + Sync,
{
    let definitions = source
        .fetch_definitions(config)
        .await
        .map_err(IngestError::source_error)?;
    debug!(
        "Fetched {} values of '{}' from '{}'",
        definitions.len(),
        config.attribute,
        config.subschema_dn
    );

    let fingerprint = fingerprint(&definitions);
    let (registry, report) = ingest(&definitions, config)?;
    info!("Loaded schema {} from '{}'", fingerprint, config.subschema_dn);

    Ok(LoadedSchema {
        registry,
        report,
        loaded_at: Utc::now(),
        fingerprint,
    })
}

fn fingerprint(definitions: &[String]) -> String {
    let mut hasher = Sha256::new();
    for definition in definitions {
        hasher.update(definition.as_bytes());
        hasher.update(b"\n");
    }
    let hash = hasher.finalize();
    BASE64.encode(&hash[..8])
}
