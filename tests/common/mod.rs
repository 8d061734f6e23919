//! Common test utilities: fixture schemas and instrumented schema sources.

use ldap_schema::{IngestConfig, SchemaSource};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;


/// Error returned by [`FlakySource`] while it is failing.
#[derive(Debug, thiserror::Error)]
#[error("directory unavailable")]
pub struct DirectoryUnavailable;

/// A source that counts how often it is asked for definitions.
#[derive(Debug, Clone)]
pub struct CountingSource {
    definitions: Vec<String>,
    fetches: Arc<AtomicUsize>,
    delay: Duration,
}

impl CountingSource {
    pub fn new(definitions: Vec<&str>) -> Self {
        Self {
            definitions: definitions.into_iter().map(str::to_string).collect(),
            fetches: Arc::new(AtomicUsize::new(0)),
            delay: Duration::ZERO,
        }
    }

    /// Hold every fetch open for `delay`, so concurrent loads overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl SchemaSource for CountingSource {
    type Error = DirectoryUnavailable;

    async fn fetch_definitions(
        &self,
        _config: &IngestConfig,
    ) -> Result<Vec<String>, DirectoryUnavailable> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.definitions.clone())
    }
}

/// A source that fails until it is switched on.
#[derive(Debug)]
pub struct FlakySource {
    inner: CountingSource,
    available: AtomicBool,
}

impl FlakySource {
    pub fn new(definitions: Vec<&str>) -> Self {
        Self {
            inner: CountingSource::new(definitions),
            available: AtomicBool::new(false),
        }
    }

    pub fn come_online(&self) {
        self.available.store(true, Ordering::SeqCst);
    }

    pub fn fetch_count(&self) -> usize {
        self.inner.fetch_count()
    }
}

impl SchemaSource for FlakySource {
    type Error = DirectoryUnavailable;

    async fn fetch_definitions(
        &self,
        config: &IngestConfig,
    ) -> Result<Vec<String>, DirectoryUnavailable> {
        let definitions = self.inner.fetch_definitions(config).await?;
        if self.available.load(Ordering::SeqCst) {
            Ok(definitions)
        } else {
            Err(DirectoryUnavailable)
        }
    }
}
