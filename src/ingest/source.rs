//! Sources of raw object-class definitions.
//!
//! A [`SchemaSource`] is whatever can hand back the values of the schema
//! attribute of a subschema subentry: a live directory search, a dump on
//! disk, or a fixed list in tests. Transport, binding and retries belong to
//! the source, not to the parser.

use super::config::IngestConfig;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use log::{debug, trace};
use std::convert::Infallible;
use std::future::Future;
use std::path::PathBuf;

/// Supplies the raw object-class description strings of a schema.
pub trait SchemaSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch every value of `config.attribute` at `config.subschema_dn`.
    fn fetch_definitions(
        &self,
        config: &IngestConfig,
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send;
}

/// A fixed, in-memory list of definitions.
#[derive(Debug, Clone, Default)]
pub struct StaticSchemaSource {
    definitions: Vec<String>,
}

impl StaticSchemaSource {
    pub fn new<I, S>(definitions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            definitions: definitions.into_iter().map(Into::into).collect(),
        }
    }
}

impl SchemaSource for StaticSchemaSource {
    type Error = Infallible;

    async fn fetch_definitions(&self, _config: &IngestConfig) -> Result<Vec<String>, Infallible> {
        Ok(self.definitions.clone())
    }
}

/// Reads definitions from an LDIF export of the subschema subentry.
///
/// Values of the configured attribute are collected, including folded
/// continuation lines and base64 (`attr:: ...`) values. A file without any
/// such attribute is read as plain text with one `( ... )` definition per
/// line.
#[derive(Debug, Clone)]
pub struct LdifSchemaSource {
    path: PathBuf,
}

impl LdifSchemaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SchemaSource for LdifSchemaSource {
    type Error = std::io::Error;

    async fn fetch_definitions(&self, config: &IngestConfig) -> Result<Vec<String>, Self::Error> {
        debug!("Reading schema dump from {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path).await?;
        parse_ldif_values(&content, &config.attribute)
    }
}

/// Extract the values of `attribute` from LDIF text.
///
/// Falls back to plain definition lines when the attribute never appears.
pub fn parse_ldif_values(content: &str, attribute: &str) -> Result<Vec<String>, std::io::Error> {
    let lines = unfold_lines(content);
    let mut values = Vec::new();

    for line in &lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        if !name.trim().eq_ignore_ascii_case(attribute) {
            continue;
        }
        let value = match value.strip_prefix(':') {
            Some(encoded) => decode_base64_value(encoded.trim())?,
            None => value.trim().to_string(),
        };
        trace!("Found {} value: {}", attribute, value);
        values.push(value);
    }

    // Plain dumps are read line by line; indentation there is not folding.
    if values.is_empty() {
        values = content
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| line.starts_with('('))
            .collect();
    }

    Ok(values)
}

// RFC 2849: a line starting with a single space continues the previous one.
// Comments may be folded too, and their continuations are dropped with them.
fn unfold_lines(content: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut in_comment = false;
    for raw in content.lines() {
        match raw.strip_prefix(' ') {
            Some(_) if in_comment => {}
            Some(continuation) => match lines.last_mut() {
                Some(previous) => previous.push_str(continuation),
                None => lines.push(raw.to_string()),
            },
            None if raw.starts_with('#') => in_comment = true,
            None => {
                in_comment = false;
                lines.push(raw.to_string());
            }
        }
    }
    lines
}

fn decode_base64_value(encoded: &str) -> Result<String, std::io::Error> {
    let bytes = BASE64
        .decode(encoded)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    String::from_utf8(bytes).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
