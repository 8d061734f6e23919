//! Configuration for loading a schema from a directory.

use serde::{Deserialize, Serialize};

/// What to do when one definition in a batch fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestPolicy {
    /// Stop at the first bad definition and publish nothing.
    #[default]
    AbortOnError,

    /// Log the bad definition, record it in the report and keep going.
    SkipInvalid,
}

/// Where the schema lives and how strictly it is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IngestConfig {
    /// DN of the subschema subentry. Defaults to "cn=subschema".
    pub subschema_dn: String,

    /// Attribute holding the object-class descriptions. Defaults to "objectClasses".
    pub attribute: String,

    /// Failure policy for individual definitions.
    pub policy: IngestPolicy,

    /// Log a warning when the loaded schema has no `top` class. Advisory only,
    /// the load still succeeds.
    pub warn_without_top: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            subschema_dn: "cn=subschema".to_string(),
            attribute: "objectClasses".to_string(),
            policy: IngestPolicy::AbortOnError,
            warn_without_top: true,
        }
    }
}

impl IngestConfig {
    pub fn with_subschema_dn(mut self, dn: impl Into<String>) -> Self {
        self.subschema_dn = dn.into();
        self
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    pub fn with_policy(mut self, policy: IngestPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_warn_without_top(mut self, warn: bool) -> Self {
        self.warn_without_top = warn;
        self
    }
}
