//! Error types for schema parsing, entry validation and ingestion.
//!
//! Parse errors are local to one definition string and never touch records
//! that were registered before them. Ingestion errors wrap them with the
//! position of the offending definition in the batch.

/// Errors raised while parsing a single object-class definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// No `NAME 'x'` or `NAME ( 'a' 'b' )` clause could be found
    #[error("Object class definition has no NAME clause: {definition}")]
    MissingName { definition: String },

    /// None of STRUCTURAL, AUXILIARY or ABSTRACT appears in the definition
    #[error("Object class definition has no kind marker: {definition}")]
    MissingKind { definition: String },

    /// A MUST or MAY attribute list could not be read
    #[error("Invalid {keyword} attribute list '{list}'")]
    AttributeList { keyword: String, list: String },
}

/// Validation errors for directory entries checked against the schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Entry declares no object class at all
    #[error("Entry must declare at least one object class")]
    MissingObjectClass,

    /// Entry names an object class the schema does not know
    #[error("Unknown object class '{object_class}'")]
    UnknownObjectClass { object_class: String },

    /// Required attribute is missing
    #[error("Required attribute '{attribute}' is missing")]
    MissingRequiredAttribute { attribute: String },

    /// Attribute is neither required nor allowed by any of the entry's classes
    #[error("Attribute '{attribute}' is not allowed by object classes {object_classes:?}")]
    UnknownAttribute {
        attribute: String,
        object_classes: Vec<String>,
    },
}

/// Errors that can occur while loading a whole schema from a source.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The schema source itself failed (I/O, directory search, ...)
    #[error("Schema source error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A definition in the batch failed to parse
    #[error("Definition #{index} could not be parsed: {source}")]
    Definition {
        index: usize,
        #[source]
        source: SchemaError,
    },

    /// The source returned no definitions, or none of them parsed
    #[error("Schema source returned no usable object class definitions")]
    EmptySchema,
}

impl SchemaError {
    /// Create a missing NAME error
    pub fn missing_name(definition: impl Into<String>) -> Self {
        Self::MissingName {
            definition: definition.into(),
        }
    }

    /// Create a missing kind error
    pub fn missing_kind(definition: impl Into<String>) -> Self {
        Self::MissingKind {
            definition: definition.into(),
        }
    }
}

impl ValidationError {
    /// Create a missing required attribute error
    pub fn missing_required(attribute: impl Into<String>) -> Self {
        Self::MissingRequiredAttribute {
            attribute: attribute.into(),
        }
    }

    /// Create an unknown object class error
    pub fn unknown_object_class(object_class: impl Into<String>) -> Self {
        Self::UnknownObjectClass {
            object_class: object_class.into(),
        }
    }
}

impl IngestError {
    /// Wrap a schema source error
    pub fn source_error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Source(Box::new(error))
    }
}

// Result type aliases for convenience
pub type SchemaResult<T> = Result<T, SchemaError>;
pub type ValidationResult<T> = Result<T, ValidationError>;
pub type IngestResult<T> = Result<T, IngestError>;
