//! errors.rs - Custom error types for the foliate-core library.
//!
//! Configuration errors are raised only while declaring an entity type.
//! Transform errors are raised only while applying rules to a record.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// A declaration that cannot be resolved into field rules.
///
/// Every variant is fatal to the declaration in progress; nothing is
/// recorded on the entity type when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("invalid option(s): {}", .0.join(", "))]
    InvalidOptions(Vec<String>),

    /// `encode_special_chars` is a global switch and only takes a boolean.
    #[error("fatal: encode_special_chars accepts only true or false, got {0}")]
    EncodeSpecialCharsNotBoolean(String),

    #[error("except cannot be combined with explicit scrubber fields ({})", .0.join(", "))]
    ExceptWithScrubbers(Vec<String>),

    #[error("option '{0}' expects a field name or a list of field names")]
    ExpectedFieldList(String),

    #[error("unknown scrubber '{0}'")]
    UnknownScrubber(String),
}

/// Failure reported by a [`crate::sanitizers::Sanitizer`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SanitizeError {
    #[error("HTML rewriting failed: {0}")]
    Rewrite(String),

    #[error("scrubber '{0}' is not supported by this sanitizer")]
    Unsupported(String),
}

/// A sanitizer failure while transforming one field of a record.
#[derive(Error, Debug)]
#[error("failed to sanitize field '{field}': {source}")]
pub struct TransformError {
    pub field: String,
    #[source]
    pub source: SanitizeError,
}

/// This enum represents all possible error types in the `foliate-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FoliateError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    YamlError(#[from] serde_yml::Error),
}
