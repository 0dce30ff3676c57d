// foliate-core/src/lib.rs
//! # xss-foliate Core Library
//!
//! `foliate-core` adds automatic HTML/XSS sanitization to the fields of persisted
//! records. An entity type declares, once, which fields are scrubbed and how;
//! every record of that type is then rewritten in place before it is validated.
//!
//! ## Modules
//!
//! * `declaration`: The ordered option mapping passed to `xss_foliate`.
//! * `resolver`: Validates a declaration and resolves it into per-field rules.
//! * `transform`: Applies resolved rules to a record's fields.
//! * `sanitizers`: The `Sanitizer` seam and the bundled `lol_html` implementation.
//! * `entity`: Entity types, the `is_foliated` query and the pre-validation hook.
//! * `schema`: Attribute names and types of an entity.
//! * `config`: Loading entity definitions from YAML.
//! * `headless`: One-shot scrubbing of bare strings.
//! * `errors`: Configuration and transform error types.
//!
//! ## Usage Example
//!
//! ```rust
//! use foliate_core::{AttributeType, Declaration, EntitySchema, EntityType, HtmlSanitizer};
//! use serde_json::json;
//!
//! let sanitizer = HtmlSanitizer::new();
//! let mut post = EntityType::new(
//!     EntitySchema::new("Post")
//!         .with_attribute("title", AttributeType::String)
//!         .with_attribute("body", AttributeType::Text),
//! );
//! post.xss_foliate(&Declaration::new().with("prune", "body"), &sanitizer).unwrap();
//! assert!(post.is_foliated());
//!
//! let mut record = json!({
//!     "title": "<b>Hello</b> & welcome",
//!     "body": "<p>hi</p><script>alert(1)</script>",
//! });
//! let fields = record.as_object_mut().unwrap();
//! post.before_validation(fields, &sanitizer).unwrap();
//!
//! assert_eq!(record["title"], "Hello &amp; welcome");
//! assert_eq!(record["body"], "<p>hi</p>");
//! ```
//!
//! ## Error Handling
//!
//! Declarations fail with [`ConfigurationError`], always at declaration time.
//! Record transforms fail with [`TransformError`] only when the sanitizer
//! itself fails. Loading a configuration file uses `anyhow::Error` with context.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod declaration;
pub mod entity;
pub mod errors;
pub mod headless;
pub mod resolver;
pub mod sanitizers;
pub mod schema;
pub mod scrubber;
pub mod transform;

/// Re-exports the configuration loading types.
pub use config::{EntityCatalog, EntityDefinition, FoliateConfig};

/// Re-exports the declaration types.
pub use declaration::{Declaration, OptionValue, ENCODE_SPECIAL_CHARS, EXCEPT, UNENCODE_SPECIAL_CHARS};

pub use entity::{EntityType, FragmentDeclaration};

/// Re-exports the custom error types for clear error reporting.
pub use errors::{ConfigurationError, FoliateError, SanitizeError, TransformError};

pub use headless::{headless_scrub_string, headless_scrub_with};

pub use resolver::{resolve, EntityConfig, FieldRule};

/// Re-exports the sanitizer seam and its bundled implementation.
pub use sanitizers::{Fragment, HtmlSanitizer, NamedScrubber, Sanitizer};

pub use schema::{Attribute, AttributeType, EntitySchema};

pub use scrubber::{OutputShape, ScrubberKind, HTML5LIB_SANITIZE};

pub use transform::{encode_special_chars, foliate_fields, AttributeStore};
