//! Entity types: a schema plus whatever sanitization has been declared on it.
//!
//! Declarations happen once, when the entity type is defined. The resolved
//! [`EntityConfig`] is kept behind an `Arc` and handed by reference to every
//! validation of every record of that type.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::declaration::Declaration;
use crate::errors::{ConfigurationError, TransformError};
use crate::resolver::{self, EntityConfig, FieldRule};
use crate::sanitizers::Sanitizer;
use crate::schema::EntitySchema;
use crate::scrubber::{OutputShape, ScrubberKind};
use crate::transform::{self, AttributeStore};

/// A single-field `html_fragment` declaration: the field is scrubbed and
/// stored as markup, independent of `xss_foliate`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FragmentDeclaration {
    pub field: String,
    #[serde(default)]
    pub scrub: ScrubberKind,
}

#[derive(Debug, Clone)]
pub struct EntityType {
    schema: EntitySchema,
    config: Option<Arc<EntityConfig>>,
    fragments: Vec<FieldRule>,
}

impl EntityType {
    pub fn new(schema: EntitySchema) -> Self {
        Self {
            schema,
            config: None,
            fragments: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }

    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    /// Declares automatic sanitization for this entity type.
    ///
    /// On error nothing changes. A second successful call replaces the
    /// previous rule table.
    pub fn xss_foliate(&mut self, declaration: &Declaration, sanitizer: &dyn Sanitizer) -> Result<(), ConfigurationError> {
        let config = resolver::resolve(&self.schema, declaration, sanitizer)?;
        if self.config.is_some() {
            warn!("{} is already foliated; replacing its rules.", self.schema.name);
        }
        info!("{} foliated with {} field rule(s).", self.schema.name, config.len());
        self.config = Some(Arc::new(config));
        Ok(())
    }

    /// Whether `xss_foliate` has been declared.
    pub fn is_foliated(&self) -> bool {
        self.config.is_some()
    }

    pub fn config(&self) -> Option<&Arc<EntityConfig>> {
        self.config.as_ref()
    }

    /// Declares that `field` is scrubbed with `kind` and kept as markup.
    pub fn html_fragment(&mut self, field: &str, kind: ScrubberKind, sanitizer: &dyn Sanitizer) -> Result<(), ConfigurationError> {
        if !sanitizer.supports(kind.as_str()) {
            return Err(ConfigurationError::UnknownScrubber(kind.to_string()));
        }
        let rule = FieldRule {
            field_name: field.to_string(),
            kind,
            output_shape: OutputShape::FullDocument,
            encode_special_chars: false,
        };
        match self.fragments.iter_mut().find(|r| r.field_name == field) {
            Some(existing) => *existing = rule,
            None => self.fragments.push(rule),
        }
        debug!("{}: html_fragment declared on '{}'.", self.schema.name, field);
        Ok(())
    }

    pub fn fragment_rules(&self) -> &[FieldRule] {
        &self.fragments
    }

    /// The pre-validation hook: applies `html_fragment` rules, then the
    /// `xss_foliate` rules, to `record`.
    pub fn before_validation<R>(&self, record: &mut R, sanitizer: &dyn Sanitizer) -> Result<(), TransformError>
    where
        R: AttributeStore + ?Sized,
    {
        for rule in &self.fragments {
            if let Some(raw) = record.string_attribute(&rule.field_name) {
                let value = transform::apply_rule(rule, raw, sanitizer)?;
                record.write_attribute(&rule.field_name, value);
            }
        }
        if let Some(config) = &self.config {
            transform::foliate_fields(config, record, sanitizer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitizers::HtmlSanitizer;
    use crate::schema::AttributeType;
    use serde_json::{json, Map, Value};

    fn post() -> EntityType {
        EntityType::new(
            EntitySchema::new("Post")
                .with_attribute("title", AttributeType::String)
                .with_attribute("body", AttributeType::Text),
        )
    }

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn html_fragment_does_not_foliate() {
        let sanitizer = HtmlSanitizer::new();
        let mut entity = post();
        entity.html_fragment("body", ScrubberKind::Strip, &sanitizer).unwrap();
        assert!(!entity.is_foliated());

        let mut post = record(json!({
            "title": "<script>yo dawg</script>",
            "body": "<script>omgwtfbbq</script>",
        }));
        entity.before_validation(&mut post, &sanitizer).unwrap();
        assert_eq!(post["title"], "<script>yo dawg</script>");
        assert_eq!(post["body"], "omgwtfbbq");
    }

    #[test]
    fn html_fragment_rejects_unknown_scrubbers() {
        let mut entity = post();
        let err = entity
            .html_fragment("body", ScrubberKind::Named("sparkle".into()), &HtmlSanitizer::new())
            .unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownScrubber("sparkle".into()));
    }

    #[test]
    fn failed_declaration_keeps_previous_state() {
        let sanitizer = HtmlSanitizer::new();
        let mut entity = post();
        assert!(entity.xss_foliate(&Declaration::new().with("quux", "title"), &sanitizer).is_err());
        assert!(!entity.is_foliated());

        entity.xss_foliate(&Declaration::new().with("prune", "title"), &sanitizer).unwrap();
        let before = Arc::clone(entity.config().unwrap());
        assert!(entity.xss_foliate(&Declaration::new().with("quux", "title"), &sanitizer).is_err());
        assert!(Arc::ptr_eq(&before, entity.config().unwrap()));
    }

    #[test]
    fn redeclaring_replaces_rules() {
        let sanitizer = HtmlSanitizer::new();
        let mut entity = post();
        entity.xss_foliate(&Declaration::new().with("prune", "title"), &sanitizer).unwrap();
        entity.xss_foliate(&Declaration::new(), &sanitizer).unwrap();
        assert_eq!(entity.config().unwrap().rule("title").unwrap().kind, ScrubberKind::Strip);
    }

    #[test]
    fn unfoliated_entity_leaves_records_alone() {
        let entity = post();
        let mut post = record(json!({ "title": "<b>x</b>", "body": "y" }));
        entity.before_validation(&mut post, &HtmlSanitizer::new()).unwrap();
        assert_eq!(post["title"], "<b>x</b>");
    }
}
