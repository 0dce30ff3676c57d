//! Resolution of an `xss_foliate` declaration into per-field rules.
//!
//! A declaration is validated in full before anything is resolved, so a bad
//! declaration reports every offending key at once and never leaves a
//! half-built rule table behind.
//!
//! License: MIT OR Apache-2.0

use log::{debug, warn};
use serde::Serialize;
use std::collections::HashSet;

use crate::declaration::{Declaration, OptionValue, ENCODE_SPECIAL_CHARS, EXCEPT, UNENCODE_SPECIAL_CHARS};
use crate::errors::ConfigurationError;
use crate::sanitizers::Sanitizer;
use crate::schema::EntitySchema;
use crate::scrubber::{OutputShape, ScrubberKind, HTML5LIB_SANITIZE};

/// One resolved field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRule {
    pub field_name: String,
    pub kind: ScrubberKind,
    pub output_shape: OutputShape,
    /// Only consulted for `TextOnly` fields.
    pub encode_special_chars: bool,
}

/// The immutable rule table of a foliated entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityConfig {
    rules: Vec<FieldRule>,
    encode_special_chars: bool,
}

impl EntityConfig {
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn rule(&self, field_name: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.field_name == field_name)
    }

    /// The declaration-wide encoding switch.
    pub fn encode_special_chars(&self) -> bool {
        self.encode_special_chars
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn is_reserved(key: &str) -> bool {
    matches!(key, EXCEPT | ENCODE_SPECIAL_CHARS | UNENCODE_SPECIAL_CHARS)
}

fn is_scrubber_key(key: &str, sanitizer: &dyn Sanitizer) -> bool {
    key == HTML5LIB_SANITIZE
        || ScrubberKind::from(key.to_string()).is_builtin()
        || sanitizer.supports(key)
}

/// Checks a declaration without resolving it.
pub fn validate(declaration: &Declaration, sanitizer: &dyn Sanitizer) -> Result<(), ConfigurationError> {
    let mut invalid: Vec<String> = Vec::new();
    for (key, _) in declaration.iter() {
        if !is_reserved(key) && !is_scrubber_key(key, sanitizer) && !invalid.iter().any(|k| k == key) {
            invalid.push(key.to_string());
        }
    }
    if !invalid.is_empty() {
        return Err(ConfigurationError::InvalidOptions(invalid));
    }

    for (key, value) in declaration.iter() {
        if key == ENCODE_SPECIAL_CHARS && value.as_flag().is_none() {
            return Err(ConfigurationError::EncodeSpecialCharsNotBoolean(value.to_string()));
        }
    }

    if declaration.contains_key(EXCEPT) {
        let scrubber_keys: Vec<String> = declaration
            .iter()
            .filter(|(key, _)| !is_reserved(key))
            .map(|(key, _)| key.to_string())
            .collect();
        if !scrubber_keys.is_empty() {
            return Err(ConfigurationError::ExceptWithScrubbers(scrubber_keys));
        }
    }

    for (key, value) in declaration.iter() {
        if key != ENCODE_SPECIAL_CHARS && value.field_names().is_none() {
            return Err(ConfigurationError::ExpectedFieldList(key.to_string()));
        }
    }

    Ok(())
}

fn collect_fields(declaration: &Declaration, option: &str) -> HashSet<String> {
    declaration
        .iter()
        .filter(|(key, _)| *key == option)
        .filter_map(|(_, value)| value.field_names())
        .flatten()
        .collect()
}

/// Resolves `declaration` against `schema` into an [`EntityConfig`].
///
/// String attributes not named under any scrubber key, and not excepted,
/// get `strip` with a text-only result. Fields named under a scrubber key get
/// that scrubber with a markup result; when a field is named more than once,
/// the last binding wins.
pub fn resolve(
    schema: &EntitySchema,
    declaration: &Declaration,
    sanitizer: &dyn Sanitizer,
) -> Result<EntityConfig, ConfigurationError> {
    validate(declaration, sanitizer)?;

    let except = collect_fields(declaration, EXCEPT);
    let unencoded = collect_fields(declaration, UNENCODE_SPECIAL_CHARS);
    let encode_special_chars = declaration
        .get(ENCODE_SPECIAL_CHARS)
        .and_then(OptionValue::as_flag)
        .unwrap_or(true);

    for name in except.iter().chain(unencoded.iter()) {
        if !schema.has_attribute(name) {
            warn!("{}: option names unknown attribute '{}'.", schema.name, name);
        }
    }

    let mut explicit: Vec<(String, ScrubberKind)> = Vec::new();
    for (key, value) in declaration.iter().filter(|(key, _)| !is_reserved(key)) {
        let kind = ScrubberKind::from_option_key(key);
        for name in value.field_names().unwrap_or_default() {
            match explicit.iter_mut().find(|(field, _)| *field == name) {
                Some(binding) => binding.1 = kind.clone(),
                None => explicit.push((name, kind.clone())),
            }
        }
    }

    let rule = |field_name: &str, kind: ScrubberKind, output_shape: OutputShape| FieldRule {
        field_name: field_name.to_string(),
        kind,
        output_shape,
        encode_special_chars: encode_special_chars && !unencoded.contains(field_name),
    };

    let mut rules = Vec::new();
    for attribute in &schema.attributes {
        if let Some((_, kind)) = explicit.iter().find(|(field, _)| *field == attribute.name) {
            rules.push(rule(&attribute.name, kind.clone(), OutputShape::FullDocument));
        } else if attribute.kind.is_string() && !except.contains(&attribute.name) {
            rules.push(rule(&attribute.name, ScrubberKind::Strip, OutputShape::TextOnly));
        }
    }
    for (field, kind) in explicit.iter().filter(|(field, _)| !schema.has_attribute(field)) {
        warn!("{}: '{}' is not an attribute of the schema; it is scrubbed only if present.", schema.name, field);
        rules.push(rule(field, kind.clone(), OutputShape::FullDocument));
    }

    debug!(
        "Resolved {} field rule(s) for {} (encode_special_chars: {}).",
        rules.len(),
        schema.name,
        encode_special_chars
    );

    Ok(EntityConfig {
        rules,
        encode_special_chars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitizers::HtmlSanitizer;
    use crate::schema::AttributeType;

    fn post() -> EntitySchema {
        EntitySchema::new("Post")
            .with_attribute("plain_text", AttributeType::String)
            .with_attribute("html_string", AttributeType::String)
            .with_attribute("not_a_string", AttributeType::Integer)
    }

    fn resolve_post(declaration: Declaration) -> Result<EntityConfig, ConfigurationError> {
        resolve(&post(), &declaration, &HtmlSanitizer::new())
    }

    #[test]
    fn default_declaration_strips_string_fields() {
        let config = resolve_post(Declaration::new()).unwrap();
        let fields: Vec<&str> = config.rules().iter().map(|r| r.field_name.as_str()).collect();
        assert_eq!(fields, vec!["plain_text", "html_string"]);
        for rule in config.rules() {
            assert_eq!(rule.kind, ScrubberKind::Strip);
            assert_eq!(rule.output_shape, OutputShape::TextOnly);
            assert!(rule.encode_special_chars);
        }
    }

    #[test]
    fn except_skips_named_fields() {
        let config = resolve_post(Declaration::new().with(EXCEPT, ["plain_text"])).unwrap();
        assert!(config.rule("plain_text").is_none());
        assert_eq!(config.rule("html_string").unwrap().kind, ScrubberKind::Strip);
    }

    #[test]
    fn explicit_kind_leaves_others_on_default() {
        let config = resolve_post(Declaration::new().with("prune", "plain_text")).unwrap();
        let plain = config.rule("plain_text").unwrap();
        assert_eq!(plain.kind, ScrubberKind::Prune);
        assert_eq!(plain.output_shape, OutputShape::FullDocument);
        let html = config.rule("html_string").unwrap();
        assert_eq!(html.kind, ScrubberKind::Strip);
        assert_eq!(html.output_shape, OutputShape::TextOnly);
    }

    #[test]
    fn last_binding_wins() {
        let config = resolve_post(
            Declaration::new()
                .with("prune", ["plain_text", "html_string"])
                .with("escape", "plain_text"),
        )
        .unwrap();
        assert_eq!(config.rule("plain_text").unwrap().kind, ScrubberKind::Escape);
        assert_eq!(config.rule("html_string").unwrap().kind, ScrubberKind::Prune);
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn html5lib_sanitize_resolves_to_escape() {
        let config = resolve_post(Declaration::new().with(HTML5LIB_SANITIZE, ["plain_text"])).unwrap();
        assert_eq!(config.rule("plain_text").unwrap().kind, ScrubberKind::Escape);
    }

    #[test]
    fn explicit_non_string_attribute_is_kept() {
        let config = resolve_post(Declaration::new().with("prune", "not_a_string")).unwrap();
        assert_eq!(config.rule("not_a_string").unwrap().kind, ScrubberKind::Prune);
    }

    #[test]
    fn named_scrubbers_pass_through() {
        let config = resolve_post(Declaration::new().with("nofollow", "html_string")).unwrap();
        assert_eq!(
            config.rule("html_string").unwrap().kind,
            ScrubberKind::Named("nofollow".into())
        );
    }

    #[test]
    fn invalid_keys_are_all_reported() {
        let err = resolve_post(
            Declaration::new()
                .with("quux", ["foo"])
                .with("prune", "plain_text")
                .with("bogus", true),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::InvalidOptions(vec!["quux".into(), "bogus".into()])
        );
    }

    #[test]
    fn encode_special_chars_must_be_boolean() {
        let err = resolve_post(Declaration::new().with(ENCODE_SPECIAL_CHARS, ["title"])).unwrap_err();
        assert!(matches!(err, ConfigurationError::EncodeSpecialCharsNotBoolean(_)));
    }

    #[test]
    fn except_cannot_combine_with_scrubbers() {
        let err = resolve_post(
            Declaration::new()
                .with(EXCEPT, "plain_text")
                .with("prune", "html_string"),
        )
        .unwrap_err();
        assert_eq!(err, ConfigurationError::ExceptWithScrubbers(vec!["prune".into()]));
    }

    #[test]
    fn field_list_options_reject_flags() {
        let err = resolve_post(Declaration::new().with("prune", true)).unwrap_err();
        assert_eq!(err, ConfigurationError::ExpectedFieldList("prune".into()));
    }

    #[test]
    fn unencode_is_per_field() {
        let config = resolve_post(Declaration::new().with(UNENCODE_SPECIAL_CHARS, ["plain_text"])).unwrap();
        assert!(!config.rule("plain_text").unwrap().encode_special_chars);
        assert!(config.rule("html_string").unwrap().encode_special_chars);
        assert!(config.encode_special_chars());
    }

    #[test]
    fn global_encoding_off() {
        let config = resolve_post(Declaration::new().with(ENCODE_SPECIAL_CHARS, false)).unwrap();
        assert!(config.rules().iter().all(|r| !r.encode_special_chars));
    }
}
