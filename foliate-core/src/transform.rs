//! Validation-time application of resolved field rules to a record.

use log::debug;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::HashMap;

use crate::errors::TransformError;
use crate::resolver::{EntityConfig, FieldRule};
use crate::sanitizers::Sanitizer;
use crate::scrubber::OutputShape;

/// Field access on a record, as seen by the transform.
///
/// Only string values are ever read; writes replace an existing value.
pub trait AttributeStore {
    /// The field's value if it is present and a string.
    fn string_attribute(&self, name: &str) -> Option<&str>;

    fn write_attribute(&mut self, name: &str, value: String);
}

impl AttributeStore for Map<String, Value> {
    fn string_attribute(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    fn write_attribute(&mut self, name: &str, value: String) {
        if let Some(slot) = self.get_mut(name) {
            *slot = Value::String(value);
        }
    }
}

impl AttributeStore for HashMap<String, String> {
    fn string_attribute(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }

    fn write_attribute(&mut self, name: &str, value: String) {
        if let Some(slot) = self.get_mut(name) {
            *slot = value;
        }
    }
}

/// Encodes `&`, `<`, `>`, `"` as named entities and carriage returns as `&#13;`.
pub fn encode_special_chars(text: &str) -> Cow<'_, str> {
    let encoded = html_escape::encode_double_quoted_attribute(text);
    if encoded.contains('\r') {
        Cow::Owned(encoded.replace('\r', "&#13;"))
    } else {
        encoded
    }
}

/// The value a field receives under `rule`.
pub fn apply_rule(rule: &FieldRule, raw: &str, sanitizer: &dyn Sanitizer) -> Result<String, TransformError> {
    let fragment = sanitizer
        .scrub_fragment(raw, &rule.kind)
        .map_err(|source| TransformError {
            field: rule.field_name.clone(),
            source,
        })?;

    let value = match rule.output_shape {
        OutputShape::FullDocument => fragment.to_html().to_string(),
        OutputShape::TextOnly if rule.encode_special_chars => {
            encode_special_chars(fragment.text()).into_owned()
        }
        OutputShape::TextOnly => fragment.text().to_string(),
    };
    Ok(value)
}

/// Rewrites every configured field of `record` in place.
///
/// Missing and non-string values are left untouched. Every rule runs on
/// every call; the first sanitizer failure aborts the pass.
pub fn foliate_fields<R>(config: &EntityConfig, record: &mut R, sanitizer: &dyn Sanitizer) -> Result<(), TransformError>
where
    R: AttributeStore + ?Sized,
{
    for rule in config.rules() {
        let Some(raw) = record.string_attribute(&rule.field_name) else {
            continue;
        };
        let value = apply_rule(rule, raw, sanitizer)?;
        debug!(
            "Field '{}' scrubbed with '{}' ({}).",
            rule.field_name, rule.kind, rule.output_shape
        );
        record.write_attribute(&rule.field_name, value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_quotes_ampersands_and_carriage_returns() {
        assert_eq!(encode_special_chars("\"something\""), "&quot;something&quot;");
        assert_eq!(encode_special_chars("& Something"), "&amp; Something");
        assert_eq!(encode_special_chars("Another \r Something"), "Another &#13; Something");
        assert_eq!(encode_special_chars("<b>"), "&lt;b&gt;");
    }

    #[test]
    fn single_quotes_are_not_encoded() {
        assert_eq!(encode_special_chars("alert('evil')"), "alert('evil')");
    }

    #[test]
    fn json_records_only_yield_strings() {
        let mut record: Map<String, Value> = serde_json::from_str(r#"{"a": "x", "b": 1, "c": null}"#).unwrap();
        assert_eq!(record.string_attribute("a"), Some("x"));
        assert_eq!(record.string_attribute("b"), None);
        assert_eq!(record.string_attribute("c"), None);
        record.write_attribute("missing", "y".into());
        assert!(!record.contains_key("missing"));
    }
}
