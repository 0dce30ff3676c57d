//! The `xss_foliate` declaration: an ordered mapping of option keys to values.
//!
//! Order is significant. When one field is bound under several scrubber keys
//! the last binding wins, so the mapping keeps the order it was written in,
//! both when built in code and when deserialized from a configuration file.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::ser::SerializeMap;
use std::fmt;

pub const EXCEPT: &str = "except";
pub const ENCODE_SPECIAL_CHARS: &str = "encode_special_chars";
pub const UNENCODE_SPECIAL_CHARS: &str = "unencode_special_chars";

/// The value side of a declaration option.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Field(String),
    Fields(Vec<String>),
}

impl OptionValue {
    /// Normalizes a field-name value to a list. Flags have no field names.
    pub fn field_names(&self) -> Option<Vec<String>> {
        match self {
            OptionValue::Flag(_) => None,
            OptionValue::Field(name) => Some(vec![name.clone()]),
            OptionValue::Fields(names) => Some(names.clone()),
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            OptionValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Flag(flag) => write!(f, "{}", flag),
            OptionValue::Field(name) => write!(f, "{}", name),
            OptionValue::Fields(names) => write!(f, "[{}]", names.join(", ")),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(flag: bool) -> Self {
        OptionValue::Flag(flag)
    }
}

impl From<&str> for OptionValue {
    fn from(name: &str) -> Self {
        OptionValue::Field(name.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(name: String) -> Self {
        OptionValue::Field(name)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(names: Vec<String>) -> Self {
        OptionValue::Fields(names)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(names: Vec<&str>) -> Self {
        OptionValue::Fields(names.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for OptionValue {
    fn from(names: [&str; N]) -> Self {
        OptionValue::Fields(names.iter().map(|n| n.to_string()).collect())
    }
}

/// Options passed to a single `xss_foliate` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declaration {
    options: Vec<(String, OptionValue)>,
}

impl Declaration {
    /// A declaration with no options: every string attribute gets `strip`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an option, keeping insertion order.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.push((key.into(), value.into()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The last value given for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.options.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.options.iter().any(|(k, _)| k == key)
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }
}

impl Serialize for Declaration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.options.len()))?;
        for (key, value) in &self.options {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct DeclarationVisitor;

impl<'de> Visitor<'de> for DeclarationVisitor {
    type Value = Declaration;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping of xss_foliate options")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut options = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, OptionValue>()? {
            options.push((key, value));
        }
        Ok(Declaration { options })
    }

    // `xss_foliate:` with an empty body in YAML reads as unit.
    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(Declaration::default())
    }
}

impl<'de> Deserialize<'de> for Declaration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DeclarationVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_order() {
        let decl = Declaration::new()
            .with("prune", "plain_text")
            .with("escape", ["plain_text", "html_string"])
            .with(ENCODE_SPECIAL_CHARS, false);
        let keys: Vec<&str> = decl.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["prune", "escape", ENCODE_SPECIAL_CHARS]);
        assert_eq!(decl.get(ENCODE_SPECIAL_CHARS), Some(&OptionValue::Flag(false)));
    }

    #[test]
    fn single_name_normalizes_to_list() {
        assert_eq!(
            OptionValue::from("plain_text").field_names(),
            Some(vec!["plain_text".to_string()])
        );
        assert_eq!(OptionValue::Flag(true).field_names(), None);
    }

    #[test]
    fn deserializes_in_file_order() {
        let yaml = "escape: body\nprune: [title, body]\nencode_special_chars: false\n";
        let decl: Declaration = serde_yml::from_str(yaml).unwrap();
        let keys: Vec<&str> = decl.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["escape", "prune", "encode_special_chars"]);
        assert_eq!(
            decl.get("prune"),
            Some(&OptionValue::Fields(vec!["title".into(), "body".into()]))
        );
    }

    #[test]
    fn empty_yaml_value_is_empty_declaration() {
        let decl: Declaration = serde_yml::from_str("{}").unwrap();
        assert!(decl.is_empty());
    }
}
