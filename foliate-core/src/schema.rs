//! Persisted entity schemas.
//!
//! The resolver only needs to know which attributes an entity type has, in
//! which order, and which of them hold strings.

use serde::{Deserialize, Serialize};

/// Column type of a persisted attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Text,
    Integer,
    Float,
    Decimal,
    Boolean,
    Date,
    Datetime,
    Binary,
    Json,
}

impl AttributeType {
    /// String-typed attributes are the ones selected by default.
    pub fn is_string(self) -> bool {
        matches!(self, AttributeType::String | AttributeType::Text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AttributeType,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EntitySchema {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl EntitySchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, kind: AttributeType) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            kind,
        });
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Names of string-typed attributes, in schema order.
    pub fn string_attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|a| a.kind.is_string())
            .map(|a| a.name.as_str())
    }
}
