//! Configuration management for `foliate-core`.
//!
//! Entity types and their sanitization declarations can be described in a
//! YAML file. Loading the file declares every entity immediately, so a
//! misconfigured entity fails when the configuration is loaded rather than
//! when the first record is validated.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::declaration::Declaration;
use crate::entity::{EntityType, FragmentDeclaration};
use crate::errors::FoliateError;
use crate::sanitizers::Sanitizer;
use crate::schema::{Attribute, EntitySchema};

/// One entity as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EntityDefinition {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// Absent means the entity is not foliated; `{}` declares the defaults.
    #[serde(default)]
    pub xss_foliate: Option<Declaration>,
    #[serde(default)]
    pub html_fragments: Vec<FragmentDeclaration>,
}

/// The top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FoliateConfig {
    pub entities: Vec<EntityDefinition>,
}

impl FoliateConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: FoliateConfig = serde_yml::from_str(text)
            .map_err(FoliateError::from)
            .context("Failed to parse foliate configuration")?;
        validate_entities(&config.entities)?;
        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading entity definitions from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .map_err(FoliateError::from)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Declares every entity against `sanitizer`.
    pub fn declare(self, sanitizer: &dyn Sanitizer) -> Result<EntityCatalog> {
        let mut entities = Vec::with_capacity(self.entities.len());
        for definition in self.entities {
            let name = definition.name.clone();
            let entity = declare_entity(definition, sanitizer)
                .with_context(|| format!("Failed to declare entity '{}'", name))?;
            entities.push(entity);
        }
        info!("Declared {} entity type(s).", entities.len());
        Ok(EntityCatalog { entities })
    }
}

fn declare_entity(definition: EntityDefinition, sanitizer: &dyn Sanitizer) -> Result<EntityType> {
    let mut entity = EntityType::new(EntitySchema {
        name: definition.name,
        attributes: definition.attributes,
    });
    for fragment in definition.html_fragments {
        entity.html_fragment(&fragment.field, fragment.scrub, sanitizer)?;
    }
    if let Some(declaration) = definition.xss_foliate {
        entity.xss_foliate(&declaration, sanitizer)?;
    }
    debug!("Entity '{}' declared (foliated: {}).", entity.name(), entity.is_foliated());
    Ok(entity)
}

fn validate_entities(entities: &[EntityDefinition]) -> Result<()> {
    let mut names = HashSet::new();
    let mut errors = Vec::new();

    for entity in entities {
        if entity.name.is_empty() {
            errors.push("An entity has an empty `name` field.".to_string());
        } else if !names.insert(entity.name.as_str()) {
            errors.push(format!("Duplicate entity name found: '{}'.", entity.name));
        }

        let mut attributes = HashSet::new();
        for attribute in &entity.attributes {
            if !attributes.insert(attribute.name.as_str()) {
                errors.push(format!(
                    "Entity '{}' declares attribute '{}' more than once.",
                    entity.name, attribute.name
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("Entity validation failed:\n{}", errors.join("\n")))
    }
}

/// Entity types declared from a configuration, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
    entities: Vec<EntityType>,
}

impl EntityCatalog {
    pub fn load_from_file<P: AsRef<Path>>(path: P, sanitizer: &dyn Sanitizer) -> Result<Self> {
        FoliateConfig::load_from_file(path)?.declare(sanitizer)
    }

    pub fn get(&self, name: &str) -> Option<&EntityType> {
        self.entities.iter().find(|e| e.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityType> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
