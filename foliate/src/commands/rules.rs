//! `foliate rules`: shows what each configured entity will do to its fields.

use anyhow::Result;
use is_terminal::IsTerminal;
use log::info;
use serde::Serialize;
use std::io;

use foliate_core::{EntityCatalog, EntityType, FieldRule, HtmlSanitizer};

use super::sanitize::find_entity;
use super::{info_msg, write_output};
use crate::cli::RulesCommand;
use crate::ui::rules_table::build_rules_table;
use crate::ui::theme::ThemeMap;

/// JSON shape of one entity in `rules --json`.
#[derive(Debug, Serialize)]
pub struct EntityRulesReport<'a> {
    pub entity: &'a str,
    pub foliated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encode_special_chars: Option<bool>,
    pub rules: &'a [FieldRule],
    pub html_fragments: &'a [FieldRule],
}

impl<'a> From<&'a EntityType> for EntityRulesReport<'a> {
    fn from(entity: &'a EntityType) -> Self {
        let config = entity.config();
        EntityRulesReport {
            entity: entity.name(),
            foliated: entity.is_foliated(),
            encode_special_chars: config.map(|c| c.encode_special_chars()),
            rules: config.map(|c| c.rules()).unwrap_or(&[]),
            html_fragments: entity.fragment_rules(),
        }
    }
}

pub fn run_rules(cmd: &RulesCommand, quiet: bool, theme: &ThemeMap) -> Result<()> {
    let catalog = EntityCatalog::load_from_file(&cmd.config, &HtmlSanitizer::new())?;
    let selected: Vec<&EntityType> = match &cmd.entity {
        Some(name) => vec![find_entity(&catalog, name)?],
        None => catalog.iter().collect(),
    };
    info!("Listing rules for {} entity type(s).", selected.len());

    if selected.is_empty() {
        if !quiet {
            info_msg("No entities configured.", theme);
        }
        return Ok(());
    }

    if cmd.json {
        let reports: Vec<EntityRulesReport> = selected.into_iter().map(EntityRulesReport::from).collect();
        write_output(&serde_json::to_string_pretty(&reports)?, None)
    } else {
        let supports_color = io::stdout().is_terminal();
        let table = build_rules_table(selected, theme, supports_color);
        write_output(&table.to_string(), None)
    }
}
