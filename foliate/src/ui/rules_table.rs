//! Renders resolved field rules as a terminal table.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use owo_colors::AnsiColors;

use foliate_core::{EntityType, FieldRule};

use super::theme::{color_for, ThemeEntry, ThemeMap};

const HEADERS: [&str; 6] = ["Entity", "Field", "Scrubber", "Output", "Encode", "Source"];

fn ansi_index(color: AnsiColors) -> u8 {
    match color {
        AnsiColors::Black => 0,
        AnsiColors::Red => 1,
        AnsiColors::Green => 2,
        AnsiColors::Yellow => 3,
        AnsiColors::Blue => 4,
        AnsiColors::Magenta => 5,
        AnsiColors::Cyan => 6,
        AnsiColors::White | AnsiColors::Default => 7,
        AnsiColors::BrightBlack => 8,
        AnsiColors::BrightRed => 9,
        AnsiColors::BrightGreen => 10,
        AnsiColors::BrightYellow => 11,
        AnsiColors::BrightBlue => 12,
        AnsiColors::BrightMagenta => 13,
        AnsiColors::BrightCyan => 14,
        AnsiColors::BrightWhite => 15,
    }
}

fn cell(text: impl ToString, theme: &ThemeMap, entry: ThemeEntry, supports_color: bool) -> Cell {
    let cell = Cell::new(text);
    match color_for(theme, entry) {
        Some(color) if supports_color => cell.fg(Color::AnsiValue(ansi_index(color))),
        _ => cell,
    }
}

fn rule_row(entity: &str, rule: &FieldRule, source: &str, theme: &ThemeMap, supports_color: bool) -> Vec<Cell> {
    vec![
        Cell::new(entity),
        cell(&rule.field_name, theme, ThemeEntry::FieldName, supports_color),
        cell(&rule.kind, theme, ThemeEntry::Scrubber, supports_color),
        Cell::new(rule.output_shape),
        Cell::new(if rule.encode_special_chars { "yes" } else { "no" }),
        Cell::new(source),
    ]
}

/// Builds one table covering every rule of every given entity.
///
/// Entities with neither `xss_foliate` nor `html_fragment` rules get a single
/// row marking them as not foliated.
pub fn build_rules_table<'a, I>(entities: I, theme: &ThemeMap, supports_color: bool) -> Table
where
    I: IntoIterator<Item = &'a EntityType>,
{
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            HEADERS
                .iter()
                .map(|h| cell(h, theme, ThemeEntry::Header, supports_color))
                .collect::<Vec<_>>(),
        );

    for entity in entities {
        let name = entity.name();
        for rule in entity.fragment_rules() {
            table.add_row(rule_row(name, rule, "html_fragment", theme, supports_color));
        }
        if let Some(config) = entity.config() {
            for rule in config.rules() {
                table.add_row(rule_row(name, rule, "xss_foliate", theme, supports_color));
            }
        }
        if !entity.is_foliated() && entity.fragment_rules().is_empty() {
            table.add_row(vec![
                Cell::new(name),
                Cell::new("-"),
                cell("not foliated", theme, ThemeEntry::Warn, supports_color),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new("-"),
            ]);
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;
    use foliate_core::{AttributeType, Declaration, EntitySchema, HtmlSanitizer};

    #[test]
    fn table_lists_rules_and_unfoliated_entities() {
        let sanitizer = HtmlSanitizer::new();
        let mut post = EntityType::new(
            EntitySchema::new("Post")
                .with_attribute("title", AttributeType::String)
                .with_attribute("body", AttributeType::Text),
        );
        post.xss_foliate(&Declaration::new().with("prune", "body"), &sanitizer).unwrap();
        let tag = EntityType::new(EntitySchema::new("Tag").with_attribute("label", AttributeType::String));

        let rendered = build_rules_table([&post, &tag], &ThemeStyle::default_theme_map(), false).to_string();
        assert!(rendered.contains("title"));
        assert!(rendered.contains("prune"));
        assert!(rendered.contains("full_document"));
        assert!(rendered.contains("text_only"));
        assert!(rendered.contains("not foliated"));
    }
}
