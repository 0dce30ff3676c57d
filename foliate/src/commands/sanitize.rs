//! `foliate sanitize`: runs an entity's pre-validation hook over JSON records.

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info};
use serde_json::Value;

use foliate_core::{EntityCatalog, EntityType, HtmlSanitizer, Sanitizer};

use super::{read_input, success_msg, write_output};
use crate::cli::SanitizeCommand;
use crate::ui::theme::ThemeMap;

pub fn run_sanitize(cmd: &SanitizeCommand, quiet: bool, theme: &ThemeMap) -> Result<()> {
    info!("Starting sanitize operation.");
    let sanitizer = HtmlSanitizer::new();
    let catalog = EntityCatalog::load_from_file(&cmd.config, &sanitizer)?;
    let entity = find_entity(&catalog, &cmd.entity)?;

    let input = read_input(cmd.input_file.as_deref())?;
    let mut document: Value = serde_json::from_str(&input).context("Input is not valid JSON")?;
    let count = sanitize_document(entity, &mut document, &sanitizer)?;
    debug!("Sanitized {} record(s) of '{}'.", count, entity.name());

    let rendered = serde_json::to_string_pretty(&document)?;
    write_output(&rendered, cmd.output.as_deref())?;
    if let Some(path) = &cmd.output {
        if !quiet {
            success_msg(format!("Wrote {} sanitized record(s) to {}", count, path.display()), theme);
        }
    }
    info!("Sanitize operation completed.");
    Ok(())
}

pub(crate) fn find_entity<'a>(catalog: &'a EntityCatalog, name: &str) -> Result<&'a EntityType> {
    catalog.get(name).ok_or_else(|| {
        let known: Vec<&str> = catalog.iter().map(EntityType::name).collect();
        anyhow!("Unknown entity '{}'. Configured entities: {}", name, known.join(", "))
    })
}

/// Sanitizes a single record object or an array of record objects in place.
/// Returns the number of records processed.
pub fn sanitize_document(entity: &EntityType, document: &mut Value, sanitizer: &dyn Sanitizer) -> Result<usize> {
    match document {
        Value::Object(record) => {
            entity.before_validation(record, sanitizer)?;
            Ok(1)
        }
        Value::Array(records) => {
            for (index, record) in records.iter_mut().enumerate() {
                let Value::Object(fields) = record else {
                    bail!("Record {} is not a JSON object", index);
                };
                entity
                    .before_validation(fields, sanitizer)
                    .with_context(|| format!("Failed to sanitize record {}", index))?;
            }
            Ok(records.len())
        }
        _ => bail!("Expected a JSON object or an array of objects"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foliate_core::{AttributeType, Declaration, EntitySchema};
    use serde_json::json;
    use test_log::test;

    fn post() -> EntityType {
        let mut post = EntityType::new(
            EntitySchema::new("Post")
                .with_attribute("title", AttributeType::String)
                .with_attribute("body", AttributeType::Text),
        );
        post.xss_foliate(&Declaration::new().with("prune", "body"), &HtmlSanitizer::new())
            .unwrap();
        post
    }

    #[test]
    fn sanitizes_arrays_of_records() {
        let mut doc = json!([
            { "title": "<b>a</b>", "body": "<p>x</p><script>y</script>" },
            { "title": "b & c" },
        ]);
        let count = sanitize_document(&post(), &mut doc, &HtmlSanitizer::new()).unwrap();
        assert_eq!(count, 2);
        assert_eq!(doc[0]["title"], "a");
        assert_eq!(doc[0]["body"], "<p>x</p>");
        assert_eq!(doc[1]["title"], "b &amp; c");
    }

    #[test]
    fn rejects_scalars_and_mixed_arrays() {
        let sanitizer = HtmlSanitizer::new();
        assert!(sanitize_document(&post(), &mut json!("x"), &sanitizer).is_err());
        let err = sanitize_document(&post(), &mut json!([{}, 3]), &sanitizer).unwrap_err();
        assert!(err.to_string().contains("Record 1"));
    }
}
