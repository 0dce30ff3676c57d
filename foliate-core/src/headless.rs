// File: foliate-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for scrubbing bare strings outside of any entity type.

use crate::errors::{ConfigurationError, FoliateError};
use crate::resolver::FieldRule;
use crate::sanitizers::{HtmlSanitizer, Sanitizer};
use crate::scrubber::{OutputShape, ScrubberKind, HTML5LIB_SANITIZE};
use crate::transform;

/// Scrubs `content` the way a field declared with `kind_name` would be.
///
/// `kind_name` accepts the same names as a declaration key, including
/// `html5lib_sanitize`. `encode_special_chars` only matters for `TextOnly`.
pub fn headless_scrub_string(
    content: &str,
    kind_name: &str,
    shape: OutputShape,
    encode_special_chars: bool,
) -> Result<String, FoliateError> {
    headless_scrub_with(&HtmlSanitizer::new(), content, kind_name, shape, encode_special_chars)
}

/// Same as [`headless_scrub_string`] with a caller-supplied sanitizer.
pub fn headless_scrub_with(
    sanitizer: &dyn Sanitizer,
    content: &str,
    kind_name: &str,
    shape: OutputShape,
    encode_special_chars: bool,
) -> Result<String, FoliateError> {
    if kind_name != HTML5LIB_SANITIZE && !sanitizer.supports(kind_name) {
        return Err(ConfigurationError::InvalidOptions(vec![kind_name.to_string()]).into());
    }
    let rule = FieldRule {
        field_name: "content".to_string(),
        kind: ScrubberKind::from_option_key(kind_name),
        output_shape: shape,
        encode_special_chars,
    };
    Ok(transform::apply_rule(&rule, content, sanitizer)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_only_strip_encodes() {
        let out = headless_scrub_string("<p>\"hi\" & bye</p>", "strip", OutputShape::TextOnly, true).unwrap();
        assert_eq!(out, "&quot;hi&quot; &amp; bye");
    }

    #[test]
    fn full_document_prune() {
        let out = headless_scrub_string("<p>ok</p><script>x</script>", "prune", OutputShape::FullDocument, true).unwrap();
        assert_eq!(out, "<p>ok</p>");
    }

    #[test]
    fn html5lib_sanitize_escapes() {
        let out = headless_scrub_string("<i>x</i>", HTML5LIB_SANITIZE, OutputShape::FullDocument, true).unwrap();
        assert_eq!(out, "&lt;i&gt;x&lt;/i&gt;");
    }

    #[test]
    fn html5lib_sanitize_escapes_title_content() {
        let out = headless_scrub_string(
            "<title><img src=x onerror=alert(1)></title>",
            HTML5LIB_SANITIZE,
            OutputShape::FullDocument,
            true,
        )
        .unwrap();
        assert_eq!(out, "&lt;title&gt;&lt;img src=x onerror=alert(1)&gt;&lt;/title&gt;");
    }

    #[test]
    fn unknown_kind_is_a_configuration_error() {
        let err = headless_scrub_string("x", "sparkle", OutputShape::FullDocument, true).unwrap_err();
        assert!(matches!(
            err,
            FoliateError::Configuration(ConfigurationError::InvalidOptions(_))
        ));
    }
}
