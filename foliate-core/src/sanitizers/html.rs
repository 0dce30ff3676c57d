//! `HtmlSanitizer`: the bundled [`Sanitizer`], built on the `lol_html` streaming rewriter.
//!
//! Each scrub runs two rewrites over the input. The first applies the
//! requested strategy and yields the sanitized markup; the second unwraps every
//! remaining element of that markup and decodes entities, which yields the
//! fragment's text.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use lol_html::html_content::{ContentType, Element, TextChunk};
use lol_html::{doc_comments, doc_text, element, rewrite_str, text, RewriteStrSettings};

use crate::errors::SanitizeError;
use crate::sanitizers::named::NamedScrubber;
use crate::sanitizers::safelist;
use crate::sanitizers::{Fragment, Sanitizer};
use crate::scrubber::ScrubberKind;

/// The rewrite applied to one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Strip,
    Prune,
    Escape,
    Named(NamedScrubber),
    /// Unwrap everything; used to extract text.
    Unwrap,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSanitizer;

impl HtmlSanitizer {
    pub fn new() -> Self {
        Self
    }

    fn mode_for(kind: &ScrubberKind) -> Result<Mode, SanitizeError> {
        match kind {
            ScrubberKind::Strip => Ok(Mode::Strip),
            ScrubberKind::Prune => Ok(Mode::Prune),
            ScrubberKind::Escape => Ok(Mode::Escape),
            ScrubberKind::Named(name) => name
                .parse::<NamedScrubber>()
                .map(Mode::Named)
                .map_err(SanitizeError::Unsupported),
        }
    }
}

impl Sanitizer for HtmlSanitizer {
    fn supports(&self, name: &str) -> bool {
        match ScrubberKind::from(name.to_string()) {
            ScrubberKind::Named(name) => name.parse::<NamedScrubber>().is_ok(),
            _ => true,
        }
    }

    fn scrub_fragment(&self, raw: &str, kind: &ScrubberKind) -> Result<Fragment, SanitizeError> {
        let mode = Self::mode_for(kind)?;
        let markup = rewrite(raw, mode)?;
        let text = extract_text(&markup)?;
        debug!(
            "Scrubbed fragment with '{}': {} bytes in, {} bytes out.",
            kind,
            raw.len(),
            markup.len()
        );
        Ok(Fragment::new(markup, text))
    }
}

/// Text content of `markup`: elements unwrapped, comments dropped, entities decoded.
pub fn extract_text(markup: &str) -> Result<String, SanitizeError> {
    let unwrapped = rewrite(markup, Mode::Unwrap)?;
    Ok(html_escape::decode_html_entities(&unwrapped).into_owned())
}

fn rewrite(raw: &str, mode: Mode) -> Result<String, SanitizeError> {
    if raw.is_empty() {
        return Ok(String::new());
    }

    let mut element_handlers = Vec::new();
    let mut document_handlers = Vec::new();
    let mut protect_text = false;

    match mode {
        Mode::Strip => {
            element_handlers.push(element!("*", |el| {
                if allowed(el) {
                    scrub_attributes(el);
                } else {
                    el.remove_and_keep_content();
                }
                Ok(())
            }));
            protect_text = true;
            document_handlers.push(doc_comments!(|c| {
                c.remove();
                Ok(())
            }));
        }
        Mode::Prune => {
            element_handlers.push(element!("*", |el| {
                if allowed(el) {
                    scrub_attributes(el);
                } else {
                    el.remove();
                }
                Ok(())
            }));
            document_handlers.push(doc_comments!(|c| {
                c.remove();
                Ok(())
            }));
        }
        Mode::Escape => {
            element_handlers.push(element!("*", |el| {
                let tag = el.tag_name().to_ascii_lowercase();
                el.before(&start_tag_source(el, &tag), ContentType::Text);
                if el.can_have_content() && !el.is_self_closing() {
                    el.after(&format!("</{}>", tag), ContentType::Text);
                }
                el.remove_and_keep_content();
                Ok(())
            }));
            protect_text = true;
            document_handlers.push(doc_comments!(|c| {
                let source = format!("<!--{}-->", c.text());
                c.replace(&source, ContentType::Text);
                Ok(())
            }));
        }
        Mode::Named(NamedScrubber::Whitewash) => {
            element_handlers.push(element!("*", |el| {
                if allowed(el) {
                    let names: Vec<String> = el.attributes().iter().map(|a| a.name()).collect();
                    for name in names {
                        el.remove_attribute(&name);
                    }
                } else {
                    el.remove();
                }
                Ok(())
            }));
            document_handlers.push(doc_comments!(|c| {
                c.remove();
                Ok(())
            }));
        }
        Mode::Named(NamedScrubber::NoFollow) => {
            element_handlers.push(element!("a[href]", |el| {
                append_rel(el, "nofollow")?;
                Ok(())
            }));
        }
        Mode::Named(NamedScrubber::NoOpener) => {
            element_handlers.push(element!("a[href]", |el| {
                append_rel(el, "noopener")?;
                Ok(())
            }));
        }
        Mode::Named(NamedScrubber::NoReferrer) => {
            element_handlers.push(element!("a[href]", |el| {
                append_rel(el, "noreferrer")?;
                Ok(())
            }));
        }
        Mode::Named(NamedScrubber::TargetBlank) => {
            element_handlers.push(element!("a[href]", |el| {
                el.set_attribute("target", "_blank")?;
                Ok(())
            }));
        }
        Mode::Named(NamedScrubber::Unprintable) => {
            document_handlers.push(doc_text!(|t| {
                if t.as_str().contains(is_unprintable) {
                    let cleaned = t.as_str().replace(is_unprintable, "");
                    t.replace(&cleaned, ContentType::Html);
                }
                Ok(())
            }));
        }
        Mode::Named(NamedScrubber::NewlineBlockElements) => {
            element_handlers.push(element!("*", |el| {
                let tag = el.tag_name().to_ascii_lowercase();
                if tag == "br" {
                    el.replace("\n", ContentType::Text);
                } else if safelist::is_block_element(&tag) {
                    el.before("\n", ContentType::Text);
                    el.after("\n", ContentType::Text);
                    el.remove_and_keep_content();
                }
                Ok(())
            }));
        }
        Mode::Unwrap => {
            element_handlers.push(element!("*", |el| {
                el.remove_and_keep_content();
                Ok(())
            }));
            document_handlers.push(doc_comments!(|c| {
                c.remove();
                Ok(())
            }));
        }
    }

    // Unwrapped or escaped elements must not let their unparsed content
    // turn into markup.
    if protect_text {
        for tag in safelist::RAW_TEXT_ELEMENTS {
            element_handlers.push(text!(tag, |t| {
                escape_chunk(t);
                Ok(())
            }));
        }
        for tag in safelist::RCDATA_ELEMENTS {
            element_handlers.push(text!(tag, |t| {
                escape_rcdata_chunk(t);
                Ok(())
            }));
        }
    }

    rewrite_str(
        raw,
        RewriteStrSettings {
            element_content_handlers: element_handlers,
            document_content_handlers: document_handlers,
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|e| SanitizeError::Rewrite(e.to_string()))
}

fn allowed(el: &Element<'_, '_>) -> bool {
    safelist::allows_element(&el.tag_name().to_ascii_lowercase())
}

fn scrub_attributes(el: &mut Element<'_, '_>) {
    let attrs: Vec<(String, String)> = el
        .attributes()
        .iter()
        .map(|a| (a.name().to_ascii_lowercase(), a.value()))
        .collect();

    for (name, value) in attrs {
        let unsafe_uri = safelist::is_uri_attribute(&name) && !safelist::allows_uri(&value);
        if !safelist::allows_attribute(&name) || unsafe_uri {
            el.remove_attribute(&name);
        }
    }
}

fn start_tag_source(el: &Element<'_, '_>, tag: &str) -> String {
    let mut source = format!("<{}", tag);
    for attr in el.attributes() {
        source.push_str(&format!(" {}=\"{}\"", attr.name(), attr.value()));
    }
    source.push_str(if el.is_self_closing() { " />" } else { ">" });
    source
}

// Raw-text content is emitted verbatim by the rewriter; re-emit it as text so
// it cannot turn back into markup once its element is unwrapped.
fn escape_chunk(chunk: &mut TextChunk<'_>) {
    if chunk.as_str().is_empty() {
        return;
    }
    let content = chunk.as_str().to_string();
    chunk.replace(&content, ContentType::Text);
}

// RCDATA content already carries its entity references; only the angle
// brackets need escaping.
fn escape_rcdata_chunk(chunk: &mut TextChunk<'_>) {
    if !chunk.as_str().contains(['<', '>']) {
        return;
    }
    let content = chunk.as_str().replace('<', "&lt;").replace('>', "&gt;");
    chunk.replace(&content, ContentType::Html);
}

fn append_rel(el: &mut Element<'_, '_>, token: &str) -> Result<(), lol_html::errors::AttributeNameError> {
    let rel = match el.get_attribute("rel") {
        Some(existing) if existing.split_whitespace().any(|t| t.eq_ignore_ascii_case(token)) => existing,
        Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), token),
        _ => token.to_string(),
    };
    el.set_attribute("rel", &rel)
}

fn is_unprintable(c: char) -> bool {
    c == '\u{2028}' || c == '\u{2029}'
}
