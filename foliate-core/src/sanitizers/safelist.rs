//! Element, attribute and protocol safelists used by the HTML sanitizer.

use once_cell::sync::Lazy;
use std::collections::HashSet;

const ELEMENTS: &[&str] = &[
    "a", "abbr", "acronym", "address", "area", "article", "aside", "audio", "b", "bdi", "bdo",
    "big", "blockquote", "br", "button", "canvas", "caption", "center", "cite", "code", "col",
    "colgroup", "datalist", "dd", "del", "details", "dfn", "dir", "div", "dl", "dt", "em",
    "fieldset", "figcaption", "figure", "font", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hr", "i", "img", "input", "ins", "kbd", "label", "legend", "li", "main",
    "map", "mark", "menu", "meter", "nav", "ol", "optgroup", "option", "output", "p", "pre", "q",
    "s", "samp", "section", "select", "small", "span", "strike", "strong", "sub", "summary",
    "sup", "table", "tbody", "td", "textarea", "tfoot", "th", "thead", "time", "tr", "tt", "u",
    "ul", "var", "video", "wbr",
];

const ATTRIBUTES: &[&str] = &[
    "abbr", "accept", "accept-charset", "accesskey", "action", "align", "alt", "autocomplete",
    "axis", "background", "bgcolor", "border", "cellpadding", "cellspacing", "char", "charoff",
    "checked", "cite", "class", "clear", "color", "cols", "colspan", "compact", "coords",
    "datetime", "dir", "disabled", "enctype", "for", "frame", "headers", "height", "href",
    "hreflang", "hspace", "id", "ismap", "label", "lang", "longdesc", "loop", "max",
    "maxlength", "media", "method", "min", "multiple", "name", "nohref", "noshade", "nowrap",
    "open", "placeholder", "poster", "preload", "readonly", "rel", "rev", "rows", "rowspan",
    "rules", "scope", "selected", "shape", "size", "span", "src", "start", "step", "summary",
    "tabindex", "target", "title", "type", "usemap", "valign", "value", "width", "xml:lang",
];

const URI_ATTRIBUTES: &[&str] = &[
    "action", "background", "cite", "href", "longdesc", "poster", "src", "xlink:href",
];

const PROTOCOLS: &[&str] = &["http", "https", "mailto", "ftp", "tel"];

/// Elements whose content the tokenizer reads as raw text. Entities inside
/// them are literal characters.
pub const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "noscript", "plaintext",
];

/// Elements whose content is text with entity references but no markup.
pub const RCDATA_ELEMENTS: &[&str] = &["title", "textarea"];

/// Elements unwrapped into newlines by `newline_block_elements`.
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "li", "main", "nav", "ol", "p", "pre", "section", "table", "tr", "ul",
];

static ELEMENT_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| ELEMENTS.iter().copied().collect());
static ATTRIBUTE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ATTRIBUTES.iter().copied().collect());

pub fn allows_element(tag: &str) -> bool {
    ELEMENT_SET.contains(tag)
}

pub fn allows_attribute(name: &str) -> bool {
    ATTRIBUTE_SET.contains(name)
}

pub fn is_uri_attribute(name: &str) -> bool {
    URI_ATTRIBUTES.contains(&name)
}

pub fn is_block_element(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag)
}

/// Accepts relative references and absolute URIs with a safelisted scheme.
pub fn allows_uri(value: &str) -> bool {
    let decoded = html_escape::decode_html_entities(value);
    let normalized: String = decoded
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    let scheme_end = normalized.find(':');
    let path_start = normalized.find(['/', '?', '#']);
    match (scheme_end, path_start) {
        (Some(colon), Some(slash)) if slash < colon => true,
        (Some(colon), _) => PROTOCOLS.contains(&&normalized[..colon]),
        (None, _) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_are_not_safelisted() {
        assert!(allows_element("div"));
        assert!(!allows_element("script"));
        assert!(!allows_element("iframe"));
        assert!(!allows_attribute("onclick"));
        assert!(!allows_attribute("style"));
    }

    #[test]
    fn uri_schemes() {
        assert!(allows_uri("https://example.com/a"));
        assert!(allows_uri("/relative/path:with-colon"));
        assert!(allows_uri("#anchor"));
        assert!(allows_uri("mailto:someone@example.com"));
        assert!(!allows_uri("javascript:alert(1)"));
        assert!(!allows_uri(" JaVa\tScRiPt:alert(1)"));
        assert!(!allows_uri("java&#115;cript:alert(1)"));
        assert!(!allows_uri("data:text/html;base64,AAAA"));
    }
}
