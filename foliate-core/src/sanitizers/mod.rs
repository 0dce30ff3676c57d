//! The sanitizer seam.
//!
//! Field rules never parse markup themselves. They hand the raw string and a
//! [`ScrubberKind`] to a [`Sanitizer`] and get back a [`Fragment`], from which
//! either the serialized markup or the plain text is taken.
//!
//! [`HtmlSanitizer`] is the bundled implementation, built on the `lol_html`
//! streaming rewriter. Any other implementation can be plugged in, for
//! example one that forwards to an out-of-process service.

pub mod html;
pub mod named;
pub mod safelist;

use crate::errors::SanitizeError;
use crate::scrubber::ScrubberKind;
use std::fmt;

pub use html::HtmlSanitizer;
pub use named::NamedScrubber;

/// A scrubbed markup fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    markup: String,
    text: String,
}

impl Fragment {
    pub fn new(markup: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            text: text.into(),
        }
    }

    /// The sanitized fragment serialized back to markup.
    pub fn to_html(&self) -> &str {
        &self.markup
    }

    /// The text content of the fragment with entities decoded.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.markup)
    }
}

/// A routine that scrubs markup according to a named strategy.
///
/// Calls are synchronous. Failures are returned as-is; callers do not retry.
pub trait Sanitizer: Send + Sync {
    /// Whether `name` addresses a strategy this sanitizer can run.
    ///
    /// The built-in kinds (`strip`, `prune`, `escape`) must always be supported.
    fn supports(&self, name: &str) -> bool;

    /// Scrubs `raw` with `kind`.
    fn scrub_fragment(&self, raw: &str, kind: &ScrubberKind) -> Result<Fragment, SanitizeError>;
}
