//! Scrubber kinds and output shapes.
//!
//! A `ScrubberKind` names the strategy the sanitizer applies to a field. The
//! three built-in strategies are plain variants; any other strategy the
//! sanitizer knows by name is carried verbatim in `Named`.
//!
//! License: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pseudo-option accepted in declarations. It resolves to [`ScrubberKind::Escape`].
pub const HTML5LIB_SANITIZE: &str = "html5lib_sanitize";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ScrubberKind {
    /// Remove disallowed markup, keep its content.
    #[default]
    Strip,
    /// Remove disallowed markup together with its subtree.
    Prune,
    /// Turn markup into literal text.
    Escape,
    /// A strategy addressed by name, resolved by the sanitizer.
    Named(String),
}

impl ScrubberKind {
    pub fn as_str(&self) -> &str {
        match self {
            ScrubberKind::Strip => "strip",
            ScrubberKind::Prune => "prune",
            ScrubberKind::Escape => "escape",
            ScrubberKind::Named(name) => name,
        }
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, ScrubberKind::Named(_))
    }

    /// Maps a declaration key to the kind it selects.
    ///
    /// `html5lib_sanitize` selects `Escape`, not an HTML5 sanitizer.
    pub fn from_option_key(key: &str) -> Self {
        if key == HTML5LIB_SANITIZE {
            return ScrubberKind::Escape;
        }
        ScrubberKind::from(key.to_string())
    }
}

impl From<String> for ScrubberKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "strip" => ScrubberKind::Strip,
            "prune" => ScrubberKind::Prune,
            "escape" => ScrubberKind::Escape,
            _ => ScrubberKind::Named(name),
        }
    }
}

impl From<ScrubberKind> for String {
    fn from(kind: ScrubberKind) -> Self {
        kind.as_str().to_string()
    }
}

impl FromStr for ScrubberKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ScrubberKind::from(s.to_string()))
    }
}

impl fmt::Display for ScrubberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a field receives after scrubbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputShape {
    /// The serialized sanitized markup.
    FullDocument,
    /// The plain text of the sanitized fragment.
    TextOnly,
}

impl fmt::Display for OutputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputShape::FullDocument => f.write_str("full_document"),
            OutputShape::TextOnly => f.write_str("text_only"),
        }
    }
}
