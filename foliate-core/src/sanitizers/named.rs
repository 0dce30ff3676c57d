//! Named scrubbers: strategies addressed by name rather than by a built-in kind.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedScrubber {
    /// Prune disallowed elements and drop every attribute of the rest.
    Whitewash,
    /// Add `rel="nofollow"` to links.
    NoFollow,
    /// Add `rel="noopener"` to links.
    NoOpener,
    /// Add `rel="noreferrer"` to links.
    NoReferrer,
    /// Add `target="_blank"` to links.
    TargetBlank,
    /// Remove U+2028 and U+2029 from text.
    Unprintable,
    /// Unwrap block elements and line breaks into newlines.
    NewlineBlockElements,
}

impl NamedScrubber {
    pub const ALL: [NamedScrubber; 7] = [
        NamedScrubber::Whitewash,
        NamedScrubber::NoFollow,
        NamedScrubber::NoOpener,
        NamedScrubber::NoReferrer,
        NamedScrubber::TargetBlank,
        NamedScrubber::Unprintable,
        NamedScrubber::NewlineBlockElements,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NamedScrubber::Whitewash => "whitewash",
            NamedScrubber::NoFollow => "nofollow",
            NamedScrubber::NoOpener => "noopener",
            NamedScrubber::NoReferrer => "noreferrer",
            NamedScrubber::TargetBlank => "targetblank",
            NamedScrubber::Unprintable => "unprintable",
            NamedScrubber::NewlineBlockElements => "newline_block_elements",
        }
    }
}

impl FromStr for NamedScrubber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NamedScrubber::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for NamedScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
