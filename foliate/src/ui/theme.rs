//! Colors used for the CLI's stderr messages and rule tables.
//!
//! Each logical output element maps to an optional 16-color ANSI foreground.

use owo_colors::AnsiColors;
use std::collections::HashMap;

/// Type alias for the theme map, providing a consistent type definition.
pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The different logical parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeEntry {
    /// Table headers and section titles.
    Header,
    Success,
    Info,
    Warn,
    Error,
    /// Field names in rule tables.
    FieldName,
    /// Scrubber names in rule tables.
    Scrubber,
}

/// Represents an ANSI color that can be used in the theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColor(String);

impl ThemeColor {
    /// Converts the color name into its `owo_colors::AnsiColors` value.
    pub fn to_ansi_color(&self) -> AnsiColors {
        match self.0.as_str() {
            "black" => AnsiColors::Black,
            "red" => AnsiColors::Red,
            "green" => AnsiColors::Green,
            "yellow" => AnsiColors::Yellow,
            "blue" => AnsiColors::Blue,
            "magenta" => AnsiColors::Magenta,
            "cyan" => AnsiColors::Cyan,
            "brightblack" => AnsiColors::BrightBlack,
            "brightred" => AnsiColors::BrightRed,
            "brightgreen" => AnsiColors::BrightGreen,
            "brightyellow" => AnsiColors::BrightYellow,
            "brightblue" => AnsiColors::BrightBlue,
            "brightmagenta" => AnsiColors::BrightMagenta,
            "brightcyan" => AnsiColors::BrightCyan,
            "brightwhite" => AnsiColors::BrightWhite,
            _ => AnsiColors::White,
        }
    }
}

/// Represents the style configuration for a specific `ThemeEntry`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeStyle {
    pub fg: Option<ThemeColor>,
}

impl ThemeStyle {
    fn fg(name: &str) -> Self {
        ThemeStyle {
            fg: Some(ThemeColor(name.to_string())),
        }
    }

    /// Returns the default theme map.
    pub fn default_theme_map() -> ThemeMap {
        HashMap::from([
            (ThemeEntry::Header, Self::fg("brightwhite")),
            (ThemeEntry::Success, Self::fg("green")),
            (ThemeEntry::Info, Self::fg("cyan")),
            (ThemeEntry::Warn, Self::fg("yellow")),
            (ThemeEntry::Error, Self::fg("red")),
            (ThemeEntry::FieldName, Self::fg("brightblue")),
            (ThemeEntry::Scrubber, Self::fg("magenta")),
        ])
    }
}

/// The color for `entry`, if the theme defines one.
pub fn color_for(theme: &ThemeMap, entry: ThemeEntry) -> Option<AnsiColors> {
    theme
        .get(&entry)
        .and_then(|style| style.fg.as_ref())
        .map(ThemeColor::to_ansi_color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors_map_to_ansi() {
        assert_eq!(ThemeColor("blue".into()).to_ansi_color(), AnsiColors::Blue);
        assert_eq!(ThemeColor("brightmagenta".into()).to_ansi_color(), AnsiColors::BrightMagenta);
        assert_eq!(ThemeColor("mauve".into()).to_ansi_color(), AnsiColors::White);
    }

    #[test]
    fn default_theme_covers_messages() {
        let theme = ThemeStyle::default_theme_map();
        assert_eq!(color_for(&theme, ThemeEntry::Error), Some(AnsiColors::Red));
        assert_eq!(color_for(&ThemeMap::new(), ThemeEntry::Error), None);
    }
}
