//! Themed stderr messages.

use owo_colors::OwoColorize;
use std::io::{self, Write};

use super::theme::{color_for, ThemeEntry, ThemeMap};

fn print_message<W: Write>(
    writer: &mut W,
    prefix: &str,
    message: &str,
    theme: &ThemeMap,
    entry: ThemeEntry,
    supports_color: bool,
) -> io::Result<()> {
    match color_for(theme, entry) {
        Some(color) if supports_color => writeln!(writer, "{}", format!("{}{}", prefix, message).color(color)),
        _ => writeln!(writer, "{}{}", prefix, message),
    }
}

pub fn print_info_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_message(writer, "", message, theme, ThemeEntry::Info, supports_color)
}

pub fn print_success_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_message(writer, "", message, theme, ThemeEntry::Success, supports_color)
}

pub fn print_error_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_message(writer, "Error: ", message, theme, ThemeEntry::Error, supports_color)
}
