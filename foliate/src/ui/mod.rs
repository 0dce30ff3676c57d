// foliate/src/ui/mod.rs
//! Terminal output helpers: themed stderr messages and rule tables.

pub mod output_format;
pub mod rules_table;
pub mod theme;
