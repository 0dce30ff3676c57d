// foliate/src/lib.rs
//! # Foliate CLI Application
//!
//! Command-line front end for `foliate-core`: sanitizes JSON records against
//! entity declarations loaded from YAML, lists the resolved rules, and scrubs
//! bare strings.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
