//! `foliate scrub`: scrubs a bare string outside of any entity.

use anyhow::{Context, Result};
use log::debug;

use foliate_core::headless_scrub_string;

use super::{read_input, write_output};
use crate::cli::ScrubCommand;

pub fn run_scrub(cmd: &ScrubCommand) -> Result<()> {
    let input = read_input(cmd.input_file.as_deref())?;
    let shape = cmd.output_shape();
    debug!("Scrubbing {} byte(s) with '{}' ({}).", input.len(), cmd.kind, shape);

    let scrubbed = headless_scrub_string(&input, &cmd.kind, shape, !cmd.no_encode)
        .with_context(|| format!("Failed to scrub input with '{}'", cmd.kind))?;
    write_output(&scrubbed, None)
}
