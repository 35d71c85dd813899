//! Shell completion generation

use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io;

use crate::cli::CliArgs;
use crate::error::Result;

/// Write the completion script for `shell` to stdout
pub fn generate_completion(shell: Shell) -> Result<()> {
    let mut stdout = io::stdout();
    write_completion(shell, &mut stdout)
}

fn write_completion(shell: Shell, out: &mut dyn io::Write) -> Result<()> {
    let mut cmd = CliArgs::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, out);
    out.flush()?;
    Ok(())
}
