//! completion command - Generate shell completion scripts

use crate::cli::args::{Cli, Shell};
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, shells};

/// Write a completion script for `shell` to stdout.
pub fn completion(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    let stdout = &mut std::io::stdout();

    match shell {
        Shell::Bash => generate(shells::Bash, &mut command, &name, stdout),
        Shell::Zsh => generate(shells::Zsh, &mut command, &name, stdout),
        Shell::Fish => generate(shells::Fish, &mut command, &name, stdout),
        Shell::PowerShell => generate(shells::PowerShell, &mut command, &name, stdout),
    }

    Ok(())
}
