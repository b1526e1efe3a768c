use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::Cli;

/// Write a completion script for `shell` to stdout.
pub fn run(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
