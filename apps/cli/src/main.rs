//! keydoc CLI — reference documents for configuration keys and commands.
//!
//! Scans source files for configuration key declarations and command
//! handlers, then writes Markdown-ish reference documents.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
