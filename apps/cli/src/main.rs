//! timelinegen CLI — splice a CSV event table into an HTML timeline.
//!
//! Reads the table, groups rows by date, renders each entry's Markdown body,
//! and replaces the `BEGIN`/`END TIMELINE CONTENT` region of the target document.

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
