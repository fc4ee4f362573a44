//! merchimport CLI — bulk-import merchandising CSV files.
//!
//! Turns best-seller, top-seller, advertisement, popular-category and
//! seasonal-category CSV files into the typed JSON items the dashboard forms
//! consume.

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
