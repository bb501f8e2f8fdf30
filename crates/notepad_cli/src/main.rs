//! `notepad` command-line host.
//!
//! # Responsibility
//! - Resolve configuration from flags and `NOTEPAD_*` variables.
//! - Drive `notepad_core` screens one command at a time.

mod commands;
mod picker;

use anyhow::{Context, Result};
use clap::Parser;
use commands::Cli;
use notepad_core::{App, InMemoryNotificationCenter};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config();

    // Alerts live only for this process; stored `reminder_at` values persist.
    let app = App::open(&config, InMemoryNotificationCenter::granted())
        .with_context(|| format!("failed to open notes at {}", config.db_path.display()))?;
    let result = commands::run(&app, cli.command);
    app.close().context("failed to close note store")?;
    result
}
