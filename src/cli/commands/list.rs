//! `cachette <FILE>` — print every entry as `key -> value`.

use std::io::{self, Write};

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::Result;

/// Execute the list command.
pub fn execute(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    let secrets = store.list_all()?;

    tracing::debug!(entries = secrets.len(), "listing store");

    let mut stdout = io::stdout().lock();
    stdout.write_all(output::format_listing(&secrets).as_bytes())?;
    stdout.flush()?;

    Ok(())
}
