//! `cachette <FILE> <KEY> <VALUE>` — add or update an entry.

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::Result;
use crate::store::Applied;

/// Execute the set command.
pub fn execute(cli: &Cli, key: &str, value: &str) -> Result<()> {
    let store = open_store(cli)?;

    let applied = store.set(key, value)?;
    tracing::debug!(key, ?applied, "entry written");

    if applied == Applied::Updated {
        output::success(&format!("Updated '{key}'"));
    } else {
        output::success(&format!("Added '{key}'"));
    }

    Ok(())
}
