//! `cachette -d <KEY> <FILE>` and `cachette -D <REGEX> <FILE>` — remove
//! entries.

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::Result;

/// Execute the exact delete command.
pub fn execute(cli: &Cli, key: &str) -> Result<()> {
    let store = open_store(cli)?;

    store.delete_exact(key)?;
    tracing::debug!(key, "entry deleted");

    output::success(&format!("Deleted '{key}'"));
    Ok(())
}

/// Execute the regex delete command.
pub fn execute_matching(cli: &Cli, pattern: &str) -> Result<()> {
    let store = open_store(cli)?;

    let removed = store.delete_matching(pattern)?;
    tracing::debug!(pattern, count = removed.len(), "entries deleted");

    output::success(&format!(
        "Deleted {} entr{}: {}",
        removed.len(),
        if removed.len() == 1 { "y" } else { "ies" },
        removed.join(", ")
    ));
    Ok(())
}
