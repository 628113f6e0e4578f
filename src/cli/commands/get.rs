//! `cachette <FILE> <KEY>` — print a single value.

use std::io::{self, Write};

use crate::cli::{open_store, Cli};
use crate::errors::{CachetteError, Result};

/// Execute the get command.
///
/// The value is written raw, without a trailing newline, so it can be
/// captured by `$(...)` or piped into a clipboard tool.
pub fn execute(cli: &Cli, key: &str, exact: bool) -> Result<()> {
    let store = open_store(cli)?;

    tracing::debug!(key, exact, "looking up key");
    let value = store.get(key, exact)?;

    if value.is_empty() {
        return Err(CachetteError::EmptyValue(key.to_string()));
    }

    let mut stdout = io::stdout().lock();
    stdout.write_all(value.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
