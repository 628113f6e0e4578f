//! CLI module — Clap argument parser, password prompts, output helpers,
//! and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{CachetteError, Result};
use crate::store::{self, Store};

/// Password-protected encrypted key-value store.
///
/// With only FILE, every entry is listed. With FILE KEY, the value of the
/// best matching key is printed. With FILE KEY VALUE, the entry is set.
#[derive(Parser)]
#[command(
    name = "cachette",
    about = "Password-protected encrypted key-value store",
    version
)]
pub struct Cli {
    /// Store file (created if it does not exist)
    pub file: PathBuf,

    /// Key to look up, or to set when VALUE is given
    pub key: Option<String>,

    /// Value to store under KEY
    pub value: Option<String>,

    /// Store password (prompted for if omitted)
    #[arg(short = 'p', env = "CACHETTE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Delete the entry with exactly this key
    #[arg(
        short = 'd',
        value_name = "KEY",
        conflicts_with_all = ["key", "delete_matching"]
    )]
    pub delete: Option<String>,

    /// Delete every entry whose key matches this regular expression
    #[arg(short = 'D', value_name = "REGEX", conflicts_with = "key")]
    pub delete_matching: Option<String>,

    /// Exact key match (lookups are fuzzy by default)
    #[arg(short = 'e')]
    pub exact: bool,

    /// Print debug diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// The single operation an invocation asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    List,
    Get { key: &'a str, exact: bool },
    Set { key: &'a str, value: &'a str },
    Delete { key: &'a str },
    DeleteMatching { pattern: &'a str },
}

impl Cli {
    /// Work out which operation the arguments select.
    pub fn action(&self) -> Action<'_> {
        match (&self.key, &self.value) {
            (Some(key), Some(value)) => Action::Set { key, value },
            (Some(key), None) => Action::Get {
                key,
                exact: self.exact,
            },
            (None, _) => match (&self.delete, &self.delete_matching) {
                (Some(key), _) => Action::Delete { key },
                (None, Some(pattern)) => Action::DeleteMatching { pattern },
                (None, None) => Action::List,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Install the `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// events with `--verbose`. Events never carry secret values.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "cachette=debug"
    } else {
        "cachette=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Get the store password, trying in order:
/// 1. `-p` / `CACHETTE_PASSWORD`
/// 2. Interactive prompt (with confirmation when `creating` a new store)
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn resolve_password(cli: &Cli, creating: bool) -> Result<Zeroizing<String>> {
    if let Some(pw) = &cli.password {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw.clone()));
        }
    }

    if creating {
        prompt_new_password()
    } else {
        prompt_password()
    }
}

/// Prompt for the password of an existing store.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt("password")
        .interact()
        .map_err(|e| CachetteError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for the password of a store that is about to be created.
///
/// Asks twice so a typo cannot lock the user out of a fresh store.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt("new store password")
        .with_confirmation("confirm password", "passwords do not match, try again")
        .interact()
        .map_err(|e| CachetteError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Open (and if necessary create) the store named on the command line.
///
/// KDF parameters for newly written blobs come from `.cachette.toml` in
/// the current directory.
pub fn open_store(cli: &Cli) -> Result<Store> {
    let creating = store::needs_initialization(&cli.file)?;
    let password = resolve_password(cli, creating)?;
    let settings = Settings::load(&std::env::current_dir()?)?;

    tracing::debug!(path = %cli.file.display(), creating, "opening store");
    let store = Store::open_with_params(&cli.file, &password, settings.kdf_params())?;

    if creating {
        output::info(&format!("Initialized new store at {}", cli.file.display()));
    }
    if settings.is_weaker_than_default() {
        output::warning(&format!(
            "{} sets Argon2 costs below the defaults; the store is easier to brute-force",
            Settings::FILE_NAME
        ));
    }
    Ok(store)
}
