//! Store module — the encrypted key-value file.
//!
//! This module provides:
//! - The `Secrets` mapping and its JSON encoding (`record`)
//! - Fuzzy and regex key matching (`matching`)
//! - Atomic whole-file reads and writes (`file`)
//! - `Transaction` and the named `Mutation`s it applies (`transaction`)
//! - The high-level `Store` handle used by the CLI (`handle`)

pub mod file;
pub mod handle;
pub mod matching;
pub mod record;
pub mod transaction;

// Re-export the most commonly used items.
pub use file::needs_initialization;
pub use handle::Store;
pub use record::Secrets;
pub use transaction::{Applied, Mutation, Transaction};
