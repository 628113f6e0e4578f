//! Read-modify-write transactions over a store file.
//!
//! A `Transaction` holds the store's lock and a decrypted working copy of
//! the mapping. Mutations are applied to the copy one at a time; nothing
//! reaches the disk until `commit`. Dropping the transaction instead
//! discards the copy and leaves the file byte-for-byte as it was.

use parking_lot::ReentrantMutexGuard;

use super::handle::Store;
use super::matching;
use super::record::Secrets;
use crate::errors::{CachetteError, Result};

/// One named change to the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation<'a> {
    /// Insert `key`, or overwrite its value if present.
    Set { key: &'a str, value: &'a str },
    /// Remove exactly `key`.
    Delete { key: &'a str },
    /// Remove every key the regular expression `pattern` matches.
    DeleteMatching { pattern: &'a str },
}

/// What a successfully applied mutation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Inserted,
    Updated,
    /// The removed keys, in sorted order.
    Removed(Vec<String>),
}

/// An open transaction. See the module docs.
pub struct Transaction<'s> {
    store: &'s Store,
    secrets: Secrets,
    dirty: bool,
    _guard: ReentrantMutexGuard<'s, ()>,
}

impl<'s> Transaction<'s> {
    pub(super) fn new(
        store: &'s Store,
        guard: ReentrantMutexGuard<'s, ()>,
        secrets: Secrets,
    ) -> Self {
        Self {
            store,
            secrets,
            dirty: false,
            _guard: guard,
        }
    }

    /// The working copy, including mutations applied so far.
    pub fn secrets(&self) -> &Secrets {
        &self.secrets
    }

    /// Apply one mutation to the working copy.
    ///
    /// A failed mutation leaves the working copy unchanged.
    pub fn apply(&mut self, mutation: &Mutation<'_>) -> Result<Applied> {
        let applied = match *mutation {
            Mutation::Set { key, value } => {
                if key.is_empty() {
                    return Err(CachetteError::InvalidKey("key cannot be empty".into()));
                }
                match self.secrets.insert(key.to_string(), value.to_string()) {
                    Some(_) => Applied::Updated,
                    None => Applied::Inserted,
                }
            }
            Mutation::Delete { key } => {
                if self.secrets.remove(key).is_none() {
                    return Err(CachetteError::KeyNotFound(key.to_string()));
                }
                Applied::Removed(vec![key.to_string()])
            }
            Mutation::DeleteMatching { pattern } => {
                let re = matching::key_pattern(pattern)?;
                let doomed = matching::matching_keys(&self.secrets, &re);
                if doomed.is_empty() {
                    return Err(CachetteError::NoMatch(pattern.to_string()));
                }
                for key in &doomed {
                    self.secrets.remove(key);
                }
                Applied::Removed(doomed)
            }
        };

        self.dirty = true;
        Ok(applied)
    }

    /// Encrypt the working copy and atomically replace the file.
    ///
    /// A transaction with no applied mutations writes nothing.
    pub fn commit(self) -> Result<()> {
        if self.dirty {
            self.store.persist(&self.secrets)?;
        }
        Ok(())
    }
}
