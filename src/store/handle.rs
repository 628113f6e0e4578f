//! High-level store operations used by CLI commands.
//!
//! `Store` keeps no decrypted state between calls: every operation reads
//! and decrypts the file, and every mutation re-encrypts the whole mapping
//! and replaces the file atomically. The file is the only source of truth.

use std::path::{Path, PathBuf};

use parking_lot::ReentrantMutex;
use zeroize::Zeroizing;

use super::file;
use super::matching;
use super::record::{self, Secrets};
use super::transaction::{Applied, Mutation, Transaction};
use crate::crypto::{envelope, KdfParams};
use crate::errors::{CachetteError, Result};

/// Handle to one encrypted store file.
///
/// The per-instance lock serializes operations across threads of one
/// process. It is reentrant, so a thread holding an open [`Transaction`]
/// can still call the other methods. It does nothing against other
/// processes writing the same file.
pub struct Store {
    /// Path to the store file on disk.
    path: PathBuf,

    /// Password for every encrypt and decrypt (zeroized on drop).
    password: Zeroizing<String>,

    /// Argon2id parameters used whenever the file is re-encrypted.
    params: KdfParams,

    lock: ReentrantMutex<()>,
}

impl Store {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open the store at `path` with the default KDF parameters,
    /// initializing the file if needed.
    pub fn open(path: impl Into<PathBuf>, password: &str) -> Result<Self> {
        Self::open_with_params(path, password, KdfParams::default())
    }

    /// Open the store at `path`, initializing the file if needed.
    ///
    /// `params` only affects how the file is encrypted from now on; an
    /// existing blob records its own parameters for decryption.
    pub fn open_with_params(
        path: impl Into<PathBuf>,
        password: &str,
        params: KdfParams,
    ) -> Result<Self> {
        params.validate()?;

        let store = Self {
            path: path.into(),
            password: Zeroizing::new(password.to_string()),
            params,
            lock: ReentrantMutex::new(()),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Write an encrypted empty mapping if the file is missing or too
    /// small to hold a blob. Returns whether anything was written.
    ///
    /// Calling it again on an initialized file does nothing.
    pub fn initialize(&self) -> Result<bool> {
        let _guard = self.lock.lock();
        if !file::needs_initialization(&self.path)? {
            return Ok(false);
        }
        self.persist(&Secrets::new())?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Decrypt and return the whole mapping, sorted by key.
    pub fn list_all(&self) -> Result<Secrets> {
        let _guard = self.lock.lock();
        self.load()
    }

    /// Look up a value.
    ///
    /// With `exact`, `key` must match verbatim. Otherwise the first key in
    /// sorted order that contains the characters of `key` in order wins
    /// (see [`matching::fuzzy_pattern`]).
    pub fn get(&self, key: &str, exact: bool) -> Result<String> {
        let mut secrets = self.list_all()?;

        if exact {
            return secrets
                .remove(key)
                .ok_or_else(|| CachetteError::KeyNotFound(key.to_string()));
        }

        let found = matching::first_fuzzy_match(&secrets, key)?.map(str::to_string);
        found
            .and_then(|k| secrets.remove(&k))
            .ok_or_else(|| CachetteError::FuzzyKeyNotFound(key.to_string()))
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Insert or overwrite `key`.
    pub fn set(&self, key: &str, value: &str) -> Result<Applied> {
        self.update(&Mutation::Set { key, value })
    }

    /// Remove exactly `key`. The file is not written if `key` is absent.
    pub fn delete_exact(&self, key: &str) -> Result<()> {
        self.update(&Mutation::Delete { key }).map(|_| ())
    }

    /// Remove every key the regular expression `pattern` finds a match in.
    /// Returns the removed keys in sorted order.
    pub fn delete_matching(&self, pattern: &str) -> Result<Vec<String>> {
        match self.update(&Mutation::DeleteMatching { pattern })? {
            Applied::Removed(keys) => Ok(keys),
            Applied::Inserted | Applied::Updated => Ok(Vec::new()),
        }
    }

    /// Run one mutation as a complete transaction.
    pub fn update(&self, mutation: &Mutation<'_>) -> Result<Applied> {
        let mut tx = self.begin()?;
        let applied = tx.apply(mutation)?;
        tx.commit()?;
        Ok(applied)
    }

    /// Lock the store and decrypt its mapping into a new transaction.
    ///
    /// Other threads block on the store until the transaction is committed
    /// or dropped. The owning thread does not: its reads see the file as
    /// last written, not the uncommitted working copy, and any write it
    /// makes directly through the store is overwritten when the
    /// transaction commits.
    pub fn begin(&self) -> Result<Transaction<'_>> {
        let guard = self.lock.lock();
        let secrets = self.load()?;
        Ok(Transaction::new(self, guard, secrets))
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the KDF parameters used when re-encrypting.
    pub fn kdf_params(&self) -> KdfParams {
        self.params
    }

    // ------------------------------------------------------------------
    // Persistence (callers hold the lock)
    // ------------------------------------------------------------------

    fn load(&self) -> Result<Secrets> {
        let blob = file::read_blob(&self.path)?;
        let plaintext = Zeroizing::new(envelope::decrypt(&blob, &self.password)?);
        record::parse(&plaintext)
    }

    pub(super) fn persist(&self, secrets: &Secrets) -> Result<()> {
        let plaintext = Zeroizing::new(record::serialize(secrets)?);
        let blob = envelope::encrypt(&plaintext, &self.password, &self.params)?;
        file::write_blob(&self.path, &blob)
    }
}
