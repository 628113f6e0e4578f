use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crypto::KdfParams;
use crate::errors::{CachetteError, Result};

/// Argon2id cost settings read from `.cachette.toml`.
///
/// Only affects blobs written from now on: every existing store file
/// records the parameters it was encrypted with. Omitted fields fall back
/// to [`KdfParams::default`], and unknown fields are an error so a typo
/// cannot silently leave the defaults in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Memory cost in KiB.
    pub argon2_memory_kib: u32,
    pub argon2_iterations: u32,
    pub argon2_parallelism: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let params = KdfParams::default();
        Self {
            argon2_memory_kib: params.memory_kib,
            argon2_iterations: params.iterations,
            argon2_parallelism: params.parallelism,
        }
    }
}

impl Settings {
    pub const FILE_NAME: &'static str = ".cachette.toml";

    /// Read `<dir>/.cachette.toml`, or the defaults when there is none.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(Self::FILE_NAME);

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        toml::from_str(&contents).map_err(|e| {
            CachetteError::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }

    /// Whether the memory or time cost is below the built-in defaults.
    pub fn is_weaker_than_default(&self) -> bool {
        let defaults = Self::default();
        self.argon2_memory_kib < defaults.argon2_memory_kib
            || self.argon2_iterations < defaults.argon2_iterations
    }
}
