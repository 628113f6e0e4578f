use thiserror::Error;

/// All errors that can occur in Cachette.
///
/// The three decryption-class variants (`DecryptionFailed`,
/// `MalformedInput`, `CorruptData`) share one user-facing message so a
/// password guesser learns nothing from the error text. The variant itself
/// still records the real cause.
#[derive(Debug, Error)]
pub enum CachetteError {
    // --- Envelope errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// The authentication tag did not verify: wrong password or tampering.
    #[error("wrong password or corrupted data")]
    DecryptionFailed,

    /// The bytes were never produced by the envelope (too short, bad magic,
    /// unknown version, out-of-range KDF parameters).
    #[error("wrong password or corrupted data")]
    MalformedInput(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Store errors ---
    /// Decrypted fine, but the content is not a JSON object of strings.
    #[error("wrong password or corrupted data")]
    CorruptData(String),

    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("key not found: {0}(fuzzy)")]
    FuzzyKeyNotFound(String),

    #[error("key not found: {0}(regex)")]
    NoMatch(String),

    #[error("invalid key pattern: {0}")]
    InvalidPattern(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- CLI errors ---
    #[error("no matched data")]
    EmptyValue(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),
}

impl CachetteError {
    /// True for every error reported as "wrong password or corrupted data".
    pub fn is_decryption_failure(&self) -> bool {
        matches!(
            self,
            Self::DecryptionFailed | Self::MalformedInput(_) | Self::CorruptData(_)
        )
    }

    /// True for every "key not found" flavour (exact, fuzzy, regex).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::KeyNotFound(_) | Self::FuzzyKeyNotFound(_) | Self::NoMatch(_)
        )
    }
}

/// Convenience type alias for Cachette results.
pub type Result<T> = std::result::Result<T, CachetteError>;
