//! Cryptographic primitives for Cachette.
//!
//! This module provides:
//! - The password-based AES-256-GCM envelope around a store file (`envelope`)
//! - Argon2id password-based key derivation (`kdf`)

pub mod envelope;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, KdfParams};
pub use envelope::{decrypt, encrypt, MIN_BLOB_LEN};
pub use kdf::{derive_key, generate_salt, KdfParams};
