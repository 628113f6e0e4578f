//! Password-based AES-256-GCM envelope.
//!
//! `encrypt` turns a plaintext string into a self-contained blob that is
//! written verbatim as the store file; `decrypt` reverses it using nothing
//! but the blob and the password.
//!
//! Blob layout:
//!
//! ```text
//! [CACH: 4][version: 1][m_kib: 4 LE][t: 4 LE][p: 4 LE][salt: 32][nonce: 12][ciphertext + tag: n + 16]
//! ```
//!
//! - **Magic** (`CACH`) and **version** identify the blob.
//! - **m_kib / t / p**: Argon2id memory cost, iterations and lanes.
//! - **Salt**: fresh per call, fed to Argon2id with the password.
//! - **Nonce**: fresh per call, for AES-256-GCM.
//!
//! The whole header (everything before the ciphertext) is bound to the
//! ciphertext as AES-GCM associated data.

use aes_gcm::aead::{Aead, KeyInit, OsRng, Payload};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use zeroize::Zeroize;

use super::kdf::{derive_key, generate_salt, KdfParams, SALT_LEN};
use crate::errors::{CachetteError, Result};

/// Magic bytes at the start of every blob.
const MAGIC: &[u8; 4] = b"CACH";

/// Current blob format version.
pub const CURRENT_VERSION: u8 = 1;

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Size of the AES-GCM authentication tag in bytes.
const TAG_LEN: usize = 16;

const PARAMS_OFFSET: usize = 5;
const SALT_OFFSET: usize = PARAMS_OFFSET + 12;
const NONCE_OFFSET: usize = SALT_OFFSET + SALT_LEN;

/// Everything before the ciphertext.
pub const HEADER_LEN: usize = NONCE_OFFSET + NONCE_LEN;

/// The smallest blob `decrypt` can accept: a header plus an empty
/// ciphertext's tag. Anything shorter cannot be a product of `encrypt`.
pub const MIN_BLOB_LEN: usize = HEADER_LEN + TAG_LEN;

/// Encrypt `plaintext` under `password`.
///
/// Every call draws a new salt and nonce, so encrypting the same
/// plaintext twice never yields the same bytes.
pub fn encrypt(plaintext: &str, password: &str, params: &KdfParams) -> Result<Vec<u8>> {
    let salt = generate_salt();
    let key = derive_key(password.as_bytes(), &salt, params)?;

    let cipher = Aes256Gcm::new_from_slice(&key[..])
        .map_err(|e| CachetteError::EncryptionFailed(format!("invalid key length: {e}")))?;
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let mut header = Vec::with_capacity(HEADER_LEN);
    header.extend_from_slice(MAGIC);
    header.push(CURRENT_VERSION);
    header.extend_from_slice(&params.memory_kib.to_le_bytes());
    header.extend_from_slice(&params.iterations.to_le_bytes());
    header.extend_from_slice(&params.parallelism.to_le_bytes());
    header.extend_from_slice(&salt);
    header.extend_from_slice(&nonce);

    let ciphertext = cipher
        .encrypt(
            &nonce,
            Payload {
                msg: plaintext.as_bytes(),
                aad: &header,
            },
        )
        .map_err(|e| CachetteError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = header;
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt a blob produced by `encrypt`.
///
/// Returns `MalformedInput` when the bytes are structurally not a blob,
/// `DecryptionFailed` when authentication fails, and `CorruptData` when
/// the authenticated plaintext is not UTF-8.
pub fn decrypt(blob: &[u8], password: &str) -> Result<String> {
    let params = parse_header(blob)?;

    let (header, ciphertext) = blob.split_at(HEADER_LEN);
    let salt = &header[SALT_OFFSET..NONCE_OFFSET];
    let nonce = Nonce::from_slice(&header[NONCE_OFFSET..HEADER_LEN]);

    let key = derive_key(password.as_bytes(), salt, &params)?;
    let cipher = Aes256Gcm::new_from_slice(&key[..])
        .map_err(|_| CachetteError::DecryptionFailed)?;

    let plaintext = cipher
        .decrypt(
            nonce,
            Payload {
                msg: ciphertext,
                aad: header,
            },
        )
        .map_err(|_| CachetteError::DecryptionFailed)?;

    String::from_utf8(plaintext).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        CachetteError::CorruptData("decrypted content is not valid UTF-8".into())
    })
}

/// Check the fixed-size header and return the KDF parameters it carries.
fn parse_header(blob: &[u8]) -> Result<KdfParams> {
    if blob.len() < MIN_BLOB_LEN {
        return Err(CachetteError::MalformedInput(format!(
            "blob is {} bytes, at least {MIN_BLOB_LEN} required",
            blob.len()
        )));
    }

    if &blob[0..4] != MAGIC {
        return Err(CachetteError::MalformedInput(
            "missing CACH magic bytes".into(),
        ));
    }

    let version = blob[4];
    if version != CURRENT_VERSION {
        return Err(CachetteError::MalformedInput(format!(
            "unsupported version {version}, expected {CURRENT_VERSION}"
        )));
    }

    let params = KdfParams {
        memory_kib: read_u32_le(blob, PARAMS_OFFSET),
        iterations: read_u32_le(blob, PARAMS_OFFSET + 4),
        parallelism: read_u32_le(blob, PARAMS_OFFSET + 8),
    };
    params
        .validate()
        .map_err(|e| CachetteError::MalformedInput(e.to_string()))?;

    Ok(params)
}

fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}
