//! Key derivation: Argon2id adapter

use argon2::{Algorithm, Argon2, Params, Version};
use passwd_core::{PasswdError, PasswdResult};
use zeroize::Zeroizing;

/// Argon2 version number written into the `v=` field (0x13 = 19).
pub const ARGON2_VERSION: u32 = 0x13;

/// Derive a `key_len`-byte digest from a password and salt using Argon2id
/// v0x13.
///
/// Identical inputs always produce identical output. Cost and memory scale
/// with `time_cost * memory_cost_kib`; the memory is allocated and released
/// within the call. Parameters are passed through untouched: checking them
/// is the caller's job, and anything the primitive refuses surfaces as
/// `PasswdError::Kdf`.
pub fn derive(
    password: &[u8],
    salt: &[u8],
    time_cost: u32,
    memory_cost_kib: u32,
    parallelism: u8,
    key_len: u32,
) -> PasswdResult<Zeroizing<Vec<u8>>> {
    let params = Params::new(
        memory_cost_kib,
        time_cost,
        u32::from(parallelism),
        Some(key_len as usize),
    )
    .map_err(|e| PasswdError::Kdf(format!("invalid Argon2id params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut digest = Zeroizing::new(vec![0u8; key_len as usize]);
    argon2
        .hash_password_into(password, salt, &mut digest)
        .map_err(|e| PasswdError::Kdf(format!("Argon2id KDF failed: {e}")))?;

    Ok(digest)
}
