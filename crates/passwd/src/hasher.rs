//! Hasher facade: normalize → salt → Argon2id → PHC string, and back
//!
//! Blank-password policy: a password is rejected when its NFKC form has no
//! code points once surrounding whitespace is ignored. What gets hashed is
//! the untrimmed NFKC form, so `" secret "` and `"secret"` are different
//! passwords.

use std::sync::LazyLock;

use passwd_core::{HasherConfig, PasswdError, PasswdResult};
use rand::rngs::OsRng;
use rand::RngCore;
use secrecy::ExposeSecret;

use crate::compare;
use crate::kdf;
use crate::normalize;
use crate::params::HashParameters;
use crate::phc::{self, EncodedHash};
use crate::salt;

static DEFAULT_HASHER: LazyLock<Hasher> = LazyLock::new(Hasher::default);

/// An Argon2id password hasher with fixed parameters.
///
/// Holds no mutable state; one instance can serve any number of threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hasher {
    params: HashParameters,
}

impl Hasher {
    /// Build a hasher from a config, validating every value once here so
    /// that `hash` never fails because of its parameters.
    pub fn new(config: HasherConfig) -> PasswdResult<Self> {
        let params = HashParameters::try_from(&config)?;
        Ok(Self::with_params(params))
    }

    pub fn with_params(params: HashParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &HashParameters {
        &self.params
    }

    /// Hash a password into a PHC string with a freshly generated salt.
    pub fn hash(&self, password: impl AsRef<[u8]>) -> PasswdResult<String> {
        self.hash_with_rng(password.as_ref(), &mut OsRng)
    }

    pub(crate) fn hash_with_rng<R: RngCore>(
        &self,
        password: &[u8],
        rng: &mut R,
    ) -> PasswdResult<String> {
        let password = normalize::normalize_required(password)?;
        let salt = salt::generate_salt_from(rng, self.params.salt_len())?;

        let digest = kdf::derive(
            password.expose_secret(),
            &salt,
            self.params.time_cost(),
            self.params.memory_cost_kib(),
            self.params.parallelism(),
            self.params.key_len(),
        )?;

        tracing::debug!(
            m = self.params.memory_cost_kib(),
            t = self.params.time_cost(),
            p = self.params.parallelism(),
            "hashed password"
        );
        Ok(phc::encode(&self.params, &salt, &digest))
    }

    /// Check a password against a stored PHC string.
    ///
    /// `Ok(false)` means the password is wrong. A stored string that is
    /// corrupt, foreign, or of an unsupported version is an `Err` instead,
    /// so it can be told apart from a failed login.
    ///
    /// The stored string's own parameters are used, not this hasher's, and
    /// the stored memory cost is allocated as-is: stored hashes are trusted
    /// input (see [`phc::decode`]).
    pub fn verify(&self, password: impl AsRef<[u8]>, encoded: &str) -> PasswdResult<bool> {
        let password = normalize::normalize_required(password.as_ref())?;
        let stored = decode_stored(encoded)?;

        let computed = kdf::derive(
            password.expose_secret(),
            &stored.kdf_salt(),
            stored.time_cost(),
            stored.memory_cost_kib(),
            stored.parallelism(),
            stored.digest().len() as u32,
        )?;

        let matched = compare::equal(&computed, stored.digest());
        tracing::debug!(
            m = stored.memory_cost_kib(),
            t = stored.time_cost(),
            p = stored.parallelism(),
            matched,
            "verified password"
        );
        Ok(matched)
    }

    /// Like [`Hasher::verify`], but a wrong password is
    /// `Err(PasswdError::VerificationMismatch)`.
    pub fn check(&self, password: impl AsRef<[u8]>, encoded: &str) -> PasswdResult<()> {
        if self.verify(password, encoded)? {
            Ok(())
        } else {
            Err(PasswdError::VerificationMismatch)
        }
    }
}

fn decode_stored(encoded: &str) -> PasswdResult<EncodedHash> {
    phc::decode(encoded).inspect_err(|e| {
        tracing::warn!("rejected stored password hash: {e}");
    })
}

/// The process-wide hasher with default parameters
/// (t=2, m=64 MiB, p=4, 16-byte salt, 32-byte digest).
pub fn default_hasher() -> &'static Hasher {
    &DEFAULT_HASHER
}

/// Hash a password with the default hasher.
pub fn hash(password: impl AsRef<[u8]>) -> PasswdResult<String> {
    default_hasher().hash(password)
}

/// Verify a password with the default hasher.
pub fn verify(password: impl AsRef<[u8]>, encoded: &str) -> PasswdResult<bool> {
    default_hasher().verify(password, encoded)
}

/// Verify a password with the default hasher, reporting a mismatch as an error.
pub fn check(password: impl AsRef<[u8]>, encoded: &str) -> PasswdResult<()> {
    default_hasher().check(password, encoded)
}
