//! PHC string format codec
//!
//! Canonical form:
//! ```text
//! $argon2id$v=19$m=<memory KiB>,t=<time>,p=<parallelism>$<base64 salt>$<base64 digest>
//! ```
//! The version-less form `$argon2id$m=..,t=..,p=..$<salt>$<digest>` is also
//! accepted on decode. Hashes in that form were derived over the base64 text
//! of the salt, not the decoded bytes; see [`EncodedHash::kdf_salt`].
//! Base64 is the standard alphabet with `=` padding. Salt and digest lengths
//! are implied by the decoded bytes.
//!
//! Reference: <https://github.com/P-H-C/phc-string-format/blob/master/phc-sf-spec.md>

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use passwd_core::{PasswdError, PasswdResult};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::kdf::ARGON2_VERSION;
use crate::params::{self, HashParameters};

/// The only algorithm identifier this format carries.
pub const ALGORITHM_ID: &str = "argon2id";

/// A parsed (or about to be serialized) PHC string.
///
/// Always names `argon2id`; decoding refuses anything else.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedHash {
    version: Option<u32>,
    memory_cost_kib: u32,
    time_cost: u32,
    parallelism: u8,
    salt: Vec<u8>,
    digest: Vec<u8>,
}

impl EncodedHash {
    /// Assemble a hash record for the current Argon2 version.
    pub fn new(params: &HashParameters, salt: &[u8], digest: &[u8]) -> Self {
        Self {
            version: Some(ARGON2_VERSION),
            memory_cost_kib: params.memory_cost_kib(),
            time_cost: params.time_cost(),
            parallelism: params.parallelism(),
            salt: salt.to_vec(),
            digest: digest.to_vec(),
        }
    }

    pub fn algorithm(&self) -> &'static str {
        ALGORITHM_ID
    }

    /// `None` for hashes stored in the version-less form.
    pub fn version(&self) -> Option<u32> {
        self.version
    }

    pub fn memory_cost_kib(&self) -> u32 {
        self.memory_cost_kib
    }

    pub fn time_cost(&self) -> u32 {
        self.time_cost
    }

    pub fn parallelism(&self) -> u8 {
        self.parallelism
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// The salt input Argon2id was run with.
    ///
    /// Versioned hashes use the raw salt bytes. Version-less hashes were
    /// produced over the salt's base64 text, which decoding only accepts in
    /// canonical form, so re-encoding reproduces it exactly.
    pub fn kdf_salt(&self) -> Cow<'_, [u8]> {
        match self.version {
            Some(_) => Cow::Borrowed(&self.salt),
            None => Cow::Owned(STANDARD.encode(&self.salt).into_bytes()),
        }
    }

    /// The full parameter set, with salt and key lengths taken from the
    /// stored bytes.
    pub fn params(&self) -> PasswdResult<HashParameters> {
        HashParameters::new(
            self.time_cost,
            self.memory_cost_kib,
            self.parallelism,
            self.salt.len() as u32,
            self.digest.len() as u32,
        )
        .map_err(|e| match e {
            PasswdError::InvalidConfig(msg) => PasswdError::MalformedHash(msg),
            other => other,
        })
    }
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${ALGORITHM_ID}")?;
        if let Some(version) = self.version {
            write!(f, "$v={version}")?;
        }
        write!(
            f,
            "$m={},t={},p={}${}${}",
            self.memory_cost_kib,
            self.time_cost,
            self.parallelism,
            STANDARD.encode(&self.salt),
            STANDARD.encode(&self.digest),
        )
    }
}

impl fmt::Debug for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedHash")
            .field("algorithm", &ALGORITHM_ID)
            .field("version", &self.version)
            .field("m", &self.memory_cost_kib)
            .field("t", &self.time_cost)
            .field("p", &self.parallelism)
            .field("salt_len", &self.salt.len())
            .field("digest", &"[REDACTED]")
            .finish()
    }
}

impl FromStr for EncodedHash {
    type Err = PasswdError;

    fn from_str(s: &str) -> PasswdResult<Self> {
        if s.trim().is_empty() {
            return Err(PasswdError::EmptyInput);
        }

        let rest = s
            .strip_prefix('$')
            .ok_or_else(|| malformed("missing leading '$'"))?;
        let segments: Vec<&str> = rest.split('$').collect();

        let algorithm = segments[0];
        if algorithm.is_empty()
            || !algorithm
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        {
            return Err(malformed("invalid algorithm identifier"));
        }
        if algorithm != ALGORITHM_ID {
            return Err(PasswdError::UnknownAlgorithm(algorithm.to_string()));
        }

        let has_version = segments.get(1).is_some_and(|seg| seg.starts_with("v="));
        let expected = if has_version { 5 } else { 4 };
        if segments.len() != expected {
            return Err(malformed(format!(
                "expected {expected} '$'-separated fields, found {}",
                segments.len()
            )));
        }

        let version = if has_version {
            let version = parse_version(segments[1])?;
            if version != ARGON2_VERSION {
                return Err(PasswdError::UnsupportedVersion(version));
            }
            Some(version)
        } else {
            None
        };

        let [param_block, salt_b64, digest_b64] = [
            segments[expected - 3],
            segments[expected - 2],
            segments[expected - 1],
        ];
        let salt = STANDARD.decode(salt_b64)?;
        let digest = STANDARD.decode(digest_b64)?;

        let (memory_cost_kib, time_cost, parallelism) = parse_params(param_block)?;

        params::check(
            time_cost,
            memory_cost_kib,
            parallelism,
            salt.len() as u32,
            digest.len() as u32,
        )
        .map_err(PasswdError::MalformedHash)?;

        Ok(Self {
            version,
            memory_cost_kib,
            time_cost,
            parallelism,
            salt,
            digest,
        })
    }
}

/// Serialize parameters, salt and digest into the canonical PHC string.
pub fn encode(params: &HashParameters, salt: &[u8], digest: &[u8]) -> String {
    EncodedHash::new(params, salt, digest).to_string()
}

/// Parse and validate a PHC string.
///
/// Costs are only checked against what Argon2id accepts, so `m` may be as
/// large as the primitive allows and verifying will allocate that much
/// memory. Stored hashes are treated as trusted input; callers reading them
/// from an untrusted source should bound `memory_cost_kib()` themselves.
pub fn decode(s: &str) -> PasswdResult<EncodedHash> {
    s.parse()
}

fn malformed(msg: impl Into<String>) -> PasswdError {
    PasswdError::MalformedHash(msg.into())
}

/// `v=<u32>`
fn parse_version(segment: &str) -> PasswdResult<u32> {
    let mut scanner = Scanner::new(segment);
    scanner.expect("v=")?;
    let version = scanner.number("v")?;
    scanner.finish()?;
    Ok(version)
}

/// `m=<u32>,t=<u32>,p=<u8>`, keys required and in exactly this order.
fn parse_params(segment: &str) -> PasswdResult<(u32, u32, u8)> {
    let mut scanner = Scanner::new(segment);
    scanner.expect("m=")?;
    let m = scanner.number("m")?;
    scanner.expect(",t=")?;
    let t = scanner.number("t")?;
    scanner.expect(",p=")?;
    let p = scanner.number("p")?;
    scanner.finish()?;

    let p = u8::try_from(p).map_err(|_| malformed(format!("p={p} does not fit in 8 bits")))?;
    Ok((m, t, p))
}

/// Minimal cursor over an ASCII parameter segment.
struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn expect(&mut self, token: &str) -> PasswdResult<()> {
        if !self.rest().starts_with(token) {
            return Err(malformed(format!(
                "expected '{token}' at offset {} in '{}'",
                self.pos, self.input
            )));
        }
        self.pos += token.len();
        Ok(())
    }

    /// Decimal digits only; no sign, no whitespace, no silent truncation.
    fn number(&mut self, key: &str) -> PasswdResult<u32> {
        let digits = self
            .rest()
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits == 0 {
            return Err(malformed(format!("{key}: expected a decimal value")));
        }

        let mut value: u32 = 0;
        for b in self.rest()[..digits].bytes() {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u32::from(b - b'0')))
                .ok_or_else(|| malformed(format!("{key}: value overflows 32 bits")))?;
        }
        self.pos += digits;
        Ok(value)
    }

    fn finish(self) -> PasswdResult<()> {
        if self.pos != self.input.len() {
            return Err(malformed(format!(
                "unexpected trailing input '{}'",
                self.rest()
            )));
        }
        Ok(())
    }
}
