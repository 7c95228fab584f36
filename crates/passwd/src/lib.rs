//! passwd: Argon2id password hashing with a self-describing PHC string
//!
//! Pipeline:
//! ```text
//! hash:   password → NFKC normalize → random salt → Argon2id → "$argon2id$v=19$m=..,t=..,p=..$salt$digest"
//! verify: PHC string → decode → NFKC normalize → Argon2id(stored salt, stored params) → constant-time compare
//! ```
//!
//! The PHC string carries every parameter needed to recompute the digest, so
//! callers only ever store that one string.

pub mod compare;
pub mod hasher;
pub mod kdf;
pub mod normalize;
pub mod params;
pub mod phc;
pub mod salt;

pub use hasher::{check, default_hasher, hash, verify, Hasher};
pub use kdf::{derive, ARGON2_VERSION};
pub use params::HashParameters;
pub use phc::{decode, encode, EncodedHash, ALGORITHM_ID};

pub use passwd_core::{
    HasherConfig, PasswdError, PasswdResult, DEFAULT_KEY_LEN, DEFAULT_MEMORY_KIB,
    DEFAULT_PARALLELISM, DEFAULT_SALT_LEN, DEFAULT_TIME,
};
