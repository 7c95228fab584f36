//! passwd-core: shared types for the passwd workspace
//!
//! - `error`: the error taxonomy every hash/verify call reports through
//! - `config`: the hasher configuration schema, its defaults, and TOML loading

pub mod config;
pub mod error;

pub use config::{
    load_config, HasherConfig, DEFAULT_KEY_LEN, DEFAULT_MEMORY_KIB, DEFAULT_PARALLELISM,
    DEFAULT_SALT_LEN, DEFAULT_TIME,
};
pub use error::{PasswdError, PasswdResult};
