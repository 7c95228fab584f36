use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PasswdError, PasswdResult};

/// Argon2id passes over memory (default: 2)
pub const DEFAULT_TIME: u32 = 2;
/// Argon2id memory cost in KiB (default: 65536 = 64 MiB)
pub const DEFAULT_MEMORY_KIB: u32 = 64 * 1024;
/// Argon2id lanes (default: 4)
pub const DEFAULT_PARALLELISM: u8 = 4;
/// Random salt length in bytes (default: 16)
pub const DEFAULT_SALT_LEN: u32 = 16;
/// Derived digest length in bytes (default: 32)
pub const DEFAULT_KEY_LEN: u32 = 32;

/// Hasher configuration (loadable from a TOML file).
///
/// Every field is optional in the file; anything left out takes the
/// documented default. Values are only checked when a hasher is built from
/// the config, never per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HasherConfig {
    /// Time cost (iterations)
    pub time: u32,
    /// Memory cost in KiB
    pub memory: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u8,
    /// Salt length in bytes
    pub salt_len: u32,
    /// Digest length in bytes
    pub key_len: u32,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            time: DEFAULT_TIME,
            memory: DEFAULT_MEMORY_KIB,
            parallelism: DEFAULT_PARALLELISM,
            salt_len: DEFAULT_SALT_LEN,
            key_len: DEFAULT_KEY_LEN,
        }
    }
}

impl HasherConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(s: &str) -> PasswdResult<Self> {
        toml::from_str(s).map_err(|e| PasswdError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> PasswdResult<String> {
        toml::to_string(self).map_err(|e| PasswdError::Config(e.to_string()))
    }
}

/// Load a hasher config from a TOML file on disk.
pub fn load_config(path: &Path) -> anyhow::Result<HasherConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading hasher config: {}", path.display()))?;
    let config = HasherConfig::from_toml_str(&text)
        .with_context(|| format!("parsing hasher config: {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        time = config.time,
        memory = config.memory,
        parallelism = config.parallelism,
        "loaded hasher config"
    );
    Ok(config)
}
