//! Validated Argon2id hash parameters

use argon2::Params;
use passwd_core::{
    HasherConfig, PasswdError, PasswdResult, DEFAULT_KEY_LEN, DEFAULT_MEMORY_KIB,
    DEFAULT_PARALLELISM, DEFAULT_SALT_LEN, DEFAULT_TIME,
};

/// Shortest salt the Argon2 primitive accepts.
pub const MIN_SALT_LEN: u32 = 8;

/// Below this memory cost (KiB) Argon2id is no longer considered memory-hard
/// for password storage (OWASP floor for t=2).
pub const RECOMMENDED_MIN_MEMORY_KIB: u32 = 19 * 1024;

/// Argon2id cost parameters plus salt and digest sizes.
///
/// Only constructible through validation, so any value in hand is one the
/// primitive will accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashParameters {
    time_cost: u32,
    memory_cost_kib: u32,
    parallelism: u8,
    salt_len: u32,
    key_len: u32,
}

impl HashParameters {
    pub fn new(
        time_cost: u32,
        memory_cost_kib: u32,
        parallelism: u8,
        salt_len: u32,
        key_len: u32,
    ) -> PasswdResult<Self> {
        check(time_cost, memory_cost_kib, parallelism, salt_len, key_len)
            .map_err(PasswdError::InvalidConfig)?;

        if memory_cost_kib < RECOMMENDED_MIN_MEMORY_KIB {
            tracing::warn!(
                memory_cost_kib,
                recommended = RECOMMENDED_MIN_MEMORY_KIB,
                "Argon2id memory cost is below the recommended minimum"
            );
        }

        Ok(Self {
            time_cost,
            memory_cost_kib,
            parallelism,
            salt_len,
            key_len,
        })
    }

    pub fn time_cost(&self) -> u32 {
        self.time_cost
    }

    pub fn memory_cost_kib(&self) -> u32 {
        self.memory_cost_kib
    }

    pub fn parallelism(&self) -> u8 {
        self.parallelism
    }

    pub fn salt_len(&self) -> u32 {
        self.salt_len
    }

    pub fn key_len(&self) -> u32 {
        self.key_len
    }
}

impl Default for HashParameters {
    fn default() -> Self {
        Self {
            time_cost: DEFAULT_TIME,
            memory_cost_kib: DEFAULT_MEMORY_KIB,
            parallelism: DEFAULT_PARALLELISM,
            salt_len: DEFAULT_SALT_LEN,
            key_len: DEFAULT_KEY_LEN,
        }
    }
}

impl TryFrom<&HasherConfig> for HashParameters {
    type Error = PasswdError;

    fn try_from(config: &HasherConfig) -> PasswdResult<Self> {
        Self::new(
            config.time,
            config.memory,
            config.parallelism,
            config.salt_len,
            config.key_len,
        )
    }
}

impl From<HashParameters> for HasherConfig {
    fn from(params: HashParameters) -> Self {
        HasherConfig {
            time: params.time_cost,
            memory: params.memory_cost_kib,
            parallelism: params.parallelism,
            salt_len: params.salt_len,
            key_len: params.key_len,
        }
    }
}

/// Shared by construction-time validation and PHC decoding: reports why
/// the Argon2id primitive would refuse these values.
pub(crate) fn check(
    time_cost: u32,
    memory_cost_kib: u32,
    parallelism: u8,
    salt_len: u32,
    key_len: u32,
) -> Result<(), String> {
    if time_cost == 0 {
        return Err("time cost must be greater than zero".into());
    }
    if memory_cost_kib == 0 {
        return Err("memory cost must be greater than zero".into());
    }
    if parallelism == 0 {
        return Err("parallelism must be greater than zero".into());
    }
    if salt_len < MIN_SALT_LEN {
        return Err(format!(
            "salt length {salt_len} is below the minimum of {MIN_SALT_LEN} bytes"
        ));
    }
    Params::new(
        memory_cost_kib,
        time_cost,
        u32::from(parallelism),
        Some(key_len as usize),
    )
    .map(|_| ())
    .map_err(|e| format!("rejected by Argon2id: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let d = HashParameters::default();
        let validated = HashParameters::new(
            d.time_cost(),
            d.memory_cost_kib(),
            d.parallelism(),
            d.salt_len(),
            d.key_len(),
        )
        .unwrap();
        assert_eq!(d, validated);
        assert_eq!(d.time_cost(), 2);
        assert_eq!(d.memory_cost_kib(), 65536);
        assert_eq!(d.parallelism(), 4);
        assert_eq!(d.salt_len(), 16);
        assert_eq!(d.key_len(), 32);
    }

    #[test]
    fn test_from_config() {
        let config = HasherConfig {
            time: 10,
            salt_len: 32,
            key_len: 100,
            ..HasherConfig::default()
        };
        let params = HashParameters::try_from(&config).unwrap();
        assert_eq!(params.time_cost(), 10);
        assert_eq!(params.salt_len(), 32);
        assert_eq!(params.key_len(), 100);
        assert_eq!(HasherConfig::from(params), config);
    }

    #[test]
    fn test_zero_fields_rejected() {
        let cases = [
            (0, 65536, 4, 16, 32),
            (2, 0, 4, 16, 32),
            (2, 65536, 0, 16, 32),
            (2, 65536, 4, 0, 32),
            (2, 65536, 4, 16, 0),
        ];
        for (t, m, p, s, k) in cases {
            let result = HashParameters::new(t, m, p, s, k);
            assert!(
                matches!(result, Err(PasswdError::InvalidConfig(_))),
                "({t}, {m}, {p}, {s}, {k}) must be rejected"
            );
        }
    }

    #[test]
    fn test_memory_must_cover_lanes() {
        // Argon2 needs at least 8 KiB per lane
        assert!(HashParameters::new(1, 31, 4, 16, 32).is_err());
        assert!(HashParameters::new(1, 32, 4, 16, 32).is_ok());
    }

    #[test]
    fn test_short_salt_and_key_rejected() {
        assert!(HashParameters::new(1, 64, 1, 7, 32).is_err());
        assert!(HashParameters::new(1, 64, 1, 8, 32).is_ok());
        assert!(HashParameters::new(1, 64, 1, 16, 3).is_err());
        assert!(HashParameters::new(1, 64, 1, 16, 4).is_ok());
    }
}
