//! Salt generation from the OS entropy source

use passwd_core::{PasswdError, PasswdResult};
use rand::rngs::OsRng;
use rand::RngCore;

/// Generate `len` bytes of salt from the operating system CSPRNG.
///
/// There is no fallback source: if the OS cannot supply entropy the call
/// fails with `SaltGenerationFailed`, which callers may retry.
pub fn generate_salt(len: u32) -> PasswdResult<Vec<u8>> {
    generate_salt_from(&mut OsRng, len)
}

pub(crate) fn generate_salt_from<R: RngCore>(rng: &mut R, len: u32) -> PasswdResult<Vec<u8>> {
    let mut salt = vec![0u8; len as usize];
    rng.try_fill_bytes(&mut salt).map_err(|e| {
        tracing::warn!("entropy source failed: {e}");
        PasswdError::SaltGenerationFailed(e)
    })?;
    Ok(salt)
}

/// An entropy source that always fails, for exercising error paths.
#[cfg(test)]
pub(crate) struct ExhaustedRng;

#[cfg(test)]
impl RngCore for ExhaustedRng {
    fn next_u32(&mut self) -> u32 {
        panic!("entropy source exhausted")
    }

    fn next_u64(&mut self) -> u64 {
        panic!("entropy source exhausted")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        panic!("entropy source exhausted")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new(std::io::Error::new(
            std::io::ErrorKind::Other,
            "entropy source exhausted",
        )))
    }
}
