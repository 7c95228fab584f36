use thiserror::Error;

pub type PasswdResult<T> = Result<T, PasswdError>;

#[derive(Debug, Error)]
pub enum PasswdError {
    #[error("password is required")]
    PasswordRequired,

    #[error("password is not valid UTF-8: {0}")]
    InvalidPassword(#[from] std::str::Utf8Error),

    #[error("salt generation failed: {0}")]
    SaltGenerationFailed(#[source] rand::Error),

    #[error("encoded hash is empty")]
    EmptyInput,

    #[error("malformed hash: {0}")]
    MalformedHash(String),

    #[error("unknown password hashing algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("unsupported argon2 version: {0}")]
    UnsupportedVersion(u32),

    #[error("base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    #[error("password does not match")]
    VerificationMismatch,

    #[error("invalid hasher config: {0}")]
    InvalidConfig(String),

    #[error("key derivation failed: {0}")]
    Kdf(String),

    #[error("config error: {0}")]
    Config(String),
}

impl PasswdError {
    /// Only an exhausted entropy source is worth retrying; every other
    /// failure is a property of the inputs.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PasswdError::SaltGenerationFailed(_))
    }

    /// True when a stored hash was rejected before any password comparison,
    /// i.e. it is corrupt, foreign, or from an unsupported version.
    pub fn is_tampering(&self) -> bool {
        matches!(
            self,
            PasswdError::EmptyInput
                | PasswdError::MalformedHash(_)
                | PasswdError::UnknownAlgorithm(_)
                | PasswdError::UnsupportedVersion(_)
                | PasswdError::Base64Decode(_)
        )
    }
}
