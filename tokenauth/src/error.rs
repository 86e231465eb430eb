use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Token errors
//--------------------------------------------------------------------------------------------------

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    SignatureInvalid,
    #[error("token has expired")]
    Expired,
    #[error("token is not a refresh token")]
    NotARefreshToken,
    #[error("principal not found")]
    PrincipalNotFound,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl TokenError {
    /// Malformed and tampered tokens are one outcome to anyone outside the engine, so callers can
    /// not learn which check failed
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, TokenError::Malformed | TokenError::SignatureInvalid)
    }
}

//--------------------------------------------------------------------------------------------------
// Key material errors
//--------------------------------------------------------------------------------------------------

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyMaterialError {
    #[error("signing secret is not valid base64")]
    SecretNotBase64,
    #[error("signing secret is {actual} bytes, at least {minimum} are required")]
    SecretTooShort { actual: usize, minimum: usize },
    #[error("access token lifetime must be positive")]
    AccessLifetimeNotPositive,
    #[error("refresh token lifetime must be longer than the access token lifetime")]
    RefreshLifetimeTooShort,
}

//--------------------------------------------------------------------------------------------------
