use crate::error::KeyMaterialError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::fmt::Debug;
use time::Duration;

//--------------------------------------------------------------------------------------------------
// Process-wide signing key and lifetime policy
//--------------------------------------------------------------------------------------------------

/// HS256 keys shorter than the hash output weaken the MAC
pub const MINIMUM_SECRET_BYTES: usize = 32;

#[derive(Clone)]
pub struct KeyMaterial {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

impl KeyMaterial {
    pub fn new(
        secret: &[u8],
        access_lifetime: Duration,
        refresh_lifetime: Duration,
    ) -> Result<Self, KeyMaterialError> {
        if secret.len() < MINIMUM_SECRET_BYTES {
            return Err(KeyMaterialError::SecretTooShort {
                actual: secret.len(),
                minimum: MINIMUM_SECRET_BYTES,
            });
        }

        if !access_lifetime.is_positive() {
            return Err(KeyMaterialError::AccessLifetimeNotPositive);
        }

        if refresh_lifetime <= access_lifetime {
            return Err(KeyMaterialError::RefreshLifetimeTooShort);
        }

        Ok(KeyMaterial {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            access_lifetime,
            refresh_lifetime,
        })
    }

    /// As `new`, with the secret given in standard base64 as it appears in configuration
    pub fn from_base64_secret(
        secret: &str,
        access_lifetime: Duration,
        refresh_lifetime: Duration,
    ) -> Result<Self, KeyMaterialError> {
        let secret = STANDARD
            .decode(secret.trim())
            .map_err(|_| KeyMaterialError::SecretNotBase64)?;

        Self::new(&secret, access_lifetime, refresh_lifetime)
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    pub fn access_lifetime(&self) -> Duration {
        self.access_lifetime
    }

    pub fn refresh_lifetime(&self) -> Duration {
        self.refresh_lifetime
    }
}

impl Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("secret", &"<redacted>")
            .field("access_lifetime", &self.access_lifetime)
            .field("refresh_lifetime", &self.refresh_lifetime)
            .finish()
    }
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
