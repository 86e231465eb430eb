use crate::error::TokenError;
use crate::internal::claims::ClaimSet;
use crate::keys::KeyMaterial;
use crate::SignedToken;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use std::collections::HashSet;
use tracing::debug;

//--------------------------------------------------------------------------------------------------
// Token codec
//--------------------------------------------------------------------------------------------------

/// Turns claims into a signed `header.payload.signature` string and back. Only checks that a
/// token is intact, never whether it is still usable.
#[derive(Clone, Debug)]
pub struct TokenCodec {
    keys: KeyMaterial,
    header: Header,
    validation: Validation,
}

const ALGORITHM: Algorithm = Algorithm::HS256;

impl TokenCodec {
    pub fn new(keys: KeyMaterial) -> Self {
        // Expiry belongs to the service, so all registered-claim checks are switched off here
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();
        validation.leeway = 0;

        TokenCodec {
            keys,
            header: Header::new(ALGORITHM),
            validation,
        }
    }

    pub fn keys(&self) -> &KeyMaterial {
        &self.keys
    }

    pub fn encode(&self, claims: &ClaimSet) -> Result<SignedToken, TokenError> {
        let token = encode(&self.header, claims, self.keys.encoding_key())
            .map_err(|err| TokenError::Signing(err.to_string()))?;

        Ok(SignedToken::from(token))
    }

    pub fn decode(&self, token: &SignedToken) -> Result<ClaimSet, TokenError> {
        let claims = decode::<ClaimSet>(token.as_str(), self.keys.decoding_key(), &self.validation)
            .map_err(|err| match err.kind() {
                ErrorKind::InvalidSignature => {
                    debug!("Token signature did not match");
                    TokenError::SignatureInvalid
                }
                kind => {
                    debug!("Token could not be decoded: {:?}", kind);
                    TokenError::Malformed
                }
            })?
            .claims;

        if !claims.is_well_formed() {
            debug!("Token for {} does not expire after it was issued", claims.sub());
            return Err(TokenError::Malformed);
        }

        Ok(claims)
    }
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
