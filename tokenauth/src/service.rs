use crate::codec::TokenCodec;
use crate::directory::UserDirectory;
use crate::error::TokenError;
use crate::internal::claims::ClaimSet;
use crate::internal::unixtime::{Clock, SystemClock, UnixMillis};
use crate::keys::KeyMaterial;
use crate::refresh::RefreshFlow;
use crate::{SignedToken, Subject, TokenKind, TokenPair};
use std::fmt::Debug;
use std::sync::Arc;
use time::Duration;
use tracing::debug;

//--------------------------------------------------------------------------------------------------
// Token service
//--------------------------------------------------------------------------------------------------

/// Mints tokens and answers whether a presented token may be used. Holds no per-token state, so
/// one instance can be shared by every request.
#[derive(Clone)]
pub struct TokenService {
    codec: TokenCodec,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    pub fn new(keys: KeyMaterial) -> Self {
        Self::with_clock(keys, Arc::new(SystemClock))
    }

    pub fn with_clock(keys: KeyMaterial, clock: Arc<dyn Clock>) -> Self {
        TokenService {
            codec: TokenCodec::new(keys),
            clock,
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn now(&self) -> UnixMillis {
        self.clock.now()
    }

    pub fn access_lifetime(&self) -> Duration {
        self.codec.keys().access_lifetime()
    }

    pub fn refresh_lifetime(&self) -> Duration {
        self.codec.keys().refresh_lifetime()
    }

    fn lifetime(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_lifetime(),
            TokenKind::Refresh => self.refresh_lifetime(),
        }
    }

    //----------------------------------------------------------------------------------------------
    // Minting
    //----------------------------------------------------------------------------------------------

    fn mint_at(
        &self,
        subject: &Subject,
        kind: TokenKind,
        issued_at: UnixMillis,
    ) -> Result<SignedToken, TokenError> {
        // KeyMaterial only accepts positive lifetimes, so this only fails if that is bypassed
        let claims = ClaimSet::new(subject.clone(), kind, issued_at, self.lifetime(kind))
            .ok_or_else(|| TokenError::Signing(format!("{:?} lifetime is not positive", kind)))?;

        let token = self.codec.encode(&claims)?;

        debug!("Minted {:?} token for {}", kind, subject);

        Ok(token)
    }

    pub fn mint_access_token(&self, subject: &Subject) -> Result<SignedToken, TokenError> {
        self.mint_at(subject, TokenKind::Access, self.now())
    }

    pub fn mint_refresh_token(&self, subject: &Subject) -> Result<SignedToken, TokenError> {
        self.mint_at(subject, TokenKind::Refresh, self.now())
    }

    /// Both tokens share one issue instant
    pub fn mint_token_pair(&self, subject: &Subject) -> Result<TokenPair, TokenError> {
        let issued_at = self.now();

        Ok(TokenPair {
            access_token: self.mint_at(subject, TokenKind::Access, issued_at)?,
            refresh_token: self.mint_at(subject, TokenKind::Refresh, issued_at)?,
        })
    }

    //----------------------------------------------------------------------------------------------
    // Validation and classification, never fail
    //----------------------------------------------------------------------------------------------

    /// Intact and not yet expired
    pub fn is_structurally_valid(&self, token: &SignedToken) -> bool {
        self.decode_unexpired(token).is_ok()
    }

    pub fn is_refresh_kind(&self, token: &SignedToken) -> bool {
        self.codec
            .decode(token)
            .map(|claims| claims.kind() == TokenKind::Refresh)
            .unwrap_or(false)
    }

    /// Intact, unexpired and issued to `expected_subject`
    pub fn validate_binding(&self, token: &SignedToken, expected_subject: &Subject) -> bool {
        match self.decode_unexpired(token) {
            Ok(claims) if claims.sub() == expected_subject => true,
            Ok(claims) => {
                debug!(
                    "Token for {} presented on behalf of {}",
                    claims.sub(),
                    expected_subject
                );
                false
            }
            Err(_) => false,
        }
    }

    //----------------------------------------------------------------------------------------------
    // Extraction, typed errors
    //----------------------------------------------------------------------------------------------

    /// Subject of an intact token, whether or not it has expired. Pair with
    /// `is_structurally_valid` when expiry matters.
    pub fn extract_subject(&self, token: &SignedToken) -> Result<Subject, TokenError> {
        self.codec.decode(token).map(|claims| claims.sub().clone())
    }

    /// Decoded claims, failing with `Expired` once the token is past its expiry
    pub fn decode_unexpired(&self, token: &SignedToken) -> Result<ClaimSet, TokenError> {
        let claims = self.codec.decode(token)?;

        if claims.is_expired_at(self.now()) {
            debug!("{:?} token for {} has expired", claims.kind(), claims.sub());
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    pub fn refresh_flow<'a, D: UserDirectory>(&'a self, directory: &'a D) -> RefreshFlow<'a, D> {
        RefreshFlow::new(self, directory)
    }
}

impl Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
