use crate::internal::unixtime::UnixMillis;
use crate::{Subject, TokenKind};
use serde::{Deserialize, Serialize};
use time::Duration;

//--------------------------------------------------------------------------------------------------
// Token claims
//--------------------------------------------------------------------------------------------------

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct ClaimSet {
    sub: Subject,
    kind: TokenKind,
    iat: UnixMillis,
    exp: UnixMillis,
}

impl ClaimSet {
    /// Assembles claims expiring `lifetime` after `issued_at`. Returns `None` unless the lifetime
    /// is positive, so `exp > iat` holds for every value built here.
    pub fn new(
        sub: Subject,
        kind: TokenKind,
        issued_at: UnixMillis,
        lifetime: Duration,
    ) -> Option<Self> {
        let claims = ClaimSet {
            sub,
            kind,
            iat: issued_at,
            exp: issued_at.saturating_add(lifetime),
        };

        claims.is_well_formed().then_some(claims)
    }

    // Deserialized claims bypass `new`, so the codec re-checks this after decoding
    pub(crate) fn is_well_formed(&self) -> bool {
        self.exp > self.iat
    }

    pub fn sub(&self) -> &Subject {
        &self.sub
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn iat(&self) -> UnixMillis {
        self.iat
    }

    pub fn exp(&self) -> UnixMillis {
        self.exp
    }

    /// Expired strictly after `exp`; a token is still usable at exactly its expiry instant
    pub fn is_expired_at(&self, now: UnixMillis) -> bool {
        now > self.exp
    }
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
