use crate::directory::UserDirectory;
use crate::error::TokenError;
use crate::service::TokenService;
use crate::{SignedToken, TokenKind, TokenPair};
use tracing::{debug, info, warn};

//--------------------------------------------------------------------------------------------------
// Refresh flow
//--------------------------------------------------------------------------------------------------

/// Exchanges a refresh token for a fresh access token. The refresh token is handed back
/// unchanged and stays usable until its own expiry.
pub struct RefreshFlow<'a, D: UserDirectory> {
    service: &'a TokenService,
    directory: &'a D,
}

impl<'a, D: UserDirectory> RefreshFlow<'a, D> {
    pub fn new(service: &'a TokenService, directory: &'a D) -> Self {
        RefreshFlow { service, directory }
    }

    pub async fn refresh(&self, presented: &SignedToken) -> Result<TokenPair, TokenError> {
        // Kind is checked before expiry so an access token is always reported as the wrong kind
        let claims = self.service.codec().decode(presented)?;

        if claims.kind() != TokenKind::Refresh {
            warn!(
                "{:?} token for {} presented for refresh",
                claims.kind(),
                claims.sub()
            );
            return Err(TokenError::NotARefreshToken);
        }

        if claims.is_expired_at(self.service.now()) {
            warn!("Expired refresh token for {} presented", claims.sub());
            return Err(TokenError::Expired);
        }

        // Only the subject is taken from the token
        let Some(principal) = self.directory.resolve(claims.sub()).await else {
            warn!("Refresh token presented for unknown principal {}", claims.sub());
            return Err(TokenError::PrincipalNotFound);
        };

        debug!(
            "Principal {} resolved with {} roles",
            principal.subject(),
            principal.roles().len()
        );

        let access_token = self.service.mint_access_token(principal.subject())?;

        info!("Access token refreshed for {}", principal.subject());

        Ok(TokenPair {
            access_token,
            refresh_token: presented.clone(),
        })
    }
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::PrincipalRecord;
    use crate::internal::unixtime::{ManualClock, UnixMillis};
    use crate::keys::KeyMaterial;
    use crate::{RoleId, Subject};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use time::Duration;

    /// Directory backed by a map that counts how often it is asked
    struct MockDirectory {
        principals: HashMap<Subject, PrincipalRecord>,
        lookups: AtomicUsize,
    }

    impl MockDirectory {
        fn with(names: &[&str]) -> Self {
            let principals = names
                .iter()
                .map(|name| {
                    let subject = Subject::new(*name).unwrap();
                    let record = PrincipalRecord::new(
                        subject.clone(),
                        "hash",
                        vec![RoleId::new("ROLE_USER")],
                    );
                    (subject, record)
                })
                .collect();

            MockDirectory {
                principals,
                lookups: AtomicUsize::new(0),
            }
        }

        fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl UserDirectory for MockDirectory {
        async fn resolve(&self, subject: &Subject) -> Option<PrincipalRecord> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.principals.get(subject).cloned()
        }
    }

    fn service() -> (TokenService, Arc<ManualClock>) {
        let keys = KeyMaterial::new(
            &[3u8; 48],
            Duration::milliseconds(900_000),
            Duration::milliseconds(604_800_000),
        )
        .unwrap();
        let clock = Arc::new(ManualClock::new(UnixMillis::from_millis(1_700_000_000_000)));
        (TokenService::with_clock(keys, clock.clone()), clock)
    }

    fn johndoe() -> Subject {
        Subject::new("johndoe").unwrap()
    }

    #[tokio::test]
    async fn refresh_mints_new_access_token_and_keeps_refresh_token() {
        let (service, clock) = service();
        let directory = MockDirectory::with(&["johndoe"]);
        let pair = service.mint_token_pair(&johndoe()).unwrap();

        clock.advance(Duration::minutes(20));
        let refreshed = service
            .refresh_flow(&directory)
            .refresh(&pair.refresh_token)
            .await
            .unwrap();

        assert_eq!(refreshed.refresh_token, pair.refresh_token);
        assert_ne!(refreshed.access_token, pair.access_token);
        assert!(service.is_structurally_valid(&refreshed.access_token));
        assert!(!service.is_refresh_kind(&refreshed.access_token));
        assert_eq!(
            service.extract_subject(&refreshed.access_token).unwrap(),
            johndoe()
        );
        assert_eq!(directory.lookups(), 1);
    }

    #[tokio::test]
    async fn access_token_is_never_exchangeable() {
        let (service, _) = service();
        let directory = MockDirectory::with(&["johndoe"]);
        let access = service.mint_access_token(&johndoe()).unwrap();

        let err = service
            .refresh_flow(&directory)
            .refresh(&access)
            .await
            .unwrap_err();

        assert_eq!(err, TokenError::NotARefreshToken);
        assert_eq!(directory.lookups(), 0);
    }

    #[tokio::test]
    async fn expired_access_token_is_still_reported_as_wrong_kind() {
        let (service, clock) = service();
        let directory = MockDirectory::with(&["johndoe"]);
        let access = service.mint_access_token(&johndoe()).unwrap();

        clock.advance(Duration::days(30));
        let err = service
            .refresh_flow(&directory)
            .refresh(&access)
            .await
            .unwrap_err();

        assert_eq!(err, TokenError::NotARefreshToken);
    }

    #[tokio::test]
    async fn expired_refresh_token_is_rejected() {
        let (service, clock) = service();
        let directory = MockDirectory::with(&["johndoe"]);
        let refresh = service.mint_refresh_token(&johndoe()).unwrap();

        clock.advance(Duration::milliseconds(604_800_001));
        let err = service
            .refresh_flow(&directory)
            .refresh(&refresh)
            .await
            .unwrap_err();

        assert_eq!(err, TokenError::Expired);
        assert_eq!(directory.lookups(), 0);
    }

    #[tokio::test]
    async fn missing_principal_mints_nothing() {
        let (service, _) = service();
        let directory = MockDirectory::with(&[]);
        let refresh = service.mint_refresh_token(&johndoe()).unwrap();

        let err = service
            .refresh_flow(&directory)
            .refresh(&refresh)
            .await
            .unwrap_err();

        assert_eq!(err, TokenError::PrincipalNotFound);
        assert_eq!(directory.lookups(), 1);
    }

    #[tokio::test]
    async fn garbage_is_an_invalid_token() {
        let (service, _) = service();
        let directory = MockDirectory::with(&["johndoe"]);

        let err = service
            .refresh_flow(&directory)
            .refresh(&SignedToken::from("invalid.token.here"))
            .await
            .unwrap_err();

        assert!(err.is_invalid_token());
        assert_eq!(directory.lookups(), 0);
    }

    #[tokio::test]
    async fn same_refresh_token_can_be_used_concurrently() {
        let (service, _) = service();
        let directory = MockDirectory::with(&["johndoe"]);
        let refresh = service.mint_refresh_token(&johndoe()).unwrap();
        let flow = service.refresh_flow(&directory);

        let (a, b) = tokio::join!(flow.refresh(&refresh), flow.refresh(&refresh));

        assert_eq!(a.unwrap().refresh_token, refresh);
        assert_eq!(b.unwrap().refresh_token, refresh);
        assert_eq!(directory.lookups(), 2);
    }
}

//--------------------------------------------------------------------------------------------------
