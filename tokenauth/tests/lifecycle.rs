use async_trait::async_trait;
use std::sync::Arc;
use time::Duration;
use tokenauth::{
    ClaimSet, KeyMaterial, ManualClock, PrincipalRecord, RoleId, SignedToken, Subject,
    TokenError, TokenKind, TokenService, UnixMillis, UserDirectory,
};

//--------------------------------------------------------------------------------------------------

const SECRET: &str = "dGVzdFNlY3JldEtleUZvckpXVFRlc3RpbmdQdXJwb3Nlc09ubHlNdXN0QmUyNTZCaXRz";
const ACCESS_LIFETIME_MS: i64 = 900_000;
const REFRESH_LIFETIME_MS: i64 = 604_800_000;
const T0: UnixMillis = UnixMillis::from_millis(1_700_000_000_000);

fn service() -> (TokenService, Arc<ManualClock>) {
    let keys = KeyMaterial::from_base64_secret(
        SECRET,
        Duration::milliseconds(ACCESS_LIFETIME_MS),
        Duration::milliseconds(REFRESH_LIFETIME_MS),
    )
    .unwrap();
    let clock = Arc::new(ManualClock::new(T0));
    (TokenService::with_clock(keys, clock.clone()), clock)
}

fn at(offset_ms: i64) -> UnixMillis {
    UnixMillis::from_millis(T0.as_millis() + offset_ms)
}

fn johndoe() -> Subject {
    Subject::new("johndoe").unwrap()
}

struct Directory(Vec<PrincipalRecord>);

#[async_trait]
impl UserDirectory for Directory {
    async fn resolve(&self, subject: &Subject) -> Option<PrincipalRecord> {
        self.0.iter().find(|p| p.subject() == subject).cloned()
    }
}

fn directory_with_johndoe() -> Directory {
    Directory(vec![PrincipalRecord::new(
        johndoe(),
        "$argon2id$placeholder",
        vec![RoleId::new("ROLE_USER")],
    )])
}

//--------------------------------------------------------------------------------------------------

#[test]
fn johndoe_pair_lifecycle() {
    let (service, clock) = service();
    let pair = service.mint_token_pair(&johndoe()).unwrap();

    clock.set(at(1_000));
    assert!(service.is_structurally_valid(&pair.access_token));

    clock.set(at(900_001));
    assert!(!service.is_structurally_valid(&pair.access_token));

    assert!(!service.is_refresh_kind(&pair.access_token));
    assert!(service.is_refresh_kind(&pair.refresh_token));

    for offset in [0, 1_000, 900_001, REFRESH_LIFETIME_MS - 1] {
        clock.set(at(offset));
        assert_eq!(service.extract_subject(&pair.refresh_token).unwrap(), johndoe());
    }
}

#[tokio::test]
async fn johndoe_refresh_exchange() {
    let (service, clock) = service();
    let directory = directory_with_johndoe();
    let pair = service.mint_token_pair(&johndoe()).unwrap();

    clock.set(at(60_000));
    let refreshed = service
        .refresh_flow(&directory)
        .refresh(&pair.refresh_token)
        .await
        .unwrap();

    assert_eq!(service.extract_subject(&refreshed.access_token).unwrap(), johndoe());
    assert_eq!(
        refreshed.refresh_token.as_str().as_bytes(),
        pair.refresh_token.as_str().as_bytes()
    );
    assert!(service.validate_binding(&refreshed.access_token, &johndoe()));
}

#[tokio::test]
async fn refreshing_with_access_token_fails() {
    let (service, _) = service();
    let directory = directory_with_johndoe();
    let pair = service.mint_token_pair(&johndoe()).unwrap();

    assert!(service.is_structurally_valid(&pair.access_token));
    let err = service
        .refresh_flow(&directory)
        .refresh(&pair.access_token)
        .await
        .unwrap_err();
    assert_eq!(err, TokenError::NotARefreshToken);
}

#[tokio::test]
async fn refreshing_for_removed_principal_fails() {
    let (service, _) = service();
    let pair = service.mint_token_pair(&johndoe()).unwrap();

    let err = service
        .refresh_flow(&Directory(Vec::new()))
        .refresh(&pair.refresh_token)
        .await
        .unwrap_err();
    assert_eq!(err, TokenError::PrincipalNotFound);
}

#[test]
fn token_expired_a_millisecond_ago_still_decodes() {
    let (service, _) = service();
    let claims = ClaimSet::new(
        johndoe(),
        TokenKind::Access,
        at(-2),
        Duration::milliseconds(1),
    )
    .unwrap();
    assert_eq!(claims.exp(), at(-1));

    let token = service.codec().encode(&claims).unwrap();

    assert!(!service.is_structurally_valid(&token));
    assert_eq!(service.codec().decode(&token).unwrap(), claims);
    assert_eq!(service.decode_unexpired(&token), Err(TokenError::Expired));
}

#[test]
fn tokens_from_another_deployment_are_rejected() {
    let (service, _) = service();
    let other = TokenService::new(
        KeyMaterial::new(
            &[1u8; 32],
            Duration::milliseconds(ACCESS_LIFETIME_MS),
            Duration::milliseconds(REFRESH_LIFETIME_MS),
        )
        .unwrap(),
    );
    let foreign = other.mint_refresh_token(&johndoe()).unwrap();

    assert!(!service.is_structurally_valid(&foreign));
    assert!(!service.is_refresh_kind(&foreign));
    assert_eq!(
        service.extract_subject(&foreign),
        Err(TokenError::SignatureInvalid)
    );
}

#[test]
fn invalid_token_string_is_rejected_everywhere() {
    let (service, _) = service();
    let invalid = SignedToken::from("invalid.token.here");

    assert!(!service.is_structurally_valid(&invalid));
    assert!(!service.is_refresh_kind(&invalid));
    assert!(!service.validate_binding(&invalid, &johndoe()));
    assert!(service.extract_subject(&invalid).unwrap_err().is_invalid_token());
}

//--------------------------------------------------------------------------------------------------
