use crate::directory::{PrincipalRecord, UserDirectory};
use crate::error::TokenError;
use crate::service::TokenService;
use crate::{Role, SignedToken, TokenKind};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{async_trait, Json};
use serde::Serialize;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;
use tracing::{debug, error, warn};

//--------------------------------------------------------------------------------------------------
// Trait for Axum states to comply with to provide the token service and user directory
//--------------------------------------------------------------------------------------------------

pub trait AuthProvider {
    type Directory: UserDirectory;

    fn token_service(&self) -> &TokenService;
    fn user_directory(&self) -> &Self::Directory;
}

impl<T: AuthProvider> AuthProvider for Arc<T> {
    type Directory = T::Directory;

    fn token_service(&self) -> &TokenService {
        self.deref().token_service()
    }

    fn user_directory(&self) -> &Self::Directory {
        self.deref().user_directory()
    }
}

//--------------------------------------------------------------------------------------------------
// Trait for extracting a list of roles from a type
//--------------------------------------------------------------------------------------------------

trait RoleSet {
    fn roles() -> Vec<&'static str>;
}

impl<T: Role> RoleSet for T {
    fn roles() -> Vec<&'static str> {
        vec![T::role_id()]
    }
}

#[allow(private_bounds)]
pub struct Or<T, U>(PhantomData<T>, PhantomData<U>)
where
    T: RoleSet,
    U: RoleSet;

impl<T, U> RoleSet for Or<T, U>
where
    T: RoleSet,
    U: RoleSet,
{
    fn roles() -> Vec<&'static str> {
        let mut roles = T::roles();
        roles.extend(U::roles());
        roles
    }
}

//--------------------------------------------------------------------------------------------------
// Extract Error
//--------------------------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
pub enum ExtractError {
    NoAuthorizationHeader,
    InvalidAuthorizationHeader,
    InvalidToken,
    TokenExpired,
    NotAnAccessToken,
    PrincipalNotFound,
    NoRolesAcceptable,
    UserDoesNotHaveAcceptableRole,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    code: &'static str,
    message: &'static str,
}

impl ExtractError {
    fn response_data(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            ExtractError::NoAuthorizationHeader | ExtractError::InvalidAuthorizationHeader => {
                (StatusCode::UNAUTHORIZED, "unauthorized", "Unauthorized")
            }
            ExtractError::InvalidToken | ExtractError::NotAnAccessToken => {
                (StatusCode::UNAUTHORIZED, "invalid_token", "Invalid token")
            }
            ExtractError::TokenExpired => {
                (StatusCode::UNAUTHORIZED, "token_expired", "Token has expired")
            }
            ExtractError::PrincipalNotFound => (
                StatusCode::UNAUTHORIZED,
                "principal_not_found",
                "Principal no longer exists",
            ),
            ExtractError::NoRolesAcceptable | ExtractError::UserDoesNotHaveAcceptableRole => {
                (StatusCode::FORBIDDEN, "forbidden", "Forbidden")
            }
        }
    }
}

impl IntoResponse for ExtractError {
    fn into_response(self) -> Response {
        let (status_code, code, message) = self.response_data();
        (status_code, Json(ErrorResponse { code, message })).into_response()
    }
}

//--------------------------------------------------------------------------------------------------
// Decoding and validation function
//--------------------------------------------------------------------------------------------------

const AUTHORIZATION_HEADER: &str = "Authorization";
const AUTHORIZATION_BEARER_PREFIX: &str = "Bearer ";

async fn validate_request<S>(parts: &mut Parts, state: &S) -> Result<PrincipalRecord, ExtractError>
where
    S: AuthProvider + Send + Sync,
{
    // Check to see if we already validated and extracted the token
    if let Some(principal) = parts.extensions.get::<PrincipalRecord>() {
        debug!("Token already validated for {}", principal.subject());
        return Ok(principal.clone());
    }

    // Extract the token
    let Some(auth_header) = parts.headers.get(AUTHORIZATION_HEADER) else {
        warn!("Request made with no Authorization header");
        return Err(ExtractError::NoAuthorizationHeader);
    };

    let Ok(auth_header_str) = auth_header.to_str() else {
        warn!("Request made with Authorization header with more than visible ASCII characters");
        return Err(ExtractError::InvalidAuthorizationHeader);
    };

    let Some(auth_token) = auth_header_str.strip_prefix(AUTHORIZATION_BEARER_PREFIX) else {
        warn!("Request made with Authorization header without Bearer prefix");
        return Err(ExtractError::InvalidAuthorizationHeader);
    };

    let token = SignedToken::from(auth_token);
    let service = state.token_service();

    // Decode the token, validate the signature and that it hasn't expired
    let claims = match service.decode_unexpired(&token) {
        Ok(claims) => claims,
        Err(TokenError::Expired) => {
            warn!("Request made with expired token");
            return Err(ExtractError::TokenExpired);
        }
        Err(err) => {
            warn!("Request made with token that failed validation: {}", err);
            return Err(ExtractError::InvalidToken);
        }
    };

    // Refresh tokens only buy new access tokens
    if claims.kind() != TokenKind::Access {
        warn!("Request made with refresh token for {}", claims.sub());
        return Err(ExtractError::NotAnAccessToken);
    }

    // Re-resolve the principal so deleted users lose access before their tokens expire
    let Some(principal) = state.user_directory().resolve(claims.sub()).await else {
        warn!("Request made with token for unknown principal {}", claims.sub());
        return Err(ExtractError::PrincipalNotFound);
    };

    // Claims were already checked above, so the binding is settled on the decoded subject
    if claims.sub() != principal.subject() {
        warn!("Token does not belong to {}", principal.subject());
        return Err(ExtractError::InvalidToken);
    }

    // Everything was successful, save the principal for future extractors
    parts.extensions.insert(principal.clone());

    debug!("Token validated for {}", principal.subject());

    Ok(principal)
}

//--------------------------------------------------------------------------------------------------
// Axum extractor to get the authenticated principal
//--------------------------------------------------------------------------------------------------

pub struct Authenticated(pub PrincipalRecord);

#[async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: AuthProvider + Send + Sync,
{
    type Rejection = ExtractError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let principal = validate_request(parts, state).await?;

        Ok(Authenticated(principal))
    }
}

//--------------------------------------------------------------------------------------------------
// Axum extractor to enforce role
//--------------------------------------------------------------------------------------------------

#[allow(private_bounds)]
pub struct RequireRole<T>(PhantomData<T>)
where
    T: RoleSet;

#[async_trait]
impl<S, T> FromRequestParts<S> for RequireRole<T>
where
    S: AuthProvider + Send + Sync,
    T: RoleSet + Send + Sync,
{
    type Rejection = ExtractError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let principal = validate_request(parts, state).await?;

        let acceptable_roles = T::roles();

        // Check the roles isn't empty - that isn't allowed
        if acceptable_roles.is_empty() {
            error!("No acceptable roles provided for RequireRole");
            return Err(ExtractError::NoRolesAcceptable);
        }

        // Check the principal has at least one of the acceptable roles
        if principal
            .roles()
            .iter()
            .any(|role| role.in_role_set(&acceptable_roles))
        {
            debug!("Principal {} has acceptable role", principal.subject());
            Ok(RequireRole(PhantomData))
        } else {
            warn!(
                "Principal {} does not have acceptable role",
                principal.subject()
            );
            Err(ExtractError::UserDoesNotHaveAcceptableRole)
        }
    }
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
