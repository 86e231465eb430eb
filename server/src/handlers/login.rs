use crate::response::{ApiError, JsonResponse};
use crate::state::StateRef;
use crate::types::{Password, PasswordHash, Username};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tokenauth::{TokenPair, UserDirectory};
use tracing::{error, info, warn};

//--------------------------------------------------------------------------------------------------
// Request and errors
//--------------------------------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub username: Username,
    pub password: Password,
}

pub enum LoginError {
    InvalidCredentials,
    TokenGenerationError,
    CryptoError,
}

impl ApiError for LoginError {
    fn response_data(&self) -> (StatusCode, &'static str, String) {
        match self {
            LoginError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Invalid credentials".to_string(),
            ),
            LoginError::TokenGenerationError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "token_generation_error",
                "Error generating token".to_string(),
            ),
            LoginError::CryptoError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "crypto_error",
                "Error with cryptographic operations".to_string(),
            ),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Handler
//--------------------------------------------------------------------------------------------------

pub async fn handler(
    State(state): State<StateRef>,
    Json(request): Json<Request>,
) -> JsonResponse<TokenPair, LoginError> {
    let subject = request.username.subject();

    // Unknown users get the same answer as a wrong password, after the same argon2 work
    let Some(principal) = state.directory().resolve(subject).await else {
        let _ = PasswordHash::decoy().validate(&request.password);
        warn!("Login attempted for unknown user {}", subject);
        return Err(LoginError::InvalidCredentials).into();
    };

    let password_hash = PasswordHash::from_stored(principal.credential_hash());
    let password_passes = match password_hash.validate(&request.password) {
        Ok(password_passes) => password_passes,
        Err(err) => {
            error!("Error validating password for {}: {}", subject, err);
            return Err(LoginError::CryptoError).into();
        }
    };

    if !password_passes {
        warn!("Invalid password for user {}", subject);
        return Err(LoginError::InvalidCredentials).into();
    }

    // WE HAVE VALIDATED THE USER

    let pair = match state.tokens().mint_token_pair(principal.subject()) {
        Ok(pair) => pair,
        Err(err) => {
            error!("Error generating tokens: {}", err);
            return Err(LoginError::TokenGenerationError).into();
        }
    };

    info!("User {} logged in - tokens issued", subject);

    Ok(pair).into()
}

//--------------------------------------------------------------------------------------------------
