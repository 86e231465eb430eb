use crate::response::{ApiError, JsonResponse};
use crate::roles::UserRole;
use crate::state::StateRef;
use crate::types::{Password, PasswordHash, Username};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tokenauth::{PrincipalRecord, RoleId};
use tracing::{error, info, warn};

//--------------------------------------------------------------------------------------------------
// Request, response and errors
//--------------------------------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub username: Username,
    pub password: Password,
    #[serde(default)]
    pub roles: Vec<RoleId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub username: Username,
    pub roles: Vec<RoleId>,
}

pub enum RegisterError {
    UserExists,
    CryptoError,
}

impl ApiError for RegisterError {
    fn response_data(&self) -> (StatusCode, &'static str, String) {
        match self {
            RegisterError::UserExists => (
                StatusCode::CONFLICT,
                "user_exists",
                "Username is already in use".to_string(),
            ),
            RegisterError::CryptoError => (
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
) -> JsonResponse<Response, RegisterError> {
    let subject = request.username.subject();

    let password_hash = match PasswordHash::from_password(&request.password) {
        Ok(password_hash) => password_hash,
        Err(err) => {
            error!("Error hashing password for {}: {}", subject, err);
            return Err(RegisterError::CryptoError).into();
        }
    };

    let roles = if request.roles.is_empty() {
        vec![RoleId::from(UserRole)]
    } else {
        request.roles
    };
    let record = PrincipalRecord::new(subject.clone(), password_hash.as_str(), roles.clone());

    if !state.directory().insert(record).await {
        warn!("Registration attempted for existing user {}", subject);
        return Err(RegisterError::UserExists).into();
    }

    info!("User {} registered", subject);

    Ok(Response {
        username: request.username,
        roles,
    })
    .into()
}

//--------------------------------------------------------------------------------------------------
