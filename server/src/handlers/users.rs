use crate::roles::{AdminRole, UserRole};
use crate::state::StateRef;
use crate::types::Username;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tokenauth::extract::{Or, RequireRole};

//--------------------------------------------------------------------------------------------------
// Response
//--------------------------------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListResponse {
    pub users: Vec<Username>,
}

//--------------------------------------------------------------------------------------------------
// Handler
//--------------------------------------------------------------------------------------------------

pub async fn get_users(
    State(state): State<StateRef>,
    _: RequireRole<Or<UserRole, AdminRole>>,
) -> Json<UserListResponse> {
    let users = state
        .directory()
        .subjects()
        .await
        .into_iter()
        .map(Username::from)
        .collect();

    Json(UserListResponse { users })
}

//--------------------------------------------------------------------------------------------------
