use crate::types::Username;
use axum::Json;
use serde::Serialize;
use tokenauth::extract::Authenticated;
use tokenauth::RoleId;

//--------------------------------------------------------------------------------------------------
// Response
//--------------------------------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub username: Username,
    pub roles: Vec<RoleId>,
}

//--------------------------------------------------------------------------------------------------
// Handler
//--------------------------------------------------------------------------------------------------

pub async fn handler(Authenticated(principal): Authenticated) -> Json<Response> {
    Json(Response {
        username: Username::from(principal.subject().clone()),
        roles: principal.roles().to_vec(),
    })
}

//--------------------------------------------------------------------------------------------------
