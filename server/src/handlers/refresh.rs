use crate::response::JsonResponse;
use crate::state::StateRef;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tokenauth::{SignedToken, TokenError, TokenPair};
use tracing::warn;

//--------------------------------------------------------------------------------------------------
// Request
//--------------------------------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub refresh_token: SignedToken,
}

//--------------------------------------------------------------------------------------------------
// Handler
//--------------------------------------------------------------------------------------------------

pub async fn handler(
    State(state): State<StateRef>,
    Json(request): Json<Request>,
) -> JsonResponse<TokenPair, TokenError> {
    let result = state
        .tokens()
        .refresh_flow(state.directory())
        .refresh(&request.refresh_token)
        .await;

    if let Err(err) = &result {
        warn!("Refresh rejected: {}", err);
    }

    result.into()
}

//--------------------------------------------------------------------------------------------------
