use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tokenauth::TokenError;

//--------------------------------------------------------------------------------------------------
// Error handling
//--------------------------------------------------------------------------------------------------

// Any errors returned by a handler should conform to this
pub trait ApiError: Sized {
    fn response_data(&self) -> (StatusCode, &'static str, String);
}

// Useful for errors raised outside a JsonResponse, eg a rejection
pub struct StandaloneError<E>(E)
where
    E: ApiError;

impl<T> From<T> for StandaloneError<T>
where
    T: ApiError,
{
    fn from(err: T) -> Self {
        StandaloneError(err)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    code: &'static str,
    message: String,
}

//--------------------------------------------------------------------------------------------------
// Token errors at the HTTP boundary
//--------------------------------------------------------------------------------------------------

// Malformed and tampered tokens produce the same response
impl ApiError for TokenError {
    fn response_data(&self) -> (StatusCode, &'static str, String) {
        match self {
            TokenError::Malformed | TokenError::SignatureInvalid => (
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "Invalid token".to_string(),
            ),
            TokenError::Expired => (
                StatusCode::UNAUTHORIZED,
                "token_expired",
                "Token has expired".to_string(),
            ),
            TokenError::NotARefreshToken => (
                StatusCode::BAD_REQUEST,
                "not_a_refresh_token",
                "Token is not a refresh token".to_string(),
            ),
            TokenError::PrincipalNotFound => (
                StatusCode::NOT_FOUND,
                "principal_not_found",
                "User not found".to_string(),
            ),
            TokenError::Signing(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "token_generation_error",
                "Error generating token".to_string(),
            ),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Response JSON handling
//--------------------------------------------------------------------------------------------------

pub struct JsonResponse<T: Serialize, E: ApiError>(Result<T, E>);

impl<T: Serialize, E: ApiError> From<Result<T, E>> for JsonResponse<T, E> {
    fn from(r: Result<T, E>) -> Self {
        JsonResponse(r)
    }
}

//--------------------------------------------------------------------------------------------------
// IntoResponse handling
//--------------------------------------------------------------------------------------------------

impl<T: Serialize, E: ApiError> IntoResponse for JsonResponse<T, E> {
    fn into_response(self) -> Response {
        match self.0 {
            Ok(resp) => Json(resp).into_response(),
            Err(err) => StandaloneError(err).into_response(),
        }
    }
}

impl<E: ApiError> IntoResponse for StandaloneError<E> {
    fn into_response(self) -> Response {
        let (status_code, code, message) = self.0.response_data();
        let body = ErrorResponse { code, message };
        (status_code, Json(body)).into_response()
    }
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
