use crate::handlers::{login, me, refresh, register, users};
use crate::state::StateRef;
use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::Request;
use axum::routing::{get, post};
use axum::Router;
use std::iter::once;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::request_id::MakeRequestUuid;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::validate_request::ValidateRequestHeaderLayer;
use tower_http::ServiceBuilderExt;
use tracing::{span, Level};

//--------------------------------------------------------------------------------------------------
// Routes and middleware
//--------------------------------------------------------------------------------------------------

pub fn app(state: StateRef) -> Router {
    Router::new()
        .route("/api/auth/register", post(register::handler))
        .route("/api/auth/login", post(login::handler))
        .route("/api/auth/refresh-token", post(refresh::handler))
        .route("/api/auth/me", get(me::handler))
        .route("/api/users", get(users::get_users))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .sensitive_headers(once(AUTHORIZATION))
                .set_x_request_id(MakeRequestUuid)
                .decompression()
                .compression()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(|request: &Request<Body>| {
                            let request_id = request
                                .headers()
                                .get("x-request-id")
                                .and_then(|hv| hv.to_str().ok())
                                .unwrap_or("unknown");
                            span!(
                                Level::INFO,
                                "http_request",
                                request_id,
                                http_request.request_method = request.method().as_str(),
                                http_request.request_url = request.uri().path()
                            )
                        })
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .propagate_x_request_id()
                .layer(TimeoutLayer::new(Duration::from_secs(10)))
                .layer(ValidateRequestHeaderLayer::accept("application/json")),
        )
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
