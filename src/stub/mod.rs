//! Stub quiz backend: a local stand-in for the remote service, used for
//! development of UIs and as the fixture for end-to-end tests.
//!
//! Router layout (mounted under `/api/quiz`):
//! - `GET  /health`
//! - `POST /start`
//! - `POST /answer`
//! - `GET  /session/:id`
//! - `POST /session/:id/extend`
//!
//! CORS allows any origin so a browser front-end on another port can talk to it.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod http;
pub mod seeds;
pub mod state;

pub use state::StubState;

pub const API_PREFIX: &str = "/api/quiz";

pub fn build_router(state: StubState) -> Router {
    let api = Router::new()
        .route("/health", get(http::http_health))
        .route("/start", post(http::http_post_start))
        .route("/answer", post(http::http_post_answer))
        .route("/session/:id", get(http::http_get_session))
        .route("/session/:id/extend", post(http::http_post_extend))
        .with_state(state);

    Router::new()
        .nest(API_PREFIX, api)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
