use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;

use orderdesk_core::envelope::{HandlerResponse, RequestEnvelope};

use crate::{
    handlers::{self, malformed_request},
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/orders", post(orders))
        .route("/users", post(users))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - liveness probe.
async fn health() -> &'static str {
    "OK"
}

/// POST /orders - runs one order event.
async fn orders(
    State(state): State<AppState>,
    payload: Result<Json<RequestEnvelope>, JsonRejection>,
) -> Response {
    let response = match payload {
        Ok(Json(envelope)) => handlers::orders::handle(&state, envelope).await,
        Err(rejection) => malformed_request(rejection.body_text()),
    };
    into_http_response(response)
}

/// POST /users - runs one user event.
async fn users(
    State(state): State<AppState>,
    payload: Result<Json<RequestEnvelope>, JsonRejection>,
) -> Response {
    let response = match payload {
        Ok(Json(envelope)) => handlers::users::handle(&state, envelope).await,
        Err(rejection) => malformed_request(rejection.body_text()),
    };
    into_http_response(response)
}

fn into_http_response(response: HandlerResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        response.body,
    )
        .into_response()
}
