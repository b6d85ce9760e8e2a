use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::extract;
use crate::models::{ErrorResponse, ParseEmailRequest};

const MAX_BODY_BYTES: usize = 10_000;
const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(10);

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/parse_email", post(parse_email))
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

async fn parse_email(body: String) -> Response {
    if body.len() > MAX_BODY_BYTES {
        return error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            "Request body too large",
        );
    }

    let request: ParseEmailRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!(error = %e, "rejecting unparseable request body");
            return error_response(
                StatusCode::BAD_REQUEST,
                "Invalid JSON format in request body",
            );
        }
    };

    let email_source = match request.email_source.as_deref() {
        Some(source) if !source.is_empty() => source,
        _ => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Email source is required (URL or file path)",
            );
        }
    };

    // Worst case the pipeline performs one source fetch plus a fetch per
    // candidate link plus one nested hop each; cap the whole thing.
    let result = tokio::time::timeout(EXTRACTION_TIMEOUT, extract::extract_json(email_source));

    match result.await {
        Ok(Ok(Some(value))) => (StatusCode::OK, Json(value)).into_response(),
        Ok(Ok(None)) => error_response(StatusCode::NOT_FOUND, "JSON not found in the email"),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "extraction failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An error occurred: {e}"),
            )
        }
        Err(_) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "An error occurred: extraction timed out",
        ),
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}
