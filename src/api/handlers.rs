use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::api::requests::SendEmailRequest;
use crate::api::responses::{HealthResponse, SendEmailResponse};
use crate::observability::mask_email;
use crate::services::SendDisposition;

use super::routes::AppState;

const API_KEY_HEADER: &str = "x-api-key";
const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

/// Liveness probe.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// POST /v1/send. The sender-availability and authentication checks run
/// before the body is inspected; validation failures never reach the cache
/// or the sender.
pub async fn send_email(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SendEmailRequest>, JsonRejection>,
) -> (StatusCode, Json<SendEmailResponse>) {
    let Some(service) = state.send_service.as_ref() else {
        tracing::warn!("send 503: no sender configured");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(SendEmailResponse::failure(
                "provider_down",
                "SMTP not configured",
            )),
        );
    };

    if !state.api_key.is_empty() {
        let presented = headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        if presented != state.api_key {
            tracing::warn!("send unauthorized: invalid or missing API key");
            return (
                StatusCode::UNAUTHORIZED,
                Json(SendEmailResponse::failure(
                    "unauthorized",
                    "invalid or missing API key",
                )),
            );
        }
    }

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "send invalid_request: body parse error");
            return (
                StatusCode::BAD_REQUEST,
                Json(SendEmailResponse::failure(
                    "invalid_request",
                    rejection.body_text(),
                )),
            );
        }
    };

    if let Err(err) = request.validate() {
        tracing::warn!(field = %err.field, "send invalid_destination: {}", err.message);
        return (
            StatusCode::BAD_REQUEST,
            Json(SendEmailResponse::failure("invalid_destination", err.message)),
        );
    }

    // Body field takes precedence over the header; no key means no
    // deduplication.
    let idempotency_key = if !request.idempotency_key.is_empty() {
        Some(request.idempotency_key.clone())
    } else {
        headers
            .get(IDEMPOTENCY_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    tracing::debug!(
        to = %mask_email(&request.to),
        keyed = idempotency_key.is_some(),
        "send accepted"
    );

    match service.handle(request, idempotency_key.as_deref()).await {
        SendDisposition::Replayed {
            succeeded,
            message_id,
            provider,
        } => (
            StatusCode::OK,
            Json(SendEmailResponse::replayed(succeeded, message_id, provider)),
        ),
        SendDisposition::Sent {
            message_id,
            provider,
        } => (
            StatusCode::OK,
            Json(SendEmailResponse::sent(message_id, provider)),
        ),
        SendDisposition::Failed { code, message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SendEmailResponse::failure(code, message)),
        ),
    }
}
