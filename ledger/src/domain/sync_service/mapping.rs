//! Translation of webhook port failures into domain errors.

use serde_json::json;

use crate::domain::Error;
use crate::domain::ports::WebhookError;

pub(super) fn map_webhook_error(error: WebhookError, attempts: u32) -> Error {
    let details = json!({ "attempts": attempts });
    let mapped = match error {
        WebhookError::Transport { message } | WebhookError::Timeout { message } => {
            Error::transport(format!(
                "webhook unreachable after {attempts} attempt(s): {message}"
            ))
        }
        WebhookError::RateLimited { .. } => Error::server(format!(
            "webhook rate limit still active after {attempts} attempt(s); wait a minute and retry"
        )),
        WebhookError::Unauthorized { .. } => Error::server(
            "webhook rejected the request (HTTP 401); redeploy the script with access set to anyone",
        ),
        WebhookError::Forbidden { .. } => Error::server(
            "webhook denied access (HTTP 403); check the script's sharing permissions",
        ),
        WebhookError::NotFound { .. } => Error::server(
            "webhook URL not found (HTTP 404); check LEDGER_WEBHOOK_URL",
        ),
        WebhookError::Status { status, body } => {
            return Error::server(format!("webhook returned HTTP {status}: {body}"))
                .with_details(json!({ "attempts": attempts, "status": status }));
        }
        WebhookError::Decode { message } => {
            Error::protocol(format!("webhook reply was not valid JSON: {message}"))
        }
        WebhookError::Rejected { message } => {
            Error::server(format!("webhook reported an error: {message}"))
        }
        WebhookError::InvalidRequest { message } => {
            Error::internal(format!("webhook request could not be built: {message}"))
        }
    };
    mapped.with_details(details)
}
