//! Reqwest-backed webhook adapter.
//!
//! This adapter owns transport details only: JSON serialisation, the request
//! timeout, HTTP status classification, and reply decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use super::dto::decode_reply;
use crate::domain::ports::{LedgerWebhook, WebhookError, WebhookReply, WebhookRequest};

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_USER_AGENT: &str = "ledger-webhook-client/0.1";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Webhook adapter that POSTs JSON to one endpoint.
pub struct HttpLedgerWebhook {
    client: Client,
    endpoint: Url,
}

impl HttpLedgerWebhook {
    /// Build an adapter whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self { client, endpoint })
    }

    /// Endpoint this adapter posts to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl LedgerWebhook for HttpLedgerWebhook {
    async fn post(&self, request: &WebhookRequest) -> Result<WebhookReply, WebhookError> {
        let payload = serde_json::to_vec(request).map_err(|error| {
            WebhookError::invalid_request(format!("request serialisation failed: {error}"))
        })?;
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .body(payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(
            action = request.action(),
            status = status.as_u16(),
            bytes = body.len(),
            "webhook responded"
        );
        if status != StatusCode::OK {
            return Err(map_status_error(status, body.as_ref()));
        }
        decode_reply(body.as_ref(), request.expects_summary())
    }
}

fn map_transport_error(error: reqwest::Error) -> WebhookError {
    if error.is_timeout() {
        WebhookError::timeout(error.to_string())
    } else {
        WebhookError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> WebhookError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => WebhookError::rate_limited(message),
        StatusCode::UNAUTHORIZED => WebhookError::unauthorized(message),
        StatusCode::FORBIDDEN => WebhookError::forbidden(message),
        StatusCode::NOT_FOUND => WebhookError::not_found(message),
        _ => WebhookError::status(status.as_u16(), body_preview),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network mapping helpers.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS, "RateLimited")]
    #[case::unauthorized(StatusCode::UNAUTHORIZED, "Unauthorized")]
    #[case::forbidden(StatusCode::FORBIDDEN, "Forbidden")]
    #[case::not_found(StatusCode::NOT_FOUND, "NotFound")]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, "Status")]
    #[case::accepted(StatusCode::ACCEPTED, "Status")]
    fn maps_http_statuses(#[case] status: StatusCode, #[case] expected: &str) {
        let error = map_status_error(status, b"Script function not found");
        let matched = match expected {
            "RateLimited" => matches!(error, WebhookError::RateLimited { .. }),
            "Unauthorized" => matches!(error, WebhookError::Unauthorized { .. }),
            "Forbidden" => matches!(error, WebhookError::Forbidden { .. }),
            "NotFound" => matches!(error, WebhookError::NotFound { .. }),
            "Status" => matches!(error, WebhookError::Status { .. }),
            _ => panic!("unsupported test expectation: {expected}"),
        };
        assert!(matched, "{status} mapped to {error:?}");
    }

    #[rstest]
    fn other_statuses_keep_code_and_preview() {
        let error = map_status_error(StatusCode::BAD_GATEWAY, b"  upstream \n down ");
        assert_eq!(error, WebhookError::status(502_u16, "upstream down"));
    }

    #[rstest]
    fn empty_body_message_names_the_status() {
        let error = map_status_error(StatusCode::NOT_FOUND, b"");
        assert_eq!(error, WebhookError::not_found("status 404"));
    }

    #[rstest]
    fn preview_truncates_long_bodies() {
        let body = "x".repeat(200);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.chars().count(), 163);
        assert!(preview.ends_with("..."));
    }

    #[rstest]
    fn preview_keeps_short_bodies_verbatim() {
        assert_eq!(body_preview(b"quota exceeded"), "quota exceeded");
    }
}
