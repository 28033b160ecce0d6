//! DTOs for decoding webhook replies.
//!
//! Every 200 body must be a JSON object. It is first read as an envelope to
//! catch the `error` flag, then decoded into the shape the request asked for.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::SummaryResult;
use crate::domain::ports::{WebhookError, WebhookReply};

const UNSPECIFIED_SERVER_ERROR: &str = "unspecified server error";

#[derive(Debug, Deserialize)]
struct EnvelopeDto {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SummaryDto {
    total_income: u64,
    total_expense: u64,
    #[serde(default)]
    expense_by_category: BTreeMap<String, u64>,
}

impl From<SummaryDto> for SummaryResult {
    fn from(dto: SummaryDto) -> Self {
        Self {
            total_income: dto.total_income,
            total_expense: dto.total_expense,
            expense_by_category: dto.expense_by_category,
        }
    }
}

pub(super) fn decode_reply(
    body: &[u8],
    expects_summary: bool,
) -> Result<WebhookReply, WebhookError> {
    let object: Map<String, Value> = serde_json::from_slice(body).map_err(|error| {
        WebhookError::decode(format!("webhook reply is not a JSON object: {error}"))
    })?;
    let payload = Value::Object(object);
    let envelope = EnvelopeDto::deserialize(&payload)
        .map_err(|error| WebhookError::decode(format!("invalid webhook JSON payload: {error}")))?;
    if envelope.error {
        return Err(WebhookError::rejected(
            envelope
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| UNSPECIFIED_SERVER_ERROR.to_owned()),
        ));
    }
    if !expects_summary {
        return Ok(WebhookReply::Acknowledged {
            message: envelope.message,
        });
    }
    let summary = SummaryDto::deserialize(&payload)
        .map_err(|error| WebhookError::decode(format!("invalid summary payload: {error}")))?;
    Ok(WebhookReply::Summary(summary.into()))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn decodes_summary_with_categories() {
        let body = r#"{"total_income":12000000,"total_expense":4500000,
            "expense_by_category":{"Ăn uống":3000000,"Di chuyển":1500000}}"#;
        let reply = decode_reply(body.as_bytes(), true).expect("summary decodes");
        let WebhookReply::Summary(summary) = reply else {
            panic!("expected summary, got {reply:?}");
        };
        assert_eq!(summary.balance(), 7_500_000);
        assert_eq!(summary.expense_by_category["Di chuyển"], 1_500_000);
    }

    #[rstest]
    fn missing_category_map_defaults_to_empty() {
        let reply = decode_reply(br#"{"total_income":1,"total_expense":0}"#, true)
            .expect("summary decodes");
        assert_eq!(
            reply,
            WebhookReply::Summary(SummaryResult {
                total_income: 1,
                ..SummaryResult::default()
            })
        );
    }

    #[rstest]
    #[case(r#"{"error":false,"message":"Đã lưu"}"#.as_bytes(), Some("Đã lưu"))]
    #[case(br#"{}"#.as_slice(), None)]
    fn acknowledgements_keep_optional_message(#[case] body: &[u8], #[case] message: Option<&str>) {
        let reply = decode_reply(body, false).expect("ack decodes");
        assert_eq!(
            reply,
            WebhookReply::Acknowledged {
                message: message.map(str::to_owned)
            }
        );
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn error_flag_wins_over_expected_shape(#[case] expects_summary: bool) {
        let error = decode_reply(br#"{"error":true,"message":"sheet locked"}"#, expects_summary)
            .expect_err("flagged body fails");
        assert_eq!(error, WebhookError::rejected("sheet locked"));
    }

    #[rstest]
    fn error_flag_without_message_gets_placeholder() {
        let error = decode_reply(br#"{"error":true}"#, false).expect_err("flagged body fails");
        assert_eq!(error, WebhookError::rejected(UNSPECIFIED_SERVER_ERROR));
    }

    #[rstest]
    #[case(b"<html>Moved</html>".as_slice(), false)]
    #[case(br#"{"error":false}"#.as_slice(), true)]
    #[case(b"[]".as_slice(), false)]
    #[case(br#"[true,"sheet locked"]"#.as_slice(), false)]
    #[case(b"[1500,200]".as_slice(), true)]
    #[case(b"null".as_slice(), false)]
    fn malformed_bodies_are_decode_errors(#[case] body: &[u8], #[case] expects_summary: bool) {
        let error = decode_reply(body, expects_summary).expect_err("decode fails");
        assert!(matches!(error, WebhookError::Decode { .. }), "{error:?}");
    }
}
