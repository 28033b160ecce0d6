//! Driven port for the spreadsheet webhook.
//!
//! The domain owns the request and reply shapes; adapters only move them
//! across the wire and classify failures.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use super::define_port_error;
use crate::domain::{PeriodKey, SummaryResult, Transaction, TransactionKind};

/// Transaction fields as written to one spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionPayload {
    /// Calendar day, rendered `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// `Thu` or `Chi`.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Spreadsheet category label.
    pub category: String,
    /// Whole currency units.
    pub amount: u64,
    /// Free-text note, possibly empty.
    pub note: String,
}

impl From<&Transaction> for TransactionPayload {
    fn from(transaction: &Transaction) -> Self {
        Self {
            date: transaction.date(),
            kind: transaction.kind(),
            category: transaction.category().label().to_owned(),
            amount: transaction.amount().value(),
            note: transaction.note().to_owned(),
        }
    }
}

/// One webhook call, tagged by `action` on the wire.
///
/// # Examples
///
/// ```
/// use ledger::domain::ports::WebhookRequest;
///
/// let body = serde_json::to_value(WebhookRequest::TestConnection).expect("serialise");
/// assert_eq!(body, serde_json::json!({ "action": "test_connection" }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WebhookRequest {
    /// Append a row to a month sheet.
    AddTransaction {
        /// Target sheet.
        sheet_name: PeriodKey,
        /// Row contents.
        transaction: TransactionPayload,
    },
    /// Ask for a month's totals.
    GetSummary {
        /// Sheet to summarise.
        sheet_name: PeriodKey,
    },
    /// Round-trip probe.
    TestConnection,
}

impl WebhookRequest {
    /// Request appending `transaction` to its own month sheet.
    pub fn add_transaction(transaction: &Transaction) -> Self {
        Self::AddTransaction {
            sheet_name: transaction.period(),
            transaction: TransactionPayload::from(transaction),
        }
    }

    /// Wire name of the action, for logs.
    pub fn action(&self) -> &'static str {
        match self {
            Self::AddTransaction { .. } => "add_transaction",
            Self::GetSummary { .. } => "get_summary",
            Self::TestConnection => "test_connection",
        }
    }

    /// Whether a successful reply must carry a summary body.
    pub fn expects_summary(&self) -> bool {
        matches!(self, Self::GetSummary { .. })
    }
}

/// Successful webhook outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookReply {
    /// Write or probe accepted, with the server's message when sent.
    Acknowledged {
        /// Optional server message.
        message: Option<String>,
    },
    /// Totals for the requested sheet.
    Summary(SummaryResult),
}

define_port_error! {
    /// Failures surfaced while calling the webhook.
    pub enum WebhookError {
        /// The request never produced a response.
        Transport { message: String } =>
            "webhook transport failed: {message}",
        /// The request exceeded its timeout.
        Timeout { message: String } =>
            "webhook timed out: {message}",
        /// HTTP 429.
        RateLimited { message: String } =>
            "webhook rate limited request: {message}",
        /// HTTP 401.
        Unauthorized { message: String } =>
            "webhook rejected credentials: {message}",
        /// HTTP 403.
        Forbidden { message: String } =>
            "webhook denied access: {message}",
        /// HTTP 404.
        NotFound { message: String } =>
            "webhook not found: {message}",
        /// Any other non-200 status.
        Status { status: u16, body: String } =>
            "webhook returned HTTP {status}: {body}",
        /// A 200 body that was not the expected JSON.
        Decode { message: String } =>
            "webhook response decode failed: {message}",
        /// A 200 body flagged `"error": true`.
        Rejected { message: String } =>
            "webhook reported an error: {message}",
        /// The adapter refused to build the request.
        InvalidRequest { message: String } =>
            "webhook request invalid: {message}",
    }
}

impl WebhookError {
    /// Whether retrying this error is expected to help.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

/// Port for posting requests to the spreadsheet webhook.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerWebhook: Send + Sync {
    /// Post one request and classify the reply.
    ///
    /// # Examples
    ///
    /// ```
    /// use ledger::domain::ports::{
    ///     FixtureLedgerWebhook, LedgerWebhook, WebhookReply, WebhookRequest,
    /// };
    ///
    /// # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
    /// let reply = FixtureLedgerWebhook
    ///     .post(&WebhookRequest::TestConnection)
    ///     .await
    ///     .expect("fixture accepts probes");
    /// assert_eq!(reply, WebhookReply::Acknowledged { message: None });
    /// # });
    /// ```
    async fn post(&self, request: &WebhookRequest) -> Result<WebhookReply, WebhookError>;
}

/// Fixture accepting every request; summaries come back empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureLedgerWebhook;

#[async_trait]
impl LedgerWebhook for FixtureLedgerWebhook {
    async fn post(&self, request: &WebhookRequest) -> Result<WebhookReply, WebhookError> {
        if request.expects_summary() {
            Ok(WebhookReply::Summary(SummaryResult::default()))
        } else {
            Ok(WebhookReply::Acknowledged { message: None })
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::{Category, ExpenseCategory, TransactionDraft};

    fn lunch() -> Transaction {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).expect("valid date");
        Transaction::try_new(
            TransactionDraft {
                date,
                category: Category::Expense(ExpenseCategory::Food),
                subcategory: Some("Ăn trưa".to_owned()),
                amount: 45_000,
                note: "pho".to_owned(),
            },
            date,
        )
        .expect("valid transaction")
    }

    #[rstest]
    fn add_transaction_targets_the_month_sheet() {
        let body = serde_json::to_value(WebhookRequest::add_transaction(&lunch()))
            .expect("serialise request");
        assert_eq!(
            body,
            json!({
                "action": "add_transaction",
                "sheet_name": "03/2026",
                "transaction": {
                    "date": "2026-03-05",
                    "type": "Chi",
                    "category": "Ăn uống",
                    "amount": 45_000,
                    "note": "pho",
                },
            })
        );
    }

    #[rstest]
    fn get_summary_names_the_sheet() {
        let request = WebhookRequest::GetSummary {
            sheet_name: PeriodKey::new(2026, 11).expect("valid period"),
        };
        let body = serde_json::to_value(&request).expect("serialise request");
        assert_eq!(body, json!({ "action": "get_summary", "sheet_name": "11/2026" }));
        assert!(request.expects_summary());
        assert_eq!(request.action(), "get_summary");
    }

    #[rstest]
    #[case(WebhookError::transport("refused"), true)]
    #[case(WebhookError::timeout("30s"), true)]
    #[case(WebhookError::rate_limited("slow down"), true)]
    #[case(WebhookError::unauthorized(""), false)]
    #[case(WebhookError::forbidden(""), false)]
    #[case(WebhookError::not_found(""), false)]
    #[case(WebhookError::status(500_u16, "boom"), false)]
    #[case(WebhookError::decode("eof"), false)]
    #[case(WebhookError::rejected("sheet locked"), false)]
    fn only_transient_failures_retry(#[case] error: WebhookError, #[case] retryable: bool) {
        assert_eq!(error.is_retryable(), retryable);
    }

    #[tokio::test]
    async fn fixture_answers_summaries_with_zeroes() {
        let request = WebhookRequest::GetSummary {
            sheet_name: PeriodKey::new(2026, 1).expect("valid period"),
        };
        let reply = FixtureLedgerWebhook
            .post(&request)
            .await
            .expect("fixture reply");
        assert_eq!(reply, WebhookReply::Summary(SummaryResult::default()));
    }
}
