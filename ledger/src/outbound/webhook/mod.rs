//! Spreadsheet webhook outbound adapter.
//!
//! A thin HTTP implementation of the `LedgerWebhook` port.

mod dto;
mod http_webhook;

pub use http_webhook::{DEFAULT_REQUEST_TIMEOUT, HttpLedgerWebhook};
