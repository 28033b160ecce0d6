//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod ledger_webhook;

#[cfg(test)]
pub use ledger_webhook::MockLedgerWebhook;
pub use ledger_webhook::{
    FixtureLedgerWebhook, LedgerWebhook, TransactionPayload, WebhookError, WebhookReply,
    WebhookRequest,
};
