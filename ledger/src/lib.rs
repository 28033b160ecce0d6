//! Personal income and expense ledger with spreadsheet webhook sync.

pub mod config;
pub mod domain;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
