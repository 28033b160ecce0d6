//! Outbound adapters implementing domain ports.
//!
//! - **webhook**: reqwest client for the spreadsheet automation endpoint
//!
//! Adapters translate between domain types and wire representations. They
//! contain no business logic.

pub mod webhook;
