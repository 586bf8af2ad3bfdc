//! Transaction dataset
//!
//! Loaded once at startup, read-only for the process lifetime.

pub mod loader;
pub mod record;

pub use loader::{Dataset, DatasetColumns};
pub use record::TransactionRecord;
