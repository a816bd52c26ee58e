//! Error handling for model-audit
//!
//! Error types, the result alias, and context utilities used across the crate.

pub mod context;
pub mod types;

pub use context::ResultExt;
pub use types::{AuditError, ErrorSeverity, Result};
