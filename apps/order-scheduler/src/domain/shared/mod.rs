//! Shared domain value objects.

mod symbol;
mod timestamp;

pub use symbol::Symbol;
pub use timestamp::Timestamp;

use thiserror::Error;

/// Errors raised by domain value objects.
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// A value failed validation.
    #[error("Invalid {field}: {message}")]
    InvalidValue {
        /// Name of the offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },
}
