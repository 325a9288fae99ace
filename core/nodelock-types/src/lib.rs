//! Core type definitions for nodelock.
//!
//! This crate defines the small value types shared by the key engine, the
//! license crate and the CLI:
//! - License sequence identifiers (random UUID v4)
//! - Epoch-millisecond timestamps with RFC 3339 rendering
//! - Validity durations (amount + calendar-aware unit)

mod ids;
mod timestamp;
mod validity;

pub use ids::SequenceId;
pub use timestamp::Timestamp;
pub use validity::{Validity, ValidityUnit};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("invalid validity: {0}")]
    InvalidValidity(String),
}
