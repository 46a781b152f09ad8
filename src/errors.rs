//! Unified error type for the stock keeper.
//!
//! Domain failures (`InvalidQuantity`, `ProductNotFound`, `OutOfRangeSelection`,
//! `InvalidName`) are recoverable and reported back to the operator. `Config`
//! only happens during startup. `InputClosed` and `Interrupted` end the console
//! session.

use thiserror::Error;

/// Every failure the crate can report.
#[derive(Debug, Error)]
pub enum Error {
    /// A proposed stock count was negative.
    #[error("Invalid quantity {quantity}: stock cannot be negative")]
    InvalidQuantity {
        /// The rejected value
        quantity: i64,
    },

    /// No product matched an identifier or a name query.
    #[error("Product '{name}' not found")]
    ProductNotFound {
        /// The identifier or query that was looked up
        name: String,
    },

    /// A disambiguation index fell outside the candidate list.
    #[error("Selection {index} is out of range: expected a number from 0 to {}", .count.saturating_sub(1))]
    OutOfRangeSelection {
        /// The index the operator picked
        index: usize,
        /// How many candidates were offered
        count: usize,
    },

    /// A product name was empty after trimming.
    #[error("Product name cannot be empty")]
    InvalidName,

    /// Configuration could not be read, parsed or applied.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the failure
        message: String,
    },

    /// Terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The operator closed standard input.
    #[error("Input closed")]
    InputClosed,

    /// The operator pressed Ctrl-C while being asked for input.
    #[error("Interrupted by operator")]
    Interrupted,
}

impl Error {
    /// Whether the operator can simply try again after this error.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidQuantity { .. }
                | Self::ProductNotFound { .. }
                | Self::OutOfRangeSelection { .. }
                | Self::InvalidName
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
