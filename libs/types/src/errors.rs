//! Error taxonomy for the matching engine
//!
//! Submission failures surface unchanged to the submitter; nothing is
//! retried internally. Cancel of an unknown id and queries on an empty
//! book are not errors.

use thiserror::Error;

/// Errors surfaced by the engine facade
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Submission rejected before an order id was allocated
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown trading pair: {symbol}")]
    UnknownPair { symbol: String },

    #[error("Book error: {0}")]
    Book(#[from] BookError),
}

/// Errors raised inside a single order book
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookError {
    /// The order was routed to a book for a different pair. The engine
    /// constructs orders with the target book's symbol, so reaching this
    /// indicates a caller-side bug.
    #[error("Order pair {order} does not match book pair {book}")]
    WrongPair { order: String, book: String },
}
