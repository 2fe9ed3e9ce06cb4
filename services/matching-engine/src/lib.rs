//! Spot matching engine
//!
//! Price-time-priority limit order book and matching engine for spot
//! trading, operated as an in-process library. Per pair, the engine
//! maintains resting bid and ask books, matches incoming orders under
//! strict price-time priority, and returns the resulting trades together
//! with an up-to-date depth view.
//!
//! **Key invariants:**
//! - Price-time priority strictly enforced: better prices first, FIFO
//!   within a level
//! - Execution at the resting order's price
//! - Conservation of quantity across both sides of every fill
//! - Engine-wide strictly increasing order ids
//!
//! All public entry points of both [`MatchingEngine`] and
//! [`book::OrderBook`] are safe to call from multiple threads; each book
//! carries its own lock and books never call back into the engine.

pub mod book;
pub mod clock;
pub mod engine;
pub mod matching;

pub use book::OrderBook;
pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{MarketData, MatchingEngine, DEFAULT_DEPTH};
