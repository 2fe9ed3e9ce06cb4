//! Order book structures
//!
//! One book per trading pair: two price ladders, an id-indexed directory
//! of resting orders, and the matching procedure.

pub mod ask_ladder;
pub mod bid_ladder;
pub mod order_book;
pub mod price_level;

pub use ask_ladder::AskLadder;
pub use bid_ladder::BidLadder;
pub use order_book::{BookView, OrderBook};
pub use price_level::PriceLevel;
