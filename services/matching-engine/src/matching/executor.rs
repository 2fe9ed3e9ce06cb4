//! Fill execution
//!
//! Applies a single fill to both sides of a match and produces the trade
//! record handed back to the submitter.

use types::numeric::{Price, Quantity};
use types::order::{Order, Side};
use types::trade::Trade;

/// Fill both orders by `quantity` and emit the resulting trade
///
/// The execution price is the resting order's level price, so a taker whose
/// limit is more aggressive gets price improvement. Buyer and seller ids are
/// derived from the two orders' sides; callers can tell which side was the
/// taker by correlating with the just-submitted id.
pub fn apply_fill(
    taker: &mut Order,
    maker: &mut Order,
    price: Price,
    quantity: Quantity,
    timestamp: i64,
) -> Trade {
    taker.add_fill(quantity, timestamp);
    maker.add_fill(quantity, timestamp);

    let (buy_order_id, sell_order_id) = match taker.side {
        Side::Buy => (taker.order_id, maker.order_id),
        Side::Sell => (maker.order_id, taker.order_id),
    };

    Trade::new(buy_order_id, sell_order_id, price, quantity, timestamp)
}
