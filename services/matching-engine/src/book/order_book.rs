//! Per-pair order book
//!
//! One book per trading pair: a bid ladder, an ask ladder and an id-indexed
//! directory of resting orders. The directory owns the order records; ladder
//! entries carry (id, remaining) mirrors. Matching, insertion, cancellation
//! and every query run under a single internal lock, so the book is safe to
//! share across threads behind an `Arc`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use types::errors::BookError;
use types::ids::{MarketId, OrderId, UserId};
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderType, Side};
use types::trade::Trade;

use crate::clock::Clock;
use crate::matching::{crossing, executor};

use super::ask_ladder::AskLadder;
use super::bid_ladder::BidLadder;

/// Order book for a single trading pair
pub struct OrderBook {
    symbol: MarketId,
    clock: Arc<dyn Clock>,
    inner: Mutex<BookInner>,
}

/// Ladders plus the order directory, guarded together
#[derive(Debug)]
struct BookInner {
    bids: BidLadder,
    asks: AskLadder,
    /// Every resting order of both sides, keyed by id. An id is present
    /// here iff the order rests on one of the ladders.
    orders: HashMap<OrderId, Order>,
}

/// Ladder view captured under one lock acquisition
#[derive(Debug, Clone)]
pub struct BookView {
    pub best_bid: Option<Price>,
    pub best_ask: Option<Price>,
    /// Top levels as (price, aggregated remaining quantity), best first
    pub bid_depth: Vec<(Price, Quantity)>,
    pub ask_depth: Vec<(Price, Quantity)>,
}

impl OrderBook {
    /// Create an empty book for the given pair
    pub fn new(symbol: MarketId, clock: Arc<dyn Clock>) -> Self {
        Self {
            symbol,
            clock,
            inner: Mutex::new(BookInner {
                bids: BidLadder::new(),
                asks: AskLadder::new(),
                orders: HashMap::new(),
            }),
        }
    }

    /// The pair this book serves
    pub fn trading_pair(&self) -> &MarketId {
        &self.symbol
    }

    /// Match an incoming order, then park any unfilled limit remainder
    ///
    /// Returns the trades produced, in execution order. A market order that
    /// exhausts the opposite side has its residual dropped; it never rests.
    pub fn insert(&self, mut order: Order) -> Result<Vec<Trade>, BookError> {
        if order.symbol != self.symbol {
            return Err(BookError::WrongPair {
                order: order.symbol.as_str().to_string(),
                book: self.symbol.as_str().to_string(),
            });
        }

        let mut inner = self.lock();
        let trades = inner.match_order(&mut order, self.clock.as_ref());

        if order.order_type == OrderType::Limit && !order.is_filled() {
            let price = order.price.expect("limit order always carries a price");
            match order.side {
                Side::Buy => {
                    inner
                        .bids
                        .insert(price, order.order_id, order.remaining_quantity())
                }
                Side::Sell => {
                    inner
                        .asks
                        .insert(price, order.order_id, order.remaining_quantity())
                }
            }
            inner.orders.insert(order.order_id, order);
        }

        Ok(trades)
    }

    /// Cancel a resting order
    ///
    /// Returns true iff the order was found. Unknown ids (including already
    /// filled or canceled orders, which have left the directory) are not an
    /// error.
    pub fn cancel(&self, order_id: OrderId) -> bool {
        let mut inner = self.lock();

        let Some(mut order) = inner.orders.remove(&order_id) else {
            return false;
        };

        let price = order.price.expect("resting orders carry a price");
        let removed = match order.side {
            Side::Buy => inner.bids.remove(order_id, price),
            Side::Sell => inner.asks.remove(order_id, price),
        };
        debug_assert!(removed, "resting order missing from its ladder");

        order.cancel(self.clock.now());
        true
    }

    /// Best bid price, or None when the bid side is empty
    pub fn best_bid(&self) -> Option<Price> {
        self.lock().bids.best_price()
    }

    /// Best ask price, or None when the ask side is empty
    pub fn best_ask(&self) -> Option<Price> {
        self.lock().asks.best_price()
    }

    /// Aggregated bid depth, best first, at most `levels` entries
    pub fn bid_depth(&self, levels: usize) -> Vec<(Price, Quantity)> {
        self.lock().bids.depth_snapshot(levels)
    }

    /// Aggregated ask depth, best first, at most `levels` entries
    pub fn ask_depth(&self, levels: usize) -> Vec<(Price, Quantity)> {
        self.lock().asks.depth_snapshot(levels)
    }

    /// Best prices and depth of both sides under one lock acquisition
    pub fn view(&self, levels: usize) -> BookView {
        let inner = self.lock();
        BookView {
            best_bid: inner.bids.best_price(),
            best_ask: inner.asks.best_price(),
            bid_depth: inner.bids.depth_snapshot(levels),
            ask_depth: inner.asks.depth_snapshot(levels),
        }
    }

    /// Clones of every resting order owned by `user`, in unspecified order
    ///
    /// The clones stay readable after the lock is released; canceled and
    /// filled orders are no longer visible.
    pub fn user_orders(&self, user: &UserId) -> Vec<Order> {
        self.lock()
            .orders
            .values()
            .filter(|order| &order.user_id == user)
            .cloned()
            .collect()
    }

    /// Number of resting orders across both sides
    pub fn order_count(&self) -> usize {
        self.lock().orders.len()
    }

    fn lock(&self) -> MutexGuard<'_, BookInner> {
        self.inner.lock().expect("book lock poisoned")
    }
}

impl BookInner {
    /// Price-time priority matching loop
    ///
    /// Re-reads the best opposite level every round, so strictly better
    /// prices are exhausted before a worse level is touched and entries
    /// within a level fill in arrival order. Fully filled makers are
    /// evicted from both their level and the directory.
    fn match_order(&mut self, taker: &mut Order, clock: &dyn Clock) -> Vec<Trade> {
        let mut trades = Vec::new();

        while !taker.is_filled() {
            let front = match taker.side {
                Side::Buy => self.asks.peek_front(),
                Side::Sell => self.bids.peek_front(),
            };
            let Some((level_price, maker_id, _)) = front else {
                break;
            };

            if !crossing::price_acceptable(taker.side, taker.price, level_price) {
                break;
            }

            let maker = self
                .orders
                .get_mut(&maker_id)
                .expect("ladder entry without directory record");

            let fill = taker.remaining_quantity().min(maker.remaining_quantity());
            let trade = executor::apply_fill(taker, maker, level_price, fill, clock.now());
            let maker_filled = maker.is_filled();
            trades.push(trade);

            match taker.side {
                Side::Buy => self.asks.reduce_front(fill),
                Side::Sell => self.bids.reduce_front(fill),
            }
            if maker_filled {
                self.orders.remove(&maker_id);
            }
        }

        trades
    }
}
