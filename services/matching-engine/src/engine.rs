//! Matching engine facade
//!
//! Owns the set of order books, allocates order ids, validates submissions
//! and presents consolidated market-data and user-order queries. Books are
//! created by explicit pair registration and live for the engine lifetime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use types::errors::EngineError;
use types::ids::{MarketId, OrderId, UserId};
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderType, Side};
use types::trade::Trade;

use crate::book::OrderBook;
use crate::clock::{Clock, SystemClock};

/// Number of price levels returned by market-data snapshots
pub const DEFAULT_DEPTH: usize = 10;

/// Thread-safe registry of order books with engine-wide id allocation
///
/// Registry lookups and id allocation never overlap a book's lock; books
/// never call back into the engine, so the engine → book lock order holds.
pub struct MatchingEngine {
    /// Order books per pair symbol; never removed once registered
    books: DashMap<String, Arc<OrderBook>>,
    /// Last allocated order id; zero means none allocated yet
    order_counter: AtomicU64,
    clock: Arc<dyn Clock>,
}

/// Consolidated market-data snapshot for one pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketData {
    pub best_bid: Option<Price>,
    pub best_ask: Option<Price>,
    /// Best ask minus best bid; zero when either side is empty
    pub spread: Decimal,
    /// Bid levels as (price, aggregated remaining quantity), best first
    pub bid_depth: Vec<(Price, Quantity)>,
    /// Ask levels as (price, aggregated remaining quantity), best first
    pub ask_depth: Vec<(Price, Quantity)>,
}

impl MatchingEngine {
    /// Create an engine with the wall clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an engine with a caller-supplied time source
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            books: DashMap::new(),
            order_counter: AtomicU64::new(0),
            clock,
        }
    }

    /// Register a trading pair
    ///
    /// Idempotent: returns true on first creation, false if the pair is
    /// already present. Pairs are never removed.
    pub fn register_pair(&self, symbol: impl Into<String>) -> bool {
        let symbol = symbol.into();
        let mut created = false;

        self.books.entry(symbol.clone()).or_insert_with(|| {
            created = true;
            Arc::new(OrderBook::new(
                MarketId::new(symbol.clone()),
                Arc::clone(&self.clock),
            ))
        });

        if created {
            info!(symbol = %symbol, "registered trading pair");
        }
        created
    }

    /// Validate a submission, allocate an id and route it to its book
    ///
    /// Returns the trades produced, in execution order. A rejected
    /// submission allocates no id and leaves every book untouched. A market
    /// order that exhausts the opposite side returns the partial trade
    /// list; its residual is discarded.
    pub fn submit(
        &self,
        user: impl Into<UserId>,
        symbol: &str,
        side: Side,
        order_type: OrderType,
        price: Option<Decimal>,
        quantity: Decimal,
    ) -> Result<Vec<Trade>, EngineError> {
        let quantity = Quantity::try_new(quantity).ok_or_else(|| {
            EngineError::InvalidArgument("quantity must be positive".to_string())
        })?;

        let price = match order_type {
            OrderType::Limit => {
                let limit = price.ok_or_else(|| {
                    EngineError::InvalidArgument("limit orders require a price".to_string())
                })?;
                Some(Price::try_new(limit).ok_or_else(|| {
                    EngineError::InvalidArgument("limit price must be positive".to_string())
                })?)
            }
            // Market orders sweep the opposite side; any supplied price is ignored
            OrderType::Market => None,
        };

        let book = self
            .books
            .get(symbol)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| EngineError::UnknownPair {
                symbol: symbol.to_string(),
            })?;

        // Ids are allocated only after validation, so a failed submit
        // leaves the counter untouched
        let order_id = OrderId::new(self.order_counter.fetch_add(1, Ordering::SeqCst) + 1);
        let order = Order::new(
            order_id,
            user.into(),
            book.trading_pair().clone(),
            side,
            order_type,
            price,
            quantity,
            self.clock.now(),
        );

        let trades = book.insert(order)?;
        debug!(
            order_id = order_id.as_u64(),
            symbol,
            trades = trades.len(),
            "order processed"
        );
        Ok(trades)
    }

    /// Cancel an order on the given pair
    ///
    /// Returns false when the symbol is unknown or the id is absent; never
    /// an error.
    pub fn cancel(&self, order_id: OrderId, symbol: &str) -> bool {
        let Some(book) = self.books.get(symbol).map(|entry| Arc::clone(entry.value())) else {
            return false;
        };

        let canceled = book.cancel(order_id);
        debug!(order_id = order_id.as_u64(), symbol, canceled, "cancel request");
        canceled
    }

    /// Snapshot best prices, spread and depth for one pair
    pub fn market_data(&self, symbol: &str) -> Result<MarketData, EngineError> {
        let book = self
            .books
            .get(symbol)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| EngineError::UnknownPair {
                symbol: symbol.to_string(),
            })?;

        let view = book.view(DEFAULT_DEPTH);
        let spread = match (view.best_bid, view.best_ask) {
            (Some(bid), Some(ask)) => ask.as_decimal() - bid.as_decimal(),
            _ => Decimal::ZERO,
        };

        Ok(MarketData {
            best_bid: view.best_bid,
            best_ask: view.best_ask,
            spread,
            bid_depth: view.bid_depth,
            ask_depth: view.ask_depth,
        })
    }

    /// Resting orders owned by `user` on the given pair
    ///
    /// Empty when the symbol is unknown.
    pub fn user_orders(&self, user: impl Into<UserId>, symbol: &str) -> Vec<Order> {
        match self.books.get(symbol) {
            Some(book) => book.user_orders(&user.into()),
            None => Vec::new(),
        }
    }

    /// Total orders ever accepted (the id high-water mark)
    pub fn total_orders(&self) -> u64 {
        self.order_counter.load(Ordering::SeqCst)
    }

    /// Number of registered trading pairs
    pub fn pair_count(&self) -> usize {
        self.books.len()
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}
