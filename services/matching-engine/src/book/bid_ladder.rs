//! Bid (buy-side) ladder
//!
//! Maintains buy levels sorted by price, best (highest) first. Uses
//! BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};

use super::price_level::PriceLevel;

/// Bid-side price ladder
///
/// The highest price is the best bid. At each price level, entries are
/// maintained in FIFO order.
#[derive(Debug, Clone)]
pub struct BidLadder {
    /// Price levels; best bid is the last key in ascending BTreeMap order
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidLadder {
    /// Create a new empty bid ladder
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Append an order at the tail of its price level, creating the level
    /// if absent
    pub fn insert(&mut self, price: Price, order_id: OrderId, quantity: Quantity) {
        self.levels
            .entry(price)
            .or_insert_with(PriceLevel::new)
            .insert(order_id, quantity);
    }

    /// Remove a resting order
    ///
    /// Returns true if the order was found. An emptied level is pruned.
    pub fn remove(&mut self, order_id: OrderId, price: Price) -> bool {
        if let Some(level) = self.levels.get_mut(&price) {
            if level.remove(order_id).is_some() {
                if level.is_empty() {
                    self.levels.remove(&price);
                }
                return true;
            }
        }
        false
    }

    /// Get the best bid (highest price)
    pub fn best_price(&self) -> Option<Price> {
        // BTreeMap iterates ascending, so the best bid is the last key
        self.levels.keys().next_back().copied()
    }

    /// Front entry of the best level: (price, order id, remaining quantity)
    pub fn peek_front(&self) -> Option<(Price, OrderId, Quantity)> {
        self.levels.iter().next_back().and_then(|(price, level)| {
            level
                .peek_front()
                .map(|(order_id, quantity)| (*price, order_id, quantity))
        })
    }

    /// Reduce the best level's front entry after a fill
    ///
    /// An entry that reaches zero remaining is evicted; an emptied level is
    /// pruned from the ladder.
    pub fn reduce_front(&mut self, fill: Quantity) {
        if let Some((&price, level)) = self.levels.iter_mut().next_back() {
            if let Some((_, remaining)) = level.peek_front() {
                level.update_front_quantity(remaining.saturating_sub(fill));
            }
            if level.is_empty() {
                self.levels.remove(&price);
            }
        }
    }

    /// Get depth snapshot: top N levels as (price, total remaining), best first
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity)> {
        self.levels
            .iter()
            .rev() // Reverse to get highest prices first
            .take(depth)
            .map(|(price, level)| (*price, level.total_quantity()))
            .collect()
    }

    /// Check if the bid ladder is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

impl Default for BidLadder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qty(s: &str) -> Quantity {
        Quantity::from_str(s).unwrap()
    }

    #[test]
    fn test_bid_ladder_insert() {
        let mut ladder = BidLadder::new();

        ladder.insert(Price::from_u64(2000), OrderId::new(1), qty("1.5"));

        assert_eq!(ladder.level_count(), 1);
        assert!(!ladder.is_empty());
    }

    #[test]
    fn test_bid_ladder_best_price() {
        let mut ladder = BidLadder::new();

        ladder.insert(Price::from_u64(2000), OrderId::new(1), qty("1.0"));
        ladder.insert(Price::from_u64(2010), OrderId::new(2), qty("2.0"));
        ladder.insert(Price::from_u64(1990), OrderId::new(3), qty("1.5"));

        // Highest price wins on the bid side
        assert_eq!(ladder.best_price(), Some(Price::from_u64(2010)));
    }

    #[test]
    fn test_bid_ladder_peek_front_is_best_level_head() {
        let mut ladder = BidLadder::new();

        ladder.insert(Price::from_u64(2000), OrderId::new(1), qty("1.0"));
        ladder.insert(Price::from_u64(2010), OrderId::new(2), qty("2.0"));
        ladder.insert(Price::from_u64(2010), OrderId::new(3), qty("0.5"));

        let (price, order_id, quantity) = ladder.peek_front().unwrap();
        assert_eq!(price, Price::from_u64(2010));
        assert_eq!(order_id, OrderId::new(2));
        assert_eq!(quantity, qty("2.0"));
    }

    #[test]
    fn test_bid_ladder_remove_prunes_level() {
        let mut ladder = BidLadder::new();

        ladder.insert(Price::from_u64(2000), OrderId::new(1), qty("1.0"));
        assert_eq!(ladder.level_count(), 1);

        assert!(ladder.remove(OrderId::new(1), Price::from_u64(2000)));
        assert!(ladder.is_empty());

        assert!(!ladder.remove(OrderId::new(1), Price::from_u64(2000)));
    }

    #[test]
    fn test_bid_ladder_reduce_front() {
        let mut ladder = BidLadder::new();

        ladder.insert(Price::from_u64(2000), OrderId::new(1), qty("1.5"));
        ladder.insert(Price::from_u64(2000), OrderId::new(2), qty("1.0"));

        // Partial fill of the head entry
        ladder.reduce_front(qty("0.5"));
        let (_, order_id, remaining) = ladder.peek_front().unwrap();
        assert_eq!(order_id, OrderId::new(1));
        assert_eq!(remaining, qty("1.0"));

        // Filling the head entirely promotes the next entry
        ladder.reduce_front(qty("1.0"));
        let (_, order_id, _) = ladder.peek_front().unwrap();
        assert_eq!(order_id, OrderId::new(2));

        // Emptying the level prunes it
        ladder.reduce_front(qty("1.0"));
        assert!(ladder.is_empty());
    }

    #[test]
    fn test_bid_ladder_depth_snapshot() {
        let mut ladder = BidLadder::new();

        ladder.insert(Price::from_u64(2000), OrderId::new(1), qty("1.0"));
        ladder.insert(Price::from_u64(2010), OrderId::new(2), qty("2.0"));
        ladder.insert(Price::from_u64(1990), OrderId::new(3), qty("1.5"));
        ladder.insert(Price::from_u64(2020), OrderId::new(4), qty("0.5"));

        let depth = ladder.depth_snapshot(2);

        // Top 2 levels, highest prices first
        assert_eq!(depth.len(), 2);
        assert_eq!(depth[0], (Price::from_u64(2020), qty("0.5")));
        assert_eq!(depth[1], (Price::from_u64(2010), qty("2.0")));
    }

    #[test]
    fn test_bid_ladder_aggregates_level_quantity() {
        let mut ladder = BidLadder::new();

        ladder.insert(Price::from_u64(2000), OrderId::new(1), qty("1.0"));
        ladder.insert(Price::from_u64(2000), OrderId::new(2), qty("2.0"));

        assert_eq!(ladder.level_count(), 1);
        let depth = ladder.depth_snapshot(10);
        assert_eq!(depth[0], (Price::from_u64(2000), qty("3.0")));
    }
}
