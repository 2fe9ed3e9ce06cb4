//! Order lifecycle types
//!
//! An order carries immutable identity (id, owner, pair, side, type, limit
//! price, original quantity) plus the fill state mutated by the owning book.

use crate::ids::{MarketId, OrderId, UserId};
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Sweeps the opposite side at any price; never rests
    Market,
    /// Matches at its limit price or better; the remainder rests
    Limit,
}

/// Order status
///
/// ```text
/// Pending --> Partial --> Filled
///    |           |
///    +--------> Canceled
/// ```
///
/// Filled and Canceled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Accepted, no fills yet
    Pending,
    /// Partially matched
    Partial,
    /// Completely matched (terminal)
    Filled,
    /// Canceled by the owner (terminal)
    Canceled,
}

impl OrderStatus {
    /// Check if status is terminal (no further transitions possible)
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Canceled)
    }
}

/// A single order
///
/// Owned by the book it rests in; queries hand out clones, so a returned
/// order stays readable after the book lock is released.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub symbol: MarketId,
    pub side: Side,
    pub order_type: OrderType,
    /// Limit price; `None` for market orders
    pub price: Option<Price>,
    /// Original quantity
    pub quantity: Quantity,
    /// Cumulative filled quantity, never exceeds `quantity`
    pub filled_quantity: Quantity,
    pub status: OrderStatus,
    pub created_at: i64, // Unix nanos
    pub updated_at: i64, // Unix nanos
}

impl Order {
    /// Create a new pending order
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        order_id: OrderId,
        user_id: UserId,
        symbol: MarketId,
        side: Side,
        order_type: OrderType,
        price: Option<Price>,
        quantity: Quantity,
        timestamp: i64,
    ) -> Self {
        Self {
            order_id,
            user_id,
            symbol,
            side,
            order_type,
            price,
            quantity,
            filled_quantity: Quantity::zero(),
            status: OrderStatus::Pending,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Unfilled quantity, derived as original minus filled
    pub fn remaining_quantity(&self) -> Quantity {
        self.quantity.saturating_sub(self.filled_quantity)
    }

    /// Check if order is completely filled
    pub fn is_filled(&self) -> bool {
        self.filled_quantity == self.quantity
    }

    /// Check if order has any fills
    pub fn has_fills(&self) -> bool {
        !self.filled_quantity.is_zero()
    }

    /// Update filled quantity and adjust status
    ///
    /// # Panics
    /// Panics if the fill would exceed the order quantity
    pub fn add_fill(&mut self, fill_quantity: Quantity, timestamp: i64) {
        let new_filled = self.filled_quantity + fill_quantity;

        assert!(
            new_filled.as_decimal() <= self.quantity.as_decimal(),
            "Fill would exceed order quantity"
        );

        self.filled_quantity = new_filled;

        if self.is_filled() {
            self.status = OrderStatus::Filled;
        } else if self.has_fills() {
            self.status = OrderStatus::Partial;
        }

        self.updated_at = timestamp;
    }

    /// Cancel the order
    ///
    /// # Panics
    /// Panics if the order is already in a terminal state
    pub fn cancel(&mut self, timestamp: i64) {
        assert!(!self.status.is_terminal(), "Cannot cancel terminal order");

        self.status = OrderStatus::Canceled;
        self.updated_at = timestamp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit_buy(qty: &str) -> Order {
        Order::new(
            OrderId::new(1),
            UserId::new("u1"),
            MarketId::new("ETH/USDT"),
            Side::Buy,
            OrderType::Limit,
            Some(Price::from_u64(2000)),
            Quantity::from_str(qty).unwrap(),
            1708123456789000000,
        )
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_order_creation() {
        let order = limit_buy("1.0");

        assert_eq!(order.status, OrderStatus::Pending);
        assert!(!order.has_fills());
        assert_eq!(order.remaining_quantity(), order.quantity);
    }

    #[test]
    fn test_market_order_has_no_price() {
        let order = Order::new(
            OrderId::new(2),
            UserId::new("u2"),
            MarketId::new("ETH/USDT"),
            Side::Sell,
            OrderType::Market,
            None,
            Quantity::from_str("0.5").unwrap(),
            1708123456789000000,
        );

        assert_eq!(order.price, None);
        assert_eq!(order.order_type, OrderType::Market);
    }

    #[test]
    fn test_order_fill_transitions() {
        let mut order = limit_buy("1.0");

        // Partial fill
        order.add_fill(Quantity::from_str("0.3").unwrap(), 1708123456790000000);
        assert_eq!(order.status, OrderStatus::Partial);
        assert!(order.has_fills());
        assert!(!order.is_filled());
        assert_eq!(
            order.remaining_quantity(),
            Quantity::from_str("0.7").unwrap()
        );

        // Complete fill
        order.add_fill(Quantity::from_str("0.7").unwrap(), 1708123456791000000);
        assert_eq!(order.status, OrderStatus::Filled);
        assert!(order.is_filled());
        assert!(order.remaining_quantity().is_zero());
    }

    #[test]
    #[should_panic(expected = "Fill would exceed order quantity")]
    fn test_order_overfill_panics() {
        let mut order = limit_buy("1.0");
        order.add_fill(Quantity::from_str("1.5").unwrap(), 1708123456790000000);
    }

    #[test]
    fn test_order_cancel() {
        let mut order = limit_buy("1.0");

        order.cancel(1708123456790000000);
        assert_eq!(order.status, OrderStatus::Canceled);
        assert!(order.status.is_terminal());
    }

    #[test]
    fn test_partial_order_can_cancel() {
        let mut order = limit_buy("1.0");

        order.add_fill(Quantity::from_str("0.4").unwrap(), 1708123456790000000);
        order.cancel(1708123456791000000);
        assert_eq!(order.status, OrderStatus::Canceled);
    }

    #[test]
    #[should_panic(expected = "Cannot cancel terminal order")]
    fn test_cancel_terminal_panics() {
        let mut order = limit_buy("1.0");

        order.add_fill(Quantity::from_str("1.0").unwrap(), 1708123456790000000);
        order.cancel(1708123456791000000);
    }

    #[test]
    fn test_order_serialization() {
        let order = limit_buy("2.5");

        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();

        assert_eq!(order, deserialized);
    }
}
