//! Trade records emitted by the matching engine
//!
//! A trade is produced at the instant of a match and returned to the
//! submitter; the engine keeps no trade history. This shape is the one
//! data type consumed by settlement collaborators and must stay stable.

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single execution between a resting order and an incoming order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    /// Execution price, the resting order's limit price
    pub price: Price,
    pub quantity: Quantity,
    pub executed_at: i64, // Unix nanos
}

impl Trade {
    /// Create a new trade record
    pub fn new(
        buy_order_id: OrderId,
        sell_order_id: OrderId,
        price: Price,
        quantity: Quantity,
        executed_at: i64,
    ) -> Self {
        Self {
            buy_order_id,
            sell_order_id,
            price,
            quantity,
            executed_at,
        }
    }

    /// Calculate trade value (price × quantity)
    pub fn trade_value(&self) -> Decimal {
        self.quantity.as_decimal() * self.price.as_decimal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_creation() {
        let trade = Trade::new(
            OrderId::new(1),
            OrderId::new(2),
            Price::from_u64(2000),
            Quantity::from_str("0.5").unwrap(),
            1708123456789000000,
        );

        assert_eq!(trade.buy_order_id, OrderId::new(1));
        assert_eq!(trade.sell_order_id, OrderId::new(2));
        assert_ne!(trade.buy_order_id, trade.sell_order_id);
    }

    #[test]
    fn test_trade_value() {
        let trade = Trade::new(
            OrderId::new(1),
            OrderId::new(2),
            Price::from_u64(2000),
            Quantity::from_str("0.5").unwrap(),
            1708123456789000000,
        );

        assert_eq!(trade.trade_value(), Decimal::from(1000));
    }

    #[test]
    fn test_trade_serialization() {
        let trade = Trade::new(
            OrderId::new(7),
            OrderId::new(8),
            Price::from_str("100.5").unwrap(),
            Quantity::from_str("3").unwrap(),
            1708123456789000000,
        );

        let json = serde_json::to_string(&trade).unwrap();
        let deserialized: Trade = serde_json::from_str(&json).unwrap();

        assert_eq!(trade, deserialized);
    }
}
