//! Crossing detection logic
//!
//! Determines whether an incoming order may trade at a resting level's price.

use types::numeric::Price;
use types::order::Side;

/// Check if a resting level's price is acceptable for the incoming order
///
/// Market orders carry no limit (`None`) and accept any level. A limit buy
/// matches levels at or below its price; a limit sell matches levels at or
/// above.
pub fn price_acceptable(taker_side: Side, taker_limit: Option<Price>, level_price: Price) -> bool {
    match taker_limit {
        None => true,
        Some(limit) => match taker_side {
            Side::Buy => level_price <= limit,
            Side::Sell => level_price >= limit,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_buy_crossing() {
        let limit = Some(Price::from_u64(2000));

        assert!(price_acceptable(Side::Buy, limit, Price::from_u64(1990)));
        assert!(price_acceptable(Side::Buy, limit, Price::from_u64(2000)));
        assert!(!price_acceptable(Side::Buy, limit, Price::from_u64(2010)));
    }

    #[test]
    fn test_limit_sell_crossing() {
        let limit = Some(Price::from_u64(2000));

        assert!(price_acceptable(Side::Sell, limit, Price::from_u64(2010)));
        assert!(price_acceptable(Side::Sell, limit, Price::from_u64(2000)));
        assert!(!price_acceptable(Side::Sell, limit, Price::from_u64(1990)));
    }

    #[test]
    fn test_market_order_accepts_any_level() {
        assert!(price_acceptable(Side::Buy, None, Price::from_u64(1)));
        assert!(price_acceptable(Side::Buy, None, Price::from_u64(1_000_000)));
        assert!(price_acceptable(Side::Sell, None, Price::from_u64(1)));
    }
}
