//! Price level implementation with FIFO queue
//!
//! A price level groups every resting order at one price on one side of one
//! pair. Entries are kept in arrival order to enforce time priority.

use std::collections::VecDeque;
use types::ids::OrderId;
use types::numeric::Quantity;

/// Orders resting at a single price, earliest first
///
/// Entries mirror the remaining quantity of the order they reference; the
/// directory in the owning book holds the full records.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Queue of entries at this price (FIFO order)
    entries: VecDeque<LevelEntry>,
    /// Total remaining quantity across all entries
    total_quantity: Quantity,
}

/// Entry in the price level queue
#[derive(Debug, Clone)]
struct LevelEntry {
    order_id: OrderId,
    remaining_quantity: Quantity,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            total_quantity: Quantity::zero(),
        }
    }

    /// Append an order at the back of the queue (time priority)
    pub fn insert(&mut self, order_id: OrderId, quantity: Quantity) {
        self.entries.push_back(LevelEntry {
            order_id,
            remaining_quantity: quantity,
        });
        self.total_quantity = self.total_quantity + quantity;
    }

    /// Remove an entry by order id
    ///
    /// Returns the remaining quantity of the removed entry, or None if not found
    pub fn remove(&mut self, order_id: OrderId) -> Option<Quantity> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.order_id == order_id)?;
        let entry = self.entries.remove(position)?;

        self.total_quantity = self.total_quantity.saturating_sub(entry.remaining_quantity);

        Some(entry.remaining_quantity)
    }

    /// Peek at the front entry without removing it
    pub fn peek_front(&self) -> Option<(OrderId, Quantity)> {
        self.entries
            .front()
            .map(|entry| (entry.order_id, entry.remaining_quantity))
    }

    /// Pop the front entry from the queue
    pub fn pop_front(&mut self) -> Option<(OrderId, Quantity)> {
        let entry = self.entries.pop_front()?;

        self.total_quantity = self.total_quantity.saturating_sub(entry.remaining_quantity);

        Some((entry.order_id, entry.remaining_quantity))
    }

    /// Replace the front entry's remaining quantity
    ///
    /// Used after a partial fill. A zero quantity removes the entry.
    pub fn update_front_quantity(&mut self, new_quantity: Quantity) -> bool {
        if let Some(entry) = self.entries.front_mut() {
            let old_quantity = entry.remaining_quantity;

            if new_quantity.is_zero() {
                self.entries.pop_front();
            } else {
                entry.remaining_quantity = new_quantity;
            }

            self.total_quantity =
                self.total_quantity.saturating_sub(old_quantity) + new_quantity;

            true
        } else {
            false
        }
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the total remaining quantity at this price level
    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    /// Get the number of orders at this level
    pub fn order_count(&self) -> usize {
        self.entries.len()
    }
}

impl Default for PriceLevel {
    fn default() -> Self {
        Self::new()
    }
}
