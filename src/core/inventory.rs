use super::types::ItemId;
use serde::{Deserialize, Serialize};

/// Mutable stock state of one item.
///
/// Levels are unsigned, so non-negativity holds by construction. Every
/// transfer goes through a method that keeps the cumulative flow counters
/// in step with the levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub item: ItemId,
    pub on_hand: u64,
    pub in_transit: u64,
    pub backordered: u64,
    pub initial_level: u64,
    pub ordered: u64,
    pub received: u64,
    pub consumed: u64,
    pub produced: u64,
    pub shipped: u64,
    pub lost: u64,
}

impl InventoryRecord {
    pub fn new(item: ItemId, initial_level: u64) -> Self {
        Self {
            item,
            on_hand: initial_level,
            in_transit: 0,
            backordered: 0,
            initial_level,
            ordered: 0,
            received: 0,
            consumed: 0,
            produced: 0,
            shipped: 0,
            lost: 0,
        }
    }

    /// Units ordered from the supplier, not yet arrived
    pub fn place_on_order(&mut self, quantity: u64) {
        self.in_transit += quantity;
        self.ordered += quantity;
    }

    /// Move an arrived order from transit to stock
    pub fn receive(&mut self, quantity: u64) {
        debug_assert!(self.in_transit >= quantity, "arrival exceeds in-transit quantity");
        self.in_transit = self.in_transit.saturating_sub(quantity);
        self.on_hand += quantity;
        self.received += quantity;
    }

    /// Remove units for production; leaves the record untouched when short
    pub fn consume(&mut self, quantity: u64) -> bool {
        if self.on_hand < quantity {
            return false;
        }
        self.on_hand -= quantity;
        self.consumed += quantity;
        true
    }

    pub fn add_produced(&mut self, quantity: u64) {
        self.on_hand += quantity;
        self.produced += quantity;
    }

    /// Ship up to `wanted` units, returning how many left the warehouse
    pub fn ship(&mut self, wanted: u64) -> u64 {
        let shipped = wanted.min(self.on_hand);
        self.on_hand -= shipped;
        self.shipped += shipped;
        shipped
    }

    pub fn record_lost(&mut self, quantity: u64) {
        self.lost += quantity;
    }

    /// `initial + received + produced == on_hand + consumed + shipped` and
    /// `ordered == received + in_transit`
    pub fn is_balanced(&self) -> bool {
        self.initial_level + self.received + self.produced == self.on_hand + self.consumed + self.shipped
            && self.ordered == self.received + self.in_transit
    }
}
