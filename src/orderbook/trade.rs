//! Trade records produced by the matcher.

use super::types::{OrderId, Price, Quantity};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One party's leg of an executed trade: their order id, the price of their
/// own resting quote at match time, and the crossed quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInfo {
    pub order_id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
}

impl TradeInfo {
    pub fn new(order_id: OrderId, price: Price, quantity: Quantity) -> Self {
        Self {
            order_id,
            price,
            quantity,
        }
    }
}

/// An executed cross between one bid and one ask. Both legs carry the same
/// quantity; prices record each party's own quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    execution_id: Uuid,
    bid: TradeInfo,
    ask: TradeInfo,
}

impl Trade {
    pub fn new(bid: TradeInfo, ask: TradeInfo) -> Self {
        debug_assert_eq!(bid.quantity, ask.quantity, "trade legs must match in quantity");
        Self {
            execution_id: Uuid::new_v4(),
            bid,
            ask,
        }
    }

    /// Unique id assigned to this execution.
    pub fn execution_id(&self) -> Uuid {
        self.execution_id
    }

    /// The buy-side leg.
    pub fn bid(&self) -> &TradeInfo {
        &self.bid
    }

    /// The sell-side leg.
    pub fn ask(&self) -> &TradeInfo {
        &self.ask
    }

    /// Quantity crossed, identical on both legs.
    pub fn quantity(&self) -> Quantity {
        self.bid.quantity
    }
}

/// Trades accumulated by a single matcher pass, in execution order.
pub type Trades = Vec<Trade>;
