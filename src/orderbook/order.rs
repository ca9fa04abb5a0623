//! Order and order-modification types.

use super::types::{OrderId, Price, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the book an order rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side this order matches against.
    pub fn opposite(&self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Lifecycle discipline attached to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    /// Rests until filled or explicitly cancelled.
    GoodTillCancel,
    /// Matches what it can immediately; any unfilled remainder is cancelled.
    FillAndKill,
    /// Admitted only if the full quantity can be absorbed immediately.
    FillOrKill,
    /// Rests like GTC but is cancelled by the pruner at day close.
    GoodForDay,
    /// Promoted at admission to GTC pinned at the opposing worst price.
    Market,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::GoodTillCancel => write!(f, "GTC"),
            OrderType::FillAndKill => write!(f, "FAK"),
            OrderType::FillOrKill => write!(f, "FOK"),
            OrderType::GoodForDay => write!(f, "GFD"),
            OrderType::Market => write!(f, "MKT"),
        }
    }
}

/// A single order. Mutable state is limited to the remaining quantity and,
/// for market orders, the one-time promotion to a concrete price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    order_type: OrderType,
    id: OrderId,
    side: Side,
    price: Price,
    initial_quantity: Quantity,
    remaining_quantity: Quantity,
}

impl Order {
    pub fn new(
        order_type: OrderType,
        id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            order_type,
            id,
            side,
            price,
            initial_quantity: quantity,
            remaining_quantity: quantity,
        }
    }

    /// A market order carries no price of its own; admission pins it to the
    /// opposing worst before it reaches the book.
    pub fn market(id: OrderId, side: Side, quantity: Quantity) -> Self {
        Self::new(OrderType::Market, id, side, 0, quantity)
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn initial_quantity(&self) -> Quantity {
        self.initial_quantity
    }

    pub fn remaining_quantity(&self) -> Quantity {
        self.remaining_quantity
    }

    pub fn filled_quantity(&self) -> Quantity {
        self.initial_quantity - self.remaining_quantity
    }

    pub fn is_filled(&self) -> bool {
        self.remaining_quantity == 0
    }

    /// Consume `quantity` from the remaining amount.
    ///
    /// Panics if asked to fill more than remains; the matcher never crosses
    /// more than `min(remaining, remaining)` so this is an internal invariant.
    pub fn fill(&mut self, quantity: Quantity) {
        assert!(
            quantity <= self.remaining_quantity,
            "order {} cannot fill {} with only {} remaining",
            self.id,
            quantity,
            self.remaining_quantity
        );
        self.remaining_quantity -= quantity;
    }

    /// Promote a market order to GoodTillCancel at a concrete price.
    ///
    /// Panics on a zero price: a resting GTC order must carry a real quote.
    pub fn to_good_till_cancel(&mut self, price: Price) {
        assert!(price > 0, "order {} promoted to GTC at price zero", self.id);
        self.order_type = OrderType::GoodTillCancel;
        self.price = price;
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}@{} ({}/{} filled)",
            self.order_type,
            self.id,
            self.side,
            self.remaining_quantity,
            self.price,
            self.filled_quantity(),
            self.initial_quantity
        )
    }
}

/// Replacement descriptor for an existing order. The discipline is inherited
/// from the order it replaces when converted via [`OrderModify::to_order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderModify {
    id: OrderId,
    side: Side,
    price: Price,
    quantity: Quantity,
}

impl OrderModify {
    pub fn new(id: OrderId, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            id,
            side,
            price,
            quantity,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Build the fresh order that replaces the cancelled one.
    pub fn to_order(&self, order_type: OrderType) -> Order {
        Order::new(order_type, self.id, self.side, self.price, self.quantity)
    }
}
