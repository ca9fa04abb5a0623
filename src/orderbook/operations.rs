//! Order admission: discipline checks, market promotion, insertion.

use super::book::{BookState, OrderBook};
use super::order::{Order, OrderType, Side};
use super::trade::Trades;
use tracing::trace;

impl OrderBook {
    /// Submit an order. Returns the trades produced by matching it, which is
    /// empty both when the order rests unmatched and when admission refuses
    /// it (duplicate id, unmatchable FillAndKill, infeasible FillOrKill, or
    /// a Market order against an empty opposing side).
    pub fn add_order(&self, order: Order) -> Trades {
        trace!("Order book {}: adding {}", self.symbol(), order);
        let mut book = self.shared().book.lock();
        book.admit(order)
    }
}

impl BookState {
    /// Admission + insertion + matching, under the caller's lock.
    pub(super) fn admit(&mut self, mut order: Order) -> Trades {
        if self.index.contains_key(&order.id()) {
            return Trades::new();
        }

        if order.order_type() == OrderType::FillAndKill
            && !self.can_match(order.side(), order.price())
        {
            return Trades::new();
        }

        // A market order participates fully at any achievable price: pin it
        // to the opposing worst and let it flow through the regular matcher.
        if order.order_type() == OrderType::Market {
            let worst = match order.side() {
                Side::Buy => self.worst_ask(),
                Side::Sell => self.worst_bid(),
            };
            match worst {
                Some(price) => order.to_good_till_cancel(price),
                None => return Trades::new(),
            }
        }

        if order.order_type() == OrderType::FillOrKill
            && !self.can_fully_fill(order.side(), order.price(), order.initial_quantity())
        {
            return Trades::new();
        }

        self.on_order_added(&order);
        self.link_back(order);

        self.match_orders()
    }
}
