//! The crossing loop at the heart of the engine.

use super::book::BookState;
use super::order::{OrderType, Side};
use super::trade::{Trade, TradeInfo, Trades};

impl BookState {
    /// Match the book to quiescence: while the best bid crosses the best
    /// ask, consume the front order of each best level in FIFO order.
    ///
    /// Each cross fills both fronts by the smaller remaining quantity and
    /// emits one trade whose legs report each party's own resting price.
    /// Filled orders are popped from their queue, the arena, and the id
    /// index; a level that empties is erased from its side map.
    pub(super) fn match_orders(&mut self) -> Trades {
        let mut trades = Trades::new();

        loop {
            let (bid_price, bid_front) = match self.bids.iter().next_back() {
                Some((price, level)) => (*price, level.head),
                None => break,
            };
            let (ask_price, ask_front) = match self.asks.iter().next() {
                Some((price, level)) => (*price, level.head),
                None => break,
            };

            if bid_price < ask_price {
                break;
            }

            let bid_handle = bid_front.expect("resting level is never empty");
            let ask_handle = ask_front.expect("resting level is never empty");

            let quantity = self.orders[bid_handle]
                .order
                .remaining_quantity()
                .min(self.orders[ask_handle].order.remaining_quantity());

            self.orders[bid_handle].order.fill(quantity);
            self.orders[ask_handle].order.fill(quantity);

            let bid_filled = self.orders[bid_handle].order.is_filled();
            let ask_filled = self.orders[ask_handle].order.is_filled();

            trades.push(Trade::new(
                TradeInfo::new(self.orders[bid_handle].order.id(), bid_price, quantity),
                TradeInfo::new(self.orders[ask_handle].order.id(), ask_price, quantity),
            ));

            if bid_filled {
                self.unlink(bid_handle);
            }
            if ask_filled {
                self.unlink(ask_handle);
            }

            self.on_order_matched(bid_price, quantity, bid_filled);
            self.on_order_matched(ask_price, quantity, ask_filled);
        }

        // A partially filled FillAndKill order must not rest once it stops
        // crossing. Only the best fronts can hold one here: admission and
        // matching run single-threaded under the book lock.
        if let Some((order_id, OrderType::FillAndKill)) = self.best_front(Side::Buy) {
            self.cancel_internal(order_id);
        }
        if let Some((order_id, OrderType::FillAndKill)) = self.best_front(Side::Sell) {
            self.cancel_internal(order_id);
        }

        trades
    }
}
