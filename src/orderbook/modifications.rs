//! Cancellation and modification paths.

use super::book::{BookState, OrderBook};
use super::order::OrderModify;
use super::trade::Trades;
use super::types::OrderId;
use tracing::trace;

impl OrderBook {
    /// Cancel a resting order. Unknown ids are a no-op.
    pub fn cancel_order(&self, order_id: OrderId) {
        trace!("Order book {}: cancelling order {}", self.symbol(), order_id);
        let mut book = self.shared().book.lock();
        book.cancel_internal(order_id);
    }

    /// Cancel a batch of orders under a single lock acquisition.
    pub fn cancel_orders(&self, order_ids: &[OrderId]) {
        trace!(
            "Order book {}: cancelling batch of {} orders",
            self.symbol(),
            order_ids.len()
        );
        let mut book = self.shared().book.lock();
        for &order_id in order_ids {
            book.cancel_internal(order_id);
        }
    }

    /// Replace a resting order with new price, side, and quantity. The
    /// replacement inherits the original's discipline and loses time
    /// priority. Returns the trades produced by re-admitting it, empty if
    /// the target id is not live.
    ///
    /// The discipline read, the cancel, and the re-add happen in one
    /// critical section, so no concurrent cancel can slip in between.
    pub fn modify_order(&self, modify: OrderModify) -> Trades {
        trace!(
            "Order book {}: modifying order {} to {} {}@{}",
            self.symbol(),
            modify.id(),
            modify.side(),
            modify.quantity(),
            modify.price()
        );
        let mut book = self.shared().book.lock();

        let inherited = match book.index.get(&modify.id()) {
            Some(&handle) => book.orders[handle].order.order_type(),
            None => return Trades::new(),
        };

        book.cancel_internal(modify.id());
        book.admit(modify.to_order(inherited))
    }
}

impl BookState {
    /// Cancel under an already-held lock: O(1) splice via the arena handle,
    /// level teardown, level-data removal with the remaining quantity.
    pub(super) fn cancel_internal(&mut self, order_id: OrderId) {
        let handle = match self.index.get(&order_id) {
            Some(&handle) => handle,
            None => return,
        };

        let order = self.unlink(handle);
        self.on_order_cancelled(&order);
    }
}
