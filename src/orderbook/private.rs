//! Internal predicates and index upkeep shared by the public operations.

use super::book::{BookState, Handle, Level, LevelAction, OrderNode};
use super::order::{Order, OrderType, Side};
use super::types::{OrderId, OrderIds, Price, Quantity};

impl BookState {
    /// True iff an order on `side` at `price` would cross the opposing best.
    pub(super) fn can_match(&self, side: Side, price: Price) -> bool {
        match side {
            Side::Buy => match self.best_ask() {
                Some(best_ask) => price >= best_ask,
                None => false,
            },
            Side::Sell => match self.best_bid() {
                Some(best_bid) => price <= best_bid,
                None => false,
            },
        }
    }

    /// True iff the opposing side holds enough liquidity at or better than
    /// `price` to absorb `quantity` in full.
    ///
    /// Walks the aggregated level data over the marketable range only. The
    /// mirror is keyed by price across both sides, which is sound here: at
    /// rest no price is present on both sides, and same-side levels cannot
    /// fall inside the opposing marketable range.
    pub(super) fn can_fully_fill(&self, side: Side, price: Price, quantity: Quantity) -> bool {
        if !self.can_match(side, price) {
            return false;
        }

        let mut needed = quantity;
        match side {
            Side::Buy => {
                let best_ask = self.best_ask().expect("crossable book has an ask");
                for data in self.level_data.range(best_ask..=price).map(|(_, d)| d) {
                    if needed <= data.quantity {
                        return true;
                    }
                    needed -= data.quantity;
                }
            }
            Side::Sell => {
                let best_bid = self.best_bid().expect("crossable book has a bid");
                for data in self.level_data.range(price..=best_bid).rev().map(|(_, d)| d) {
                    if needed <= data.quantity {
                        return true;
                    }
                    needed -= data.quantity;
                }
            }
        }

        false
    }

    /// Apply one transition to the level-data mirror. The key is erased as
    /// soon as its live-order count reaches zero.
    pub(super) fn update_level_data(&mut self, price: Price, quantity: Quantity, action: LevelAction) {
        let data = self.level_data.entry(price).or_default();

        match action {
            LevelAction::Add => {
                data.count += 1;
                data.quantity += quantity;
            }
            LevelAction::Remove => {
                data.count -= 1;
                data.quantity -= quantity;
            }
            LevelAction::Match => {
                data.quantity -= quantity;
            }
        }

        if data.count == 0 {
            self.level_data.remove(&price);
        }
    }

    pub(super) fn on_order_added(&mut self, order: &Order) {
        self.update_level_data(order.price(), order.remaining_quantity(), LevelAction::Add);
    }

    pub(super) fn on_order_cancelled(&mut self, order: &Order) {
        self.update_level_data(order.price(), order.remaining_quantity(), LevelAction::Remove);
    }

    pub(super) fn on_order_matched(&mut self, price: Price, quantity: Quantity, fully_filled: bool) {
        let action = if fully_filled {
            LevelAction::Remove
        } else {
            LevelAction::Match
        };
        self.update_level_data(price, quantity, action);
    }

    /// Append `order` to the tail of its price level, creating the level if
    /// absent, and record its arena handle in the id index.
    pub(super) fn link_back(&mut self, order: Order) -> Handle {
        let id = order.id();
        let price = order.price();
        let side = order.side();

        let handle = self.orders.insert(OrderNode {
            order,
            prev: None,
            next: None,
        });

        let level = self.levels_mut(side).entry(price).or_insert_with(Level::default);
        let prev_tail = level.tail;
        level.tail = Some(handle);
        if level.head.is_none() {
            level.head = Some(handle);
        }

        if let Some(tail) = prev_tail {
            self.orders[tail].next = Some(handle);
            self.orders[handle].prev = Some(tail);
        }

        self.index.insert(id, handle);
        handle
    }

    /// Splice an order out of its level list, erase the level if it became
    /// empty, and drop the arena node and id-index entry. Purely structural:
    /// the caller fires the matching level-data event.
    pub(super) fn unlink(&mut self, handle: Handle) -> Order {
        let (price, side, prev, next) = {
            let node = &self.orders[handle];
            (node.order.price(), node.order.side(), node.prev, node.next)
        };

        if let Some(prev) = prev {
            self.orders[prev].next = next;
        }
        if let Some(next) = next {
            self.orders[next].prev = prev;
        }

        let mut level_empty = false;
        if let Some(level) = self.levels_mut(side).get_mut(&price) {
            if level.head == Some(handle) {
                level.head = next;
            }
            if level.tail == Some(handle) {
                level.tail = prev;
            }
            level_empty = level.head.is_none();
        }
        if level_empty {
            self.levels_mut(side).remove(&price);
        }

        let node = self.orders.remove(handle);
        self.index.remove(&node.order.id());
        node.order
    }

    /// Ids of all live good-for-day orders, for the pruner's batched cancel.
    pub(super) fn good_for_day_ids(&self) -> OrderIds {
        self.index
            .values()
            .map(|&handle| &self.orders[handle].order)
            .filter(|order| order.order_type() == OrderType::GoodForDay)
            .map(Order::id)
            .collect()
    }

    /// Id of the front order at the best level of `side`, if any.
    pub(super) fn best_front(&self, side: Side) -> Option<(OrderId, OrderType)> {
        let level = match side {
            Side::Buy => self.bids.values().next_back(),
            Side::Sell => self.asks.values().next(),
        }?;
        let handle = level.head?;
        let order = &self.orders[handle].order;
        Some((order.id(), order.order_type()))
    }
}
