//! Core order book: the indexed book state and the engine that owns it.

use super::config::EngineConfig;
use super::error::OrderBookError;
use super::order::{Order, Side};
use super::pool::ThreadPool;
use super::pruner;
use super::snapshot::{BookView, DepthSnapshot, SnapshotStrategy};
use super::types::{OrderId, Price, Quantity};
use parking_lot::{Condvar, Mutex};
use slab::Slab;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::trace;

/// Arena index of an order node; stays valid for the order's whole life.
pub(super) type Handle = usize;

/// One resting order threaded into its price level's FIFO list.
pub(super) struct OrderNode {
    pub(super) order: Order,
    pub(super) prev: Option<Handle>,
    pub(super) next: Option<Handle>,
}

/// A price level: head and tail of the intrusive FIFO list. A level present
/// in a side map is never empty.
#[derive(Default)]
pub(super) struct Level {
    pub(super) head: Option<Handle>,
    pub(super) tail: Option<Handle>,
}

impl Level {
    /// Iterate order handles in FIFO order.
    pub(super) fn iter<'a>(&self, orders: &'a Slab<OrderNode>) -> LevelIter<'a> {
        LevelIter {
            orders,
            current: self.head,
        }
    }
}

pub(super) struct LevelIter<'a> {
    orders: &'a Slab<OrderNode>,
    current: Option<Handle>,
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        let handle = self.current?;
        self.current = self.orders[handle].next;
        Some(handle)
    }
}

/// Aggregated per-price mirror: live order count and total remaining
/// quantity across both sides. Keyed by price alone; sound because no price
/// rests on both sides at once.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct LevelData {
    pub(super) quantity: Quantity,
    pub(super) count: u64,
}

/// Transition kinds the level-data mirror is updated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LevelAction {
    /// A new order rests at the price.
    Add,
    /// An order left the price entirely (cancelled or fully filled).
    Remove,
    /// An order at the price was partially filled.
    Match,
}

/// Every index the engine maintains. Guarded as a whole by the engine mutex;
/// all four structures stay mutually consistent at every quiescent point.
pub(super) struct BookState {
    pub(super) orders: Slab<OrderNode>,
    pub(super) index: HashMap<OrderId, Handle>,
    pub(super) bids: BTreeMap<Price, Level>,
    pub(super) asks: BTreeMap<Price, Level>,
    pub(super) level_data: BTreeMap<Price, LevelData>,
}

impl BookState {
    pub(super) fn new() -> Self {
        Self {
            orders: Slab::new(),
            index: HashMap::new(),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            level_data: BTreeMap::new(),
        }
    }

    pub(super) fn len(&self) -> usize {
        self.index.len()
    }

    pub(super) fn levels(&self, side: Side) -> &BTreeMap<Price, Level> {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    pub(super) fn levels_mut(&mut self, side: Side) -> &mut BTreeMap<Price, Level> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    pub(super) fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next_back().copied()
    }

    pub(super) fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    /// Highest ask present; where a market buy gets pinned.
    pub(super) fn worst_ask(&self) -> Option<Price> {
        self.asks.keys().next_back().copied()
    }

    /// Lowest bid present; where a market sell gets pinned.
    pub(super) fn worst_bid(&self) -> Option<Price> {
        self.bids.keys().next().copied()
    }

    /// Deep-copy the per-level remaining quantities for snapshot formatting.
    /// Bids come out descending by price, asks ascending.
    pub(super) fn view(&self) -> BookView {
        let bids = self
            .bids
            .iter()
            .rev()
            .map(|(price, level)| {
                let quantities = level
                    .iter(&self.orders)
                    .map(|handle| self.orders[handle].order.remaining_quantity())
                    .collect();
                (*price, quantities)
            })
            .collect();

        let asks = self
            .asks
            .iter()
            .map(|(price, level)| {
                let quantities = level
                    .iter(&self.orders)
                    .map(|handle| self.orders[handle].order.remaining_quantity())
                    .collect();
                (*price, quantities)
            })
            .collect();

        BookView { bids, asks }
    }
}

/// State shared between the engine's public surface and its pruner thread.
pub(super) struct EngineShared {
    pub(super) symbol: String,
    pub(super) book: Mutex<BookState>,
    pub(super) shutdown: AtomicBool,
    pub(super) shutdown_signal: Condvar,
}

/// The matching engine for a single instrument.
///
/// One mutex guards every index; all public mutating operations take it for
/// their whole critical section, so concurrent callers are linearised. A
/// background thread prunes good-for-day orders at the configured day close
/// and is joined on drop.
pub struct OrderBook {
    shared: Arc<EngineShared>,
    config: EngineConfig,
    prune_thread: Option<JoinHandle<()>>,
}

impl OrderBook {
    /// Create an engine with the default configuration.
    pub fn new(symbol: &str) -> Self {
        // Default config is valid by construction.
        match Self::with_config(symbol, EngineConfig::default()) {
            Ok(book) => book,
            Err(err) => unreachable!("default config rejected: {}", err),
        }
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(symbol: &str, config: EngineConfig) -> Result<Self, OrderBookError> {
        config.validate()?;

        let shared = Arc::new(EngineShared {
            symbol: symbol.to_string(),
            book: Mutex::new(BookState::new()),
            shutdown: AtomicBool::new(false),
            shutdown_signal: Condvar::new(),
        });

        let prune_thread = pruner::spawn(Arc::clone(&shared), config.clone());

        Ok(Self {
            shared,
            config,
            prune_thread: Some(prune_thread),
        })
    }

    /// The symbol this book trades.
    pub fn symbol(&self) -> &str {
        &self.shared.symbol
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub(super) fn shared(&self) -> &EngineShared {
        &self.shared
    }

    /// Number of live orders resting in the book.
    pub fn size(&self) -> usize {
        self.shared.book.lock().len()
    }

    /// Best (highest) bid price, if any.
    pub fn best_bid(&self) -> Option<Price> {
        self.shared.book.lock().best_bid()
    }

    /// Best (lowest) ask price, if any.
    pub fn best_ask(&self) -> Option<Price> {
        self.shared.book.lock().best_ask()
    }

    /// Spread between best ask and best bid.
    pub fn spread(&self) -> Option<Price> {
        let book = self.shared.book.lock();
        match (book.best_bid(), book.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask.saturating_sub(bid)),
            _ => None,
        }
    }

    /// Look up a live order by id.
    pub fn get_order(&self, order_id: OrderId) -> Option<Order> {
        let book = self.shared.book.lock();
        book.index
            .get(&order_id)
            .map(|&handle| book.orders[handle].order.clone())
    }

    /// Aggregated depth via a strategy that runs on the calling thread.
    ///
    /// The per-level quantities are copied out under the book lock, so the
    /// snapshot reflects a single linearisation point regardless of strategy.
    pub fn depth(&self, strategy: &dyn SnapshotStrategy) -> Result<DepthSnapshot, OrderBookError> {
        let view = self.shared.book.lock().view();
        trace!(
            "Order book {}: snapshot over {} bid / {} ask levels",
            self.shared.symbol,
            view.bids.len(),
            view.asks.len()
        );
        strategy.generate(&self.shared.symbol, view)
    }

    /// Aggregated depth via a strategy backed by a worker pool.
    pub fn depth_pooled(
        &self,
        strategy: &dyn SnapshotStrategy,
        pool: &ThreadPool,
    ) -> Result<DepthSnapshot, OrderBookError> {
        let view = self.shared.book.lock().view();
        trace!(
            "Order book {}: pooled snapshot over {} bid / {} ask levels",
            self.shared.symbol,
            view.bids.len(),
            view.asks.len()
        );
        strategy.generate_pooled(&self.shared.symbol, view, pool)
    }
}

impl Drop for OrderBook {
    fn drop(&mut self) {
        pruner::shutdown(&self.shared);
        if let Some(handle) = self.prune_thread.take() {
            let _ = handle.join();
        }
    }
}
