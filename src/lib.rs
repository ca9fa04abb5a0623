//! # Matchbook
//!
//! A continuous price-time-priority limit-order matching engine for a single
//! instrument, written in Rust. The engine accepts five order disciplines,
//! keeps two opposing sorted books mutually consistent with an id index and
//! an aggregated level mirror, and reports depth on demand through pluggable
//! snapshot strategies.
//!
//! ## Key Features
//!
//! - **Price-time priority matching**: best price first, FIFO within a
//!   price level, run to quiescence on every add.
//!
//! - **Five order disciplines**: good-till-cancel, fill-and-kill,
//!   fill-or-kill (with an aggregate feasibility check before admission),
//!   good-for-day, and market orders promoted to a concrete price at the
//!   opposing worst.
//!
//! - **O(1) cancellation**: every resting order is threaded into an
//!   intrusive per-level FIFO list backed by an arena, so a resolved id
//!   splices out without touching its neighbours.
//!
//! - **Pluggable depth snapshots**: sequential, two-halves, per-level
//!   pooled, and batched pooled strategies, all formatting one view captured
//!   under the book lock.
//!
//! - **Day-close pruning**: a background thread cancels good-for-day orders
//!   at the configured local close, with cooperative shutdown on drop.
//!
//! ## Example
//!
//! ```
//! use matchbook_rs::{Order, OrderBook, OrderType, Side};
//!
//! let book = OrderBook::new("BTCUSDT");
//! book.add_order(Order::new(OrderType::GoodTillCancel, 1, Side::Buy, 100, 10));
//! let trades = book.add_order(Order::new(OrderType::GoodTillCancel, 2, Side::Sell, 100, 10));
//!
//! assert_eq!(trades.len(), 1);
//! assert_eq!(book.size(), 0);
//! ```

mod feed;
mod orderbook;
mod utils;

pub use feed::{parse_depth, seed_book, FeedClient, FeedError, L2Depth, L2Level};
pub use orderbook::{
    BatchedSnapshot, BookView, DepthSnapshot, EngineConfig, LevelInfo, Order, OrderBook,
    OrderBookError, OrderId, OrderIds, OrderModify, OrderType, PerLevelSnapshot, Price, Quantity,
    SequentialSnapshot, Side, SnapshotStrategy, SplitSnapshot, TaskHandle, ThreadPool, Trade,
    TradeInfo, Trades, SCALE_FACTOR,
};
pub use utils::current_time_millis;
