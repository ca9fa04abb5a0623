//! Aggregated depth snapshots and the interchangeable strategies that
//! produce them.
//!
//! Every strategy formats the same [`BookView`]: per-level remaining
//! quantities deep-copied under the book lock. The copy fixes the
//! linearisation point, so the strategy only decides how the folding work is
//! scheduled, never what the snapshot contains.

use super::config::hardware_parallelism;
use super::error::OrderBookError;
use super::pool::ThreadPool;
use super::types::{Price, Quantity};
use crate::utils::current_time_millis;
use serde::{Deserialize, Serialize};
use std::mem;
use std::thread;

/// Aggregated quantity resting at one price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub price: Price,
    pub quantity: Quantity,
}

/// A consistent aggregated view of both sides of the book: bids descending
/// by price, asks ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthSnapshot {
    /// The symbol or identifier for this order book
    pub symbol: String,

    /// Timestamp when the snapshot was created (milliseconds since epoch)
    pub timestamp: u64,

    /// Bid levels, best (highest) first
    pub bids: Vec<LevelInfo>,

    /// Ask levels, best (lowest) first
    pub asks: Vec<LevelInfo>,
}

impl DepthSnapshot {
    fn new(symbol: &str, bids: Vec<LevelInfo>, asks: Vec<LevelInfo>) -> Self {
        Self {
            symbol: symbol.to_string(),
            timestamp: current_time_millis(),
            bids,
            asks,
        }
    }

    /// Get the best bid price and quantity
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.bids.first().map(|level| (level.price, level.quantity))
    }

    /// Get the best ask price and quantity
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.asks.first().map(|level| (level.price, level.quantity))
    }

    /// Get the mid price (average of best bid and best ask)
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid, _)), Some((ask, _))) => Some((bid as f64 + ask as f64) / 2.0),
            _ => None,
        }
    }

    /// Get the spread (best ask - best bid)
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid, _)), Some((ask, _))) => Some(ask.saturating_sub(bid)),
            _ => None,
        }
    }

    /// Total resting quantity across all bid levels
    pub fn total_bid_volume(&self) -> Quantity {
        self.bids.iter().map(|level| level.quantity).sum()
    }

    /// Total resting quantity across all ask levels
    pub fn total_ask_volume(&self) -> Quantity {
        self.asks.iter().map(|level| level.quantity).sum()
    }
}

/// Per-level remaining quantities captured under the book lock. Bids are in
/// descending price order, asks ascending; strategies must preserve both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookView {
    pub bids: Vec<(Price, Vec<Quantity>)>,
    pub asks: Vec<(Price, Vec<Quantity>)>,
}

/// How a depth snapshot is computed from a captured view.
///
/// Strategies that run on the calling thread implement [`generate`]; the
/// pooled default delegates to it, ignoring the pool. Strategies that need a
/// worker pool implement [`generate_pooled`] and inherit a [`generate`]
/// default that reports the misuse as a typed error.
///
/// [`generate`]: SnapshotStrategy::generate
/// [`generate_pooled`]: SnapshotStrategy::generate_pooled
pub trait SnapshotStrategy: Send + Sync {
    /// Strategy name used in error reports.
    fn name(&self) -> &'static str;

    fn generate(&self, symbol: &str, view: BookView) -> Result<DepthSnapshot, OrderBookError> {
        let _ = (symbol, view);
        Err(OrderBookError::MissingThreadPool {
            strategy: self.name(),
        })
    }

    fn generate_pooled(
        &self,
        symbol: &str,
        view: BookView,
        pool: &ThreadPool,
    ) -> Result<DepthSnapshot, OrderBookError> {
        let _ = pool;
        self.generate(symbol, view)
    }
}

fn aggregate_levels(levels: Vec<(Price, Vec<Quantity>)>) -> Vec<LevelInfo> {
    levels
        .into_iter()
        .map(|(price, quantities)| LevelInfo {
            price,
            quantity: quantities.iter().sum(),
        })
        .collect()
}

/// Single-threaded fold over both sides.
pub struct SequentialSnapshot;

impl SnapshotStrategy for SequentialSnapshot {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn generate(&self, symbol: &str, view: BookView) -> Result<DepthSnapshot, OrderBookError> {
        Ok(DepthSnapshot::new(
            symbol,
            aggregate_levels(view.bids),
            aggregate_levels(view.asks),
        ))
    }
}

/// Coarse parallelism: one thread per side, joined before returning.
pub struct SplitSnapshot;

impl SnapshotStrategy for SplitSnapshot {
    fn name(&self) -> &'static str {
        "split"
    }

    fn generate(&self, symbol: &str, view: BookView) -> Result<DepthSnapshot, OrderBookError> {
        let BookView { bids, asks } = view;

        let bid_half = thread::spawn(move || aggregate_levels(bids));
        let ask_half = thread::spawn(move || aggregate_levels(asks));

        Ok(DepthSnapshot::new(
            symbol,
            bid_half.join().expect("bid snapshot half panicked"),
            ask_half.join().expect("ask snapshot half panicked"),
        ))
    }
}

/// One pool task per price level; results collected in price order.
pub struct PerLevelSnapshot;

impl SnapshotStrategy for PerLevelSnapshot {
    fn name(&self) -> &'static str {
        "per-level"
    }

    fn generate_pooled(
        &self,
        symbol: &str,
        view: BookView,
        pool: &ThreadPool,
    ) -> Result<DepthSnapshot, OrderBookError> {
        let bids = submit_per_level(pool, view.bids);
        let asks = submit_per_level(pool, view.asks);
        Ok(DepthSnapshot::new(symbol, bids, asks))
    }
}

fn submit_per_level(pool: &ThreadPool, levels: Vec<(Price, Vec<Quantity>)>) -> Vec<LevelInfo> {
    let tasks: Vec<_> = levels
        .into_iter()
        .map(|(price, quantities)| {
            pool.submit(move || LevelInfo {
                price,
                quantity: quantities.iter().sum(),
            })
        })
        .collect();

    // Waiting in submission order keeps the sequence monotone in price.
    tasks.into_iter().map(|task| task.wait()).collect()
}

/// Each side partitioned into P contiguous ranges in map order, one pool
/// task per range, with P capped at min(hardware parallelism, level count).
pub struct BatchedSnapshot;

impl SnapshotStrategy for BatchedSnapshot {
    fn name(&self) -> &'static str {
        "batched"
    }

    fn generate_pooled(
        &self,
        symbol: &str,
        view: BookView,
        pool: &ThreadPool,
    ) -> Result<DepthSnapshot, OrderBookError> {
        let bids = submit_batches(pool, view.bids);
        let asks = submit_batches(pool, view.asks);
        Ok(DepthSnapshot::new(symbol, bids, asks))
    }
}

fn submit_batches(pool: &ThreadPool, levels: Vec<(Price, Vec<Quantity>)>) -> Vec<LevelInfo> {
    if levels.is_empty() {
        return Vec::new();
    }

    let batches = hardware_parallelism().min(levels.len());
    let batch_size = levels.len() / batches;

    let mut remaining = levels;
    let mut tasks = Vec::with_capacity(batches);
    for batch in 0..batches {
        // The last batch takes any leftover levels.
        let chunk = if batch == batches - 1 {
            mem::take(&mut remaining)
        } else {
            let tail = remaining.split_off(batch_size);
            mem::replace(&mut remaining, tail)
        };
        tasks.push(pool.submit(move || aggregate_levels(chunk)));
    }

    // Concatenating in range order keeps the sequence monotone in price.
    tasks.into_iter().flat_map(|task| task.wait()).collect()
}
