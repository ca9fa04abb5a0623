//! Venue depth feed adapter.
//!
//! Fetches L2 depth from a Binance-style REST endpoint, converts the
//! decimal-string price/quantity pairs to internal fixed-point integers, and
//! seeds the book with the result. Only this adapter knows about
//! [`SCALE_FACTOR`]; the matching core never sees a decimal.

use crate::orderbook::{Order, OrderBook, OrderId, OrderType, Price, Quantity, Side, SCALE_FACTOR};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use std::fmt;
use tracing::info;

/// One aggregated venue level after scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct L2Level {
    pub price: Price,
    pub quantity: Quantity,
}

/// A venue depth snapshot: monotonic update id plus both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L2Depth {
    pub last_update_id: u64,
    pub bids: Vec<L2Level>,
    pub asks: Vec<L2Level>,
}

/// Errors from the depth feed.
#[derive(Debug)]
pub enum FeedError {
    /// Transport-level failure
    Http(reqwest::Error),
    /// Non-success HTTP status
    Status(u16),
    /// Malformed payload or out-of-range value
    Parse(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Http(err) => write!(f, "depth request failed: {}", err),
            FeedError::Status(code) => write!(f, "depth request returned status {}", code),
            FeedError::Parse(message) => write!(f, "depth payload invalid: {}", message),
        }
    }
}

impl std::error::Error for FeedError {}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        FeedError::Http(err)
    }
}

/// Raw wire shape: price and quantity arrive as decimal strings.
#[derive(Debug, Deserialize)]
struct RawDepth {
    #[serde(rename = "lastUpdateId")]
    last_update_id: u64,
    bids: Vec<(String, String)>,
    asks: Vec<(String, String)>,
}

/// Convert a decimal string to fixed-point integer units, rounding half up.
fn scale_decimal(raw: &str) -> Result<u64, FeedError> {
    let value: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| FeedError::Parse(format!("invalid decimal {:?}", raw)))?;

    (value * Decimal::from(SCALE_FACTOR))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or_else(|| FeedError::Parse(format!("value out of range: {}", raw)))
}

fn scale_levels(raw: Vec<(String, String)>) -> Result<Vec<L2Level>, FeedError> {
    raw.into_iter()
        .map(|(price, quantity)| {
            Ok(L2Level {
                price: scale_decimal(&price)?,
                quantity: scale_decimal(&quantity)?,
            })
        })
        .collect()
}

/// Parse a depth payload into scaled levels.
pub fn parse_depth(payload: &str) -> Result<L2Depth, FeedError> {
    let raw: RawDepth =
        serde_json::from_str(payload).map_err(|err| FeedError::Parse(err.to_string()))?;

    Ok(L2Depth {
        last_update_id: raw.last_update_id,
        bids: scale_levels(raw.bids)?,
        asks: scale_levels(raw.asks)?,
    })
}

/// Blocking client for a venue's REST depth endpoint.
pub struct FeedClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl FeedClient {
    /// `base_url` without a trailing slash, e.g. `https://api.binance.com`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch L2 depth for `symbol`, up to `limit` levels per side.
    pub fn fetch_l2(&self, symbol: &str, limit: usize) -> Result<L2Depth, FeedError> {
        let url = format!(
            "{}/api/v3/depth?symbol={}&limit={}",
            self.base_url, symbol, limit
        );

        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(FeedError::Status(response.status().as_u16()));
        }

        let payload = response.text()?;
        parse_depth(&payload)
    }
}

/// Seed an empty book from a venue depth snapshot. Venue bids become resting
/// buy orders and venue asks become resting sell orders, all GoodTillCancel.
/// Returns the number of orders added; `next_id` advances past the ids used.
pub fn seed_book(book: &OrderBook, depth: &L2Depth, next_id: &mut OrderId) -> usize {
    let mut added = 0;

    for level in &depth.bids {
        book.add_order(Order::new(
            OrderType::GoodTillCancel,
            *next_id,
            Side::Buy,
            level.price,
            level.quantity,
        ));
        *next_id += 1;
        added += 1;
    }

    for level in &depth.asks {
        book.add_order(Order::new(
            OrderType::GoodTillCancel,
            *next_id,
            Side::Sell,
            level.price,
            level.quantity,
        ));
        *next_id += 1;
        added += 1;
    }

    info!(
        "seeded book {} with {} orders (update id {})",
        book.symbol(),
        added,
        depth.last_update_id
    );
    added
}
