//! Order book error types

use std::fmt;

/// Errors surfaced by the order book and its snapshot subsystem.
///
/// Admission refusals (a FillOrKill that cannot fill, a duplicate id) are not
/// errors: they come back as an empty trades result. This enum covers the
/// cases the caller must be able to tell apart from a refusal.
#[derive(Debug)]
pub enum OrderBookError {
    /// A snapshot strategy that needs a worker pool was invoked without one.
    MissingThreadPool {
        /// Name of the strategy that was invoked
        strategy: &'static str,
    },

    /// A configuration value was outside its permitted range.
    InvalidConfiguration {
        /// Description of the offending value
        message: String,
    },
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::MissingThreadPool { strategy } => {
                write!(f, "snapshot strategy {} requires a thread pool", strategy)
            }
            OrderBookError::InvalidConfiguration { message } => {
                write!(f, "invalid configuration: {}", message)
            }
        }
    }
}

impl std::error::Error for OrderBookError {}
