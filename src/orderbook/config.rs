//! Engine configuration.

use super::error::OrderBookError;
use std::env;
use std::num::NonZeroUsize;
use std::thread;
use tracing::info;

const POOL_SIZE: &str = "MATCHBOOK_POOL_SIZE";
const DAY_CLOSE_HOUR: &str = "MATCHBOOK_DAY_CLOSE_HOUR";
const DAY_CLOSE_GRACE_MS: &str = "MATCHBOOK_DAY_CLOSE_GRACE_MS";

/// Tunables for the engine's background machinery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Worker threads in a default-sized snapshot pool.
    pub worker_pool_size: usize,
    /// Local wall-clock hour (0..=23) at which good-for-day orders expire.
    pub day_close_hour_local: u32,
    /// Delay added past the close boundary before the pruner sweeps.
    pub day_close_grace_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_pool_size: hardware_parallelism(),
            day_close_hour_local: 16,
            day_close_grace_ms: 100,
        }
    }
}

impl EngineConfig {
    /// Load the configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn try_from_env() -> Result<EngineConfig, OrderBookError> {
        let mut config = EngineConfig::default();

        if let Ok(raw) = env::var(POOL_SIZE) {
            config.worker_pool_size = raw.parse().map_err(|_| invalid(POOL_SIZE, &raw))?;
        }
        if let Ok(raw) = env::var(DAY_CLOSE_HOUR) {
            config.day_close_hour_local = raw.parse().map_err(|_| invalid(DAY_CLOSE_HOUR, &raw))?;
        }
        if let Ok(raw) = env::var(DAY_CLOSE_GRACE_MS) {
            config.day_close_grace_ms = raw.parse().map_err(|_| invalid(DAY_CLOSE_GRACE_MS, &raw))?;
        }

        config.validate()?;
        info!(
            "engine config: pool_size={} day_close_hour={} grace_ms={}",
            config.worker_pool_size, config.day_close_hour_local, config.day_close_grace_ms
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), OrderBookError> {
        if self.worker_pool_size == 0 {
            return Err(OrderBookError::InvalidConfiguration {
                message: "worker_pool_size must be at least 1".to_string(),
            });
        }
        if self.day_close_hour_local > 23 {
            return Err(OrderBookError::InvalidConfiguration {
                message: format!(
                    "day_close_hour_local must be 0..=23, got {}",
                    self.day_close_hour_local
                ),
            });
        }
        Ok(())
    }
}

fn invalid(name: &str, raw: &str) -> OrderBookError {
    OrderBookError::InvalidConfiguration {
        message: format!("failed to parse {} value {:?}", name, raw),
    }
}

/// Host hardware parallelism, never below 1.
pub fn hardware_parallelism() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
