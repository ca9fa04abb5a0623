#[cfg(test)]
mod tests {
    use crate::orderbook::OrderBookError;

    #[test]
    fn test_display_missing_pool() {
        let err = OrderBookError::MissingThreadPool {
            strategy: "per-level",
        };

        assert_eq!(
            err.to_string(),
            "snapshot strategy per-level requires a thread pool"
        );
    }

    #[test]
    fn test_display_invalid_configuration() {
        let err = OrderBookError::InvalidConfiguration {
            message: "worker_pool_size must be at least 1".to_string(),
        };

        assert!(err.to_string().contains("invalid configuration"));
        assert!(err.to_string().contains("worker_pool_size"));
    }

    #[test]
    fn test_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&OrderBookError::MissingThreadPool { strategy: "batched" });
    }
}
