#[cfg(test)]
mod tests {
    use crate::orderbook::EngineConfig;
    use std::env;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();

        assert!(config.worker_pool_size >= 1);
        assert_eq!(config.day_close_hour_local, 16);
        assert_eq!(config.day_close_grace_ms, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let zero_pool = EngineConfig {
            worker_pool_size: 0,
            ..EngineConfig::default()
        };
        assert!(zero_pool.validate().is_err());

        let bad_hour = EngineConfig {
            day_close_hour_local: 24,
            ..EngineConfig::default()
        };
        assert!(bad_hour.validate().is_err());
    }

    #[test]
    fn test_from_env_roundtrip() {
        // Single test touching the process environment so parallel test
        // threads cannot interleave on these variables.
        env::set_var("MATCHBOOK_POOL_SIZE", "3");
        env::set_var("MATCHBOOK_DAY_CLOSE_HOUR", "17");
        env::set_var("MATCHBOOK_DAY_CLOSE_GRACE_MS", "250");

        let config = EngineConfig::try_from_env().unwrap();
        assert_eq!(config.worker_pool_size, 3);
        assert_eq!(config.day_close_hour_local, 17);
        assert_eq!(config.day_close_grace_ms, 250);

        env::set_var("MATCHBOOK_DAY_CLOSE_HOUR", "not-a-number");
        assert!(EngineConfig::try_from_env().is_err());

        env::set_var("MATCHBOOK_DAY_CLOSE_HOUR", "24");
        assert!(EngineConfig::try_from_env().is_err());

        env::remove_var("MATCHBOOK_POOL_SIZE");
        env::remove_var("MATCHBOOK_DAY_CLOSE_HOUR");
        env::remove_var("MATCHBOOK_DAY_CLOSE_GRACE_MS");
    }
}
