#[cfg(test)]
mod tests {
    use crate::current_time_millis;
    use std::thread;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    #[test]
    fn test_current_time_millis_increases() {
        let before = current_time_millis();
        thread::sleep(Duration::from_millis(5));
        let after = current_time_millis();

        assert!(after > before, "time should advance between calls");
    }

    #[test]
    fn test_current_time_millis_tracks_system_clock() {
        let from_helper = current_time_millis();
        let direct = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_millis() as u64;

        let difference = direct.abs_diff(from_helper);
        assert!(
            difference <= 10,
            "helper should agree with the system clock, was {difference}ms off"
        );
    }
}
