#[cfg(test)]
mod tests {
    use crate::orderbook::pruner::next_day_close;
    use crate::orderbook::{Order, OrderBook, OrderType, Side};
    use chrono::{Local, TimeZone, Timelike};

    #[test]
    fn test_next_close_later_today() {
        let now = Local.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap();

        let close = next_day_close(now, 16);

        assert_eq!(close.date_naive(), now.date_naive());
        assert_eq!(close.hour(), 16);
        assert_eq!(close.minute(), 0);
        assert_eq!(close.second(), 0);
    }

    #[test]
    fn test_next_close_rolls_to_tomorrow_at_boundary() {
        let now = Local.with_ymd_and_hms(2026, 3, 2, 16, 0, 0).unwrap();

        let close = next_day_close(now, 16);

        assert_eq!(close.date_naive(), now.date_naive().succ_opt().unwrap());
        assert_eq!(close.hour(), 16);
    }

    #[test]
    fn test_next_close_rolls_to_tomorrow_in_evening() {
        let now = Local.with_ymd_and_hms(2026, 3, 2, 23, 59, 59).unwrap();

        let close = next_day_close(now, 16);

        assert_eq!(close.date_naive(), now.date_naive().succ_opt().unwrap());
        assert!(close > now);
    }

    #[test]
    fn test_next_close_midnight_boundary() {
        let now = Local.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();

        let close = next_day_close(now, 0);

        assert_eq!(close.date_naive(), now.date_naive().succ_opt().unwrap());
        assert_eq!(close.hour(), 0);
    }

    #[test]
    fn test_good_for_day_collection_and_batch_cancel() {
        let book = OrderBook::new("TEST");
        book.add_order(Order::new(OrderType::GoodTillCancel, 1, Side::Buy, 100, 10));
        book.add_order(Order::new(OrderType::GoodForDay, 2, Side::Buy, 99, 10));
        book.add_order(Order::new(OrderType::GoodForDay, 3, Side::Sell, 105, 10));
        book.add_order(Order::new(OrderType::GoodTillCancel, 4, Side::Sell, 106, 5));

        // The sweep the pruner performs at day close: collect then cancel
        // through the batched path.
        let mut expired = {
            let state = book.shared().book.lock();
            state.good_for_day_ids()
        };
        expired.sort_unstable();
        assert_eq!(expired, vec![2, 3]);

        book.cancel_orders(&expired);

        assert_eq!(book.size(), 2);
        assert_eq!(book.best_bid(), Some(100));
        assert_eq!(book.best_ask(), Some(106));
        assert_eq!(book.get_order(2), None);
        assert_eq!(book.get_order(3), None);
    }
}
