//! End-to-end scenarios exercising the engine through its public surface.

use matchbook_rs::{
    Order, OrderBook, OrderModify, OrderType, SequentialSnapshot, Side, SplitSnapshot, ThreadPool,
};
use std::sync::Arc;
use std::thread;

fn gtc(id: u64, side: Side, price: u64, quantity: u64) -> Order {
    Order::new(OrderType::GoodTillCancel, id, side, price, quantity)
}

fn levels(book: &OrderBook) -> (Vec<(u64, u64)>, Vec<(u64, u64)>) {
    let snapshot = book.depth(&SequentialSnapshot).unwrap();
    (
        snapshot.bids.iter().map(|l| (l.price, l.quantity)).collect(),
        snapshot.asks.iter().map(|l| (l.price, l.quantity)).collect(),
    )
}

#[test]
fn simple_cross_empties_both_sides() {
    let book = OrderBook::new("SCENARIO");

    assert!(book.add_order(gtc(1, Side::Buy, 100, 10)).is_empty());
    let trades = book.add_order(gtc(2, Side::Sell, 100, 10));

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].bid().order_id, 1);
    assert_eq!(trades[0].bid().price, 100);
    assert_eq!(trades[0].ask().order_id, 2);
    assert_eq!(trades[0].ask().price, 100);
    assert_eq!(trades[0].quantity(), 10);

    assert_eq!(book.size(), 0);
    let (bids, asks) = levels(&book);
    assert!(bids.is_empty());
    assert!(asks.is_empty());
}

#[test]
fn partial_fill_leaves_resting_level() {
    let book = OrderBook::new("SCENARIO");

    book.add_order(gtc(1, Side::Buy, 100, 10));
    let trades = book.add_order(gtc(2, Side::Sell, 99, 4));

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].quantity(), 4);
    assert_eq!(trades[0].bid().price, 100);
    assert_eq!(trades[0].ask().price, 99);

    assert_eq!(book.size(), 1);
    let (bids, asks) = levels(&book);
    assert_eq!(bids, vec![(100, 6)]);
    assert!(asks.is_empty());
}

#[test]
fn fifo_consumes_oldest_first() {
    let book = OrderBook::new("SCENARIO");

    book.add_order(gtc(1, Side::Buy, 100, 5));
    book.add_order(gtc(2, Side::Buy, 100, 5));
    let trades = book.add_order(gtc(3, Side::Sell, 100, 7));

    assert_eq!(trades.len(), 2);
    assert_eq!(
        (trades[0].bid().order_id, trades[0].bid().price, trades[0].quantity()),
        (1, 100, 5)
    );
    assert_eq!(
        (trades[1].bid().order_id, trades[1].bid().price, trades[1].quantity()),
        (2, 100, 2)
    );

    assert_eq!(book.size(), 1);
    let (bids, _) = levels(&book);
    assert_eq!(bids, vec![(100, 3)]);
}

#[test]
fn fill_or_kill_leaves_book_untouched() {
    let book = OrderBook::new("SCENARIO");

    book.add_order(gtc(1, Side::Sell, 100, 5));
    let trades = book.add_order(Order::new(OrderType::FillOrKill, 2, Side::Buy, 100, 10));

    assert!(trades.is_empty());
    assert_eq!(book.size(), 1);
    let (bids, asks) = levels(&book);
    assert!(bids.is_empty());
    assert_eq!(asks, vec![(100, 5)]);
}

#[test]
fn market_buy_promoted_to_worst_ask() {
    let book = OrderBook::new("SCENARIO");

    book.add_order(gtc(1, Side::Sell, 100, 3));
    book.add_order(gtc(2, Side::Sell, 101, 4));
    let trades = book.add_order(Order::market(3, Side::Buy, 5));

    assert_eq!(trades.len(), 2);
    assert_eq!(
        (trades[0].bid().order_id, trades[0].ask().price, trades[0].quantity()),
        (3, 100, 3)
    );
    assert_eq!(
        (trades[1].bid().order_id, trades[1].ask().price, trades[1].quantity()),
        (3, 101, 2)
    );

    assert_eq!(book.size(), 1);
    let (_, asks) = levels(&book);
    assert_eq!(asks, vec![(101, 2)]);
}

#[test]
fn modify_after_cancel_is_a_noop() {
    let book = OrderBook::new("SCENARIO");

    book.add_order(gtc(1, Side::Buy, 100, 10));
    book.cancel_order(1);
    let trades = book.modify_order(OrderModify::new(1, Side::Buy, 101, 5));

    assert!(trades.is_empty());
    assert_eq!(book.size(), 0);
}

#[test]
fn modify_is_cancel_plus_add() {
    let first = OrderBook::new("SCENARIO-A");
    let second = OrderBook::new("SCENARIO-B");

    for book in [&first, &second] {
        book.add_order(Order::new(OrderType::GoodForDay, 1, Side::Buy, 100, 10));
        book.add_order(gtc(2, Side::Buy, 101, 3));
        book.add_order(gtc(3, Side::Sell, 104, 6));
    }

    let via_modify = first.modify_order(OrderModify::new(1, Side::Buy, 104, 8));

    second.cancel_order(1);
    let via_cancel_add = second.add_order(Order::new(OrderType::GoodForDay, 1, Side::Buy, 104, 8));

    assert_eq!(via_modify.len(), via_cancel_add.len());
    for (a, b) in via_modify.iter().zip(via_cancel_add.iter()) {
        assert_eq!(a.bid().order_id, b.bid().order_id);
        assert_eq!(a.ask().order_id, b.ask().order_id);
        assert_eq!(a.quantity(), b.quantity());
    }
    assert_eq!(first.size(), second.size());
    assert_eq!(levels(&first), levels(&second));
}

#[test]
fn trade_quantities_balance_on_both_legs() {
    let book = OrderBook::new("SCENARIO");

    for i in 0..10u64 {
        book.add_order(gtc(i + 1, Side::Sell, 100 + i % 3, 5));
    }
    let trades = book.add_order(gtc(100, Side::Buy, 102, 37));

    let crossed: u64 = trades.iter().map(|t| t.quantity()).sum();
    assert_eq!(crossed, 37);
    for trade in &trades {
        assert_eq!(trade.bid().quantity, trade.ask().quantity);
        assert_eq!(trade.bid().order_id, 100);
    }

    // 50 resting - 37 crossed leaves 13 on the ask side.
    let (_, asks) = levels(&book);
    let resting: u64 = asks.iter().map(|(_, quantity)| quantity).sum();
    assert_eq!(resting, 13);
}

#[test]
fn book_never_rests_crossed() {
    let book = OrderBook::new("SCENARIO");

    let prices = [100, 103, 101, 99, 104, 102, 100, 101];
    for (i, price) in prices.into_iter().enumerate() {
        let side = if i % 2 == 0 { Side::Buy } else { Side::Sell };
        book.add_order(gtc(i as u64 + 1, side, price, 4));

        if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
            assert!(bid < ask, "book rested crossed after order {}", i + 1);
        }
    }
}

#[test]
fn concurrent_adds_land_exactly_once() {
    let book = Arc::new(OrderBook::new("SCENARIO"));
    let threads = 4u64;
    let per_thread = 200u64;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let book = Arc::clone(&book);
            thread::spawn(move || {
                for i in 0..per_thread {
                    let id = t * per_thread + i + 1;
                    // Disjoint, non-crossing price bands per side.
                    if t % 2 == 0 {
                        book.add_order(gtc(id, Side::Buy, 1_000 + (id % 50), 1));
                    } else {
                        book.add_order(gtc(id, Side::Sell, 2_000 + (id % 50), 1));
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(book.size(), (threads * per_thread) as usize);

    let snapshot = book.depth(&SplitSnapshot).unwrap();
    let total: u64 = snapshot.bids.iter().chain(snapshot.asks.iter()).map(|l| l.quantity).sum();
    assert_eq!(total, threads * per_thread);
}

#[test]
fn concurrent_snapshots_observe_consistent_views() {
    let book = Arc::new(OrderBook::new("SCENARIO"));
    let pool = Arc::new(ThreadPool::new(4));

    // Every mutation keeps each side at a constant total quantity, so any
    // linearised snapshot must observe exactly that total.
    for i in 0..20u64 {
        book.add_order(gtc(i + 1, Side::Buy, 500 + i, 10));
        book.add_order(gtc(i + 101, Side::Sell, 1_500 + i, 10));
    }

    let writer = {
        let book = Arc::clone(&book);
        thread::spawn(move || {
            for round in 0..50u64 {
                let id = round % 20 + 1;
                book.modify_order(OrderModify::new(id, Side::Buy, 500 + (id + round) % 100, 10));
            }
        })
    };

    let readers: Vec<_> = (0..3)
        .map(|_| {
            let book = Arc::clone(&book);
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                for _ in 0..50 {
                    let snapshot = book
                        .depth_pooled(&matchbook_rs::BatchedSnapshot, &pool)
                        .unwrap();
                    assert_eq!(snapshot.total_bid_volume(), 200);
                    assert_eq!(snapshot.total_ask_volume(), 200);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}
