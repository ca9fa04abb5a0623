//! Background pruning of good-for-day orders at the local day close.

use super::book::EngineShared;
use super::config::EngineConfig;
use chrono::{DateTime, Duration as ChronoDuration, Local, Timelike};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, trace};

pub(super) fn spawn(shared: Arc<EngineShared>, config: EngineConfig) -> JoinHandle<()> {
    thread::Builder::new()
        .name("gfd-pruner".to_string())
        .spawn(move || run(shared, config))
        .expect("failed to spawn pruner thread")
}

/// Raise the shutdown flag and wake the pruner. Taking the book lock first
/// guarantees the pruner is either before its flag check or parked on the
/// condvar, so the notification cannot be lost.
pub(super) fn shutdown(shared: &EngineShared) {
    let guard = shared.book.lock();
    shared.shutdown.store(true, Ordering::Release);
    shared.shutdown_signal.notify_one();
    drop(guard);
}

/// Running -> (timeout -> Pruning -> Running) | (shutdown -> Exited).
fn run(shared: Arc<EngineShared>, config: EngineConfig) {
    let grace = Duration::from_millis(config.day_close_grace_ms);

    loop {
        let now = Local::now();
        let next_close = next_day_close(now, config.day_close_hour_local);
        let until = (next_close - now).to_std().unwrap_or_default() + grace;
        trace!(
            "pruner {}: next day-close sweep at {}",
            shared.symbol,
            next_close
        );

        let mut book = shared.book.lock();

        if shared.shutdown.load(Ordering::Acquire) {
            return;
        }

        let timed_out = shared
            .shutdown_signal
            .wait_for(&mut book, until)
            .timed_out();

        if !timed_out || shared.shutdown.load(Ordering::Acquire) {
            return;
        }

        // Day close reached. Sweep within the same critical section the
        // foreground mutators use.
        let expired = book.good_for_day_ids();
        if !expired.is_empty() {
            debug!(
                "pruner {}: cancelling {} good-for-day orders",
                shared.symbol,
                expired.len()
            );
            for order_id in &expired {
                book.cancel_internal(*order_id);
            }
        }
    }
}

/// The next local wall-clock instant at `close_hour:00:00`, rolling to
/// tomorrow when today's close has already passed.
pub(super) fn next_day_close(now: DateTime<Local>, close_hour: u32) -> DateTime<Local> {
    let mut date = now.date_naive();
    if now.hour() >= close_hour {
        date = date.succ_opt().expect("date within supported range");
    }

    let close = date
        .and_hms_opt(close_hour, 0, 0)
        .expect("close hour validated to 0..=23");

    match close.and_local_timezone(Local) {
        chrono::LocalResult::Single(instant) => instant,
        // A DST fold: take the earlier occurrence of the ambiguous time.
        chrono::LocalResult::Ambiguous(earliest, _) => earliest,
        // A DST gap: the nominal close does not exist locally, fall forward.
        chrono::LocalResult::None => (close + ChronoDuration::hours(1))
            .and_local_timezone(Local)
            .earliest()
            .expect("time after a DST gap resolves"),
    }
}
