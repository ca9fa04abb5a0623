#[cfg(test)]
mod tests {
    use crate::orderbook::ThreadPool;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_submit_returns_result() {
        let pool = ThreadPool::new(2);

        let task = pool.submit(|| 21 * 2);

        assert_eq!(task.wait(), 42);
    }

    #[test]
    fn test_results_match_submission() {
        let pool = ThreadPool::new(4);

        let tasks: Vec<_> = (0u64..100)
            .map(|i| pool.submit(move || i * i))
            .collect();

        for (i, task) in tasks.into_iter().enumerate() {
            assert_eq!(task.wait(), (i * i) as u64);
        }
    }

    #[test]
    fn test_tasks_run_off_caller_thread() {
        let pool = ThreadPool::new(1);
        let caller = std::thread::current().id();

        let ran_on = pool.submit(std::thread::current).wait().id();

        assert_ne!(ran_on, caller);
    }

    #[test]
    fn test_drop_drains_queued_tasks() {
        let completed = Arc::new(AtomicUsize::new(0));
        {
            let pool = ThreadPool::new(2);
            for _ in 0..32 {
                let completed = Arc::clone(&completed);
                pool.submit(move || {
                    std::thread::sleep(Duration::from_millis(1));
                    completed.fetch_add(1, Ordering::SeqCst);
                });
            }
            // Handles dropped without waiting; drop of the pool must still
            // run everything that was queued.
        }

        assert_eq!(completed.load(Ordering::SeqCst), 32);
    }

    #[test]
    fn test_worker_count() {
        let pool = ThreadPool::new(3);
        assert_eq!(pool.worker_count(), 3);
    }

    #[test]
    #[should_panic(expected = "at least one worker")]
    fn test_zero_workers_panics() {
        let _ = ThreadPool::new(0);
    }
}
