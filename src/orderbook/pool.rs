//! Fixed-size worker pool with an awaitable submit.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::debug;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A pool of worker threads consuming jobs from a shared queue.
///
/// Task execution order is unspecified; results are retrieved through the
/// [`TaskHandle`] returned by [`submit`]. Dropping the pool closes the
/// queue, lets the workers drain whatever is still queued, and joins them.
///
/// [`submit`]: ThreadPool::submit
pub struct ThreadPool {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl ThreadPool {
    /// Spawn a pool with `worker_count` threads. Panics on zero workers.
    pub fn new(worker_count: usize) -> Self {
        assert!(worker_count > 0, "thread pool needs at least one worker");

        let (sender, receiver) = unbounded::<Job>();

        let workers = (0..worker_count)
            .map(|worker| {
                let receiver: Receiver<Job> = receiver.clone();
                thread::Builder::new()
                    .name(format!("pool-worker-{}", worker))
                    .spawn(move || {
                        // recv fails once the sender is dropped and the
                        // queue is drained; that is the shutdown signal.
                        while let Ok(job) = receiver.recv() {
                            job();
                        }
                    })
                    .expect("failed to spawn pool worker")
            })
            .collect();

        debug!("thread pool started with {} workers", worker_count);

        Self {
            sender: Some(sender),
            workers,
        }
    }

    /// Queue a task and get back a handle that blocks for its result.
    pub fn submit<F, R>(&self, task: F) -> TaskHandle<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let (result_sender, result_receiver) = bounded(1);

        let job: Job = Box::new(move || {
            // The submitter may have dropped its handle; that is fine.
            let _ = result_sender.send(task());
        });

        self.sender
            .as_ref()
            .expect("pool queue open until drop")
            .send(job)
            .expect("pool workers alive until drop");

        TaskHandle {
            result: result_receiver,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }
}

impl Default for ThreadPool {
    fn default() -> Self {
        Self::new(super::config::hardware_parallelism())
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.sender.take();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

/// Awaitable result of a submitted task.
pub struct TaskHandle<R> {
    result: Receiver<R>,
}

impl<R> TaskHandle<R> {
    /// Block until the task has run and take its result.
    ///
    /// Panics if the task itself panicked on a worker thread.
    pub fn wait(self) -> R {
        self.result
            .recv()
            .expect("task dropped its result (worker panicked)")
    }
}
