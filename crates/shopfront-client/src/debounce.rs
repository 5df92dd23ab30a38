//! Cancel-and-reschedule task scheduling.
//!
//! [`Debouncer::schedule`] spawns a task that sleeps for the configured
//! delay and then runs. Scheduling again, or calling
//! [`Debouncer::cancel`], bumps a generation counter; a sleeping task that
//! wakes up to a newer generation exits without running. Work that has
//! already started is never interrupted.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `task` to run after the delay, superseding anything still
    /// waiting. The handle resolves to `true` if the task ran.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F, Fut>(&self, task: F) -> JoinHandle<bool>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let current = Arc::clone(&self.generation);
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::SeqCst) != generation {
                tracing::trace!(generation, "debounced task superseded");
                return false;
            }
            task().await;
            true
        })
    }

    /// Drops whatever is currently scheduled.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicU32;

    use super::*;

    fn counting_task(counter: &Arc<AtomicU32>) -> impl FnOnce() -> std::future::Ready<()> {
        let counter = Arc::clone(counter);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_runs_only_last_task() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let calls = Arc::new(AtomicU32::new(0));

        let first = debouncer.schedule(counting_task(&calls));
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = debouncer.schedule(counting_task(&calls));
        tokio::time::sleep(Duration::from_millis(100)).await;
        let third = debouncer.schedule(counting_task(&calls));

        assert!(!first.await.unwrap());
        assert!(!second.await.unwrap());
        assert!(third.await.unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_calls_each_run() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        let calls = Arc::new(AtomicU32::new(0));

        assert!(debouncer.schedule(counting_task(&calls)).await.unwrap());
        assert!(debouncer.schedule(counting_task(&calls)).await.unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_task() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        let calls = Arc::new(AtomicU32::new(0));

        let handle = debouncer.schedule(counting_task(&calls));
        debouncer.cancel();
        assert!(!handle.await.unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn started_task_is_not_interrupted() {
        let debouncer = Debouncer::new(Duration::from_millis(10));
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);

        let handle = debouncer.schedule(move || async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            c.fetch_add(1, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        debouncer.cancel();

        assert!(handle.await.unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
