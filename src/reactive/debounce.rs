// src/reactive/debounce.rs
//
// Trailing debounce on top of the Tokio timer.
//
// Every schedule() replaces the pending timer. When a timer survives the
// full quiet period its job is spawned as a separate task, so cancelling or
// rescheduling only ever affects the timer, never a job already running.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use log::trace;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

pub struct Debouncer {
    delay: Duration,
    runtime: Handle,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn trailing(delay: Duration, runtime: Handle) -> Self {
        Self {
            delay,
            runtime,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `job` once `delay` has passed without another call to `schedule`.
    pub fn schedule<F, Fut>(&self, job: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(timer) = pending.take() {
            if !timer.is_finished() {
                trace!("Debounce timer replaced");
            }
            timer.abort();
        }

        let delay = self.delay;
        let runtime = self.runtime.clone();
        *pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            runtime.spawn(job());
        }));
    }

    /// Drop the pending timer, if any. Returns `true` if one was still waiting.
    pub fn cancel(&self) -> bool {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        match pending.take() {
            Some(timer) => {
                let was_waiting = !timer.is_finished();
                timer.abort();
                was_waiting
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_job(counter: &Arc<AtomicUsize>) -> impl FnOnce() -> std::future::Ready<()> {
        let counter = Arc::clone(counter);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_quiet_period() {
        let debouncer = Debouncer::trailing(Duration::from_millis(500), Handle::current());
        let counter = Arc::new(AtomicUsize::new(0));

        debouncer.schedule(counting_job(&counter));
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_calls_coalesce() {
        let debouncer = Debouncer::trailing(Duration::from_millis(500), Handle::current());
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            debouncer.schedule(counting_job(&counter));
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(400)).await;
        tokio::task::yield_now().await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_run() {
        let debouncer = Debouncer::trailing(Duration::from_millis(500), Handle::current());
        let counter = Arc::new(AtomicUsize::new(0));

        debouncer.schedule(counting_job(&counter));
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timer() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let debouncer = Debouncer::trailing(Duration::from_millis(100), Handle::current());
            debouncer.schedule(counting_job(&counter));
        }

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
