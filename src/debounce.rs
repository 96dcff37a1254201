use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

type Target<A> = Box<dyn FnMut(A) + Send>;

/// Pending-invocation bookkeeping. `generation` identifies the latest call so
/// a timer that already woke up cannot fire after being superseded.
struct Pending {
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

/// Collapses bursts of calls into one invocation of the target, `delay` after
/// the last call in the burst, using that call's arguments.
///
/// The target sits in a shared cell: [`Debouncer::set_target`] swaps it and a
/// pending invocation picks up whichever target is current when it fires.
/// Dropping the debouncer cancels anything still pending.
pub struct Debouncer<A> {
    delay: Duration,
    runtime: Handle,
    target: Arc<Mutex<Target<A>>>,
    pending: Arc<Mutex<Pending>>,
}

impl<A: Send + 'static> Debouncer<A> {
    /// Build a debouncer on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime; use [`Debouncer::with_handle`]
    /// there.
    pub fn new<F>(delay: Duration, target: F) -> Self
    where
        F: FnMut(A) + Send + 'static,
    {
        Self::with_handle(Handle::current(), delay, target)
    }

    pub fn with_handle<F>(runtime: Handle, delay: Duration, target: F) -> Self
    where
        F: FnMut(A) + Send + 'static,
    {
        Self {
            delay,
            runtime,
            target: Arc::new(Mutex::new(Box::new(target))),
            pending: Arc::new(Mutex::new(Pending {
                generation: 0,
                timer: None,
            })),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel the pending invocation (if any) and schedule a new one with `args`.
    pub fn call(&self, args: A) {
        let mut pending = lock(&self.pending);
        pending.generation += 1;
        let generation = pending.generation;
        if let Some(timer) = pending.timer.take() {
            timer.abort();
            tracing::trace!(generation, "debounce: superseded pending call");
        }

        let delay = self.delay;
        let target = Arc::clone(&self.target);
        let shared = Arc::clone(&self.pending);
        let timer = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut pending = lock(&shared);
                if pending.generation != generation {
                    return;
                }
                pending.timer = None;
            }
            tracing::trace!(generation, "debounce: firing");
            let mut target = lock(&target);
            (*target)(args);
        });
        pending.timer = Some(timer);
    }

    /// Swap the target. Applies to the pending invocation too.
    pub fn set_target<F>(&self, target: F)
    where
        F: FnMut(A) + Send + 'static,
    {
        *lock(&self.target) = Box::new(target);
    }

    /// Drop the pending invocation without firing it.
    pub fn cancel(&self) {
        let mut pending = lock(&self.pending);
        pending.generation += 1;
        if let Some(timer) = pending.timer.take() {
            timer.abort();
            tracing::trace!("debounce: cancelled");
        }
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.pending).timer.is_some()
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        let mut pending = lock(&self.pending);
        pending.generation += 1;
        if let Some(timer) = pending.timer.take() {
            timer.abort();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl FnMut(String) + Send + 'static) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        (calls, move |value: String| sink.lock().unwrap().push(value))
    }

    #[tokio::test(start_paused = true)]
    async fn burst_fires_once_with_last_args() {
        let (calls, target) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(300), target);

        for value in ["d", "du", "dun", "dune"] {
            debouncer.call(value.to_string());
            sleep(Duration::from_millis(100)).await;
        }
        assert!(calls.lock().unwrap().is_empty());

        sleep(Duration::from_millis(250)).await;
        assert_eq!(*calls.lock().unwrap(), vec!["dune".to_string()]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn single_call_fires_after_delay_not_before() {
        let (calls, target) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(300), target);

        debouncer.call("x".to_string());
        assert!(debouncer.is_pending());
        sleep(Duration::from_millis(299)).await;
        assert!(calls.lock().unwrap().is_empty());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(calls.lock().unwrap().len(), 1);

        sleep(Duration::from_secs(5)).await;
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn separate_bursts_fire_separately() {
        let (calls, target) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(50), target);

        debouncer.call("a".to_string());
        sleep(Duration::from_millis(60)).await;
        debouncer.call("b".to_string());
        sleep(Duration::from_millis(60)).await;

        assert_eq!(*calls.lock().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn pending_call_uses_latest_target() {
        let (old_calls, old_target) = recorder();
        let (new_calls, new_target) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(100), old_target);

        debouncer.call("q".to_string());
        debouncer.set_target(new_target);
        sleep(Duration::from_millis(150)).await;

        assert!(old_calls.lock().unwrap().is_empty());
        assert_eq!(*new_calls.lock().unwrap(), vec!["q".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_and_drop_discard_pending_call() {
        let (calls, target) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(100), target);

        debouncer.call("cancelled".to_string());
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        debouncer.call("dropped".to_string());
        drop(debouncer);

        sleep(Duration::from_millis(500)).await;
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_delay_still_collapses_synchronous_burst() {
        let (calls, target) = recorder();
        let debouncer = Debouncer::new(Duration::ZERO, target);

        debouncer.call("1".to_string());
        debouncer.call("2".to_string());
        sleep(Duration::from_millis(1)).await;

        assert_eq!(*calls.lock().unwrap(), vec!["2".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn tuple_arguments() {
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let debouncer = Debouncer::new(
            Duration::from_millis(10),
            move |(a, b): (u32, &'static str)| {
                *sink.lock().unwrap() = Some((a, b));
            },
        );

        debouncer.call((1, "one"));
        debouncer.call((2, "two"));
        sleep(Duration::from_millis(20)).await;

        assert_eq!(*seen.lock().unwrap(), Some((2, "two")));
    }
}
