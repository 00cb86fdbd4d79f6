//! Timed suspension and call-rate wrappers
//!
//! Each [`Debounce`] / [`Throttle`] owns its own timer state; wrappers never
//! share it. Both must be driven from inside a Tokio runtime.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Wrapped function type
pub type Callback<A> = Arc<dyn Fn(A) + Send + Sync>;

/// Suspend the current task for at least `ms` milliseconds
pub async fn wait(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Runs the wrapped function `delay` after the most recent call, with that
/// call's arguments. Earlier pending calls are cancelled.
pub struct Debounce<A> {
    func: Callback<A>,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<A: Send + 'static> Debounce<A> {
    pub fn new<F>(func: F, delay: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Cancel any scheduled run and schedule one for `now + delay`
    pub async fn call(&self, args: A) {
        let mut pending = self.pending.lock().await;
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let func = self.func.clone();
        let deadline = Instant::now() + self.delay;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            func(args);
        }));
    }

    /// True while a scheduled run has not fired yet
    pub async fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Runs the wrapped function on the first call, then drops every call until
/// `limit` has passed since the last run.
pub struct Throttle<A> {
    func: Callback<A>,
    limit: Duration,
    last_run: Mutex<Option<Instant>>,
}

impl<A> Throttle<A> {
    pub fn new<F>(func: F, limit: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            limit,
            last_run: Mutex::new(None),
        }
    }

    /// Run now unless inside the window; returns whether the call ran
    pub async fn call(&self, args: A) -> bool {
        {
            let mut last_run = self.last_run.lock().await;
            let now = Instant::now();
            if let Some(at) = *last_run {
                if now.duration_since(at) < self.limit {
                    tracing::trace!("Throttled call dropped");
                    return false;
                }
            }
            *last_run = Some(now);
        }

        (self.func)(args);
        true
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

/// Wrap `func` so only the last call within `delay_ms` runs
pub fn debounce<A, F>(func: F, delay_ms: u64) -> Debounce<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounce::new(func, Duration::from_millis(delay_ms))
}

/// Wrap `func` so it runs at most once per `limit_ms`
pub fn throttle<A, F>(func: F, limit_ms: u64) -> Throttle<A>
where
    F: Fn(A) + Send + Sync + 'static,
{
    Throttle::new(func, Duration::from_millis(limit_ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    type Fired<T> = Arc<StdMutex<Vec<(T, Duration)>>>;

    fn recorder<T: Send + 'static>(start: Instant) -> (Fired<T>, impl Fn(T) + Send + Sync + 'static) {
        let fired: Fired<T> = Arc::new(StdMutex::new(Vec::new()));
        let sink = fired.clone();
        (fired, move |value: T| {
            sink.lock().unwrap().push((value, start.elapsed()))
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_suspends() {
        let start = Instant::now();
        wait(250).await;
        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_fires_last_call_once() {
        let start = Instant::now();
        let (fired, func) = recorder::<u32>(start);
        let debounced = debounce(func, 50);

        debounced.call(1).await;
        wait(10).await;
        debounced.call(2).await;
        wait(10).await;
        debounced.call(3).await;

        wait(49).await;
        assert!(fired.lock().unwrap().is_empty());
        assert!(debounced.is_pending().await);

        wait(100).await;
        let fired = fired.lock().unwrap().clone();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].0, 3);
        assert!(fired[0].1 >= Duration::from_millis(70) && fired[0].1 < Duration::from_millis(71));
        assert!(!debounced.is_pending().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_wrappers_are_independent() {
        let start = Instant::now();
        let (fired_a, func_a) = recorder::<&'static str>(start);
        let (fired_b, func_b) = recorder::<&'static str>(start);
        let a = debounce(func_a, 30);
        let b = debounce(func_b, 30);

        a.call("a").await;
        b.call("b").await;
        wait(100).await;

        assert_eq!(fired_a.lock().unwrap().len(), 1);
        assert_eq!(fired_b.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttle_fires_first_call_only() {
        let start = Instant::now();
        let (fired, func) = recorder::<u32>(start);
        let throttled = throttle(func, 50);

        assert!(throttled.call(1).await);
        wait(10).await;
        assert!(!throttled.call(2).await);
        wait(10).await;
        assert!(!throttled.call(3).await);
        wait(100).await;

        assert_eq!(*fired.lock().unwrap(), vec![(1, Duration::ZERO)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttle_window_restarts() {
        let start = Instant::now();
        let (fired, func) = recorder::<u32>(start);
        let throttled = throttle(func, 50);

        throttled.call(1).await;
        wait(50).await;
        throttled.call(2).await;
        wait(20).await;
        throttled.call(3).await;

        let values: Vec<u32> = fired.lock().unwrap().iter().map(|(n, _)| *n).collect();
        assert_eq!(values, vec![1, 2]);
    }
}
