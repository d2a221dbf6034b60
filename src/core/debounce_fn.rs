//! Debounced callback.
//!
//! [`DebouncedFn`] wraps a target so a burst of calls inside the quiet period
//! reaches the target once, with the arguments of the last call. Clones share
//! the same cell, so a clone is the same wrapped function.

use crate::core::debounce::lock;
use crate::utils::error::{CreationaryError, Result};
use std::future::Future;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

type Target<A> = Arc<dyn Fn(A) + Send + Sync>;

struct CallState<A> {
    generation: u64,
    last_args: Option<A>,
    pending: Option<JoinHandle<()>>,
    /// Set while the target runs, so `is_pending` covers the call itself.
    firing: bool,
    disposed: bool,
}

impl<A> CallState<A> {
    fn clear(&mut self) {
        self.generation += 1;
        self.last_args = None;
        if let Some(prev) = self.pending.take() {
            prev.abort();
        }
    }
}

struct Inner<A> {
    delay: Duration,
    handle: Handle,
    target: Target<A>,
    state: Mutex<CallState<A>>,
}

/// Clears `firing` even if the target panics.
struct FiringGuard<'a, A> {
    state: &'a Mutex<CallState<A>>,
}

impl<A> Drop for FiringGuard<'_, A> {
    fn drop(&mut self) {
        lock(self.state).firing = false;
    }
}

impl<A> Inner<A> {
    fn fire(&self, generation: u64) {
        let args = {
            let mut state = lock(&self.state);
            if state.disposed || state.generation != generation {
                return;
            }
            state.pending = None;
            let args = state.last_args.take();
            state.firing = args.is_some();
            args
        };
        // 鎖已釋放，target 可以再呼叫 call()
        if let Some(args) = args {
            let _guard = FiringGuard { state: &self.state };
            tracing::debug!(generation, "Debounced call fired");
            (self.target)(args);
        }
    }
}

impl<A> Drop for Inner<A> {
    fn drop(&mut self) {
        lock(&self.state).clear();
    }
}

pub struct DebouncedFn<A> {
    inner: Arc<Inner<A>>,
}

impl<A> Clone for DebouncedFn<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> std::fmt::Debug for DebouncedFn<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebouncedFn")
            .field("delay", &self.inner.delay)
            .finish_non_exhaustive()
    }
}

impl<A> DebouncedFn<A>
where
    A: Send + 'static,
{
    /// Wraps a synchronous target.
    pub fn new<F>(target: F, delay: Duration) -> Result<Self>
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        let handle = Handle::try_current().map_err(|_| CreationaryError::RuntimeUnavailable)?;
        Ok(Self::with_handle(target, delay, handle))
    }

    /// Wraps a target returning a future.
    ///
    /// When the call fires, the future is spawned and left to run on its own.
    /// Its output, including any error, is dropped.
    pub fn new_async<F, Fut>(target: F, delay: Duration) -> Result<Self>
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: Send + 'static,
    {
        let handle = Handle::try_current().map_err(|_| CreationaryError::RuntimeUnavailable)?;
        let spawner = handle.clone();
        let target = move |args: A| {
            drop(spawner.spawn(target(args)));
        };
        Ok(Self::with_handle(target, delay, handle))
    }

    pub fn with_handle<F>(target: F, delay: Duration, handle: Handle) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                delay,
                handle,
                target: Arc::new(target),
                state: Mutex::new(CallState {
                    generation: 0,
                    last_args: None,
                    pending: None,
                    firing: false,
                    disposed: false,
                }),
            }),
        }
    }

    /// Records `args` and restarts the quiet period.
    pub fn call(&self, args: A) {
        let mut state = lock(&self.inner.state);
        if state.disposed {
            tracing::debug!("Ignoring call on disposed debounced function");
            return;
        }
        state.clear();
        state.last_args = Some(args);
        let generation = state.generation;

        let weak: Weak<Inner<A>> = Arc::downgrade(&self.inner);
        let delay = self.inner.delay;
        state.pending = Some(self.inner.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                inner.fire(generation);
            }
        }));
    }

    /// True from the first call of a burst until the target has returned.
    pub fn is_pending(&self) -> bool {
        let state = lock(&self.inner.state);
        state.last_args.is_some() || state.firing
    }

    /// Drops the scheduled invocation. Later calls work as usual.
    pub fn cancel(&self) {
        lock(&self.inner.state).clear();
    }

    /// Drops the scheduled invocation and ignores all later calls.
    pub fn dispose(&self) {
        let mut state = lock(&self.inner.state);
        state.clear();
        state.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        lock(&self.inner.state).disposed
    }

    pub fn delay(&self) -> Duration {
        self.inner.delay
    }

    /// True when both handles wrap the same cell.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::OnceLock;

    #[test]
    fn test_new_outside_runtime_fails() {
        let result = DebouncedFn::new(|_: u32| {}, Duration::from_millis(10));
        assert!(matches!(result, Err(CreationaryError::RuntimeUnavailable)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clone_shares_identity() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let debounced = DebouncedFn::new(
            move |_: ()| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            Duration::from_millis(100),
        )
        .unwrap();
        let other = DebouncedFn::new(|_: ()| {}, Duration::from_millis(100)).unwrap();
        let clone = debounced.clone();

        assert!(DebouncedFn::ptr_eq(&debounced, &clone));
        assert!(!DebouncedFn::ptr_eq(&debounced, &other));

        // 兩個 handle 共用同一個計時器
        debounced.call(());
        tokio::time::sleep(Duration::from_millis(50)).await;
        clone.call(());
        tokio::time::sleep(Duration::from_millis(101)).await;

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_then_call_again() {
        let hits = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&hits);
        let debounced = DebouncedFn::new(
            move |n: u32| sink.lock().unwrap().push(n),
            Duration::from_millis(100),
        )
        .unwrap();

        debounced.call(1);
        assert!(debounced.is_pending());
        debounced.cancel();
        assert!(!debounced.is_pending());
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(hits.lock().unwrap().is_empty());

        debounced.call(2);
        tokio::time::sleep(Duration::from_millis(101)).await;
        assert_eq!(*hits.lock().unwrap(), vec![2]);
        assert!(!debounced.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_while_target_runs() {
        let slot: Arc<OnceLock<DebouncedFn<u32>>> = Arc::new(OnceLock::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let target_slot = Arc::clone(&slot);
        let sink = Arc::clone(&seen);
        let debounced = DebouncedFn::new(
            move |n: u32| {
                let pending = target_slot.get().map(|d| d.is_pending());
                sink.lock().unwrap().push((n, pending));
            },
            Duration::from_millis(100),
        )
        .unwrap();
        assert!(slot.set(debounced.clone()).is_ok());

        debounced.call(5);
        tokio::time::sleep(Duration::from_millis(101)).await;

        assert_eq!(*seen.lock().unwrap(), vec![(5, Some(true))]);
        assert!(!debounced.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_last_handle_cancels() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let debounced = DebouncedFn::new(
            move |_: ()| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            Duration::from_millis(100),
        )
        .unwrap();

        debounced.call(());
        drop(debounced);
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
