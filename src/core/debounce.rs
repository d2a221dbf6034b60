//! Debounced value cell.
//!
//! A [`Debounced`] holds the last *settled* value. Each [`Debounced::update`]
//! restarts a quiet-period timer; the value settles only when the timer
//! fires without being superseded. Intermediate values are never published.

use crate::utils::error::{CreationaryError, Result};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub type SettleListener<T> = Arc<dyn Fn(&T) + Send + Sync>;

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct TimerState {
    generation: u64,
    pending: Option<JoinHandle<()>>,
    disposed: bool,
}

impl TimerState {
    /// Invalidates whatever timer is in flight.
    fn supersede(&mut self) -> u64 {
        self.generation += 1;
        if let Some(prev) = self.pending.take() {
            prev.abort();
        }
        self.generation
    }
}

struct Shared<T> {
    settled: watch::Sender<T>,
    state: Mutex<TimerState>,
    listeners: Mutex<Vec<SettleListener<T>>>,
}

impl<T: Clone> Shared<T> {
    fn settle(&self, generation: u64, value: T) {
        {
            let mut state = lock(&self.state);
            if state.disposed || state.generation != generation {
                return;
            }
            state.pending = None;
            self.settled.send_replace(value.clone());
        }
        tracing::debug!(generation, "Debounced value settled");
        // 先複製清單再放鎖，listener 內可以再註冊
        let listeners: Vec<SettleListener<T>> = lock(&self.listeners).clone();
        for listener in &listeners {
            listener(&value);
        }
    }
}

pub struct Debounced<T> {
    shared: Arc<Shared<T>>,
    delay: Duration,
    handle: Handle,
}

impl<T> Debounced<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates a cell whose settled value is `initial` right away.
    ///
    /// Must be called from within a tokio runtime; see [`Debounced::with_handle`] otherwise.
    pub fn new(initial: T, delay: Duration) -> Result<Self> {
        let handle = Handle::try_current().map_err(|_| CreationaryError::RuntimeUnavailable)?;
        Ok(Self::with_handle(initial, delay, handle))
    }

    pub fn with_handle(initial: T, delay: Duration, handle: Handle) -> Self {
        let (settled, _) = watch::channel(initial);
        Self {
            shared: Arc::new(Shared {
                settled,
                state: Mutex::new(TimerState::default()),
                listeners: Mutex::new(Vec::new()),
            }),
            delay,
            handle,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 記錄新值並重新開始計時
    pub fn update(&self, value: T) {
        let mut state = lock(&self.shared.state);
        if state.disposed {
            tracing::debug!("Ignoring update on disposed debounced value");
            return;
        }
        let generation = state.supersede();

        let weak: Weak<Shared<T>> = Arc::downgrade(&self.shared);
        let delay = self.delay;
        state.pending = Some(self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(shared) = weak.upgrade() {
                shared.settle(generation, value);
            }
        }));
        tracing::debug!(generation, delay_ms = delay.as_millis() as u64, "Debounce timer restarted");
    }

    /// The last settled value.
    pub fn get(&self) -> T {
        self.shared.settled.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.shared.settled.subscribe()
    }

    pub fn on_settle<F>(&self, listener: F)
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        lock(&self.shared.listeners).push(Arc::new(listener));
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.shared.state)
            .pending
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    /// Drops the pending update, if any. The settled value is left as is.
    pub fn cancel(&self) {
        let mut state = lock(&self.shared.state);
        if state.pending.is_some() {
            tracing::debug!("Pending debounced update cancelled");
        }
        state.supersede();
    }

    /// Cancels and stops accepting updates.
    pub fn dispose(&self) {
        let mut state = lock(&self.shared.state);
        state.supersede();
        state.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        lock(&self.shared.state).disposed
    }
}

impl<T> Drop for Debounced<T> {
    fn drop(&mut self) {
        lock(&self.shared.state).supersede();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_new_outside_runtime_fails() {
        assert!(matches!(
            Debounced::new(1, Duration::from_millis(10)),
            Err(CreationaryError::RuntimeUnavailable)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_keeps_settled_value() {
        let value = Debounced::new(1, Duration::from_millis(50)).unwrap();
        value.update(2);
        assert!(value.is_pending());

        value.cancel();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(value.get(), 1);
        assert!(!value.is_pending());

        value.update(3);
        tokio::time::sleep(Duration::from_millis(51)).await;
        assert_eq!(value.get(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_ignores_updates() {
        let value = Debounced::new("a", Duration::from_millis(50)).unwrap();
        value.update("b");
        value.dispose();
        value.update("c");
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(value.is_disposed());
        assert_eq!(value.get(), "a");
    }

    #[tokio::test(start_paused = true)]
    async fn test_listener_can_register_listener() {
        let value = Arc::new(Debounced::new(0u32, Duration::from_millis(50)).unwrap());
        let nested = Arc::new(AtomicUsize::new(0));

        let weak = Arc::downgrade(&value);
        let counter = Arc::clone(&nested);
        value.on_settle(move |_| {
            if let Some(value) = weak.upgrade() {
                let counter = Arc::clone(&counter);
                value.on_settle(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                });
            }
        });

        value.update(1);
        tokio::time::sleep(Duration::from_millis(51)).await;
        assert_eq!(value.get(), 1);
        // 本次 settle 用的是註冊前的清單
        assert_eq!(nested.load(Ordering::SeqCst), 0);

        value.update(2);
        tokio::time::sleep(Duration::from_millis(51)).await;
        assert_eq!(value.get(), 2);
        assert_eq!(nested.load(Ordering::SeqCst), 1);
    }
}
