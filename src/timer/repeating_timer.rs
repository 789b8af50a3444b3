//! Repeating timer that runs registered callbacks at a fixed cadence

use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

/// Callback invoked once per tick
pub type Callback = Box<dyn FnMut() + Send + 'static>;

/// Delay used when a timer is constructed without an explicit one
pub const DEFAULT_DELAY: Duration = Duration::from_millis(10);

/// Runs a set of callbacks repeatedly at a configurable interval.
///
/// Callbacks fire in registration order on every tick. The ticking is driven
/// by a single task spawned on the tokio runtime, so [`start`] must be called
/// from within a runtime.
///
/// An active timer is not cancelled on drop: the spawned task keeps its own
/// reference to the callback list and keeps ticking. Call [`stop`] before
/// discarding a running timer.
///
/// [`start`]: RepeatingTimer::start
/// [`stop`]: RepeatingTimer::stop
pub struct RepeatingTimer {
    callbacks: Arc<Mutex<Vec<Callback>>>,
    delay: Duration,
    handle: Option<JoinHandle<()>>,
    ticks: Arc<AtomicU64>,
}

impl RepeatingTimer {
    /// Creates a stopped timer with no callbacks and the default delay.
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_DELAY)
    }

    /// Creates a stopped timer with no callbacks and the given delay.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            callbacks: Arc::new(Mutex::new(Vec::new())),
            delay,
            handle: None,
            ticks: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Creates a stopped timer with a single initial callback and the default
    /// delay.
    pub fn with_callback(callback: impl FnMut() + Send + 'static) -> Self {
        let mut timer = Self::new();
        timer.add(callback);
        timer
    }

    /// Creates a stopped timer with an initial list of callbacks, kept in the
    /// given order, and the default delay.
    pub fn with_callbacks(callbacks: Vec<Callback>) -> Self {
        let timer = Self::new();
        *timer.callbacks.lock().unwrap() = callbacks;
        timer
    }

    /// Adds a callback to run on every tick.
    ///
    /// Callbacks run in the order they were added. Adding to a running timer
    /// takes effect from the next tick.
    pub fn add(&mut self, callback: impl FnMut() + Send + 'static) -> &mut Self {
        self.callbacks.lock().unwrap().push(Box::new(callback));
        self
    }

    /// Sets the interval between ticks.
    ///
    /// Setting the current value again is a no-op and leaves a running
    /// registration untouched. Otherwise the new delay is stored and, if the
    /// timer is running, the timer is restarted so the new cadence takes
    /// effect immediately. While stopped, the value set last before
    /// [`start`](RepeatingTimer::start) is the one that matters.
    ///
    /// The delay is handed to the runtime as-is; tokio panics on a zero
    /// interval.
    pub fn set_delay(&mut self, delay: Duration) -> &mut Self {
        if delay == self.delay {
            return self;
        }

        self.delay = delay;
        if self.handle.is_some() {
            debug!("Restarting timer with delay {:?}", delay);
            self.start();
        }
        self
    }

    /// Starts (or restarts) the timer.
    ///
    /// Any existing registration is stopped first, so at most one tick task
    /// is live per timer. The first tick fires one full delay after this
    /// call.
    ///
    /// A callback that panics ends the tick task: the runtime contains the
    /// panic inside the task and no further ticks fire until `start` is
    /// called again.
    pub fn start(&mut self) -> &mut Self {
        self.stop();

        let callbacks = Arc::clone(&self.callbacks);
        let ticks = Arc::clone(&self.ticks);
        let delay = self.delay;

        self.handle = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + delay, delay);
            loop {
                interval.tick().await;

                {
                    let mut callbacks = callbacks.lock().unwrap();
                    for callback in callbacks.iter_mut() {
                        callback();
                    }
                }

                ticks.fetch_add(1, Ordering::Relaxed);
            }
        }));
        debug!("Timer started with delay {:?}", delay);

        self
    }

    /// Stops the timer if it is running.
    ///
    /// Safe to call when already stopped.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Timer stopped");
        }
    }

    /// True while a tick task is registered.
    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Current interval between ticks.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of completed ticks since the timer was created.
    pub fn tick_count(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }
}

impl Default for RepeatingTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_delay() {
        let timer = RepeatingTimer::new();
        assert_eq!(timer.delay(), DEFAULT_DELAY);
        assert!(!timer.is_active());
        assert_eq!(timer.tick_count(), 0);
    }

    #[test]
    fn test_with_delay_stores_delay() {
        let timer = RepeatingTimer::with_delay(Duration::from_millis(50));
        assert_eq!(timer.delay(), Duration::from_millis(50));
        assert!(!timer.is_active());
    }

    #[test]
    fn test_with_callbacks_keeps_all_callbacks() {
        let timer = RepeatingTimer::with_callbacks(vec![Box::new(|| {}), Box::new(|| {})]);
        assert_eq!(timer.callbacks.lock().unwrap().len(), 2);
        assert_eq!(timer.delay(), DEFAULT_DELAY);
    }

    #[test]
    fn test_add_is_chainable() {
        let mut timer = RepeatingTimer::new();
        timer.add(|| {}).add(|| {});
        assert_eq!(timer.callbacks.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_set_delay_while_stopped_stays_stopped() {
        let mut timer = RepeatingTimer::with_delay(Duration::from_millis(50));
        timer.set_delay(Duration::from_millis(20));
        assert_eq!(timer.delay(), Duration::from_millis(20));
        assert!(!timer.is_active());
    }

    #[test]
    fn test_set_delay_keeps_last_value() {
        let mut timer = RepeatingTimer::new();
        timer
            .set_delay(Duration::from_millis(20))
            .set_delay(Duration::from_millis(20))
            .set_delay(Duration::from_millis(30));
        assert_eq!(timer.delay(), Duration::from_millis(30));
    }

    #[test]
    fn test_stop_without_start_is_noop() {
        let mut timer = RepeatingTimer::new();
        timer.stop();
        timer.stop();
        assert!(!timer.is_active());
    }

    #[test]
    fn test_default_matches_new() {
        let timer = RepeatingTimer::default();
        assert_eq!(timer.delay(), DEFAULT_DELAY);
        assert!(!timer.is_active());
    }
}
