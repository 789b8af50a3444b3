//! Repeating-timer utility built on the tokio runtime
//!
//! Wraps periodic scheduling behind a small handle: register one or more
//! callbacks, start and stop the cadence, and change the delay at runtime.
//! Callbacks run in registration order on every tick.
//!
//! ```no_run
//! use repeating_timer::{fps_to_delay, RepeatingTimer};
//!
//! # async fn demo() {
//! let mut timer = RepeatingTimer::with_delay(fps_to_delay(60.0));
//! timer.add(|| println!("tick")).start();
//! // ...
//! timer.stop();
//! # }
//! ```

pub mod helpers;
pub mod timer;

pub use helpers::fps_to_delay;
pub use timer::{Callback, RepeatingTimer, DEFAULT_DELAY};
