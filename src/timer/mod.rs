//! Timer module for repeating callback scheduling

pub mod repeating_timer;

pub use repeating_timer::{Callback, RepeatingTimer, DEFAULT_DELAY};
