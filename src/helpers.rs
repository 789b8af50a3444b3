//! Small conversion helpers

use std::time::Duration;

/// Converts a desired frame rate into the tick delay that achieves it.
///
/// Returns the smallest whole-millisecond delay giving at least `fps` ticks
/// per second, i.e. the ceiling of `1000 / fps`. Only positive finite rates
/// are meaningful; zero, negative, or non-finite input yields an unspecified
/// delay.
pub fn fps_to_delay(fps: f64) -> Duration {
    Duration::from_millis((1000.0 / fps).ceil() as u64)
}
