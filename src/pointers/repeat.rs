//! Key repeat timing
//!
//! Plain keys repeat every `long_press_interval` after `long_press_timeout`.
//! Precise-repeat keys (cursor sliders) start twice as fast, then repeat at
//! twice the interval divided by an acceleration factor that follows how far
//! the finger is dragged.

use std::time::Duration;

use crate::config::Config;
use crate::keyboard::Flags;

pub const MIN_ACCELERATION: f32 = 0.1;
pub const MAX_ACCELERATION: f32 = 8.0;

/// Shortest delay between two repeats
pub const MIN_INTERVAL_MS: u64 = 1;

/// Delay before the first repeat of a freshly (re)started timer
pub fn initial_delay(config: &Config, flags: Flags) -> Duration {
    let mut timeout = config.long_press_timeout_ms;
    if flags.is_precise_repeat() {
        timeout /= 2;
    }
    Duration::from_millis(timeout)
}

/// Delay until the next repeat after one has fired
///
/// `baseline` is the pointer's acceleration baseline; it is only touched for
/// modulated keys.
pub fn next_interval(
    config: &Config,
    flags: Flags,
    ptr_dist: f32,
    baseline: &mut Option<f32>,
) -> Duration {
    let interval = config.long_press_interval_ms;
    if !(config.precise_repeat && flags.is_precise_repeat()) {
        return Duration::from_millis(interval.max(MIN_INTERVAL_MS));
    }
    let modulated = interval.saturating_mul(2) as f32 / acceleration(ptr_dist, baseline);
    // A zero delay would fire again at the same instant, forever
    Duration::from_millis((modulated as u64).max(MIN_INTERVAL_MS))
}

/// Acceleration factor for a pointer `ptr_dist` away from its initial touch
///
/// The first call pins the baseline to the current distance. Once the finger
/// goes past twice the baseline, the baseline moves to half the distance so
/// long swipes don't saturate. The result is always within
/// [`MIN_ACCELERATION`, `MAX_ACCELERATION`].
pub fn acceleration(ptr_dist: f32, baseline: &mut Option<f32>) -> f32 {
    let mut base = *baseline.get_or_insert(ptr_dist);
    if ptr_dist > base * 2. {
        base = ptr_dist / 2.;
        *baseline = Some(base);
    }

    let left = base / 2.;
    let width = base - left;
    if width <= 0. {
        // Repeat started without any movement
        return 1.;
    }
    let accel = (ptr_dist - left) / width;
    accel.clamp(MIN_ACCELERATION, MAX_ACCELERATION)
}
