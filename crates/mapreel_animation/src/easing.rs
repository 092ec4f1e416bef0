//! Easing functions for frame-indexed animations
//!
//! All functions take a 1-based local tick index `x` and a total tick
//! count `n`. Two families:
//!
//! - *increments*: the per-tick share of a total; summed over
//!   `x = 1..=n` they reach exactly 1.0, so cumulative application lands
//!   on the target at the last tick regardless of rounding drift
//! - *fractions*: the cumulative progress at tick `x`, reaching 1.0 at
//!   `x = n`

use std::f64::consts::PI;

/// Raised-sine increment: `(2/n) · sin²(π·x/n)`.
///
/// Σ over x = 1..=n is exactly 1. The x = n term is 0, so the sum over
/// 1..n is also 1, so a path revealed with these increments is complete one
/// tick before the animation retires.
#[inline]
pub fn raised_sine_increment(x: u64, n: u64) -> f64 {
    let n = n as f64;
    (2.0 / n) * (PI * x as f64 / n).sin().powi(2)
}

/// Ease-out cumulative fraction: `sin²(π·x/(2n))`.
///
/// Monotone from ~0 to 1 at x = n; fast early, slow late.
#[inline]
pub fn ease_out_fraction(x: u64, n: u64) -> f64 {
    (PI * x as f64 / (2.0 * n as f64)).sin().powi(2)
}

/// Plain linear cumulative fraction: `x/n`.
#[inline]
pub fn linear_fraction(x: u64, n: u64) -> f64 {
    x as f64 / n as f64
}

/// Amplitude constant for the overshoot curve.
///
/// `max_vs_end` is the ratio of the final value to the overshoot peak,
/// in (0, 1]. The amplitude is chosen so the curve ends exactly on 1 and
/// peaks at `1 / max_vs_end`.
#[inline]
pub fn overshoot_amplitude(max_vs_end: f64) -> f64 {
    PI / 2.0 + (1.0 - max_vs_end).sqrt().asin()
}

/// Overshoot cumulative fraction:
/// `sin²(amplitude · f(π·x/(2n))) / max_vs_end`.
///
/// With `f = sin` (appearing) the curve rises from 0, overshoots past 1,
/// and settles on 1 at x = n. With `f = cos` (`invert`, disappearing) it
/// starts at 1, swings past it, and lands on 0.
#[inline]
pub fn overshoot_fraction(x: u64, n: u64, amplitude: f64, max_vs_end: f64, invert: bool) -> f64 {
    let theta = PI * x as f64 / (2.0 * n as f64);
    let inner = if invert { theta.cos() } else { theta.sin() };
    (amplitude * inner).sin().powi(2) / max_vs_end
}

/// Periodic pulse factor: `(1/3)·sin²(π·x/period) + 1`.
///
/// Oscillates between 1 and 4/3 with period `period` ticks; applied
/// multiplicatively to a width each tick.
#[inline]
pub fn pulse_factor(x: u64, period: u64) -> f64 {
    (PI * x as f64 / period as f64).sin().powi(2) / 3.0 + 1.0
}
