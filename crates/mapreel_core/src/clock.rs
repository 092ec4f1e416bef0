//! Frame clock and tick-rate conversions
//!
//! Scenes are authored in seconds; the engine runs on integer frames.
//! [`FrameRate`] owns every seconds-to-frames conversion so that all
//! animations derive their frame counts the same way. [`FrameClock`] is
//! the single global frame counter, threaded explicitly into each step
//! rather than living in ambient global state.

use serde::{Deserialize, Serialize};

/// Fixed number of ticks per second for a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRate(u32);

impl FrameRate {
    pub const fn new(fps: u32) -> Self {
        Self(if fps == 0 { 1 } else { fps })
    }

    pub const fn fps(&self) -> u32 {
        self.0
    }

    /// Duration in frames, rounded up. Never 0: a zero-length phase would
    /// make every per-tick fraction degenerate, so the minimum is one
    /// frame and zero-second animations snap on that single frame.
    pub fn frames_ceil(&self, seconds: f64) -> u64 {
        let frames = (seconds * self.0 as f64).ceil();
        if frames < 1.0 {
            1
        } else {
            frames as u64
        }
    }

    /// Duration in frames, rounded to nearest. Used for phase splits,
    /// where the three rounded phases are summed to a total afterwards.
    pub fn frames_round(&self, seconds: f64) -> u64 {
        (seconds * self.0 as f64).round().max(0.0) as u64
    }

    /// Absolute frame index for a start time.
    pub fn frame_at(&self, seconds: f64) -> i64 {
        (seconds * self.0 as f64).round() as i64
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::new(60)
    }
}

/// The global frame counter. Starts at 0, advances exactly once per tick,
/// never runs backwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrameClock(u64);

impl FrameClock {
    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn frame(&self) -> u64 {
        self.0
    }

    pub fn advance(&mut self) {
        self.0 += 1;
    }

    /// Frame index local to an animation that starts on `start_frame`.
    /// Negative while the animation is still waiting to start.
    pub fn local_index(&self, start_frame: i64) -> i64 {
        self.0 as i64 - start_frame
    }
}
