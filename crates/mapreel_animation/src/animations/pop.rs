//! Icon pop (overshoot scale)
//!
//! Scales a layer's icon up from 0 to its final size, swinging past the
//! target before settling, or, for a zero final scale, swings the
//! current size past itself on the way down to 0. The overshoot peak is
//! `final / max_vs_end`, controlled by a single amplitude constant
//! derived in closed form at construction.

use mapreel_core::{AnimationError, FrameClock, FrameRate, RenderSurface};

use super::{StepResult, Timing};
use crate::easing;

const ICON_SIZE: &str = "icon-size";

/// Options for [`Pop`].
#[derive(Clone, Debug)]
pub struct PopOpts {
    pub start_at_sec: f64,
    pub layer_id: String,
    pub final_scale: f64,
    /// Ratio of the final value to the overshoot peak, in (0, 1].
    pub max_vs_end: f64,
    pub seconds: f64,
}

impl PopOpts {
    pub fn new(start_at_sec: f64, layer_id: impl Into<String>) -> Self {
        Self {
            start_at_sec,
            layer_id: layer_id.into(),
            final_scale: 1.0,
            max_vs_end: 0.8,
            seconds: 0.275,
        }
    }

    pub fn final_scale(mut self, scale: f64) -> Self {
        self.final_scale = scale;
        self
    }

    pub fn max_vs_end(mut self, ratio: f64) -> Self {
        self.max_vs_end = ratio;
        self
    }

    pub fn seconds(mut self, seconds: f64) -> Self {
        self.seconds = seconds;
        self
    }
}

pub struct Pop {
    timing: Timing,
    layer_id: String,
    final_scale: f64,
    max_vs_end: f64,
    amplitude: f64,
    /// Ambient icon size for a pop-out, read on the first active tick.
    ambient: Option<f64>,
}

impl Pop {
    pub fn new(opts: PopOpts, rate: FrameRate) -> Result<Self, AnimationError> {
        if opts.max_vs_end <= 0.0 || opts.max_vs_end > 1.0 {
            return Err(AnimationError::InvalidOvershootRatio {
                ratio: opts.max_vs_end,
            });
        }

        Ok(Self {
            timing: Timing::new(rate, opts.start_at_sec, opts.seconds),
            layer_id: opts.layer_id,
            final_scale: opts.final_scale,
            max_vs_end: opts.max_vs_end,
            amplitude: easing::overshoot_amplitude(opts.max_vs_end),
            ambient: None,
        })
    }

    pub fn end_frame(&self) -> i64 {
        self.timing.end_frame()
    }

    fn popping_out(&self) -> bool {
        self.final_scale == 0.0
    }

    pub fn step(&mut self, clock: FrameClock, surface: &mut dyn RenderSurface) -> StepResult {
        let idx = self.timing.local_index(clock);
        if idx < 0 {
            return StepResult::Continue;
        }

        // a disappearing pop scales the size the icon currently has
        let base = if self.popping_out() {
            *self
                .ambient
                .get_or_insert_with(|| surface.layout_property(&self.layer_id, ICON_SIZE).unwrap_or(1.0))
        } else {
            self.final_scale
        };

        let n = self.timing.total_frames;
        if idx >= n as i64 {
            return StepResult::Done;
        }

        let x = (idx + 1) as u64;
        let value = if x == n {
            self.final_scale
        } else {
            base * easing::overshoot_fraction(x, n, self.amplitude, self.max_vs_end, self.popping_out())
        };
        surface.set_layout_property(&self.layer_id, ICON_SIZE, value);

        StepResult::Continue
    }
}
