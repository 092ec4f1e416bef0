//! Bearing control
//!
//! Two sub-machines behind one interface:
//!
//! - *direct tween*: rotate to a target bearing in a caller-chosen
//!   direction, raised-sine eased, landing on the target exactly
//! - *idle hold*: ramp up to a constant per-tick rotation rate, hold it,
//!   then unwind back to the bearing the animation started from. The
//!   post-idle phase cancels everything the first two phases accumulated
//!
//! Phase boundaries are fixed frame offsets computed at construction;
//! which phase a tick belongs to is a pure function of the local index.

use mapreel_core::{AnimationError, FrameClock, FrameRate, RenderSurface};

use super::{StepResult, Timing};
use crate::easing;

/// Rotation sense. Counterclockwise bearing deltas are positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    Counterclockwise,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Direction::Clockwise => -1.0,
            Direction::Counterclockwise => 1.0,
        }
    }
}

/// Options for the idle-hold sub-machine.
#[derive(Clone, Copy, Debug)]
pub struct IdleHoldOpts {
    pub start_at_sec: f64,
    pub direction: Direction,
    /// Constant rotation rate during the hold, degrees per frame.
    pub degrees_per_frame: f64,
    /// Combined length of the ramp-up and hold phases.
    pub idle_seconds: f64,
    /// Length of the unwind back to the starting bearing.
    pub post_idle_seconds: f64,
    /// How `idle_seconds` splits between ramp-up and hold.
    pub phase_split: (f64, f64),
}

impl IdleHoldOpts {
    pub fn new(
        start_at_sec: f64,
        direction: Direction,
        degrees_per_frame: f64,
        idle_seconds: f64,
        post_idle_seconds: f64,
    ) -> Self {
        Self {
            start_at_sec,
            direction,
            degrees_per_frame,
            idle_seconds,
            post_idle_seconds,
            phase_split: (0.4, 0.6),
        }
    }

    pub fn phase_split(mut self, pre: f64, idle: f64) -> Self {
        self.phase_split = (pre, idle);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    PreIdle,
    Idle,
    PostIdle,
}

#[derive(Clone, Copy, Debug)]
struct TweenState {
    current: f64,
    delta: f64,
    end: f64,
}

#[derive(Debug)]
enum Kind {
    Tween {
        target: f64,
        snap: bool,
        state: Option<TweenState>,
    },
    IdleHold {
        pre_frames: u64,
        post_frames: u64,
        /// Local frame on which the unwind begins.
        post_start: u64,
        degrees_per_frame: f64,
        /// Ambient bearing at tick 0.
        origin: Option<f64>,
        /// Total signed degrees the unwind must remove, measured on
        /// entry to the post-idle phase.
        unwind: f64,
    },
}

#[derive(Debug)]
pub struct Rotation {
    timing: Timing,
    direction: Direction,
    kind: Kind,
}

impl Rotation {
    /// Direct tween toward `target_bearing`.
    pub fn tween(
        start_at_sec: f64,
        target_bearing: f64,
        direction: Direction,
        seconds: f64,
        rate: FrameRate,
    ) -> Self {
        Self {
            timing: Timing::new(rate, start_at_sec, seconds),
            direction,
            kind: Kind::Tween {
                target: target_bearing,
                snap: seconds == 0.0,
                state: None,
            },
        }
    }

    /// Idle-hold rotation: ramp, hold, unwind to the starting bearing.
    pub fn idle_hold(opts: IdleHoldOpts, rate: FrameRate) -> Result<Self, AnimationError> {
        let (pre, idle) = opts.phase_split;
        if pre <= 0.0 || idle <= 0.0 {
            return Err(AnimationError::InvalidPhaseSplit);
        }

        let pre_frames = rate.frames_round(opts.idle_seconds * pre).max(1);
        let idle_frames = rate.frames_round(opts.idle_seconds * idle).max(1);
        let post_frames = rate.frames_round(opts.post_idle_seconds).max(1);
        let total = pre_frames + idle_frames + post_frames;

        Ok(Self {
            timing: Timing {
                start_frame: rate.frame_at(opts.start_at_sec),
                total_frames: total,
            },
            direction: opts.direction,
            kind: Kind::IdleHold {
                pre_frames,
                post_frames,
                post_start: pre_frames + idle_frames,
                degrees_per_frame: opts.degrees_per_frame,
                origin: None,
                unwind: 0.0,
            },
        })
    }

    pub fn end_frame(&self) -> i64 {
        self.timing.end_frame()
    }

    /// Delta from `ambient` to `target` whose sign matches the requested
    /// direction: counterclockwise rotations take the wrap into [0, 360),
    /// clockwise into (-360, 0].
    fn directed_delta(ambient: f64, target: f64, direction: Direction) -> f64 {
        let wrapped = (target - ambient).rem_euclid(360.0);
        match direction {
            Direction::Counterclockwise => wrapped,
            Direction::Clockwise => {
                if wrapped == 0.0 {
                    0.0
                } else {
                    wrapped - 360.0
                }
            }
        }
    }

    fn step_tween(&mut self, idx: i64, surface: &mut dyn RenderSurface) -> StepResult {
        let Kind::Tween { target, snap, state } = &mut self.kind else {
            unreachable!("tween step on idle-hold rotation");
        };

        if *snap {
            surface.set_bearing(*target);
            return StepResult::Done;
        }

        let direction = self.direction;
        let tween = state.get_or_insert_with(|| {
            let ambient = surface.bearing();
            let delta = Self::directed_delta(ambient, *target, direction);
            TweenState {
                current: ambient,
                delta,
                // keep the exact caller value when no wrap was needed
                end: if ambient + delta == *target {
                    *target
                } else {
                    ambient + delta
                },
            }
        });

        let n = self.timing.total_frames;
        if idx >= n as i64 {
            return StepResult::Done;
        }

        let x = (idx + 1) as u64;
        if x == n {
            surface.set_bearing(tween.end);
            return StepResult::Continue;
        }

        tween.current += easing::raised_sine_increment(x, n) * tween.delta;
        surface.set_bearing(tween.current);
        StepResult::Continue
    }

    fn step_idle(&mut self, idx: i64, surface: &mut dyn RenderSurface) -> StepResult {
        let sign = self.direction.sign();
        let n = self.timing.total_frames;
        let Kind::IdleHold {
            pre_frames,
            post_frames,
            post_start,
            degrees_per_frame,
            origin,
            unwind,
        } = &mut self.kind
        else {
            unreachable!("idle step on tween rotation");
        };

        let origin = *origin.get_or_insert_with(|| surface.bearing());

        if idx >= n as i64 {
            return StepResult::Done;
        }

        let x = (idx + 1) as u64;
        if x == n {
            // unwind is complete by construction; land on the origin exactly
            surface.set_bearing(origin);
            return StepResult::Continue;
        }

        let phase = if idx as u64 >= *post_start {
            Phase::PostIdle
        } else if idx as u64 >= *pre_frames {
            Phase::Idle
        } else {
            Phase::PreIdle
        };

        if idx as u64 == *post_start {
            // entering the unwind: measure everything accumulated so far
            *unwind = origin - surface.bearing();
        }

        let to_turn = match phase {
            Phase::PreIdle => {
                sign * *degrees_per_frame * easing::ease_out_fraction(x, *pre_frames)
            }
            Phase::Idle => sign * *degrees_per_frame,
            Phase::PostIdle => {
                let local_x = x - *post_start;
                *unwind * easing::raised_sine_increment(local_x, *post_frames)
            }
        };

        surface.set_bearing(surface.bearing() + to_turn);
        StepResult::Continue
    }

    pub fn step(&mut self, clock: FrameClock, surface: &mut dyn RenderSurface) -> StepResult {
        let idx = self.timing.local_index(clock);
        if idx < 0 {
            return StepResult::Continue;
        }

        match self.kind {
            Kind::Tween { .. } => self.step_tween(idx, surface),
            Kind::IdleHold { .. } => self.step_idle(idx, surface),
        }
    }
}
