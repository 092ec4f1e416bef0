//! mapreel Animation Engine
//!
//! Frame-driven animations against an abstract map surface:
//!
//! - **Easing**: closed-form progress functions whose per-tick increments
//!   sum exactly to their target total
//! - **Path Marching**: arc-length polyline traversal with carry-over
//!   across segments
//! - **Animations**: a closed set of variants (line reveal, dotted line,
//!   camera tween, rotation, pop, blink, paint tweens) stepped in lockstep
//! - **Scheduler**: owns the live set and the global frame clock, retires
//!   finished animations each tick
//!
//! Everything runs single-threaded and cooperative: one tick advances the
//! clock once and steps every live animation exactly once.

pub mod animations;
pub mod driver;
pub mod easing;
pub mod path;
pub mod scheduler;

pub use animations::{
    Animation, Blink, BlinkOpts, DottedLineAnimation, DottedLineOpts, Direction, IdleHoldOpts,
    InflateDeflate, InflateDeflateOpts, LineAnimation, LineOpts, LinearPaintAdjust,
    LinearPaintAdjustOpts, MapViewAdjustment, MapViewOpts, Pop, PopOpts, Rotation,
    SetSourceCoords, StepResult,
};
pub use driver::run_to_completion;
pub use path::{March, PathCursor};
pub use scheduler::{AnimationId, Scheduler};
