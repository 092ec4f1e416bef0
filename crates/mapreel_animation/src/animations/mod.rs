//! The animation variants
//!
//! A closed set: no new kinds appear at runtime, so the variants live in
//! one exhaustive enum rather than behind a trait object. Every variant
//! follows the same contract:
//!
//! - constructed eagerly, before the clock starts
//! - inert while its local frame index is negative
//! - one-shot ambient capture on its first active tick (ambient surface
//!   state may have been rewritten by animations that finished earlier)
//! - mutates the surface each active tick
//! - reports [`StepResult::Done`] exactly once, on its retirement tick

mod adjust;
mod blink;
mod dotted;
mod line;
mod pop;
mod rotation;
mod view;

pub use adjust::{
    InflateDeflate, InflateDeflateOpts, LinearPaintAdjust, LinearPaintAdjustOpts, SetSourceCoords,
};
pub use blink::{Blink, BlinkOpts};
pub use dotted::{DottedLineAnimation, DottedLineOpts};
pub use line::{LineAnimation, LineOpts};
pub use pop::{Pop, PopOpts};
pub use rotation::{Direction, IdleHoldOpts, Rotation};
pub use view::{MapViewAdjustment, MapViewOpts};

use mapreel_core::{FrameClock, FrameRate, RenderSurface};

/// What a step reported back to the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    Continue,
    Done,
}

impl StepResult {
    pub fn is_done(self) -> bool {
        self == StepResult::Done
    }
}

/// Start frame and duration shared by every variant.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Timing {
    pub start_frame: i64,
    pub total_frames: u64,
}

impl Timing {
    pub fn new(rate: FrameRate, start_at_sec: f64, seconds: f64) -> Self {
        Self {
            start_frame: rate.frame_at(start_at_sec),
            total_frames: rate.frames_ceil(seconds),
        }
    }

    pub fn local_index(&self, clock: FrameClock) -> i64 {
        clock.local_index(self.start_frame)
    }

    /// Absolute frame on which the variant retires.
    pub fn end_frame(&self) -> i64 {
        self.start_frame + self.total_frames as i64
    }
}

/// One scheduled animation.
#[allow(clippy::large_enum_variant)]
pub enum Animation {
    Line(LineAnimation),
    DottedLine(DottedLineAnimation),
    MapView(MapViewAdjustment),
    Rotation(Rotation),
    Pop(Pop),
    Blink(Blink),
    LinearAdjust(LinearPaintAdjust),
    InflateDeflate(InflateDeflate),
    SetSourceCoords(SetSourceCoords),
}

impl Animation {
    /// Step at the given clock value. Stepping before the start frame is
    /// a repeatable no-op.
    pub fn step(&mut self, clock: FrameClock, surface: &mut dyn RenderSurface) -> StepResult {
        match self {
            Animation::Line(a) => a.step(clock, surface),
            Animation::DottedLine(a) => a.step(clock, surface),
            Animation::MapView(a) => a.step(clock, surface),
            Animation::Rotation(a) => a.step(clock, surface),
            Animation::Pop(a) => a.step(clock, surface),
            Animation::Blink(a) => a.step(clock, surface),
            Animation::LinearAdjust(a) => a.step(clock, surface),
            Animation::InflateDeflate(a) => a.step(clock, surface),
            Animation::SetSourceCoords(a) => a.step(clock, surface),
        }
    }

    /// Absolute frame on which this animation will retire, `None` for an
    /// unbounded one.
    pub fn end_frame(&self) -> Option<i64> {
        match self {
            Animation::Line(a) => Some(a.end_frame()),
            Animation::DottedLine(a) => Some(a.end_frame()),
            Animation::MapView(a) => Some(a.end_frame()),
            Animation::Rotation(a) => Some(a.end_frame()),
            Animation::Pop(a) => Some(a.end_frame()),
            Animation::Blink(a) => Some(a.end_frame()),
            Animation::LinearAdjust(a) => Some(a.end_frame()),
            Animation::InflateDeflate(a) => a.end_frame(),
            Animation::SetSourceCoords(a) => Some(a.end_frame()),
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(impl From<$ty> for Animation {
            fn from(a: $ty) -> Self {
                Animation::$variant(a)
            }
        })+
    };
}

impl_from_variant!(
    Line(LineAnimation),
    DottedLine(DottedLineAnimation),
    MapView(MapViewAdjustment),
    Rotation(Rotation),
    Pop(Pop),
    Blink(Blink),
    LinearAdjust(LinearPaintAdjust),
    InflateDeflate(InflateDeflate),
    SetSourceCoords(SetSourceCoords),
);
