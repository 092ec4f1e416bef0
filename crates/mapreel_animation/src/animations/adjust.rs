//! Paint-property tweens and one-shot source writes
//!
//! Three small variants: a plain linear tween of any numeric paint
//! property (fades, mostly), a periodic width pulse, and a fire-and-forget
//! coordinate replacement.

use mapreel_core::{FrameClock, FrameRate, LngLat, RenderSurface};
use tracing::warn;

use super::{StepResult, Timing};
use crate::easing;

/// Options for [`LinearPaintAdjust`].
#[derive(Clone, Debug)]
pub struct LinearPaintAdjustOpts {
    pub start_at_sec: f64,
    pub layer_id: String,
    pub property: String,
    pub target: f64,
    pub seconds: f64,
}

impl LinearPaintAdjustOpts {
    pub fn new(
        start_at_sec: f64,
        layer_id: impl Into<String>,
        property: impl Into<String>,
        target: f64,
    ) -> Self {
        Self {
            start_at_sec,
            layer_id: layer_id.into(),
            property: property.into(),
            target,
            seconds: 1.0,
        }
    }

    pub fn seconds(mut self, seconds: f64) -> Self {
        self.seconds = seconds;
        self
    }
}

/// Linear tween of one numeric paint property from its ambient value
/// (read on the first active tick) to a target. No easing curve.
pub struct LinearPaintAdjust {
    timing: Timing,
    layer_id: String,
    property: String,
    target: f64,
    ambient: Option<f64>,
}

impl LinearPaintAdjust {
    pub fn new(opts: LinearPaintAdjustOpts, rate: FrameRate) -> Self {
        Self {
            timing: Timing::new(rate, opts.start_at_sec, opts.seconds),
            layer_id: opts.layer_id,
            property: opts.property,
            target: opts.target,
            ambient: None,
        }
    }

    pub fn end_frame(&self) -> i64 {
        self.timing.end_frame()
    }

    pub fn step(&mut self, clock: FrameClock, surface: &mut dyn RenderSurface) -> StepResult {
        let idx = self.timing.local_index(clock);
        if idx < 0 {
            return StepResult::Continue;
        }

        let ambient = *self.ambient.get_or_insert_with(|| {
            surface
                .paint_property(&self.layer_id, &self.property)
                .unwrap_or(0.0)
        });

        let n = self.timing.total_frames;
        if idx >= n as i64 {
            return StepResult::Done;
        }

        let x = (idx + 1) as u64;
        let value = if x == n {
            self.target
        } else {
            ambient + (self.target - ambient) * easing::linear_fraction(x, n)
        };
        surface.set_paint_property(&self.layer_id, &self.property, value);

        StepResult::Continue
    }
}

/// Options for [`InflateDeflate`].
#[derive(Clone, Debug)]
pub struct InflateDeflateOpts {
    pub start_at_sec: f64,
    pub layer_id: String,
    pub property: String,
    pub seconds_per_period: f64,
    /// `None` runs forever; the scheduler will never retire it and the
    /// caller owns stopping the run.
    pub total_seconds: Option<f64>,
}

impl InflateDeflateOpts {
    pub fn new(start_at_sec: f64, layer_id: impl Into<String>) -> Self {
        Self {
            start_at_sec,
            layer_id: layer_id.into(),
            property: "line-width".to_owned(),
            seconds_per_period: 3.0,
            total_seconds: None,
        }
    }

    pub fn property(mut self, property: impl Into<String>) -> Self {
        self.property = property.into();
        self
    }

    pub fn period(mut self, seconds: f64) -> Self {
        self.seconds_per_period = seconds;
        self
    }

    pub fn total_seconds(mut self, seconds: f64) -> Self {
        self.total_seconds = Some(seconds);
        self
    }
}

/// Periodic multiplicative width pulse. Each tick scales the property's
/// *current* value, not a captured baseline, so it stacks with whatever
/// else is writing the property.
pub struct InflateDeflate {
    start_frame: i64,
    period_frames: u64,
    total_frames: Option<u64>,
    layer_id: String,
    property: String,
    warned_unbounded: bool,
}

impl InflateDeflate {
    pub fn new(opts: InflateDeflateOpts, rate: FrameRate) -> Self {
        Self {
            start_frame: rate.frame_at(opts.start_at_sec),
            period_frames: rate.frames_ceil(opts.seconds_per_period),
            total_frames: opts.total_seconds.map(|s| rate.frames_ceil(s)),
            layer_id: opts.layer_id,
            property: opts.property,
            warned_unbounded: false,
        }
    }

    /// `None` while unbounded; the scheduler can never retire this one.
    pub fn end_frame(&self) -> Option<i64> {
        self.total_frames
            .map(|total| self.start_frame + total as i64)
    }

    pub fn step(&mut self, clock: FrameClock, surface: &mut dyn RenderSurface) -> StepResult {
        let idx = clock.local_index(self.start_frame);
        if idx < 0 {
            return StepResult::Continue;
        }

        match self.total_frames {
            Some(total) if idx >= total as i64 => return StepResult::Done,
            None if !self.warned_unbounded => {
                self.warned_unbounded = true;
                warn!(
                    layer = %self.layer_id,
                    "unbounded inflate/deflate will never retire; stop the driver explicitly"
                );
            }
            _ => {}
        }

        let current = surface
            .paint_property(&self.layer_id, &self.property)
            .unwrap_or(1.0);
        let x = (idx + 1) as u64;
        surface.set_paint_property(
            &self.layer_id,
            &self.property,
            current * easing::pulse_factor(x, self.period_frames),
        );

        StepResult::Continue
    }
}

/// One-tick coordinate replacement; terminates the tick it runs.
pub struct SetSourceCoords {
    start_frame: i64,
    source_id: String,
    points: Vec<LngLat>,
}

impl SetSourceCoords {
    pub fn new(start_at_sec: f64, source_id: impl Into<String>, points: Vec<LngLat>, rate: FrameRate) -> Self {
        Self {
            start_frame: rate.frame_at(start_at_sec),
            source_id: source_id.into(),
            points,
        }
    }

    pub fn end_frame(&self) -> i64 {
        self.start_frame + 1
    }

    pub fn step(&mut self, clock: FrameClock, surface: &mut dyn RenderSurface) -> StepResult {
        if clock.local_index(self.start_frame) < 0 {
            return StepResult::Continue;
        }

        surface.replace_path_points(&self.source_id, &self.points);
        StepResult::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapreel_core::MemorySurface;

    #[test]
    fn linear_adjust_interpolates_and_lands_exactly() {
        let rate = FrameRate::new(1);
        let mut anim = LinearPaintAdjust::new(
            LinearPaintAdjustOpts::new(0.0, "route", "line-opacity", 1.0).seconds(4.0),
            rate,
        );

        let mut surface = MemorySurface::new();
        surface.set_paint_property("route", "line-opacity", 0.0);

        let mut clock = FrameClock::new();
        let mut seen = Vec::new();
        while !anim.step(clock, &mut surface).is_done() {
            seen.push(surface.paint_property("route", "line-opacity").unwrap());
            clock.advance();
        }

        assert_eq!(seen, vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn linear_adjust_captures_ambient_at_activation() {
        let rate = FrameRate::new(1);
        let mut anim = LinearPaintAdjust::new(
            LinearPaintAdjustOpts::new(2.0, "route", "line-opacity", 0.0).seconds(2.0),
            rate,
        );

        let mut surface = MemorySurface::new();
        surface.set_paint_property("route", "line-opacity", 0.1);

        let mut clock = FrameClock::new();
        anim.step(clock, &mut surface);
        clock.advance();
        anim.step(clock, &mut surface);
        clock.advance();

        // opacity changed while the fade was waiting to start
        surface.set_paint_property("route", "line-opacity", 0.8);
        anim.step(clock, &mut surface);

        let mid = surface.paint_property("route", "line-opacity").unwrap();
        assert!((mid - 0.4).abs() < 1e-12, "fade should leave from 0.8, got {mid}");
    }

    #[test]
    fn inflate_deflate_pulses_and_retires_when_bounded() {
        let rate = FrameRate::new(10);
        let mut anim = InflateDeflate::new(
            InflateDeflateOpts::new(0.0, "route").period(1.0).total_seconds(2.0),
            rate,
        );

        let mut surface = MemorySurface::new();
        surface.set_paint_property("route", "line-width", 3.0);

        let mut clock = FrameClock::new();
        let mut ticks = 0;
        while !anim.step(clock, &mut surface).is_done() {
            let width = surface.paint_property("route", "line-width").unwrap();
            assert!(width >= 3.0 - 1e-9, "width shrank below base: {width}");
            clock.advance();
            ticks += 1;
            assert!(ticks < 100, "bounded pulse never retired");
        }
        assert_eq!(ticks, 20);
    }

    #[test]
    fn unbounded_inflate_deflate_reports_no_end_frame() {
        let rate = FrameRate::new(10);
        let anim = InflateDeflate::new(InflateDeflateOpts::new(0.0, "route"), rate);
        assert_eq!(anim.end_frame(), None);

        let bounded =
            InflateDeflate::new(InflateDeflateOpts::new(0.0, "route").total_seconds(1.0), rate);
        assert_eq!(bounded.end_frame(), Some(10));
    }

    #[test]
    fn set_source_coords_fires_once() {
        let rate = FrameRate::new(60);
        let points = vec![LngLat::new(5.0, 6.0)];
        let mut anim = SetSourceCoords::new(0.0, "marker", points.clone(), rate);

        let mut surface = MemorySurface::new();
        assert!(anim.step(FrameClock::new(), &mut surface).is_done());
        assert_eq!(surface.path("marker"), points.as_slice());
    }

    #[test]
    fn set_source_coords_waits_for_start() {
        let rate = FrameRate::new(60);
        let mut anim = SetSourceCoords::new(1.0, "marker", vec![LngLat::new(1.0, 1.0)], rate);

        let mut surface = MemorySurface::new();
        assert_eq!(anim.step(FrameClock::new(), &mut surface), StepResult::Continue);
        assert_eq!(surface.path_point_count("marker"), 0);
    }
}
