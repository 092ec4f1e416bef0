//! Camera tween
//!
//! Tweens any requested subset of center, zoom, and pitch toward target
//! values. The ambient camera is read on the first active tick, not at
//! construction, since an earlier animation may still be moving the camera
//! when this one is built. Per-tick raised-sine increments accumulate
//! toward the target; the final active tick writes the target values
//! verbatim so the tween lands exactly.

use mapreel_core::{CameraUpdate, FrameClock, FrameRate, LngLat, RenderSurface};

use super::{StepResult, Timing};
use crate::easing;

/// Options for [`MapViewAdjustment`]. Unrequested dimensions are left
/// untouched for the whole run.
#[derive(Clone, Copy, Debug, Default)]
pub struct MapViewOpts {
    pub start_at_sec: f64,
    pub center: Option<LngLat>,
    pub zoom: Option<f64>,
    pub pitch: Option<f64>,
    pub seconds: f64,
}

impl MapViewOpts {
    pub fn new(start_at_sec: f64) -> Self {
        Self {
            start_at_sec,
            seconds: 2.0,
            ..Self::default()
        }
    }

    pub fn pan_to(mut self, center: LngLat) -> Self {
        self.center = Some(center);
        self
    }

    pub fn zoom_to(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn pitch_to(mut self, pitch: f64) -> Self {
        self.pitch = Some(pitch);
        self
    }

    pub fn seconds(mut self, seconds: f64) -> Self {
        self.seconds = seconds;
        self
    }
}

/// One tweened camera dimension.
#[derive(Clone, Copy, Debug)]
struct Dimension {
    current: f64,
    delta: f64,
}

impl Dimension {
    fn capture(ambient: f64, target: f64) -> Self {
        Self {
            current: ambient,
            delta: target - ambient,
        }
    }

    fn accumulate(&mut self, fraction: f64) -> f64 {
        self.current += fraction * self.delta;
        self.current
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct CapturedState {
    lng: Option<Dimension>,
    lat: Option<Dimension>,
    zoom: Option<Dimension>,
    pitch: Option<Dimension>,
}

pub struct MapViewAdjustment {
    timing: Timing,
    opts: MapViewOpts,
    snap: bool,
    captured: Option<CapturedState>,
}

impl MapViewAdjustment {
    pub fn new(opts: MapViewOpts, rate: FrameRate) -> Self {
        let timing = Timing::new(rate, opts.start_at_sec, opts.seconds);
        Self {
            timing,
            snap: opts.seconds == 0.0,
            opts,
            captured: None,
        }
    }

    pub fn end_frame(&self) -> i64 {
        self.timing.end_frame()
    }

    fn target_update(&self) -> CameraUpdate {
        CameraUpdate {
            center: self.opts.center,
            zoom: self.opts.zoom,
            pitch: self.opts.pitch,
        }
    }

    pub fn step(&mut self, clock: FrameClock, surface: &mut dyn RenderSurface) -> StepResult {
        let idx = self.timing.local_index(clock);
        if idx < 0 {
            return StepResult::Continue;
        }

        if self.snap {
            surface.apply_camera(&self.target_update());
            return StepResult::Done;
        }

        let captured = *self.captured.get_or_insert_with(|| {
            let ambient = surface.camera();
            CapturedState {
                lng: self
                    .opts
                    .center
                    .map(|c| Dimension::capture(ambient.center.lng, c.lng)),
                lat: self
                    .opts
                    .center
                    .map(|c| Dimension::capture(ambient.center.lat, c.lat)),
                zoom: self.opts.zoom.map(|z| Dimension::capture(ambient.zoom, z)),
                pitch: self
                    .opts
                    .pitch
                    .map(|p| Dimension::capture(ambient.pitch, p)),
            }
        });
        let mut state = captured;

        let n = self.timing.total_frames;
        if idx >= n as i64 {
            return StepResult::Done;
        }

        let x = (idx + 1) as u64;
        if x == n {
            // land exactly on the requested values
            surface.apply_camera(&self.target_update());
            return StepResult::Continue;
        }

        let fraction = easing::raised_sine_increment(x, n);
        let update = CameraUpdate {
            center: state.lng.as_mut().zip(state.lat.as_mut()).map(|(lng, lat)| {
                LngLat::new(lng.accumulate(fraction), lat.accumulate(fraction))
            }),
            zoom: state.zoom.as_mut().map(|z| z.accumulate(fraction)),
            pitch: state.pitch.as_mut().map(|p| p.accumulate(fraction)),
        };
        surface.apply_camera(&update);
        self.captured = Some(state);

        StepResult::Continue
    }
}
