//! Multi-ring pulse
//!
//! A composite: several phase-delayed rings share one point source. Each
//! ring is a transient stroked-circle layer whose radius grows linearly
//! to a maximum while its stroke width shrinks from `√radius` to 0. The
//! layers are created up front at construction and all removed together
//! on the tick the composite completes. Their lifetime is owned here,
//! not by the surface.

use mapreel_core::{AnimationError, FrameClock, FrameRate, RenderSurface};
use smallvec::SmallVec;
use tracing::debug;

use super::StepResult;

const CIRCLE_RADIUS: &str = "circle-radius";
const CIRCLE_STROKE_WIDTH: &str = "circle-stroke-width";

/// Options for [`Blink`].
#[derive(Clone, Debug)]
pub struct BlinkOpts {
    pub start_at_sec: f64,
    pub source_id: String,
    pub seconds_per_ring: f64,
    pub rings: u32,
    pub radius: f64,
    /// Offset between consecutive rings.
    pub ring_delay_sec: f64,
    /// Existing layer to slot the rings beneath.
    pub before_layer: Option<String>,
}

impl BlinkOpts {
    pub fn new(start_at_sec: f64, source_id: impl Into<String>) -> Self {
        Self {
            start_at_sec,
            source_id: source_id.into(),
            seconds_per_ring: 1.0,
            rings: 1,
            radius: 50.0,
            ring_delay_sec: 0.2,
            before_layer: None,
        }
    }

    pub fn rings(mut self, rings: u32) -> Self {
        self.rings = rings;
        self
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn seconds_per_ring(mut self, seconds: f64) -> Self {
        self.seconds_per_ring = seconds;
        self
    }

    pub fn ring_delay(mut self, seconds: f64) -> Self {
        self.ring_delay_sec = seconds;
        self
    }

    pub fn before_layer(mut self, layer: impl Into<String>) -> Self {
        self.before_layer = Some(layer.into());
        self
    }
}

#[derive(Debug)]
struct Ring {
    layer_id: String,
    delay: u64,
}

#[derive(Debug)]
pub struct Blink {
    start_frame: i64,
    ticks_per_ring: u64,
    ring_delay: u64,
    radius: f64,
    max_stroke: f64,
    rings: SmallVec<[Ring; 4]>,
}

impl Blink {
    /// Builds the composite and creates one transient circle layer per
    /// ring on the surface immediately.
    pub fn new(
        opts: BlinkOpts,
        rate: FrameRate,
        surface: &mut dyn RenderSurface,
    ) -> Result<Self, AnimationError> {
        if opts.rings == 0 {
            return Err(AnimationError::InvalidRingCount);
        }

        let ring_delay = rate.frames_round(opts.ring_delay_sec);
        let ticks_per_ring = rate.frames_ceil(opts.seconds_per_ring);

        let rings = (0..opts.rings)
            .map(|i| {
                let layer_id =
                    surface.add_circle_layer(&opts.source_id, opts.before_layer.as_deref());
                surface.set_paint_property(&layer_id, CIRCLE_RADIUS, 0.0);
                surface.set_paint_property(&layer_id, CIRCLE_STROKE_WIDTH, 0.0);
                Ring {
                    layer_id,
                    delay: u64::from(i) * ring_delay,
                }
            })
            .collect();

        Ok(Self {
            start_frame: rate.frame_at(opts.start_at_sec),
            ticks_per_ring,
            ring_delay,
            radius: opts.radius,
            max_stroke: opts.radius.sqrt(),
            rings,
        })
    }

    pub fn end_frame(&self) -> i64 {
        let last_ring_delay = (self.rings.len() as u64 - 1) * self.ring_delay;
        self.start_frame + (last_ring_delay + self.ticks_per_ring) as i64 + 1
    }

    pub fn step(&mut self, clock: FrameClock, surface: &mut dyn RenderSurface) -> StepResult {
        let idx = clock.local_index(self.start_frame);
        if idx < 0 {
            return StepResult::Continue;
        }

        if clock.frame() as i64 > self.end_frame() {
            // release every ring layer together
            for ring in &self.rings {
                surface.remove_layer(&ring.layer_id);
            }
            debug!(rings = self.rings.len(), "blink rings removed");
            return StepResult::Done;
        }

        for ring in &self.rings {
            let local = idx - ring.delay as i64;
            if local < 0 || local >= self.ticks_per_ring as i64 {
                continue;
            }
            let x = (local + 1) as f64;
            let per_tick = x / self.ticks_per_ring as f64;
            surface.set_paint_property(&ring.layer_id, CIRCLE_RADIUS, self.radius * per_tick);
            surface.set_paint_property(
                &ring.layer_id,
                CIRCLE_STROKE_WIDTH,
                self.max_stroke - self.max_stroke * per_tick,
            );
        }

        StepResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapreel_core::MemorySurface;

    #[test]
    fn creates_layers_up_front_and_removes_them_on_completion() {
        let rate = FrameRate::new(10);
        let mut surface = MemorySurface::new();
        let mut blink = Blink::new(
            BlinkOpts::new(0.0, "pt").rings(3).seconds_per_ring(1.0),
            rate,
            &mut surface,
        )
        .unwrap();

        assert_eq!(surface.live_layers().len(), 3);

        let mut clock = FrameClock::new();
        for _ in 0..1_000 {
            if blink.step(clock, &mut surface).is_done() {
                break;
            }
            clock.advance();
        }

        assert!(surface.live_layers().is_empty(), "rings leaked");
    }

    #[test]
    fn later_rings_wait_their_delay() {
        let rate = FrameRate::new(10);
        let mut surface = MemorySurface::new();
        // delay 0.5s = 5 frames between rings
        let mut blink = Blink::new(
            BlinkOpts::new(0.0, "pt").rings(2).ring_delay(0.5),
            rate,
            &mut surface,
        )
        .unwrap();
        let second = surface.live_layers()[1].clone();

        let mut clock = FrameClock::new();
        for _ in 0..3 {
            blink.step(clock, &mut surface);
            clock.advance();
        }

        // second ring has not started: still at its initial radius
        assert_eq!(surface.paint_property(&second, CIRCLE_RADIUS), Some(0.0));

        for _ in 0..4 {
            blink.step(clock, &mut surface);
            clock.advance();
        }
        assert!(surface.paint_property(&second, CIRCLE_RADIUS).unwrap() > 0.0);
    }

    #[test]
    fn ring_grows_radius_and_shrinks_stroke() {
        let rate = FrameRate::new(10);
        let mut surface = MemorySurface::new();
        let mut blink = Blink::new(
            BlinkOpts::new(0.0, "pt").radius(49.0).seconds_per_ring(1.0),
            rate,
            &mut surface,
        )
        .unwrap();
        let layer = surface.live_layers()[0].clone();

        let mut clock = FrameClock::new();
        let mut last_radius = -1.0;
        let mut last_stroke = 8.0; // sqrt(49) = 7 is the ceiling
        for _ in 0..10 {
            blink.step(clock, &mut surface);
            let radius = surface.paint_property(&layer, CIRCLE_RADIUS).unwrap();
            let stroke = surface.paint_property(&layer, CIRCLE_STROKE_WIDTH).unwrap();
            assert!(radius > last_radius);
            assert!(stroke < last_stroke);
            last_radius = radius;
            last_stroke = stroke;
            clock.advance();
        }

        assert_eq!(last_radius, 49.0);
        assert_eq!(last_stroke, 0.0);
    }

    #[test]
    fn rejects_zero_rings() {
        let rate = FrameRate::new(10);
        let mut surface = MemorySurface::new();
        let err = Blink::new(BlinkOpts::new(0.0, "pt").rings(0), rate, &mut surface).unwrap_err();
        assert_eq!(err, AnimationError::InvalidRingCount);
        assert!(surface.live_layers().is_empty());
    }
}
