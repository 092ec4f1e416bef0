//! Distance-spaced dot emission
//!
//! Places `floor(path length / spacing)` dots along the path. An
//! ease-out fraction gates how many dots exist at each tick; every dot is
//! placed by marching the cursor forward exactly one spacing. Because the
//! dot count comes from floor truncation, the last dot may fall past the
//! true path end; the animation terminates on path exhaustion as well as
//! on dot-count completion.

use mapreel_core::{AnimationError, FrameClock, FrameRate, LngLat, RenderSurface};

use super::{StepResult, Timing};
use crate::easing;
use crate::path::{March, PathCursor};

/// Options for [`DottedLineAnimation`].
#[derive(Clone, Debug)]
pub struct DottedLineOpts {
    pub start_at_sec: f64,
    pub collection_id: String,
    pub coords: Vec<LngLat>,
    pub spacing: f64,
    pub seconds: f64,
}

impl DottedLineOpts {
    pub fn new(
        start_at_sec: f64,
        collection_id: impl Into<String>,
        coords: Vec<LngLat>,
        spacing: f64,
    ) -> Self {
        Self {
            start_at_sec,
            collection_id: collection_id.into(),
            coords,
            spacing,
            seconds: 5.0,
        }
    }

    pub fn seconds(mut self, seconds: f64) -> Self {
        self.seconds = seconds;
        self
    }
}

#[derive(Debug)]
pub struct DottedLineAnimation {
    timing: Timing,
    collection_id: String,
    cursor: PathCursor,
    spacing: f64,
    num_dots: u64,
    dots_drawn: u64,
}

impl DottedLineAnimation {
    pub fn new(opts: DottedLineOpts, rate: FrameRate) -> Result<Self, AnimationError> {
        if opts.spacing <= 0.0 {
            return Err(AnimationError::InvalidSpacing {
                spacing: opts.spacing,
            });
        }
        let cursor = PathCursor::new(&opts.coords)?;
        let num_dots = (cursor.total_length() / opts.spacing).floor() as u64;

        Ok(Self {
            timing: Timing::new(rate, opts.start_at_sec, opts.seconds),
            collection_id: opts.collection_id,
            cursor,
            spacing: opts.spacing,
            num_dots,
            dots_drawn: 0,
        })
    }

    pub fn end_frame(&self) -> i64 {
        self.timing.end_frame()
    }

    /// March one spacing and drop a dot there. Exhaustion places the
    /// final path vertex as the last dot.
    fn place_dot(&mut self, surface: &mut dyn RenderSurface) -> StepResult {
        match self.cursor.advance(self.spacing, |_| {}) {
            March::Moved(point) => {
                surface.append_feature_point(&self.collection_id, point);
                self.dots_drawn += 1;
                StepResult::Continue
            }
            March::Exhausted => {
                surface.append_feature_point(&self.collection_id, self.cursor.final_point());
                StepResult::Done
            }
        }
    }

    pub fn step(&mut self, clock: FrameClock, surface: &mut dyn RenderSurface) -> StepResult {
        let idx = self.timing.local_index(clock);
        if idx < 0 {
            return StepResult::Continue;
        }

        let n = self.timing.total_frames;
        if idx >= n as i64 {
            return StepResult::Done;
        }

        let x = (idx + 1) as u64;
        let target = if x == n {
            self.num_dots
        } else {
            (easing::ease_out_fraction(x, n) * self.num_dots as f64).floor() as u64
        };

        while self.dots_drawn < target {
            if self.place_dot(surface).is_done() {
                return StepResult::Done;
            }
        }

        StepResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapreel_core::MemorySurface;

    fn straight(len: f64) -> Vec<LngLat> {
        vec![LngLat::new(0.0, 0.0), LngLat::new(len, 0.0)]
    }

    fn run(mut anim: DottedLineAnimation, surface: &mut MemorySurface) {
        let mut clock = FrameClock::new();
        for _ in 0..10_000 {
            if anim.step(clock, surface).is_done() {
                return;
            }
            clock.advance();
        }
        panic!("dotted animation never finished");
    }

    #[test]
    fn dot_count_never_exceeds_bound() {
        let rate = FrameRate::new(1);
        let anim = DottedLineAnimation::new(
            DottedLineOpts::new(0.0, "dots", straight(10.0), 3.0).seconds(6.0),
            rate,
        )
        .unwrap();

        let mut surface = MemorySurface::new();
        run(anim, &mut surface);

        // floor(10/3) = 3 plus at most one terminal dot
        assert!(surface.feature_points("dots").len() <= 4);
        assert!(surface.feature_points("dots").len() >= 3);
    }

    #[test]
    fn dots_are_evenly_spaced_along_the_path() {
        let rate = FrameRate::new(1);
        let anim = DottedLineAnimation::new(
            DottedLineOpts::new(0.0, "dots", straight(10.0), 2.0).seconds(5.0),
            rate,
        )
        .unwrap();

        let mut surface = MemorySurface::new();
        run(anim, &mut surface);

        let dots = surface.feature_points("dots");
        for (i, pair) in dots.windows(2).enumerate() {
            let gap = pair[0].distance_to(pair[1]);
            assert!(gap <= 2.0 + 1e-9, "gap {gap} too wide after dot {i}");
        }
    }

    #[test]
    fn terminates_on_path_exhaustion_when_spacing_overruns() {
        // total length 4.5, spacing 1.0 -> 4 dots, 4th lands inside; the
        // count bound is hit before the cursor runs out
        let rate = FrameRate::new(1);
        let anim = DottedLineAnimation::new(
            DottedLineOpts::new(0.0, "dots", straight(4.5), 1.0).seconds(3.0),
            rate,
        )
        .unwrap();

        let mut surface = MemorySurface::new();
        run(anim, &mut surface);
        assert!(surface.feature_points("dots").len() <= 5);
    }

    #[test]
    fn rejects_non_positive_spacing() {
        let rate = FrameRate::new(60);
        let err = DottedLineAnimation::new(
            DottedLineOpts::new(0.0, "dots", straight(1.0), 0.0),
            rate,
        )
        .unwrap_err();
        assert!(matches!(err, AnimationError::InvalidSpacing { .. }));
    }

    #[test]
    fn zero_duration_places_every_dot_first_tick() {
        let rate = FrameRate::new(60);
        let mut anim = DottedLineAnimation::new(
            DottedLineOpts::new(0.0, "dots", straight(10.0), 2.0).seconds(0.0),
            rate,
        )
        .unwrap();

        let mut surface = MemorySurface::new();
        anim.step(FrameClock::new(), &mut surface);
        assert_eq!(surface.feature_points("dots").len(), 5);
    }
}
