//! Progressive line reveal
//!
//! Marches a cumulative arc length along the path each tick using
//! raised-sine increments, appending every crossed vertex plus the
//! landing point to the surface's path source. The increments sum to 1
//! over the marching ticks, so the reveal completes on schedule; the
//! final marching tick runs the cursor to the end of the path outright so
//! the last coordinate is emitted exactly, never approximately.

use mapreel_core::{AnimationError, FrameClock, FrameRate, LngLat, RenderSurface};

use super::{StepResult, Timing};
use crate::easing;
use crate::path::{March, PathCursor};

/// Options for [`LineAnimation`].
#[derive(Clone, Debug)]
pub struct LineOpts {
    pub start_at_sec: f64,
    pub source_id: String,
    pub coords: Vec<LngLat>,
    pub seconds: f64,
    pub head_source_id: Option<String>,
    pub trailing_window: Option<usize>,
}

impl LineOpts {
    pub fn new(start_at_sec: f64, source_id: impl Into<String>, coords: Vec<LngLat>) -> Self {
        Self {
            start_at_sec,
            source_id: source_id.into(),
            coords,
            seconds: 5.0,
            head_source_id: None,
            trailing_window: None,
        }
    }

    pub fn seconds(mut self, seconds: f64) -> Self {
        self.seconds = seconds;
        self
    }

    /// A second point source updated to the newest revealed coordinate.
    pub fn head_marker(mut self, source_id: impl Into<String>) -> Self {
        self.head_source_id = Some(source_id.into());
        self
    }

    /// Keep at most this many points: after full reveal the animation
    /// keeps running, dropping from the front until the path is empty.
    pub fn trailing_window(mut self, max_points: usize) -> Self {
        self.trailing_window = Some(max_points);
        self
    }
}

pub struct LineAnimation {
    timing: Timing,
    source_id: String,
    head_source_id: Option<String>,
    trailing_window: Option<usize>,
    cursor: PathCursor,
    /// Zero-duration: replace the whole path on the first active tick.
    snap: bool,
    armed: bool,
}

impl LineAnimation {
    pub fn new(opts: LineOpts, rate: FrameRate) -> Result<Self, AnimationError> {
        let cursor = PathCursor::new(&opts.coords)?;
        let timing = Timing::new(rate, opts.start_at_sec, opts.seconds);
        let snap = opts.seconds == 0.0 || timing.total_frames == 1;

        Ok(Self {
            timing,
            source_id: opts.source_id,
            head_source_id: opts.head_source_id,
            trailing_window: opts.trailing_window,
            cursor,
            snap,
            armed: false,
        })
    }

    pub fn end_frame(&self) -> i64 {
        self.timing.end_frame() + self.trailing_window.unwrap_or(0) as i64
    }

    pub fn step(&mut self, clock: FrameClock, surface: &mut dyn RenderSurface) -> StepResult {
        let idx = self.timing.local_index(clock);
        if idx < 0 {
            return StepResult::Continue;
        }

        if !self.armed {
            self.armed = true;
            if self.snap {
                surface.replace_path_points(&self.source_id, self.cursor.coords());
                if let Some(head) = &self.head_source_id {
                    surface.replace_path_points(head, &[self.cursor.final_point()]);
                }
                return StepResult::Done;
            }
            surface.append_path_point(&self.source_id, self.cursor.first_point());
            if let Some(head) = &self.head_source_id {
                surface.replace_path_points(head, &[self.cursor.first_point()]);
            }
        }

        let n = self.timing.total_frames;
        if self.cursor.is_exhausted() || idx >= n as i64 - 1 {
            return match self.trailing_window {
                None => StepResult::Done,
                Some(_) => {
                    if surface.truncate_path_front(&self.source_id) == 0 {
                        StepResult::Done
                    } else {
                        StepResult::Continue
                    }
                }
            };
        }

        let x = (idx + 1) as u64;
        let additional = if x == n - 1 {
            // final marching tick: consume whatever is left
            self.cursor.total_length()
        } else {
            easing::raised_sine_increment(x, n) * self.cursor.total_length()
        };

        let Self {
            cursor,
            source_id,
            head_source_id,
            trailing_window,
            ..
        } = self;

        let result = cursor.advance(additional, |vertex| {
            surface.append_path_point(source_id, vertex);
        });

        let head_point = match result {
            March::Moved(point) => {
                surface.append_path_point(source_id, point);
                point
            }
            March::Exhausted => {
                let end = cursor.final_point();
                surface.append_path_point(source_id, end);
                end
            }
        };

        if let Some(head) = head_source_id {
            surface.replace_path_points(head, &[head_point]);
        }

        if let Some(window) = trailing_window {
            while surface.path_point_count(source_id) > *window {
                surface.truncate_path_front(source_id);
            }
        }

        match result {
            March::Exhausted if self.trailing_window.is_none() => StepResult::Done,
            _ => StepResult::Continue,
        }
    }
}
