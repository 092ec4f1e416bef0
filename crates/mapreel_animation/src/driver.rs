//! Headless driver loop
//!
//! Ticks a scheduler until its live set empties. The caller owns the real
//! tick cadence (wall-clock pacing, or one tick per exported frame when
//! capturing); this loop just runs the clock flat out. An optional frame
//! cap is the only way an unbounded animation stops; without one, a run
//! containing an unbounded pulse never returns.

use mapreel_core::RenderSurface;
use tracing::info;

use crate::scheduler::Scheduler;

/// Drive `scheduler` to completion (or to `max_frames`). Returns the
/// number of frames driven.
pub fn run_to_completion(
    scheduler: &mut Scheduler,
    surface: &mut dyn RenderSurface,
    max_frames: Option<u64>,
) -> u64 {
    match scheduler.end_frame_hint() {
        Some(end) => info!(end_frame = end, live = scheduler.live_count(), "driving animations"),
        None => info!(
            live = scheduler.live_count(),
            "driving animations with no end frame in sight"
        ),
    }

    let mut frames = 0u64;
    while scheduler.live_count() > 0 {
        if max_frames.is_some_and(|cap| frames >= cap) {
            break;
        }
        scheduler.tick(surface);
        frames += 1;
    }

    info!(frames, remaining = scheduler.live_count(), "run finished");
    frames
}
