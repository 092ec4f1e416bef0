//! Animation scheduler
//!
//! Owns the live set and the global frame clock. One call to [`tick`]
//! steps every live animation at the current clock value, retires the
//! ones that reported done, and advances the clock. Animations must not
//! rely on the order they are stepped in within a tick.
//!
//! [`tick`]: Scheduler::tick

use mapreel_core::{FrameClock, RenderSurface};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::animations::Animation;

new_key_type! {
    /// Handle to a scheduled animation, invalidated on retirement.
    pub struct AnimationId;
}

#[derive(Default)]
pub struct Scheduler {
    live: SlotMap<AnimationId, Animation>,
    clock: FrameClock,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, animation: impl Into<Animation>) -> AnimationId {
        self.live.insert(animation.into())
    }

    pub fn schedule_all<I>(&mut self, animations: I)
    where
        I: IntoIterator,
        I::Item: Into<Animation>,
    {
        for animation in animations {
            self.schedule(animation);
        }
    }

    pub fn clock(&self) -> FrameClock {
        self.clock
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Highest absolute frame any live animation will retire on, `None`
    /// while an unbounded animation is live (it has no end frame) or the
    /// set is empty.
    pub fn end_frame_hint(&self) -> Option<i64> {
        self.live
            .values()
            .map(Animation::end_frame)
            .try_fold(i64::MIN, |max, end| end.map(|e| max.max(e)))
            .filter(|_| !self.live.is_empty())
    }

    /// Step every live animation once at the current clock, retire the
    /// finished ones, advance the clock. Returns whether any remain.
    pub fn tick(&mut self, surface: &mut dyn RenderSurface) -> bool {
        trace!(frame = self.clock.frame(), live = self.live.len(), "tick");

        let mut finished: SmallVec<[AnimationId; 4]> = SmallVec::new();
        for (id, animation) in self.live.iter_mut() {
            if animation.step(self.clock, surface).is_done() {
                finished.push(id);
            }
        }

        for id in finished {
            self.live.remove(id);
            debug!(frame = self.clock.frame(), "animation retired");
        }

        self.clock.advance();
        !self.live.is_empty()
    }
}
