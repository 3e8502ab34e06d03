//! Little hearts that pop where the pointer clicks and vanish after a fixed lifetime.

use crate::geometry::Point;
use crate::motion::{Animator, Easing, Motion, Pose, Target, Timing};
use crate::timers::{TimerId, TimerQueue};

#[derive(Clone, Debug, PartialEq)]
pub struct TransientArtifact {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub created_at: f64,
}

#[derive(Debug)]
pub struct ClickFeedbackLayer {
    lifetime_ms: f64,
    next_id: u64,
    // expiry timer per live artifact
    live: Vec<(TimerId, TransientArtifact)>,
}

impl ClickFeedbackLayer {
    pub fn new(lifetime_ms: f64) -> Self {
        Self { lifetime_ms, next_id: 0, live: Vec::new() }
    }

    /// Spawn a heart at `at`; it removes itself when its own timeout fires.
    pub fn spawn(&mut self, at: Point, timers: &mut TimerQueue, animator: &mut dyn Animator) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let timer = timers.set_timeout(self.lifetime_ms);
        animator.animate(
            Target::ClickHeart(id),
            Motion::between(
                Pose::at(at.x, at.y).with_scale(0.4),
                Pose::at(at.x, at.y - 40.0).with_scale(1.4).with_opacity(0.0),
                Timing::once(self.lifetime_ms, Easing::EaseOut),
            ),
        );
        self.live.push((timer, TransientArtifact { id, x: at.x, y: at.y, created_at: timers.now() }));
        id
    }

    /// Handle a fired timer. Returns false if the timer is not one of ours.
    pub fn expire(&mut self, timer: TimerId, animator: &mut dyn Animator) -> bool {
        let Some(idx) = self.live.iter().position(|(t, _)| *t == timer) else {
            return false;
        };
        let (_, artifact) = self.live.remove(idx);
        animator.stop(Target::ClickHeart(artifact.id));
        true
    }

    pub fn artifacts(&self) -> impl Iterator<Item = &TransientArtifact> {
        self.live.iter().map(|(_, a)| a)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn clear(&mut self, timers: &mut TimerQueue, animator: &mut dyn Animator) {
        for (timer, artifact) in self.live.drain(..) {
            timers.cancel(timer);
            animator.stop(Target::ClickHeart(artifact.id));
        }
    }
}
