//! Background slideshow: one image at a time, cross-faded on a fixed interval.

use crate::motion::{Animator, Easing, Motion, Pose, Target, Timing};
use crate::timers::{TimerId, TimerQueue};

#[derive(Debug)]
pub struct BackgroundRotator {
    images: Vec<String>,
    index: usize,
    period_ms: f64,
    fade_ms: f64,
    timer: Option<TimerId>,
}

impl BackgroundRotator {
    pub fn new(images: Vec<String>, period_ms: f64, fade_ms: f64) -> Self {
        Self { images, index: 0, period_ms, fade_ms, timer: None }
    }

    /// Show the first image and, when there is anything to rotate to, arm the interval.
    pub fn start(&mut self, timers: &mut TimerQueue, animator: &mut dyn Animator) {
        if self.images.is_empty() {
            return;
        }
        animator.animate(
            Target::Backdrop(self.index),
            Motion::between(
                Pose::default().with_opacity(0.0),
                Pose::default(),
                Timing::once(self.fade_ms, Easing::EaseInOut),
            ),
        );
        if self.images.len() > 1 && self.timer.is_none() {
            self.timer = Some(timers.set_interval(self.period_ms));
        }
    }

    pub fn owns(&self, id: TimerId) -> bool {
        self.timer == Some(id)
    }

    /// Step to the next image (wrapping) and cross-fade old -> new. Returns the new index.
    pub fn advance(&mut self, animator: &mut dyn Animator) -> usize {
        if self.images.is_empty() {
            return 0;
        }
        let previous = self.index;
        self.index = (self.index + 1) % self.images.len();
        if previous != self.index {
            let fade = Timing::once(self.fade_ms, Easing::EaseInOut);
            animator.animate(
                Target::Backdrop(previous),
                Motion::between(Pose::default(), Pose::default().with_opacity(0.0), fade),
            );
            animator.animate(
                Target::Backdrop(self.index),
                Motion::between(Pose::default().with_opacity(0.0), Pose::default(), fade),
            );
        }
        self.index
    }

    /// Cancel the interval and drop every slide's motion.
    pub fn stop(&mut self, timers: &mut TimerQueue, animator: &mut dyn Animator) {
        if let Some(id) = self.timer.take() {
            timers.cancel(id);
        }
        for i in 0..self.images.len() {
            animator.stop(Target::Backdrop(i));
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&str> {
        self.images.get(self.index).map(String::as_str)
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }
}
