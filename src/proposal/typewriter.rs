//! Reveals a text one character at a time.

use crate::timers::{TimerId, TimerQueue};

#[derive(Debug)]
pub struct Typewriter {
    text: String,
    total: usize,
    shown: usize,
    char_ms: f64,
    timer: Option<TimerId>,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, char_ms: f64) -> Self {
        let text = text.into();
        let total = text.chars().count();
        Self { text, total, shown: 0, char_ms, timer: None }
    }

    pub fn start(&mut self, timers: &mut TimerQueue) {
        if self.is_complete() || self.timer.is_some() {
            return;
        }
        self.timer = Some(timers.set_interval(self.char_ms));
    }

    /// Skip the effect and show everything.
    pub fn finish(&mut self, timers: &mut TimerQueue) {
        self.shown = self.total;
        self.stop(timers);
    }

    pub fn owns(&self, id: TimerId) -> bool {
        self.timer == Some(id)
    }

    /// Reveal one more character; the timer goes away with the last one.
    pub fn step(&mut self, timers: &mut TimerQueue) {
        self.shown = (self.shown + 1).min(self.total);
        if self.is_complete() {
            self.stop(timers);
        }
    }

    pub fn stop(&mut self, timers: &mut TimerQueue) {
        if let Some(id) = self.timer.take() {
            timers.cancel(id);
        }
    }

    pub fn visible(&self) -> &str {
        match self.text.char_indices().nth(self.shown) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.shown >= self.total
    }
}
