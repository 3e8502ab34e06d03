//! Timeouts and intervals driven by host timestamps.
//!
//! The browser drains `next_due` with its animation-frame clock; tests feed it by
//! hand. Because the queue is the only place timers live, `active_count` is an
//! exact count of what teardown still has to cancel.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Timer {
    id: TimerId,
    due_ms: f64,
    period_ms: Option<f64>,
}

#[derive(Debug)]
pub struct TimerQueue {
    now_ms: f64,
    next_id: u64,
    timers: Vec<Timer>,
}

impl TimerQueue {
    pub fn new(now_ms: f64) -> Self {
        Self { now_ms, next_id: 0, timers: Vec::new() }
    }

    pub fn now(&self) -> f64 {
        self.now_ms
    }

    fn push(&mut self, due_ms: f64, period_ms: Option<f64>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer { id, due_ms, period_ms });
        id
    }

    pub fn set_timeout(&mut self, delay_ms: f64) -> TimerId {
        self.push(self.now_ms + delay_ms.max(0.0), None)
    }

    /// Recurring timer; periods below 1 ms are clamped to 1 ms.
    pub fn set_interval(&mut self, period_ms: f64) -> TimerId {
        let period = period_ms.max(1.0);
        self.push(self.now_ms + period, Some(period))
    }

    /// Returns whether the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Move the clock to `now_ms` and pop the earliest firing due by then.
    /// An interval that fell several periods behind comes out once per missed
    /// period, so a caller that cancels it between pops sees no further firings.
    /// Timestamps earlier than the current clock are ignored.
    pub fn next_due(&mut self, now_ms: f64) -> Option<TimerId> {
        if now_ms < self.now_ms {
            return None;
        }
        self.now_ms = now_ms;
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.id.cmp(&b.id)))
            .map(|(idx, _)| idx)?;
        let id = self.timers[idx].id;
        match self.timers[idx].period_ms {
            Some(period) => self.timers[idx].due_ms += period,
            None => {
                self.timers.swap_remove(idx);
            }
        }
        Some(id)
    }

    /// Every firing due by `now_ms`, in due order.
    pub fn advance_to(&mut self, now_ms: f64) -> Vec<TimerId> {
        std::iter::from_fn(|| self.next_due(now_ms)).collect()
    }
}
