//! The "No" button that will not be pressed.

use crate::geometry::{Point, Size};
use crate::motion::{Easing, Motion, Pose, Timing};
use crate::random::{RandomEffects, RandomSource};

/// Pointer interactions that make the button run away. All three behave the same.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Hover,
    Click,
    TouchStart,
}

impl Trigger {
    /// Touch must not scroll/zoom or turn into a synthetic click.
    pub fn suppresses_default(self) -> bool {
        matches!(self, Trigger::TouchStart)
    }
}

/// How the button is laid out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// Normal document flow next to "Yes" (before it ever moved).
    Flow,
    /// Fixed to the viewport at this top-left corner. Once fixed, always fixed.
    Fixed(Point),
}

#[derive(Debug)]
pub struct EvasiveChoiceControl {
    messages: &'static [&'static str],
    footprint: Size,
    evasions: u32,
    position: Option<Point>,
}

impl EvasiveChoiceControl {
    pub fn new(messages: &'static [&'static str], footprint: Size) -> Self {
        Self { messages, footprint, evasions: 0, position: None }
    }

    /// Jump to a random spot fully inside `viewport` and bump the counter.
    pub fn relocate(&mut self, viewport: Size, rng: &mut dyn RandomSource) -> Point {
        let to = rng.point_within(viewport, self.footprint);
        self.evasions = self.evasions.saturating_add(1);
        self.position = Some(to);
        to
    }

    pub fn evasions(&self) -> u32 {
        self.evasions
    }

    /// Label for the current counter; sticks on the last message once exhausted.
    pub fn message(&self) -> &'static str {
        match self.messages.len() {
            0 => "",
            len => self.messages[(self.evasions as usize).min(len - 1)],
        }
    }

    pub fn placement(&self) -> Placement {
        match self.position {
            Some(p) => Placement::Fixed(p),
            None => Placement::Flow,
        }
    }

    /// Spring from the previous spot (or in place on the first jump) to `to`.
    pub fn motion(&self, from: Option<Point>, to: Point) -> Motion {
        let from = from.unwrap_or(to);
        Motion::between(
            Pose::at(from.x, from.y),
            Pose::at(to.x, to.y),
            Timing::once(350.0, Easing::Spring { damping: 20.0, stiffness: 300.0 }),
        )
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }
}
