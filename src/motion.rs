//! Declarative motion descriptors.
//!
//! Components never move pixels themselves. They hand an [`Animator`] a [`Motion`]
//! ("go through these poses over this timing") for a [`Target`], and the renderer
//! samples it every frame.

/// Everything the page can animate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    /// Ambient sparkle; `x` is a viewport percentage, `y` pixels.
    Sparkle(u32),
    /// Ambient falling petal; `x` is a viewport percentage, `y` pixels.
    Petal(u32),
    /// Rising heart shown once accepted; `x` is a viewport percentage, `y` pixels.
    FloatingHeart(u32),
    /// One-shot confetti piece; `x` is a viewport percentage, `y` pixels.
    Confetti(u32),
    /// Heart left behind by a pointer click; `x`/`y` pixels.
    ClickHeart(u64),
    /// Background slide at the given list index; only `opacity` is meaningful.
    Backdrop(usize),
    /// The evasive button; `x`/`y` pixels of its top-left corner.
    NoButton,
    /// Question / answer card; `y` is a pixel offset from its resting place.
    Card,
    /// Heart badge above the question; `y` is a pixel offset.
    Badge,
    Envelope,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotate_deg: f64,
    pub opacity: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, scale: 1.0, rotate_deg: 0.0, opacity: 1.0 }
    }
}

impl Pose {
    pub fn at(x: f64, y: f64) -> Self {
        Self { x, y, ..Self::default() }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, deg: f64) -> Self {
        self.rotate_deg = deg;
        self
    }

    fn lerp(&self, to: &Pose, f: f64) -> Pose {
        let mix = |a: f64, b: f64| a + (b - a) * f;
        Pose {
            x: mix(self.x, to.x),
            y: mix(self.y, to.y),
            scale: mix(self.scale, to.scale),
            rotate_deg: mix(self.rotate_deg, to.rotate_deg),
            opacity: mix(self.opacity, to.opacity).clamp(0.0, 1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    EaseOut,
    EaseInOut,
    /// Damped spring (unit mass); may overshoot before settling.
    Spring { damping: f64, stiffness: f64 },
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    pub fn apply(&self, t: f64, duration_ms: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::Spring { damping, stiffness } => {
                if t >= 1.0 {
                    return 1.0;
                }
                let w0 = stiffness.max(f64::EPSILON).sqrt();
                let zeta = damping / (2.0 * w0);
                let s = t * duration_ms / 1000.0;
                if zeta < 1.0 {
                    let wd = w0 * (1.0 - zeta * zeta).sqrt();
                    let decay = (-zeta * w0 * s).exp();
                    1.0 - decay * ((wd * s).cos() + (zeta * w0 / wd) * (wd * s).sin())
                } else {
                    1.0 - (-w0 * s).exp() * (1.0 + w0 * s)
                }
            }
        }
    }

    /// CSS timing function used when a DOM element animates via transitions.
    pub fn css(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseOut => "cubic-bezier(0.33, 1, 0.68, 1)",
            Easing::EaseInOut => "cubic-bezier(0.65, 0, 0.35, 1)",
            Easing::Spring { .. } => "cubic-bezier(0.34, 1.56, 0.64, 1)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Once,
    Forever,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    pub duration_ms: f64,
    pub delay_ms: f64,
    pub easing: Easing,
    pub repeat: Repeat,
}

impl Timing {
    pub fn once(duration_ms: f64, easing: Easing) -> Self {
        Self { duration_ms, delay_ms: 0.0, easing, repeat: Repeat::Once }
    }

    pub fn forever(duration_ms: f64, easing: Easing) -> Self {
        Self { duration_ms, delay_ms: 0.0, easing, repeat: Repeat::Forever }
    }

    pub fn delayed(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Motion {
    /// Evenly spaced poses; at least one.
    pub keyframes: Vec<Pose>,
    pub timing: Timing,
}

impl Motion {
    pub fn between(from: Pose, to: Pose, timing: Timing) -> Self {
        Self { keyframes: vec![from, to], timing }
    }

    /// Multi-stop motion. An empty list is treated as a single default pose.
    pub fn through(keyframes: Vec<Pose>, timing: Timing) -> Self {
        let keyframes = if keyframes.is_empty() { vec![Pose::default()] } else { keyframes };
        Self { keyframes, timing }
    }

    pub fn first(&self) -> Pose {
        self.keyframes.first().copied().unwrap_or_default()
    }

    pub fn last(&self) -> Pose {
        self.keyframes.last().copied().unwrap_or_default()
    }

    /// True once a one-shot motion has played to its end. Looping motions never finish.
    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        self.timing.repeat == Repeat::Once
            && elapsed_ms >= self.timing.delay_ms + self.timing.duration_ms
    }

    /// Pose after `elapsed_ms` since the motion was handed to the animator.
    /// Holds the first pose during the delay and the last pose after a one-shot ends.
    pub fn sample(&self, elapsed_ms: f64) -> Pose {
        let Timing { duration_ms, delay_ms, easing, repeat } = self.timing;
        if elapsed_ms < delay_ms {
            return self.first();
        }
        if duration_ms <= 0.0 {
            return self.last();
        }
        let local = elapsed_ms - delay_ms;
        let progress = match repeat {
            Repeat::Once if local >= duration_ms => return self.last(),
            Repeat::Once => local / duration_ms,
            Repeat::Forever => (local % duration_ms) / duration_ms,
        };
        let eased = easing.apply(progress, duration_ms);
        let segments = self.keyframes.len().saturating_sub(1);
        if segments == 0 {
            return self.first();
        }
        let pos = eased * segments as f64;
        let i = (pos.floor().max(0.0) as usize).min(segments - 1);
        self.keyframes[i].lerp(&self.keyframes[i + 1], pos - i as f64)
    }
}

/// Rendering capability the core drives. Implemented by the canvas stage in the
/// browser and by [`RecordingAnimator`] in tests.
pub trait Animator {
    /// Start (or replace) the motion bound to `target`.
    fn animate(&mut self, target: Target, motion: Motion);
    fn stop(&mut self, target: Target);
    fn stop_all(&mut self);
    /// Number of targets with a running motion.
    fn active(&self) -> usize;
}

/// Keeps every request in memory; used to assert on what the core asked for.
#[derive(Debug, Default)]
pub struct RecordingAnimator {
    pub running: Vec<(Target, Motion)>,
    pub started: Vec<Target>,
    pub stopped: Vec<Target>,
}

impl RecordingAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn motion_for(&self, target: Target) -> Option<&Motion> {
        self.running.iter().find(|(t, _)| *t == target).map(|(_, m)| m)
    }

    pub fn count_where(&self, pred: impl Fn(&Target) -> bool) -> usize {
        self.running.iter().filter(|(t, _)| pred(t)).count()
    }
}

impl Animator for RecordingAnimator {
    fn animate(&mut self, target: Target, motion: Motion) {
        self.started.push(target);
        match self.running.iter_mut().find(|(t, _)| *t == target) {
            Some(slot) => slot.1 = motion,
            None => self.running.push((target, motion)),
        }
    }

    fn stop(&mut self, target: Target) {
        let before = self.running.len();
        self.running.retain(|(t, _)| *t != target);
        if self.running.len() != before {
            self.stopped.push(target);
        }
    }

    fn stop_all(&mut self) {
        self.stopped.extend(self.running.drain(..).map(|(t, _)| t));
    }

    fn active(&self) -> usize {
        self.running.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade(repeat: Repeat) -> Motion {
        Motion::through(
            vec![
                Pose::at(0.0, 0.0).with_opacity(0.0),
                Pose::at(0.0, 50.0).with_opacity(1.0),
                Pose::at(0.0, 100.0).with_opacity(0.0),
            ],
            Timing { duration_ms: 1000.0, delay_ms: 200.0, easing: Easing::Linear, repeat },
        )
    }

    #[test]
    fn sample_holds_first_pose_during_delay() {
        let m = fade(Repeat::Once);
        assert_eq!(m.sample(0.0), m.first());
        assert_eq!(m.sample(199.0), m.first());
    }

    #[test]
    fn sample_interpolates_keyframes() {
        let m = fade(Repeat::Once);
        let mid = m.sample(700.0);
        assert!((mid.y - 50.0).abs() < 1e-9);
        assert!((mid.opacity - 1.0).abs() < 1e-9);
        let quarter = m.sample(450.0);
        assert!((quarter.y - 25.0).abs() < 1e-9);
        assert!((quarter.opacity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn once_finishes_and_holds_last_pose() {
        let m = fade(Repeat::Once);
        assert!(!m.is_finished(1199.0));
        assert!(m.is_finished(1200.0));
        assert_eq!(m.sample(5000.0), m.last());
    }

    #[test]
    fn forever_loops_with_duration_period() {
        let m = fade(Repeat::Forever);
        assert!(!m.is_finished(1_000_000.0));
        let a = m.sample(450.0);
        let b = m.sample(2450.0);
        assert!((a.y - b.y).abs() < 1e-6);
    }

    #[test]
    fn easing_endpoints() {
        for e in [
            Easing::Linear,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::Spring { damping: 12.0, stiffness: 100.0 },
        ] {
            assert!(e.apply(0.0, 800.0).abs() < 1e-9, "{e:?} at 0");
            assert!((e.apply(1.0, 800.0) - 1.0).abs() < 1e-9, "{e:?} at 1");
        }
    }

    #[test]
    fn recording_animator_replaces_motion_per_target() {
        let mut anim = RecordingAnimator::new();
        anim.animate(Target::NoButton, fade(Repeat::Once));
        anim.animate(Target::NoButton, fade(Repeat::Forever));
        assert_eq!(anim.active(), 1);
        assert_eq!(anim.started.len(), 2);
        anim.stop(Target::Card);
        assert!(anim.stopped.is_empty());
        anim.stop_all();
        assert_eq!(anim.active(), 0);
        assert_eq!(anim.stopped, vec![Target::NoButton]);
    }
}
