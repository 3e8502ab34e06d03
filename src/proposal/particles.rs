//! Decorative particle batches: sparkles, petals, rising hearts and confetti.
//!
//! A batch is drawn once (start x, delay, duration, size, spin) and frozen. Ambient
//! kinds loop forever with their own delay so they never move in step; confetti
//! plays once and is dropped by its owner.

use crate::geometry::Size;
use crate::motion::{Animator, Easing, Motion, Pose, Repeat, Target, Timing};
use crate::random::{RandomEffects, RandomSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    Sparkle,
    Petal,
    FloatingHeart,
    Confetti,
}

/// Per-kind random ranges, `(lo, hi)`.
struct Ranges {
    duration_ms: (f64, f64),
    delay_ms: (f64, f64),
    size: (f64, f64),
    spin_deg: (f64, f64),
}

impl ParticleKind {
    fn ranges(self) -> Ranges {
        match self {
            ParticleKind::Sparkle => Ranges {
                duration_ms: (10_000.0, 20_000.0),
                delay_ms: (0.0, 10_000.0),
                size: (0.6, 1.2),
                spin_deg: (0.0, 0.0),
            },
            ParticleKind::Petal => Ranges {
                duration_ms: (6_000.0, 12_000.0),
                delay_ms: (0.0, 8_000.0),
                size: (0.6, 1.3),
                spin_deg: (180.0, 540.0),
            },
            ParticleKind::FloatingHeart => Ranges {
                duration_ms: (2_000.0, 5_000.0),
                delay_ms: (0.0, 5_000.0),
                size: (0.5, 1.0),
                spin_deg: (360.0, 360.0),
            },
            ParticleKind::Confetti => Ranges {
                duration_ms: (1_800.0, 3_000.0),
                delay_ms: (0.0, 600.0),
                size: (0.6, 1.1),
                spin_deg: (360.0, 720.0),
            },
        }
    }

    pub fn target(self, id: u32) -> Target {
        match self {
            ParticleKind::Sparkle => Target::Sparkle(id),
            ParticleKind::Petal => Target::Petal(id),
            ParticleKind::FloatingHeart => Target::FloatingHeart(id),
            ParticleKind::Confetti => Target::Confetti(id),
        }
    }

    pub fn repeat(self) -> Repeat {
        match self {
            ParticleKind::Confetti => Repeat::Once,
            _ => Repeat::Forever,
        }
    }

    fn rises(self) -> bool {
        matches!(self, ParticleKind::FloatingHeart)
    }

    fn opacity_stops(self) -> &'static [f64] {
        match self {
            ParticleKind::Sparkle => &[0.0, 1.0, 0.0],
            ParticleKind::Confetti => &[1.0, 1.0, 1.0, 0.0],
            _ => &[0.0, 1.0, 1.0, 0.0],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: u32,
    /// Horizontal start, percent of viewport width.
    pub origin_x: f64,
    pub delay_ms: f64,
    pub duration_ms: f64,
    pub size: f64,
    /// Total rotation over one pass; sign picks the direction.
    pub spin_deg: f64,
}

#[derive(Debug)]
pub struct AmbientParticleField {
    kind: ParticleKind,
    particles: Vec<Particle>,
    running: bool,
}

impl AmbientParticleField {
    pub fn generate(kind: ParticleKind, count: u32, rng: &mut dyn RandomSource) -> Self {
        let r = kind.ranges();
        let particles = (0..count)
            .map(|id| {
                let origin_x = rng.percent();
                let delay_ms = rng.between(r.delay_ms.0, r.delay_ms.1);
                let duration_ms = rng.between(r.duration_ms.0, r.duration_ms.1);
                let size = rng.between(r.size.0, r.size.1);
                let mut spin_deg = rng.between(r.spin_deg.0, r.spin_deg.1);
                if kind != ParticleKind::FloatingHeart && rng.next_f64() < 0.5 {
                    spin_deg = -spin_deg;
                }
                Particle { id, origin_x, delay_ms, duration_ms, size, spin_deg }
            })
            .collect();
        Self { kind, particles, running: false }
    }

    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// One full pass for `p`: enter above (or below, for rising kinds) the viewport,
    /// cross it while spinning, fade in then out.
    pub fn motion_for(&self, p: &Particle, viewport: Size) -> Motion {
        let (from_y, to_y) = if self.kind.rises() {
            (viewport.height + 100.0, -100.0)
        } else {
            (-40.0, viewport.height + 40.0)
        };
        let stops = self.kind.opacity_stops();
        let last = (stops.len() - 1) as f64;
        let keyframes = stops
            .iter()
            .enumerate()
            .map(|(i, &opacity)| {
                let f = i as f64 / last;
                Pose::at(p.origin_x, from_y + (to_y - from_y) * f)
                    .with_opacity(opacity)
                    .with_scale(p.size)
                    .with_rotation(p.spin_deg * f)
            })
            .collect();
        let easing = match self.kind {
            ParticleKind::Confetti => Easing::EaseOut,
            _ => Easing::Linear,
        };
        let timing = Timing {
            duration_ms: p.duration_ms,
            delay_ms: p.delay_ms,
            easing,
            repeat: self.kind.repeat(),
        };
        Motion::through(keyframes, timing)
    }

    pub fn start(&mut self, animator: &mut dyn Animator, viewport: Size) {
        for p in &self.particles {
            animator.animate(self.kind.target(p.id), self.motion_for(p, viewport));
        }
        self.running = true;
    }

    pub fn stop(&mut self, animator: &mut dyn Animator) {
        if !self.running {
            return;
        }
        for p in &self.particles {
            animator.stop(self.kind.target(p.id));
        }
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::RecordingAnimator;
    use crate::random::FastRandom;

    #[test]
    fn generated_values_stay_in_ranges() {
        let mut rng = FastRandom::seeded(3);
        let field = AmbientParticleField::generate(ParticleKind::Sparkle, 15, &mut rng);
        assert_eq!(field.len(), 15);
        for p in field.particles() {
            assert!((0.0..100.0).contains(&p.origin_x));
            assert!((0.0..10_000.0).contains(&p.delay_ms));
            assert!((10_000.0..20_000.0).contains(&p.duration_ms));
        }
        let ids: Vec<u32> = field.particles().iter().map(|p| p.id).collect();
        assert_eq!(ids, (0..15).collect::<Vec<_>>());
    }

    #[test]
    fn ambient_loops_confetti_does_not() {
        let mut rng = FastRandom::seeded(9);
        let vp = Size::new(800.0, 600.0);
        let petals = AmbientParticleField::generate(ParticleKind::Petal, 1, &mut rng);
        let confetti = AmbientParticleField::generate(ParticleKind::Confetti, 1, &mut rng);
        assert_eq!(petals.motion_for(&petals.particles()[0], vp).timing.repeat, Repeat::Forever);
        assert_eq!(confetti.motion_for(&confetti.particles()[0], vp).timing.repeat, Repeat::Once);
    }

    #[test]
    fn hearts_rise_and_petals_fall() {
        let mut rng = FastRandom::seeded(11);
        let vp = Size::new(800.0, 600.0);
        let hearts = AmbientParticleField::generate(ParticleKind::FloatingHeart, 1, &mut rng);
        let m = hearts.motion_for(&hearts.particles()[0], vp);
        assert!(m.first().y > vp.height && m.last().y < 0.0);
        assert_eq!(m.first().opacity, 0.0);
        assert_eq!(m.last().opacity, 0.0);

        let petals = AmbientParticleField::generate(ParticleKind::Petal, 1, &mut rng);
        let m = petals.motion_for(&petals.particles()[0], vp);
        assert!(m.first().y < 0.0 && m.last().y > vp.height);
    }

    #[test]
    fn start_and_stop_bind_every_particle() {
        let mut rng = FastRandom::seeded(5);
        let mut anim = RecordingAnimator::new();
        let mut field = AmbientParticleField::generate(ParticleKind::Petal, 20, &mut rng);
        field.start(&mut anim, Size::new(1024.0, 768.0));
        assert!(field.is_running());
        assert_eq!(anim.count_where(|t| matches!(t, Target::Petal(_))), 20);
        field.stop(&mut anim);
        assert_eq!(anim.active(), 0);
        assert!(!field.is_running());
    }
}
