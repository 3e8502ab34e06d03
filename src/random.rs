//! Random draws for every visual effect (positions, picks, timings).
//!
//! Components never reach for a global generator: they take a `&mut dyn RandomSource`
//! so tests can swap in [`SequenceRandom`] and get fully deterministic layouts.

use crate::geometry::{Point, Size};

/// Source of uniformly distributed floats in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// Effect-level helpers available on every [`RandomSource`].
pub trait RandomEffects: RandomSource {
    /// Uniform draw in `[lo, hi)`; collapses to `lo` for an empty or inverted range.
    fn between(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        lo + self.next_f64() * (hi - lo)
    }

    /// Horizontal start position as a percentage of the viewport width.
    fn percent(&mut self) -> f64 {
        self.between(0.0, 100.0)
    }

    fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let idx = (self.next_f64() * len as f64).floor() as usize;
        Some(idx.min(len - 1))
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.index(items.len()).map(|i| &items[i])
    }

    /// Top-left corner for an element of `footprint` size so it stays fully inside `viewport`.
    fn point_within(&mut self, viewport: Size, footprint: Size) -> Point {
        let room = viewport.room_for(footprint);
        Point::new(self.between(0.0, room.width), self.between(0.0, room.height))
    }
}

impl<R: RandomSource + ?Sized> RandomEffects for R {}

/// Production generator backed by `fastrand`.
pub struct FastRandom {
    rng: fastrand::Rng,
}

impl FastRandom {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: fastrand::Rng::with_seed(seed) }
    }

    /// Seed from the browser crypto source when available, else from the frame clock.
    pub fn from_entropy() -> Self {
        match entropy_seed() {
            Some(seed) => Self::seeded(seed),
            None => Self { rng: fastrand::Rng::new() },
        }
    }
}

impl RandomSource for FastRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.f64()
    }
}

#[cfg(feature = "rng")]
fn entropy_seed() -> Option<u64> {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => Some(u64::from_le_bytes(buf)),
        Err(err) => {
            log::warn!("getrandom unavailable ({err}), falling back to clock seed");
            clock_seed()
        }
    }
}

#[cfg(not(feature = "rng"))]
fn entropy_seed() -> Option<u64> {
    clock_seed()
}

#[cfg(target_arch = "wasm32")]
fn clock_seed() -> Option<u64> {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| (p.now() * 1000.0) as u64)
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> Option<u64> {
    None
}

/// Replays a fixed list of draws, cycling when exhausted. Values are clamped into `[0, 1)`.
#[derive(Clone, Debug)]
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self { values: values.into(), cursor: 0 }
    }

    /// Always yields the same value.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRandom {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn between_handles_inverted_range() {
        let mut rng = SequenceRandom::constant(0.7);
        assert_eq!(rng.between(5.0, 5.0), 5.0);
        assert_eq!(rng.between(5.0, 1.0), 5.0);
        assert!((rng.between(0.0, 10.0) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn index_stays_in_bounds_at_top_of_range() {
        let mut rng = SequenceRandom::constant(1.0);
        assert_eq!(rng.index(8), Some(7));
        assert_eq!(rng.index(0), None);
        let empty: [u8; 0] = [];
        assert!(rng.pick(&empty).is_none());
    }

    #[test]
    fn point_within_never_leaves_viewport() {
        let mut rng = FastRandom::seeded(42);
        let vp = Size::new(800.0, 600.0);
        let btn = Size::new(150.0, 60.0);
        for _ in 0..500 {
            let p = rng.point_within(vp, btn);
            assert!(p.x >= 0.0 && p.x <= 650.0, "x out of range: {}", p.x);
            assert!(p.y >= 0.0 && p.y <= 540.0, "y out of range: {}", p.y);
        }
    }

    #[test]
    fn point_within_tiny_viewport_pins_to_origin() {
        let mut rng = SequenceRandom::new(vec![0.9, 0.3]);
        let p = rng.point_within(Size::new(-20.0, 10.0), Size::new(150.0, 60.0));
        assert_eq!(p, Point::new(0.0, 0.0));
    }

    #[test]
    fn seeded_generators_repeat() {
        let mut a = FastRandom::seeded(7);
        let mut b = FastRandom::seeded(7);
        for _ in 0..16 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }
}
