//! Seedable Xorshift64 generator used to scatter particles.
//!
//! The field owns one generator for its whole life: a given seed reproduces
//! the same initial field, and every later regeneration (resize) keeps
//! drawing from the same stream so it never repeats the previous layout.

use glam::DVec2;

/// Xorshift64 with shifts (13, 7, 17).
///
/// Seed 0 is a fixed point of the algorithm and is replaced by a non-zero
/// fallback.
#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform in [0, 1), from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in [min, max). Returns `min` when the range is empty.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform in [-span, span) on each axis independently.
    pub fn symmetric_vec2(&mut self, span: f64) -> DVec2 {
        let x = self.range(-span, span);
        let y = self.range(-span, span);
        DVec2::new(x, y)
    }

    /// Uniform point in [0, width) x [0, height).
    pub fn point_in(&mut self, width: f64, height: f64) -> DVec2 {
        let x = self.range(0.0, width);
        let y = self.range(0.0, height);
        DVec2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u64_produces_known_golden_value_for_seed_42() {
        // If this breaks, every seeded scene renders differently.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_is_replaced() {
        let mut rng = Xorshift64::new(0);
        assert_ne!(rng.next_u64(), 0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn same_seed_same_points() {
        let mut a = Xorshift64::new(1920);
        let mut b = Xorshift64::new(1920);
        for i in 0..500 {
            assert_eq!(
                a.point_in(1920.0, 1080.0),
                b.point_in(1920.0, 1080.0),
                "streams diverged at draw {i}"
            );
        }
    }

    #[test]
    fn point_in_stays_on_surface() {
        let mut rng = Xorshift64::new(7);
        for _ in 0..10_000 {
            let p = rng.point_in(600.0, 400.0);
            assert!((0.0..600.0).contains(&p.x), "x = {}", p.x);
            assert!((0.0..400.0).contains(&p.y), "y = {}", p.y);
        }
    }

    #[test]
    fn empty_range_returns_min() {
        let mut rng = Xorshift64::new(3);
        assert_eq!(rng.range(2.5, 2.5), 2.5);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_unit_interval_for_any_seed(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v), "next_f64() = {v} for seed {seed}");
                }
            }

            #[test]
            fn symmetric_vec2_within_span(seed: u64, span in 0.01_f64..10.0) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.symmetric_vec2(span);
                    prop_assert!(v.x >= -span && v.x < span, "x = {} span {span}", v.x);
                    prop_assert!(v.y >= -span && v.y < span, "y = {} span {span}", v.y);
                }
            }

            #[test]
            fn rough_uniformity(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                let mut buckets = [0u32; 10];
                for _ in 0..10_000 {
                    let idx = (rng.next_f64() * 10.0).min(9.0) as usize;
                    buckets[idx] += 1;
                }
                for (i, &count) in buckets.iter().enumerate() {
                    prop_assert!(count >= 500, "bucket {i} has only {count} for seed {seed}");
                }
            }
        }
    }
}
