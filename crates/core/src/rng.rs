//! RNG module - deterministic stack generation
//!
//! Opening stacks and dock stacks are drawn from a seeded generator so a board
//! built from the same seed and config always plays out identically.
//!
//! Every generated stack follows one shape rule: the top two tiles share a color
//! (so the player always has a group of at least two to work with) while lower
//! tiles are drawn independently from the active palette.

use std::ops::RangeInclusive;

use crate::types::Color;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Generator for color sequences (bottom to top)
#[derive(Debug, Clone)]
pub struct StackGenerator {
    rng: SimpleRng,
    color_count: u8,
}

impl StackGenerator {
    pub fn new(seed: u32, color_count: u8) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            color_count: color_count.max(1),
        }
    }

    /// Random color from the first `color_count` palette entries
    pub fn next_color(&mut self) -> Color {
        let idx = self.rng.next_range(self.color_count as u32) as usize;
        Color::from_index(idx).unwrap_or(Color::Red)
    }

    /// Generate a stack with height drawn from `heights`, clamped to `capacity`.
    pub fn generate(&mut self, heights: RangeInclusive<usize>, capacity: usize) -> Vec<Color> {
        let hi = (*heights.end()).min(capacity);
        let lo = (*heights.start()).min(hi);
        let height = lo + self.rng.next_range((hi - lo + 1) as u32) as usize;

        let top = self.next_color();
        (0..height)
            .map(|j| if j + 2 >= height { top } else { self.next_color() })
            .collect()
    }

    pub fn color_count(&self) -> u8 {
        self.color_count
    }

    /// Current RNG state (reseeding with it continues the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(3) < 3);
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_generated_heights_within_range() {
        let mut gen = StackGenerator::new(99, 3);
        for _ in 0..200 {
            let stack = gen.generate(3..=5, 6);
            assert!((3..=5).contains(&stack.len()), "height {}", stack.len());
        }
    }

    #[test]
    fn test_generated_heights_clamped_to_capacity() {
        let mut gen = StackGenerator::new(5, 3);
        for _ in 0..50 {
            assert!(gen.generate(3..=5, 4).len() <= 4);
        }
    }

    #[test]
    fn test_top_two_tiles_share_a_color() {
        let mut gen = StackGenerator::new(2024, 3);
        for _ in 0..200 {
            let stack = gen.generate(2..=5, 6);
            let n = stack.len();
            assert_eq!(stack[n - 1], stack[n - 2]);
        }
    }

    #[test]
    fn test_colors_limited_to_palette_prefix() {
        let mut gen = StackGenerator::new(31, 2);
        for _ in 0..200 {
            for c in gen.generate(3..=5, 6) {
                assert!(c.index() < 2);
            }
        }
    }

    #[test]
    fn test_same_seed_same_stacks() {
        let mut a = StackGenerator::new(77, 3);
        let mut b = StackGenerator::new(77, 3);
        for _ in 0..20 {
            assert_eq!(a.generate(3..=5, 6), b.generate(3..=5, 6));
        }
    }
}
