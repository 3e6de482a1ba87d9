//! RNG module - seeded operand and operator selection
//!
//! A small LCG keeps every run reproducible from its seed (tests, benches,
//! replays) without pulling a full RNG crate into the pure core.

use crate::types::Operator;

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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG with a power-of-two modulus
    /// cycle with a very short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        (((self.next_u32() >> 16) as u64 * max as u64) >> 16) as u32
    }

    /// Generate random value in the inclusive range [min, max]
    pub fn next_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        min + self.next_range(max - min + 1)
    }

    /// Pick an operator uniformly
    pub fn next_operator(&mut self) -> Operator {
        Operator::ALL[self.next_range(Operator::ALL.len() as u32) as usize]
    }

    /// Current state (for restarting with a continuing sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
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
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_inclusive_stays_in_bounds_and_hits_both_ends() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; 11];
        for _ in 0..2000 {
            let v = rng.next_inclusive(1, 10);
            assert!((1..=10).contains(&v), "out of range: {v}");
            seen[v as usize] = true;
        }
        assert!(seen[1..].iter().all(|&s| s), "not every value drawn: {seen:?}");
    }

    #[test]
    fn test_next_inclusive_degenerate_range() {
        let mut rng = SimpleRng::new(3);
        assert_eq!(rng.next_inclusive(4, 4), 4);
        assert_eq!(rng.next_inclusive(9, 2), 9);
    }

    #[test]
    fn test_every_operator_is_drawn() {
        let mut rng = SimpleRng::new(99);
        let mut counts = [0u32; 4];
        for _ in 0..4000 {
            let op = rng.next_operator();
            let idx = Operator::ALL.iter().position(|&o| o == op).unwrap();
            counts[idx] += 1;
        }
        // Roughly uniform: each operator well above a quarter of a quarter.
        for c in counts {
            assert!(c > 700, "skewed operator distribution: {counts:?}");
        }
    }
}
