//! RNG module - deterministic random numbers for tile spawning
//!
//! A simple LCG keeps every game reproducible from its seed, which the
//! fixture tests and the scripted driver rely on.

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
        // Low bits of a power-of-two LCG cycle quickly; use the high half.
        self.state >> 16
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// True with the given percent probability.
    pub fn chance_percent(&mut self, percent: u32) -> bool {
        self.next_range(100) < percent
    }

    /// Uniformly pick one set bit index from `mask`.
    ///
    /// Returns `None` for an empty mask.
    pub fn pick_bit(&mut self, mask: u32) -> Option<usize> {
        let count = mask.count_ones();
        if count == 0 {
            return None;
        }
        let mut nth = self.next_range(count);
        for bit in 0..32 {
            if mask & (1 << bit) != 0 {
                if nth == 0 {
                    return Some(bit);
                }
                nth -= 1;
            }
        }
        None
    }

    /// Current RNG state (for restarting a game with the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
