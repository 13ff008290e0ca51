//! RNG module - deterministic tile generation
//!
//! A small LCG drives every random choice the board makes (initial fill,
//! refill colors, shuffles, rainbow + bomb color picks), so a seed fully
//! determines a game.

use crate::types::Color;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
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
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // The low bits of an LCG cycle with short periods; use the high half.
        (self.next_u32() >> 16) % max
    }

    /// Draw one of the first `palette` colors.
    pub fn next_color(&mut self, palette: u8) -> Color {
        let n = (palette as usize).clamp(1, Color::ALL.len());
        Color::ALL[self.next_range(n as u32) as usize]
    }

    /// Pick one element, or `None` for an empty slice.
    pub fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        Some(items[self.next_range(items.len() as u32) as usize])
    }

    /// Pick two distinct colors, preferring `present` and topping up from the
    /// palette when fewer than two are present.
    pub fn pick_two_colors(&mut self, present: &[Color], palette: u8) -> [Color; 2] {
        let mut pool: Vec<Color> = present.to_vec();
        let n = (palette as usize).clamp(2, Color::ALL.len());
        for &c in &Color::ALL[..n] {
            if pool.len() >= 2 {
                break;
            }
            if !pool.contains(&c) {
                pool.push(c);
            }
        }
        self.shuffle(&mut pool);
        [pool[0], pool[1]]
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current state; seeding a fresh RNG with it continues the sequence.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
