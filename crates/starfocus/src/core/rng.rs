//! Seeded pseudo-random stream (linear congruential) and string-id seeding.
//! Deterministic and cheap; intended for visual variety, not statistics.

const MULTIPLIER: u64 = 9301;
const INCREMENT: u64 = 49297;
const MODULUS: u64 = 233_280;

/// Deterministic float stream in `[0, 1)` from an integer seed.
///
/// `state' = (state * 9301 + 49297) mod 233280`, output `state' / 233280`.
/// Each value owns its state, so two generators built from the same seed
/// never affect each other. Cloning forks the stream at its current point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        // Reducing first gives the same sequence as the unreduced recurrence
        // without overflowing on large seeds.
        SeededRandom {
            state: seed % MODULUS,
        }
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// Uniform value in `[min, max)`.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_f64()
    }

    /// Uniform angle in `[0, 2π)` radians.
    pub fn angle(&mut self) -> f64 {
        self.next_f64() * std::f64::consts::TAU
    }
}

impl Iterator for SeededRandom {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

/// Turn a string identifier into a seed: sum of UTF-16 code units plus `offset`.
///
/// Anagrams collide ("abc" and "cab" give the same seed). Good enough for
/// picking orbit phases, not for anything that needs uniqueness.
pub fn derive_seed(id: &str, offset: u64) -> u64 {
    id.encode_utf16()
        .fold(offset, |acc, unit| acc.wrapping_add(unit as u64))
}
