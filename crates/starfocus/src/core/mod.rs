pub mod orbit;
pub mod rng;

pub use orbit::{orbital_speed, position_at, solve_kepler_fixed, OrbitalElements, KEPLER_ITERATIONS};
pub use rng::{derive_seed, SeededRandom};
