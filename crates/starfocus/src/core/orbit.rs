//! Approximate Keplerian orbits. Pure math, no scene dependencies.
//!
//! Computes in f64 and converts to f32 only for the returned offset.
//! The model is a visual stand-in: the speed law is not dimensionally
//! exact and Kepler's equation is solved with a fixed iteration count.

use glam::Vec3;

use crate::api::config::LayoutConfig;
use crate::core::rng::{derive_seed, SeededRandom};

/// Fixed-point iterations used for Kepler's equation.
pub const KEPLER_ITERATIONS: usize = 5;

const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Orbital elements for one body relative to its parent.
/// Angles in radians, speed in radians per orbit-second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub argument_of_periapsis: f64,
    /// Mean anomaly at t = 0.
    pub phase: f64,
    pub orbital_speed: f64,
}

impl OrbitalElements {
    /// Derive elements for the `sibling_index`-th child of `parent_id`.
    ///
    /// Same parent id and index always give the same elements. Renumbering
    /// siblings (e.g. after a removal) changes every later sibling's orbit.
    pub fn derive(
        parent_id: &str,
        sibling_index: usize,
        semi_major_axis: f64,
        config: &LayoutConfig,
    ) -> Self {
        let mut rng = SeededRandom::new(derive_seed(parent_id, sibling_index as u64));
        let max_incl = config.max_inclination_degrees * DEG_TO_RAD;

        let eccentricity = rng.range(0.0, config.max_eccentricity);
        let inclination = rng.range(-max_incl, max_incl);
        let argument_of_periapsis = rng.angle();
        let phase = rng.angle();

        Self {
            semi_major_axis,
            eccentricity,
            inclination,
            argument_of_periapsis,
            phase,
            orbital_speed: orbital_speed(config.orbital_speed_constant, semi_major_axis),
        }
    }

    /// Flat circular orbit.
    pub fn circular(semi_major_axis: f64, phase: f64, orbital_speed: f64) -> Self {
        Self {
            semi_major_axis,
            eccentricity: 0.0,
            inclination: 0.0,
            argument_of_periapsis: 0.0,
            phase,
            orbital_speed,
        }
    }

    /// Cap eccentricity so the distance to the parent never strays more
    /// than `max_swing` from the semi-major axis.
    pub fn with_max_swing(mut self, max_swing: f64) -> Self {
        if self.semi_major_axis > 0.0 {
            let cap = (max_swing / self.semi_major_axis).max(0.0);
            self.eccentricity = self.eccentricity.min(cap);
        }
        self
    }

    /// Closest approach to the parent.
    pub fn periapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Farthest distance from the parent.
    pub fn apoapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    /// Offset from the parent body at `time_seconds`.
    pub fn position_at(&self, time_seconds: f64) -> Vec3 {
        position_at(self, time_seconds)
    }
}

/// `K / a²`, a loose stand-in for Kepler's third law. Zero for `a <= 0`.
pub fn orbital_speed(k: f64, semi_major_axis: f64) -> f64 {
    if semi_major_axis <= 0.0 {
        0.0
    } else {
        k / (semi_major_axis * semi_major_axis)
    }
}

/// Eccentric anomaly from `E = M + e·sin(E)` by fixed-point iteration,
/// seeded at `E₀ = M`. Not iterated to convergence.
pub fn solve_kepler_fixed(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut ea = mean_anomaly;
    for _ in 0..KEPLER_ITERATIONS {
        ea = mean_anomaly + eccentricity * ea.sin();
    }
    ea
}

/// 3D offset of a body from its parent at `time_seconds`.
pub fn position_at(elements: &OrbitalElements, time_seconds: f64) -> Vec3 {
    let e = elements.eccentricity;
    let mean_anomaly = elements.orbital_speed * time_seconds + elements.phase;
    let ea = solve_kepler_fixed(mean_anomaly, e);

    let true_anomaly = 2.0
        * ((1.0 + e).sqrt() * (ea / 2.0).sin())
            .atan2((1.0 - e).sqrt() * (ea / 2.0).cos());

    let radius = elements.semi_major_axis * (1.0 - e * e) / (1.0 + e * true_anomaly.cos());

    let angle = true_anomaly + elements.argument_of_periapsis;
    let (sin_a, cos_a) = angle.sin_cos();
    let (sin_i, cos_i) = elements.inclination.sin_cos();

    Vec3::new(
        (cos_a * radius) as f32,
        (sin_a * radius * sin_i) as f32,
        (sin_a * radius * cos_i) as f32,
    )
}
