//! Content model and computed world positions for the whole hierarchy.
//!
//! `UniverseModel` is what the content side supplies (ordered sibling ids and
//! size hints). `UniverseLayout` turns it into positions once, with the
//! symmetric pattern for galaxies, spaced rings for solar systems, and seeded
//! Kepler orbits for planets and moons. Ids are assumed unique per level.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::config::LayoutConfig;
use crate::api::types::FocusLevel;
use crate::core::orbit::OrbitalElements;
use crate::core::rng::{derive_seed, SeededRandom};
use crate::error::Result;
use crate::nav::NavigationState;
use super::spacing::{compute_spacing, SpacingParams};
use super::symmetric::{self, LayoutAssignment};

/// Size bonus per moon for planets without an explicit size.
pub const MOON_SIZE_BONUS: f32 = 0.1;

fn default_star_size() -> f32 {
    1.5
}

fn default_moon_size() -> f32 {
    0.1
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniverseModel {
    #[serde(default)]
    pub galaxies: Vec<GalaxyDesc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalaxyDesc {
    pub id: String,
    #[serde(default)]
    pub solar_systems: Vec<SolarSystemDesc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarSystemDesc {
    pub id: String,
    #[serde(default = "default_star_size")]
    pub star_size: f32,
    #[serde(default)]
    pub planets: Vec<PlanetDesc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetDesc {
    pub id: String,
    /// Visual radius; derived from the moon count when absent.
    #[serde(default)]
    pub size: Option<f32>,
    #[serde(default)]
    pub moons: Vec<MoonDesc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonDesc {
    pub id: String,
    #[serde(default = "default_moon_size")]
    pub size: f32,
}

impl UniverseModel {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn galaxy_ids(&self) -> Vec<&str> {
        self.galaxies.iter().map(|g| g.id.as_str()).collect()
    }
}

impl PlanetDesc {
    pub fn visual_size(&self, config: &LayoutConfig) -> f32 {
        self.size
            .unwrap_or(config.default_planet_size + MOON_SIZE_BONUS * self.moons.len() as f32)
    }
}

/// Supplies world positions for focus targets.
pub trait PositionSource {
    /// World position of `id` at `level` at orbit time `time_seconds`.
    /// Universe resolves to the origin regardless of `id`.
    fn position_of(&self, level: FocusLevel, id: &str, time_seconds: f64) -> Option<Vec3>;

    /// Position of whatever `state` is focused on.
    fn focus_target(&self, state: &NavigationState, time_seconds: f64) -> Option<Vec3> {
        let id = state.focused_target().unwrap_or_default();
        self.position_of(state.focus_level(), id, time_seconds)
    }
}

/// A body orbiting a parent that is itself placed in the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyOrbit {
    pub parent_id: String,
    pub elements: OrbitalElements,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemPlacement {
    pub galaxy_id: String,
    pub position: Vec3,
    /// Radius enclosing the star and every planet orbit.
    pub footprint: f32,
}

/// Positions for every entity of a [`UniverseModel`].
#[derive(Debug, Clone, Default)]
pub struct UniverseLayout {
    galaxies: LayoutAssignment,
    systems: HashMap<String, SystemPlacement>,
    planets: HashMap<String, BodyOrbit>,
    moons: HashMap<String, BodyOrbit>,
}

impl UniverseLayout {
    pub fn build(model: &UniverseModel, config: &LayoutConfig) -> Self {
        let galaxy_ids = model.galaxy_ids();
        let galaxies = symmetric::layout(&galaxy_ids, config.galaxy_spacing);
        symmetric::validate_spacing(
            config.galaxy_spacing,
            config.galaxy_radius * 2.0,
            config.spacing_safety_margin,
        );

        let mut layout = UniverseLayout {
            galaxies,
            ..Default::default()
        };

        for galaxy in &model.galaxies {
            let Some(galaxy_pos) = layout.galaxies.get(&galaxy.id) else { continue };
            layout.place_galaxy(galaxy, galaxy_pos, config);
        }

        log::info!(
            "layout: {} galaxies, {} systems, {} planets, {} moons",
            layout.galaxies.len(),
            layout.systems.len(),
            layout.planets.len(),
            layout.moons.len()
        );
        layout
    }

    fn place_galaxy(&mut self, galaxy: &GalaxyDesc, galaxy_pos: Vec3, config: &LayoutConfig) {
        let mut footprints = Vec::with_capacity(galaxy.solar_systems.len());
        for system in &galaxy.solar_systems {
            footprints.push(self.place_planets(system, config));
        }

        let plan = compute_spacing(
            &footprints,
            config.system_nominal_spacing,
            Some(config.galaxy_radius),
            &SpacingParams {
                base_radius: config.system_base_radius,
                margin: config.spacing_margin,
                min_floor: config.min_spacing_floor,
            },
        );

        for (index, (system, radius)) in galaxy.solar_systems.iter().zip(&plan.radii).enumerate() {
            let azimuth = SeededRandom::new(derive_seed(&galaxy.id, index as u64)).angle() as f32;
            let offset = Vec3::new(azimuth.cos() * radius, 0.0, azimuth.sin() * radius);
            self.warn_if_duplicate(FocusLevel::SolarSystem, &system.id);
            self.systems.insert(
                system.id.clone(),
                SystemPlacement {
                    galaxy_id: galaxy.id.clone(),
                    position: galaxy_pos + offset,
                    footprint: footprints[index],
                },
            );
        }
    }

    /// Orbits for a system's planets and their moons. Returns the footprint.
    ///
    /// Eccentricity is capped per planet so that no two moon systems
    /// (planet clearances) ever meet, whatever the orbit phase.
    fn place_planets(&mut self, system: &SolarSystemDesc, config: &LayoutConfig) -> f32 {
        // A planet's clearance covers its own moon orbits.
        let mut clearances = Vec::with_capacity(system.planets.len());
        for planet in &system.planets {
            clearances.push(self.place_moons(planet, config));
        }

        let plan = compute_spacing(
            &clearances,
            config.planet_nominal_spacing,
            None,
            &SpacingParams {
                base_radius: system.star_size + config.planet_base_radius,
                margin: config.spacing_margin,
                min_floor: config.min_spacing_floor,
            },
        );

        let swing = plan.swing_room(&clearances, system.star_size);
        for (index, ((planet, radius), room)) in
            system.planets.iter().zip(&plan.radii).zip(&swing).enumerate()
        {
            self.warn_if_duplicate(FocusLevel::Planet, &planet.id);
            let elements = OrbitalElements::derive(&system.id, index, *radius as f64, config)
                .with_max_swing(*room as f64);
            self.planets.insert(
                planet.id.clone(),
                BodyOrbit {
                    parent_id: system.id.clone(),
                    elements,
                    size: planet.visual_size(config),
                },
            );
        }

        plan.reach(&clearances, &swing).max(system.star_size)
    }

    /// Orbits for a planet's moons. Returns the planet's clearance radius,
    /// which covers the moons at their farthest swing.
    fn place_moons(&mut self, planet: &PlanetDesc, config: &LayoutConfig) -> f32 {
        let size = planet.visual_size(config);
        let sizes: Vec<f32> = planet.moons.iter().map(|m| m.size).collect();
        let plan = compute_spacing(
            &sizes,
            config.moon_nominal_spacing,
            None,
            &SpacingParams {
                base_radius: size + config.moon_base_radius,
                margin: config.spacing_margin,
                min_floor: config.min_spacing_floor,
            },
        );

        let swing = plan.swing_room(&sizes, size);
        for (index, ((moon, radius), room)) in
            planet.moons.iter().zip(&plan.radii).zip(&swing).enumerate()
        {
            self.warn_if_duplicate(FocusLevel::Moon, &moon.id);
            let elements = OrbitalElements::derive(&planet.id, index, *radius as f64, config)
                .with_max_swing(*room as f64);
            self.moons.insert(
                moon.id.clone(),
                BodyOrbit {
                    parent_id: planet.id.clone(),
                    elements,
                    size: moon.size,
                },
            );
        }

        plan.reach(&sizes, &swing).max(size)
    }

    fn warn_if_duplicate(&self, level: FocusLevel, id: &str) {
        let taken = match level {
            FocusLevel::SolarSystem => self.systems.contains_key(id),
            FocusLevel::Planet => self.planets.contains_key(id),
            FocusLevel::Moon => self.moons.contains_key(id),
            FocusLevel::Universe | FocusLevel::Galaxy => false,
        };
        if taken {
            log::warn!("layout: duplicate {level} id '{id}'; later entry wins");
        }
    }

    pub fn galaxies(&self) -> &LayoutAssignment {
        &self.galaxies
    }

    pub fn system(&self, id: &str) -> Option<&SystemPlacement> {
        self.systems.get(id)
    }

    pub fn planet(&self, id: &str) -> Option<&BodyOrbit> {
        self.planets.get(id)
    }

    pub fn moon(&self, id: &str) -> Option<&BodyOrbit> {
        self.moons.get(id)
    }

    fn planet_position(&self, id: &str, time_seconds: f64) -> Option<Vec3> {
        let orbit = self.planets.get(id)?;
        let system = self.systems.get(&orbit.parent_id)?;
        Some(system.position + orbit.elements.position_at(time_seconds))
    }
}

impl PositionSource for UniverseLayout {
    fn position_of(&self, level: FocusLevel, id: &str, time_seconds: f64) -> Option<Vec3> {
        match level {
            FocusLevel::Universe => Some(Vec3::ZERO),
            FocusLevel::Galaxy => self.galaxies.get(id),
            FocusLevel::SolarSystem => self.systems.get(id).map(|s| s.position),
            FocusLevel::Planet => self.planet_position(id, time_seconds),
            FocusLevel::Moon => {
                let orbit = self.moons.get(id)?;
                let planet = self.planet_position(&orbit.parent_id, time_seconds)?;
                Some(planet + orbit.elements.position_at(time_seconds))
            }
        }
    }
}
