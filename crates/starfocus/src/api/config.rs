use serde::{Deserialize, Serialize};

use crate::api::types::FocusLevel;
use crate::error::{Error, Result};
use crate::extensions::easing::Easing;

/// Top-level configuration for a [`crate::nav::Navigator`].
/// Loaded from JSON; missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Maximum pending focus requests. Oldest entries are dropped past this.
    pub max_queue_len: usize,
    /// Accessibility override: every transition completes on its first tick.
    pub reduced_motion: bool,
    pub camera: CameraConfig,
    pub layout: LayoutConfig,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            max_queue_len: 16,
            reduced_motion: false,
            camera: CameraConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl NavigatorConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the layout and camera code cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_queue_len == 0 {
            return Err(Error::InvalidConfig("max_queue_len must be at least 1".into()));
        }
        for level in FocusLevel::ALL {
            let view = self.camera.view(level);
            check_non_negative(&format!("camera.{level}.distance"), view.distance as f64)?;
            check_non_negative(&format!("camera.{level}.duration_ms"), view.duration_ms)?;
            check_finite(&format!("camera.{level}.angle_degrees"), view.angle_degrees as f64)?;
        }
        check_non_negative("camera.curve_threshold", self.camera.curve_threshold as f64)?;
        check_non_negative("camera.arc_height", self.camera.arc_height as f64)?;

        let l = &self.layout;
        let fields: [(&str, f64); 16] = [
            ("layout.galaxy_spacing", l.galaxy_spacing as f64),
            ("layout.galaxy_radius", l.galaxy_radius as f64),
            ("layout.system_base_radius", l.system_base_radius as f64),
            ("layout.system_nominal_spacing", l.system_nominal_spacing as f64),
            ("layout.planet_base_radius", l.planet_base_radius as f64),
            ("layout.planet_nominal_spacing", l.planet_nominal_spacing as f64),
            ("layout.moon_base_radius", l.moon_base_radius as f64),
            ("layout.moon_nominal_spacing", l.moon_nominal_spacing as f64),
            ("layout.spacing_margin", l.spacing_margin as f64),
            ("layout.min_spacing_floor", l.min_spacing_floor as f64),
            ("layout.spacing_safety_margin", l.spacing_safety_margin as f64),
            ("layout.orbital_speed_constant", l.orbital_speed_constant),
            ("layout.max_eccentricity", l.max_eccentricity),
            ("layout.max_inclination_degrees", l.max_inclination_degrees),
            ("layout.time_scale", l.time_scale),
            ("layout.default_planet_size", l.default_planet_size as f64),
        ];
        for (name, value) in fields {
            check_non_negative(name, value)?;
        }
        if l.max_eccentricity >= 1.0 {
            return Err(Error::InvalidConfig(
                "layout.max_eccentricity must be below 1 (closed orbits only)".into(),
            ));
        }
        Ok(())
    }
}

fn check_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("{name} must be finite, got {value}")))
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    check_finite(name, value)?;
    if value < 0.0 {
        return Err(Error::InvalidConfig(format!("{name} must be >= 0, got {value}")));
    }
    Ok(())
}

/// Camera framing for one focus level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusView {
    /// Eye-to-target distance in world units.
    pub distance: f32,
    /// Elevation above the target's horizontal plane.
    pub angle_degrees: f32,
    /// Transition length when arriving at this level.
    pub duration_ms: f64,
}

impl FocusView {
    pub const fn new(distance: f32, angle_degrees: f32, duration_ms: f64) -> Self {
        Self { distance, angle_degrees, duration_ms }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub universe: FocusView,
    pub galaxy: FocusView,
    pub solar_system: FocusView,
    pub planet: FocusView,
    pub moon: FocusView,
    pub easing: Easing,
    /// Displacements longer than this follow a raised arc instead of a line.
    pub curve_threshold: f32,
    /// Midpoint lift as a fraction of the displacement length.
    pub arc_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            universe: FocusView::new(400.0, 30.0, 2000.0),
            galaxy: FocusView::new(120.0, 35.0, 1800.0),
            solar_system: FocusView::new(45.0, 30.0, 1500.0),
            planet: FocusView::new(10.0, 20.0, 1200.0),
            moon: FocusView::new(3.0, 15.0, 1000.0),
            easing: Easing::CubicInOut,
            curve_threshold: 50.0,
            arc_height: 0.25,
        }
    }
}

impl CameraConfig {
    pub fn view(&self, level: FocusLevel) -> &FocusView {
        match level {
            FocusLevel::Universe => &self.universe,
            FocusLevel::Galaxy => &self.galaxy,
            FocusLevel::SolarSystem => &self.solar_system,
            FocusLevel::Planet => &self.planet,
            FocusLevel::Moon => &self.moon,
        }
    }
}

/// Procedural layout tuning. Distances are world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Minimum centre-to-centre distance between galaxies.
    pub galaxy_spacing: f32,
    /// Container radius solar systems are packed into.
    pub galaxy_radius: f32,
    pub system_base_radius: f32,
    pub system_nominal_spacing: f32,
    /// Added to the star size to get the innermost planet orbit.
    pub planet_base_radius: f32,
    pub planet_nominal_spacing: f32,
    /// Added to the planet size to get the innermost moon orbit.
    pub moon_base_radius: f32,
    pub moon_nominal_spacing: f32,
    /// Extra clearance between neighbouring bodies on top of their sizes.
    pub spacing_margin: f32,
    /// Lowest spacing compression may produce.
    pub min_spacing_floor: f32,
    /// Fraction by which galaxy spacing must exceed the largest diameter.
    pub spacing_safety_margin: f32,
    /// Planet size used when the model gives none (before the moon bonus).
    pub default_planet_size: f32,
    /// `K` in `orbital_speed = K / a²`.
    pub orbital_speed_constant: f64,
    pub max_eccentricity: f64,
    pub max_inclination_degrees: f64,
    /// Orbit seconds per wall-clock second.
    pub time_scale: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            galaxy_spacing: 200.0,
            galaxy_radius: 80.0,
            system_base_radius: 12.0,
            system_nominal_spacing: 10.0,
            planet_base_radius: 4.0,
            planet_nominal_spacing: 2.5,
            moon_base_radius: 0.8,
            moon_nominal_spacing: 0.4,
            spacing_margin: 0.5,
            min_spacing_floor: 0.1,
            spacing_safety_margin: 0.2,
            default_planet_size: 0.4,
            orbital_speed_constant: 2.0,
            max_eccentricity: 0.1,
            max_inclination_degrees: 10.0,
            time_scale: 1.0,
        }
    }
}
