// layout/mod.rs
//
// Deterministic procedural placement: spacing for sibling orbits, symmetric
// patterns for top-level entities, and the universe-wide position model.

pub mod spacing;
pub mod symmetric;
pub mod universe;

pub use spacing::{compute_orbital_radius, compute_spacing, SpacingParams, SpacingPlan};
pub use symmetric::{layout, validate_spacing, LayoutAssignment, Pattern};
pub use universe::{PositionSource, UniverseLayout, UniverseModel};
