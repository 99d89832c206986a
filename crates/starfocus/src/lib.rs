pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod layout;
pub mod nav;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::config::{CameraConfig, FocusView, LayoutConfig, NavigatorConfig};
pub use api::types::{FocusLevel, PendingNavigation};
pub use self::core::orbit::{position_at, solve_kepler_fixed, OrbitalElements};
pub use self::core::rng::{derive_seed, SeededRandom};
pub use error::{Error, Result};
pub use extensions::{CameraChoreographer, AnimationSession, Easing, SessionId, TickStatus};
pub use layout::{
    compute_orbital_radius, compute_spacing, layout, validate_spacing,
    LayoutAssignment, Pattern, PositionSource, SpacingParams, SpacingPlan,
    UniverseLayout, UniverseModel,
};
pub use nav::{
    BackOutcome, CompletionOutcome, FocusOutcome, NavFault, NavigationState,
    NavigationStateMachine, Navigator,
};
pub use renderer::camera::{resolve, CameraPose, CameraRig, PoseUniform};
