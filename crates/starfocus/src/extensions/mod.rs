// extensions/mod.rs
//
// Motion helpers layered over the camera: easing curves and the
// choreographer that plays timed pose transitions.

pub mod choreographer;
pub mod easing;

pub use choreographer::{AnimationSession, CameraChoreographer, SessionId, TickStatus};
pub use easing::{ease_vec3, lerp_vec3, Easing};
