pub mod config;
pub mod types;

pub use config::{CameraConfig, FocusView, LayoutConfig, NavigatorConfig};
pub use types::{FocusLevel, PendingNavigation};
