pub mod camera;

pub use camera::{resolve, CameraPose, CameraRig, PoseUniform};
