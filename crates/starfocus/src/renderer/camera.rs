use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Where the camera sits and what it looks at. Plain value type.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    pub const fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    /// Eye-to-target distance.
    pub fn distance(&self) -> f32 {
        self.position.distance(self.look_at)
    }

    /// Per-field tolerance comparison.
    pub fn approx_eq(&self, other: &CameraPose, epsilon: f32) -> bool {
        self.position.abs_diff_eq(other.position, epsilon)
            && self.look_at.abs_diff_eq(other.look_at, epsilon)
    }

    pub fn uniform(&self) -> PoseUniform {
        PoseUniform::from(*self)
    }
}

/// Flat, padded pose for handing to a renderer across FFI.
/// `w` components are always 1.0 (points, not directions).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PoseUniform {
    pub position: [f32; 4],
    pub look_at: [f32; 4],
}

impl PoseUniform {
    pub const FLOATS: usize = 8;
}

impl From<CameraPose> for PoseUniform {
    fn from(pose: CameraPose) -> Self {
        Self {
            position: pose.position.extend(1.0).to_array(),
            look_at: pose.look_at.extend(1.0).to_array(),
        }
    }
}

/// The externally owned camera the choreographer writes into each tick.
pub trait CameraRig {
    fn apply_pose(&mut self, pose: &CameraPose);
}

/// A rig that just remembers the last pose. Handy for headless callers and tests.
impl CameraRig for CameraPose {
    fn apply_pose(&mut self, pose: &CameraPose) {
        *self = *pose;
    }
}

impl CameraRig for PoseUniform {
    fn apply_pose(&mut self, pose: &CameraPose) {
        *self = PoseUniform::from(*pose);
    }
}

/// Camera pose looking at `target` from `distance` away, raised by
/// `angle_degrees` above the target's horizontal plane (on the +Z side).
///
/// Pure and deterministic. Negative distances are treated as zero.
pub fn resolve(target: Vec3, distance: f32, angle_degrees: f32) -> CameraPose {
    let distance = distance.max(0.0);
    let (sin_a, cos_a) = angle_degrees.to_radians().sin_cos();
    let offset = Vec3::new(0.0, distance * sin_a, distance * cos_a);
    CameraPose {
        position: target + offset,
        look_at: target,
    }
}
