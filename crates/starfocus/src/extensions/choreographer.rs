// extensions/choreographer.rs
//
// Camera choreography: time-driven interpolation between two camera poses.
// Frame-clock driven and single-threaded. The caller invokes `tick` once per
// frame with a non-decreasing timestamp; nothing here sleeps or spawns.
//
// Usage:
//   let mut choreo = CameraChoreographer::new();
//   choreo.start(from, to, 1500.0, Easing::CubicInOut);
//   loop { if choreo.tick(now_ms, &mut camera) == TickStatus::Done { break } }

use glam::Vec3;

use crate::api::config::CameraConfig;
use crate::renderer::camera::{CameraPose, CameraRig};
use super::easing::{Easing, lerp_vec3};

/// Handle for a started session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u32);

/// Result of one [`CameraChoreographer::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// No session in flight; nothing was written.
    Idle,
    /// Pose written, session continues.
    Running,
    /// Pose written and the session finished on this tick. Reported once.
    Done,
}

impl TickStatus {
    /// Stable numeric code for FFI.
    pub fn code(self) -> u32 {
        match self {
            TickStatus::Idle => 0,
            TickStatus::Running => 1,
            TickStatus::Done => 2,
        }
    }
}

/// One camera transition.
#[derive(Debug, Clone)]
pub struct AnimationSession {
    pub from: CameraPose,
    pub to: CameraPose,
    pub duration_ms: f64,
    pub easing: Easing,
    /// Token pushed to the completed list when the session ends naturally.
    pub on_complete: Option<u32>,
    /// Recorded on the first tick.
    start_timestamp: Option<f64>,
    /// Control point of the raised arc, if the move is long enough to need one.
    arc_control: Option<Vec3>,
}

impl AnimationSession {
    pub fn new(from: CameraPose, to: CameraPose, duration_ms: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing,
            on_complete: None,
            start_timestamp: None,
            arc_control: None,
        }
    }

    pub fn with_on_complete(mut self, token: u32) -> Self {
        self.on_complete = Some(token);
        self
    }

    pub fn start_timestamp(&self) -> Option<f64> {
        self.start_timestamp
    }

    pub fn is_curved(&self) -> bool {
        self.arc_control.is_some()
    }

    /// Normalized progress at `timestamp_ms`, given the recorded start.
    /// Before the first tick this is 0.
    pub fn progress_at(&self, timestamp_ms: f64) -> f64 {
        let Some(t0) = self.start_timestamp else { return 0.0 };
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((timestamp_ms - t0) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Pose at linear `progress` in [0, 1]; easing is applied here.
    pub fn sample(&self, progress: f32) -> CameraPose {
        if progress >= 1.0 {
            return self.to;
        }
        let t = self.easing.apply(progress);
        let position = match self.arc_control {
            Some(control) => quadratic(self.from.position, control, self.to.position, t),
            None => lerp_vec3(self.from.position, self.to.position, t),
        };
        CameraPose {
            position,
            look_at: lerp_vec3(self.from.look_at, self.to.look_at, t),
        }
    }

    /// Bend the path through a midpoint raised by `arc_height * displacement`
    /// when the displacement exceeds `threshold`.
    fn plan_path(&mut self, threshold: f32, arc_height: f32) {
        let start = self.from.position;
        let end = self.to.position;
        let displacement = start.distance(end);
        self.arc_control = if displacement > threshold && arc_height > 0.0 {
            let midpoint = (start + end) * 0.5 + Vec3::Y * (arc_height * displacement);
            // Control point for a quadratic that passes through `midpoint` at t = 0.5.
            Some(midpoint * 2.0 - (start + end) * 0.5)
        } else {
            None
        };
    }
}

#[inline]
fn quadratic(p0: Vec3, p1: Vec3, p2: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

/// Drives at most one [`AnimationSession`] at a time.
///
/// Starting a new session discards the in-flight one without completing it.
#[derive(Debug)]
pub struct CameraChoreographer {
    session: Option<AnimationSession>,
    next_id: u32,
    current_id: Option<SessionId>,
    /// Last pose written to a rig.
    current: Option<CameraPose>,
    completed_events: Vec<u32>,
    curve_threshold: f32,
    arc_height: f32,
}

impl Default for CameraChoreographer {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl CameraChoreographer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::with_path(config.curve_threshold, config.arc_height)
    }

    /// `curve_threshold = f32::INFINITY` keeps every path straight.
    pub fn with_path(curve_threshold: f32, arc_height: f32) -> Self {
        Self {
            session: None,
            next_id: 0,
            current_id: None,
            current: None,
            completed_events: Vec::new(),
            curve_threshold,
            arc_height,
        }
    }

    /// Begin a transition. Time starts at the next `tick`, not now.
    pub fn start(&mut self, from: CameraPose, to: CameraPose, duration_ms: f64, easing: Easing) -> SessionId {
        self.play(AnimationSession::new(from, to, duration_ms, easing))
    }

    /// Begin a pre-built session, interrupting any session in flight.
    pub fn play(&mut self, mut session: AnimationSession) -> SessionId {
        if let Some(prev) = self.current_id.filter(|_| self.session.is_some()) {
            log::debug!("choreographer: session {} superseded", prev.0);
        }
        session.start_timestamp = None;
        session.plan_path(self.curve_threshold, self.arc_height);

        let id = SessionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.session = Some(session);
        self.current_id = Some(id);
        id
    }

    /// Drop the in-flight session without completing it.
    /// Returns whether there was one.
    pub fn cancel(&mut self) -> bool {
        self.current_id = None;
        self.session.take().is_some()
    }

    /// Move the end pose of the in-flight session, keeping its timing and
    /// planned arc. Returns whether there was a session to move.
    pub fn retarget(&mut self, to: CameraPose) -> bool {
        match self.session.as_mut() {
            Some(session) => {
                session.to = to;
                true
            }
            None => false,
        }
    }

    /// Advance to `timestamp_ms` and write the pose into `rig`.
    pub fn tick<R: CameraRig + ?Sized>(&mut self, timestamp_ms: f64, rig: &mut R) -> TickStatus {
        let Some(session) = self.session.as_mut() else {
            return TickStatus::Idle;
        };
        if !timestamp_ms.is_finite() {
            log::warn!("choreographer: ignoring non-finite timestamp {timestamp_ms}");
            return TickStatus::Running;
        }

        session.start_timestamp.get_or_insert(timestamp_ms);
        let progress = session.progress_at(timestamp_ms);
        let pose = session.sample(progress as f32);
        rig.apply_pose(&pose);
        self.current = Some(pose);

        if progress < 1.0 {
            return TickStatus::Running;
        }

        if let Some(token) = session.on_complete {
            self.completed_events.push(token);
        }
        self.session = None;
        self.current_id = None;
        TickStatus::Done
    }

    pub fn is_animating(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&AnimationSession> {
        self.session.as_ref()
    }

    pub fn current_session_id(&self) -> Option<SessionId> {
        self.current_id
    }

    /// Last pose written by `tick`, if any.
    pub fn current_pose(&self) -> Option<CameraPose> {
        self.current
    }

    /// Drain completion tokens of naturally finished sessions.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = u32> + '_ {
        self.completed_events.drain(..)
    }
}
