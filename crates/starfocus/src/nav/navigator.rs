//! Couples the focus state machine to the camera.
//!
//! Flow: a request commits new focus on the machine, the target's position
//! comes from a [`PositionSource`], [`resolve`] turns it into a camera pose,
//! and the choreographer animates there over subsequent ticks. When the
//! animation finishes the machine is told, which may start the next queued
//! transition from the pose just reached.
//!
//! Orbiting bodies keep moving, so the target is re-resolved every tick:
//! an in-flight move is steered onto the body, and once settled the camera
//! follows it.

use glam::Vec3;

use crate::api::config::NavigatorConfig;
use crate::api::types::FocusLevel;
use crate::extensions::choreographer::{CameraChoreographer, TickStatus};
use crate::layout::universe::PositionSource;
use crate::renderer::camera::{resolve, CameraPose, CameraRig};
use super::machine::{
    BackOutcome, CompletionOutcome, FocusOutcome, NavigationState, NavigationStateMachine,
};

#[derive(Debug)]
pub struct Navigator {
    machine: NavigationStateMachine,
    choreographer: CameraChoreographer,
    config: NavigatorConfig,
    pose: CameraPose,
    last_timestamp_ms: f64,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(NavigatorConfig::default())
    }
}

impl Navigator {
    pub fn new(config: NavigatorConfig) -> Self {
        Self {
            machine: NavigationStateMachine::new(config.max_queue_len),
            choreographer: CameraChoreographer::from_config(&config.camera),
            pose: home_pose(&config),
            config,
            last_timestamp_ms: 0.0,
        }
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn state(&self) -> &NavigationState {
        self.machine.state()
    }

    /// Last pose the camera was moved to.
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn is_animating(&self) -> bool {
        self.choreographer.is_animating()
    }

    /// Zero-duration transitions from now on (accessibility preference).
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.config.reduced_motion = reduced;
    }

    /// Orbit clock derived from the latest frame timestamp.
    pub fn orbit_time(&self) -> f64 {
        self.last_timestamp_ms / 1000.0 * self.config.layout.time_scale
    }

    pub fn request_focus<P: PositionSource + ?Sized>(
        &mut self,
        level: FocusLevel,
        id: impl Into<String>,
        source: &P,
    ) -> FocusOutcome {
        let outcome = self.machine.request_focus(level, id);
        if outcome.is_committed() {
            self.begin_transition(source);
        }
        outcome
    }

    pub fn request_back<P: PositionSource + ?Sized>(&mut self, source: &P) -> BackOutcome {
        let outcome = self.machine.request_back();
        if outcome.is_committed() {
            self.begin_transition(source);
        }
        outcome
    }

    /// Initial state: Universe, nothing queued, camera snapped home.
    pub fn reset<R: CameraRig + ?Sized>(&mut self, rig: &mut R) {
        self.choreographer.cancel();
        self.machine.reset();
        self.pose = home_pose(&self.config);
        rig.apply_pose(&self.pose);
    }

    /// Drive one frame. Call with non-decreasing timestamps.
    ///
    /// Returns the choreographer's status. An `Idle` frame may still move
    /// the rig when the focused body has moved.
    pub fn tick<P, R>(&mut self, timestamp_ms: f64, source: &P, rig: &mut R) -> TickStatus
    where
        P: PositionSource + ?Sized,
        R: CameraRig + ?Sized,
    {
        if timestamp_ms.is_finite() {
            self.last_timestamp_ms = timestamp_ms;
        }

        if self.choreographer.is_animating() {
            if let Some(to) = self.focus_pose(source) {
                self.choreographer.retarget(to);
            }
        }

        let status = self.choreographer.tick(timestamp_ms, rig);
        if status == TickStatus::Idle {
            self.follow_focus(source, rig);
            return status;
        }
        if let Some(pose) = self.choreographer.current_pose() {
            self.pose = pose;
        }
        if status == TickStatus::Done {
            self.settle(source);
        }
        status
    }

    /// Start the camera toward the focus just committed on the machine.
    fn begin_transition<P: PositionSource + ?Sized>(&mut self, source: &P) {
        if !self.start_camera_move(source) {
            self.settle(source);
        }
    }

    /// Report completion, following queued entries until one actually animates.
    fn settle<P: PositionSource + ?Sized>(&mut self, source: &P) {
        while let CompletionOutcome::Advanced(_) = self.machine.complete_transition() {
            if self.start_camera_move(source) {
                return;
            }
        }
    }

    /// False when the target cannot be resolved; the camera stays put.
    fn start_camera_move<P: PositionSource + ?Sized>(&mut self, source: &P) -> bool {
        let Some(to) = self.focus_pose(source) else {
            let state = self.machine.state();
            log::warn!(
                "navigator: no position for {} '{}'; camera holds",
                state.focus_level(),
                state.focused_target().unwrap_or_default()
            );
            self.choreographer.cancel();
            return false;
        };

        let view = self.config.camera.view(self.machine.state().focus_level());
        let duration_ms = if self.config.reduced_motion { 0.0 } else { view.duration_ms };
        self.choreographer.start(self.pose, to, duration_ms, self.config.camera.easing);
        true
    }

    /// Viewing pose for the current focus at the current orbit time.
    fn focus_pose<P: PositionSource + ?Sized>(&self, source: &P) -> Option<CameraPose> {
        let state = self.machine.state();
        let target = source.focus_target(state, self.orbit_time())?;
        let view = self.config.camera.view(state.focus_level());
        Some(resolve(target, view.distance, view.angle_degrees))
    }

    /// Keep a settled camera on a body that has moved since the last frame.
    fn follow_focus<P, R>(&mut self, source: &P, rig: &mut R)
    where
        P: PositionSource + ?Sized,
        R: CameraRig + ?Sized,
    {
        let Some(pose) = self.focus_pose(source) else { return };
        if pose != self.pose {
            rig.apply_pose(&pose);
            self.pose = pose;
        }
    }
}

/// Universe overview pose.
fn home_pose(config: &NavigatorConfig) -> CameraPose {
    let view = config.camera.view(FocusLevel::Universe);
    resolve(Vec3::ZERO, view.distance, view.angle_degrees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::api::types::PendingNavigation;
    use crate::layout::universe::{UniverseLayout, UniverseModel};

    /// Static positions keyed by id.
    struct Fixed(HashMap<&'static str, Vec3>);

    impl PositionSource for Fixed {
        fn position_of(&self, level: FocusLevel, id: &str, _t: f64) -> Option<Vec3> {
            if level == FocusLevel::Universe {
                return Some(Vec3::ZERO);
            }
            self.0.get(id).copied()
        }
    }

    fn fixed() -> Fixed {
        Fixed(HashMap::from([
            ("g1", Vec3::new(100.0, 0.0, 0.0)),
            ("s1", Vec3::new(110.0, 0.0, 5.0)),
            ("p1", Vec3::new(112.0, 0.0, 6.0)),
        ]))
    }

    fn run_to_idle(nav: &mut Navigator, source: &Fixed, rig: &mut CameraPose, mut now: f64) -> f64 {
        for _ in 0..1000 {
            nav.tick(now, source, rig);
            if !nav.state().is_transitioning() {
                return now;
            }
            now += 16.0;
        }
        panic!("navigator never settled");
    }

    #[test]
    fn starts_at_home_pose() {
        let nav = Navigator::default();
        assert_eq!(nav.pose().look_at, Vec3::ZERO);
        assert!((nav.pose().distance() - 400.0).abs() < 1e-3);
    }

    #[test]
    fn focus_animates_to_resolved_pose() {
        let source = fixed();
        let mut nav = Navigator::default();
        let mut rig = CameraPose::default();

        assert!(nav.request_focus(FocusLevel::Galaxy, "g1", &source).is_committed());
        assert!(nav.is_animating());
        run_to_idle(&mut nav, &source, &mut rig, 0.0);

        let view = nav.config().camera.galaxy;
        let expected = resolve(Vec3::new(100.0, 0.0, 0.0), view.distance, view.angle_degrees);
        assert!(rig.approx_eq(&expected, 1e-4));
        assert_eq!(nav.pose(), rig);
        assert!(!nav.is_animating());
    }

    #[test]
    fn queued_focus_starts_after_first_completes() {
        let source = fixed();
        let mut nav = Navigator::default();
        let mut rig = CameraPose::default();

        nav.request_focus(FocusLevel::Galaxy, "g1", &source);
        assert_eq!(nav.request_focus(FocusLevel::SolarSystem, "s1", &source), FocusOutcome::Queued);
        assert_eq!(
            nav.state().transition_queue().front(),
            Some(&PendingNavigation::new(FocusLevel::SolarSystem, "s1"))
        );

        nav.tick(0.0, &source, &mut rig);
        let done_at = nav.config().camera.galaxy.duration_ms;
        assert_eq!(nav.tick(done_at, &source, &mut rig), TickStatus::Done);
        // Queue advanced inside the same tick; still transitioning.
        assert_eq!(nav.state().focus_level(), FocusLevel::SolarSystem);
        assert!(nav.state().is_transitioning());
        assert!(nav.is_animating());

        run_to_idle(&mut nav, &source, &mut rig, done_at + 16.0);
        assert_eq!(nav.state().solar_system_id(), Some("s1"));
        assert_eq!(rig.look_at, Vec3::new(110.0, 0.0, 5.0));
    }

    #[test]
    fn back_is_dropped_while_animating() {
        let source = fixed();
        let mut nav = Navigator::default();
        let mut rig = CameraPose::default();
        nav.request_focus(FocusLevel::Galaxy, "g1", &source);
        assert!(!nav.request_back(&source).is_committed());
        let now = run_to_idle(&mut nav, &source, &mut rig, 0.0);

        assert!(nav.request_back(&source).is_committed());
        run_to_idle(&mut nav, &source, &mut rig, now + 16.0);
        assert_eq!(nav.state().focus_level(), FocusLevel::Universe);
        assert_eq!(rig.look_at, Vec3::ZERO);
    }

    #[test]
    fn unknown_target_settles_without_moving() {
        let source = fixed();
        let mut nav = Navigator::default();
        let before = nav.pose();
        let outcome = nav.request_focus(FocusLevel::Planet, "nowhere", &source);
        assert!(outcome.is_committed());
        assert!(!nav.state().is_transitioning());
        assert!(!nav.is_animating());
        assert_eq!(nav.pose(), before);
    }

    #[test]
    fn reduced_motion_finishes_on_first_tick() {
        let source = fixed();
        let mut nav = Navigator::default();
        let mut rig = CameraPose::default();
        nav.set_reduced_motion(true);
        nav.request_focus(FocusLevel::Galaxy, "g1", &source);
        assert_eq!(nav.tick(5.0, &source, &mut rig), TickStatus::Done);
        assert!(!nav.state().is_transitioning());
        assert_eq!(rig.look_at, Vec3::new(100.0, 0.0, 0.0));
    }

    /// Planet "p" slides along +X at one unit per orbit-second.
    struct Drifting;

    impl PositionSource for Drifting {
        fn position_of(&self, level: FocusLevel, id: &str, t: f64) -> Option<Vec3> {
            match (level, id) {
                (FocusLevel::Universe, _) => Some(Vec3::ZERO),
                (FocusLevel::Planet, "p") => Some(Vec3::new(t as f32, 0.0, 0.0)),
                _ => None,
            }
        }
    }

    #[test]
    fn transition_lands_on_moving_target() {
        let mut nav = Navigator::default();
        let mut rig = CameraPose::default();
        nav.request_focus(FocusLevel::Planet, "p", &Drifting);
        nav.tick(0.0, &Drifting, &mut rig);

        let end = nav.config().camera.planet.duration_ms;
        assert_eq!(nav.tick(end, &Drifting, &mut rig), TickStatus::Done);
        assert_eq!(rig.look_at, Vec3::new((end / 1000.0) as f32, 0.0, 0.0));
    }

    #[test]
    fn settled_camera_follows_focused_body() {
        let mut nav = Navigator::default();
        let mut rig = CameraPose::default();
        nav.set_reduced_motion(true);
        nav.request_focus(FocusLevel::Planet, "p", &Drifting);
        assert_eq!(nav.tick(0.0, &Drifting, &mut rig), TickStatus::Done);

        assert_eq!(nav.tick(2500.0, &Drifting, &mut rig), TickStatus::Idle);
        assert_eq!(rig.look_at, Vec3::new(2.5, 0.0, 0.0));
        assert_eq!(nav.pose(), rig);
        let view = nav.config().camera.planet;
        assert!((rig.distance() - view.distance).abs() < 1e-4);
    }

    #[test]
    fn static_focus_leaves_rig_untouched_when_idle() {
        let source = fixed();
        let mut nav = Navigator::default();
        let mut rig = CameraPose::default();
        nav.request_focus(FocusLevel::Galaxy, "g1", &source);
        let now = run_to_idle(&mut nav, &source, &mut rig, 0.0);

        let mut untouched = CameraPose::new(Vec3::splat(-1.0), Vec3::splat(-1.0));
        assert_eq!(nav.tick(now + 500.0, &source, &mut untouched), TickStatus::Idle);
        assert_eq!(untouched, CameraPose::new(Vec3::splat(-1.0), Vec3::splat(-1.0)));
    }

    #[test]
    fn reset_cancels_and_snaps_home() {
        let source = fixed();
        let mut nav = Navigator::default();
        let mut rig = CameraPose::default();
        nav.request_focus(FocusLevel::Galaxy, "g1", &source);
        nav.request_focus(FocusLevel::SolarSystem, "s1", &source);
        nav.tick(0.0, &source, &mut rig);
        nav.tick(100.0, &source, &mut rig);

        nav.reset(&mut rig);
        assert_eq!(nav.state(), &NavigationState::default());
        assert!(!nav.is_animating());
        assert_eq!(rig, Navigator::default().pose());
        assert_eq!(nav.tick(200.0, &source, &mut rig), TickStatus::Idle);
    }

    #[test]
    fn drills_into_a_generated_universe() {
        let model = UniverseModel::from_json(
            r#"{ "galaxies": [ { "id": "g", "solar_systems": [
                { "id": "s", "planets": [ { "id": "p", "moons": [ { "id": "m" } ] } ] }
            ] } ] }"#,
        )
        .unwrap();
        let config = NavigatorConfig::default();
        let layout = UniverseLayout::build(&model, &config.layout);
        let mut nav = Navigator::new(config);
        let mut rig = CameraPose::default();

        let mut now = 0.0;
        for (level, id) in [
            (FocusLevel::Galaxy, "g"),
            (FocusLevel::SolarSystem, "s"),
            (FocusLevel::Planet, "p"),
            (FocusLevel::Moon, "m"),
        ] {
            nav.request_focus(level, id, &layout);
            for _ in 0..1000 {
                nav.tick(now, &layout, &mut rig);
                if !nav.state().is_transitioning() {
                    break;
                }
                now += 16.0;
            }
            assert!(!nav.state().is_transitioning());
            now += 16.0;
        }
        assert_eq!(nav.state().focus_level(), FocusLevel::Moon);
        assert_eq!(nav.state().moon_id(), Some("m"));
        let view = nav.config().camera.moon;
        assert!((rig.distance() - view.distance).abs() < 1e-3);
    }
}
