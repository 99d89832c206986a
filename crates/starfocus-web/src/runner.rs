use starfocus::{
    BackOutcome, FocusLevel, FocusOutcome, NavigatorConfig, Navigator, PoseUniform,
    PositionSource, TickStatus, UniverseLayout, UniverseModel,
};

/// Owns the navigator, the generated layout, and the pose buffer the
/// host reads after every tick.
///
/// wasm-bindgen cannot export this struct's generic tick directly, so
/// `lib.rs` keeps one in a `thread_local!` and forwards free functions.
pub struct NavigatorRunner {
    navigator: Navigator,
    layout: UniverseLayout,
    /// Flat pose for `get_pose_ptr` reads.
    pose: PoseUniform,
}

impl NavigatorRunner {
    pub fn new(model: &UniverseModel, config: NavigatorConfig) -> Self {
        let layout = UniverseLayout::build(model, &config.layout);
        let navigator = Navigator::new(config);
        let pose = navigator.pose().uniform();
        Self { navigator, layout, pose }
    }

    /// Parse both documents. An empty `config_json` means defaults.
    pub fn from_json(universe_json: &str, config_json: &str) -> starfocus::Result<Self> {
        let model = UniverseModel::from_json(universe_json)?;
        let config = if config_json.trim().is_empty() {
            NavigatorConfig::default()
        } else {
            NavigatorConfig::from_json(config_json)?
        };
        Ok(Self::new(&model, config))
    }

    /// True when the request was accepted, either now or into the queue.
    pub fn request_focus(&mut self, depth: u32, id: &str) -> bool {
        let Some(level) = FocusLevel::from_depth(depth) else {
            log::warn!("runner: unknown focus level {depth}");
            return false;
        };
        match self.navigator.request_focus(level, id, &self.layout) {
            FocusOutcome::Committed | FocusOutcome::Queued => true,
            FocusOutcome::Ignored(fault) => {
                log::debug!("runner: focus ignored: {fault}");
                false
            }
        }
    }

    pub fn request_back(&mut self) -> bool {
        match self.navigator.request_back(&self.layout) {
            BackOutcome::Committed => true,
            BackOutcome::Ignored(fault) => {
                log::debug!("runner: back ignored: {fault}");
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.navigator.reset(&mut self.pose);
    }

    pub fn tick(&mut self, timestamp_ms: f64) -> TickStatus {
        self.navigator.tick(timestamp_ms, &self.layout, &mut self.pose)
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.navigator.set_reduced_motion(reduced);
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn layout(&self) -> &UniverseLayout {
        &self.layout
    }

    pub fn pose(&self) -> &PoseUniform {
        &self.pose
    }

    // ---- Pointer accessors for host-side reads ----

    /// Start of the whole `PoseUniform` (`pose_floats()` floats).
    pub fn pose_ptr(&self) -> *const f32 {
        (&self.pose as *const PoseUniform).cast::<f32>()
    }

    pub fn pose_floats(&self) -> u32 {
        PoseUniform::FLOATS as u32
    }

    /// Navigation state as JSON, for breadcrumb UIs.
    pub fn state_json(&self) -> String {
        match serde_json::to_string(self.navigator.state()) {
            Ok(json) => json,
            Err(err) => {
                log::error!("runner: state serialization failed: {err}");
                String::from("{}")
            }
        }
    }

    /// Body position at orbit time `time_seconds`, or `None` if unknown.
    pub fn body_position(&self, depth: u32, id: &str, time_seconds: f64) -> Option<[f32; 3]> {
        let level = FocusLevel::from_depth(depth)?;
        self.layout
            .position_of(level, id, time_seconds)
            .map(|p| p.to_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIVERSE: &str = r#"{
        "galaxies": [
            { "id": "andromeda", "solar_systems": [] },
            { "id": "milky-way", "solar_systems": [
                { "id": "sol", "planets": [
                    { "id": "earth", "moons": [ { "id": "luna" } ] }
                ] }
            ] }
        ]
    }"#;

    fn runner() -> NavigatorRunner {
        NavigatorRunner::from_json(UNIVERSE, "").unwrap()
    }

    fn settle(runner: &mut NavigatorRunner, mut now: f64) -> f64 {
        for _ in 0..1000 {
            runner.tick(now);
            if !runner.navigator().state().is_transitioning() {
                break;
            }
            now += 16.0;
        }
        now + 16.0
    }

    #[test]
    fn bad_universe_json_is_rejected() {
        assert!(NavigatorRunner::from_json("{ not json", "").is_err());
    }

    #[test]
    fn config_json_overrides_defaults() {
        let runner = NavigatorRunner::from_json(UNIVERSE, r#"{ "reduced_motion": true }"#).unwrap();
        assert!(runner.navigator().config().reduced_motion);
    }

    #[test]
    fn unknown_depth_is_rejected() {
        let mut runner = runner();
        assert!(!runner.request_focus(9, "milky-way"));
    }

    #[test]
    fn focus_moves_pose_buffer() {
        let mut runner = runner();
        let home = *runner.pose();
        assert!(runner.request_focus(1, "milky-way"));
        settle(&mut runner, 0.0);

        assert_ne!(*runner.pose(), home);
        let galaxy = runner.body_position(1, "milky-way", 0.0).unwrap();
        assert_eq!(&runner.pose().look_at[..3], &galaxy[..]);
    }

    #[test]
    fn state_json_reports_breadcrumb_ids() {
        let mut runner = runner();
        let mut now = 0.0;
        for (depth, id) in [(1, "milky-way"), (2, "sol"), (3, "earth")] {
            assert!(runner.request_focus(depth, id));
            now = settle(&mut runner, now);
        }
        let json: serde_json::Value = serde_json::from_str(&runner.state_json()).unwrap();
        assert_eq!(json["focus_level"], "planet");
        assert_eq!(json["focused_planet_id"], "earth");
        assert_eq!(json["is_transitioning"], false);
    }

    #[test]
    fn back_and_reset() {
        let mut runner = runner();
        assert!(!runner.request_back());
        runner.request_focus(1, "andromeda");
        let now = settle(&mut runner, 0.0);
        assert!(runner.request_back());
        settle(&mut runner, now);
        assert_eq!(runner.navigator().state().focus_level(), FocusLevel::Universe);

        runner.request_focus(1, "milky-way");
        runner.tick(now + 100.0);
        runner.reset();
        assert_eq!(*runner.pose(), runner.navigator().pose().uniform());
        assert_eq!(runner.navigator().state().focus_level(), FocusLevel::Universe);
    }

    #[test]
    fn pose_pointer_covers_position_and_look_at() {
        let mut runner = runner();
        runner.request_focus(1, "milky-way");
        settle(&mut runner, 0.0);

        let floats = runner.pose_floats() as usize;
        // SAFETY: the pointer addresses the runner's own `PoseUniform`,
        // which is `repr(C)` and exactly `pose_floats()` f32s long.
        let read = unsafe { std::slice::from_raw_parts(runner.pose_ptr(), floats) };
        let pose = runner.pose();
        assert_eq!(&read[..4], &pose.position[..]);
        assert_eq!(&read[4..], &pose.look_at[..]);
    }

    #[test]
    fn moon_position_tracks_orbit_time() {
        let runner = runner();
        let a = runner.body_position(4, "luna", 0.0).unwrap();
        let b = runner.body_position(4, "luna", 10.0).unwrap();
        assert_ne!(a, b);
        assert!(runner.body_position(4, "deimos", 0.0).is_none());
    }
}
