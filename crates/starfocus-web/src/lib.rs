//! WASM exports for the navigation core.
//!
//! The host calls `nav_init` once, then `nav_tick` from its animation
//! frame callback and reads the camera pose through `get_pose_ptr`.

pub mod runner;

pub use runner::NavigatorRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<NavigatorRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner, or return `fallback` before `nav_init`.
fn with_runner<R>(fallback: R, f: impl FnOnce(&mut NavigatorRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            log::warn!("starfocus: called before nav_init()");
            fallback
        }
    })
}

/// Build the layout and navigator. Returns false if either JSON is invalid.
#[wasm_bindgen]
pub fn nav_init(universe_json: &str, config_json: &str) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    match NavigatorRunner::from_json(universe_json, config_json) {
        Ok(runner) => {
            RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
            log::info!("starfocus: initialized");
            true
        }
        Err(err) => {
            log::error!("starfocus: init failed: {err}");
            false
        }
    }
}

/// `level` is the focus depth: 0 universe through 4 moon.
#[wasm_bindgen]
pub fn nav_request_focus(level: u32, id: &str) -> bool {
    with_runner(false, |r| r.request_focus(level, id))
}

#[wasm_bindgen]
pub fn nav_request_back() -> bool {
    with_runner(false, |r| r.request_back())
}

#[wasm_bindgen]
pub fn nav_reset() {
    with_runner((), |r| r.reset())
}

/// Returns 0 idle, 1 running, 2 done.
#[wasm_bindgen]
pub fn nav_tick(timestamp_ms: f64) -> u32 {
    with_runner(0, |r| r.tick(timestamp_ms).code())
}

#[wasm_bindgen]
pub fn nav_set_reduced_motion(reduced: bool) {
    with_runner((), |r| r.set_reduced_motion(reduced))
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_pose_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.pose_ptr())
}

#[wasm_bindgen]
pub fn get_pose_floats() -> u32 {
    with_runner(0, |r| r.pose_floats())
}

#[wasm_bindgen]
pub fn nav_state_json() -> String {
    with_runner(String::new(), |r| r.state_json())
}

/// `[x, y, z]`, or empty when the body is unknown.
#[wasm_bindgen]
pub fn body_position(level: u32, id: &str, time_seconds: f64) -> Vec<f32> {
    with_runner(Vec::new(), |r| {
        r.body_position(level, id, time_seconds)
            .map(|p| p.to_vec())
            .unwrap_or_default()
    })
}
