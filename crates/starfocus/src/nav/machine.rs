//! Focus state machine.
//!
//! Two states, Idle and Transitioning, keyed by the current [`FocusLevel`].
//! Focus requests that arrive mid-transition are queued FIFO; back requests
//! are dropped instead. Every mutation goes through an explicit
//! [`NavigationStateMachine`] value owned by the caller.

use std::collections::VecDeque;

use serde::Serialize;

use crate::api::types::{FocusLevel, PendingNavigation};
use super::fault::NavFault;

/// Default cap on pending focus requests.
pub const DEFAULT_MAX_QUEUE_LEN: usize = 16;

/// Snapshot of where navigation is focused.
///
/// Ids below `focus_level` are always `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NavigationState {
    focus_level: FocusLevel,
    focused_galaxy_id: Option<String>,
    focused_solar_system_id: Option<String>,
    focused_planet_id: Option<String>,
    focused_moon_id: Option<String>,
    is_transitioning: bool,
    transition_queue: VecDeque<PendingNavigation>,
}

impl NavigationState {
    pub fn focus_level(&self) -> FocusLevel {
        self.focus_level
    }

    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    pub fn transition_queue(&self) -> &VecDeque<PendingNavigation> {
        &self.transition_queue
    }

    pub fn galaxy_id(&self) -> Option<&str> {
        self.focused_galaxy_id.as_deref()
    }

    pub fn solar_system_id(&self) -> Option<&str> {
        self.focused_solar_system_id.as_deref()
    }

    pub fn planet_id(&self) -> Option<&str> {
        self.focused_planet_id.as_deref()
    }

    pub fn moon_id(&self) -> Option<&str> {
        self.focused_moon_id.as_deref()
    }

    /// Id held for `level` (always `None` for Universe).
    pub fn focused_id(&self, level: FocusLevel) -> Option<&str> {
        match level {
            FocusLevel::Universe => None,
            FocusLevel::Galaxy => self.galaxy_id(),
            FocusLevel::SolarSystem => self.solar_system_id(),
            FocusLevel::Planet => self.planet_id(),
            FocusLevel::Moon => self.moon_id(),
        }
    }

    /// Id of the entity currently in focus.
    pub fn focused_target(&self) -> Option<&str> {
        self.focused_id(self.focus_level)
    }

    /// `(level, id)` pairs from Galaxy down to the focus, skipping unset ids.
    pub fn breadcrumbs(&self) -> Vec<(FocusLevel, &str)> {
        FocusLevel::ALL
            .into_iter()
            .filter(|level| *level <= self.focus_level)
            .filter_map(|level| self.focused_id(level).map(|id| (level, id)))
            .collect()
    }

    fn slot_mut(&mut self, level: FocusLevel) -> Option<&mut Option<String>> {
        match level {
            FocusLevel::Universe => None,
            FocusLevel::Galaxy => Some(&mut self.focused_galaxy_id),
            FocusLevel::SolarSystem => Some(&mut self.focused_solar_system_id),
            FocusLevel::Planet => Some(&mut self.focused_planet_id),
            FocusLevel::Moon => Some(&mut self.focused_moon_id),
        }
    }

    fn clear_below(&mut self, level: FocusLevel) {
        for below in FocusLevel::ALL.into_iter().filter(|l| *l > level) {
            if let Some(slot) = self.slot_mut(below) {
                *slot = None;
            }
        }
    }

    /// Set focus to `level`/`id` and enter Transitioning in one step.
    fn commit_focus(&mut self, level: FocusLevel, id: String) {
        if let Some(slot) = self.slot_mut(level) {
            *slot = Some(id);
        }
        self.clear_below(level);
        self.focus_level = level;
        self.is_transitioning = true;
    }
}

/// Result of [`NavigationStateMachine::request_focus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusOutcome {
    /// Focus changed; a transition is now in flight.
    Committed,
    /// Appended to the pending queue.
    Queued,
    Ignored(NavFault),
}

/// Result of [`NavigationStateMachine::request_back`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackOutcome {
    Committed,
    Ignored(NavFault),
}

/// Result of [`NavigationStateMachine::complete_transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Queue was empty; now Idle.
    Settled,
    /// The head of the queue was committed; still Transitioning.
    Advanced(PendingNavigation),
    Ignored(NavFault),
}

impl FocusOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, FocusOutcome::Committed)
    }
}

impl BackOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, BackOutcome::Committed)
    }
}

#[derive(Debug, Clone)]
pub struct NavigationStateMachine {
    state: NavigationState,
    max_queue_len: usize,
}

impl Default for NavigationStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_QUEUE_LEN)
    }
}

impl NavigationStateMachine {
    /// `max_queue_len` below 1 is raised to 1.
    pub fn new(max_queue_len: usize) -> Self {
        Self {
            state: NavigationState::default(),
            max_queue_len: max_queue_len.max(1),
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn max_queue_len(&self) -> usize {
        self.max_queue_len
    }

    /// Focus `level`/`id`, or queue the request if a transition is in flight.
    ///
    /// The id is not checked against any content; only empty ids are refused.
    /// Focusing Universe ignores `id` and clears every focused id.
    pub fn request_focus(&mut self, level: FocusLevel, id: impl Into<String>) -> FocusOutcome {
        let id = id.into();
        if level != FocusLevel::Universe && id.trim().is_empty() {
            let fault = NavFault::EmptyId { level };
            log::warn!("nav: {fault}");
            return FocusOutcome::Ignored(fault);
        }

        if self.state.is_transitioning {
            if self.state.transition_queue.len() >= self.max_queue_len {
                if let Some(dropped) = self.state.transition_queue.pop_front() {
                    log::warn!(
                        "nav: {}",
                        NavFault::QueueOverflow { dropped: dropped.target_level, max: self.max_queue_len }
                    );
                }
            }
            log::debug!("nav: queued {level} '{id}'");
            self.state.transition_queue.push_back(PendingNavigation::new(level, id));
            return FocusOutcome::Queued;
        }

        log::debug!("nav: focus {} -> {level} '{id}'", self.state.focus_level);
        self.state.commit_focus(level, id);
        FocusOutcome::Committed
    }

    /// Move one level toward Universe. Dropped (not queued) mid-transition.
    pub fn request_back(&mut self) -> BackOutcome {
        if self.state.is_transitioning {
            let fault = NavFault::BackWhileTransitioning;
            log::debug!("nav: {fault}");
            return BackOutcome::Ignored(fault);
        }
        let Some(parent) = self.state.focus_level.parent() else {
            let fault = NavFault::AlreadyAtRoot;
            log::debug!("nav: {fault}");
            return BackOutcome::Ignored(fault);
        };

        log::debug!("nav: back {} -> {parent}", self.state.focus_level);
        self.state.clear_below(parent);
        self.state.focus_level = parent;
        self.state.is_transitioning = true;
        BackOutcome::Committed
    }

    /// Report that the in-flight transition finished.
    ///
    /// With a non-empty queue the head is committed in the same call, so
    /// `is_transitioning` stays true throughout and Idle is never observable.
    pub fn complete_transition(&mut self) -> CompletionOutcome {
        if !self.state.is_transitioning {
            let fault = NavFault::NotTransitioning;
            log::debug!("nav: {fault}");
            return CompletionOutcome::Ignored(fault);
        }

        match self.state.transition_queue.pop_front() {
            Some(next) => {
                log::debug!("nav: advancing queue to {} '{}'", next.target_level, next.target_id);
                self.state.commit_focus(next.target_level, next.target_id.clone());
                CompletionOutcome::Advanced(next)
            }
            None => {
                self.state.is_transitioning = false;
                CompletionOutcome::Settled
            }
        }
    }

    /// Back to Universe, nothing focused, queue empty, Idle.
    pub fn reset(&mut self) {
        log::debug!("nav: reset");
        self.state = NavigationState::default();
    }
}
