//! Recoverable navigation faults.
//!
//! A fault means the request had no effect. Faults are logged and returned
//! inside outcome values; they never abort the caller.

use thiserror::Error;

use crate::api::types::FocusLevel;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavFault {
    /// Focus request with an empty or whitespace-only id.
    #[error("focus request for {level} has an empty id")]
    EmptyId { level: FocusLevel },

    /// Back request at the root of the hierarchy.
    #[error("already at universe; nothing to go back to")]
    AlreadyAtRoot,

    /// Back requests are dropped while a transition is in flight.
    #[error("back request dropped: transition in progress")]
    BackWhileTransitioning,

    /// Completion reported with no transition in flight.
    #[error("transition completed while idle")]
    NotTransitioning,

    /// The pending queue was full; the oldest entry was discarded.
    #[error("transition queue full (max {max}); dropped pending {dropped}")]
    QueueOverflow { dropped: FocusLevel, max: usize },
}
