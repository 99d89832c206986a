//! Focus navigation: the request-serializing state machine and the
//! navigator that couples it to camera choreography.

pub mod fault;
pub mod machine;
pub mod navigator;

pub use fault::NavFault;
pub use machine::{
    BackOutcome, CompletionOutcome, FocusOutcome, NavigationState, NavigationStateMachine,
};
pub use navigator::Navigator;
