//! Input subsystem: terminal events in, `InputAction`s out.

pub mod service;

// Modules outside this crate should prefer importing from `crate::input` rather than
// reaching into submodules.
pub use service::{InputAction, InputService, InputState, InputStateMachine};
