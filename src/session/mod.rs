//! Session identity and lifecycle state
//!
//! A `Session` is one recording-to-transcript attempt. The coordinator
//! holds at most one at a time; its state machine makes illegal
//! transitions (stop without start, transcribe after failure) explicit
//! instead of leaving them implicit in cleared fields.

mod id;
mod session;

pub use id::SessionId;
pub use session::{Session, SessionState};
