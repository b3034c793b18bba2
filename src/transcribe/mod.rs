//! Result waiting, parsing, and artifact cleanup
//!
//! The transcription engine runs out of process and drops a JSON file
//! next to the audio it was given. This module waits for that file with a
//! bounded, cancellable poll loop, parses it, and removes both artifacts
//! on every exit path so no session leaves files behind.

mod cleanup;
mod pipeline;
mod result;
mod waiter;

pub use cleanup::remove_artifacts;
pub use pipeline::run;
pub use result::{Segment, Transcription};
pub use waiter::{wait_for_file, WaitConfig};
