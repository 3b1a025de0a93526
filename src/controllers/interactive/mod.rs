//! Interactive viewer loop.
//!
//! The session owns the camera and drives a fixed-cadence cycle against a
//! `DisplayPort`, with pacing delegated to a `FramePacer`. The windowing
//! layer in `input::gui` feeds it `InputEvent`s.

pub mod input_event;
pub mod pacer;
pub mod ports;
pub mod session;

pub use input_event::{InputEvent, NavKey};
pub use pacer::{EventLoopPacer, FramePacer, FrameSchedule};
pub use ports::{DisplayError, DisplayPort};
pub use session::{FrameOutcome, InteractiveSession, LoopState, SessionError};
