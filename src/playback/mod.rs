//! Trace playback
//!
//! - [`controller`]: the [`PlaybackController`] state machine (cursor, autoplay)
//! - [`clock`]: time sources; [`SystemClock`] for the terminal player and
//!   [`ManualClock`] for deterministic tests
//!
//! Playback is single-threaded and cooperative. Nothing here spawns threads or
//! blocks: the host loop calls [`PlaybackController::poll`] and the controller
//! fires whatever ticks are due.

pub mod clock;
pub mod controller;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{PlaybackConfig, PlaybackController, PlaybackEvent, PlaybackState, TimerId};
