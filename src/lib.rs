//! # Introduction
//!
//! Stepscope turns a run of an algorithm into a recorded list of steps and
//! plays that list back one step at a time.  Each step is a frozen snapshot
//! of the algorithm's data plus the named variables and positions worth
//! pointing at, so playback never re-runs anything.
//!
//! ## Pipeline
//!
//! ```text
//! Input → Generator → TraceRecorder → Trace → PlaybackController → Renderer
//! ```
//!
//! 1. [`step`]: the [`step::Step`] record and the closed [`step::value::Value`]
//!    model that every snapshot is deep-copied into.
//! 2. [`trace`]: the [`trace::TraceGenerator`] trait, the bounded
//!    [`trace::TraceRecorder`] and the validated, immutable [`trace::Trace`].
//! 3. [`accessor`]: typed, failure-free reads of step variables.
//! 4. [`playback`]: the cursor state machine with a cancellable autoplay timer.
//! 5. [`bridge`]: one generator, its input and a player bound into a session.
//! 6. [`catalog`]: the bundled demo generators.
//! 7. [`ui`]: ratatui-based terminal player; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use stepscope::catalog::two_sum::{TwoSum, TwoSumInput};
//! use stepscope::playback::PlaybackController;
//! use stepscope::trace::generate;
//!
//! let input = TwoSumInput { nums: vec![2, 7, 11, 15], target: 9 };
//! let mut player = PlaybackController::default();
//! player.load_trace(generate(&TwoSum, &input)).unwrap();
//! while player.step_forward() {}
//! assert!(player.current_step().unwrap().variables().contains("result"));
//! ```

pub mod accessor;
pub mod bridge;
pub mod catalog;
pub mod constants;
pub mod playback;
pub mod step;
pub mod trace;
pub mod ui;
