//! Playback controller
//!
//! [`PlaybackController`] owns the loaded [`Trace`], the cursor into it and the
//! autoplay timer. It is the only stateful piece of the player.
//!
//! # States
//!
//! ```text
//!            load_trace                play
//!   Empty ─────────────▶ Ready ◀──────────────▶ Playing
//!                          ▲        pause /         │
//!                          │    last step reached   │
//!                          └──── load_trace ────────┘
//! ```
//!
//! # Autoplay
//!
//! The timer is a `(TimerId, interval, next_due)` triple checked against a
//! [`Clock`] whenever the host calls [`PlaybackController::poll`]. Every
//! `play` arms a fresh [`TimerId`]; `pause`, `reset` and `load` disarm it
//! before returning. A tick carrying any other id is discarded, so a stale
//! timer can never move the cursor of a trace it was not started for.

use super::clock::{Clock, SystemClock};
use crate::constants::{DEFAULT_INTERVAL, DEFAULT_MAX_CATCH_UP_TICKS, MIN_INTERVAL};
use crate::step::Step;
use crate::trace::{Trace, TraceError};
use std::time::Duration;

/// Which state the controller is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No trace loaded
    Empty,
    /// Trace loaded, paused
    Ready,
    /// Trace loaded, autoplay timer armed
    Playing,
}

/// Playback options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Wrap to the first step instead of stopping at the last one
    pub looping: bool,
    /// Interval used by `toggle_play` before any explicit `play`
    pub default_interval: Duration,
    /// Most overdue ticks fired by one `poll`; the rest are dropped
    pub max_catch_up_ticks: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            looping: false,
            default_interval: DEFAULT_INTERVAL,
            max_catch_up_ticks: DEFAULT_MAX_CATCH_UP_TICKS,
        }
    }
}

/// Identity of one armed autoplay timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What a timer tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Cursor moved forward
    Advanced { timer: TimerId, index: usize },
    /// Cursor wrapped back to 0 (looping only)
    Wrapped { timer: TimerId },
    /// Last step reached; the timer is gone and the state is Ready
    Finished { timer: TimerId, index: usize },
}

/// `from + interval`, saturating instead of overflowing
fn due_after(from: Duration, interval: Duration) -> Duration {
    from.checked_add(interval).unwrap_or(Duration::MAX)
}

#[derive(Debug, Clone, Copy)]
struct Autoplay {
    id: TimerId,
    interval: Duration,
    next_due: Duration,
}

/// Trace and cursor always travel together
#[derive(Debug, Clone)]
struct Loaded {
    trace: Trace,
    cursor: usize,
}

/// Cursor, state machine and autoplay over one trace at a time
#[derive(Debug)]
pub struct PlaybackController<C: Clock = SystemClock> {
    loaded: Option<Loaded>,
    autoplay: Option<Autoplay>,
    interval: Duration,
    next_timer: u64,
    config: PlaybackConfig,
    clock: C,
}

impl PlaybackController<SystemClock> {
    pub fn new(config: PlaybackConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl Default for PlaybackController<SystemClock> {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

impl<C: Clock> PlaybackController<C> {
    pub fn with_clock(config: PlaybackConfig, clock: C) -> Self {
        PlaybackController {
            loaded: None,
            autoplay: None,
            interval: config.default_interval.max(MIN_INTERVAL),
            next_timer: 0,
            config,
            clock,
        }
    }

    /// Validate and adopt `steps`, cursor at 0.
    ///
    /// An invalid trace is a generator defect: it is logged, returned as an
    /// error, and the controller is left exactly as it was.
    pub fn load_trace(&mut self, steps: Vec<Step>) -> Result<(), TraceError> {
        match Trace::new(steps) {
            Ok(trace) => {
                self.load(trace);
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "refusing to load invalid trace");
                Err(err)
            }
        }
    }

    /// Adopt an already validated trace, cursor at 0
    pub fn load(&mut self, trace: Trace) {
        // Disarm first so no tick can land between the swap and the pause
        self.pause();
        tracing::debug!(steps = trace.len(), "adopted trace");
        self.loaded = Some(Loaded { trace, cursor: 0 });
    }

    /// Move one step forward. Returns false at the last step or when empty.
    pub fn step_forward(&mut self) -> bool {
        let Some(loaded) = self.loaded.as_mut() else {
            return false;
        };
        if loaded.cursor + 1 < loaded.trace.len() {
            loaded.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Move one step back. Returns false at step 0 or when empty.
    pub fn step_backward(&mut self) -> bool {
        let Some(loaded) = self.loaded.as_mut() else {
            return false;
        };
        if loaded.cursor > 0 {
            loaded.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Move the cursor to `index`, clamped to the trace. Keeps the state.
    pub fn seek(&mut self, index: usize) -> Option<usize> {
        let loaded = self.loaded.as_mut()?;
        loaded.cursor = index.min(loaded.trace.last_index());
        Some(loaded.cursor)
    }

    /// Start autoplay, one step every `interval`.
    ///
    /// Without looping, playing from the last step starts over from the first.
    /// Returns whether the controller is now playing.
    pub fn play(&mut self, interval: Duration) -> bool {
        let looping = self.config.looping;
        let Some(loaded) = self.loaded.as_mut() else {
            tracing::debug!("play ignored: no trace loaded");
            return false;
        };
        if loaded.trace.len() == 1 {
            return false;
        }
        if !looping && loaded.cursor == loaded.trace.last_index() {
            loaded.cursor = 0;
        }

        let interval = interval.max(MIN_INTERVAL);
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.interval = interval;
        self.autoplay = Some(Autoplay {
            id,
            interval,
            next_due: due_after(self.clock.now(), interval),
        });
        tracing::debug!(
            timer = id.0,
            interval_ms = interval.as_millis() as u64,
            "autoplay started"
        );
        true
    }

    /// Stop autoplay. Returns whether a timer was cancelled.
    pub fn pause(&mut self) -> bool {
        match self.autoplay.take() {
            Some(timer) => {
                tracing::debug!(timer = timer.id.0, "autoplay cancelled");
                true
            }
            None => false,
        }
    }

    /// Pause when playing, play at the current interval otherwise.
    /// Returns whether the controller is now playing.
    pub fn toggle_play(&mut self) -> bool {
        if self.pause() {
            false
        } else {
            self.play(self.interval)
        }
    }

    /// Change the autoplay interval. A running timer is rescheduled.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval.max(MIN_INTERVAL);
        let now = self.clock.now();
        if let Some(timer) = self.autoplay.as_mut() {
            timer.interval = self.interval;
            timer.next_due = due_after(now, self.interval);
        }
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.config.looping = looping;
    }

    /// Back to step 0, paused. The trace is kept.
    pub fn reset(&mut self) {
        self.pause();
        if let Some(loaded) = self.loaded.as_mut() {
            loaded.cursor = 0;
        }
    }

    /// Fire every autoplay tick that is due according to the clock
    pub fn poll(&mut self) -> Vec<PlaybackEvent> {
        let now = self.clock.now();
        let max_ticks = self.config.max_catch_up_ticks.max(1);
        let mut events = Vec::new();
        let mut fired = 0;

        while let Some(timer) = self.autoplay.as_mut() {
            if timer.next_due > now {
                break;
            }
            if fired == max_ticks {
                // Drop the backlog instead of replaying it all at once
                timer.next_due = due_after(now, timer.interval);
                break;
            }
            timer.next_due = due_after(timer.next_due, timer.interval);
            let id = timer.id;
            fired += 1;
            if let Some(event) = self.on_timer(id) {
                events.push(event);
            }
        }

        events
    }

    /// Deliver one tick of `timer`. Ticks from a cancelled or replaced timer
    /// are ignored and return None.
    pub fn on_timer(&mut self, timer: TimerId) -> Option<PlaybackEvent> {
        if self.autoplay.map(|t| t.id) != Some(timer) {
            tracing::trace!(timer = timer.0, "ignoring stale timer tick");
            return None;
        }
        let looping = self.config.looping;
        let loaded = self.loaded.as_mut()?;
        let last = loaded.trace.last_index();

        if loaded.cursor >= last {
            if looping {
                loaded.cursor = 0;
                return Some(PlaybackEvent::Wrapped { timer });
            }
            // A manual step already reached the end
            self.autoplay = None;
            return Some(PlaybackEvent::Finished {
                timer,
                index: loaded.cursor,
            });
        }

        loaded.cursor += 1;
        if loaded.cursor == last && !looping {
            self.autoplay = None;
            tracing::debug!(index = last, "autoplay reached the last step");
            return Some(PlaybackEvent::Finished { timer, index: last });
        }
        Some(PlaybackEvent::Advanced {
            timer,
            index: loaded.cursor,
        })
    }

    pub fn state(&self) -> PlaybackState {
        match (&self.loaded, &self.autoplay) {
            (None, _) => PlaybackState::Empty,
            (Some(_), Some(_)) => PlaybackState::Playing,
            (Some(_), None) => PlaybackState::Ready,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state() == PlaybackState::Playing
    }

    /// The step under the cursor
    pub fn current_step(&self) -> Option<&Step> {
        self.loaded
            .as_ref()
            .and_then(|loaded| loaded.trace.get(loaded.cursor))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.loaded.as_ref().map(|loaded| loaded.cursor)
    }

    /// Get the number of steps in the loaded trace (0 when empty)
    pub fn len(&self) -> usize {
        self.loaded.as_ref().map_or(0, |loaded| loaded.trace.len())
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.is_none()
    }

    pub fn at_start(&self) -> bool {
        self.current_index() == Some(0)
    }

    pub fn at_end(&self) -> bool {
        self.loaded
            .as_ref()
            .is_some_and(|loaded| loaded.cursor == loaded.trace.last_index())
    }

    pub fn trace(&self) -> Option<&Trace> {
        self.loaded.as_ref().map(|loaded| &loaded.trace)
    }

    /// The armed autoplay timer, if any
    pub fn timer(&self) -> Option<TimerId> {
        self.autoplay.map(|t| t.id)
    }

    /// Interval the next `play`/`toggle_play` will use
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
