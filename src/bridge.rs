//! Render bridge
//!
//! A [`Session`] ties one generator, its current input and a
//! [`PlaybackController`] together. Renderers read a [`RenderFrame`]: shared
//! references into the current step plus the cursor position. There is no
//! path from a frame back into the trace.

use crate::accessor;
use crate::playback::{Clock, PlaybackConfig, PlaybackController, SystemClock};
use crate::step::value::Value;
use crate::step::{Highlight, Variables};
use crate::trace::{generate_with_limits, TraceError, TraceGenerator, TraceLimits};

/// Everything a renderer needs to draw the step under the cursor
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a, I> {
    pub data: &'a Value,
    pub variables: &'a Variables,
    pub highlight: Option<&'a Highlight>,
    pub description: &'a str,
    pub cursor: usize,
    pub length: usize,
    pub input: &'a I,
}

impl<I> RenderFrame<'_, I> {
    pub fn is_first(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_last(&self) -> bool {
        self.cursor + 1 >= self.length
    }
}

/// One visualization session: generator, input and player
pub struct Session<G: TraceGenerator, C: Clock = SystemClock> {
    generator: G,
    input: G::Input,
    limits: TraceLimits,
    controller: PlaybackController<C>,
}

impl<G: TraceGenerator> Session<G, SystemClock> {
    pub fn new(generator: G, input: G::Input, config: PlaybackConfig) -> Result<Self, TraceError> {
        Self::with_clock(generator, input, config, TraceLimits::default(), SystemClock::new())
    }
}

impl<G: TraceGenerator, C: Clock> Session<G, C> {
    /// Generate the trace for `input` and load it
    pub fn with_clock(
        generator: G,
        input: G::Input,
        config: PlaybackConfig,
        limits: TraceLimits,
        clock: C,
    ) -> Result<Self, TraceError> {
        let mut controller = PlaybackController::with_clock(config, clock);
        controller.load_trace(generate_with_limits(&generator, &input, limits))?;
        Ok(Session {
            generator,
            input,
            limits,
            controller,
        })
    }

    /// Regenerate for new input. On a contract violation the old input,
    /// trace and cursor all stay in place.
    pub fn set_input(&mut self, input: G::Input) -> Result<(), TraceError> {
        let steps = generate_with_limits(&self.generator, &input, self.limits);
        self.controller.load_trace(steps)?;
        self.input = input;
        Ok(())
    }

    /// The step under the cursor, as a read-only frame
    pub fn frame(&self) -> Option<RenderFrame<'_, G::Input>> {
        let step = self.controller.current_step()?;
        Some(RenderFrame {
            data: step.data(),
            variables: step.variables(),
            highlight: step.highlight(),
            description: step.description(),
            cursor: self.controller.current_index()?,
            length: self.controller.len(),
            input: &self.input,
        })
    }

    /// Variable `name` at the current step
    pub fn variable(&self, name: &str) -> Option<&Value> {
        accessor::get_raw(self.controller.current_step()?, name)
    }

    /// Variable `name` at step `index`
    pub fn variable_at(&self, index: usize, name: &str) -> Option<&Value> {
        accessor::get_raw(self.controller.trace()?.get(index)?, name)
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn input(&self) -> &G::Input {
        &self.input
    }

    pub fn controller(&self) -> &PlaybackController<C> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController<C> {
        &mut self.controller
    }
}
