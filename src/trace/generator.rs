//! The trace generator contract
//!
//! Every algorithm walkthrough implements [`TraceGenerator`]: given parsed
//! input, it records steps through a [`TraceRecorder`]. [`generate`] wraps
//! that into the pure `input -> Vec<Step>` call the player consumes.
//!
//! # Rules for implementations
//!
//! - Deterministic: same input, same steps. No clocks, no randomness, no I/O.
//! - Total: never panic on parseable input. Clamp out-of-range values, and
//!   answer empty or degenerate input with a single explanatory step.
//! - Granularity: record the pre-state before a destructive change, each
//!   decision point, the post-state after each change, and a closing summary.
//!   Index bookkeeping with no visible effect does not get its own step.
//! - Recursive generators may keep mutating shared buffers; the recorder
//!   freezes whatever is passed at the moment of the emit.

use super::recorder::{TraceLimits, TraceRecorder};
use crate::step::Step;

pub trait TraceGenerator {
    /// Parsed, already-validated parameters
    type Input;

    /// Short machine name, e.g. `"two-sum"`
    fn name(&self) -> &'static str;

    /// Record the walkthrough of `input`
    fn record(&self, input: &Self::Input, rec: &mut TraceRecorder);
}

/// Run `generator` on `input` with the default limits
pub fn generate<G: TraceGenerator + ?Sized>(generator: &G, input: &G::Input) -> Vec<Step> {
    generate_with_limits(generator, input, TraceLimits::default())
}

/// Run `generator` on `input` against a fresh recorder
pub fn generate_with_limits<G: TraceGenerator + ?Sized>(
    generator: &G,
    input: &G::Input,
    limits: TraceLimits,
) -> Vec<Step> {
    let mut rec = TraceRecorder::new(limits);
    generator.record(input, &mut rec);

    tracing::debug!(
        generator = generator.name(),
        steps = rec.len(),
        bytes = rec.memory_usage(),
        truncated = rec.is_truncated(),
        "generated trace"
    );

    rec.finish()
}
