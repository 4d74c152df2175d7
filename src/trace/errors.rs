//! Trace contract violations
//!
//! A [`TraceError`] always means a generator broke its contract. These are
//! programming defects, never user-input problems, so they are surfaced loudly
//! and never papered over with a substitute step.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// The generator returned no steps at all
    #[error("generator produced an empty trace")]
    Empty,

    /// The first step does not start the id sequence
    #[error("trace must start at id 0, first step has id {id}")]
    FirstIdNotZero { id: u64 },

    /// Ids must strictly increase
    #[error("step {index} has id {id}, which does not follow id {previous}")]
    NonMonotonicId { index: usize, previous: u64, id: u64 },

    /// Every step needs narration
    #[error("step {index} (id {id}) has an empty description")]
    EmptyDescription { index: usize, id: u64 },

    /// Two runs on the same input disagree about a step
    #[error("generator is non-deterministic: runs diverge at step {index}")]
    NonDeterministic { index: usize },

    /// Two runs on the same input produced different lengths
    #[error("generator is non-deterministic: runs produced {first} and {second} steps")]
    LengthMismatch { first: usize, second: usize },
}
