//! Traces and how they are produced
//!
//! This module provides:
//! - [`Trace`]: a validated, shared, read-only sequence of [`Step`]s
//! - [`recorder`]: the [`TraceRecorder`] generators emit steps through
//! - [`generator`]: the [`TraceGenerator`] contract and the `generate` entry points
//! - [`contract`]: a checker that runs a generator twice and validates the output
//! - [`errors`]: [`TraceError`], the contract-violation taxonomy
//!
//! # Invariants
//!
//! A trace is never empty, its ids start at 0 and strictly increase, and every
//! step has a description. [`Trace::new`] is the only way to build one, so a
//! `Trace` in hand has already been checked.

pub mod contract;
pub mod errors;
pub mod generator;
pub mod recorder;

pub use errors::TraceError;
pub use generator::{generate, generate_with_limits, TraceGenerator};
pub use recorder::{TraceLimits, TraceRecorder};

use crate::step::Step;
use serde::{Serialize, Serializer};
use std::ops::Index;
use std::sync::Arc;

/// A validated step sequence. Cloning shares the same steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    steps: Arc<[Step]>,
}

impl Trace {
    /// Validate `steps` and wrap them
    pub fn new(steps: Vec<Step>) -> Result<Self, TraceError> {
        validate(&steps)?;
        Ok(Trace {
            steps: steps.into(),
        })
    }

    /// Get a step by index
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Get the number of steps (always at least 1)
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn first(&self) -> &Step {
        &self.steps[0]
    }

    pub fn last(&self) -> &Step {
        &self.steps[self.last_index()]
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Whether both handles point at the same shared steps
    pub fn ptr_eq(&self, other: &Trace) -> bool {
        Arc::ptr_eq(&self.steps, &other.steps)
    }
}

impl Index<usize> for Trace {
    type Output = Step;

    fn index(&self, index: usize) -> &Step {
        &self.steps[index]
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl Serialize for Trace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.steps.iter())
    }
}

/// Check the structural invariants of a step sequence
pub fn validate(steps: &[Step]) -> Result<(), TraceError> {
    let first = steps.first().ok_or(TraceError::Empty)?;
    if first.id() != 0 {
        return Err(TraceError::FirstIdNotZero { id: first.id() });
    }

    for (index, step) in steps.iter().enumerate() {
        if step.description().trim().is_empty() {
            return Err(TraceError::EmptyDescription {
                index,
                id: step.id(),
            });
        }
        if index > 0 {
            let previous = steps[index - 1].id();
            if step.id() <= previous {
                return Err(TraceError::NonMonotonicId {
                    index,
                    previous,
                    id: step.id(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::value::Value;

    fn step(id: u64, description: &str) -> Step {
        Step::new(id, description, &Value::Empty)
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(Trace::new(Vec::new()), Err(TraceError::Empty));
    }

    #[test]
    fn test_rejects_non_monotonic_ids() {
        let err = Trace::new(vec![step(0, "a"), step(2, "b"), step(2, "c")]).unwrap_err();
        assert_eq!(
            err,
            TraceError::NonMonotonicId {
                index: 2,
                previous: 2,
                id: 2
            }
        );
    }

    #[test]
    fn test_gaps_in_ids_are_allowed() {
        let trace = Trace::new(vec![step(0, "a"), step(5, "b")]).unwrap();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.last().id(), 5);
    }

    #[test]
    fn test_rejects_blank_description() {
        let err = Trace::new(vec![step(0, "a"), step(1, "   ")]).unwrap_err();
        assert_eq!(err, TraceError::EmptyDescription { index: 1, id: 1 });
    }

    #[test]
    fn test_rejects_nonzero_start() {
        let err = Trace::new(vec![step(1, "a")]).unwrap_err();
        assert_eq!(err, TraceError::FirstIdNotZero { id: 1 });
    }

    #[test]
    fn test_clone_shares_steps() {
        let trace = Trace::new(vec![step(0, "a")]).unwrap();
        let other = trace.clone();
        assert!(trace.ptr_eq(&other));
    }
}
