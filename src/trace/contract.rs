// Contract checks for trace generators

use super::errors::TraceError;
use super::generator::{generate_with_limits, TraceGenerator};
use super::recorder::TraceLimits;
use super::Trace;

/// Generate twice, compare the runs, and validate the result.
///
/// Catches the defects a player cannot recover from: empty traces, broken id
/// order, missing narration and non-determinism.
pub fn verify<G: TraceGenerator + ?Sized>(
    generator: &G,
    input: &G::Input,
) -> Result<Trace, TraceError> {
    verify_with_limits(generator, input, TraceLimits::default())
}

pub fn verify_with_limits<G: TraceGenerator + ?Sized>(
    generator: &G,
    input: &G::Input,
    limits: TraceLimits,
) -> Result<Trace, TraceError> {
    let first = generate_with_limits(generator, input, limits);
    let second = generate_with_limits(generator, input, limits);

    if first.len() != second.len() {
        return Err(TraceError::LengthMismatch {
            first: first.len(),
            second: second.len(),
        });
    }
    if let Some(index) = first
        .iter()
        .zip(&second)
        .position(|(a, b)| !a.same_content(b))
    {
        return Err(TraceError::NonDeterministic { index });
    }

    Trace::new(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::value::Value;
    use crate::step::Variables;
    use crate::trace::TraceRecorder;
    use std::cell::Cell;

    struct Silent;

    impl TraceGenerator for Silent {
        type Input = ();

        fn name(&self) -> &'static str {
            "silent"
        }

        fn record(&self, _input: &(), _rec: &mut TraceRecorder) {}
    }

    /// Emits one more step on every run
    struct Drifting {
        runs: Cell<usize>,
    }

    impl TraceGenerator for Drifting {
        type Input = ();

        fn name(&self) -> &'static str {
            "drifting"
        }

        fn record(&self, _input: &(), rec: &mut TraceRecorder) {
            let runs = self.runs.get() + 1;
            self.runs.set(runs);
            for i in 0..runs {
                rec.emit(format!("step {i}"), &Value::Empty, Variables::new());
            }
        }
    }

    /// Same length every run, different narration
    struct Flaky {
        runs: Cell<i64>,
    }

    impl TraceGenerator for Flaky {
        type Input = ();

        fn name(&self) -> &'static str {
            "flaky"
        }

        fn record(&self, _input: &(), rec: &mut TraceRecorder) {
            let runs = self.runs.get() + 1;
            self.runs.set(runs);
            rec.emit("start", &Value::Empty, Variables::new());
            rec.emit("counter", &runs, Variables::new());
        }
    }

    #[test]
    fn test_empty_generator_is_a_violation() {
        assert_eq!(verify(&Silent, &()), Err(TraceError::Empty));
    }

    #[test]
    fn test_length_drift_is_detected() {
        let gen = Drifting { runs: Cell::new(0) };
        assert_eq!(
            verify(&gen, &()),
            Err(TraceError::LengthMismatch {
                first: 1,
                second: 2
            })
        );
    }

    #[test]
    fn test_content_drift_is_detected() {
        let gen = Flaky { runs: Cell::new(0) };
        assert_eq!(
            verify(&gen, &()),
            Err(TraceError::NonDeterministic { index: 1 })
        );
    }
}
