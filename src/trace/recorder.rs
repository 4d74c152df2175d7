// Step recording with a bounded history

use crate::constants::{DEFAULT_MAX_STEPS, DEFAULT_MAX_TRACE_BYTES, MIN_MAX_STEPS};
use crate::step::value::{Freeze, Value};
use crate::step::{Highlight, Step, Variables};

/// Bounds on how much a single generator run may record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceLimits {
    /// Most steps in the finished trace, truncation notice included
    pub max_steps: usize,
    /// Most estimated snapshot bytes across all steps
    pub max_bytes: usize,
}

impl TraceLimits {
    pub fn new(max_steps: usize, max_bytes: usize) -> Self {
        TraceLimits {
            max_steps: max_steps.max(MIN_MAX_STEPS),
            max_bytes,
        }
    }
}

impl Default for TraceLimits {
    fn default() -> Self {
        TraceLimits::new(DEFAULT_MAX_STEPS, DEFAULT_MAX_TRACE_BYTES)
    }
}

/// Collects the steps of one generator run.
///
/// Ids are assigned here, starting at 0. Data is frozen on the way in, so the
/// generator's scratch state never leaks into the trace by reference. When a
/// limit would be exceeded the recorder appends a single "trace truncated"
/// step and ignores everything after it.
#[derive(Debug)]
pub struct TraceRecorder {
    steps: Vec<Step>,
    limits: TraceLimits,
    next_id: u64,
    current_bytes: usize,
    truncated: bool,
}

impl TraceRecorder {
    pub fn new(limits: TraceLimits) -> Self {
        TraceRecorder {
            steps: Vec::new(),
            limits: TraceLimits::new(limits.max_steps, limits.max_bytes),
            next_id: 0,
            current_bytes: 0,
            truncated: false,
        }
    }

    /// Record a step. Returns false once the trace has been truncated.
    pub fn emit(
        &mut self,
        description: impl Into<String>,
        data: &(impl Freeze + ?Sized),
        variables: Variables,
    ) -> bool {
        if self.truncated {
            return false;
        }
        let step = Step::new(self.next_id, description, data).with_variables(variables);
        self.push(step)
    }

    /// Record a step with emphasis
    pub fn emit_highlighted(
        &mut self,
        description: impl Into<String>,
        data: &(impl Freeze + ?Sized),
        variables: Variables,
        highlight: Highlight,
    ) -> bool {
        if self.truncated {
            return false;
        }
        let step = Step::new(self.next_id, description, data)
            .with_variables(variables)
            .with_highlight(highlight);
        self.push(step)
    }

    fn push(&mut self, step: Step) -> bool {
        let step_size = step.estimated_size();
        let out_of_slots = self.steps.len() + 1 >= self.limits.max_steps;
        let out_of_bytes = self.current_bytes + step_size > self.limits.max_bytes;

        if out_of_slots || out_of_bytes {
            tracing::warn!(
                steps = self.steps.len(),
                bytes = self.current_bytes,
                max_steps = self.limits.max_steps,
                max_bytes = self.limits.max_bytes,
                "trace limit reached, truncating"
            );
            self.truncate();
            return false;
        }

        self.current_bytes += step_size;
        self.next_id += 1;
        self.steps.push(step);
        true
    }

    /// Close the trace with a notice that carries the last recorded data
    fn truncate(&mut self) {
        let data = self
            .steps
            .last()
            .map(|s| s.data().clone())
            .unwrap_or(Value::Empty);
        let notice = Step::new(
            self.next_id,
            format!("Trace truncated after {} steps", self.steps.len()),
            &data,
        )
        .with_variables(Variables::new().with("truncated", true));

        self.next_id += 1;
        self.steps.push(notice);
        self.truncated = true;
    }

    /// Get the number of recorded steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether a limit cut the trace short
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Get current estimated snapshot usage
    pub fn memory_usage(&self) -> usize {
        self.current_bytes
    }

    pub fn limits(&self) -> TraceLimits {
        self.limits
    }

    /// Hand over the recorded steps
    pub fn finish(self) -> Vec<Step> {
        self.steps
    }
}

impl Default for TraceRecorder {
    fn default() -> Self {
        Self::new(TraceLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::get_boolean;

    #[test]
    fn test_ids_start_at_zero_and_increase() {
        let mut rec = TraceRecorder::default();
        rec.emit("a", &1i64, Variables::new());
        rec.emit("b", &2i64, Variables::new());
        rec.emit("c", &3i64, Variables::new());

        let ids: Vec<u64> = rec.finish().iter().map(Step::id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_emit_freezes_scratch_state() {
        let mut rec = TraceRecorder::default();
        let mut scratch: Vec<i64> = vec![5, 4, 3];
        rec.emit("before", &scratch, Variables::new());
        scratch.swap(0, 2);
        rec.emit("after", &scratch, Variables::new());

        let steps = rec.finish();
        assert_eq!(steps[0].data(), &Value::Ints(vec![5, 4, 3]));
        assert_eq!(steps[1].data(), &Value::Ints(vec![3, 4, 5]));
    }

    #[test]
    fn test_step_limit_appends_notice() {
        let mut rec = TraceRecorder::new(TraceLimits::new(3, usize::MAX));
        assert!(rec.emit("0", &0i64, Variables::new()));
        assert!(rec.emit("1", &1i64, Variables::new()));
        assert!(!rec.emit("2", &2i64, Variables::new()));
        assert!(!rec.emit("3", &3i64, Variables::new()));
        assert!(rec.is_truncated());

        let steps = rec.finish();
        assert_eq!(steps.len(), 3);
        let notice = &steps[2];
        assert_eq!(notice.id(), 2);
        assert_eq!(notice.description(), "Trace truncated after 2 steps");
        assert_eq!(notice.data(), &Value::Int(1));
        assert_eq!(get_boolean(notice, "truncated"), Some(true));
    }

    #[test]
    fn test_byte_limit_on_first_step_still_yields_a_step() {
        let mut rec = TraceRecorder::new(TraceLimits::new(100, 16));
        assert!(!rec.emit("huge", &vec![0i64; 1000], Variables::new()));

        let steps = rec.finish();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].data(), &Value::Empty);
        assert_eq!(steps[0].description(), "Trace truncated after 0 steps");
    }

    #[test]
    fn test_max_steps_has_a_floor() {
        let rec = TraceRecorder::new(TraceLimits::new(0, 1));
        assert_eq!(rec.limits().max_steps, MIN_MAX_STEPS);
    }
}
