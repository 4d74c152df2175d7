//! Binary search over a half-open window

use crate::step::{Highlight, Variables};
use crate::trace::{TraceGenerator, TraceRecorder};
use serde::Deserialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct BinarySearchInput {
    pub values: Vec<i64>,
    pub target: i64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySearch;

impl TraceGenerator for BinarySearch {
    type Input = BinarySearchInput;

    fn name(&self) -> &'static str {
        "binary-search"
    }

    fn record(&self, input: &BinarySearchInput, rec: &mut TraceRecorder) {
        let target = input.target;
        let mut values = input.values.clone();

        if values.is_empty() {
            rec.emit(
                "Input is empty, nothing to search",
                &values,
                Variables::new().with("target", target),
            );
            return;
        }

        if values.windows(2).any(|w| w[0] > w[1]) {
            values.sort_unstable();
            rec.emit(
                format!("Input is not sorted; searching the sorted copy {:?}", values),
                &values,
                Variables::new().with("target", target),
            );
        } else {
            rec.emit(
                format!("Search {:?} for {}", values, target),
                &values,
                Variables::new().with("target", target),
            );
        }

        let (mut lo, mut hi) = (0usize, values.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let window = Variables::new()
                .with("lo", lo)
                .with("hi", hi)
                .with("mid", mid)
                .with("target", target);
            rec.emit_highlighted(
                format!(
                    "Window [{}, {}) has {} value(s); probe the middle, index {}",
                    lo,
                    hi,
                    hi - lo,
                    mid
                ),
                &values,
                window.clone(),
                Highlight::indices([mid]),
            );

            match values[mid].cmp(&target) {
                Ordering::Equal => {
                    rec.emit_highlighted(
                        format!("values[{}] = {} is the target", mid, target),
                        &values,
                        window.with("result", mid),
                        Highlight::indices([mid]),
                    );
                    return;
                }
                Ordering::Less => {
                    rec.emit_highlighted(
                        format!(
                            "values[{}] = {} < {}: discard the left half",
                            mid, values[mid], target
                        ),
                        &values,
                        window,
                        Highlight::indices(lo..=mid),
                    );
                    lo = mid + 1;
                }
                Ordering::Greater => {
                    rec.emit_highlighted(
                        format!(
                            "values[{}] = {} > {}: discard the right half",
                            mid, values[mid], target
                        ),
                        &values,
                        window,
                        Highlight::indices(mid..hi),
                    );
                    hi = mid;
                }
            }
        }

        rec.emit(
            format!(
                "{} is not present; it would be inserted at index {}",
                target, lo
            ),
            &values,
            Variables::new()
                .with("insertion_point", lo)
                .with("target", target),
        );
    }
}
