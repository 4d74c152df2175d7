//! Bubble sort with early exit

use crate::step::{Highlight, Variables};
use crate::trace::{TraceGenerator, TraceRecorder};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SortInput {
    pub values: Vec<i64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleSort;

impl TraceGenerator for BubbleSort {
    type Input = SortInput;

    fn name(&self) -> &'static str {
        "bubble-sort"
    }

    fn record(&self, input: &SortInput, rec: &mut TraceRecorder) {
        let mut values = input.values.clone();
        let n = values.len();

        if n == 0 {
            rec.emit("Input is empty, nothing to sort", &values, Variables::new());
            return;
        }
        if n == 1 {
            rec.emit(
                "A single element is already sorted",
                &values,
                Variables::new().with("result", &values),
            );
            return;
        }

        rec.emit(
            format!("Sort {} values by repeatedly swapping neighbours", n),
            &values,
            Variables::new().with("n", n),
        );

        let mut swaps = 0usize;
        for pass in 0..n - 1 {
            let mut swapped = false;
            let sorted_from = n - pass;

            for j in 0..sorted_from - 1 {
                let (a, b) = (values[j], values[j + 1]);
                let out_of_order = a > b;
                rec.emit_highlighted(
                    format!(
                        "Compare {} and {}: {}",
                        a,
                        b,
                        if out_of_order { "out of order" } else { "in order" }
                    ),
                    &values,
                    Variables::new()
                        .with("pass", pass)
                        .with("j", j)
                        .with("swaps", swaps)
                        .with("sorted_from", sorted_from),
                    Highlight::indices([j, j + 1]),
                );

                if out_of_order {
                    values.swap(j, j + 1);
                    swaps += 1;
                    swapped = true;
                    rec.emit_highlighted(
                        format!("Swap: {} moves right, {} moves left", a, b),
                        &values,
                        Variables::new()
                            .with("pass", pass)
                            .with("j", j)
                            .with("swaps", swaps)
                            .with("sorted_from", sorted_from),
                        Highlight::indices([j, j + 1]),
                    );
                }
            }

            if !swapped {
                rec.emit(
                    format!("Pass {} made no swaps, so the array is sorted", pass + 1),
                    &values,
                    Variables::new().with("pass", pass).with("swaps", swaps),
                );
                break;
            }

            let settled = sorted_from - 1;
            rec.emit_highlighted(
                format!(
                    "Pass {} done: {} has bubbled into place",
                    pass + 1,
                    values[settled]
                ),
                &values,
                Variables::new()
                    .with("pass", pass)
                    .with("swaps", swaps)
                    .with("sorted_from", settled),
                Highlight::indices(settled..n),
            );
        }

        rec.emit_highlighted(
            format!("Sorted with {} swap(s): {:?}", swaps, values),
            &values,
            Variables::new().with("result", &values).with("swaps", swaps),
            Highlight::indices(0..n),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::{get_int, get_ints};
    use crate::step::value::Value;
    use crate::trace::generate;

    #[test]
    fn test_sorts_and_counts_swaps() {
        let input = SortInput {
            values: vec![5, 1, 4, 2, 8],
        };
        let steps = generate(&BubbleSort, &input);
        let last = steps.last().unwrap();
        assert_eq!(get_ints(last, "result"), Some(&[1i64, 2, 4, 5, 8][..]));
        assert_eq!(get_int(last, "swaps"), Some(4));
        assert_eq!(steps[0].data(), &Value::Ints(vec![5, 1, 4, 2, 8]));
    }

    #[test]
    fn test_swap_is_shown_before_and_after() {
        let input = SortInput {
            values: vec![2, 1],
        };
        let steps = generate(&BubbleSort, &input);
        let descriptions: Vec<&str> = steps.iter().map(|s| s.description()).collect();
        assert_eq!(
            descriptions,
            vec![
                "Sort 2 values by repeatedly swapping neighbours",
                "Compare 2 and 1: out of order",
                "Swap: 2 moves right, 1 moves left",
                "Pass 1 done: 2 has bubbled into place",
                "Sorted with 1 swap(s): [1, 2]",
            ]
        );
        assert_eq!(steps[1].data(), &Value::Ints(vec![2, 1]));
        assert_eq!(steps[2].data(), &Value::Ints(vec![1, 2]));
    }

    #[test]
    fn test_sorted_input_exits_after_one_pass() {
        let input = SortInput {
            values: vec![1, 2, 3, 4],
        };
        let steps = generate(&BubbleSort, &input);
        assert!(steps
            .iter()
            .any(|s| s.description() == "Pass 1 made no swaps, so the array is sorted"));
        assert_eq!(get_int(steps.last().unwrap(), "swaps"), Some(0));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(generate(&BubbleSort, &SortInput::default()).len(), 1);
        let single = generate(&BubbleSort, &SortInput { values: vec![7] });
        assert_eq!(single.len(), 1);
        assert_eq!(get_ints(&single[0], "result"), Some(&[7i64][..]));
    }
}
