//! Two-sum with a one-pass hash map

use crate::step::value::Value;
use crate::step::{Highlight, Variables};
use crate::trace::{TraceGenerator, TraceRecorder};
use rustc_hash::FxHashMap;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct TwoSumInput {
    pub nums: Vec<i64>,
    pub target: i64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TwoSum;

impl TraceGenerator for TwoSum {
    type Input = TwoSumInput;

    fn name(&self) -> &'static str {
        "two-sum"
    }

    fn record(&self, input: &TwoSumInput, rec: &mut TraceRecorder) {
        let nums = &input.nums;
        let target = input.target;

        if nums.is_empty() {
            rec.emit(
                "Input is empty, nothing to visualize",
                nums,
                Variables::new().with("target", target),
            );
            return;
        }

        rec.emit(
            format!("Looking for two numbers in {:?} that sum to {}", nums, target),
            nums,
            Variables::new().with("target", target),
        );

        // value -> index of its latest occurrence
        let mut seen: FxHashMap<i64, usize> = FxHashMap::default();

        for (i, &num) in nums.iter().enumerate() {
            // None when target - num does not fit in an i64
            let complement = target.checked_sub(num);
            let description = match complement {
                Some(c) => format!("Check nums[{}] = {}: its complement is {}", i, num, c),
                None => format!(
                    "Check nums[{}] = {}: no 64-bit value can complete {}",
                    i, num, target
                ),
            };
            rec.emit_highlighted(
                description,
                nums,
                Variables::new()
                    .with("i", i)
                    .with("num", num)
                    .with("complement", complement)
                    .with("seen", seen_record(&seen)),
                Highlight::indices([i]),
            );

            if let Some((c, &j)) = complement.and_then(|c| seen.get(&c).map(|j| (c, j))) {
                rec.emit_highlighted(
                    format!("Found complement {} at index {}", c, j),
                    nums,
                    Variables::new()
                        .with("i", i)
                        .with("j", j)
                        .with("result", (j, i)),
                    Highlight::indices([j, i]),
                );
                rec.emit_highlighted(
                    format!(
                        "Answer: indices [{}, {}] ({} + {} = {})",
                        j, i, nums[j], num, target
                    ),
                    nums,
                    Variables::new().with("result", (j, i)).with("target", target),
                    Highlight::indices([j, i]),
                );
                return;
            }

            seen.insert(num, i);
            rec.emit(
                format!("{} has no partner yet; remember it at index {}", num, i),
                nums,
                Variables::new().with("i", i).with("seen", seen_record(&seen)),
            );
        }

        rec.emit(
            format!("No two numbers sum to {}", target),
            nums,
            Variables::new().with("target", target),
        );
    }
}

/// The seen-map as a record keyed by value
fn seen_record(seen: &FxHashMap<i64, usize>) -> Value {
    Value::Record(
        seen.iter()
            .map(|(k, &v)| (k.to_string(), Value::Int(v as i64)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::{get_ints, get_raw};
    use crate::trace::generate;

    #[test]
    fn test_finds_pair() {
        let input = TwoSumInput {
            nums: vec![2, 7, 11, 15],
            target: 9,
        };
        let steps = generate(&TwoSum, &input);
        assert!(steps.len() >= 3);
        let last = steps.last().unwrap();
        assert_eq!(get_ints(last, "result"), Some(&[0i64, 1][..]));
        assert!(last.highlight().is_some_and(|h| h.has_index(0) && h.has_index(1)));
    }

    #[test]
    fn test_no_pair() {
        let input = TwoSumInput {
            nums: vec![1, 2, 3],
            target: 100,
        };
        let steps = generate(&TwoSum, &input);
        let last = steps.last().unwrap();
        assert_eq!(last.description(), "No two numbers sum to 100");
        assert_eq!(get_raw(last, "result"), None);
    }

    #[test]
    fn test_overflowing_complement_is_never_matched() {
        let input = TwoSumInput {
            nums: vec![i64::MAX, i64::MAX],
            target: -2,
        };
        let steps = generate(&TwoSum, &input);
        let last = steps.last().unwrap();
        assert_eq!(last.description(), "No two numbers sum to -2");
        assert!(steps.iter().all(|s| get_raw(s, "result").is_none()));
        assert_eq!(get_raw(&steps[1], "complement"), None);
    }

    #[test]
    fn test_empty_input_is_one_step() {
        let steps = generate(&TwoSum, &TwoSumInput::default());
        assert_eq!(steps.len(), 1);
        assert!(steps[0].description().contains("empty"));
        assert_eq!(get_raw(&steps[0], "result"), None);
    }

    #[test]
    fn test_seen_map_is_shown_in_order() {
        let mut seen = FxHashMap::default();
        seen.insert(10, 0);
        seen.insert(-3, 1);
        let record = seen_record(&seen);
        let keys: Vec<&str> = record
            .as_record()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["-3", "10"]);
    }
}
