//! Permutations by backtracking
//!
//! The recursion shares one `path` buffer and one `used` mask across all
//! frames and mutates them in place. Each emit freezes both at that instant,
//! so later choices never rewrite earlier steps.

use crate::constants::MAX_PERMUTATION_ITEMS;
use crate::step::value::{Freeze, Value};
use crate::step::{Highlight, Variables};
use crate::trace::{TraceGenerator, TraceRecorder};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct PermutationsInput {
    pub items: Vec<i64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Permutations;

struct Search<'a> {
    items: &'a [i64],
    path: Vec<i64>,
    used: Vec<bool>,
    found: usize,
}

impl Search<'_> {
    fn snapshot(&self) -> Value {
        let mut fields = BTreeMap::new();
        fields.insert("items".to_string(), self.items.freeze());
        fields.insert("path".to_string(), self.path.freeze());
        Value::Record(fields)
    }

    fn variables(&self) -> Variables {
        Variables::new()
            .with("depth", self.path.len())
            .with("used", &self.used)
            .with("found", self.found)
    }

    fn backtrack(&mut self, rec: &mut TraceRecorder) {
        if rec.is_truncated() {
            return;
        }
        if self.path.len() == self.items.len() {
            self.found += 1;
            rec.emit(
                format!("Permutation #{}: {:?}", self.found, self.path),
                &self.snapshot(),
                self.variables().with("permutation", &self.path),
            );
            return;
        }

        for i in 0..self.items.len() {
            if self.used[i] {
                continue;
            }
            let item = self.items[i];
            self.used[i] = true;
            self.path.push(item);
            rec.emit_highlighted(
                format!("Choose {} for position {}", item, self.path.len() - 1),
                &self.snapshot(),
                self.variables(),
                Highlight::indices([i]),
            );

            self.backtrack(rec);

            self.path.pop();
            self.used[i] = false;
            if rec.is_truncated() {
                return;
            }
            rec.emit_highlighted(
                format!("Undo {}: back to depth {}", item, self.path.len()),
                &self.snapshot(),
                self.variables(),
                Highlight::indices([i]),
            );
        }
    }
}

impl TraceGenerator for Permutations {
    type Input = PermutationsInput;

    fn name(&self) -> &'static str {
        "permutations"
    }

    fn record(&self, input: &PermutationsInput, rec: &mut TraceRecorder) {
        if input.items.is_empty() {
            rec.emit(
                "No items: the only permutation is the empty one",
                &input.items,
                Variables::new().with("result", 1usize),
            );
            return;
        }

        let items = &input.items[..input.items.len().min(MAX_PERMUTATION_ITEMS)];
        let mut search = Search {
            items,
            path: Vec::with_capacity(items.len()),
            used: vec![false; items.len()],
            found: 0,
        };

        let intro = if items.len() < input.items.len() {
            format!(
                "Only the first {} items are used; build every ordering of {:?}",
                items.len(),
                items
            )
        } else {
            format!("Build every ordering of {:?} one choice at a time", items)
        };
        rec.emit(intro, &search.snapshot(), search.variables());

        search.backtrack(rec);

        rec.emit(
            format!("Generated {} permutation(s)", search.found),
            &search.snapshot(),
            Variables::new().with("result", search.found),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::{get_int, get_ints};
    use crate::trace::{generate, generate_with_limits, TraceLimits};

    #[test]
    fn test_counts_all_orderings() {
        let input = PermutationsInput {
            items: vec![1, 2, 3],
        };
        let steps = generate(&Permutations, &input);
        assert_eq!(get_int(steps.last().unwrap(), "result"), Some(6));

        let found: Vec<&[i64]> = steps
            .iter()
            .filter_map(|s| get_ints(s, "permutation"))
            .collect();
        assert_eq!(found.len(), 6);
        assert_eq!(found[0], &[1i64, 2, 3][..]);
        assert_eq!(found[5], &[3i64, 2, 1][..]);
    }

    #[test]
    fn test_earlier_paths_survive_backtracking() {
        let input = PermutationsInput { items: vec![4, 5] };
        let steps = generate(&Permutations, &input);
        let paths: Vec<Vec<i64>> = steps
            .iter()
            .filter_map(|s| s.data().field("path"))
            .filter_map(|p| p.as_ints().map(<[i64]>::to_vec))
            .collect();
        // intro, choose 4, choose 5, found, undo 5, undo 4, choose 5, choose 4, found, undo 4, undo 5, summary
        assert_eq!(
            paths,
            vec![
                vec![],
                vec![4],
                vec![4, 5],
                vec![4, 5],
                vec![4],
                vec![],
                vec![5],
                vec![5, 4],
                vec![5, 4],
                vec![5],
                vec![],
                vec![],
            ]
        );
    }

    #[test]
    fn test_items_are_capped() {
        let input = PermutationsInput {
            items: (0..9).collect(),
        };
        let steps = generate(&Permutations, &input);
        assert!(steps[0].description().starts_with("Only the first 5 items"));
        assert_eq!(get_int(steps.last().unwrap(), "result"), Some(120));
    }

    #[test]
    fn test_recursion_stops_when_truncated() {
        let input = PermutationsInput {
            items: vec![1, 2, 3, 4],
        };
        let steps = generate_with_limits(&Permutations, &input, TraceLimits::new(10, usize::MAX));
        assert_eq!(steps.len(), 10);
        assert!(steps[9].description().starts_with("Trace truncated"));
    }

    #[test]
    fn test_empty_items() {
        let steps = generate(&Permutations, &PermutationsInput::default());
        assert_eq!(steps.len(), 1);
    }
}
