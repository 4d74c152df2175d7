//! Demo trace generators
//!
//! A handful of small walkthroughs that exercise the generator contract end to
//! end. Each module exports a unit-struct generator and its typed input:
//!
//! - [`two_sum`]: one-pass hash map lookup
//! - [`bubble_sort`]: neighbour swaps with early exit
//! - [`binary_search`]: half-open window narrowing
//! - [`unique_paths`]: DP table over a grid
//! - [`permutations`]: recursive backtracking over a shared buffer
//!
//! [`Algorithm`] names them for the CLI and parses JSON input into a
//! [`CatalogInput`]. Parsing and clamping happen here, before any generator
//! runs; generators only ever see well-formed input.

pub mod binary_search;
pub mod bubble_sort;
pub mod permutations;
pub mod two_sum;
pub mod unique_paths;

use crate::constants::MAX_INPUT_LEN;
use crate::step::value::Value;
use crate::step::Variables;
use crate::trace::{TraceGenerator, TraceRecorder};
use binary_search::{BinarySearch, BinarySearchInput};
use bubble_sort::{BubbleSort, SortInput};
use permutations::{Permutations, PermutationsInput};
use serde::de::DeserializeOwned;
use std::fmt;
use thiserror::Error;
use two_sum::{TwoSum, TwoSumInput};
use unique_paths::{GridInput, UniquePaths};

/// Input that could not be turned into generator parameters
#[derive(Debug, Error)]
pub enum InputError {
    #[error("unknown algorithm '{name}' (run `stepscope list` to see the catalog)")]
    UnknownAlgorithm { name: String },

    #[error("invalid input for {algorithm}: {source}")]
    Json {
        algorithm: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Every generator in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    TwoSum,
    BubbleSort,
    BinarySearch,
    UniquePaths,
    Permutations,
}

/// Parsed input for one of the catalog generators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogInput {
    TwoSum(TwoSumInput),
    BubbleSort(SortInput),
    BinarySearch(BinarySearchInput),
    UniquePaths(GridInput),
    Permutations(PermutationsInput),
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::TwoSum,
        Algorithm::BubbleSort,
        Algorithm::BinarySearch,
        Algorithm::UniquePaths,
        Algorithm::Permutations,
    ];

    /// Look an algorithm up by its CLI name
    pub fn from_name(name: &str) -> Result<Self, InputError> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == name)
            .ok_or_else(|| InputError::UnknownAlgorithm {
                name: name.to_string(),
            })
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::TwoSum => TwoSum.name(),
            Algorithm::BubbleSort => BubbleSort.name(),
            Algorithm::BinarySearch => BinarySearch.name(),
            Algorithm::UniquePaths => UniquePaths.name(),
            Algorithm::Permutations => Permutations.name(),
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Algorithm::TwoSum => "find two indices whose values add up to a target",
            Algorithm::BubbleSort => "sort by swapping out-of-order neighbours",
            Algorithm::BinarySearch => "halve a sorted window until the target is found",
            Algorithm::UniquePaths => "count right/down paths through a grid with a DP table",
            Algorithm::Permutations => "enumerate orderings by choose / recurse / undo",
        }
    }

    /// Example input, as JSON
    pub fn sample_input(self) -> &'static str {
        match self {
            Algorithm::TwoSum => r#"{"nums": [2, 7, 11, 15], "target": 9}"#,
            Algorithm::BubbleSort => r#"{"values": [5, 1, 4, 2, 8]}"#,
            Algorithm::BinarySearch => r#"{"values": [1, 3, 5, 7, 9, 11], "target": 7}"#,
            Algorithm::UniquePaths => r#"{"rows": 3, "cols": 4}"#,
            Algorithm::Permutations => r#"{"items": [1, 2, 3]}"#,
        }
    }

    /// Parse JSON into this algorithm's input, clamping array lengths
    pub fn parse_input(self, json: &str) -> Result<CatalogInput, InputError> {
        let input = match self {
            Algorithm::TwoSum => {
                let mut input: TwoSumInput = self.parse_json(json)?;
                clamp_len(&mut input.nums, self);
                CatalogInput::TwoSum(input)
            }
            Algorithm::BubbleSort => {
                let mut input: SortInput = self.parse_json(json)?;
                clamp_len(&mut input.values, self);
                CatalogInput::BubbleSort(input)
            }
            Algorithm::BinarySearch => {
                let mut input: BinarySearchInput = self.parse_json(json)?;
                clamp_len(&mut input.values, self);
                CatalogInput::BinarySearch(input)
            }
            Algorithm::UniquePaths => CatalogInput::UniquePaths(self.parse_json(json)?),
            // The generator caps items itself and says so in its first step
            Algorithm::Permutations => CatalogInput::Permutations(self.parse_json(json)?),
        };
        Ok(input)
    }

    fn parse_json<T: DeserializeOwned>(self, json: &str) -> Result<T, InputError> {
        serde_json::from_str(json).map_err(|source| InputError::Json {
            algorithm: self.name(),
            source,
        })
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl CatalogInput {
    /// Which algorithm this input belongs to
    pub fn algorithm(&self) -> Algorithm {
        match self {
            CatalogInput::TwoSum(_) => Algorithm::TwoSum,
            CatalogInput::BubbleSort(_) => Algorithm::BubbleSort,
            CatalogInput::BinarySearch(_) => Algorithm::BinarySearch,
            CatalogInput::UniquePaths(_) => Algorithm::UniquePaths,
            CatalogInput::Permutations(_) => Algorithm::Permutations,
        }
    }
}

impl TraceGenerator for Algorithm {
    type Input = CatalogInput;

    fn name(&self) -> &'static str {
        Algorithm::name(*self)
    }

    fn record(&self, input: &CatalogInput, rec: &mut TraceRecorder) {
        match (self, input) {
            (Algorithm::TwoSum, CatalogInput::TwoSum(i)) => TwoSum.record(i, rec),
            (Algorithm::BubbleSort, CatalogInput::BubbleSort(i)) => BubbleSort.record(i, rec),
            (Algorithm::BinarySearch, CatalogInput::BinarySearch(i)) => {
                BinarySearch.record(i, rec)
            }
            (Algorithm::UniquePaths, CatalogInput::UniquePaths(i)) => UniquePaths.record(i, rec),
            (Algorithm::Permutations, CatalogInput::Permutations(i)) => {
                Permutations.record(i, rec)
            }
            (algorithm, other) => {
                rec.emit(
                    format!(
                        "Input for {} cannot drive {}, nothing to visualize",
                        other.algorithm(),
                        algorithm
                    ),
                    &Value::Empty,
                    Variables::new(),
                );
            }
        }
    }
}

fn clamp_len(values: &mut Vec<i64>, algorithm: Algorithm) {
    if values.len() > MAX_INPUT_LEN {
        tracing::warn!(
            algorithm = algorithm.name(),
            len = values.len(),
            max = MAX_INPUT_LEN,
            "input truncated"
        );
        values.truncate(MAX_INPUT_LEN);
    }
}
