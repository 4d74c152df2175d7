//! Step records
//!
//! A [`Step`] is one immutable snapshot in an algorithm's trace:
//! - `id`: strictly increasing within a trace, starting at 0
//! - `description`: non-empty narration of what just happened
//! - `data`: an owned [`Value`] the renderer draws
//! - `variables`: named values surfaced for inspection ([`Variables`])
//! - `highlight`: optional advisory emphasis ([`Highlight`])
//!
//! Fields are private; once a step exists it can only be read.
//!
//! # Absent Variables
//!
//! A variable that does not apply at a step is simply missing from the bag.
//! [`Variables::insert`] with [`Value::Empty`] removes the key instead of
//! storing an explicit null, so "absent" has exactly one representation.

pub mod value;

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use value::{Freeze, Value};

/// Named values visible at one step, ordered by name
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Variables(BTreeMap<String, Value>);

impl Variables {
    pub fn new() -> Self {
        Variables(BTreeMap::new())
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, name: impl Into<String>, value: impl Freeze) -> Self {
        self.insert(name, value);
        self
    }

    /// Freeze `value` under `name`. An empty value removes the key.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Freeze) {
        let name = name.into();
        match value.freeze() {
            Value::Empty => {
                self.0.remove(&name);
            }
            frozen => {
                self.0.insert(name, frozen);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn estimated_size(&self) -> usize {
        self.0
            .iter()
            .map(|(k, v)| 24 + k.len() + v.estimated_size())
            .sum()
    }
}

impl FromIterator<(String, Value)> for Variables {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut vars = Variables::new();
        for (name, value) in iter {
            vars.insert(name, value);
        }
        vars
    }
}

// Goes through `insert`, so `"empty"` in JSON reads back as a missing key
impl<'de> Deserialize<'de> for Variables {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}

/// Advisory emphasis for the renderer. Never needed for correctness.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Highlight {
    /// Array indices
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indices: Vec<usize>,
    /// Grid cells as (row, col)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cells: Vec<(usize, usize)>,
    /// Node ids (trees, graphs)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<u64>,
}

impl Highlight {
    pub fn indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Highlight {
            indices: indices.into_iter().collect(),
            ..Highlight::default()
        }
    }

    pub fn cells(cells: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Highlight {
            cells: cells.into_iter().collect(),
            ..Highlight::default()
        }
    }

    pub fn nodes(nodes: impl IntoIterator<Item = u64>) -> Self {
        Highlight {
            nodes: nodes.into_iter().collect(),
            ..Highlight::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty() && self.cells.is_empty() && self.nodes.is_empty()
    }

    pub fn has_index(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn has_cell(&self, row: usize, col: usize) -> bool {
        self.cells.contains(&(row, col))
    }
}

/// One immutable snapshot of an algorithm's execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    id: u64,
    description: String,
    data: Value,
    #[serde(default)]
    variables: Variables,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    highlight: Option<Highlight>,
}

impl Step {
    /// Create a step, freezing `data` into an owned copy
    pub fn new(id: u64, description: impl Into<String>, data: &(impl Freeze + ?Sized)) -> Self {
        Step {
            id,
            description: description.into(),
            data: data.freeze(),
            variables: Variables::new(),
            highlight: None,
        }
    }

    pub fn with_variables(mut self, variables: Variables) -> Self {
        self.variables = variables;
        self
    }

    /// Attach emphasis. An empty highlight is dropped.
    pub fn with_highlight(mut self, highlight: Highlight) -> Self {
        self.highlight = (!highlight.is_empty()).then_some(highlight);
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    /// Whether two steps show the same content, ignoring ids and highlight
    pub fn same_content(&self, other: &Step) -> bool {
        self.description == other.description
            && self.data == other.data
            && self.variables == other.variables
    }

    /// Estimate the memory usage of this step in bytes
    pub fn estimated_size(&self) -> usize {
        let highlight_size = self.highlight.as_ref().map_or(0, |h| {
            (h.indices.len() + h.nodes.len()) * 8 + h.cells.len() * 16
        });
        32 + self.description.len()
            + self.data.estimated_size()
            + self.variables.estimated_size()
            + highlight_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_means_absent() {
        let mut vars = Variables::new().with("lo", 0i64).with("hi", 4i64);
        vars.insert("hi", Value::Empty);
        vars.insert("mid", None::<i64>);

        assert!(vars.contains("lo"));
        assert!(!vars.contains("hi"));
        assert!(!vars.contains("mid"));
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn test_json_empty_reads_back_as_absent() {
        let json = r#"{"id":0,"description":"look","data":"empty","variables":{"lo":"empty","hi":{"int":4}}}"#;
        let step: Step = serde_json::from_str(json).unwrap();
        assert!(!step.variables().contains("lo"));
        assert_eq!(step.variables().get("hi"), Some(&Value::Int(4)));

        let again: Step = serde_json::from_str(&serde_json::to_string(&step).unwrap()).unwrap();
        assert_eq!(again, step);
        assert_eq!(again.variables().len(), 1);
    }

    #[test]
    fn test_node_highlight() {
        let highlight = Highlight::nodes([7, 3]);
        assert!(!highlight.is_empty());
        assert!(!highlight.has_index(7));

        let json = serde_json::to_string(&highlight).unwrap();
        assert_eq!(json, r#"{"nodes":[7,3]}"#);
    }

    #[test]
    fn test_empty_highlight_is_dropped() {
        let step = Step::new(0, "start", &Value::Empty).with_highlight(Highlight::default());
        assert!(step.highlight().is_none());

        let step = Step::new(1, "look", &Value::Empty).with_highlight(Highlight::indices([2]));
        assert!(step.highlight().is_some_and(|h| h.has_index(2)));
    }

    #[test]
    fn test_step_json_shape() {
        let step = Step::new(3, "swap", &vec![2i64, 1])
            .with_variables(Variables::new().with("j", 0usize))
            .with_highlight(Highlight::indices([0, 1]));

        let json = serde_json::to_string(&step).unwrap();
        assert_eq!(
            json,
            r#"{"id":3,"description":"swap","data":{"ints":[2,1]},"variables":{"j":{"int":0}},"highlight":{"indices":[0,1]}}"#
        );

        let back: Step = serde_json::from_str(&json).unwrap();
        assert_eq!(back, step);
    }

    #[test]
    fn test_same_content_ignores_id() {
        let a = Step::new(0, "x", &1i64);
        let b = Step::new(7, "x", &1i64);
        assert!(a.same_content(&b));
        assert_ne!(a, b);
    }
}
