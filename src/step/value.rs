//! Snapshot value representation
//!
//! This module defines the [`Value`] enum, which holds everything a step can
//! carry in its `data` payload or its variable bag. The set of kinds is closed
//! so renderers and the [`accessor`](crate::accessor) can pattern-match
//! instead of guessing at shapes.
//!
//! # Value Kinds
//!
//! - [`Value::Int`]: 64-bit signed integer
//! - [`Value::Float`]: 64-bit float
//! - [`Value::Bool`]: boolean flag
//! - [`Value::Text`]: owned string
//! - [`Value::Ints`]: flat array of integers (the common "array being worked on")
//! - [`Value::Grid`]: rows of integers (DP tables, matrices)
//! - [`Value::List`]: heterogeneous list
//! - [`Value::Record`]: named fields, ordered by name
//! - [`Value::Empty`]: nothing to draw
//!
//! # Freezing
//!
//! Generators never hand their working storage to a step. They pass a borrow
//! to [`Freeze::freeze`], which produces an owned copy. Later mutation of the
//! scratch buffer therefore cannot reach back into an emitted step.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Snapshot values
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    #[default]
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Ints(Vec<i64>),
    Grid(Vec<Vec<i64>>),
    List(Vec<Value>),
    Record(BTreeMap<String, Value>), // Field name -> field value
}

/// The kind tag of a [`Value`], used for typed lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Empty,
    Int,
    Float,
    Bool,
    Text,
    Ints,
    Grid,
    List,
    Record,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Empty => "empty",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
            ValueKind::Text => "text",
            ValueKind::Ints => "ints",
            ValueKind::Grid => "grid",
            ValueKind::List => "list",
            ValueKind::Record => "record",
        };
        f.write_str(name)
    }
}

impl Value {
    /// The kind tag of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Empty => ValueKind::Empty,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Text(_) => ValueKind::Text,
            Value::Ints(_) => ValueKind::Ints,
            Value::Grid(_) => ValueKind::Grid,
            Value::List(_) => ValueKind::List,
            Value::Record(_) => ValueKind::Record,
        }
    }

    /// Check if this value carries anything
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Get the integer value, returns None if not an Int
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Get a numeric value. Ints and Floats both count as numbers;
    /// nothing else is converted.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_ints(&self) -> Option<&[i64]> {
        match self {
            Value::Ints(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_grid(&self) -> Option<&[Vec<i64>]> {
        match self {
            Value::Grid(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Look up a field of a Record, returns None for other kinds
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_record().and_then(|fields| fields.get(name))
    }

    /// Estimate the memory usage of this value in bytes
    pub fn estimated_size(&self) -> usize {
        // Rough: scalars count as one word, containers add their elements
        match self {
            Value::Empty | Value::Int(_) | Value::Float(_) | Value::Bool(_) => 8,
            Value::Text(s) => 24 + s.len(),
            Value::Ints(v) => 24 + v.len() * 8,
            Value::Grid(rows) => 24 + rows.iter().map(|r| 24 + r.len() * 8).sum::<usize>(),
            Value::List(items) => 24 + items.iter().map(Value::estimated_size).sum::<usize>(),
            Value::Record(fields) => {
                24 + fields
                    .iter()
                    .map(|(k, v)| 24 + k.len() + v.estimated_size())
                    .sum::<usize>()
            }
        }
    }
}

/// Produce an owned [`Value`] copy of some working state.
///
/// Implemented for the scalar and array shapes generators work with. The
/// recorder only accepts data through this trait.
pub trait Freeze {
    fn freeze(&self) -> Value;
}

impl<T: Freeze + ?Sized> Freeze for &T {
    fn freeze(&self) -> Value {
        (**self).freeze()
    }
}

impl Freeze for Value {
    fn freeze(&self) -> Value {
        self.clone()
    }
}

impl Freeze for i64 {
    fn freeze(&self) -> Value {
        Value::Int(*self)
    }
}

impl Freeze for i32 {
    fn freeze(&self) -> Value {
        Value::Int(i64::from(*self))
    }
}

impl Freeze for usize {
    fn freeze(&self) -> Value {
        Value::Int(usize_to_i64(*self))
    }
}

impl Freeze for f64 {
    fn freeze(&self) -> Value {
        Value::Float(*self)
    }
}

impl Freeze for bool {
    fn freeze(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Freeze for str {
    fn freeze(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl Freeze for String {
    fn freeze(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl Freeze for [i64] {
    fn freeze(&self) -> Value {
        Value::Ints(self.to_vec())
    }
}

impl Freeze for Vec<i64> {
    fn freeze(&self) -> Value {
        self.as_slice().freeze()
    }
}

impl Freeze for [usize] {
    fn freeze(&self) -> Value {
        Value::Ints(self.iter().map(|&i| usize_to_i64(i)).collect())
    }
}

impl Freeze for Vec<usize> {
    fn freeze(&self) -> Value {
        self.as_slice().freeze()
    }
}

impl Freeze for [bool] {
    fn freeze(&self) -> Value {
        Value::List(self.iter().map(|&b| Value::Bool(b)).collect())
    }
}

impl Freeze for Vec<bool> {
    fn freeze(&self) -> Value {
        self.as_slice().freeze()
    }
}

impl Freeze for [Vec<i64>] {
    fn freeze(&self) -> Value {
        Value::Grid(self.to_vec())
    }
}

impl Freeze for Vec<Vec<i64>> {
    fn freeze(&self) -> Value {
        self.as_slice().freeze()
    }
}

impl Freeze for (usize, usize) {
    fn freeze(&self) -> Value {
        Value::Ints(vec![usize_to_i64(self.0), usize_to_i64(self.1)])
    }
}

impl<T: Freeze> Freeze for Option<T> {
    fn freeze(&self) -> Value {
        match self {
            Some(v) => v.freeze(),
            None => Value::Empty,
        }
    }
}

impl<V: Freeze> Freeze for BTreeMap<String, V> {
    fn freeze(&self) -> Value {
        Value::Record(self.iter().map(|(k, v)| (k.clone(), v.freeze())).collect())
    }
}

fn usize_to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
