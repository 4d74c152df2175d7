//! Fail-soft variable lookup for renderers
//!
//! Every function here returns `None` when the variable is missing or holds a
//! different kind. Nothing is coerced: the text `"3"` is not the number `3`.
//! Ints and Floats are both numbers, so [`get_number`] accepts either.

use crate::step::value::{Value, ValueKind};
use crate::step::Step;

/// The raw value of `name`, whatever its kind
pub fn get_raw<'a>(step: &'a Step, name: &str) -> Option<&'a Value> {
    step.variables().get(name)
}

/// The value of `name` if it is of `kind`
pub fn get_typed<'a>(step: &'a Step, name: &str, kind: ValueKind) -> Option<&'a Value> {
    get_raw(step, name).filter(|v| v.kind() == kind)
}

pub fn get_number(step: &Step, name: &str) -> Option<f64> {
    get_raw(step, name).and_then(Value::as_number)
}

pub fn get_int(step: &Step, name: &str) -> Option<i64> {
    get_raw(step, name).and_then(Value::as_int)
}

pub fn get_boolean(step: &Step, name: &str) -> Option<bool> {
    get_raw(step, name).and_then(Value::as_bool)
}

pub fn get_string<'a>(step: &'a Step, name: &str) -> Option<&'a str> {
    get_raw(step, name).and_then(Value::as_text)
}

pub fn get_ints<'a>(step: &'a Step, name: &str) -> Option<&'a [i64]> {
    get_raw(step, name).and_then(Value::as_ints)
}

pub fn get_grid<'a>(step: &'a Step, name: &str) -> Option<&'a [Vec<i64>]> {
    get_raw(step, name).and_then(Value::as_grid)
}
