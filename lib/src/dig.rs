//! Nested access over `Value` trees.

use crate::error::{DictError, Result};
use crate::{Dict, List, Value};

/// A value that can hand out a child for one path segment.
pub trait Dig {
    /// Child addressed by `segment`, `Ok(None)` when nothing is there, or
    /// `NotDiggable` when `segment` has the wrong type for this container.
    /// `depth` is the segment's index in the whole path.
    fn dig_step(&self, segment: &Value, depth: usize) -> Result<Option<&Value>>;
}

impl Dig for Dict<Value, Value> {
    fn dig_step(&self, segment: &Value, _depth: usize) -> Result<Option<&Value>> {
        Ok(self.get(segment))
    }
}

/// Lists take integer segments; negative ones count from the end.
impl Dig for List<Value> {
    fn dig_step(&self, segment: &Value, depth: usize) -> Result<Option<&Value>> {
        match segment {
            Value::Int(i) => Ok(self.at(*i)),
            _ => Err(DictError::NotDiggable {
                type_name: "list",
                depth,
            }),
        }
    }
}

impl Value {
    pub fn as_dig(&self) -> Option<&dyn Dig> {
        match self {
            Value::Dict(d) => Some(d as &dyn Dig),
            Value::List(l) => Some(l as &dyn Dig),
            _ => None,
        }
    }

    /// Walk `path` starting at this value. `Nil` yields `Ok(None)`; any other
    /// scalar with a non-empty path is `NotDiggable` at segment 0.
    pub fn dig(&self, path: &[Value]) -> Result<Option<&Value>> {
        match self.as_dig() {
            Some(root) => dig_path(root, path),
            None if path.is_empty() || self.is_nil() => Ok(None),
            None => Err(DictError::NotDiggable {
                type_name: self.type_name(),
                depth: 0,
            }),
        }
    }
}

impl Dict<Value, Value> {
    /// Follow `path` one level per segment.
    ///
    /// Returns `Ok(None)` as soon as a segment misses or lands on `Nil`, and
    /// `NotDiggable` when a segment other than the last lands on any other
    /// scalar.
    pub fn dig(&self, path: &[Value]) -> Result<Option<&Value>> {
        dig_path(self, path)
    }
}

/// Walk `path` from `root`. An empty path yields `Ok(None)`.
pub fn dig_path<'a>(root: &'a dyn Dig, path: &[Value]) -> Result<Option<&'a Value>> {
    let Some((first, rest)) = path.split_first() else {
        return Ok(None);
    };
    let Some(mut current) = root.dig_step(first, 0)? else {
        return Ok(None);
    };
    for (i, segment) in rest.iter().enumerate() {
        if current.is_nil() {
            return Ok(None);
        }
        let depth = i + 1;
        let container = current.as_dig().ok_or(DictError::NotDiggable {
            type_name: current.type_name(),
            depth,
        })?;
        match container.dig_step(segment, depth)? {
            Some(next) => current = next,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}
