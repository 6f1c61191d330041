use std::fmt::Debug;
use std::fmt::{Display, Formatter, Result};
use std::ops::{Deref, DerefMut};

/// Growable, ordered sequence.
///
/// Batch lookups on `Dict` (`values_at`, `fetch_values`, `keys`, ...) return
/// their results as a `List`, and nested data uses `List<Value>` for arrays.
/// Derefs to `Vec<T>` so all standard vector methods are available.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct List<T>(pub Vec<T>);

impl<T> Deref for List<T> {
    type Target = Vec<T>;
    fn deref(&self) -> &Vec<T> {
        &self.0
    }
}

impl<T> DerefMut for List<T> {
    fn deref_mut(&mut self) -> &mut Vec<T> {
        &mut self.0
    }
}

impl<T: Debug> Display for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{:?}", self.0)
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(v: Vec<T>) -> Self {
        List(v)
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        List(iter.into_iter().collect())
    }
}

impl<T> List<T> {
    pub fn new() -> Self {
        List(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Element at `index`; negative indices count back from the end.
    pub fn at(&self, index: i64) -> Option<&T> {
        let len = self.0.len() as i64;
        let resolved = if index < 0 { len + index } else { index };
        if resolved < 0 {
            return None;
        }
        self.0.get(resolved as usize)
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> List<U> {
        List(self.0.into_iter().map(f).collect())
    }
}

impl<T: PartialEq> List<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.0.contains(value)
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}
