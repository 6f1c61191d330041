use std::fmt::Debug;

use thiserror::Error;

/// Failures surfaced by strict dictionary operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictError {
    /// A strict lookup found no entry and had no substitute.
    /// `key` holds the `Debug` rendering of the missing key.
    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    /// `dig` met a non-nil scalar mid-path, or a non-integer segment on a list.
    #[error("cannot dig into {type_name} value at path segment {depth}")]
    NotDiggable { type_name: &'static str, depth: usize },

    /// A flat key/value list had an odd number of elements.
    #[error("odd number of arguments for Dict ({len})")]
    MalformedInput { len: usize },
}

impl DictError {
    pub fn key_not_found<K: Debug + ?Sized>(key: &K) -> Self {
        DictError::KeyNotFound {
            key: format!("{key:?}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, DictError>;
