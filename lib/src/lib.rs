//! Insertion-ordered dictionary with scripting-language hash behaviors.
//!
//! [`Dict<K, V>`] keeps keys in insertion order, answers missing keys through
//! an optional [`DefaultPolicy`], and offers merging, inversion, filtering and
//! strict/lenient batch lookups. [`Value`] gives nested, heterogeneous data a
//! concrete shape so that [`Dict::dig`] can walk it.
//!
//! `List<T>` and `Str` are thin newtypes shared by those APIs. Each derefs to
//! the type it wraps and hands it back through `into_inner()`.

mod default_policy;
mod dict;
mod dig;
mod error;
mod list;
mod macros;
mod str_type;
mod value;

pub use default_policy::{DefaultPolicy, Generator};
pub use dict::Dict;
pub use dig::{Dig, dig_path};
pub use error::{DictError, Result};
pub use list::List;
pub use str_type::{Str, str};
pub use value::Value;
