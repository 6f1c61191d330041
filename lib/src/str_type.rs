use std::fmt::{Debug, Display, Formatter, Result};
use std::ops::Deref;
use std::sync::Arc;

/// Immutable, reference-counted string used for dictionary keys and values.
///
/// Wraps `Arc<str>`, so cloning a dictionary that holds `Str` values shares
/// the text instead of copying it. Derefs to `&str`.
#[derive(Clone, Eq, Hash, PartialOrd, Ord)]
pub struct Str(pub Arc<str>);

impl Deref for Str {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Display for Str {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", &*self.0)
    }
}

impl Debug for Str {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl PartialEq for Str {
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl PartialEq<&str> for Str {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl From<&str> for Str {
    fn from(s: &str) -> Self {
        Str(Arc::from(s))
    }
}

impl From<String> for Str {
    fn from(s: String) -> Self {
        Str(Arc::from(s))
    }
}

impl Str {
    /// Uppercase the first character and lowercase the rest.
    pub fn capitalize(&self) -> Str {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => {
                let mut out: String = first.to_uppercase().collect();
                out.push_str(&chars.as_str().to_lowercase());
                Str::from(out)
            }
            None => self.clone(),
        }
    }

    pub fn into_inner(self) -> Arc<str> {
        self.0
    }

    /// True when both handles point at the same allocation.
    pub fn shares_with(&self, other: &Str) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Construct a `Str` from any `Display` value.
pub fn str<T: std::fmt::Display>(x: T) -> Str {
    Str::from(x.to_string())
}
