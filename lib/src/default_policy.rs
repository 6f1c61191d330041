//! Default-value policies for missing keys.
//!
//! A `Dict` never inserts on its own when a key is missing. The policy is
//! evaluated and its result returned; only a generator that writes through the
//! `&mut Dict` handle it receives changes the container. [`DefaultPolicy::persisting`]
//! is the stock generator that does exactly that.

use std::fmt::{self, Debug, Formatter};
use std::hash::Hash;
use std::rc::Rc;

use log::trace;

use crate::Dict;

/// Callback invoked with the container and the missing key.
pub type Generator<K, V> = Rc<dyn Fn(&mut Dict<K, V>, &K) -> V>;

/// Rule used to produce a value for a key that has no entry.
pub enum DefaultPolicy<K, V> {
    /// Always answer with a copy of this value. Held behind `Rc` so that
    /// `Dict<Value, Value>` can nest inside `Value`.
    Constant(Rc<V>),
    /// Compute the answer from the container and the key.
    Generator(Generator<K, V>),
}

impl<K, V> DefaultPolicy<K, V> {
    pub fn constant(value: V) -> Self {
        DefaultPolicy::Constant(Rc::new(value))
    }

    /// A generator that leaves persistence up to `f`.
    pub fn generator<F>(f: F) -> Self
    where
        F: Fn(&mut Dict<K, V>, &K) -> V + 'static,
    {
        DefaultPolicy::Generator(Rc::new(f))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DefaultPolicy::Constant(_) => "constant",
            DefaultPolicy::Generator(_) => "generator",
        }
    }
}

impl<K, V> DefaultPolicy<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
{
    /// A generator that stores `f(key)` under `key` before returning it.
    pub fn persisting<F>(f: F) -> Self
    where
        F: Fn(&K) -> V + 'static,
    {
        DefaultPolicy::generator(move |dict: &mut Dict<K, V>, key: &K| {
            let value = f(key);
            dict.store(key.clone(), value.clone());
            value
        })
    }
}

impl<K, V> Clone for DefaultPolicy<K, V> {
    fn clone(&self) -> Self {
        match self {
            DefaultPolicy::Constant(v) => DefaultPolicy::Constant(Rc::clone(v)),
            DefaultPolicy::Generator(g) => DefaultPolicy::Generator(Rc::clone(g)),
        }
    }
}

impl<K, V: Debug> Debug for DefaultPolicy<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DefaultPolicy::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            DefaultPolicy::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

/// Evaluate the policy configured on `dict` for `key`, if any.
///
/// The generator handle is cloned out first so the callback can borrow the
/// container mutably.
pub(crate) fn evaluate<K, V>(dict: &mut Dict<K, V>, key: &K) -> Option<V>
where
    K: Eq + Hash,
    V: Clone,
{
    let generator = match dict.default_policy()? {
        DefaultPolicy::Constant(v) => {
            trace!("constant default policy answered a missing key");
            return Some((**v).clone());
        }
        DefaultPolicy::Generator(g) => Rc::clone(g),
    };
    let before = dict.len();
    let value = (*generator)(dict, key);
    trace!(
        "generator default policy answered a missing key ({} entries added)",
        dict.len().saturating_sub(before)
    );
    Some(value)
}
