use std::borrow::Borrow;
use std::collections::hash_map::DefaultHasher;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use indexmap::IndexMap;
use indexmap::map::{Entry, IntoIter, Iter};
use log::debug;

use crate::default_policy::{self, DefaultPolicy};
use crate::error::{DictError, Result};
use crate::List;

/// Insertion-ordered dictionary.
///
/// Keys are unique. Overwriting a key keeps its position; deleting a key and
/// inserting it again moves it to the end. A missing key can be answered by an
/// optional [`DefaultPolicy`], which the dictionary evaluates but never
/// persists on its own.
///
/// Derefs (read-only) to `IndexMap<K, V>` so positional accessors such as
/// `get_index` are available without opening a way to reorder entries.
pub struct Dict<K, V> {
    entries: IndexMap<K, V>,
    default: Option<DefaultPolicy<K, V>>,
}

impl<K, V> Deref for Dict<K, V> {
    type Target = IndexMap<K, V>;
    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl<K: Debug, V: Debug> Debug for Dict<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<K: Debug, V: Debug> Display for Dict<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:?}", self.entries)
    }
}

impl<K: Clone, V: Clone> Clone for Dict<K, V> {
    fn clone(&self) -> Self {
        Dict {
            entries: self.entries.clone(),
            default: self.default.clone(),
        }
    }
}

/// Equality compares entries only, ignoring order and default policy.
impl<K, V> PartialEq for Dict<K, V>
where
    K: Eq + Hash,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq + Hash, V: Eq> Eq for Dict<K, V> {}

/// Order-independent so that it agrees with `PartialEq`.
impl<K: Hash, V: Hash> Hash for Dict<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut combined: u64 = 0;
        for (k, v) in &self.entries {
            let mut h = DefaultHasher::new();
            k.hash(&mut h);
            v.hash(&mut h);
            combined = combined.wrapping_add(h.finish());
        }
        state.write_usize(self.entries.len());
        state.write_u64(combined);
    }
}

impl<K, V> Default for Dict<K, V> {
    fn default() -> Self {
        Dict {
            entries: IndexMap::new(),
            default: None,
        }
    }
}

impl<K, V> From<IndexMap<K, V>> for Dict<K, V> {
    fn from(entries: IndexMap<K, V>) -> Self {
        Dict {
            entries,
            default: None,
        }
    }
}

impl<K: Eq + Hash, V, const N: usize> From<[(K, V); N]> for Dict<K, V> {
    fn from(pairs: [(K, V); N]) -> Self {
        Dict::from_pairs(pairs)
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for Dict<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Dict::from_pairs(iter)
    }
}

impl<K: Eq + Hash, V> Extend<(K, V)> for Dict<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<K, V> IntoIterator for Dict<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Dict<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K, V> Dict<K, V> {
    /// The ordered entries, without the default policy.
    pub fn into_inner(self) -> IndexMap<K, V> {
        self.entries
    }

    /// The ordered entries and the default policy, taken apart.
    pub fn into_parts(self) -> (IndexMap<K, V>, Option<DefaultPolicy<K, V>>) {
        (self.entries, self.default)
    }
}

// ─── Construction ────────────────────────────────────────────────────────────

impl<K, V> Dict<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Dict {
            entries: IndexMap::with_capacity(capacity),
            default: None,
        }
    }

    /// Build from `(key, value)` pairs. A repeated key keeps its first
    /// position and its last value.
    pub fn from_pairs<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        Dict {
            entries: pairs.into_iter().collect(),
            default: None,
        }
    }

    /// Empty dictionary answering missing keys with `value`.
    pub fn with_default(value: V) -> Self {
        Dict {
            entries: IndexMap::new(),
            default: Some(DefaultPolicy::constant(value)),
        }
    }

    /// Empty dictionary answering missing keys with `f(dict, key)`.
    pub fn with_default_fn<F>(f: F) -> Self
    where
        F: Fn(&mut Dict<K, V>, &K) -> V + 'static,
    {
        Dict {
            entries: IndexMap::new(),
            default: Some(DefaultPolicy::generator(f)),
        }
    }

    pub fn set_default_policy(&mut self, policy: DefaultPolicy<K, V>) {
        self.default = Some(policy);
    }

    pub fn clear_default_policy(&mut self) -> Option<DefaultPolicy<K, V>> {
        self.default.take()
    }

    pub fn default_policy(&self) -> Option<&DefaultPolicy<K, V>> {
        self.default.as_ref()
    }

    /// Chainable insert.
    pub fn set(mut self, key: K, value: V) -> Self {
        self.entries.insert(key, value);
        self
    }
}

impl<T: Eq + Hash> Dict<T, T> {
    /// Build from alternating keys and values: `[k1, v1, k2, v2, ...]`.
    pub fn from_flat<I: IntoIterator<Item = T>>(items: I) -> Result<Self> {
        let items: Vec<T> = items.into_iter().collect();
        if items.len() % 2 != 0 {
            return Err(DictError::MalformedInput { len: items.len() });
        }
        let mut entries = IndexMap::with_capacity(items.len() / 2);
        let mut it = items.into_iter();
        while let (Some(k), Some(v)) = (it.next(), it.next()) {
            entries.insert(k, v);
        }
        Ok(Dict::from(entries))
    }
}

// ─── Lookup ──────────────────────────────────────────────────────────────────

impl<K, V> Dict<K, V>
where
    K: Eq + Hash,
{
    /// Stored value, never consulting the default policy.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.get(key)
    }

    /// Stored value or `KeyNotFound`, never consulting the default policy.
    pub fn fetch<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + Debug,
    {
        self.entries
            .get(key)
            .ok_or_else(|| DictError::key_not_found(key))
    }

    /// Stored value, or `fallback` when the key is missing.
    pub fn fetch_or<Q>(&self, key: &Q, fallback: V) -> V
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        match self.entries.get(key) {
            Some(v) => v.clone(),
            None => fallback,
        }
    }

    /// Stored value, or `f(key)` when the key is missing.
    pub fn fetch_or_else<Q, F>(&self, key: &Q, f: F) -> V
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
        F: FnOnce(&Q) -> V,
    {
        match self.entries.get(key) {
            Some(v) => v.clone(),
            None => f(key),
        }
    }

    /// Stored value, else the default policy's answer, else `KeyNotFound`.
    ///
    /// A generator policy may insert into the dictionary while it runs.
    pub fn fetch_default(&mut self, key: &K) -> Result<V>
    where
        K: Debug,
        V: Clone,
    {
        self.lookup(key)
            .ok_or_else(|| DictError::key_not_found(key))
    }

    /// Lenient form of [`Dict::fetch_default`]: `None` when there is neither
    /// an entry nor a policy.
    pub fn lookup(&mut self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        if let Some(v) = self.entries.get(key) {
            return Some(v.clone());
        }
        default_policy::evaluate(self, key)
    }

    /// Values for `keys` in the given order, `None` for each missing key.
    pub fn values_at<'q, Q, I>(&self, keys: I) -> List<Option<&V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        keys.into_iter().map(|k| self.entries.get(k)).collect()
    }

    /// Values for `keys` in the given order; fails on the first missing key.
    pub fn fetch_values<'q, Q, I>(&self, keys: I) -> Result<List<&V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + Debug + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        keys.into_iter().map(|k| self.fetch(k)).collect()
    }

    /// Values for `keys` in the given order; `f(key)` stands in for each
    /// missing key.
    pub fn fetch_values_with<'q, Q, I, F>(&self, keys: I, mut f: F) -> List<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + 'q,
        I: IntoIterator<Item = &'q Q>,
        V: Clone,
        F: FnMut(&Q) -> V,
    {
        keys.into_iter()
            .map(|k| match self.entries.get(k) {
                Some(v) => v.clone(),
                None => f(k),
            })
            .collect()
    }
}

// ─── Mutation ────────────────────────────────────────────────────────────────

impl<K, V> Dict<K, V>
where
    K: Eq + Hash,
{
    /// Insert or overwrite, returning the previous value. Overwriting keeps
    /// the entry's position.
    pub fn store(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Remove `key`, keeping the relative order of the remaining entries.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Merge `other` into this dictionary. Conflicting keys take `other`'s
    /// value in place; new keys are appended in `other`'s order.
    pub fn update<I>(&mut self, other: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let before = self.entries.len();
        let mut incoming = 0usize;
        for (k, v) in other {
            incoming += 1;
            self.entries.insert(k, v);
        }
        debug!(
            "update merged {} entries ({} new)",
            incoming,
            self.entries.len() - before
        );
        self
    }

    /// Like [`Dict::update`], but a conflicting key gets
    /// `resolve(key, current, incoming)`.
    pub fn update_with<I, F>(&mut self, other: I, mut resolve: F) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        F: FnMut(&K, &V, V) -> V,
    {
        for (k, v) in other {
            match self.entries.entry(k) {
                Entry::Occupied(mut slot) => {
                    let merged = resolve(slot.key(), slot.get(), v);
                    slot.insert(merged);
                }
                Entry::Vacant(slot) => {
                    slot.insert(v);
                }
            }
        }
        self
    }

    /// Become `other`: its entries, its order and its default policy.
    pub fn replace(&mut self, other: Dict<K, V>) -> &mut Self {
        debug!("replace discarded {} entries", self.entries.len());
        self.entries = other.entries;
        self.default = other.default;
        self
    }

    /// Keep only the entries matching `predicate`.
    pub fn keep_if<F>(&mut self, mut predicate: F) -> &mut Self
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.entries.retain(|k, v| predicate(k, v));
        self
    }

    /// Drop the entries matching `predicate`.
    pub fn delete_if<F>(&mut self, mut predicate: F) -> &mut Self
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.entries.retain(|k, v| !predicate(k, v));
        self
    }
}

// ─── Copying combinators ─────────────────────────────────────────────────────

impl<K, V> Dict<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Non-destructive [`Dict::update`]; the receiver is left untouched.
    pub fn merge<I>(&self, other: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut merged = self.clone();
        merged.update(other);
        merged
    }

    /// Non-destructive [`Dict::update_with`].
    pub fn merge_with<I, F>(&self, other: I, resolve: F) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        F: FnMut(&K, &V, V) -> V,
    {
        let mut merged = self.clone();
        merged.update_with(other, resolve);
        merged
    }

    /// Swap keys and values. When several keys share a value, the one seen
    /// last in iteration order wins.
    pub fn invert(&self) -> Dict<V, K>
    where
        V: Eq + Hash,
    {
        let inverted: Dict<V, K> = self
            .entries
            .iter()
            .map(|(k, v)| (v.clone(), k.clone()))
            .collect();
        debug!(
            "invert collapsed {} duplicate values",
            self.entries.len() - inverted.len()
        );
        inverted
    }

    /// Entries matching `predicate`, in their original order.
    pub fn select<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.filtered(|k, v| predicate(k, v))
    }

    /// Entries not matching `predicate`, in their original order.
    pub fn reject<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.filtered(|k, v| !predicate(k, v))
    }

    fn filtered<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&K, &V) -> bool,
    {
        Dict {
            entries: self
                .entries
                .iter()
                .filter(|&(k, v)| keep(k, v))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            default: self.default.clone(),
        }
    }

    pub fn to_pairs(&self) -> List<(K, V)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

// ─── Query ───────────────────────────────────────────────────────────────────

impl<K, V> Dict<K, V>
where
    K: Eq + Hash,
{
    pub fn has_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.contains_key(key)
    }

    pub fn has_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.entries.values().any(|v| v == value)
    }

    /// First key (in iteration order) whose value equals `value`.
    pub fn key_for(&self, value: &V) -> Option<&K>
    where
        V: PartialEq,
    {
        self.entries
            .iter()
            .find_map(|(k, v)| (v == value).then_some(k))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> List<&K> {
        self.entries.keys().collect()
    }

    pub fn values(&self) -> List<&V> {
        self.entries.values().collect()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.entries.iter()
    }
}
