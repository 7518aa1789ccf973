use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

/// Maximum number of path parameters before heap allocation.
/// Most routes have ≤4 named segments (e.g. `/togo/:id/users/:user_id`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the dispatch path.
///
/// Param names are `Arc<str>` shared with the compiled pattern that declared
/// them; values are per-request data sliced out of the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Parameters captured from a request path by a matched route.
///
/// Entries are kept in the order the pattern declares them, one entry per
/// named segment. A fresh `Params` is produced by every successful match and
/// travels with that single request only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    inner: ParamVec,
}

impl Params {
    /// Create an empty parameter set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_vec(inner: ParamVec) -> Self {
        Self { inner }
    }

    /// Append a captured value
    pub fn push(&mut self, name: Arc<str>, value: String) {
        self.inner.push((name, value));
    }

    /// Get a parameter by name
    ///
    /// Uses "last write wins" semantics: if a pattern repeats a name
    /// (e.g. `/org/:id/user/:id`), the rightmost capture is returned.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of captured entries (one per named segment)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate `(name, value)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Convert to a `HashMap`
    /// Note: This allocates - use get() in hot paths instead
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.inner
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.inner.len()))?;
        for (k, v) in &self.inner {
            map.serialize_entry(k.as_ref(), v)?;
        }
        map.end()
    }
}
