//! `Dict` and dotted-path lookups.
//!
//! A path such as `a.b.c` is resolved by walking nested dicts one token at a
//! time. When a token lands on something that is not a dict, that value is
//! the result and the rest of the path is ignored. When every token lands on
//! a dict, the whole path is looked up as a single literal key instead.
//!
//! ```
//! use libplist::{Dict, Value};
//!
//! let mut inner = Dict::new();
//! inner.put("b", Value::from(5));
//! let mut outer = Dict::new();
//! outer.put("a", Value::from(inner));
//!
//! assert_eq!(outer.get("a.b"), Some(&Value::from(5)));
//! assert_eq!(outer.get("a.b.c"), Some(&Value::from(5)));
//! assert!(outer.get("a").map_or(false, Value::is_dict));
//! ```

use crate::error::LookupError;
use crate::value::{Array, Data, Value, ValueKind};
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;
use std::fmt;

/// Separator between path tokens.
pub const PATH_SEPARATOR: char = '.';

/// Key-ordered mapping from string keys to values.
#[derive(Clone, Default, PartialEq)]
pub struct Dict {
    entries: BTreeMap<String, Value>,
}

impl Dict {
    /// Create an empty dict.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value. The last write for a key wins; the previous value is
    /// returned.
    pub fn put(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Look up a single key, without splitting on dots.
    pub fn get_entry(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns `true` if `key` is present at this level.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries at this level.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the dict has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Resolve a dotted path.
    ///
    /// Empty tokens are skipped, so `a..b` is the same path as `a.b`. A path
    /// with no tokens at all is looked up literally, and so is a path whose
    /// every token names a nested dict.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut tokens = path
            .split(PATH_SEPARATOR)
            .filter(|token| !token.is_empty())
            .peekable();
        if tokens.peek().is_none() {
            return self.entries.get(path);
        }

        let mut dict = self;
        for token in tokens {
            match dict.entries.get(token)? {
                Value::Dict(next) => dict = next,
                // Short-circuit: a non-dict ends the walk.
                other => return Some(other),
            }
        }
        self.entries.get(path)
    }

    /// Resolve a dotted path, substituting `default` only when nothing is
    /// found.
    pub fn get_or<'a>(&'a self, path: &str, default: &'a Value) -> &'a Value {
        self.get(path).unwrap_or(default)
    }

    /// Nested dict at `path`.
    pub fn get_dict(&self, path: &str) -> Result<Option<&Dict>, LookupError> {
        self.typed(path, ValueKind::Dict.tag_name(), Value::as_dict)
    }

    /// Array at `path`.
    pub fn get_array(&self, path: &str) -> Result<Option<&Array>, LookupError> {
        self.typed(path, ValueKind::Array.tag_name(), Value::as_array)
    }

    /// String at `path`.
    pub fn get_string(&self, path: &str) -> Result<Option<&str>, LookupError> {
        self.typed(path, ValueKind::String.tag_name(), Value::as_str)
    }

    /// Integer at `path`.
    pub fn get_integer(&self, path: &str) -> Result<Option<i64>, LookupError> {
        self.typed(path, ValueKind::Integer.tag_name(), Value::as_integer)
    }

    /// Real at `path`.
    pub fn get_real(&self, path: &str) -> Result<Option<f64>, LookupError> {
        self.typed(path, ValueKind::Real.tag_name(), Value::as_real)
    }

    /// Boolean at `path`. Both `<true/>` and `<false/>` match.
    pub fn get_bool(&self, path: &str) -> Result<Option<bool>, LookupError> {
        self.typed(path, "boolean", Value::as_bool)
    }

    /// Date at `path`. An empty `<date/>` reads as `Ok(None)`.
    pub fn get_date(&self, path: &str) -> Result<Option<DateTime<FixedOffset>>, LookupError> {
        self.typed(path, ValueKind::Date.tag_name(), |v| match v {
            Value::Date(d) => Some(*d),
            _ => None,
        })
        .map(Option::flatten)
    }

    /// Binary payload at `path`.
    pub fn get_data(&self, path: &str) -> Result<Option<&Data>, LookupError> {
        self.typed(path, ValueKind::Data.tag_name(), Value::as_data)
    }

    /// String at `path`, or `default` when absent. A value of another type is
    /// still an error.
    pub fn get_string_or<'a>(&'a self, path: &str, default: &'a str) -> Result<&'a str, LookupError> {
        Ok(self.get_string(path)?.unwrap_or(default))
    }

    /// Integer at `path`, or `default` when absent. A value of another type is
    /// still an error.
    pub fn get_integer_or(&self, path: &str, default: i64) -> Result<i64, LookupError> {
        Ok(self.get_integer(path)?.unwrap_or(default))
    }

    fn typed<'a, T>(
        &'a self,
        path: &str,
        expected: &'static str,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<Option<T>, LookupError> {
        let Some(value) = self.get(path) else {
            return Ok(None);
        };
        let found = value.kind();
        match extract(value) {
            Some(v) => Ok(Some(v)),
            None => Err(LookupError::TypeMismatch {
                path: path.to_string(),
                expected,
                found,
            }),
        }
    }
}

impl fmt::Debug for Dict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(&self.entries).finish()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Dict {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl IntoIterator for Dict {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
