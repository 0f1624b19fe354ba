//! PList value representation.

use crate::dict::Dict;
use crate::error::LookupError;
use base64::prelude::*;
use chrono::{DateTime, FixedOffset};
use std::fmt;
use std::ops::Index;

/// A PList value.
#[derive(Clone, PartialEq)]
pub enum Value {
    /// `<dict>`: key-ordered mapping.
    Dict(Dict),
    /// `<array>`: ordered sequence.
    Array(Array),
    /// `<string>`: UTF-8 text.
    String(String),
    /// `<integer>`: 64-bit signed integer.
    Integer(i64),
    /// `<real>`: 64-bit floating-point number.
    Real(f64),
    /// `<true/>` or `<false/>`.
    Bool(bool),
    /// `<date>`: `None` when the element was empty.
    Date(Option<DateTime<FixedOffset>>),
    /// `<data>`: base64 payload, decoded on demand.
    Data(Data),
}

/// The PList element type of a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Array,
    Data,
    Date,
    Dict,
    Real,
    Integer,
    String,
    True,
    False,
}

impl ValueKind {
    /// The element name this kind is written as.
    pub fn tag_name(self) -> &'static str {
        match self {
            ValueKind::Array => "array",
            ValueKind::Data => "data",
            ValueKind::Date => "date",
            ValueKind::Dict => "dict",
            ValueKind::Real => "real",
            ValueKind::Integer => "integer",
            ValueKind::String => "string",
            ValueKind::True => "true",
            ValueKind::False => "false",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}

impl Value {
    /// Returns the element type of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Dict(_) => ValueKind::Dict,
            Value::Array(_) => ValueKind::Array,
            Value::String(_) => ValueKind::String,
            Value::Integer(_) => ValueKind::Integer,
            Value::Real(_) => ValueKind::Real,
            Value::Bool(true) => ValueKind::True,
            Value::Bool(false) => ValueKind::False,
            Value::Date(_) => ValueKind::Date,
            Value::Data(_) => ValueKind::Data,
        }
    }

    /// Returns `true` if this value is a `Dict`.
    pub fn is_dict(&self) -> bool {
        matches!(self, Value::Dict(_))
    }

    /// Returns `true` if this value is an `Array`.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` for `Dict` and `Array`.
    pub fn is_container(&self) -> bool {
        self.is_dict() || self.is_array()
    }

    /// Returns a reference to the dict if this is a `Dict`.
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Returns a reference to the array if this is an `Array`.
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer value if this is an `Integer`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float value if this is a `Real`.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the boolean value if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the timestamp if this is a `Date` that was set.
    pub fn as_date(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Value::Date(d) => *d,
            _ => None,
        }
    }

    /// Returns a reference to the payload if this is `Data`.
    pub fn as_data(&self) -> Option<&Data> {
        match self {
            Value::Data(d) => Some(d),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Dict(d) => fmt::Debug::fmt(d, f),
            Value::Array(arr) => fmt::Debug::fmt(arr, f),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Real(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    if *n > 0.0 {
                        write!(f, "Infinity")
                    } else {
                        write!(f, "-Infinity")
                    }
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Bool(b) => write!(f, "{}", b),
            Value::Date(Some(d)) => write!(f, "{}", d.to_rfc3339()),
            Value::Date(None) => write!(f, "<no date>"),
            Value::Data(d) => fmt::Debug::fmt(d, f),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Real(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Dict> for Value {
    fn from(d: Dict) -> Self {
        Value::Dict(d)
    }
}

impl From<Array> for Value {
    fn from(arr: Array) -> Self {
        Value::Array(arr)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Array::from(items))
    }
}

impl From<Data> for Value {
    fn from(d: Data) -> Self {
        Value::Data(d)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(d: DateTime<FixedOffset>) -> Self {
        Value::Date(Some(d))
    }
}

// ============================================================================
// Array
// ============================================================================

/// Ordered sequence of values; insertion order is document order.
#[derive(Clone, Default, PartialEq)]
pub struct Array {
    items: Vec<Value>,
}

impl Array {
    /// Create an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty array with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Get the value at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Replace the value at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: Value) -> Result<Value, LookupError> {
        let len = self.items.len();
        match self.items.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(LookupError::IndexOutOfBounds { index, len }),
        }
    }

    /// Append a value.
    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the array holds no values.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the values in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// Borrow the values as a slice.
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

impl Index<usize> for Array {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.items[index]
    }
}

impl From<Vec<Value>> for Array {
    fn from(items: Vec<Value>) -> Self {
        Self { items }
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ============================================================================
// Data
// ============================================================================

/// Binary payload kept in its base64 text form.
///
/// The document text is stored as given (trimmed) and only decoded when
/// asked for.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Data {
    encoded: String,
}

impl Data {
    /// Wrap text that is already base64-encoded.
    pub fn from_base64(text: &str) -> Self {
        Self {
            encoded: text.trim().to_string(),
        }
    }

    /// Encode raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            encoded: BASE64_STANDARD.encode(bytes),
        }
    }

    /// The stored base64 text.
    pub fn as_base64(&self) -> &str {
        &self.encoded
    }

    /// Decode the payload, skipping the line breaks and indentation that
    /// PList writers put inside long `<data>` elements.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        let clean: String = self
            .encoded
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        BASE64_STANDARD.decode(clean)
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<base64:{}>", self.encoded)
    }
}
