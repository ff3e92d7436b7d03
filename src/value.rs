//! The decoded value tree.
//!
//! This module defines the [`Value`] type, a tagged variant over the Hjson
//! data types. Every value additionally carries four comment slots and two
//! source positions so that an encoder can re-emit the document with its
//! original formatting intact.

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// An Hjson map. Iteration order is insertion order, and re-assigning an
/// existing key keeps the entry at its original position.
pub type Map = IndexMap<String, Value>;

/// An Hjson array.
pub type Vector = Vec<Value>;

/// The type tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Undefined,
    Null,
    Bool,
    Int64,
    Double,
    String,
    Vector,
    Map,
}

#[derive(Debug, Clone)]
enum ValueData {
    Undefined,
    Null,
    Bool(bool),
    Int64(i64),
    Double(f64),
    String(String),
    Vector(Vector),
    Map(Map),
}

/// Comment slots and source positions attached to a value.
///
/// Allocated lazily so that undecorated values stay small.
#[derive(Debug, Clone, PartialEq)]
struct Decor {
    before: String,
    key: String,
    inside: String,
    after: String,
    pos_key: isize,
    pos_item: isize,
}

impl Default for Decor {
    fn default() -> Self {
        Self {
            before: String::new(),
            key: String::new(),
            inside: String::new(),
            after: String::new(),
            pos_key: -1,
            pos_item: -1,
        }
    }
}

/// An Hjson value.
///
/// `Value` can represent any Hjson data type:
///
/// - Null
/// - Boolean
/// - Integer (`i64`)
/// - Floating-point number (`f64`)
/// - String
/// - Vector (array)
/// - Map (object, insertion-ordered)
///
/// A freshly default-constructed value is *undefined*, a sentinel that is
/// distinguishable from every real variant; see [`defined`]. Successful
/// decodes never produce it.
///
/// Equality compares data only. Comment slots and positions are formatting
/// metadata and do not participate, and the two numeric variants compare
/// numerically against each other.
///
/// # Examples
///
/// ```
/// use hjson_tree::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::from("value"));
/// let v = Value::from(map);
/// assert_eq!(v["key"].as_str(), Some("value"));
/// assert!(!v["missing"].defined());
/// ```
///
/// [`defined`]: Value::defined
#[derive(Debug, Clone, Default)]
pub struct Value {
    data: ValueData,
    decor: Option<Box<Decor>>,
}

static UNDEFINED: Value = Value {
    data: ValueData::Undefined,
    decor: None,
};

impl Default for ValueData {
    fn default() -> Self {
        Self::Undefined
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (&self.data, &other.data) {
            (ValueData::Undefined, ValueData::Undefined)
            | (ValueData::Null, ValueData::Null) => true,
            (ValueData::Bool(a), ValueData::Bool(b)) => a == b,
            (ValueData::Int64(a), ValueData::Int64(b)) => a == b,
            (ValueData::Double(a), ValueData::Double(b)) => a == b,
            (ValueData::Int64(a), ValueData::Double(b))
            | (ValueData::Double(b), ValueData::Int64(a)) => *a as f64 == *b,
            (ValueData::String(a), ValueData::String(b)) => a == b,
            (ValueData::Vector(a), ValueData::Vector(b)) => a == b,
            (ValueData::Map(a), ValueData::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::with_data(ValueData::Bool(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::with_data(ValueData::Int64(i64::from(v)))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::with_data(ValueData::Int64(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::with_data(ValueData::Double(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::with_data(ValueData::String(v.to_owned()))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::with_data(ValueData::String(v))
    }
}

impl From<Vector> for Value {
    fn from(v: Vector) -> Self {
        Self::with_data(ValueData::Vector(v))
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::with_data(ValueData::Map(v))
    }
}

impl Value {
    fn with_data(data: ValueData) -> Self {
        Self { data, decor: None }
    }

    /// Creates a null value.
    #[must_use]
    pub fn null() -> Self {
        Self::with_data(ValueData::Null)
    }

    /// Returns the type tag of this value.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self.data {
            ValueData::Undefined => Kind::Undefined,
            ValueData::Null => Kind::Null,
            ValueData::Bool(_) => Kind::Bool,
            ValueData::Int64(_) => Kind::Int64,
            ValueData::Double(_) => Kind::Double,
            ValueData::String(_) => Kind::String,
            ValueData::Vector(_) => Kind::Vector,
            ValueData::Map(_) => Kind::Map,
        }
    }

    /// Returns `true` if the value is distinguishable from a freshly
    /// default-constructed placeholder.
    ///
    /// # Examples
    ///
    /// ```
    /// use hjson_tree::Value;
    ///
    /// assert!(!Value::default().defined());
    /// assert!(Value::null().defined());
    /// ```
    #[must_use]
    pub fn defined(&self) -> bool {
        !matches!(self.data, ValueData::Undefined)
    }

    /// Returns `true` if the value is null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self.data, ValueData::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self.data, ValueData::Bool(_))
    }

    /// Returns `true` if the value is numeric (integer or floating-point).
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self.data, ValueData::Int64(_) | ValueData::Double(_))
    }

    /// Returns `true` if the value is a string.
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self.data, ValueData::String(_))
    }

    /// Returns `true` if the value is a vector.
    #[must_use]
    pub fn is_vector(&self) -> bool {
        matches!(self.data, ValueData::Vector(_))
    }

    /// Returns `true` if the value is a map.
    #[must_use]
    pub fn is_map(&self) -> bool {
        matches!(self.data, ValueData::Map(_))
    }

    /// The number of elements in a container; `0` for everything else.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.data {
            ValueData::Vector(v) => v.len(),
            ValueData::Map(m) => m.len(),
            _ => 0,
        }
    }

    /// Returns `true` if [`len`] is `0`.
    ///
    /// [`len`]: Value::len
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the boolean if this is a boolean value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self.data {
            ValueData::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the integer if this is an integer value.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self.data {
            ValueData::Int64(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the numeric value as `f64` if this is numeric.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self.data {
            ValueData::Int64(n) => Some(n as f64),
            ValueData::Double(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the string slice if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.data {
            ValueData::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a reference to the elements if this is a vector.
    #[must_use]
    pub fn as_vector(&self) -> Option<&Vector> {
        match &self.data {
            ValueData::Vector(v) => Some(v),
            _ => None,
        }
    }

    /// Returns a reference to the entries if this is a map.
    #[must_use]
    pub fn as_map(&self) -> Option<&Map> {
        match &self.data {
            ValueData::Map(m) => Some(m),
            _ => None,
        }
    }

    pub(crate) fn as_vector_mut(&mut self) -> Option<&mut Vector> {
        match &mut self.data {
            ValueData::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub(crate) fn as_map_mut(&mut self) -> Option<&mut Map> {
        match &mut self.data {
            ValueData::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the boolean, or a type-mismatch error.
    pub fn to_bool(&self) -> Result<bool> {
        self.as_bool().ok_or_else(|| self.mismatch(Kind::Bool))
    }

    /// Returns the numeric value as `i64`, converting a floating-point value
    /// by truncation, or a type-mismatch error.
    pub fn to_i64(&self) -> Result<i64> {
        match self.data {
            ValueData::Int64(n) => Ok(n),
            ValueData::Double(n) => Ok(n as i64),
            _ => Err(self.mismatch(Kind::Int64)),
        }
    }

    /// Returns the numeric value as `f64`, or a type-mismatch error.
    pub fn to_f64(&self) -> Result<f64> {
        self.as_f64().ok_or_else(|| self.mismatch(Kind::Double))
    }

    /// Returns the string slice, or a type-mismatch error.
    pub fn to_str(&self) -> Result<&str> {
        self.as_str().ok_or_else(|| self.mismatch(Kind::String))
    }

    fn mismatch(&self, expected: Kind) -> Error {
        Error::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    /// Returns the map entry for `key`, or `None` if this is not a map or the
    /// key is absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|m| m.get(key))
    }

    /// Returns the vector element at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfBounds`] for an index past the end, and
    /// [`Error::TypeMismatch`] when the value is not a vector.
    pub fn at(&self, index: usize) -> Result<&Value> {
        let vec = self
            .as_vector()
            .ok_or_else(|| self.mismatch(Kind::Vector))?;
        vec.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            len: vec.len(),
        })
    }

    /// Appends an element. An undefined value becomes an empty vector first.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] when the value is neither a vector nor
    /// undefined.
    pub fn push(&mut self, element: impl Into<Value>) -> Result<()> {
        if let ValueData::Undefined = self.data {
            self.data = ValueData::Vector(Vector::new());
        }
        if let ValueData::Vector(v) = &mut self.data {
            v.push(element.into());
            return Ok(());
        }
        Err(self.mismatch(Kind::Vector))
    }

    /// Inserts or replaces a map entry. An undefined value becomes an empty
    /// map first. Replacing keeps the entry at its original position in
    /// iteration order.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] when the value is neither a map nor undefined.
    pub fn insert(&mut self, key: impl Into<String>, element: impl Into<Value>) -> Result<()> {
        if let ValueData::Undefined = self.data {
            self.data = ValueData::Map(Map::new());
        }
        if let ValueData::Map(m) = &mut self.data {
            m.insert(key.into(), element.into());
            return Ok(());
        }
        Err(self.mismatch(Kind::Map))
    }

    // --- Decorations ----------------------------------------------------

    fn decor_mut(&mut self) -> &mut Decor {
        self.decor.get_or_insert_with(Default::default)
    }

    /// Trivia preceding the value (or its key, inside a map).
    #[must_use]
    pub fn comment_before(&self) -> &str {
        self.decor.as_ref().map_or("", |d| &d.before)
    }

    pub fn set_comment_before(&mut self, text: impl Into<String>) {
        self.decor_mut().before = text.into();
    }

    /// Trivia between the key and the `:`.
    #[must_use]
    pub fn comment_key(&self) -> &str {
        self.decor.as_ref().map_or("", |d| &d.key)
    }

    pub fn set_comment_key(&mut self, text: impl Into<String>) {
        self.decor_mut().key = text.into();
    }

    /// Trivia between the brackets of an empty container.
    #[must_use]
    pub fn comment_inside(&self) -> &str {
        self.decor.as_ref().map_or("", |d| &d.inside)
    }

    pub fn set_comment_inside(&mut self, text: impl Into<String>) {
        self.decor_mut().inside = text.into();
    }

    /// Trivia following the value, up to and including the next separator or
    /// newline.
    #[must_use]
    pub fn comment_after(&self) -> &str {
        self.decor.as_ref().map_or("", |d| &d.after)
    }

    pub fn set_comment_after(&mut self, text: impl Into<String>) {
        self.decor_mut().after = text.into();
    }

    /// Byte offset of the key within the original input; `-1` for values that
    /// are not map entries.
    #[must_use]
    pub fn pos_key(&self) -> isize {
        self.decor.as_ref().map_or(-1, |d| d.pos_key)
    }

    pub fn set_pos_key(&mut self, pos: isize) {
        self.decor_mut().pos_key = pos;
    }

    /// Byte offset of the value within the original input; `-1` when the
    /// value was not produced by the decoder.
    #[must_use]
    pub fn pos_item(&self) -> isize {
        self.decor.as_ref().map_or(-1, |d| d.pos_item)
    }

    pub fn set_pos_item(&mut self, pos: isize) {
        self.decor_mut().pos_item = pos;
    }
}

impl std::ops::Index<&str> for Value {
    type Output = Value;

    /// Indexes into a map, returning a shared undefined placeholder for
    /// missing keys and non-map values so that `value[key].defined()` can be
    /// used as an existence check.
    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&UNDEFINED)
    }
}

impl std::ops::Index<usize> for Value {
    type Output = Value;

    /// Indexes into a vector, returning a shared undefined placeholder past
    /// the end and for non-vector values. Use [`Value::at`] to surface errors
    /// instead.
    fn index(&self, index: usize) -> &Value {
        self.as_vector()
            .and_then(|v| v.get(index))
            .unwrap_or(&UNDEFINED)
    }
}
