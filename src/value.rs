use std::collections::BTreeMap;
use std::fmt;

use crate::error::Error;
use crate::job::Job;
use crate::serializer::Serializer;

/// Discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

/// A JSON document value.
///
/// Objects keep their members in key order, so serialization is always
/// alphabetical regardless of insertion order. Strings parsed from a
/// document keep their escape sequences verbatim; strings built from Rust
/// are stored raw and are not re-escaped on dump.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Parse a document, `Value::Null` on any defect. Diagnostics go to
    /// stderr either way; use [`Value::try_parse`] to get them as an error.
    pub fn parse(input: &str) -> Value {
        Job::new(input).fire()
    }

    /// Parse a document, surfacing the first defect as an [`Error`].
    pub fn try_parse(input: &str) -> Result<Value, Error> {
        let mut job = Job::new(input);
        let value = job.fire();
        match job.diagnostics().first() {
            None => Ok(value),
            Some(diagnostic) => Err(Error::Syntax(std::format!(
                "{}:{}: {}",
                diagnostic.line + 1,
                diagnostic.column + 1,
                diagnostic.message
            ))),
        }
    }

    /// Serialize. `indent` 0 gives the compact form; otherwise each nesting
    /// level is indented by `indent` copies of `indent_char`.
    pub fn dump(&self, indent: usize, indent_char: char) -> String {
        Serializer::new(indent, indent_char).dump(self)
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(boolean) => Some(*boolean),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(string) => Some(string),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut BTreeMap<String, Value>> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Element count for containers, 0 for null, 1 for scalars.
    pub fn size(&self) -> usize {
        match self {
            Value::Null => 0,
            Value::Array(array) => array.len(),
            Value::Object(object) => object.len(),
            _ => 1,
        }
    }

    /// Reset to the type's empty state; null stays null.
    pub fn clear(&mut self) {
        match self {
            Value::Null => {}
            Value::Bool(boolean) => *boolean = false,
            Value::Number(number) => *number = 0.0,
            Value::String(string) => string.clear(),
            Value::Array(array) => array.clear(),
            Value::Object(object) => object.clear(),
        }
    }

    pub fn get<I: ValueIndex>(&self, index: I) -> Option<&Value> {
        index.index_into(self)
    }

    pub fn get_mut<I: ValueIndex>(&mut self, index: I) -> Option<&mut Value> {
        index.index_into_mut(self)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        match self {
            Value::Object(object) => object.contains_key(key),
            _ => false,
        }
    }

    /// Append to an array; a null value becomes an empty array first.
    /// Pushing onto any other type is a caller bug.
    pub fn push(&mut self, value: impl Into<Value>) {
        if self.is_null() {
            *self = Value::Array(Vec::new());
        }
        match self {
            Value::Array(array) => array.push(value.into()),
            _ => panic!("push on non-array value"),
        }
    }

    /// Insert a member; a null value becomes an empty object first.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        if self.is_null() {
            *self = Value::Object(BTreeMap::new());
        }
        match self {
            Value::Object(object) => {
                object.insert(key.into(), value.into());
            }
            _ => panic!("insert on non-object value"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump(0, ' '))
    }
}

/// Index argument for [`Value::get`] and the `value[...]` operators;
/// implemented for `usize` (arrays) and string keys (objects).
pub trait ValueIndex {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value>;
    fn index_into_mut<'v>(&self, value: &'v mut Value) -> Option<&'v mut Value>;
    fn index_or_insert<'v>(&self, value: &'v mut Value) -> &'v mut Value;
}

impl ValueIndex for usize {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        match value {
            Value::Array(array) => array.get(*self),
            _ => None,
        }
    }

    fn index_into_mut<'v>(&self, value: &'v mut Value) -> Option<&'v mut Value> {
        match value {
            Value::Array(array) => array.get_mut(*self),
            _ => None,
        }
    }

    fn index_or_insert<'v>(&self, value: &'v mut Value) -> &'v mut Value {
        if value.is_null() {
            *value = Value::Array(Vec::new());
        }
        match value {
            Value::Array(array) => {
                // Writing past the end grows the array with nulls.
                if *self >= array.len() {
                    array.resize(*self + 1, Value::Null);
                }
                &mut array[*self]
            }
            _ => panic!("index on non-array value"),
        }
    }
}

impl ValueIndex for str {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        match value {
            Value::Object(object) => object.get(self),
            _ => None,
        }
    }

    fn index_into_mut<'v>(&self, value: &'v mut Value) -> Option<&'v mut Value> {
        match value {
            Value::Object(object) => object.get_mut(self),
            _ => None,
        }
    }

    fn index_or_insert<'v>(&self, value: &'v mut Value) -> &'v mut Value {
        if value.is_null() {
            *value = Value::Object(BTreeMap::new());
        }
        match value {
            Value::Object(object) => object.entry(self.to_string()).or_insert(Value::Null),
            _ => panic!("member access on non-object value"),
        }
    }
}

impl ValueIndex for &str {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        (*self).index_into(value)
    }

    fn index_into_mut<'v>(&self, value: &'v mut Value) -> Option<&'v mut Value> {
        (*self).index_into_mut(value)
    }

    fn index_or_insert<'v>(&self, value: &'v mut Value) -> &'v mut Value {
        (*self).index_or_insert(value)
    }
}

impl<I: ValueIndex> std::ops::Index<I> for Value {
    type Output = Value;

    fn index(&self, index: I) -> &Value {
        match index.index_into(self) {
            Some(value) => value,
            None => panic!("no such element"),
        }
    }
}

impl<I: ValueIndex> std::ops::IndexMut<I> for Value {
    fn index_mut(&mut self, index: I) -> &mut Value {
        index.index_or_insert(self)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(boolean: bool) -> Self {
        Value::Bool(boolean)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty)*) => {$(
        impl From<$ty> for Value {
            fn from(number: $ty) -> Self {
                Value::Number(number as f64)
            }
        }
    )*};
}

impl_from_number! { u8 u16 u32 u64 usize i8 i16 i32 i64 isize f32 f64 }

impl From<&str> for Value {
    fn from(string: &str) -> Self {
        Value::String(string.to_string())
    }
}

impl From<String> for Value {
    fn from(string: String) -> Self {
        Value::String(string)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(array: Vec<T>) -> Self {
        Value::Array(array.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(object: BTreeMap<String, T>) -> Self {
        Value::Object(object.into_iter().map(|(key, value)| (key, value.into())).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => value.into(),
            None => Value::Null,
        }
    }
}
