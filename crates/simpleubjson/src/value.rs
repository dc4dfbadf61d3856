//! [`Value`]: the closed value graph the encoder understands.

use std::fmt;

/// Sentinel that encodes to the `N` marker and decodes to nothing.
///
/// Use it as a host value with [`Encoder::encode_native`](crate::Encoder::encode_native)
/// or convert it into [`Value::Noop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Noop;

/// A lazy, possibly unbounded sequence feeding an unsized container.
pub struct Producer<T>(Box<dyn Iterator<Item = T>>);

impl<T> Producer<T> {
    pub fn new<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Producer(Box::new(iter.into_iter()))
    }
}

impl<T> Iterator for Producer<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T> fmt::Debug for Producer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Producer(..)")
    }
}

/// Dynamically typed value graph.
///
/// Sized containers write their element count up front. Unsized containers
/// are fed by a [`Producer`] and closed with the end marker once it runs dry.
/// Object keys are values so that non-string keys can be rejected at the
/// entry that carries them.
#[derive(Debug)]
pub enum Value {
    Noop,
    Null,
    Bool(bool),
    Integer(i128),
    Float(f64),
    /// Exact decimal text of a number too big or too precise for the
    /// fixed-width formats.
    HugeNumber(String),
    String(String),
    SizedArray(Vec<Value>),
    UnsizedArray(Producer<Value>),
    SizedObject(Vec<(Value, Value)>),
    UnsizedObject(Producer<(Value, Value)>),
}

impl Value {
    /// Sized object from string-keyed entries.
    pub fn object<K, I>(entries: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::SizedObject(
            entries
                .into_iter()
                .map(|(k, v)| (Value::String(k.into()), v))
                .collect(),
        )
    }

    pub fn unsized_array<I>(items: I) -> Value
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        Value::UnsizedArray(Producer::new(items))
    }

    pub fn unsized_object<K, I>(entries: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
        I::IntoIter: 'static,
    {
        Value::UnsizedObject(Producer::new(
            entries
                .into_iter()
                .map(|(k, v)| (Value::String(k.into()), v)),
        ))
    }

    pub fn huge(text: impl Into<String>) -> Value {
        Value::HugeNumber(text.into())
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Noop => "noop",
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::HugeNumber(_) => "huge number",
            Value::String(_) => "string",
            Value::SizedArray(_) => "array",
            Value::UnsizedArray(_) => "unsized array",
            Value::SizedObject(_) => "object",
            Value::UnsizedObject(_) => "unsized object",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Converts into JSON, draining any producers.
    ///
    /// Noop becomes null, huge numbers and out-of-range integers become
    /// strings, non-finite floats become null.
    pub fn into_json(self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Noop | Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(b),
            Value::Integer(i) => {
                if let Ok(i) = i64::try_from(i) {
                    Json::from(i)
                } else if let Ok(u) = u64::try_from(i) {
                    Json::from(u)
                } else {
                    Json::String(i.to_string())
                }
            }
            Value::Float(f) => serde_json::Number::from_f64(f).map_or(Json::Null, Json::Number),
            Value::HugeNumber(text) | Value::String(text) => Json::String(text),
            Value::SizedArray(items) => Json::Array(items.into_iter().map(Value::into_json).collect()),
            Value::UnsizedArray(items) => Json::Array(items.map(Value::into_json).collect()),
            Value::SizedObject(entries) => json_object(entries.into_iter()),
            Value::UnsizedObject(entries) => json_object(entries),
        }
    }
}

fn json_object(entries: impl Iterator<Item = (Value, Value)>) -> serde_json::Value {
    serde_json::Value::Object(
        entries
            .map(|(k, v)| {
                let key = match k {
                    Value::String(s) => s,
                    other => other.into_json().to_string(),
                };
                (key, v.into_json())
            })
            .collect(),
    )
}

/// Structural equality. Producers can't be inspected without being drained,
/// so an unsized container never equals anything.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Noop, Value::Noop) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::HugeNumber(a), Value::HugeNumber(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::SizedArray(a), Value::SizedArray(b)) => a == b,
            (Value::SizedObject(a), Value::SizedObject(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Noop> for Value {
    fn from(_: Noop) -> Self {
        Value::Noop
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(i: $t) -> Self {
                Value::Integer(i as i128)
            }
        })*
    };
}

from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<u128> for Value {
    fn from(u: u128) -> Self {
        match i128::try_from(u) {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::HugeNumber(u.to_string()),
        }
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::SizedArray(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Number> for Value {
    fn from(n: serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Value::Integer(i as i128)
        } else if let Some(u) = n.as_u64() {
            Value::Integer(u as i128)
        } else {
            n.as_f64().map_or_else(|| Value::HugeNumber(n.to_string()), Value::Float)
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::from(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::SizedArray(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Value::SizedObject(
                obj.into_iter()
                    .map(|(k, v)| (Value::String(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}
