//! Events consumed by the binding engine.
//!
//! A JSON document reaches the engine as a flat sequence of [`JsonEvent`]s:
//! container boundaries, object keys, and scalar values. The engine trusts the
//! producer to balance brackets; it only checks that each event makes sense
//! for the context that is active when it arrives.
//!
//! # Examples
//!
//! ```
//! use lspbind::{JsonEvent, Number, Scalar, ValueKind};
//!
//! let events = vec![
//!     JsonEvent::ObjectBegin,
//!     JsonEvent::key("line"),
//!     JsonEvent::integer(3),
//!     JsonEvent::ObjectEnd,
//! ];
//! assert_eq!(events[2], JsonEvent::Value(Scalar::Number(Number::Integer(3))));
//! assert_eq!(events[2].value_kind(), Some(ValueKind::Number));
//! ```
use core::fmt;

/// The discriminant of a JSON value.
///
/// Every [`ValueSetter`](crate::ValueSetter) slot corresponds to exactly one
/// kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Null,
    Array,
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Array => "array",
            Self::Object => "object",
        })
    }
}

/// A JSON number, kept integral whenever the producer saw an integer literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Returns the integer value, or `None` for floating point numbers.
    ///
    /// Floats are never truncated, not even `3.0`.
    #[must_use]
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(i),
            Self::Float(_) => None,
        }
    }

    /// Returns the value as a float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Integer(i) => i as f64,
            Self::Float(f) => f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// A JSON scalar: anything that is not a container.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Number(Number),
    Boolean(bool),
    Null,
}

impl Scalar {
    /// The kind used to pick a setter slot for this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::Number(_) => ValueKind::Number,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Null => ValueKind::Null,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            Self::Number(n) => n.fmt(f),
            Self::Boolean(b) => b.fmt(f),
            Self::Null => f.write_str("null"),
        }
    }
}

/// One step of a JSON document, as produced by a tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonEvent {
    /// `{`
    ObjectBegin,
    /// `}`
    ObjectEnd,
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
    /// An object key. The next value event belongs to it.
    Key(String),
    /// A scalar value, either an object member or an array element.
    Value(Scalar),
}

impl JsonEvent {
    /// Shorthand for a key event.
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }

    /// Shorthand for a string value event.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Value(Scalar::String(value.into()))
    }

    /// Shorthand for an integer value event.
    #[must_use]
    pub fn integer(value: i64) -> Self {
        Self::Value(Scalar::Number(Number::Integer(value)))
    }

    /// Shorthand for a floating point value event.
    #[must_use]
    pub fn float(value: f64) -> Self {
        Self::Value(Scalar::Number(Number::Float(value)))
    }

    /// Shorthand for a boolean value event.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self::Value(Scalar::Boolean(value))
    }

    /// Shorthand for a null value event.
    #[must_use]
    pub fn null() -> Self {
        Self::Value(Scalar::Null)
    }

    /// The kind of value this event starts, if it starts one.
    ///
    /// Keys and container ends start nothing.
    #[must_use]
    pub fn value_kind(&self) -> Option<ValueKind> {
        match self {
            Self::ObjectBegin => Some(ValueKind::Object),
            Self::ArrayStart => Some(ValueKind::Array),
            Self::Value(scalar) => Some(scalar.kind()),
            Self::ObjectEnd | Self::ArrayEnd | Self::Key(_) => None,
        }
    }

    /// Whether this event opens a container.
    #[must_use]
    pub fn opens(&self) -> bool {
        matches!(self, Self::ObjectBegin | Self::ArrayStart)
    }

    /// Whether this event closes a container.
    #[must_use]
    pub fn closes(&self) -> bool {
        matches!(self, Self::ObjectEnd | Self::ArrayEnd)
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::ObjectBegin => "object begin",
            Self::ObjectEnd => "object end",
            Self::ArrayStart => "array start",
            Self::ArrayEnd => "array end",
            Self::Key(_) => "key",
            Self::Value(_) => "value",
        }
    }
}

impl From<Scalar> for JsonEvent {
    fn from(value: Scalar) -> Self {
        Self::Value(value)
    }
}
