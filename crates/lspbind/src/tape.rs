//! Recorded subtrees for fields whose type the protocol leaves open.
use serde::ser::{self, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::{
    decoder::Decoder,
    error::{BindError, ErrorKind},
    event::{JsonEvent, Number, Scalar, ValueKind},
    initializer::Bind,
    options::DecoderOptions,
    setter::{Push, Slot, ValueSetter},
    stack::RawSink,
};

/// The events of one JSON value, kept verbatim.
///
/// Fields typed `any` in the protocol (`data`, `arguments`, a response's
/// `result`) are stored as tapes. A tape can be bound later, once the
/// caller knows what it holds, or serialized back as it arrived.
///
/// # Examples
///
/// ```
/// use lspbind::{Tape, protocol::Position};
///
/// let tape = Tape::from_str(r#"{"line": 1, "character": 2}"#).unwrap();
/// let position: Position = tape.decode().unwrap();
/// assert_eq!(position.character, 2);
/// assert_eq!(serde_json::to_string(&tape).unwrap(), r#"{"line":1,"character":2}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tape {
    events: Vec<JsonEvent>,
}

impl Tape {
    /// Tokenizes a single JSON value.
    ///
    /// # Errors
    ///
    /// A syntax error from the tokenizer.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self, serde_json::Error> {
        crate::source::events(text).map(Self::from)
    }

    /// The recorded events.
    #[must_use]
    pub fn events(&self) -> &[JsonEvent] {
        &self.events
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Kind of the recorded value.
    #[must_use]
    pub fn kind(&self) -> Option<ValueKind> {
        self.events.first().and_then(JsonEvent::value_kind)
    }

    /// Binds the recorded value as a `T`.
    ///
    /// # Errors
    ///
    /// The binding error, or [`ErrorKind::Incomplete`] for an empty or
    /// truncated tape.
    pub fn decode<T: Bind>(&self) -> Result<T, BindError> {
        self.decode_with(T::NAME, ValueSetter::record(), DecoderOptions::default())
    }

    /// Binds the recorded value with an arbitrary root setter.
    ///
    /// Batching is never applied to a tape; the other `options` are.
    ///
    /// # Errors
    ///
    /// See [`decode`](Self::decode).
    pub fn decode_with<R: Default + 'static>(
        &self,
        name: &'static str,
        setter: ValueSetter<R>,
        options: DecoderOptions,
    ) -> Result<R, BindError> {
        let options = DecoderOptions {
            allow_batches: false,
            ..options
        };
        let mut decoder = Decoder::with_setter(name, setter, options);
        let mut first = None;
        for event in self.events.iter().cloned() {
            if let Some(result) = decoder.feed(event) {
                first.get_or_insert(result);
            }
        }
        decoder.finish()?;
        first.unwrap_or_else(|| Err(BindError::at_root(name, ErrorKind::Incomplete { open: 0 })))
    }

    /// Converts the tape into a `serde_json::Value`.
    ///
    /// # Errors
    ///
    /// If the events do not form exactly one well-nested value.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Records any value.
    #[must_use]
    pub fn setter() -> ValueSetter<Self> {
        ValueSetter::new()
            .on_string(|tape: &mut Self, value| {
                tape.hold(Scalar::String(value));
                Ok(())
            })
            .on_number(|tape: &mut Self, value| {
                tape.hold(Scalar::Number(value));
                Ok(())
            })
            .on_boolean(|tape: &mut Self, value| {
                tape.hold(Scalar::Boolean(value));
                Ok(())
            })
            .on_null(|tape: &mut Self| {
                tape.hold(Scalar::Null);
                Ok(())
            })
            .on_array(|_| Push::raw(Recorder::default()))
            .on_object(|_| Push::raw(Recorder::default()))
    }

    fn hold(&mut self, value: Scalar) {
        self.events.clear();
        self.events.push(JsonEvent::Value(value));
    }
}

impl From<Vec<JsonEvent>> for Tape {
    fn from(events: Vec<JsonEvent>) -> Self {
        Self { events }
    }
}

/// Collects a container's events into a [`Tape`].
#[derive(Default)]
pub(crate) struct Recorder {
    events: Vec<JsonEvent>,
}

impl RawSink for Recorder {
    fn event(&mut self, event: JsonEvent, _options: &DecoderOptions) -> Result<(), ErrorKind> {
        self.events.push(event);
        Ok(())
    }

    fn finish(self: Box<Self>, dest: &mut Slot) -> Result<(), ErrorKind> {
        let tape = dest.downcast_mut::<Tape>().ok_or(ErrorKind::Unreachable)?;
        tape.events = self.events;
        Ok(())
    }
}

/// Number of events making up the value that starts `events`.
fn span(events: &[JsonEvent]) -> Option<usize> {
    let mut depth = 0usize;
    for (i, event) in events.iter().enumerate() {
        if event.opens() {
            depth += 1;
        } else if event.closes() {
            depth = depth.checked_sub(1)?;
        } else if matches!(event, JsonEvent::Key(_)) && depth == 0 {
            return None;
        }
        if depth == 0 {
            return Some(i + 1);
        }
    }
    None
}

struct Node<'a>(&'a [JsonEvent]);

impl Node<'_> {
    /// Splits the members of the container spanning this node.
    fn members(&self) -> Result<Vec<(Option<&str>, Node<'_>)>, &'static str> {
        let inner = &self.0[1..self.0.len() - 1];
        let mut members = Vec::new();
        let mut i = 0;
        while i < inner.len() {
            let key = match &inner[i] {
                JsonEvent::Key(key) => {
                    i += 1;
                    Some(key.as_str())
                }
                _ => None,
            };
            let len = inner.get(i..).and_then(span).ok_or("truncated member")?;
            members.push((key, Node(&inner[i..i + len])));
            i += len;
        }
        Ok(members)
    }
}

impl Serialize for Node<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.first() {
            None | Some(JsonEvent::Value(Scalar::Null)) => serializer.serialize_unit(),
            Some(JsonEvent::Value(Scalar::Boolean(b))) => serializer.serialize_bool(*b),
            Some(JsonEvent::Value(Scalar::String(s))) => serializer.serialize_str(s),
            Some(JsonEvent::Value(Scalar::Number(Number::Integer(n)))) => serializer.serialize_i64(*n),
            Some(JsonEvent::Value(Scalar::Number(Number::Float(n)))) => serializer.serialize_f64(*n),
            Some(JsonEvent::ArrayStart) => {
                let members = self.members().map_err(<S::Error as ser::Error>::custom)?;
                let mut seq = serializer.serialize_seq(Some(members.len()))?;
                for (_, node) in &members {
                    seq.serialize_element(node)?;
                }
                seq.end()
            }
            Some(JsonEvent::ObjectBegin) => {
                let members = self.members().map_err(<S::Error as ser::Error>::custom)?;
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (key, node) in &members {
                    let key = key.ok_or_else(|| <S::Error as ser::Error>::custom("object member without key"))?;
                    map.serialize_entry(key, node)?;
                }
                map.end()
            }
            Some(JsonEvent::Key(_) | JsonEvent::ArrayEnd | JsonEvent::ObjectEnd) => {
                Err(ser::Error::custom("tape does not start with a value"))
            }
        }
    }
}

impl Serialize for Tape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !self.events.is_empty() && span(&self.events) != Some(self.events.len()) {
            return Err(ser::Error::custom("tape does not hold exactly one value"));
        }
        Node(&self.events).serialize(serializer)
    }
}
