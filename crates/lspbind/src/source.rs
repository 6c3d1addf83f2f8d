//! Turning JSON text into [`JsonEvent`]s.
//!
//! The tokenizer is `serde_json`'s: a visitor walks each top-level value and
//! reports what it sees as events, without building a `serde_json::Value`.
//! Integers beyond the `i64` range are reported as floats.
use core::fmt;

use serde::de::{self, Deserialize, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::event::{JsonEvent, Number, Scalar};

/// Tokenizes every top-level value in `text`, in order, into `sink`.
///
/// Values may be separated by whitespace. Each value is tokenized
/// completely before its events are handed over, so a syntax error never
/// leaves a value half-delivered.
///
/// # Errors
///
/// The first syntax error. Values before it have been delivered.
pub fn emit<F>(text: &str, mut sink: F) -> Result<(), serde_json::Error>
where
    F: FnMut(JsonEvent),
{
    for value in serde_json::Deserializer::from_str(text).into_iter::<Recorded>() {
        value?.0.into_iter().for_each(&mut sink);
    }
    Ok(())
}

/// Tokenizes every top-level value in `text` into one event list.
///
/// # Errors
///
/// The first syntax error.
pub fn events(text: &str) -> Result<Vec<JsonEvent>, serde_json::Error> {
    let mut events = Vec::new();
    emit(text, |event| events.push(event))?;
    Ok(events)
}

/// The events of one top-level value.
struct Recorded(Vec<JsonEvent>);

impl<'de> Deserialize<'de> for Recorded {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut events = Vec::new();
        Emitter {
            sink: &mut |event| events.push(event),
        }
        .deserialize(deserializer)?;
        Ok(Self(events))
    }
}

struct Emitter<'s> {
    sink: &'s mut dyn FnMut(JsonEvent),
}

impl Emitter<'_> {
    fn scalar<E>(self, value: Scalar) -> Result<(), E> {
        (self.sink)(JsonEvent::Value(value));
        Ok(())
    }
}

impl<'de> DeserializeSeed<'de> for Emitter<'_> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for Emitter<'_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<(), E> {
        self.scalar(Scalar::Boolean(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<(), E> {
        self.scalar(Scalar::Number(Number::Integer(v)))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<(), E> {
        let number = i64::try_from(v).map_or(Number::Float(v as f64), Number::Integer);
        self.scalar(Scalar::Number(number))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<(), E> {
        self.scalar(Scalar::Number(Number::Float(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<(), E> {
        self.scalar(Scalar::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<(), E> {
        self.scalar(Scalar::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<(), E> {
        self.scalar(Scalar::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<(), E> {
        self.scalar(Scalar::Null)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<(), A::Error> {
        let sink = self.sink;
        sink(JsonEvent::ArrayStart);
        while seq.next_element_seed(Emitter { sink: &mut *sink })?.is_some() {}
        sink(JsonEvent::ArrayEnd);
        Ok(())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<(), A::Error> {
        let sink = self.sink;
        sink(JsonEvent::ObjectBegin);
        while let Some(key) = map.next_key::<String>()? {
            sink(JsonEvent::Key(key));
            map.next_value_seed(Emitter { sink: &mut *sink })?;
        }
        sink(JsonEvent::ObjectEnd);
        Ok(())
    }
}
