//! Record binding tables.
//!
//! Every protocol record implements [`Bind`]: a name for diagnostics and a
//! function that registers one [`ValueSetter`] per wire key. The engine
//! builds a fresh [`Initializer`] from that table for each object it binds,
//! so the required-key ledger always starts empty.
use tracing::debug;

use crate::{
    error::ErrorKind,
    event::{Scalar, ValueKind},
    ledger::Ledger,
    options::DecoderOptions,
    setter::{Push, Slot, ValueSetter},
    stack::{Context, Layout},
};

/// A record that can be bound from an object.
///
/// # Examples
///
/// ```
/// use lspbind::{Bind, Initializer, ValueSetter};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Span {
///     start: u32,
///     end: Option<u32>,
/// }
///
/// impl Bind for Span {
///     const NAME: &'static str = "Span";
///
///     fn bind(init: &mut Initializer<Self>) {
///         init.required("start", |s| &mut s.start, ValueSetter::number())
///             .optional("end", |s| &mut s.end, ValueSetter::number());
///     }
/// }
///
/// let span: Span = lspbind::from_str(r#"{"start": 4}"#).unwrap();
/// assert_eq!(span, Span { start: 4, end: None });
/// ```
pub trait Bind: Default + 'static {
    /// The record's name in the protocol, used in error reports.
    const NAME: &'static str;

    /// Registers the record's keys.
    fn bind(init: &mut Initializer<Self>);
}

/// The binding table of one record under construction.
pub struct Initializer<T> {
    name: &'static str,
    setters: Vec<(&'static str, ValueSetter<T>)>,
    ledger: Ledger,
}

impl<T: Bind> Initializer<T> {
    pub(crate) fn bound() -> Self {
        let mut init = Self {
            name: T::NAME,
            setters: Vec::new(),
            ledger: Ledger::default(),
        };
        T::bind(&mut init);
        init
    }
}

impl<T: 'static> Initializer<T> {
    /// A mandatory key stored into `field`.
    pub fn required<F: 'static>(
        &mut self,
        key: &'static str,
        field: fn(&mut T) -> &mut F,
        setter: ValueSetter<F>,
    ) -> &mut Self {
        self.required_entry(key, setter.lift(field))
    }

    /// An optional key; `field` stays `None` when the key is absent.
    pub fn optional<F: Default + 'static>(
        &mut self,
        key: &'static str,
        field: fn(&mut T) -> &mut Option<F>,
        setter: ValueSetter<F>,
    ) -> &mut Self {
        self.optional_entry(key, setter.optional().lift(field))
    }

    /// A mandatory key whose value may be `null`.
    pub fn nullable<F: Default + 'static>(
        &mut self,
        key: &'static str,
        field: fn(&mut T) -> &mut Option<F>,
        setter: ValueSetter<F>,
    ) -> &mut Self {
        self.required_entry(key, setter.nullable().lift(field))
    }

    /// A mandatory key with a setter written against the whole record.
    pub fn required_entry(&mut self, key: &'static str, setter: ValueSetter<T>) -> &mut Self {
        self.ledger.require(key);
        self.insert(key, setter);
        self
    }

    /// An optional key with a setter written against the whole record.
    pub fn optional_entry(&mut self, key: &'static str, setter: ValueSetter<T>) -> &mut Self {
        self.ledger.release(key);
        self.insert(key, setter);
        self
    }

    /// Merges the keys of a mixin stored in `project`.
    ///
    /// Keys registered after the embed replace the mixin's setter for the
    /// same key.
    pub fn embed<M: Bind>(&mut self, project: fn(&mut T) -> &mut M) -> &mut Self {
        let Initializer { setters, ledger, .. } = Initializer::<M>::bound();
        for (key, setter) in setters {
            self.insert(key, setter.lift(project));
        }
        self.ledger.merge(ledger);
        self
    }

    /// Registered keys, in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.setters.iter().map(|(key, _)| *key)
    }

    /// The required-key ledger.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    fn insert(&mut self, key: &'static str, setter: ValueSetter<T>) {
        match self.setters.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = setter,
            None => self.setters.push((key, setter)),
        }
    }

    fn setter(&self, key: &str) -> Option<(&'static str, &ValueSetter<T>)> {
        self.setters
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(k, setter)| (*k, setter))
    }
}

impl<T: 'static> Context for Initializer<T> {
    fn record(&self) -> Option<&'static str> {
        Some(self.name)
    }

    fn layout(&self) -> Layout {
        Layout::Keyed
    }

    fn scalar(
        &mut self,
        dest: &mut Slot,
        key: Option<&str>,
        value: Scalar,
        _options: &DecoderOptions,
    ) -> Result<(), ErrorKind> {
        let key = key.ok_or(ErrorKind::UnexpectedEvent { event: "value" })?;
        let Some((name, setter)) = self.setter(key) else {
            debug!(record = self.name, key, "ignoring unknown key");
            return Ok(());
        };
        let dest = dest.downcast_mut::<T>().ok_or(ErrorKind::Unreachable)?;
        setter.set(dest, value).map_err(|rejection| rejection.for_key(key))?;
        self.ledger.mark(name);
        Ok(())
    }

    fn open(&mut self, dest: &mut Slot, key: Option<&str>, kind: ValueKind) -> Result<Option<Push>, ErrorKind> {
        let key = key.ok_or(ErrorKind::UnexpectedEvent {
            event: match kind {
                ValueKind::Array => "array start",
                _ => "object begin",
            },
        })?;
        let Some((name, setter)) = self.setter(key) else {
            debug!(record = self.name, key, "ignoring unknown key");
            return Ok(None);
        };
        let dest = dest.downcast_mut::<T>().ok_or(ErrorKind::Unreachable)?;
        let push = setter.open(dest, kind).ok_or_else(|| ErrorKind::UnexpectedValueKind {
            key: key.to_owned(),
            kind,
        })?;
        self.ledger.mark(name);
        Ok(Some(push))
    }

    fn close(&mut self) -> Result<(), ErrorKind> {
        match self.ledger.first_missing() {
            Some(key) => Err(ErrorKind::MissingRequiredKey { key }),
            None => Ok(()),
        }
    }
}
