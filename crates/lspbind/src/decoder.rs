//! Driving a binding from a stream of events.
use core::mem;

use tracing::{debug, trace};

use crate::{
    error::{BindError, DecodeError, ErrorKind},
    event::{JsonEvent, Scalar, ValueKind},
    initializer::Bind,
    options::DecoderOptions,
    setter::{Push, Rejection, Slot, ValueSetter},
    source,
    stack::{Context, InitializerStack, Layout, RawSink},
};

/// Binds the top-level value with a single setter.
struct Root<R> {
    name: &'static str,
    setter: ValueSetter<R>,
}

impl<R: 'static> Context for Root<R> {
    fn record(&self) -> Option<&'static str> {
        Some(self.name)
    }

    fn layout(&self) -> Layout {
        Layout::Root
    }

    fn scalar(
        &mut self,
        dest: &mut Slot,
        _key: Option<&str>,
        value: Scalar,
        _options: &DecoderOptions,
    ) -> Result<(), ErrorKind> {
        let dest = dest.downcast_mut::<R>().ok_or(ErrorKind::Unreachable)?;
        self.setter.set(dest, value).map_err(|rejection| match rejection {
            Rejection::Unaccepted(kind) => ErrorKind::UnexpectedRootKind { kind },
            Rejection::Invalid(kind) => kind,
        })
    }

    fn open(&mut self, dest: &mut Slot, _key: Option<&str>, kind: ValueKind) -> Result<Option<Push>, ErrorKind> {
        let dest = dest.downcast_mut::<R>().ok_or(ErrorKind::Unreachable)?;
        self.setter
            .open(dest, kind)
            .map(Some)
            .ok_or(ErrorKind::UnexpectedRootKind { kind })
    }

    fn close(&mut self) -> Result<(), ErrorKind> {
        Err(ErrorKind::UnexpectedEvent { event: "close" })
    }
}

/// A streaming decoder for a sequence of top-level values of type `R`.
///
/// Feed events one at a time; every completed top-level value is returned
/// from [`feed`](Self::feed). A value that fails to bind is discarded as a
/// whole: the decoder consumes the rest of its events silently and reports
/// one error when the value ends, then carries on with the next value.
///
/// # Examples
///
/// ```
/// use lspbind::{Decoder, DecoderOptions, JsonEvent, protocol::Position};
///
/// let mut decoder = Decoder::<Position>::new(DecoderOptions::default());
/// let events = [
///     JsonEvent::ObjectBegin,
///     JsonEvent::key("line"),
///     JsonEvent::integer(3),
///     JsonEvent::key("character"),
///     JsonEvent::integer(7),
///     JsonEvent::ObjectEnd,
/// ];
/// let mut decoded = events.into_iter().filter_map(|event| decoder.feed(event));
/// let position = decoded.next().unwrap().unwrap();
/// assert_eq!((position.line, position.character), (3, 7));
/// ```
pub struct Decoder<R> {
    name: &'static str,
    root: R,
    stack: InitializerStack,
    pub(crate) options: DecoderOptions,
    /// Open containers, counted from the top level.
    depth: usize,
    /// The error of the value being drained.
    failure: Option<BindError>,
    /// The partly bound value the last failure discarded.
    partial: Option<R>,
    in_batch: bool,
}

impl<T: Bind> Decoder<T> {
    /// A decoder for objects bound by `T`'s table.
    #[must_use]
    pub fn new(options: DecoderOptions) -> Self {
        Self::with_setter(T::NAME, ValueSetter::record(), options)
    }
}

impl<R: Default + 'static> Decoder<R> {
    /// A decoder whose top-level value is bound by `setter`.
    ///
    /// `name` stands in for the record in errors about the top-level value.
    #[must_use]
    pub fn with_setter(name: &'static str, setter: ValueSetter<R>, options: DecoderOptions) -> Self {
        Self {
            name,
            root: R::default(),
            stack: InitializerStack::new(Root { name, setter }),
            options,
            depth: 0,
            failure: None,
            partial: None,
            in_batch: false,
        }
    }

    /// The options in effect.
    #[must_use]
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Whether the decoder is between top-level values.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.depth == 0
    }

    /// Consumes one event.
    ///
    /// Returns `Some` when the event completes a top-level value, either
    /// bound or failed.
    pub fn feed(&mut self, event: JsonEvent) -> Option<Result<R, BindError>> {
        if self.depth == 0 && self.options.allow_batches {
            match event {
                JsonEvent::ArrayStart if !self.in_batch => {
                    trace!("batch start");
                    self.in_batch = true;
                    return None;
                }
                JsonEvent::ArrayEnd if self.in_batch => {
                    trace!("batch end");
                    self.in_batch = false;
                    return None;
                }
                _ => {}
            }
        }
        if event.closes() {
            if self.depth == 0 {
                self.partial = None;
                return Some(Err(BindError::at_root(
                    self.name,
                    ErrorKind::UnexpectedEvent { event: event.name() },
                )));
            }
            self.depth -= 1;
        } else if event.opens() {
            self.depth += 1;
            if let Some(limit) = self.options.max_depth {
                if self.depth > limit && self.failure.is_none() {
                    let error = BindError::at_root(self.name, ErrorKind::DepthLimitExceeded { limit });
                    return self.abandon(error);
                }
            }
        }
        if self.failure.is_some() {
            return if self.depth == 0 {
                self.failure.take().map(Err)
            } else {
                None
            };
        }
        match self.stack.dispatch(&mut self.root, event, &self.options) {
            Ok(true) => {
                self.partial = None;
                Some(Ok(mem::take(&mut self.root)))
            }
            Ok(false) => None,
            Err(error) => self.abandon(error),
        }
    }

    /// Signals the end of the stream.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Incomplete`] if the stream stopped inside a value.
    pub fn finish(&mut self) -> Result<(), BindError> {
        let open = self.depth + usize::from(self.in_batch);
        self.depth = 0;
        self.in_batch = false;
        if let Some(error) = self.failure.take() {
            return Err(error);
        }
        self.discard();
        if open > 0 {
            Err(BindError::at_root(self.name, ErrorKind::Incomplete { open }))
        } else {
            Ok(())
        }
    }

    /// Takes what had been bound of the value the last error was reported
    /// for.
    pub(crate) fn take_partial(&mut self) -> Option<R> {
        self.partial.take()
    }

    /// Feeds every event and collects the values they complete.
    pub fn feed_all<I>(&mut self, events: I) -> Vec<Result<R, BindError>>
    where
        I: IntoIterator<Item = JsonEvent>,
    {
        events.into_iter().filter_map(|event| self.feed(event)).collect()
    }

    /// Gives up on the current value; the error surfaces when it ends.
    fn abandon(&mut self, error: BindError) -> Option<Result<R, BindError>> {
        debug!(%error, "discarding value");
        self.discard();
        if self.depth == 0 {
            Some(Err(error))
        } else {
            self.failure = Some(error);
            None
        }
    }

    fn discard(&mut self) {
        self.stack.reset();
        self.partial = Some(mem::take(&mut self.root));
    }
}

/// Decodes one top-level value from an event sequence.
///
/// # Errors
///
/// The value's binding error, or [`ErrorKind::Incomplete`] if the events end
/// before the value does.
pub fn from_events<T: Bind>(events: impl IntoIterator<Item = JsonEvent>) -> Result<T, BindError> {
    let mut decoder = Decoder::<T>::new(DecoderOptions::default());
    let mut first = None;
    for event in events {
        if let Some(result) = decoder.feed(event) {
            first.get_or_insert(result);
        }
    }
    decoder.finish()?;
    first.unwrap_or_else(|| Err(BindError::at_root(T::NAME, ErrorKind::Incomplete { open: 0 })))
}

/// Decodes one record from JSON text.
///
/// # Errors
///
/// A syntax error from the tokenizer, or the record's binding error.
pub fn from_str<T: Bind>(text: &str) -> Result<T, DecodeError> {
    let events = source::events(text)?;
    Ok(from_events(events)?)
}

/// Binds a nested value with a decoder of its own, so a failure inside it
/// is kept as that value's outcome instead of aborting the enclosing one.
pub(crate) struct Isolated<R> {
    decoder: Decoder<R>,
    outcome: Option<Result<R, BindError>>,
}

impl<R: Default + 'static> Isolated<R> {
    pub(crate) fn new(name: &'static str, setter: ValueSetter<R>) -> Self {
        Self {
            decoder: Decoder::with_setter(name, setter, DecoderOptions::default()),
            outcome: None,
        }
    }
}

impl<R: Default + 'static> RawSink for Isolated<R> {
    fn event(&mut self, event: JsonEvent, options: &DecoderOptions) -> Result<(), ErrorKind> {
        self.decoder.options = DecoderOptions {
            allow_batches: false,
            ..*options
        };
        if let Some(result) = self.decoder.feed(event) {
            self.outcome.get_or_insert(result);
        }
        Ok(())
    }

    fn finish(self: Box<Self>, dest: &mut Slot) -> Result<(), ErrorKind> {
        let Self { decoder, outcome } = *self;
        let outcome = outcome.unwrap_or_else(|| {
            Err(BindError::at_root(decoder.name, ErrorKind::Incomplete { open: decoder.depth }))
        });
        let dest = dest
            .downcast_mut::<Option<Result<R, BindError>>>()
            .ok_or(ErrorKind::Unreachable)?;
        *dest = Some(outcome);
        Ok(())
    }
}
