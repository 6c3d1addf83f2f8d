//! The push-down stack of binding contexts.
//!
//! The bottom frame binds the top-level value. Every container that opens
//! pushes the context its setter returned; every container that closes pops
//! it. Frames do not hold references into the value under construction:
//! each stores how to reach its own destination from its parent's, and the
//! active destination is found by walking those steps from the owned root.
use tracing::trace;

use crate::{
    error::{BindError, ErrorKind},
    event::{JsonEvent, Scalar, ValueKind},
    options::DecoderOptions,
    path::{JsonPath, PathComponent},
    setter::{Push, Reach, Slot, Target},
};

/// How a context addresses its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Layout {
    /// Binds the one top-level value.
    Root,
    /// Binds an object's members by key.
    Keyed,
    /// Binds an array's elements in order.
    Indexed,
}

/// A binding context: an initializer, an element maker or the root binder.
pub(crate) trait Context {
    /// The protocol record this context binds, if any.
    fn record(&self) -> Option<&'static str>;

    fn layout(&self) -> Layout;

    /// Stores a scalar member. `key` is `None` outside of objects.
    fn scalar(
        &mut self,
        dest: &mut Slot,
        key: Option<&str>,
        value: Scalar,
        options: &DecoderOptions,
    ) -> Result<(), ErrorKind>;

    /// Opens a container member. `Ok(None)` means the member is unknown
    /// and its whole subtree is skipped.
    fn open(&mut self, dest: &mut Slot, key: Option<&str>, kind: ValueKind) -> Result<Option<Push>, ErrorKind>;

    /// The context's own container closed.
    fn close(&mut self) -> Result<(), ErrorKind>;
}

/// Receives a container's events verbatim, then writes the outcome once.
pub(crate) trait RawSink {
    fn event(&mut self, event: JsonEvent, options: &DecoderOptions) -> Result<(), ErrorKind>;

    fn finish(self: Box<Self>, dest: &mut Slot) -> Result<(), ErrorKind>;
}

enum Active {
    Bound(Box<dyn Context>),
    Raw { sink: Box<dyn RawSink>, depth: usize },
}

struct Frame {
    active: Active,
    reach: Reach,
    container: Option<ValueKind>,
    cursor: Option<PathComponent>,
}

impl Frame {
    fn record(&self) -> Option<&'static str> {
        match &self.active {
            Active::Bound(context) => context.record(),
            Active::Raw { .. } => None,
        }
    }

    fn key(&self) -> Option<&str> {
        self.cursor.as_ref().and_then(PathComponent::as_key)
    }

    /// Moves past the member that just completed.
    fn advance(&mut self) {
        self.cursor = match self.cursor.take() {
            Some(PathComponent::Index(i)) => Some(PathComponent::Index(i + 1)),
            Some(PathComponent::Key(_)) | None => None,
        };
    }
}

fn destination<'r>(root: &'r mut Slot, frames: &[Frame]) -> Option<&'r mut Slot> {
    frames.iter().try_fold(root, |dest, frame| (frame.reach)(dest))
}

pub(crate) struct InitializerStack {
    frames: Vec<Frame>,
    /// Open containers inside an unknown member being skipped.
    skipping: usize,
}

impl InitializerStack {
    pub(crate) fn new(root: impl Context + 'static) -> Self {
        let Push { target, reach } = Push::bound(root);
        let active = match target {
            Target::Bound(context) => Active::Bound(context),
            Target::Raw(sink) => Active::Raw { sink, depth: 0 },
        };
        Self {
            frames: vec![Frame {
                active,
                reach,
                container: None,
                cursor: None,
            }],
            skipping: 0,
        }
    }

    /// Drops everything above the root frame.
    pub(crate) fn reset(&mut self) {
        self.frames.truncate(1);
        self.skipping = 0;
        if let Some(root) = self.frames.first_mut() {
            root.cursor = None;
        }
    }

    /// Routes one event. Returns `true` once the top-level value is complete.
    pub(crate) fn dispatch(
        &mut self,
        root: &mut Slot,
        event: JsonEvent,
        options: &DecoderOptions,
    ) -> Result<bool, BindError> {
        if self.skipping > 0 {
            self.skip(&event);
            return Ok(false);
        }
        if let Some(Frame {
            active: Active::Raw { .. },
            ..
        }) = self.frames.last()
        {
            return self.forward(root, event, options);
        }
        match event {
            JsonEvent::Key(key) => self.key(key).map(|()| false),
            JsonEvent::Value(value) => self.scalar(root, value, options),
            JsonEvent::ObjectBegin => self.open(root, ValueKind::Object, options),
            JsonEvent::ArrayStart => self.open(root, ValueKind::Array, options),
            JsonEvent::ObjectEnd => self.close(ValueKind::Object),
            JsonEvent::ArrayEnd => self.close(ValueKind::Array),
        }
    }

    /// A failure located at the active member.
    fn fail(&self, kind: ErrorKind) -> BindError {
        BindError {
            record: self
                .frames
                .iter()
                .rev()
                .find_map(Frame::record)
                .unwrap_or("value"),
            path: self.path(),
            kind,
        }
    }

    fn path(&self) -> JsonPath {
        self.frames
            .iter()
            .filter_map(|frame| frame.cursor.clone())
            .collect()
    }

    fn skip(&mut self, event: &JsonEvent) {
        if event.opens() {
            self.skipping += 1;
        } else if event.closes() {
            self.skipping -= 1;
            if self.skipping == 0 {
                if let Some(frame) = self.frames.last_mut() {
                    frame.advance();
                }
            }
        }
    }

    fn key(&mut self, key: String) -> Result<(), BindError> {
        let keyed = matches!(
            self.frames.last(),
            Some(Frame { active: Active::Bound(context), .. }) if context.layout() == Layout::Keyed
        );
        if !keyed {
            return Err(self.fail(ErrorKind::UnexpectedEvent { event: "key" }));
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.cursor = Some(PathComponent::Key(key));
        }
        Ok(())
    }

    // ── scalars ─────────────────────────────────────────────────────────

    fn scalar(&mut self, root: &mut Slot, value: Scalar, options: &DecoderOptions) -> Result<bool, BindError> {
        let Some(dest) = destination(root, &self.frames) else {
            return Err(self.fail(ErrorKind::Unreachable));
        };
        let stored = match self.frames.last_mut() {
            Some(frame) => {
                let key = frame.cursor.as_ref().and_then(PathComponent::as_key);
                match &mut frame.active {
                    Active::Bound(context) => context.scalar(dest, key, value, options),
                    Active::Raw { .. } => Err(ErrorKind::Unreachable),
                }
            }
            None => Err(ErrorKind::Unreachable),
        };
        if let Err(kind) = stored {
            return Err(self.fail(kind));
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.advance();
        }
        Ok(self.frames.len() == 1)
    }

    // ── container starts ────────────────────────────────────────────────

    fn open(&mut self, root: &mut Slot, kind: ValueKind, options: &DecoderOptions) -> Result<bool, BindError> {
        let Some(dest) = destination(root, &self.frames) else {
            return Err(self.fail(ErrorKind::Unreachable));
        };
        let opened = match self.frames.last_mut() {
            Some(frame) => {
                let key = frame.cursor.as_ref().and_then(PathComponent::as_key);
                match &mut frame.active {
                    Active::Bound(context) => context.open(dest, key, kind),
                    Active::Raw { .. } => Err(ErrorKind::Unreachable),
                }
            }
            None => Err(ErrorKind::Unreachable),
        };
        match opened {
            Ok(Some(push)) => self.push(push, kind, options).map(|()| false),
            Ok(None) => {
                trace!(key = self.frames.last().and_then(Frame::key), "skipping unknown member");
                self.skipping = 1;
                Ok(false)
            }
            Err(error) => Err(self.fail(error)),
        }
    }

    fn push(&mut self, push: Push, kind: ValueKind, options: &DecoderOptions) -> Result<(), BindError> {
        let Push { target, reach } = push;
        let (active, cursor) = match target {
            Target::Bound(context) => {
                let cursor = (context.layout() == Layout::Indexed).then_some(PathComponent::Index(0));
                (Active::Bound(context), cursor)
            }
            Target::Raw(mut sink) => {
                let opening = match kind {
                    ValueKind::Array => JsonEvent::ArrayStart,
                    _ => JsonEvent::ObjectBegin,
                };
                if let Err(error) = sink.event(opening, options) {
                    return Err(self.fail(error));
                }
                (Active::Raw { sink, depth: 1 }, None)
            }
        };
        let frame = Frame {
            active,
            reach,
            container: Some(kind),
            cursor,
        };
        trace!(record = frame.record(), depth = self.frames.len(), %kind, "push");
        self.frames.push(frame);
        Ok(())
    }

    // ── container ends ──────────────────────────────────────────────────

    fn close(&mut self, kind: ValueKind) -> Result<bool, BindError> {
        let closed = match self.frames.last_mut() {
            Some(frame) if frame.container == Some(kind) => match &mut frame.active {
                Active::Bound(context) => context.close(),
                Active::Raw { .. } => Err(ErrorKind::Unreachable),
            },
            _ => Err(ErrorKind::UnexpectedEvent {
                event: match kind {
                    ValueKind::Array => "array end",
                    _ => "object end",
                },
            }),
        };
        if let Err(error) = closed {
            return Err(self.fail(error));
        }
        let popped = self.frames.pop();
        trace!(record = popped.as_ref().and_then(Frame::record), depth = self.frames.len(), "pop");
        Ok(self.completed())
    }

    /// Routes an event into the raw sink on top; pops it once its container
    /// closes and lets it write its outcome into the parent.
    fn forward(&mut self, root: &mut Slot, event: JsonEvent, options: &DecoderOptions) -> Result<bool, BindError> {
        let forwarded = match self.frames.last_mut() {
            Some(Frame {
                active: Active::Raw { sink, depth },
                ..
            }) => {
                if event.opens() {
                    *depth += 1;
                } else if event.closes() {
                    *depth -= 1;
                }
                let done = *depth == 0;
                sink.event(event, options).map(|()| done)
            }
            _ => Err(ErrorKind::Unreachable),
        };
        match forwarded {
            Ok(true) => {}
            Ok(false) => return Ok(false),
            Err(error) => return Err(self.fail(error)),
        }
        let Some(Frame { active, reach, .. }) = self.frames.pop() else {
            return Err(self.fail(ErrorKind::Unreachable));
        };
        let finished = match (active, destination(root, &self.frames)) {
            (Active::Raw { sink, .. }, Some(parent)) => match reach(parent) {
                Some(dest) => sink.finish(dest),
                None => Err(ErrorKind::Unreachable),
            },
            _ => Err(ErrorKind::Unreachable),
        };
        if let Err(error) = finished {
            return Err(self.fail(error));
        }
        trace!(depth = self.frames.len(), "pop raw");
        Ok(self.completed())
    }

    /// Advances the parent past the member that just closed; `true` when
    /// that member was the top-level value.
    fn completed(&mut self) -> bool {
        if let Some(parent) = self.frames.last_mut() {
            parent.advance();
        }
        self.frames.len() == 1
    }
}
