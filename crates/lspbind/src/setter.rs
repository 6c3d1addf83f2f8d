//! Value setters: the per-key callbacks the engine dispatches values to.
//!
//! A [`ValueSetter<T>`] holds up to six slots, one per [`ValueKind`]. Scalar
//! slots convert a value and store it into a `T`. Container slots
//! default-construct the destination in place and return a [`Push`]: the
//! context that will bind the container's contents, plus the way to find the
//! destination again from the parent.
//!
//! Setters for record fields are written against the field type and then
//! [lifted](ValueSetter::lift) into the record through a projection, so one
//! setter per field type serves every record that has such a field.
use core::any::Any;

use crate::{
    convert::{Enumerant, FromNumber, Keyword},
    error::ErrorKind,
    event::{Number, Scalar, ValueKind},
    initializer::{Bind, Initializer},
    maker::Maker,
    stack::{Context, RawSink},
};

/// A type-erased destination the engine writes into.
pub type Slot = dyn Any;

/// Projects a parent's destination to a child's destination.
pub(crate) type Reach = Box<dyn for<'a> Fn(&'a mut Slot) -> Option<&'a mut Slot>>;

type StringSlot<T> = Box<dyn Fn(&mut T, String) -> Result<(), ErrorKind>>;
type NumberSlot<T> = Box<dyn Fn(&mut T, Number) -> Result<(), ErrorKind>>;
type BooleanSlot<T> = Box<dyn Fn(&mut T, bool) -> Result<(), ErrorKind>>;
type NullSlot<T> = Box<dyn Fn(&mut T) -> Result<(), ErrorKind>>;
type OpenSlot<T> = Box<dyn Fn(&mut T) -> Push>;

fn reach<F>(f: F) -> Reach
where
    F: for<'a> Fn(&'a mut Slot) -> Option<&'a mut Slot> + 'static,
{
    Box::new(f)
}

/// What a container slot hands back to the engine.
///
/// The engine pushes the contained context on its stack and feeds it every
/// event until the container closes.
pub struct Push {
    pub(crate) target: Target,
    pub(crate) reach: Reach,
}

pub(crate) enum Target {
    /// A context that binds keys or elements through setters.
    Bound(Box<dyn Context>),
    /// A sink that receives the container's raw events.
    Raw(Box<dyn RawSink>),
}

impl Push {
    /// Binds an object into the slot itself, using `T`'s binding table.
    #[must_use]
    pub fn record<T: Bind>() -> Self {
        Self::bound(Initializer::<T>::bound())
    }

    /// Binds an array into the slot itself, a `Vec<E>`, one element at a
    /// time with the setter `element` builds.
    #[must_use]
    pub fn array<E: Default + 'static>(element: fn() -> ValueSetter<E>) -> Self {
        Self::bound(Maker::new(element().appending()))
    }

    pub(crate) fn bound(context: impl Context + 'static) -> Self {
        Self {
            target: Target::Bound(Box::new(context)),
            reach: reach(|slot| Some(slot)),
        }
    }

    pub(crate) fn raw(sink: impl RawSink + 'static) -> Self {
        Self {
            target: Target::Raw(Box::new(sink)),
            reach: reach(|slot| Some(slot)),
        }
    }

    /// Re-targets the push from a `T` to an `O` that contains it.
    ///
    /// `project` is called again for every event routed to the pushed
    /// context, so it must find the same `T` each time.
    #[must_use]
    pub fn within<O, T, P>(self, project: P) -> Self
    where
        O: 'static,
        T: 'static,
        P: for<'a> Fn(&'a mut O) -> Option<&'a mut T> + 'static,
    {
        let Self { target, reach: inner } = self;
        Self {
            target,
            reach: reach(move |slot| {
                let owner = slot.downcast_mut::<O>()?;
                inner(project(owner)? as &mut Slot)
            }),
        }
    }
}

/// Why a setter did not take a value.
pub(crate) enum Rejection {
    /// No slot for this kind.
    Unaccepted(ValueKind),
    /// The slot fired but the value is not valid for the field.
    Invalid(ErrorKind),
}

impl Rejection {
    pub(crate) fn for_key(self, key: &str) -> ErrorKind {
        match self {
            Self::Unaccepted(kind) => ErrorKind::UnexpectedValueKind {
                key: key.to_owned(),
                kind,
            },
            Self::Invalid(kind) => kind,
        }
    }
}

/// Up to six callbacks, one per JSON value kind.
///
/// Only the slots matching the field's protocol type are populated; a value
/// of any other kind is a schema violation.
///
/// # Examples
///
/// ```
/// use lspbind::{ValueKind, ValueSetter};
///
/// let setter = ValueSetter::<String>::string();
/// assert!(setter.accepts(ValueKind::String));
/// assert!(!setter.accepts(ValueKind::Number));
/// ```
pub struct ValueSetter<T> {
    string: Option<StringSlot<T>>,
    number: Option<NumberSlot<T>>,
    boolean: Option<BooleanSlot<T>>,
    null: Option<NullSlot<T>>,
    array: Option<OpenSlot<T>>,
    object: Option<OpenSlot<T>>,
}

impl<T: 'static> Default for ValueSetter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> ValueSetter<T> {
    /// A setter with no slots.
    #[must_use]
    pub fn new() -> Self {
        Self {
            string: None,
            number: None,
            boolean: None,
            null: None,
            array: None,
            object: None,
        }
    }

    /// Installs the string slot.
    #[must_use]
    pub fn on_string(mut self, f: impl Fn(&mut T, String) -> Result<(), ErrorKind> + 'static) -> Self {
        self.string = Some(Box::new(f));
        self
    }

    /// Installs the number slot.
    #[must_use]
    pub fn on_number(mut self, f: impl Fn(&mut T, Number) -> Result<(), ErrorKind> + 'static) -> Self {
        self.number = Some(Box::new(f));
        self
    }

    /// Installs the boolean slot.
    #[must_use]
    pub fn on_boolean(mut self, f: impl Fn(&mut T, bool) -> Result<(), ErrorKind> + 'static) -> Self {
        self.boolean = Some(Box::new(f));
        self
    }

    /// Installs the null slot.
    #[must_use]
    pub fn on_null(mut self, f: impl Fn(&mut T) -> Result<(), ErrorKind> + 'static) -> Self {
        self.null = Some(Box::new(f));
        self
    }

    /// Installs the array slot.
    #[must_use]
    pub fn on_array(mut self, f: impl Fn(&mut T) -> Push + 'static) -> Self {
        self.array = Some(Box::new(f));
        self
    }

    /// Installs the object slot.
    #[must_use]
    pub fn on_object(mut self, f: impl Fn(&mut T) -> Push + 'static) -> Self {
        self.object = Some(Box::new(f));
        self
    }

    /// Whether a value of `kind` has a slot.
    #[must_use]
    pub fn accepts(&self, kind: ValueKind) -> bool {
        match kind {
            ValueKind::String => self.string.is_some(),
            ValueKind::Number => self.number.is_some(),
            ValueKind::Boolean => self.boolean.is_some(),
            ValueKind::Null => self.null.is_some(),
            ValueKind::Array => self.array.is_some(),
            ValueKind::Object => self.object.is_some(),
        }
    }

    pub(crate) fn set(&self, dest: &mut T, value: Scalar) -> Result<(), Rejection> {
        let kind = value.kind();
        let outcome = match value {
            Scalar::String(s) => self.string.as_ref().map(|f| f(dest, s)),
            Scalar::Number(n) => self.number.as_ref().map(|f| f(dest, n)),
            Scalar::Boolean(b) => self.boolean.as_ref().map(|f| f(dest, b)),
            Scalar::Null => self.null.as_ref().map(|f| f(dest)),
        };
        match outcome {
            Some(result) => result.map_err(Rejection::Invalid),
            None => Err(Rejection::Unaccepted(kind)),
        }
    }

    pub(crate) fn open(&self, dest: &mut T, kind: ValueKind) -> Option<Push> {
        let slot = match kind {
            ValueKind::Array => self.array.as_ref(),
            ValueKind::Object => self.object.as_ref(),
            ValueKind::String | ValueKind::Number | ValueKind::Boolean | ValueKind::Null => None,
        };
        slot.map(|f| f(dest))
    }

    /// Applies this setter to the `T` inside an `O`.
    #[must_use]
    pub fn lift<O: 'static>(self, project: fn(&mut O) -> &mut T) -> ValueSetter<O> {
        let Self {
            string,
            number,
            boolean,
            null,
            array,
            object,
        } = self;
        ValueSetter {
            string: string.map(|f| -> StringSlot<O> {
                Box::new(move |owner: &mut O, value: String| f(project(owner), value))
            }),
            number: number.map(|f| -> NumberSlot<O> {
                Box::new(move |owner: &mut O, value: Number| f(project(owner), value))
            }),
            boolean: boolean.map(|f| -> BooleanSlot<O> {
                Box::new(move |owner: &mut O, value: bool| f(project(owner), value))
            }),
            null: null.map(|f| -> NullSlot<O> { Box::new(move |owner: &mut O| f(project(owner))) }),
            array: array.map(|f| lift_open(f, project)),
            object: object.map(|f| lift_open(f, project)),
        }
    }

    /// Stores into an `Option` that stays `None` until a value arrives.
    #[must_use]
    pub fn optional(self) -> ValueSetter<Option<T>>
    where
        T: Default,
    {
        self.lift(present::<T>)
    }

    /// Like [`optional`](Self::optional), and `null` also stores `None`.
    #[must_use]
    pub fn nullable(self) -> ValueSetter<Option<T>>
    where
        T: Default,
    {
        self.optional().on_null(|slot: &mut Option<T>| {
            *slot = None;
            Ok(())
        })
    }

    /// Turns an element setter into the extra setter of an array maker.
    ///
    /// Scalars are converted first and appended only if valid. Containers
    /// append a default element and bind into it where it lies.
    pub(crate) fn appending(self) -> ValueSetter<Vec<T>>
    where
        T: Default,
    {
        let Self {
            string,
            number,
            boolean,
            null,
            array,
            object,
        } = self;
        ValueSetter {
            string: string.map(|f| -> StringSlot<Vec<T>> {
                Box::new(move |items: &mut Vec<T>, value: String| {
                    let mut item = T::default();
                    f(&mut item, value)?;
                    items.push(item);
                    Ok(())
                })
            }),
            number: number.map(|f| -> NumberSlot<Vec<T>> {
                Box::new(move |items: &mut Vec<T>, value: Number| {
                    let mut item = T::default();
                    f(&mut item, value)?;
                    items.push(item);
                    Ok(())
                })
            }),
            boolean: boolean.map(|f| -> BooleanSlot<Vec<T>> {
                Box::new(move |items: &mut Vec<T>, value: bool| {
                    let mut item = T::default();
                    f(&mut item, value)?;
                    items.push(item);
                    Ok(())
                })
            }),
            null: null.map(|f| -> NullSlot<Vec<T>> {
                Box::new(move |items: &mut Vec<T>| {
                    let mut item = T::default();
                    f(&mut item)?;
                    items.push(item);
                    Ok(())
                })
            }),
            array: array.map(append_open),
            object: object.map(append_open),
        }
    }
}

fn present<T: Default>(slot: &mut Option<T>) -> &mut T {
    slot.get_or_insert_with(T::default)
}

fn lift_open<O: 'static, T: 'static>(open: OpenSlot<T>, project: fn(&mut O) -> &mut T) -> OpenSlot<O> {
    Box::new(move |owner: &mut O| {
        open(project(owner)).within(move |owner: &mut O| Some(project(owner)))
    })
}

fn append_open<T: Default + 'static>(open: OpenSlot<T>) -> OpenSlot<Vec<T>> {
    Box::new(move |items: &mut Vec<T>| {
        let index = items.len();
        items.push(T::default());
        open(&mut items[index]).within(|items: &mut Vec<T>| items.last_mut())
    })
}

impl ValueSetter<String> {
    /// A string field.
    #[must_use]
    pub fn string() -> Self {
        Self::new().on_string(|dest, value| {
            *dest = value;
            Ok(())
        })
    }
}

impl ValueSetter<bool> {
    /// A boolean field.
    #[must_use]
    pub fn boolean() -> Self {
        Self::new().on_boolean(|dest, value| {
            *dest = value;
            Ok(())
        })
    }
}

impl<N: FromNumber> ValueSetter<N> {
    /// A numeric field; the number must fit `N` exactly.
    #[must_use]
    pub fn number() -> Self {
        Self::new().on_number(|dest, value| {
            *dest = N::from_number(value).ok_or(ErrorKind::MalformedNumber {
                expected: N::EXPECTED,
                value,
            })?;
            Ok(())
        })
    }
}

impl<E: Enumerant> ValueSetter<E> {
    /// An integer-coded enumeration; unknown codes are malformed.
    #[must_use]
    pub fn enumerant() -> Self {
        Self::new().on_number(|dest, value| {
            *dest = value
                .as_i64()
                .and_then(E::from_code)
                .ok_or_else(|| ErrorKind::MalformedEnumerant {
                    enumeration: E::NAME,
                    value: value.to_string(),
                })?;
            Ok(())
        })
    }
}

impl<K: Keyword> ValueSetter<K> {
    /// A string-coded enumeration; unknown keywords are malformed.
    #[must_use]
    pub fn keyword() -> Self {
        Self::new().on_string(|dest, value| {
            *dest = K::from_keyword(&value).ok_or_else(|| ErrorKind::MalformedEnumerant {
                enumeration: K::NAME,
                value: format!("{value:?}"),
            })?;
            Ok(())
        })
    }
}

impl<T: Bind> ValueSetter<T> {
    /// A nested record, bound in place with `T`'s own table.
    #[must_use]
    pub fn record() -> Self {
        Self::new().on_object(|dest| {
            *dest = T::default();
            Push::record::<T>()
        })
    }
}

impl<E: Default + 'static> ValueSetter<Vec<E>> {
    /// A homogeneous array whose elements are bound by `element`'s setter.
    ///
    /// `[]` yields an empty sequence.
    #[must_use]
    pub fn array(element: fn() -> ValueSetter<E>) -> Self {
        Self::new().on_array(move |dest| {
            dest.clear();
            Push::array(element)
        })
    }
}
