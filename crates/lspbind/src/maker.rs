//! Array element binding.
use tracing::debug;

use crate::{
    error::ErrorKind,
    event::{Scalar, ValueKind},
    options::DecoderOptions,
    setter::{Push, Rejection, Slot, ValueSetter},
    stack::{Context, Layout},
};

/// Appends one element to a `Vec<E>` per array member.
pub(crate) struct Maker<E> {
    extra: ValueSetter<Vec<E>>,
}

impl<E: 'static> Maker<E> {
    pub(crate) fn new(extra: ValueSetter<Vec<E>>) -> Self {
        Self { extra }
    }
}

impl<E: 'static> Context for Maker<E> {
    fn record(&self) -> Option<&'static str> {
        None
    }

    fn layout(&self) -> Layout {
        Layout::Indexed
    }

    fn scalar(
        &mut self,
        dest: &mut Slot,
        _key: Option<&str>,
        value: Scalar,
        options: &DecoderOptions,
    ) -> Result<(), ErrorKind> {
        let items = dest.downcast_mut::<Vec<E>>().ok_or(ErrorKind::Unreachable)?;
        match self.extra.set(items, value) {
            Ok(()) => Ok(()),
            Err(Rejection::Invalid(ErrorKind::MalformedEnumerant { enumeration, value }))
                if options.skip_unknown_enumerants_in_arrays =>
            {
                debug!(enumeration, %value, "dropping unknown enumerant");
                Ok(())
            }
            Err(Rejection::Invalid(kind)) => Err(kind),
            Err(Rejection::Unaccepted(kind)) => Err(ErrorKind::UnexpectedElementKind { kind }),
        }
    }

    fn open(&mut self, dest: &mut Slot, _key: Option<&str>, kind: ValueKind) -> Result<Option<Push>, ErrorKind> {
        let items = dest.downcast_mut::<Vec<E>>().ok_or(ErrorKind::Unreachable)?;
        self.extra
            .open(items, kind)
            .map(Some)
            .ok_or(ErrorKind::UnexpectedElementKind { kind })
    }

    fn close(&mut self) -> Result<(), ErrorKind> {
        Ok(())
    }
}
