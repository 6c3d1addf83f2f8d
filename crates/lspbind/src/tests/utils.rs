use crate::{Bind, BindError, DecodeError, Decoder, DecoderOptions, source};

/// Decodes `text` as one `T`, panicking on syntax errors.
pub(crate) fn bind<T: Bind>(text: &str) -> Result<T, BindError> {
    match crate::from_str::<T>(text) {
        Ok(value) => Ok(value),
        Err(DecodeError::Bind(error)) => Err(error),
        Err(DecodeError::Syntax(error)) => panic!("test document is not JSON: {error}"),
    }
}

/// Decodes every top-level value in `text` with `options`.
pub(crate) fn bind_all<T: Bind>(text: &str, options: DecoderOptions) -> Vec<Result<T, BindError>> {
    let events = source::events(text).expect("test document is not JSON");
    Decoder::<T>::new(options).feed_all(events)
}
