//! Event-driven binding of language server protocol messages.
//!
//! JSON arrives as a stream of [`JsonEvent`]s and is written straight into
//! typed protocol records, without an intermediate document tree. Each record
//! describes its wire shape once, in a [`Bind`] implementation that registers
//! a [`ValueSetter`] per key; the engine keeps a stack of binding contexts
//! that mirrors the nesting of the document, checks required keys when an
//! object closes and reports failures as [`BindError`]s that name the record
//! and the path of the offending value.
//!
//! ```
//! use lspbind::{DecoderOptions, Message, MessageReader, Params};
//!
//! let mut reader = MessageReader::new(DecoderOptions::default());
//! let messages = reader
//!     .read_str(
//!         r#"{"jsonrpc": "2.0", "id": 1, "method": "textDocument/completion",
//!             "params": {"textDocument": {"uri": "file:///a.rs"},
//!                        "position": {"line": 3, "character": 7}}}"#,
//!     )
//!     .unwrap();
//! let Ok(Message::Request(request)) = &messages[0] else { panic!() };
//! let Some(Params::Completion(params)) = &request.params else { panic!() };
//! assert_eq!(params.text_document_position.position.line, 3);
//! ```
#![allow(missing_docs)]

mod convert;
mod event;
mod ledger;
mod path;
mod setter;

mod decoder;
mod error;
mod initializer;
mod maker;
mod options;
mod stack;
mod tape;

pub mod encode;
pub mod message;
pub mod protocol;
pub mod source;

#[cfg(test)]
mod tests;

pub use convert::{Enumerant, FromNumber, Keyword};
pub use decoder::{Decoder, from_events, from_str};
pub use error::{BindError, DecodeError, ErrorKind};
pub use event::{JsonEvent, Number, Scalar, ValueKind};
pub use initializer::{Bind, Initializer};
pub use ledger::Ledger;
pub use message::{
    CancelParams, ErrorCodes, Message, MessageError, MessageReader, Notification, Params, Request, RequestId,
    Response, ResponseError,
};
pub use options::DecoderOptions;
pub use path::{JsonPath, PathComponent};
pub use setter::{Push, Slot, ValueSetter};
pub use tape::Tape;
