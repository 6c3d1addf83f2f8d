//! JSON-RPC messages.
//!
//! [`MessageReader`] binds the envelope of each incoming message and
//! classifies it as a request, a notification or a response. Params are
//! bound as soon as they arrive, by a decoder of their own chosen from the
//! method, so a malformed params value fails only its message and the error
//! still knows which request to answer.
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::{
    decoder::{Decoder, Isolated},
    error::{BindError, ErrorKind},
    event::JsonEvent,
    initializer::{Bind, Initializer},
    options::DecoderOptions,
    path::PathComponent,
    protocol::{
        CompletionItem, CompletionParams, DidChangeTextDocumentParams, DidCloseTextDocumentParams,
        DidOpenTextDocumentParams, NumberOrString,
    },
    setter::{Push, ValueSetter},
    tape::{Recorder, Tape},
};

/// Identifier of a request, echoed by its response.
pub type RequestId = NumberOrString;

/// Error codes defined by JSON-RPC and the language server protocol.
#[derive(Debug, Clone, Copy)]
pub struct ErrorCodes;

impl ErrorCodes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    /// The server received a request before `initialize`.
    pub const SERVER_NOT_INITIALIZED: i32 = -32002;
    pub const UNKNOWN_ERROR_CODE: i32 = -32001;
    pub const REQUEST_FAILED: i32 = -32803;
    pub const SERVER_CANCELLED: i32 = -32802;
    pub const CONTENT_MODIFIED: i32 = -32801;
    pub const REQUEST_CANCELLED: i32 = -32800;
}

/// The `error` member of a failed response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponseError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Tape>,
}

impl ResponseError {
    #[must_use]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

impl Bind for ResponseError {
    const NAME: &'static str = "ResponseError";

    fn bind(init: &mut Initializer<Self>) {
        init.required("code", |e| &mut e.code, ValueSetter::number())
            .required("message", |e| &mut e.message, ValueSetter::string())
            .optional("data", |e| &mut e.data, Tape::setter());
    }
}

/// Params of `$/cancelRequest`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CancelParams {
    /// The request to cancel.
    pub id: RequestId,
}

impl Bind for CancelParams {
    const NAME: &'static str = "CancelParams";

    fn bind(init: &mut Initializer<Self>) {
        init.required("id", |p| &mut p.id, RequestId::setter());
    }
}

/// Setter for a params variant holding a `T`.
fn variant<T: Bind>(
    wrap: fn(T) -> Params,
    project: fn(&mut Params) -> Option<&mut T>,
) -> ValueSetter<Params> {
    ValueSetter::new().on_object(move |params: &mut Params| {
        *params = wrap(T::default());
        Push::record::<T>().within(project)
    })
}

macro_rules! params {
    ($($(#[$meta:meta])* $variant:ident($record:ty) = $method:literal,)*) => {
        /// Params of a message, typed by method.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(untagged)]
        pub enum Params {
            $($(#[$meta])* $variant($record),)*
            /// Params of any other method, as received.
            Other(Tape),
        }

        impl Params {
            /// The method these params belong to, when it is a registered one.
            #[must_use]
            pub fn method(&self) -> Option<&'static str> {
                match self {
                    $(Self::$variant(_) => Some($method),)*
                    Self::Other(_) => None,
                }
            }

            /// Whether `method` has a params record.
            #[must_use]
            pub fn is_registered(method: &str) -> bool {
                matches!(method, $($method)|*)
            }

            fn setter(method: &str) -> Option<ValueSetter<Self>> {
                match method {
                    $($method => Some(variant::<$record>(Self::$variant, |params| match params {
                        Self::$variant(record) => Some(record),
                        _ => None,
                    })),)*
                    _ => None,
                }
            }
        }
    };
}

params! {
    Completion(CompletionParams) = "textDocument/completion",
    ResolveCompletionItem(CompletionItem) = "completionItem/resolve",
    DidOpen(DidOpenTextDocumentParams) = "textDocument/didOpen",
    DidChange(DidChangeTextDocumentParams) = "textDocument/didChange",
    DidClose(DidCloseTextDocumentParams) = "textDocument/didClose",
    Cancel(CancelParams) = "$/cancelRequest",
}

impl Default for Params {
    fn default() -> Self {
        Self::Other(Tape::default())
    }
}

impl Params {
    /// Binds recorded params for `method` under `options`.
    ///
    /// # Errors
    ///
    /// The binding error of the params record.
    pub fn decode(method: &str, tape: &Tape, options: DecoderOptions) -> Result<Self, BindError> {
        match Self::setter(method) {
            Some(setter) => tape.decode_with("params", setter, options),
            None => Ok(Self::Other(tape.clone())),
        }
    }
}

/// A request: has a method and an id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    pub jsonrpc: String,
    pub id: RequestId,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
}

/// A notification: has a method and no id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub jsonrpc: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
}

/// A response: has an id, which is `null` when the request's id could not be
/// read, and exactly one of `result` and `error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub jsonrpc: String,
    pub id: Option<RequestId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Tape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}

/// A classified incoming message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Message {
    Request(Request),
    Notification(Notification),
    Response(Response),
}

impl Message {
    /// The method of a request or notification.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        match self {
            Self::Request(request) => Some(&request.method),
            Self::Notification(notification) => Some(&notification.method),
            Self::Response(_) => None,
        }
    }

    /// The id of a request or response.
    #[must_use]
    pub fn id(&self) -> Option<&RequestId> {
        match self {
            Self::Request(request) => Some(&request.id),
            Self::Response(response) => response.id.as_ref(),
            Self::Notification(_) => None,
        }
    }
}

/// A message that could not be bound or classified.
///
/// `id` and `method` are filled in whenever they were read, so the caller
/// can log the failure and, for requests, answer with an error response.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error}")]
pub struct MessageError {
    pub id: Option<RequestId>,
    pub method: Option<String>,
    #[source]
    pub error: BindError,
}

impl MessageError {
    /// The error response to send back for this failure.
    #[must_use]
    pub fn response_error(&self) -> ResponseError {
        let code = match (&self.error.kind, self.error.path.components().first()) {
            (ErrorKind::UnknownTopLevelShape { .. }, _) => ErrorCodes::INVALID_REQUEST,
            (_, Some(PathComponent::Key(key))) if key == "params" => ErrorCodes::INVALID_PARAMS,
            _ => ErrorCodes::INVALID_REQUEST,
        };
        ResponseError::new(code, self.error.to_string())
    }

    /// Wraps an envelope failure with whatever the partial envelope had
    /// read of the id and method.
    fn salvaged(error: BindError, partial: Option<Envelope>) -> Self {
        let (id, method) = partial.map_or((None, None), |envelope| (envelope.id.flatten(), envelope.method));
        match error.kind {
            ErrorKind::UnexpectedRootKind { .. } => Self::unknown_shape(method, id),
            _ => Self { id, method, error },
        }
    }

    fn unknown_shape(method: Option<String>, id: Option<RequestId>) -> Self {
        let error = BindError::at_root(
            Envelope::NAME,
            ErrorKind::UnknownTopLevelShape {
                method: method.clone(),
                id: id.as_ref().map(ToString::to_string),
            },
        );
        warn!(%error, "unclassifiable message");
        Self { id, method, error }
    }
}

/// The members of a message, before classification.
#[derive(Debug, Default)]
pub(crate) struct Envelope {
    jsonrpc: String,
    id: Option<Option<RequestId>>,
    method: Option<String>,
    params: Option<Result<Params, BindError>>,
    /// Params recorded before the method was known.
    deferred: Option<Tape>,
    result: Option<Tape>,
    error: Option<ResponseError>,
}

impl Bind for Envelope {
    const NAME: &'static str = "Message";

    fn bind(init: &mut Initializer<Self>) {
        init.required("jsonrpc", |m| &mut m.jsonrpc, ValueSetter::string())
            .optional("id", |m| &mut m.id, RequestId::setter().nullable())
            .optional("method", |m| &mut m.method, ValueSetter::string())
            .optional_entry(
                "params",
                ValueSetter::new()
                    .on_object(Self::open_params)
                    .on_array(Self::open_params)
                    .on_null(|m: &mut Self| {
                        m.params = None;
                        m.deferred = None;
                        Ok(())
                    }),
            )
            .optional("result", |m| &mut m.result, Tape::setter())
            .optional("error", |m| &mut m.error, ValueSetter::record());
    }
}

impl Envelope {
    fn open_params(&mut self) -> Push {
        self.params = None;
        self.deferred = None;
        match self.method.as_deref().and_then(Params::setter) {
            Some(setter) => {
                Push::raw(Isolated::new("params", setter)).within(|m: &mut Self| Some(&mut m.params))
            }
            None => {
                self.deferred = Some(Tape::default());
                Push::raw(Recorder::default()).within(|m: &mut Self| m.deferred.as_mut())
            }
        }
    }

    fn classify(self, options: &DecoderOptions) -> Result<Message, MessageError> {
        let Self {
            jsonrpc,
            id,
            method,
            params,
            deferred,
            result,
            error,
        } = self;
        let params = match (params, deferred, method.as_deref()) {
            (Some(bound), _, _) => Some(bound),
            (None, Some(tape), Some(method)) => Some(Params::decode(method, &tape, *options)),
            (None, Some(tape), None) => Some(Ok(Params::Other(tape))),
            (None, None, _) => None,
        };
        match (method, id) {
            (Some(method), Some(Some(id))) => match params.transpose() {
                Ok(params) => Ok(Message::Request(Request {
                    jsonrpc,
                    id,
                    method,
                    params,
                })),
                Err(error) => Err(MessageError {
                    id: Some(id),
                    method: Some(method),
                    error: prefixed(error),
                }),
            },
            (Some(method), None) => match params.transpose() {
                Ok(params) => Ok(Message::Notification(Notification {
                    jsonrpc,
                    method,
                    params,
                })),
                Err(error) => Err(MessageError {
                    id: None,
                    method: Some(method),
                    error: prefixed(error),
                }),
            },
            (None, Some(id)) if result.is_some() != error.is_some() => Ok(Message::Response(Response {
                jsonrpc,
                id,
                result,
                error,
            })),
            (method, id) => Err(MessageError::unknown_shape(method, id.flatten())),
        }
    }
}

/// Locates a params failure inside the message.
fn prefixed(error: BindError) -> BindError {
    BindError {
        path: error.path.prefixed("params"),
        ..error
    }
}

/// Reads JSON-RPC messages from an event stream.
///
/// # Examples
///
/// ```
/// use lspbind::{DecoderOptions, Message, MessageReader, Params};
///
/// let mut reader = MessageReader::new(DecoderOptions::default());
/// let messages = reader
///     .read_str(r#"{"jsonrpc": "2.0", "method": "exit"}"#)
///     .unwrap();
/// let Ok(Message::Notification(exit)) = &messages[0] else { panic!() };
/// assert_eq!(exit.method, "exit");
/// assert_eq!(exit.params, None);
/// ```
pub struct MessageReader {
    decoder: Decoder<Envelope>,
}

impl MessageReader {
    #[must_use]
    pub fn new(options: DecoderOptions) -> Self {
        Self {
            decoder: Decoder::new(options),
        }
    }

    /// Consumes one event; returns the message it completes, if any.
    pub fn feed(&mut self, event: JsonEvent) -> Option<Result<Message, MessageError>> {
        Some(match self.decoder.feed(event)? {
            Ok(envelope) => envelope.classify(self.decoder.options()),
            Err(error) => Err(MessageError::salvaged(error, self.decoder.take_partial())),
        })
    }

    /// Signals the end of the stream.
    ///
    /// # Errors
    ///
    /// If the stream stopped inside a message.
    pub fn finish(&mut self) -> Result<(), MessageError> {
        self.decoder
            .finish()
            .map_err(|error| MessageError::salvaged(error, self.decoder.take_partial()))
    }

    /// Reads every message in `text`.
    ///
    /// # Errors
    ///
    /// A syntax error in the text. Binding failures are reported per
    /// message.
    pub fn read_str(&mut self, text: &str) -> Result<Vec<Result<Message, MessageError>>, serde_json::Error> {
        let mut messages = Vec::new();
        crate::source::emit(text, |event| {
            if let Some(message) = self.feed(event) {
                messages.push(message);
            }
        })?;
        Ok(messages)
    }
}

impl Default for MessageReader {
    fn default() -> Self {
        Self::new(DecoderOptions::default())
    }
}
