//! Outgoing messages.
//!
//! Records serialize through `serde`; these helpers wrap them in JSON-RPC
//! envelopes. Absent optional members are left out, never sent as `null`.
use serde::Serialize;

use crate::message::{RequestId, ResponseError};

const JSONRPC: &str = "2.0";

#[derive(Serialize)]
struct OutgoingRequest<'a, P> {
    jsonrpc: &'static str,
    id: &'a RequestId,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'a P>,
}

#[derive(Serialize)]
struct OutgoingNotification<'a, P> {
    jsonrpc: &'static str,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'a P>,
}

#[derive(Serialize)]
struct OutgoingResponse<'a, R> {
    jsonrpc: &'static str,
    id: Option<&'a RequestId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a R>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a ResponseError>,
}

/// Serializes any record to JSON text.
///
/// # Errors
///
/// Only if `value` fails to serialize, e.g. a malformed [`Tape`](crate::Tape).
pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// A request envelope.
///
/// # Errors
///
/// See [`to_string`].
///
/// # Examples
///
/// ```
/// use lspbind::{encode, protocol::Position};
///
/// let text = encode::request(&7.into(), "custom/at", Some(&Position::new(1, 2))).unwrap();
/// assert_eq!(
///     text,
///     r#"{"jsonrpc":"2.0","id":7,"method":"custom/at","params":{"line":1,"character":2}}"#
/// );
/// ```
pub fn request<P: Serialize>(id: &RequestId, method: &str, params: Option<&P>) -> Result<String, serde_json::Error> {
    to_string(&OutgoingRequest {
        jsonrpc: JSONRPC,
        id,
        method,
        params,
    })
}

/// A notification envelope.
///
/// # Errors
///
/// See [`to_string`].
pub fn notification<P: Serialize>(method: &str, params: Option<&P>) -> Result<String, serde_json::Error> {
    to_string(&OutgoingNotification {
        jsonrpc: JSONRPC,
        method,
        params,
    })
}

/// A successful response. A `None` id is sent as `null`.
///
/// # Errors
///
/// See [`to_string`].
pub fn response<R: Serialize>(id: Option<&RequestId>, result: &R) -> Result<String, serde_json::Error> {
    to_string(&OutgoingResponse {
        jsonrpc: JSONRPC,
        id,
        result: Some(result),
        error: None,
    })
}

/// A failed response. A `None` id is sent as `null`.
///
/// # Errors
///
/// See [`to_string`].
pub fn error_response(id: Option<&RequestId>, error: &ResponseError) -> Result<String, serde_json::Error> {
    to_string(&OutgoingResponse::<()> {
        jsonrpc: JSONRPC,
        id,
        result: None,
        error: Some(error),
    })
}
