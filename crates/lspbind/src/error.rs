use thiserror::Error;

use crate::{
    event::{Number, ValueKind},
    path::JsonPath,
};

/// Why a value could not be bound.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    /// A key received a kind of value its setter has no slot for.
    #[error("unexpected {kind} value for key `{key}`")]
    UnexpectedValueKind { key: String, kind: ValueKind },
    /// An array element of a kind the element maker cannot bind.
    #[error("unexpected {kind} array element")]
    UnexpectedElementKind { kind: ValueKind },
    /// The top-level value is of a kind the root binder does not accept.
    #[error("unexpected {kind} at the top level")]
    UnexpectedRootKind { kind: ValueKind },
    /// An object closed before one of its mandatory keys was seen.
    #[error("missing required key `{key}`")]
    MissingRequiredKey { key: &'static str },
    /// A value outside the known codes of a protocol enumeration.
    #[error("malformed {enumeration} enumerant {value}")]
    MalformedEnumerant {
        enumeration: &'static str,
        value: String,
    },
    /// A number that does not fit the field's numeric type.
    #[error("number {value} is not a valid {expected}")]
    MalformedNumber {
        expected: &'static str,
        value: Number,
    },
    /// A message that is neither a request, a notification nor a response.
    #[error("message is not a request, notification or response{}", describe_shape(.method.as_deref(), .id.as_deref()))]
    UnknownTopLevelShape {
        method: Option<String>,
        id: Option<String>,
    },
    /// Nesting went deeper than [`DecoderOptions::max_depth`](crate::DecoderOptions::max_depth).
    #[error("nesting exceeds the limit of {limit}")]
    DepthLimitExceeded { limit: usize },
    /// An event that cannot occur at this point of a well-formed document.
    #[error("unexpected {event} event")]
    UnexpectedEvent { event: &'static str },
    /// The event stream ended while a value was still open.
    #[error("event stream ended inside a value ({open} open containers)")]
    Incomplete { open: usize },
    /// The engine lost track of the slot the active context writes to.
    #[error("destination of the active context is unreachable")]
    Unreachable,
}

fn describe_shape(method: Option<&str>, id: Option<&str>) -> String {
    match (method, id) {
        (Some(method), Some(id)) => format!(" (method `{method}`, id {id})"),
        (Some(method), None) => format!(" (method `{method}`)"),
        (None, Some(id)) => format!(" (id {id})"),
        (None, None) => String::new(),
    }
}

/// A binding failure tied to the nearest enclosing record.
///
/// `path` locates the offending value (or, for a missing key, the record that
/// lacks it) relative to the top-level value being decoded.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} in `{record}` at {path}")]
pub struct BindError {
    pub record: &'static str,
    pub path: JsonPath,
    pub kind: ErrorKind,
}

impl BindError {
    /// A failure that concerns the value as a whole.
    #[must_use]
    pub fn at_root(record: &'static str, kind: ErrorKind) -> Self {
        Self {
            record,
            path: JsonPath::root(),
            kind,
        }
    }
}

/// Failure to decode JSON text into a record.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("syntax error: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error(transparent)]
    Bind(#[from] BindError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;

    #[test]
    fn display_mentions_record_key_and_path() {
        let err = BindError {
            record: "CompletionContext",
            path: path!["params", "context", "triggerKind"],
            kind: ErrorKind::UnexpectedValueKind {
                key: "triggerKind".into(),
                kind: ValueKind::String,
            },
        };
        insta::assert_snapshot!(err, @"unexpected string value for key `triggerKind` in `CompletionContext` at $.params.context.triggerKind");
    }

    #[test]
    fn unknown_shape_lists_available_context() {
        let kind = ErrorKind::UnknownTopLevelShape {
            method: Some("textDocument/hover".into()),
            id: None,
        };
        insta::assert_snapshot!(kind, @"message is not a request, notification or response (method `textDocument/hover`)");
    }
}
