#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lspbind::{DecoderOptions, JsonEvent, MessageReader};

const KEYS: &[&str] = &[
    "jsonrpc",
    "id",
    "method",
    "params",
    "result",
    "error",
    "textDocument",
    "uri",
    "position",
    "line",
    "character",
    "context",
    "triggerKind",
    "contentChanges",
    "range",
    "start",
    "end",
    "text",
];

const METHODS: &[&str] = &[
    "textDocument/completion",
    "completionItem/resolve",
    "textDocument/didOpen",
    "textDocument/didChange",
    "textDocument/didClose",
    "$/cancelRequest",
    "initialize",
];

/// Events drawn from a small vocabulary so keys and methods line up with
/// registered records often enough to reach their setters.
#[derive(Debug, Arbitrary)]
enum Event {
    ObjectBegin,
    ObjectEnd,
    ArrayStart,
    ArrayEnd,
    Key(u8),
    Method(u8),
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl From<Event> for JsonEvent {
    fn from(event: Event) -> Self {
        match event {
            Event::ObjectBegin => Self::ObjectBegin,
            Event::ObjectEnd => Self::ObjectEnd,
            Event::ArrayStart => Self::ArrayStart,
            Event::ArrayEnd => Self::ArrayEnd,
            Event::Key(k) => Self::key(KEYS[usize::from(k) % KEYS.len()]),
            Event::Method(m) => Self::string(METHODS[usize::from(m) % METHODS.len()]),
            Event::String(s) => Self::string(s),
            Event::Integer(i) => Self::integer(i),
            Event::Float(f) => Self::float(f),
            Event::Boolean(b) => Self::boolean(b),
            Event::Null => Self::null(),
        }
    }
}

#[derive(Debug, Arbitrary)]
enum Input {
    /// Arbitrary, possibly ill-formed, event sequences.
    Events {
        batches: bool,
        skip_unknown: bool,
        max_depth: Option<u8>,
        events: Vec<Event>,
    },
    /// JSON text through the tokenizer.
    Text(String),
}

fuzz_target!(|input: Input| {
    match input {
        Input::Events {
            batches,
            skip_unknown,
            max_depth,
            events,
        } => {
            let mut reader = MessageReader::new(DecoderOptions {
                allow_batches: batches,
                skip_unknown_enumerants_in_arrays: skip_unknown,
                max_depth: max_depth.map(usize::from),
            });
            for event in events {
                let _ = reader.feed(event.into());
            }
            let _ = reader.finish();
            if max_depth == Some(0) {
                return;
            }
            // The reader must be reusable after any failure.
            let messages = reader
                .read_str(r#"{"jsonrpc": "2.0", "method": "exit"}"#)
                .expect("valid JSON");
            assert!(matches!(messages.as_slice(), [Ok(m)] if m.method() == Some("exit")));
        }
        Input::Text(text) => {
            let mut reader = MessageReader::default();
            let _ = reader.read_str(&text);
            let _ = reader.finish();
        }
    }
});
