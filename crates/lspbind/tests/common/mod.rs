#![allow(dead_code)]

/// A short editing session as a client would send it.
pub const SESSION: &str = r#"
{"jsonrpc": "2.0", "id": 0, "method": "initialize", "params": {"processId": null, "rootUri": "file:///w", "capabilities": {}}}
{"jsonrpc": "2.0", "method": "initialized", "params": {}}
{"jsonrpc": "2.0", "method": "textDocument/didOpen", "params": {"textDocument": {
    "uri": "file:///w/src/lib.rs", "languageId": "rust", "version": 1, "text": "fn main() {\n    v.\n}\n"}}}
{"jsonrpc": "2.0", "method": "textDocument/didChange", "params": {
    "textDocument": {"uri": "file:///w/src/lib.rs", "version": 2},
    "contentChanges": [{"range": {"start": {"line": 1, "character": 6}, "end": {"line": 1, "character": 6}}, "text": "p"}]}}
{"jsonrpc": "2.0", "id": 1, "method": "textDocument/completion", "params": {
    "textDocument": {"uri": "file:///w/src/lib.rs"}, "position": {"line": 1, "character": 7},
    "context": {"triggerKind": 1}}}
{"jsonrpc": "2.0", "method": "$/cancelRequest", "params": {"id": 1}}
{"jsonrpc": "2.0", "id": 1, "error": {"code": -32800, "message": "cancelled"}}
{"jsonrpc": "2.0", "id": 2, "method": "shutdown"}
{"jsonrpc": "2.0", "method": "exit"}
"#;

/// Renders one line per message: its kind, method or id, and params variant.
pub fn summarize(messages: &[Result<lspbind::Message, lspbind::MessageError>]) -> String {
    use lspbind::{Message, Params};

    fn params(params: Option<&Params>) -> &'static str {
        match params {
            None => "-",
            Some(Params::Other(_)) => "other",
            Some(p) => p.method().unwrap_or("?"),
        }
    }

    messages
        .iter()
        .map(|message| match message {
            Ok(Message::Request(r)) => format!("request {} {} {}", r.id, r.method, params(r.params.as_ref())),
            Ok(Message::Notification(n)) => format!("notification {} {}", n.method, params(n.params.as_ref())),
            Ok(Message::Response(r)) => format!(
                "response {} {}",
                r.id.as_ref().map_or_else(|| "null".to_owned(), ToString::to_string),
                if r.error.is_some() { "error" } else { "result" }
            ),
            Err(e) => format!("error {e}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
