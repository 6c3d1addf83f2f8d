#![allow(missing_docs)]

mod common;

use common::{SESSION, summarize};
use lspbind::{
    DecoderOptions, JsonEvent, Message, MessageReader, Params, RequestId, ResponseError, encode,
    protocol::{CompletionItem, CompletionItemKind, CompletionList, CompletionResponse, TextDocumentSyncKind},
    source,
};

fn read_events(events: Vec<JsonEvent>) -> Vec<Result<Message, lspbind::MessageError>> {
    let mut reader = MessageReader::new(DecoderOptions::default());
    let messages = events.into_iter().filter_map(|event| reader.feed(event)).collect();
    reader.finish().expect("stream ended inside a message");
    messages
}

#[test]
fn session_is_classified_message_by_message() {
    let messages = read_events(source::events(SESSION).unwrap());
    insta::assert_snapshot!(summarize(&messages), @r"
    request 0 initialize other
    notification initialized other
    notification textDocument/didOpen textDocument/didOpen
    notification textDocument/didChange textDocument/didChange
    request 1 textDocument/completion textDocument/completion
    notification $/cancelRequest $/cancelRequest
    response 1 error
    request 2 shutdown -
    notification exit -
    ");
}

#[test]
fn event_feeding_matches_text_reading() {
    let from_events = read_events(source::events(SESSION).unwrap());
    let from_text = MessageReader::default().read_str(SESSION).unwrap();
    assert_eq!(from_events, from_text);
}

#[test]
fn truncated_stream_reports_incomplete_message() {
    let mut events = source::events(SESSION).unwrap();
    events.truncate(events.len() - 3);
    let mut reader = MessageReader::default();
    let completed = events.into_iter().filter_map(|event| reader.feed(event)).count();
    assert_eq!(completed, 8);
    let error = reader.finish().unwrap_err();
    insta::assert_snapshot!(error, @"event stream ended inside a value (1 open containers) in `Message` at $");
}

#[test]
fn did_open_binds_the_document() {
    let messages = MessageReader::default().read_str(SESSION).unwrap();
    let Ok(Message::Notification(open)) = &messages[2] else {
        panic!("not a notification");
    };
    let Some(Params::DidOpen(params)) = &open.params else {
        panic!("not didOpen params");
    };
    assert_eq!(params.text_document.language_id, "rust");
    assert_eq!(params.text_document.text.lines().nth(1), Some("    v."));
}

#[test]
fn server_reply_decodes_on_the_client() {
    let list = CompletionList {
        is_incomplete: false,
        items: vec![CompletionItem {
            label: "push".into(),
            kind: Some(CompletionItemKind::Method),
            ..CompletionItem::default()
        }],
    };
    let id = RequestId::Number(1);
    let text = encode::response(Some(&id), &list).unwrap();
    insta::assert_snapshot!(text, @r#"{"jsonrpc":"2.0","id":1,"result":{"isIncomplete":false,"items":[{"label":"push","kind":2}]}}"#);

    let messages = MessageReader::default().read_str(&text).unwrap();
    let Ok(Message::Response(response)) = &messages[0] else {
        panic!("not a response");
    };
    assert_eq!(response.id.as_ref(), Some(&id));
    let result = response.result.as_ref().unwrap();
    assert_eq!(
        CompletionResponse::from_result(result).unwrap(),
        Some(CompletionResponse::List(list))
    );
}

#[test]
fn error_reply_for_a_bad_request() {
    let messages = MessageReader::default()
        .read_str(r#"{"jsonrpc": "2.0", "id": "q", "method": "textDocument/completion", "params": {"textDocument": {}}}"#)
        .unwrap();
    let error = messages[0].as_ref().unwrap_err();
    let reply: ResponseError = error.response_error();
    insta::assert_snapshot!(
        encode::error_response(error.id.as_ref(), &reply).unwrap(),
        @r#"{"jsonrpc":"2.0","id":"q","error":{"code":-32602,"message":"missing required key `uri` in `TextDocumentIdentifier` at $.params.textDocument"}}"#
    );
}

#[test]
fn records_decode_from_text_directly() {
    let kind: lspbind::protocol::TextDocumentChangeRegistrationOptions =
        lspbind::from_str(r#"{"documentSelector": null, "syncKind": 2}"#).unwrap();
    assert_eq!(kind.sync_kind, TextDocumentSyncKind::Incremental);
    assert_eq!(kind.registration.document_selector, None);
}
