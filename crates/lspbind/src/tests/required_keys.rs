//! Every record with N required keys binds when all N are present and fails
//! with `MissingRequiredKey` naming the key when any one is omitted.
use rstest::rstest;

use super::utils::bind;
use crate::{
    Bind, CancelParams, ErrorKind, ResponseError,
    protocol::{
        Command, CompletionContext, CompletionItem, CompletionItemTagSupport, CompletionList, CompletionParams,
        CompletionRegistrationOptions, DidChangeTextDocumentParams, DidOpenTextDocumentParams, Location,
        LocationLink, MarkupContent, Position, Range, TextDocumentChangeRegistrationOptions,
        TextDocumentContentChangeEvent, TextDocumentItem, TextEdit, VersionedTextDocumentIdentifier,
    },
};

type Check = fn(&str, &[&'static str]);

fn check<T: Bind + core::fmt::Debug>(full: &str, required: &[&'static str]) {
    let document: serde_json::Value = serde_json::from_str(full).unwrap();
    if let Err(error) = bind::<T>(full) {
        panic!("complete `{}` failed: {error}", T::NAME);
    }
    for &key in required {
        let mut partial = document.clone();
        assert!(partial.as_object_mut().unwrap().remove(key).is_some(), "{key} not in document");
        let error = bind::<T>(&partial.to_string()).unwrap_err();
        assert_eq!(error.record, T::NAME);
        assert!(error.path.is_empty(), "{error}");
        assert_eq!(error.kind, ErrorKind::MissingRequiredKey { key });
    }
}

const RANGE: &str = r#"{"start": {"line": 0, "character": 1}, "end": {"line": 2, "character": 3}}"#;

#[rstest]
#[case::position(check::<Position>, r#"{"line": 1, "character": 2}"#.to_owned(), &["line", "character"])]
#[case::range(check::<Range>, RANGE.to_owned(), &["start", "end"])]
#[case::location(check::<Location>, format!(r#"{{"uri": "file:///a", "range": {RANGE}}}"#), &["uri", "range"])]
#[case::location_link(
    check::<LocationLink>,
    format!(r#"{{"targetUri": "file:///b", "targetRange": {RANGE}, "targetSelectionRange": {RANGE}}}"#),
    &["targetUri", "targetRange", "targetSelectionRange"]
)]
#[case::text_document_item(
    check::<TextDocumentItem>,
    r#"{"uri": "file:///a", "languageId": "rust", "version": 1, "text": ""}"#.to_owned(),
    &["uri", "languageId", "version", "text"]
)]
#[case::versioned_identifier(
    check::<VersionedTextDocumentIdentifier>,
    r#"{"uri": "file:///a", "version": 7}"#.to_owned(),
    &["uri", "version"]
)]
#[case::text_edit(check::<TextEdit>, format!(r#"{{"range": {RANGE}, "newText": "x"}}"#), &["range", "newText"])]
#[case::command(
    check::<Command>,
    r#"{"title": "Run", "command": "run", "arguments": [1, "two"]}"#.to_owned(),
    &["title", "command"]
)]
#[case::markup(check::<MarkupContent>, r#"{"kind": "plaintext", "value": "v"}"#.to_owned(), &["kind", "value"])]
#[case::content_change(
    check::<TextDocumentContentChangeEvent>,
    format!(r#"{{"range": {RANGE}, "text": "hello"}}"#),
    &["range", "text"]
)]
#[case::did_open(
    check::<DidOpenTextDocumentParams>,
    r#"{"textDocument": {"uri": "file:///a", "languageId": "rust", "version": 1, "text": ""}}"#.to_owned(),
    &["textDocument"]
)]
#[case::did_change(
    check::<DidChangeTextDocumentParams>,
    r#"{"textDocument": {"uri": "file:///a", "version": 2}, "contentChanges": []}"#.to_owned(),
    &["textDocument", "contentChanges"]
)]
#[case::completion_context(check::<CompletionContext>, r#"{"triggerKind": 3}"#.to_owned(), &["triggerKind"])]
#[case::completion_params(
    check::<CompletionParams>,
    r#"{"textDocument": {"uri": "file:///a"}, "position": {"line": 0, "character": 0}, "workDoneToken": "t"}"#.to_owned(),
    &["textDocument", "position"]
)]
#[case::completion_item(check::<CompletionItem>, r#"{"label": "x", "kind": 3}"#.to_owned(), &["label"])]
#[case::completion_list(
    check::<CompletionList>,
    r#"{"isIncomplete": false, "items": [{"label": "x"}]}"#.to_owned(),
    &["isIncomplete", "items"]
)]
#[case::tag_support(check::<CompletionItemTagSupport>, r#"{"valueSet": [1]}"#.to_owned(), &["valueSet"])]
#[case::change_registration(
    check::<TextDocumentChangeRegistrationOptions>,
    r#"{"documentSelector": null, "syncKind": 2}"#.to_owned(),
    &["documentSelector", "syncKind"]
)]
#[case::completion_registration(
    check::<CompletionRegistrationOptions>,
    r#"{"documentSelector": [{"language": "rust"}], "triggerCharacters": ["."], "resolveProvider": true}"#.to_owned(),
    &["documentSelector"]
)]
#[case::response_error(
    check::<ResponseError>,
    r#"{"code": -32601, "message": "no", "data": {"x": 1}}"#.to_owned(),
    &["code", "message"]
)]
#[case::cancel(check::<CancelParams>, r#"{"id": 4}"#.to_owned(), &["id"])]
fn required_keys(#[case] run: Check, #[case] full: String, #[case] required: &[&'static str]) {
    run(&full, required);
}
