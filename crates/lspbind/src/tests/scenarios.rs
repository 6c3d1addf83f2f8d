use rstest::rstest;

use super::utils::bind;
use crate::{
    ErrorKind, ValueKind,
    protocol::{
        CompletionClientCapabilities, CompletionContext, CompletionItem, CompletionItemKind, CompletionItemTag,
        CompletionParams, CompletionTriggerKind, DidChangeTextDocumentParams, Documentation, InsertTextFormat,
        MarkupKind, Position, TextDocumentContentChangeEvent,
    },
};

#[test]
fn completion_params_from_request() {
    let params: CompletionParams = bind(
        r#"{"textDocument": {"uri": "file:///a.rs"}, "position": {"line": 3, "character": 7}}"#,
    )
    .unwrap();
    let at = &params.text_document_position;
    assert_eq!(at.text_document.uri, "file:///a.rs");
    assert_eq!(at.position, Position::new(3, 7));
    assert_eq!(params.context, None);
    assert_eq!(params.work_done_progress.work_done_token, None);
    assert_eq!(params.partial_result.partial_result_token, None);
}

#[test]
fn completion_context_trigger_character() {
    let context: CompletionContext = bind(r#"{"triggerKind": 1, "triggerCharacter": "."}"#).unwrap();
    assert_eq!(context.trigger_kind, CompletionTriggerKind::Invoked);
    assert_eq!(context.trigger_character.as_deref(), Some("."));
}

#[test]
fn content_change_requires_range() {
    let error = bind::<TextDocumentContentChangeEvent>(r#"{"text": "hello"}"#).unwrap_err();
    assert_eq!(error.record, "TextDocumentContentChangeEvent");
    assert_eq!(error.kind, ErrorKind::MissingRequiredKey { key: "range" });
}

#[test]
fn content_change_inside_did_change() {
    let error = bind::<DidChangeTextDocumentParams>(
        r#"{"textDocument": {"uri": "file:///a", "version": 2},
            "contentChanges": [
              {"range": {"start": {"line": 0, "character": 0}, "end": {"line": 0, "character": 1}}, "text": "x"},
              {"text": "hello"}
            ]}"#,
    )
    .unwrap_err();
    assert_eq!(error.record, "TextDocumentContentChangeEvent");
    assert_eq!(error.path.to_string(), "$.contentChanges[1]");
}

#[test]
fn completion_item_with_every_field() {
    let item: CompletionItem = bind(
        r#"{
            "label": "push",
            "kind": 2,
            "tags": [1],
            "detail": "fn push(&mut self, value: T)",
            "documentation": {"kind": "markdown", "value": "Appends an element."},
            "deprecated": false,
            "preselect": true,
            "sortText": "0001",
            "filterText": "push",
            "insertText": "push(${1:value})",
            "insertTextFormat": 2,
            "textEdit": {"range": {"start": {"line": 1, "character": 4}, "end": {"line": 1, "character": 6}}, "newText": "push"},
            "additionalTextEdits": [],
            "commitCharacters": ["(", "."],
            "command": {"title": "Signature help", "command": "editor.action.triggerParameterHints"},
            "data": {"id": 42, "tokens": [null, true]}
        }"#,
    )
    .unwrap();
    assert_eq!(item.kind, Some(CompletionItemKind::Method));
    assert_eq!(item.tags, Some(vec![CompletionItemTag::Deprecated]));
    assert!(matches!(&item.documentation, Some(Documentation::MarkupContent(m)) if m.kind == MarkupKind::Markdown));
    assert_eq!(item.insert_text_format, Some(InsertTextFormat::Snippet));
    assert_eq!(item.text_edit.as_ref().map(|e| e.range.end.character), Some(6));
    assert_eq!(item.additional_text_edits, Some(Vec::new()));
    assert_eq!(item.commit_characters, Some(vec!["(".to_owned(), ".".to_owned()]));
    assert_eq!(item.command.as_ref().and_then(|c| c.arguments.as_ref()), None);
    let data = item.data.unwrap().to_value().unwrap();
    assert_eq!(data, serde_json::json!({"id": 42, "tokens": [null, true]}));
}

#[test]
fn completion_item_with_only_label() {
    let item: CompletionItem = bind(r#"{"label": "x"}"#).unwrap();
    assert_eq!(
        item,
        CompletionItem {
            label: "x".into(),
            ..CompletionItem::default()
        }
    );
}

#[rstest]
#[case::label_number("label", "1", ValueKind::Number)]
#[case::kind_string("kind", r#""method""#, ValueKind::String)]
#[case::tags_object("tags", "{}", ValueKind::Object)]
#[case::detail_null("detail", "null", ValueKind::Null)]
#[case::documentation_array("documentation", "[]", ValueKind::Array)]
#[case::deprecated_string("deprecated", r#""yes""#, ValueKind::String)]
#[case::text_edit_string("textEdit", r#""x""#, ValueKind::String)]
#[case::commit_characters_string("commitCharacters", r#""(""#, ValueKind::String)]
fn wrong_kind_is_never_defaulted(#[case] key: &str, #[case] value: &str, #[case] kind: ValueKind) {
    let text = if key == "label" {
        format!(r#"{{"label": {value}}}"#)
    } else {
        format!(r#"{{"label": "x", "{key}": {value}}}"#)
    };
    let error = bind::<CompletionItem>(&text).unwrap_err();
    assert_eq!(error.record, "CompletionItem");
    assert_eq!(
        error.kind,
        ErrorKind::UnexpectedValueKind {
            key: key.to_owned(),
            kind,
        }
    );
}

#[rstest]
#[case::float("3.0", "number 3.0 is not a valid uinteger")]
#[case::negative("-1", "number -1 is not a valid uinteger")]
#[case::too_large("2147483648", "number 2147483648 is not a valid uinteger")]
fn position_rejects_non_uinteger(#[case] line: &str, #[case] message: &str) {
    let error = bind::<Position>(&format!(r#"{{"line": {line}, "character": 0}}"#)).unwrap_err();
    assert_eq!(error.kind.to_string(), message);
}

#[test]
fn trigger_kind_out_of_range() {
    let error = bind::<CompletionContext>(r#"{"triggerKind": 4}"#).unwrap_err();
    insta::assert_snapshot!(error, @"malformed CompletionTriggerKind enumerant 4 in `CompletionContext` at $.triggerKind");
}

#[test]
fn markup_kind_is_a_keyword() {
    let error = bind::<crate::protocol::MarkupContent>(r#"{"kind": "html", "value": ""}"#).unwrap_err();
    insta::assert_snapshot!(error, @r#"malformed MarkupKind enumerant "html" in `MarkupContent` at $.kind"#);
}

#[test]
fn client_capabilities() {
    let caps: CompletionClientCapabilities = bind(
        r#"{
            "dynamicRegistration": false,
            "completionItem": {
                "snippetSupport": true,
                "documentationFormat": ["markdown", "plaintext"],
                "tagSupport": {"valueSet": [1]}
            },
            "completionItemKind": {"valueSet": [1, 2, 3, 25]},
            "contextSupport": true
        }"#,
    )
    .unwrap();
    let item = caps.completion_item.unwrap();
    assert_eq!(item.snippet_support, Some(true));
    assert_eq!(item.documentation_format, Some(vec![MarkupKind::Markdown, MarkupKind::PlainText]));
    assert_eq!(item.tag_support.map(|t| t.value_set), Some(vec![CompletionItemTag::Deprecated]));
    let kinds = caps.completion_item_kind.and_then(|k| k.value_set).unwrap();
    assert_eq!(kinds.last(), Some(&CompletionItemKind::TypeParameter));
    assert_eq!(caps.context_support, Some(true));
}
