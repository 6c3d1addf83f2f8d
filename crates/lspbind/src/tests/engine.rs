use super::utils::{bind, bind_all};
use crate::{
    Bind, BindError, Decoder, DecoderOptions, ErrorKind, Initializer, JsonEvent, Number, ValueKind,
    ValueSetter, path,
    protocol::{
        CompletionItemTag, CompletionRegistrationOptions, Documentation, MarkupContent, MarkupKind, Position,
        TextDocumentRegistrationOptions,
    },
};

#[derive(Debug, Default, PartialEq)]
struct Sample {
    name: String,
    items: Option<Vec<i32>>,
    tags: Option<Vec<CompletionItemTag>>,
    nested: Option<Position>,
    note: Option<Documentation>,
}

impl Bind for Sample {
    const NAME: &'static str = "Sample";

    fn bind(init: &mut Initializer<Self>) {
        init.required("name", |s| &mut s.name, ValueSetter::string())
            .optional("items", |s| &mut s.items, ValueSetter::array(ValueSetter::number))
            .optional("tags", |s| &mut s.tags, ValueSetter::array(ValueSetter::enumerant))
            .optional("nested", |s| &mut s.nested, ValueSetter::record())
            .optional("note", |s| &mut s.note, Documentation::setter());
    }
}

fn named(name: &str) -> Sample {
    Sample {
        name: name.into(),
        ..Sample::default()
    }
}

#[test]
fn integer_array_keeps_arrival_order() {
    let sample: Sample = bind(r#"{"name": "a", "items": [1, 2, 3]}"#).unwrap();
    assert_eq!(sample.items, Some(vec![1, 2, 3]));
}

#[test]
fn empty_array_is_present() {
    let empty: Sample = bind(r#"{"name": "a", "tags": []}"#).unwrap();
    let absent: Sample = bind(r#"{"name": "a"}"#).unwrap();
    assert_eq!(empty.tags, Some(Vec::new()));
    assert_eq!(absent.tags, None);
    assert_ne!(empty, absent);
}

#[test]
fn absent_optionals_stay_absent() {
    let sample: Sample = bind(r#"{"name": "only"}"#).unwrap();
    assert_eq!(sample, named("only"));
}

#[test]
fn union_selects_string_alternative() {
    let sample: Sample = bind(r#"{"name": "a", "note": "plain"}"#).unwrap();
    assert_eq!(sample.note, Some(Documentation::String("plain".into())));
}

#[test]
fn union_binds_record_alternative() {
    let sample: Sample = bind(r#"{"name": "a", "note": {"kind": "markdown", "value": "*x*"}}"#).unwrap();
    assert_eq!(
        sample.note,
        Some(Documentation::MarkupContent(MarkupContent {
            kind: MarkupKind::Markdown,
            value: "*x*".into(),
        }))
    );
}

#[test]
fn union_record_alternative_checks_required_keys() {
    let error = bind::<Sample>(r#"{"name": "a", "note": {"value": "*x*"}}"#).unwrap_err();
    assert_eq!(error.record, "MarkupContent");
    assert_eq!(error.path, path!["note"]);
    assert_eq!(error.kind, ErrorKind::MissingRequiredKey { key: "kind" });
}

#[test]
fn union_rejects_unregistered_kind() {
    let error = bind::<Sample>(r#"{"name": "a", "note": 4}"#).unwrap_err();
    assert_eq!(
        error.kind,
        ErrorKind::UnexpectedValueKind {
            key: "note".into(),
            kind: ValueKind::Number,
        }
    );
}

#[test]
fn unknown_keys_and_subtrees_are_skipped() {
    let sample: Sample = bind(
        r#"{"extra": {"deep": [1, {"x": [2]}]}, "name": "a", "more": [[]], "items": [4], "flag": true}"#,
    )
    .unwrap();
    assert_eq!(sample.name, "a");
    assert_eq!(sample.items, Some(vec![4]));
}

#[test]
fn kind_mismatch_names_record_and_key() {
    let error = bind::<Sample>(r#"{"name": 1}"#).unwrap_err();
    assert_eq!(
        error,
        BindError {
            record: "Sample",
            path: path!["name"],
            kind: ErrorKind::UnexpectedValueKind {
                key: "name".into(),
                kind: ValueKind::Number,
            },
        }
    );
}

#[test]
fn float_is_not_an_integer_element() {
    let error = bind::<Sample>(r#"{"name": "a", "items": [1, 1.0]}"#).unwrap_err();
    assert_eq!(error.record, "Sample");
    assert_eq!(error.path, path!["items", 1]);
    assert_eq!(
        error.kind,
        ErrorKind::MalformedNumber {
            expected: "integer",
            value: Number::Float(1.0),
        }
    );
}

#[test]
fn wrong_element_kind() {
    let error = bind::<Sample>(r#"{"name": "a", "items": [1, "2"]}"#).unwrap_err();
    assert_eq!(error.kind, ErrorKind::UnexpectedElementKind { kind: ValueKind::String });
    assert_eq!(error.path.to_string(), "$.items[1]");
}

#[test]
fn nested_missing_key_points_at_nested_record() {
    let error = bind::<Sample>(r#"{"name": "a", "nested": {"line": 1}}"#).unwrap_err();
    assert_eq!(error.record, "Position");
    assert_eq!(error.path.to_string(), "$.nested");
    assert_eq!(error.kind, ErrorKind::MissingRequiredKey { key: "character" });
}

#[test]
fn unknown_enumerant_is_rejected() {
    let error = bind::<Sample>(r#"{"name": "a", "tags": [1, 9]}"#).unwrap_err();
    assert_eq!(error.path.to_string(), "$.tags[1]");
    assert_eq!(
        error.kind,
        ErrorKind::MalformedEnumerant {
            enumeration: "CompletionItemTag",
            value: "9".into(),
        }
    );
}

#[test]
fn unknown_enumerant_in_array_can_be_skipped() {
    let options = DecoderOptions {
        skip_unknown_enumerants_in_arrays: true,
        ..DecoderOptions::default()
    };
    let values = bind_all::<Sample>(r#"{"name": "a", "tags": [9, 1, 12]}"#, options);
    assert_eq!(values.len(), 1);
    let sample = values[0].as_ref().unwrap();
    assert_eq!(sample.tags, Some(vec![CompletionItemTag::Deprecated]));
}

#[test]
fn key_inside_array_is_structural_error() {
    let mut decoder = Decoder::<Sample>::new(DecoderOptions::default());
    let events = [
        JsonEvent::ObjectBegin,
        JsonEvent::key("items"),
        JsonEvent::ArrayStart,
        JsonEvent::key("x"),
        JsonEvent::integer(1),
        JsonEvent::ArrayEnd,
        JsonEvent::key("name"),
        JsonEvent::string("a"),
    ];
    for event in events {
        assert!(decoder.feed(event).is_none());
    }
    let error = decoder.feed(JsonEvent::ObjectEnd).unwrap().unwrap_err();
    assert_eq!(error.kind, ErrorKind::UnexpectedEvent { event: "key" });
    assert_eq!(error.path.to_string(), "$.items[0]");
}

#[test]
fn mismatched_close_is_structural_error() {
    let mut decoder = Decoder::<Sample>::new(DecoderOptions::default());
    assert!(decoder.feed(JsonEvent::ObjectBegin).is_none());
    let error = decoder.feed(JsonEvent::ArrayEnd).unwrap().unwrap_err();
    assert_eq!(error.kind, ErrorKind::UnexpectedEvent { event: "array end" });
    assert!(decoder.is_idle());
}

#[test]
fn stray_close_at_top_level() {
    let mut decoder = Decoder::<Sample>::new(DecoderOptions::default());
    let error = decoder.feed(JsonEvent::ObjectEnd).unwrap().unwrap_err();
    assert_eq!(error.kind, ErrorKind::UnexpectedEvent { event: "object end" });
}

#[test]
fn failure_does_not_leak_into_next_value() {
    let values = bind_all::<Sample>(
        r#"{"name": "a", "nested": {"line": "x", "character": [1]}} {"name": "b"}"#,
        DecoderOptions::default(),
    );
    assert_eq!(values.len(), 2);
    assert_eq!(
        values[0].as_ref().unwrap_err().kind,
        ErrorKind::UnexpectedValueKind {
            key: "line".into(),
            kind: ValueKind::String,
        }
    );
    assert_eq!(values[1], Ok(named("b")));
}

#[test]
fn ledger_starts_fresh_for_every_object() {
    let values = bind_all::<Position>(
        r#"{"line": 1, "character": 2} {"line": 3}"#,
        DecoderOptions::default(),
    );
    assert_eq!(values[0], Ok(Position::new(1, 2)));
    assert_eq!(
        values[1].as_ref().unwrap_err().kind,
        ErrorKind::MissingRequiredKey { key: "character" }
    );
}

#[test]
fn duplicate_key_keeps_last_value() {
    let sample: Sample = bind(r#"{"name": "a", "items": [1], "name": "b", "items": [2, 3]}"#).unwrap();
    assert_eq!(sample.name, "b");
    assert_eq!(sample.items, Some(vec![2, 3]));
}

#[derive(Debug, Default, PartialEq)]
struct Loose {
    position: Position,
}

impl Bind for Loose {
    const NAME: &'static str = "Loose";

    fn bind(init: &mut Initializer<Self>) {
        init.embed(|l| &mut l.position).optional_entry(
            "character",
            ValueSetter::<u32>::number().lift(|l: &mut Loose| &mut l.position.character),
        );
    }
}

#[test]
fn later_registration_replaces_embedded_key() {
    let loose: Loose = bind(r#"{"line": 2}"#).unwrap();
    assert_eq!(loose.position, Position::new(2, 0));
    let error = bind::<Loose>("{}").unwrap_err();
    assert_eq!(error.record, "Loose");
    assert_eq!(error.kind, ErrorKind::MissingRequiredKey { key: "line" });
}

#[test]
fn embedding_merges_keys_and_ledgers() {
    let registration = Initializer::<CompletionRegistrationOptions>::bound();
    assert_eq!(
        registration.keys().collect::<Vec<_>>(),
        [
            "documentSelector",
            "workDoneProgress",
            "triggerCharacters",
            "allCommitCharacters",
            "resolveProvider"
        ]
    );
    assert!(registration.ledger().requires("documentSelector"));
    assert!(!registration.ledger().requires("resolveProvider"));

    let loose = Initializer::<Loose>::bound();
    assert!(loose.ledger().requires("line"));
    assert!(!loose.ledger().requires("character"));
}

#[test]
fn nullable_key_is_required_but_may_be_null() {
    let null: TextDocumentRegistrationOptions = bind(r#"{"documentSelector": null}"#).unwrap();
    assert_eq!(null.document_selector, None);

    let filters: TextDocumentRegistrationOptions =
        bind(r#"{"documentSelector": [{"language": "rust"}, {"pattern": "**/*.toml"}]}"#).unwrap();
    let selector = filters.document_selector.unwrap();
    assert_eq!(selector.len(), 2);
    assert_eq!(selector[0].language.as_deref(), Some("rust"));
    assert_eq!(selector[1].pattern.as_deref(), Some("**/*.toml"));

    let error = bind::<TextDocumentRegistrationOptions>("{}").unwrap_err();
    assert_eq!(error.kind, ErrorKind::MissingRequiredKey { key: "documentSelector" });
}

#[test]
fn record_root_rejects_other_kinds() {
    let error = bind::<Position>("[1, 2]").unwrap_err();
    assert_eq!(error.record, "Position");
    assert_eq!(error.kind, ErrorKind::UnexpectedRootKind { kind: ValueKind::Array });
}

#[test]
fn truncated_stream_is_incomplete() {
    let error = crate::from_events::<Position>([JsonEvent::ObjectBegin, JsonEvent::key("line")]).unwrap_err();
    assert_eq!(error.kind, ErrorKind::Incomplete { open: 1 });
}
