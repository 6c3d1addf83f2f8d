//! Text document synchronization.
use serde::Serialize;

use super::{DocumentSelector, Range, TextDocumentIdentifier, TextDocumentItem, VersionedTextDocumentIdentifier};
use crate::{Bind, Initializer, ValueSetter, enumerant};

enumerant! {
    /// How the client sends document changes to the server.
    pub enum TextDocumentSyncKind {
        /// Documents are not synced.
        None = 0,
        /// Every change carries the full document content.
        Full = 1,
        /// Changes carry incremental edits only.
        Incremental = 2,
    }
}

/// One change to a text document: a range and its replacement text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDocumentContentChangeEvent {
    pub range: Range,
    /// Length of the replaced range. Deprecated in favour of `range`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_length: Option<u32>,
    pub text: String,
}

impl Bind for TextDocumentContentChangeEvent {
    const NAME: &'static str = "TextDocumentContentChangeEvent";

    fn bind(init: &mut Initializer<Self>) {
        init.required("range", |c| &mut c.range, ValueSetter::record())
            .optional("rangeLength", |c| &mut c.range_length, ValueSetter::number())
            .required("text", |c| &mut c.text, ValueSetter::string());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DidOpenTextDocumentParams {
    pub text_document: TextDocumentItem,
}

impl Bind for DidOpenTextDocumentParams {
    const NAME: &'static str = "DidOpenTextDocumentParams";

    fn bind(init: &mut Initializer<Self>) {
        init.required("textDocument", |p| &mut p.text_document, ValueSetter::record());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DidChangeTextDocumentParams {
    pub text_document: VersionedTextDocumentIdentifier,
    /// Applied in order, each against the document produced by the previous.
    pub content_changes: Vec<TextDocumentContentChangeEvent>,
}

impl Bind for DidChangeTextDocumentParams {
    const NAME: &'static str = "DidChangeTextDocumentParams";

    fn bind(init: &mut Initializer<Self>) {
        init.required("textDocument", |p| &mut p.text_document, ValueSetter::record())
            .required(
                "contentChanges",
                |p| &mut p.content_changes,
                ValueSetter::array(ValueSetter::record),
            );
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DidCloseTextDocumentParams {
    pub text_document: TextDocumentIdentifier,
}

impl Bind for DidCloseTextDocumentParams {
    const NAME: &'static str = "DidCloseTextDocumentParams";

    fn bind(init: &mut Initializer<Self>) {
        init.required("textDocument", |p| &mut p.text_document, ValueSetter::record());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDocumentRegistrationOptions {
    /// `None` (sent as `null`) selects the document selector of the client.
    pub document_selector: Option<DocumentSelector>,
}

impl Bind for TextDocumentRegistrationOptions {
    const NAME: &'static str = "TextDocumentRegistrationOptions";

    fn bind(init: &mut Initializer<Self>) {
        init.nullable(
            "documentSelector",
            |o| &mut o.document_selector,
            ValueSetter::array(ValueSetter::record),
        );
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDocumentChangeRegistrationOptions {
    #[serde(flatten)]
    pub registration: TextDocumentRegistrationOptions,
    pub sync_kind: TextDocumentSyncKind,
}

impl Bind for TextDocumentChangeRegistrationOptions {
    const NAME: &'static str = "TextDocumentChangeRegistrationOptions";

    fn bind(init: &mut Initializer<Self>) {
        init.embed(|o| &mut o.registration)
            .required("syncKind", |o| &mut o.sync_kind, ValueSetter::enumerant());
    }
}
