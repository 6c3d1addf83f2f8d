use core::fmt;

use serde::Serialize;

use crate::{Bind, ErrorKind, FromNumber, Initializer, Tape, ValueSetter};

/// An `integer | string` union, as used by request ids and progress tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(i32),
    String(String),
}

impl Default for NumberOrString {
    fn default() -> Self {
        Self::Number(0)
    }
}

impl NumberOrString {
    /// Accepts either alternative.
    #[must_use]
    pub fn setter() -> ValueSetter<Self> {
        ValueSetter::new()
            .on_number(|dest: &mut Self, value| {
                let number = i32::from_number(value).ok_or(ErrorKind::MalformedNumber {
                    expected: i32::EXPECTED,
                    value,
                })?;
                *dest = Self::Number(number);
                Ok(())
            })
            .on_string(|dest: &mut Self, value| {
                *dest = Self::String(value);
                Ok(())
            })
    }
}

impl fmt::Display for NumberOrString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<i32> for NumberOrString {
    fn from(n: i32) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for NumberOrString {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

/// Token a client or server uses to report progress.
pub type ProgressToken = NumberOrString;

/// A zero-based line and character offset in a text document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl Bind for Position {
    const NAME: &'static str = "Position";

    fn bind(init: &mut Initializer<Self>) {
        init.required("line", |p| &mut p.line, ValueSetter::number())
            .required("character", |p| &mut p.character, ValueSetter::number());
    }
}

/// A range between two positions, end exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

impl Bind for Range {
    const NAME: &'static str = "Range";

    fn bind(init: &mut Initializer<Self>) {
        init.required("start", |r| &mut r.start, ValueSetter::record())
            .required("end", |r| &mut r.end, ValueSetter::record());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    pub uri: String,
    pub range: Range,
}

impl Bind for Location {
    const NAME: &'static str = "Location";

    fn bind(init: &mut Initializer<Self>) {
        init.required("uri", |l| &mut l.uri, ValueSetter::string())
            .required("range", |l| &mut l.range, ValueSetter::record());
    }
}

/// A link between a source and a target location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationLink {
    /// Span of the origin of this link, used as the underlined span for
    /// mouse interaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_selection_range: Option<Range>,
    pub target_uri: String,
    /// The full target range, e.g. a whole function body.
    pub target_range: Range,
    /// The part of `target_range` to select when following the link, e.g.
    /// the function name. Must be contained by `target_range`.
    pub target_selection_range: Range,
}

impl Bind for LocationLink {
    const NAME: &'static str = "LocationLink";

    fn bind(init: &mut Initializer<Self>) {
        init.optional(
            "originSelectionRange",
            |l| &mut l.origin_selection_range,
            ValueSetter::record(),
        )
        .required("targetUri", |l| &mut l.target_uri, ValueSetter::string())
        .required("targetRange", |l| &mut l.target_range, ValueSetter::record())
        .required(
            "targetSelectionRange",
            |l| &mut l.target_selection_range,
            ValueSetter::record(),
        );
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextDocumentIdentifier {
    pub uri: String,
}

impl Bind for TextDocumentIdentifier {
    const NAME: &'static str = "TextDocumentIdentifier";

    fn bind(init: &mut Initializer<Self>) {
        init.required("uri", |t| &mut t.uri, ValueSetter::string());
    }
}

/// A text document identifier at a specific version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VersionedTextDocumentIdentifier {
    #[serde(flatten)]
    pub text_document: TextDocumentIdentifier,
    /// Increases after each change, undo and redo included.
    pub version: i32,
}

impl Bind for VersionedTextDocumentIdentifier {
    const NAME: &'static str = "VersionedTextDocumentIdentifier";

    fn bind(init: &mut Initializer<Self>) {
        init.embed(|v| &mut v.text_document)
            .required("version", |v| &mut v.version, ValueSetter::number());
    }
}

/// A document transferred from the client to the server on open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDocumentItem {
    pub uri: String,
    pub language_id: String,
    pub version: i32,
    pub text: String,
}

impl Bind for TextDocumentItem {
    const NAME: &'static str = "TextDocumentItem";

    fn bind(init: &mut Initializer<Self>) {
        init.required("uri", |t| &mut t.uri, ValueSetter::string())
            .required("languageId", |t| &mut t.language_id, ValueSetter::string())
            .required("version", |t| &mut t.version, ValueSetter::number())
            .required("text", |t| &mut t.text, ValueSetter::string());
    }
}

/// A document and a position inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDocumentPositionParams {
    pub text_document: TextDocumentIdentifier,
    pub position: Position,
}

impl Bind for TextDocumentPositionParams {
    const NAME: &'static str = "TextDocumentPositionParams";

    fn bind(init: &mut Initializer<Self>) {
        init.required("textDocument", |p| &mut p.text_document, ValueSetter::record())
            .required("position", |p| &mut p.position, ValueSetter::record());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    pub range: Range,
    /// Empty for a deletion.
    pub new_text: String,
}

impl Bind for TextEdit {
    const NAME: &'static str = "TextEdit";

    fn bind(init: &mut Initializer<Self>) {
        init.required("range", |e| &mut e.range, ValueSetter::record())
            .required("newText", |e| &mut e.new_text, ValueSetter::string());
    }
}

/// A reference to a command the client can run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Command {
    pub title: String,
    /// Identifier of the command handler.
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Tape>,
}

impl Bind for Command {
    const NAME: &'static str = "Command";

    fn bind(init: &mut Initializer<Self>) {
        init.required("title", |c| &mut c.title, ValueSetter::string())
            .required("command", |c| &mut c.command, ValueSetter::string())
            .optional("arguments", |c| &mut c.arguments, Tape::setter());
    }
}

/// Denotes a document through properties like language, scheme or pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// A glob pattern such as `*.{ts,js}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl Bind for DocumentFilter {
    const NAME: &'static str = "DocumentFilter";

    fn bind(init: &mut Initializer<Self>) {
        init.optional("language", |f| &mut f.language, ValueSetter::string())
            .optional("scheme", |f| &mut f.scheme, ValueSetter::string())
            .optional("pattern", |f| &mut f.pattern, ValueSetter::string());
    }
}

pub type DocumentSelector = Vec<DocumentFilter>;
