//! Completion: request params, items, lists, options and client
//! capabilities.
use serde::Serialize;

use super::{
    Command, Documentation, MarkupKind, PartialResultParams, TextDocumentPositionParams,
    TextDocumentRegistrationOptions, TextEdit, WorkDoneProgressOptions, WorkDoneProgressParams,
};
use crate::{Bind, BindError, DecoderOptions, Initializer, Push, Tape, ValueSetter, enumerant};

enumerant! {
    /// How a completion was triggered.
    pub enum CompletionTriggerKind {
        /// Typing an identifier, invoking completion manually or via API.
        Invoked = 1,
        /// A trigger character from `CompletionOptions::trigger_characters`.
        TriggerCharacter = 2,
        /// Re-triggered because the current completion list is incomplete.
        TriggerForIncompleteCompletions = 3,
    }
}

enumerant! {
    /// The kind of a completion entry.
    pub enum CompletionItemKind {
        Text = 1,
        Method = 2,
        Function = 3,
        Constructor = 4,
        Field = 5,
        Variable = 6,
        Class = 7,
        Interface = 8,
        Module = 9,
        Property = 10,
        Unit = 11,
        Value = 12,
        Enum = 13,
        Keyword = 14,
        Snippet = 15,
        Color = 16,
        File = 17,
        Reference = 18,
        Folder = 19,
        EnumMember = 20,
        Constant = 21,
        Struct = 22,
        Event = 23,
        Operator = 24,
        TypeParameter = 25,
    }
}

enumerant! {
    /// Extra annotations that tweak the rendering of a completion item.
    pub enum CompletionItemTag {
        /// Rendered with a strike-through.
        Deprecated = 1,
    }
}

enumerant! {
    /// Whether `insertText` is plain text or a snippet.
    pub enum InsertTextFormat {
        PlainText = 1,
        /// Tab stops `$1`, `$2` and placeholders `${1:foo}`.
        Snippet = 2,
    }
}

/// Additional information about the context a completion was triggered in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionContext {
    pub trigger_kind: CompletionTriggerKind,
    /// Set when `trigger_kind` is `TriggerCharacter`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_character: Option<String>,
}

impl Bind for CompletionContext {
    const NAME: &'static str = "CompletionContext";

    fn bind(init: &mut Initializer<Self>) {
        init.required("triggerKind", |c| &mut c.trigger_kind, ValueSetter::enumerant())
            .optional("triggerCharacter", |c| &mut c.trigger_character, ValueSetter::string());
    }
}

/// Params of `textDocument/completion`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompletionParams {
    #[serde(flatten)]
    pub text_document_position: TextDocumentPositionParams,
    #[serde(flatten)]
    pub work_done_progress: WorkDoneProgressParams,
    #[serde(flatten)]
    pub partial_result: PartialResultParams,
    /// Only present if the client advertises `contextSupport`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<CompletionContext>,
}

impl Bind for CompletionParams {
    const NAME: &'static str = "CompletionParams";

    fn bind(init: &mut Initializer<Self>) {
        init.embed(|p| &mut p.text_document_position)
            .embed(|p| &mut p.work_done_progress)
            .embed(|p| &mut p.partial_result)
            .optional("context", |p| &mut p.context, ValueSetter::record());
    }
}

/// A completion proposal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItem {
    /// Shown in the list, and inserted unless `insert_text` or `text_edit`
    /// say otherwise.
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<CompletionItemKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<CompletionItemTag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<Documentation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preselect: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_text_format: Option<InsertTextFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_edit: Option<TextEdit>,
    /// Edits applied on top of the main one; they must not overlap it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_text_edits: Option<Vec<TextEdit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_characters: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Command>,
    /// Preserved between a `textDocument/completion` and a
    /// `completionItem/resolve` request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Tape>,
}

impl Bind for CompletionItem {
    const NAME: &'static str = "CompletionItem";

    fn bind(init: &mut Initializer<Self>) {
        init.required("label", |i| &mut i.label, ValueSetter::string())
            .optional("kind", |i| &mut i.kind, ValueSetter::enumerant())
            .optional("tags", |i| &mut i.tags, ValueSetter::array(ValueSetter::enumerant))
            .optional("detail", |i| &mut i.detail, ValueSetter::string())
            .optional("documentation", |i| &mut i.documentation, Documentation::setter())
            .optional("deprecated", |i| &mut i.deprecated, ValueSetter::boolean())
            .optional("preselect", |i| &mut i.preselect, ValueSetter::boolean())
            .optional("sortText", |i| &mut i.sort_text, ValueSetter::string())
            .optional("filterText", |i| &mut i.filter_text, ValueSetter::string())
            .optional("insertText", |i| &mut i.insert_text, ValueSetter::string())
            .optional("insertTextFormat", |i| &mut i.insert_text_format, ValueSetter::enumerant())
            .optional("textEdit", |i| &mut i.text_edit, ValueSetter::record())
            .optional(
                "additionalTextEdits",
                |i| &mut i.additional_text_edits,
                ValueSetter::array(ValueSetter::record),
            )
            .optional(
                "commitCharacters",
                |i| &mut i.commit_characters,
                ValueSetter::array(ValueSetter::string),
            )
            .optional("command", |i| &mut i.command, ValueSetter::record())
            .optional("data", |i| &mut i.data, Tape::setter());
    }
}

/// A list of completion items to present in the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionList {
    /// Further typing should recompute the list.
    pub is_incomplete: bool,
    pub items: Vec<CompletionItem>,
}

impl Bind for CompletionList {
    const NAME: &'static str = "CompletionList";

    fn bind(init: &mut Initializer<Self>) {
        init.required("isIncomplete", |l| &mut l.is_incomplete, ValueSetter::boolean())
            .required("items", |l| &mut l.items, ValueSetter::array(ValueSetter::record));
    }
}

/// Result of `textDocument/completion`: bare items or a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CompletionResponse {
    Array(Vec<CompletionItem>),
    List(CompletionList),
}

impl Default for CompletionResponse {
    fn default() -> Self {
        Self::Array(Vec::new())
    }
}

impl CompletionResponse {
    /// An array selects the bare items, an object binds as a list.
    #[must_use]
    pub fn setter() -> ValueSetter<Self> {
        ValueSetter::new()
            .on_array(|response: &mut Self| {
                *response = Self::Array(Vec::new());
                Push::array::<CompletionItem>(ValueSetter::record).within(|response: &mut Self| match response {
                    Self::Array(items) => Some(items),
                    Self::List(_) => None,
                })
            })
            .on_object(|response: &mut Self| {
                *response = Self::List(CompletionList::default());
                Push::record::<CompletionList>().within(|response: &mut Self| match response {
                    Self::List(list) => Some(list),
                    Self::Array(_) => None,
                })
            })
    }

    /// Binds a response's `result`, where `null` means no completions.
    ///
    /// # Errors
    ///
    /// The binding error of the result.
    pub fn from_result(result: &Tape) -> Result<Option<Self>, BindError> {
        result.decode_with("CompletionResponse", Self::setter().nullable(), DecoderOptions::default())
    }
}

/// Server capability for completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOptions {
    #[serde(flatten)]
    pub work_done_progress: WorkDoneProgressOptions,
    /// Characters that trigger completion automatically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_characters: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_commit_characters: Option<Vec<String>>,
    /// The server resolves additional information for an item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolve_provider: Option<bool>,
}

impl Bind for CompletionOptions {
    const NAME: &'static str = "CompletionOptions";

    fn bind(init: &mut Initializer<Self>) {
        init.embed(|o| &mut o.work_done_progress)
            .optional(
                "triggerCharacters",
                |o| &mut o.trigger_characters,
                ValueSetter::array(ValueSetter::string),
            )
            .optional(
                "allCommitCharacters",
                |o| &mut o.all_commit_characters,
                ValueSetter::array(ValueSetter::string),
            )
            .optional("resolveProvider", |o| &mut o.resolve_provider, ValueSetter::boolean());
    }
}

/// Options for a dynamic `textDocument/completion` registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompletionRegistrationOptions {
    #[serde(flatten)]
    pub registration: TextDocumentRegistrationOptions,
    #[serde(flatten)]
    pub completion: CompletionOptions,
}

impl Bind for CompletionRegistrationOptions {
    const NAME: &'static str = "CompletionRegistrationOptions";

    fn bind(init: &mut Initializer<Self>) {
        init.embed(|o| &mut o.registration).embed(|o| &mut o.completion);
    }
}

/// The `completionItem.tagSupport` client capability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItemTagSupport {
    pub value_set: Vec<CompletionItemTag>,
}

impl Bind for CompletionItemTagSupport {
    const NAME: &'static str = "CompletionItemTagSupport";

    fn bind(init: &mut Initializer<Self>) {
        init.required("valueSet", |t| &mut t.value_set, ValueSetter::array(ValueSetter::enumerant));
    }
}

/// The `completion.completionItem` client capability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItemCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet_support: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_characters_support: Option<bool>,
    /// Supported formats for the documentation property, preferred first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_format: Option<Vec<MarkupKind>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated_support: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preselect_support: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_support: Option<CompletionItemTagSupport>,
}

impl Bind for CompletionItemCapabilities {
    const NAME: &'static str = "CompletionItemCapabilities";

    fn bind(init: &mut Initializer<Self>) {
        init.optional("snippetSupport", |c| &mut c.snippet_support, ValueSetter::boolean())
            .optional(
                "commitCharactersSupport",
                |c| &mut c.commit_characters_support,
                ValueSetter::boolean(),
            )
            .optional(
                "documentationFormat",
                |c| &mut c.documentation_format,
                ValueSetter::array(ValueSetter::keyword),
            )
            .optional("deprecatedSupport", |c| &mut c.deprecated_support, ValueSetter::boolean())
            .optional("preselectSupport", |c| &mut c.preselect_support, ValueSetter::boolean())
            .optional("tagSupport", |c| &mut c.tag_support, ValueSetter::record());
    }
}

/// The `completion.completionItemKind` client capability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItemKindCapabilities {
    /// Kinds the client supports. Without it the client only knows the
    /// kinds from `Text` to `Reference`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_set: Option<Vec<CompletionItemKind>>,
}

impl Bind for CompletionItemKindCapabilities {
    const NAME: &'static str = "CompletionItemKindCapabilities";

    fn bind(init: &mut Initializer<Self>) {
        init.optional("valueSet", |c| &mut c.value_set, ValueSetter::array(ValueSetter::enumerant));
    }
}

/// Client capabilities for `textDocument/completion`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionClientCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_registration: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_item: Option<CompletionItemCapabilities>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_item_kind: Option<CompletionItemKindCapabilities>,
    /// The client sends `context` with completion requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_support: Option<bool>,
}

impl Bind for CompletionClientCapabilities {
    const NAME: &'static str = "CompletionClientCapabilities";

    fn bind(init: &mut Initializer<Self>) {
        init.optional(
            "dynamicRegistration",
            |c| &mut c.dynamic_registration,
            ValueSetter::boolean(),
        )
        .optional("completionItem", |c| &mut c.completion_item, ValueSetter::record())
        .optional(
            "completionItemKind",
            |c| &mut c.completion_item_kind,
            ValueSetter::record(),
        )
        .optional("contextSupport", |c| &mut c.context_support, ValueSetter::boolean());
    }
}
