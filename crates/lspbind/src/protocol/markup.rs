use serde::Serialize;

use crate::{Bind, Initializer, Push, ValueSetter, keyword};

keyword! {
    /// Format of a markup content value.
    pub enum MarkupKind {
        PlainText = "plaintext",
        Markdown = "markdown",
    }
}

/// A string rendered by the client according to `kind`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MarkupContent {
    pub kind: MarkupKind,
    pub value: String,
}

impl Bind for MarkupContent {
    const NAME: &'static str = "MarkupContent";

    fn bind(init: &mut Initializer<Self>) {
        init.required("kind", |m| &mut m.kind, ValueSetter::keyword())
            .required("value", |m| &mut m.value, ValueSetter::string());
    }
}

/// Documentation given either as a plain string or as markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Documentation {
    String(String),
    MarkupContent(MarkupContent),
}

impl Default for Documentation {
    fn default() -> Self {
        Self::String(String::new())
    }
}

impl Documentation {
    /// A string selects the plain alternative, an object binds as markup.
    #[must_use]
    pub fn setter() -> ValueSetter<Self> {
        ValueSetter::new()
            .on_string(|doc: &mut Self, text| {
                *doc = Self::String(text);
                Ok(())
            })
            .on_object(|doc: &mut Self| {
                *doc = Self::MarkupContent(MarkupContent::default());
                Push::record::<MarkupContent>().within(|doc: &mut Self| match doc {
                    Self::MarkupContent(markup) => Some(markup),
                    Self::String(_) => None,
                })
            })
    }
}
