//! Capability groups that many params and options embed.
use serde::Serialize;

use super::ProgressToken;
use crate::{Bind, Initializer, ValueSetter};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkDoneProgressParams {
    /// Token the server may use to report work done progress.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_done_token: Option<ProgressToken>,
}

impl Bind for WorkDoneProgressParams {
    const NAME: &'static str = "WorkDoneProgressParams";

    fn bind(init: &mut Initializer<Self>) {
        init.optional("workDoneToken", |p| &mut p.work_done_token, ProgressToken::setter());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialResultParams {
    /// Token the server may use to stream partial results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_result_token: Option<ProgressToken>,
}

impl Bind for PartialResultParams {
    const NAME: &'static str = "PartialResultParams";

    fn bind(init: &mut Initializer<Self>) {
        init.optional(
            "partialResultToken",
            |p| &mut p.partial_result_token,
            ProgressToken::setter(),
        );
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkDoneProgressOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_done_progress: Option<bool>,
}

impl Bind for WorkDoneProgressOptions {
    const NAME: &'static str = "WorkDoneProgressOptions";

    fn bind(init: &mut Initializer<Self>) {
        init.optional("workDoneProgress", |o| &mut o.work_done_progress, ValueSetter::boolean());
    }
}
