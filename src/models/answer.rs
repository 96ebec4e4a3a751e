// src/models/answer.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An in-progress answer. Sent with a render request and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Answer {
    /// Free text typed into the single answer box.
    Text { text: String },
    /// Selected option of an mcq question.
    Choice { option_id: String },
    /// Per-part text for structured/essay questions, keyed by sub-question id.
    Parts { parts: HashMap<String, String> },
}

/// Body of a render request for the current question.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ViewRequest {
    pub answer: Option<Answer>,
    #[serde(default)]
    pub show_explanation: bool,
    #[serde(default)]
    pub show_answer: bool,
}
