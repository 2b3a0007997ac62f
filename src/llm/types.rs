use serde::{Deserialize, Serialize};

use crate::agent::Tool;

/// What a completed agent run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    /// Final text of the run; `None` when the agent produced no message
    pub final_output: Option<String>,

    /// Number of web searches the agent performed during the run
    pub web_searches: usize,
}

impl RunOutput {
    pub fn text(output: impl Into<String>) -> Self {
        Self {
            final_output: Some(output.into()),
            web_searches: 0,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

// Responses API wire types

#[derive(Debug, Serialize)]
pub(crate) struct ResponsesRequest<'a> {
    pub model: &'a str,
    pub instructions: &'a str,
    pub input: &'a str,
    pub tools: &'a [Tool],
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponsesResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<ApiError>,
    #[serde(default)]
    pub incomplete_details: Option<IncompleteDetails>,
    #[serde(default)]
    pub output: Vec<OutputItem>,
    /// Convenience aggregate some gateways add to the payload
    #[serde(default)]
    pub output_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IncompleteDetails {
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum OutputItem {
    Message {
        #[serde(default)]
        content: Vec<ContentPart>,
    },
    WebSearchCall {
        #[serde(default)]
        status: Option<String>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ContentPart {
    OutputText { text: String },
    Refusal { refusal: String },
    #[serde(other)]
    Other,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ApiError,
}
