use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The events returned by the source API for one run.
///
/// Usually a JSON array of records, but the shape is never checked: whatever
/// the feed returns is passed on to the prompt as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventBatch(pub Value);

impl EventBatch {
    /// Number of records when the batch is an array, `None` otherwise
    pub fn len(&self) -> Option<usize> {
        self.0.as_array().map(Vec::len)
    }

    /// Compact JSON text of the batch, keys in feed order
    pub fn to_text(&self) -> String {
        self.0.to_string()
    }
}

/// The finished prompt text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub(crate) fn new(text: String) -> Self {
        Prompt(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One conversation turn in a completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Body of a Messages API request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
}

impl CompletionRequest {
    /// A single user turn carrying the prompt
    pub fn single_turn(model: impl Into<String>, max_tokens: u32, prompt: &Prompt) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            messages: vec![Message::user(prompt.as_str())],
        }
    }
}

/// One element of the response `content` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSegment {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Body of a successful Messages API response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub content: Vec<ContentSegment>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

impl CompletionResponse {
    /// Text of the first content segment, untouched
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().and_then(|segment| segment.text.as_deref())
    }
}
