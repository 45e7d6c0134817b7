//! Vendor API request and response types.

use brain_core::{HistoryEntry, Role};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// OpenAI chat completions
// ---------------------------------------------------------------------------

/// A chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant"
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }

    /// Convert a history entry. Router replies are the assistant's side.
    pub fn from_history(entry: &HistoryEntry) -> Self {
        match entry.role {
            Role::User => Self::user(entry.message.clone()),
            Role::System => Self::assistant(entry.message.clone()),
        }
    }
}

/// Build the message list for a turn: history, then the current prompt.
pub fn conversation_messages(history: &[HistoryEntry], prompt: &str) -> Vec<ChatMessage> {
    let mut messages: Vec<ChatMessage> = history.iter().map(ChatMessage::from_history).collect();
    messages.push(ChatMessage::user(prompt));
    messages
}

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model to use
    pub model: String,
    /// Messages in the conversation
    pub messages: Vec<ChatMessage>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Model used
    #[serde(default)]
    pub model: Option<String>,
    /// Response choices
    pub choices: Vec<Choice>,
    /// Token usage
    pub usage: Option<Usage>,
}

/// A response choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The message
    pub message: ResponseMessage,
    /// Finish reason
    pub finish_reason: Option<String>,
}

/// Response message.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Role
    pub role: String,
    /// Content (may be null)
    pub content: Option<String>,
}

/// Token usage information.
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    /// Prompt tokens
    pub prompt_tokens: u32,
    /// Completion tokens
    pub completion_tokens: u32,
    /// Total tokens
    pub total_tokens: u32,
}

/// OpenAI / Anthropic style error body: `{"error": {"message": ...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    /// Error details
    pub error: ApiErrorDetails,
}

/// API error details.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetails {
    /// Error message
    pub message: String,
    /// Error type
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}

impl ApiError {
    /// Message for a failed call, prefixed by the error type when the vendor
    /// sends one (`invalid_request_error: ...`).
    pub fn detail(self) -> String {
        match self.error.error_type {
            Some(error_type) if !error_type.is_empty() => {
                format!("{}: {}", error_type, self.error.message)
            }
            _ => self.error.message,
        }
    }
}

// ---------------------------------------------------------------------------
// Anthropic messages
// ---------------------------------------------------------------------------

/// Anthropic messages request.
#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    /// Model to use
    pub model: String,
    /// Maximum tokens to generate (required by the API)
    pub max_tokens: u32,
    /// Conversation, alternating user/assistant, starting with user
    pub messages: Vec<ChatMessage>,
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Anthropic messages response.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    /// Content blocks
    pub content: Vec<ContentBlock>,
    /// Stop reason
    #[serde(default)]
    pub stop_reason: Option<String>,
}

/// One content block of an Anthropic response.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    /// Block type ("text" for plain text)
    #[serde(rename = "type")]
    pub block_type: String,
    /// Text, for text blocks
    #[serde(default)]
    pub text: Option<String>,
}

// ---------------------------------------------------------------------------
// Gemini generateContent
// ---------------------------------------------------------------------------

/// Gemini generateContent request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Content turns
    pub contents: Vec<Content>,
    /// Generation settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// A Gemini content turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// "user" or "model"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Parts of the turn
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A text part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// Part text
    #[serde(default)]
    pub text: Option<String>,
}

/// Gemini generation settings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Maximum output tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Gemini generateContent response.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    /// Candidates, best first
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// A Gemini candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    /// Candidate content
    pub content: Option<Content>,
}

/// Gemini error body.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiError {
    /// Error details
    pub error: GeminiErrorDetails,
}

/// Gemini error details.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiErrorDetails {
    /// HTTP-like code
    #[serde(default)]
    pub code: Option<u16>,
    /// Error message
    pub message: String,
}

// ---------------------------------------------------------------------------
// Hugging Face text generation (LLaMA)
// ---------------------------------------------------------------------------

/// Text-generation inference request.
#[derive(Debug, Clone, Serialize)]
pub struct TextGenerationRequest {
    /// Prompt text
    pub inputs: String,
    /// Generation settings
    pub parameters: TextGenerationParameters,
}

/// Text-generation settings.
#[derive(Debug, Clone, Serialize)]
pub struct TextGenerationParameters {
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_new_tokens: Option<u32>,
    /// Temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Whether the prompt is echoed back in front of the completion
    pub return_full_text: bool,
}

/// One generated sequence. The endpoint answers with a list of these.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedText {
    pub generated_text: String,
}

/// Hugging Face error body: `{"error": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceError {
    pub error: String,
}
