//! Values applied when a request leaves an optional field unset.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_CHAT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_GENERATE_MAX_TOKENS: u32 = 500;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_SUMMARY_MAX_LENGTH: u32 = 150;

/// Summaries are sampled colder than chat or generation.
pub const SUMMARY_TEMPERATURE: f32 = 0.3;

/// Tokens granted on top of the requested word count.
pub const SUMMARY_TOKEN_BUFFER: u32 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayDefaults {
    pub model: String,
    pub chat_max_tokens: u32,
    pub generate_max_tokens: u32,
    pub temperature: f32,
    pub summary_max_length: u32,
}

impl Default for GatewayDefaults {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            chat_max_tokens: DEFAULT_CHAT_MAX_TOKENS,
            generate_max_tokens: DEFAULT_GENERATE_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            summary_max_length: DEFAULT_SUMMARY_MAX_LENGTH,
        }
    }
}

impl GatewayDefaults {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Which provider capability carries a summarize request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummarizeStyle {
    #[default]
    Completion,
    /// The prompt is sent as a single user message.
    Chat,
}

impl SummarizeStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completion => "completion",
            Self::Chat => "chat",
        }
    }
}

impl Display for SummarizeStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSummarizeStyle(pub String);

impl Display for UnknownSummarizeStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown summarize style '{}', expected 'completion' or 'chat'",
            self.0
        )
    }
}

impl std::error::Error for UnknownSummarizeStyle {}

impl FromStr for SummarizeStyle {
    type Err = UnknownSummarizeStyle;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "completion" => Ok(Self::Completion),
            "chat" => Ok(Self::Chat),
            _ => Err(UnknownSummarizeStyle(value.to_string())),
        }
    }
}

pub fn summarize_prompt(max_length: u32, text: &str) -> String {
    format!("Please summarize the following text in {max_length} words or less:\n\n{text}")
}

pub fn summary_max_tokens(max_length: u32) -> u32 {
    max_length.saturating_add(SUMMARY_TOKEN_BUFFER)
}
