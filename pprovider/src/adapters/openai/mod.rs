mod auth;
mod provider;
mod serde_api;
mod transport;
mod types;

pub use provider::OpenAiProvider;
pub use transport::{OPENAI_DEFAULT_BASE_URL, OpenAiHttpTransport, OpenAiTransport};
pub use types::{
    OpenAiAuth, OpenAiChatRequest, OpenAiCompletionRequest, OpenAiFinishReason, OpenAiMessage,
    OpenAiResponse, OpenAiRole,
};
