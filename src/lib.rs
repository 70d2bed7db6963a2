//! Ask a hosted language model which events from a feed are worth attending.
//!
//! One run fetches the event feed, renders it into a fixed prompt, sends
//! the prompt to the Messages API and hands back the model's answer.

pub mod completion;
pub mod config;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod scanner;
pub mod source;
pub mod types;

pub use completion::{CompletionClient, MessagesClient};
pub use config::{CompletionConfig, Config, ConfigBuilder, FileConfig, SourceConfig};
pub use error::{Error, Result, MAX_ERROR_BODY_CHARS};
pub use prompt::{build_prompt, INTERESTS};
pub use scanner::Scanner;
pub use source::{EventSource, HttpEventSource};
pub use types::{CompletionRequest, CompletionResponse, ContentSegment, EventBatch, Message, Prompt};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::completion::CompletionClient;
    pub use crate::config::{Config, ConfigBuilder, FileConfig};
    pub use crate::error::{Error, Result};
    pub use crate::scanner::Scanner;
    pub use crate::source::EventSource;
    pub use crate::types::{EventBatch, Prompt};
}
