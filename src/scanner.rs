use crate::completion::{CompletionClient, MessagesClient};
use crate::config::{Config, SourceConfig};
use crate::error::Result;
use crate::prompt::build_prompt;
use crate::source::{EventSource, HttpEventSource};
use crate::types::{EventBatch, Prompt};

/// Runs one scan: fetch events, build the prompt, ask the model.
///
/// The steps run strictly in order and a failure in any of them ends the
/// run; the completion client is never called if fetching fails.
///
/// A scanner without a model (`C = ()`) can still fetch events and render
/// the prompt, which is all the `events` and `prompt` commands need.
pub struct Scanner<S, C> {
    source: S,
    client: C,
}

impl Scanner<HttpEventSource, MessagesClient> {
    /// Scanner wired to the real HTTP endpoints
    pub fn from_config(config: Config) -> Result<Self> {
        let source = HttpEventSource::new(&config.source)?;
        let client = MessagesClient::new(config.completion)?;
        Ok(Scanner::new(source, client))
    }
}

impl Scanner<HttpEventSource, ()> {
    /// Scanner that only talks to the event feed; needs no credential
    pub fn from_source_config(config: &SourceConfig) -> Result<Self> {
        Ok(Scanner::new(HttpEventSource::new(config)?, ()))
    }
}

impl<S: EventSource, C> Scanner<S, C> {
    pub fn new(source: S, client: C) -> Self {
        Self { source, client }
    }

    pub async fn fetch_events(&self) -> Result<EventBatch> {
        self.source.fetch().await
    }

    pub async fn build_prompt(&self) -> Result<Prompt> {
        let events = self.fetch_events().await?;
        Ok(build_prompt(&events))
    }
}

impl<S: EventSource, C: CompletionClient> Scanner<S, C> {
    /// Full run; returns the model's answer unmodified
    pub async fn scan(&self) -> Result<String> {
        let prompt = self.build_prompt().await?;
        self.client.complete(&prompt).await
    }
}
