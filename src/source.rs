use crate::config::SourceConfig;
use crate::error::{truncate_body, Error, Result};
use crate::types::EventBatch;
use async_trait::async_trait;
use tracing::{debug, info};

pub(crate) const USER_AGENT: &str = concat!("event-scanner/", env!("CARGO_PKG_VERSION"));

/// Anything that can produce the batch of events for one run
#[async_trait]
pub trait EventSource {
    async fn fetch(&self) -> Result<EventBatch>;
}

/// Fetches events with one unauthenticated GET
pub struct HttpEventSource {
    client: reqwest::Client,
    url: String,
}

impl HttpEventSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            url: config.events_url.clone(),
        })
    }
}

#[async_trait]
impl EventSource for HttpEventSource {
    async fn fetch(&self) -> Result<EventBatch> {
        debug!(url = %self.url, "fetching events");
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Status {
                url: self.url.clone(),
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let batch = EventBatch(serde_json::from_str(&body)?);
        info!(
            url = %self.url,
            status = status.as_u16(),
            records = ?batch.len(),
            "fetched events"
        );
        Ok(batch)
    }
}
