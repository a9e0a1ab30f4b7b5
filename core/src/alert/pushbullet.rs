use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{AlertChannel, AlertEvent, ChannelError};

pub const PUSHBULLET_ENDPOINT: &str = "https://api.pushbullet.com/v2/pushes";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Serialize)]
struct PushNote<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    title: &'a str,
    body: &'a str,
}

impl<'a> From<&'a AlertEvent> for PushNote<'a> {
    fn from(event: &'a AlertEvent) -> Self {
        Self {
            kind: "note",
            title: &event.title,
            body: &event.message,
        }
    }
}

/// Remote push notification through the Pushbullet API.
pub struct PushbulletChannel {
    client: Client,
    endpoint: String,
    token: String,
}

impl PushbulletChannel {
    /// The access token is a delivery credential supplied by the operator.
    pub fn new(token: impl Into<String>) -> Result<Self, ChannelError> {
        let client: Client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: PUSHBULLET_ENDPOINT.to_string(),
            token: token.into(),
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl AlertChannel for PushbulletChannel {
    fn name(&self) -> &str {
        "Pushbullet"
    }

    async fn deliver(&self, event: &AlertEvent) -> Result<(), ChannelError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Access-Token", &self.token)
            .json(&PushNote::from(event))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: String = response.text().await.unwrap_or_default();
            return Err(ChannelError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
