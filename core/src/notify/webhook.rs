use crate::traits::Notifier;
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

/// Posts `{"text": ...}` to an incoming-webhook URL (Slack and most chat
/// tools accept this shape).
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: super::http_client(),
            url: url.into(),
        }
    }

    async fn send(&self, text: &str) -> anyhow::Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&json!({ "text": text }))
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("webhook returned {}", response.status());
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn notify(&self, text: &str) {
        match self.send(text).await {
            Ok(()) => debug!("webhook notification delivered"),
            Err(e) => warn!(error = %e, "webhook notification failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn posts_text_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({ "text": "Recording why?" })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        WebhookNotifier::new(server.uri()).notify("Recording why?").await;
    }

    #[tokio::test]
    async fn rejected_delivery_does_not_propagate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let notifier = WebhookNotifier::new(server.uri());
        notifier.notify("denied").await;
        assert!(notifier.send("denied").await.is_err());
    }
}
