use crate::traits::Notifier;
use async_trait::async_trait;
use tracing::{debug, warn};

const PUSHOVER_URL: &str = "https://api.pushover.net/1/messages.json";

pub struct PushoverNotifier {
    client: reqwest::Client,
    token: String,
    user: String,
    url: String,
}

impl PushoverNotifier {
    pub fn new(token: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            client: super::http_client(),
            token: token.into(),
            user: user.into(),
            url: PUSHOVER_URL.to_string(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    async fn send(&self, text: &str) -> anyhow::Result<()> {
        let form = [
            ("token", self.token.as_str()),
            ("user", self.user.as_str()),
            ("message", text),
        ];

        let response = self.client.post(&self.url).form(&form).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Pushover API error {}: {}", status, body);
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for PushoverNotifier {
    fn name(&self) -> &str {
        "pushover"
    }

    async fn notify(&self, text: &str) {
        match self.send(text).await {
            Ok(()) => debug!("pushover notification delivered"),
            Err(e) => warn!(error = %e, "pushover notification failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn posts_form_with_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/1/messages.json"))
            .and(body_string_contains("token=tok"))
            .and(body_string_contains("user=usr"))
            .and(body_string_contains("message=Recording+hello"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = PushoverNotifier::new("tok", "usr")
            .with_url(format!("{}/1/messages.json", server.uri()));
        notifier.notify("Recording hello").await;
    }

    #[tokio::test]
    async fn server_error_is_swallowed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(2)
            .mount(&server)
            .await;

        let notifier = PushoverNotifier::new("tok", "usr").with_url(server.uri());
        notifier.notify("anything").await;
        assert!(notifier.send("again").await.is_err());
    }

    #[tokio::test]
    async fn unreachable_host_is_swallowed() {
        let notifier = PushoverNotifier::new("tok", "usr").with_url("http://127.0.0.1:9/none");
        notifier.notify("nobody listening").await;
    }
}
