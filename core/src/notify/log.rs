use crate::traits::Notifier;
use async_trait::async_trait;
use tracing::info;

/// Used when no delivery channel is configured; keeps a local trace of
/// what would have been sent.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    async fn notify(&self, text: &str) {
        info!(text, "notification (no channel configured)");
    }
}
