use crate::traits::Notifier;
use async_trait::async_trait;
use std::sync::Arc;

/// Delivers to each channel in turn. A failing channel does not stop the
/// rest since every `Notifier` already swallows its own errors.
pub struct FanoutNotifier {
    channels: Vec<Arc<dyn Notifier>>,
}

impl FanoutNotifier {
    pub fn new(channels: Vec<Arc<dyn Notifier>>) -> Self {
        Self { channels }
    }
}

#[async_trait]
impl Notifier for FanoutNotifier {
    fn name(&self) -> &str {
        "fanout"
    }

    async fn notify(&self, text: &str) {
        for channel in &self.channels {
            channel.notify(text).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingNotifier;

    #[tokio::test]
    async fn delivers_to_every_channel_in_order() {
        let a = Arc::new(RecordingNotifier::default());
        let b = Arc::new(RecordingNotifier::default());
        let fanout = FanoutNotifier::new(vec![a.clone(), b.clone()]);

        fanout.notify("one").await;
        fanout.notify("two").await;

        assert_eq!(a.messages(), vec!["one", "two"]);
        assert_eq!(b.messages(), vec!["one", "two"]);
    }
}
