use crate::config::NotifyConfig;
use crate::notify::{FanoutNotifier, LogNotifier, PushoverNotifier, WebhookNotifier};
use crate::traits::Notifier;
use std::sync::Arc;
use tracing::{info, warn};

/// Builds the operator notifier from whatever credentials are present.
/// Never fails: missing or partial configuration degrades to logging.
pub fn create_notifier(config: &NotifyConfig) -> Arc<dyn Notifier> {
    let mut channels: Vec<Arc<dyn Notifier>> = vec![];

    match (&config.pushover_token, &config.pushover_user) {
        (Some(token), Some(user)) => {
            channels.push(Arc::new(PushoverNotifier::new(token.clone(), user.clone())));
        }
        (Some(_), None) => warn!("PUSHOVER_TOKEN set without PUSHOVER_USER, pushover disabled"),
        _ => {}
    }

    if let Some(url) = &config.webhook_url {
        channels.push(Arc::new(WebhookNotifier::new(url.clone())));
    }

    match channels.len() {
        0 => {
            info!("no notification channel configured, notifications will be logged");
            Arc::new(LogNotifier)
        }
        1 => channels.remove(0),
        _ => Arc::new(FanoutNotifier::new(channels)),
    }
}
