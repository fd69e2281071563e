pub mod factory;
pub mod fanout;
pub mod log;
pub mod pushover;
pub mod webhook;

pub use factory::create_notifier;
pub use fanout::FanoutNotifier;
pub use log::LogNotifier;
pub use pushover::PushoverNotifier;
pub use webhook::WebhookNotifier;

use std::time::Duration;

const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(NOTIFY_TIMEOUT)
        .build()
        .unwrap_or_default()
}
