use async_trait::async_trait;

/// Best-effort delivery of a short text to the operator.
///
/// Implementations must not panic or return errors: delivery failures are
/// logged and dropped so that callers never have to handle them.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;

    async fn notify(&self, text: &str);
}
