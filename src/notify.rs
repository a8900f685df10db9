use std::sync::Arc;

/// Transient user-facing notifications.
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

pub type DynNotifier = Arc<dyn Notifier + Send + Sync>;

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(notification = "success", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::warn!(notification = "error", "{}", message);
    }
}

pub fn tracing_notifier() -> DynNotifier {
    Arc::new(TracingNotifier)
}
