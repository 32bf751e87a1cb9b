//! User-facing notification channel.

use tracing::warn;

/// Fire-and-forget sink for messages shown to the user (toasts, banners).
pub trait Notifier {
    fn error(&self, message: &str);
}

/// Emits notifications as `tracing` warnings under target `cart::notify`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        warn!(target: "cart::notify", "{message}");
    }
}

impl<F: Fn(&str)> Notifier for F {
    fn error(&self, message: &str) {
        self(message)
    }
}
