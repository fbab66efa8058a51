//! User-facing notifications.
//!
//! Actions that need the user's attention go through a [`Notifier`]: an alert
//! reports an outcome, a confirmation gates a destructive step.

use tracing::info;

/// Alert and confirmation channel to the user
pub trait Notifier {
    /// Shows an informational or error message.
    fn alert(&self, title: &str, message: &str);

    /// Asks the user to confirm an action. `false` cancels it.
    fn confirm(&self, title: &str, message: &str) -> bool;
}

/// Writes alerts to the log and confirms every request
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, title: &str, message: &str) {
        info!("{title}: {message}");
    }

    fn confirm(&self, title: &str, message: &str) -> bool {
        info!("{title}: {message} (confirmed automatically)");
        true
    }
}
