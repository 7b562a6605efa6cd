//! Notifier that reports through `tracing`.

use async_trait::async_trait;
use tracing::{error, info, warn};

use vectra_core::traits::{NoticeLevel, Notifier};

/// Logs notifications and answers confirmations with a fixed value.
///
/// Used by headless hosts such as the CLI.
#[derive(Debug, Clone, Copy)]
pub struct LogNotifier {
    auto_confirm: bool,
}

impl LogNotifier {
    /// Creates a notifier answering every confirmation with `auto_confirm`.
    pub fn new(auto_confirm: bool) -> Self {
        Self { auto_confirm }
    }
}

impl Default for LogNotifier {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info | NoticeLevel::Success => info!(level = ?level, "{message}"),
            NoticeLevel::Warning => warn!("{message}"),
            NoticeLevel::Error => error!("{message}"),
        }
    }

    async fn confirm(&self, message: &str) -> bool {
        info!(answer = self.auto_confirm, "Confirmation requested: {message}");
        self.auto_confirm
    }
}
