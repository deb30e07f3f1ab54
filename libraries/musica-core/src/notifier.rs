//! Transient user-facing notices
//!
//! Front-ends render these as toasts, status lines, or log output.

use serde::{Deserialize, Serialize};

/// Category tag for a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// Something was added or enabled
    Success,
    /// An operation failed or was rejected
    Error,
    /// Something was removed or disabled
    Removed,
    /// Neutral information
    Default,
}

/// Displays a transient message to the user
pub trait Notifier: Send + Sync {
    /// Show `message` with the given category
    fn notify(&self, message: &str, kind: NoticeKind);
}

/// Notifier that writes notices to the `tracing` log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Error => tracing::warn!(kind = ?kind, "{message}"),
            _ => tracing::info!(kind = ?kind, "{message}"),
        }
    }
}

/// Notifier that drops every notice
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _message: &str, _kind: NoticeKind) {}
}
