use std::fmt;
use tokio::sync::broadcast;

/// Why the engine's active step pointer moved. Carried for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateCause {
    Undo,
    Redo,
    Clear,
    Replay,
    ExternalEdit,
}

impl fmt::Display for UpdateCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UpdateCause::Undo => "undo",
            UpdateCause::Redo => "redo",
            UpdateCause::Clear => "clear",
            UpdateCause::Replay => "replay",
            UpdateCause::ExternalEdit => "external edit",
        };
        f.write_str(label)
    }
}

/// Notification that the engine's active step pointer changed for reasons
/// other than a push from this synchronizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalUpdate {
    pub cause: UpdateCause,
}

/// Live subscription to external updates. Dropping it unsubscribes.
pub type UpdateSubscription = broadcast::Receiver<ExternalUpdate>;

pub trait UpdateChannel: Send + Sync {
    fn subscribe(&self) -> UpdateSubscription;
}
