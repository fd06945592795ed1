use serde::Serialize;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Success,
    Destructive,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: Option<String>,
    pub variant: NotificationVariant,
}

/// Fire-and-forget toast outlet. The host UI decides how to render it;
/// nothing here waits for an acknowledgement.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}
