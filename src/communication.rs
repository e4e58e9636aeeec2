use crate::{alarm::NotificationId, scheduler::NotificationContent};

/// passed from the ticker thread to the gui, and from the gui to the ringer thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageType,
    pub notification_id: NotificationId,
}

impl Message {
    #[must_use]
    pub const fn new(kind: MessageType, notification_id: NotificationId) -> Self {
        Self {
            kind,
            notification_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageType {
    /// the trigger went off
    Delivered(NotificationContent),
    // user closed the alert
    Dismissed,
}
