use std::fmt;

use chrono::Timelike;

/// opaque identifier handed out by the notification scheduler
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(String);

impl NotificationId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NotificationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for NotificationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// represents one alarm in the list.
/// there is exactly one scheduled notification behind every record, keyed by `id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmRecord {
    pub(crate) id: NotificationId,
    pub(crate) display_time: String,
    /// only changes how the alarm is shown, the notification still fires when inactive
    pub(crate) active: bool,
}

impl AlarmRecord {
    #[must_use]
    pub const fn new(id: NotificationId, display_time: String) -> Self {
        Self {
            id,
            display_time,
            active: true,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &NotificationId {
        &self.id
    }

    #[must_use]
    pub fn display_time(&self) -> &str {
        &self.display_time
    }

    #[must_use]
    pub const fn active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn status(&self) -> &'static str {
        if self.active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

/// 24 hour `HH:MM`, seconds are dropped
#[must_use]
pub fn format_display_time<T: Timelike>(time: &T) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}
