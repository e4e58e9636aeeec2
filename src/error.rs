use thiserror::Error;

use crate::alarm::NotificationId;

/// the notification adapter refused to schedule a trigger
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    #[error("notifications are not permitted")]
    NotPermitted,
    #[error("invalid trigger time {hour:02}:{minute:02}:{second:02}")]
    InvalidTrigger { hour: u32, minute: u32, second: u32 },
    #[error("notification scheduler unavailable: {0}")]
    Unavailable(String),
}

/// the notification adapter refused to cancel a scheduled notification
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CancellationError {
    #[error("no scheduled notification with id {0}")]
    NotFound(NotificationId),
    #[error("notification scheduler unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlarmError {
    #[error("permission to send notifications is required")]
    Permission,
    #[error("couldn't schedule alarm: {0}")]
    Scheduling(#[from] SchedulingError),
    #[error("couldn't cancel alarm: {0}")]
    Cancellation(#[from] CancellationError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't read or write config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("couldn't parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("couldn't serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("couldn't find a config directory for this platform")]
    NoConfigDir,
}
