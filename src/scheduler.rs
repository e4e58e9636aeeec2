//! seams to the host's notification service

use chrono::{NaiveTime, Timelike};

use crate::{
    alarm::NotificationId,
    error::{CancellationError, SchedulingError},
};

/// when a notification should fire: a time of day, optionally every day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTrigger {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub repeats: bool,
}

impl DailyTrigger {
    /// repeating trigger at the hour/minute/second of `time`, anything else in `time` is ignored
    #[must_use]
    pub fn daily_at<T: Timelike>(time: &T) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
            repeats: true,
        }
    }

    /// `None` if the fields don't make up a valid time of day
    #[must_use]
    pub fn time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute, self.second)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    /// play the default sound on delivery
    pub sound: bool,
}

pub trait NotificationScheduler {
    /// # Errors
    /// if notifications are not permitted or the trigger is malformed
    fn schedule(
        &mut self,
        trigger: DailyTrigger,
        content: NotificationContent,
    ) -> Result<NotificationId, SchedulingError>;

    /// # Errors
    /// `CancellationError::NotFound` if `id` is not scheduled
    fn cancel(&mut self, id: &NotificationId) -> Result<(), CancellationError>;
}

/// asked once at startup whether notifications may be sent
pub trait PermissionGate {
    fn request_permission(&mut self) -> bool;
}

impl<S: NotificationScheduler + ?Sized> NotificationScheduler for Box<S> {
    fn schedule(
        &mut self,
        trigger: DailyTrigger,
        content: NotificationContent,
    ) -> Result<NotificationId, SchedulingError> {
        (**self).schedule(trigger, content)
    }

    fn cancel(&mut self, id: &NotificationId) -> Result<(), CancellationError> {
        (**self).cancel(id)
    }
}
