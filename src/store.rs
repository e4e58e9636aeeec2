use chrono::Timelike;
use log::{debug, info, warn};

use crate::{
    alarm::{format_display_time, AlarmRecord, NotificationId},
    error::{AlarmError, CancellationError, SchedulingError},
    scheduler::{DailyTrigger, NotificationContent, NotificationScheduler, PermissionGate},
};

pub const DEFAULT_TITLE: &str = "Alarm";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    #[default]
    NotRequested,
    Granted,
    Denied,
}

/// the list of alarms, in the order they were added,
/// kept in sync with the notifications scheduled at `S`
#[derive(Debug)]
pub struct AlarmStore<S> {
    alarms: Vec<AlarmRecord>,
    scheduler: S,
    permission: Permission,
    title: String,
}

impl<S: NotificationScheduler> AlarmStore<S> {
    #[must_use]
    pub fn new(scheduler: S) -> Self {
        Self {
            alarms: Vec::new(),
            scheduler,
            permission: Permission::NotRequested,
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// title used for every notification scheduled from now on
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// should be called once at startup, `add` fails until this returns true
    pub fn request_permission<G: PermissionGate + ?Sized>(&mut self, gate: &mut G) -> bool {
        let granted = gate.request_permission();
        if granted {
            info!("permission granted");
            self.permission = Permission::Granted;
        } else {
            warn!("permission to send notifications was denied");
            self.permission = Permission::Denied;
        }
        granted
    }

    #[must_use]
    pub const fn permission(&self) -> Permission {
        self.permission
    }

    #[must_use]
    pub fn permission_granted(&self) -> bool {
        self.permission == Permission::Granted
    }

    /// schedules a daily notification at the hour/minute/second of `time`
    /// and appends a new active alarm for it.
    ///
    /// # Errors
    /// `AlarmError::Permission` if permission wasn't granted,
    /// `AlarmError::Scheduling` if the scheduler rejects the trigger.
    /// in both cases the list is left untouched
    pub fn add<T: Timelike>(&mut self, time: &T) -> Result<&AlarmRecord, AlarmError> {
        if !self.permission_granted() {
            return Err(AlarmError::Permission);
        }
        let display_time = format_display_time(time);
        let content = NotificationContent {
            title: self.title.clone(),
            body: format!("It's time! Alarm set for {display_time}"),
            sound: true,
        };
        let id = self
            .scheduler
            .schedule(DailyTrigger::daily_at(time), content)?;
        // only a scheduler breaking its contract hands out a live id twice.
        // the new notification stays scheduled but untracked, cancelling it
        // would also cancel the alarm already holding that id
        if self.get(&id).is_some() {
            return Err(SchedulingError::Unavailable(format!(
                "scheduler reused notification id {id}"
            ))
            .into());
        }
        info!("scheduled alarm {id} for {display_time}");
        let index = self.alarms.len();
        self.alarms.push(AlarmRecord::new(id, display_time));
        Ok(&self.alarms[index])
    }

    /// flips whether the alarm is shown as active, unknown ids are ignored.
    /// the scheduled notification is not touched
    pub fn toggle(&mut self, id: &NotificationId) {
        if let Some(alarm) = self.alarms.iter_mut().find(|alarm| &alarm.id == id) {
            alarm.active = !alarm.active;
            debug!("alarm {id} is now {}", alarm.status());
        }
    }

    /// cancels the notification and then drops the alarm from the list.
    /// a notification the scheduler no longer knows about counts as already cancelled.
    ///
    /// # Errors
    /// `AlarmError::Cancellation` for any other cancellation failure, the alarm is kept
    pub fn remove(&mut self, id: &NotificationId) -> Result<(), AlarmError> {
        match self.scheduler.cancel(id) {
            Ok(()) => {}
            Err(CancellationError::NotFound(_)) => {
                warn!("notification {id} was not scheduled, removing alarm anyway");
            }
            Err(e) => return Err(e.into()),
        }
        let before = self.alarms.len();
        self.alarms.retain(|alarm| &alarm.id != id);
        if self.alarms.len() != before {
            info!("removed alarm {id}");
        }
        Ok(())
    }

    #[must_use]
    pub fn alarms(&self) -> &[AlarmRecord] {
        &self.alarms
    }

    #[must_use]
    pub fn get(&self, id: &NotificationId) -> Option<&AlarmRecord> {
        self.alarms.iter().find(|alarm| &alarm.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }

    #[must_use]
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::NaiveTime;

    use super::*;

    #[derive(Default)]
    struct Counter {
        next: u32,
        live: HashSet<NotificationId>,
        broken_cancel: bool,
        last_content: Option<NotificationContent>,
    }

    impl NotificationScheduler for Counter {
        fn schedule(
            &mut self,
            trigger: DailyTrigger,
            content: NotificationContent,
        ) -> Result<NotificationId, SchedulingError> {
            assert!(trigger.repeats);
            self.next += 1;
            let id = NotificationId::new(format!("n{}", self.next));
            self.live.insert(id.clone());
            self.last_content = Some(content);
            Ok(id)
        }

        fn cancel(&mut self, id: &NotificationId) -> Result<(), CancellationError> {
            if self.broken_cancel {
                return Err(CancellationError::Unavailable("offline".to_string()));
            }
            if self.live.remove(id) {
                Ok(())
            } else {
                Err(CancellationError::NotFound(id.clone()))
            }
        }
    }

    /// hands out the same id every time
    struct Stuck;

    impl NotificationScheduler for Stuck {
        fn schedule(
            &mut self,
            _trigger: DailyTrigger,
            _content: NotificationContent,
        ) -> Result<NotificationId, SchedulingError> {
            Ok(NotificationId::new("same"))
        }

        fn cancel(&mut self, _id: &NotificationId) -> Result<(), CancellationError> {
            Ok(())
        }
    }

    struct Answer(bool);

    impl PermissionGate for Answer {
        fn request_permission(&mut self) -> bool {
            self.0
        }
    }

    fn granted() -> AlarmStore<Counter> {
        let mut store = AlarmStore::new(Counter::default());
        assert!(store.request_permission(&mut Answer(true)));
        store
    }

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn add_before_permission_is_rejected() {
        let mut store = AlarmStore::new(Counter::default());
        assert_eq!(store.permission(), Permission::NotRequested);
        assert_eq!(store.add(&at(7, 0)).unwrap_err(), AlarmError::Permission);
        assert!(store.is_empty());
    }

    #[test]
    fn notification_body_mentions_time() {
        let mut store = granted().with_title("Wake up");
        store.add(&at(6, 45)).unwrap();
        let content = store.scheduler().last_content.clone().unwrap();
        assert_eq!(content.title, "Wake up");
        assert_eq!(content.body, "It's time! Alarm set for 06:45");
        assert!(content.sound);
    }

    #[test]
    fn reused_id_is_rejected() {
        let mut store = AlarmStore::new(Stuck);
        store.request_permission(&mut Answer(true));
        store.add(&at(7, 0)).unwrap();
        assert!(matches!(
            store.add(&at(8, 0)),
            Err(AlarmError::Scheduling(SchedulingError::Unavailable(_)))
        ));
        assert_eq!(store.len(), 1);
        assert_eq!(store.alarms()[0].display_time(), "07:00");
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut store = granted();
        let id = store.add(&at(8, 15)).unwrap().id().clone();
        store.toggle(&id);
        assert!(!store.get(&id).unwrap().active());
        store.toggle(&id);
        assert!(store.get(&id).unwrap().active());
    }

    #[test]
    fn failed_cancel_keeps_alarm() {
        let mut store = granted();
        let id = store.add(&at(8, 15)).unwrap().id().clone();
        store.scheduler_mut().broken_cancel = true;
        assert!(matches!(
            store.remove(&id),
            Err(AlarmError::Cancellation(CancellationError::Unavailable(_)))
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let mut store = granted();
        let first = store.add(&at(5, 0)).unwrap().id().clone();
        let second = store.add(&at(6, 0)).unwrap().id().clone();
        let third = store.add(&at(7, 0)).unwrap().id().clone();
        store.remove(&second).unwrap();
        let ids: Vec<_> = store.alarms().iter().map(AlarmRecord::id).collect();
        assert_eq!(ids, vec![&first, &third]);
    }
}
