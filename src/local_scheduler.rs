//! in process notification scheduler for desktop hosts

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::Sender,
        Arc,
    },
    thread,
    time::Duration,
};

use chrono::{Local, NaiveDateTime, NaiveTime, TimeDelta};
use log::{debug, info};
use parking_lot::Mutex;

use crate::{
    alarm::NotificationId,
    communication::{Message, MessageType},
    error::{CancellationError, SchedulingError},
    scheduler::{DailyTrigger, NotificationContent, NotificationScheduler, PermissionGate},
};

#[derive(Debug, Clone)]
struct Pending {
    time: NaiveTime,
    repeats: bool,
    content: NotificationContent,
}

type PendingMap = HashMap<NotificationId, Pending>;

/// keeps scheduled notifications in memory and delivers them from a ticker thread
/// as `MessageType::Delivered` messages
#[derive(Debug)]
pub struct LocalScheduler {
    pending: Arc<Mutex<PendingMap>>,
    running: Arc<AtomicBool>,
}

impl LocalScheduler {
    /// spawns the ticker, which checks the wall clock every `tick`.
    /// it stops once the scheduler is dropped or `deliveries` hangs up
    #[must_use]
    pub fn start(deliveries: Sender<Message>, tick: Duration) -> Self {
        let pending = Arc::new(Mutex::new(PendingMap::new()));
        let running = Arc::new(AtomicBool::new(true));
        let ticker_pending = Arc::clone(&pending);
        let ticker_running = Arc::clone(&running);
        thread::spawn(move || {
            let mut last = Local::now().naive_local();
            while ticker_running.load(Ordering::Relaxed) {
                thread::sleep(tick);
                let now = Local::now().naive_local();
                let due = take_due(&mut ticker_pending.lock(), last, now);
                for message in due {
                    info!("delivering notification {}", message.notification_id);
                    if deliveries.send(message).is_err() {
                        debug!("delivery receiver hung up, stopping ticker");
                        return;
                    }
                }
                last = now;
            }
        });
        Self { pending, running }
    }

    #[cfg(test)]
    fn pending_len(&self) -> usize {
        self.pending.lock().len()
    }

    #[cfg(test)]
    fn is_scheduled(&self, id: &NotificationId) -> bool {
        self.pending.lock().contains_key(id)
    }
}

impl Drop for LocalScheduler {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

impl NotificationScheduler for LocalScheduler {
    fn schedule(
        &mut self,
        trigger: DailyTrigger,
        content: NotificationContent,
    ) -> Result<NotificationId, SchedulingError> {
        let time = trigger.time().ok_or(SchedulingError::InvalidTrigger {
            hour: trigger.hour,
            minute: trigger.minute,
            second: trigger.second,
        })?;
        let id = NotificationId::new(uuid::Uuid::new_v4().to_string());
        debug!("scheduling {id} at {time} (repeats: {})", trigger.repeats);
        self.pending.lock().insert(
            id.clone(),
            Pending {
                time,
                repeats: trigger.repeats,
                content,
            },
        );
        Ok(id)
    }

    fn cancel(&mut self, id: &NotificationId) -> Result<(), CancellationError> {
        if self.pending.lock().remove(id).is_none() {
            return Err(CancellationError::NotFound(id.clone()));
        }
        debug!("cancelled {id}");
        Ok(())
    }
}

/// true if `time` of day occurs in `(last, now]`
#[must_use]
pub fn is_due(time: NaiveTime, last: NaiveDateTime, now: NaiveDateTime) -> bool {
    if now <= last {
        return false;
    }
    let mut next = last.date().and_time(time);
    if next <= last {
        next += TimeDelta::days(1);
    }
    next <= now
}

// one shot triggers are dropped once they went off
fn take_due(pending: &mut PendingMap, last: NaiveDateTime, now: NaiveDateTime) -> Vec<Message> {
    let mut due: Vec<_> = pending
        .iter()
        .filter(|(_, p)| is_due(p.time, last, now))
        .map(|(id, p)| (p.time, id.clone()))
        .collect();
    due.sort();
    due.into_iter()
        .filter_map(|(_, id)| {
            let content = if pending.get(&id)?.repeats {
                pending.get(&id)?.content.clone()
            } else {
                pending.remove(&id)?.content
            };
            Some(Message::new(MessageType::Delivered(content), id))
        })
        .collect()
}

/// answers the startup permission request from configuration
#[derive(Debug, Clone, Copy)]
pub struct SettingsPermission {
    allowed: bool,
}

impl SettingsPermission {
    #[must_use]
    pub const fn new(allowed: bool) -> Self {
        Self { allowed }
    }
}

impl PermissionGate for SettingsPermission {
    fn request_permission(&mut self) -> bool {
        self.allowed
    }
}
