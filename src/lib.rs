#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
#![deny(clippy::use_self, rust_2018_idioms)]
#![allow(clippy::multiple_crate_versions, clippy::module_name_repetitions)]

use std::{
    sync::mpsc::{Receiver, Sender},
    time::Duration,
};

use config::{Config, Theme};
use eframe::egui::{
    self, Align, Button, CentralPanel, Context, Grid, Id, Layout, Modal, ScrollArea,
    TopBottomPanel, Window,
};
use log::{info, warn};

pub mod alarm;
pub mod communication;
pub mod config;
pub mod error;
pub mod local_scheduler;
pub mod ringer;
pub mod scheduler;
pub mod store;
/// collects the daily time handed to `AlarmStore::add`
pub mod time_picker;
pub mod widgets;

use alarm::NotificationId;
use communication::{Message, MessageType};
use scheduler::{NotificationContent, NotificationScheduler};
use store::AlarmStore;
use time_picker::{PickerState, TimePicker};

/// something the user did to a row of the alarm list,
/// applied once the list is done rendering
#[derive(Debug, Clone, PartialEq, Eq)]
enum ListAction {
    Toggle(NotificationId),
    Remove(NotificationId),
}

#[derive(Debug)]
struct Delivery {
    id: NotificationId,
    content: NotificationContent,
}

pub struct Clock<S> {
    config: Config,
    store: AlarmStore<S>,
    deliveries: Receiver<Message>,
    ringer: Sender<Message>,
    adding_alarm: Option<TimePicker>,
    ringing: Vec<Delivery>,
    notices: Vec<String>,
    permission_acknowledged: bool,
}

impl<S: NotificationScheduler> Clock<S> {
    /// `store` should already have asked for permission
    #[must_use]
    pub fn new(
        config: Config,
        store: AlarmStore<S>,
        deliveries: Receiver<Message>,
        ringer: Sender<Message>,
    ) -> Self {
        let permission_acknowledged = store.permission_granted();
        Self {
            config,
            store,
            deliveries,
            ringer,
            adding_alarm: None,
            ringing: Vec::new(),
            notices: Vec::new(),
            permission_acknowledged,
        }
    }

    fn poll_deliveries(&mut self) {
        while let Ok(message) = self.deliveries.try_recv() {
            let MessageType::Delivered(content) = message.kind else {
                continue;
            };
            info!("notification received: {}", content.body);
            let id = message.notification_id;
            if content.sound && self.config.play_sound {
                self.send_ringer(Message::new(
                    MessageType::Delivered(content.clone()),
                    id.clone(),
                ));
            }
            // the same alarm can't pile up more than one alert
            self.ringing.retain(|delivery| delivery.id != id);
            self.ringing.push(Delivery { id, content });
        }
    }

    fn send_ringer(&self, message: Message) {
        if self.ringer.send(message).is_err() {
            warn!("ringer thread is gone, can't play or stop alarm sound");
        }
    }

    fn render_header(&mut self, ctx: &Context) {
        TopBottomPanel::top("time_and_ctrl").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let theme_btn = ui.add(Button::new({
                    if self.config.theme == Theme::Dark {
                        "🌞"
                    } else {
                        "🌙"
                    }
                }));
                if theme_btn.clicked() {
                    self.config.theme = !self.config.theme;
                }
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(chrono::Local::now().format("%H:%M:%S").to_string());
                });
            });
        });
    }

    fn render_permission_warning(&mut self, ctx: &Context) {
        if self.permission_acknowledged {
            return;
        }
        Modal::new(Id::new("permission_warning")).show(ctx, |ui| {
            ui.colored_label(
                ui.visuals().warn_fg_color,
                "Permission to send notifications is required!",
            );
            ui.label("New alarms can't be scheduled until notifications are allowed.");
            if ui.button("OK").clicked() {
                self.permission_acknowledged = true;
            }
        });
    }

    fn render_ringing(&mut self, ctx: &Context) {
        let mut dismissed = None;
        for (i, delivery) in self.ringing.iter().enumerate() {
            Window::new(delivery.content.title.as_str())
                .id(Id::new(("ringing", delivery.id.as_str())))
                .collapsible(false)
                .auto_sized()
                .show(ctx, |ui| {
                    ui.label(delivery.content.body.as_str());
                    if ui.button("Dismiss").clicked() {
                        dismissed = Some(i);
                    }
                });
        }
        if let Some(i) = dismissed {
            let delivery = self.ringing.remove(i);
            self.send_ringer(Message::new(MessageType::Dismissed, delivery.id));
        }
    }

    fn render_notices(&mut self, ctx: &Context) {
        if self.notices.is_empty() {
            return;
        }
        TopBottomPanel::bottom("notices").show(ctx, |ui| {
            let mut dismissed = None;
            for (i, notice) in self.notices.iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.colored_label(ui.visuals().error_fg_color, notice.as_str());
                    if ui.small_button("x").on_hover_text("dismiss").clicked() {
                        dismissed = Some(i);
                    }
                });
            }
            if let Some(i) = dismissed {
                self.notices.remove(i);
            }
        });
    }

    fn render_picker(&mut self, ctx: &Context) {
        let Some(picker) = &mut self.adding_alarm else {
            return;
        };
        match picker.show(ctx) {
            PickerState::Confirmed(time) => {
                self.adding_alarm = None;
                if let Err(e) = self.store.add(&time) {
                    warn!("{e}");
                    self.notices.push(e.to_string());
                }
            }
            PickerState::Cancelled => self.adding_alarm = None,
            PickerState::Picking => {}
        }
    }

    fn list_alarms(&self, ui: &mut egui::Ui) -> Vec<ListAction> {
        let mut actions = Vec::new();
        for alarm in self.store.alarms() {
            let mut active = alarm.active();
            if ui.checkbox(&mut active, "").changed() {
                actions.push(ListAction::Toggle(alarm.id().clone()));
            }
            ui.vertical(|ui| {
                ui.heading(alarm.display_time());
                ui.label(alarm.status());
            });
            if ui.button("Remove").clicked() {
                actions.push(ListAction::Remove(alarm.id().clone()));
            }
            ui.end_row();
        }
        actions
    }

    fn apply(&mut self, action: ListAction) {
        match action {
            ListAction::Toggle(id) => self.store.toggle(&id),
            ListAction::Remove(id) => {
                if let Err(e) = self.store.remove(&id) {
                    warn!("{e}");
                    self.notices.push(e.to_string());
                }
            }
        }
    }
}

impl<S: NotificationScheduler> eframe::App for Clock<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // deliveries and the header clock need polling
        ctx.request_repaint_after(Duration::from_millis(500));
        ctx.set_visuals(self.config.theme.into());
        self.poll_deliveries();

        self.render_header(ctx);
        self.render_notices(ctx);
        self.render_permission_warning(ctx);
        self.render_ringing(ctx);
        self.render_picker(ctx);

        let actions = CentralPanel::default()
            .show(ctx, |ui| {
                let can_add = self.store.permission_granted() && self.adding_alarm.is_none();
                if ui
                    .add_enabled(can_add, Button::new("+"))
                    .on_hover_text("add alarm")
                    .clicked()
                {
                    self.adding_alarm = Some(TimePicker::new(self.config.picker_style()));
                }
                ScrollArea::vertical()
                    .show(ui, |ui| {
                        Grid::new("alarms")
                            .striped(true)
                            .show(ui, |ui| self.list_alarms(ui))
                            .inner
                    })
                    .inner
            })
            .inner;
        // one at a time, so no two operations touch the same alarm at once
        for action in actions {
            self.apply(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use chrono::NaiveTime;

    use super::*;
    use crate::{
        error::{CancellationError, SchedulingError},
        scheduler::{DailyTrigger, PermissionGate},
    };

    #[derive(Default)]
    struct Refusing;

    impl NotificationScheduler for Refusing {
        fn schedule(
            &mut self,
            _trigger: DailyTrigger,
            _content: NotificationContent,
        ) -> Result<NotificationId, SchedulingError> {
            Err(SchedulingError::Unavailable("down".to_string()))
        }

        fn cancel(&mut self, _id: &NotificationId) -> Result<(), CancellationError> {
            Err(CancellationError::Unavailable("down".to_string()))
        }
    }

    struct Yes;

    impl PermissionGate for Yes {
        fn request_permission(&mut self) -> bool {
            true
        }
    }

    fn clock() -> (Clock<Refusing>, Sender<Message>, Receiver<Message>) {
        let mut store = AlarmStore::new(Refusing);
        store.request_permission(&mut Yes);
        let (delivery_tx, delivery_rx) = mpsc::channel();
        let (ringer_tx, ringer_rx) = mpsc::channel();
        (
            Clock::new(Config::default(), store, delivery_rx, ringer_tx),
            delivery_tx,
            ringer_rx,
        )
    }

    fn delivered(id: &str) -> Message {
        Message::new(
            MessageType::Delivered(NotificationContent {
                title: "Alarm".to_string(),
                body: "It's time! Alarm set for 07:00".to_string(),
                sound: true,
            }),
            id.into(),
        )
    }

    #[test]
    fn deliveries_are_forwarded_to_ringer_once_per_alarm() {
        let (mut clock, deliveries, ringer) = clock();
        deliveries.send(delivered("a")).unwrap();
        deliveries.send(delivered("a")).unwrap();
        clock.poll_deliveries();
        assert_eq!(clock.ringing.len(), 1);
        assert_eq!(ringer.try_iter().count(), 2);
    }

    #[test]
    fn muted_config_skips_ringer() {
        let (mut clock, deliveries, ringer) = clock();
        clock.config.play_sound = false;
        deliveries.send(delivered("a")).unwrap();
        clock.poll_deliveries();
        assert_eq!(clock.ringing.len(), 1);
        assert!(ringer.try_recv().is_err());
    }

    #[test]
    fn failed_remove_becomes_a_notice() {
        let (mut clock, _deliveries, _ringer) = clock();
        clock.apply(ListAction::Remove("missing".into()));
        assert_eq!(clock.notices.len(), 1);
        assert!(clock.notices[0].contains("couldn't cancel alarm"));
    }

    #[test]
    fn failed_add_leaves_list_empty() {
        let (mut clock, _deliveries, _ringer) = clock();
        let err = clock
            .store
            .add(&NaiveTime::from_hms_opt(7, 0, 0).unwrap())
            .unwrap_err();
        assert!(matches!(err, crate::error::AlarmError::Scheduling(_)));
        assert!(clock.store.is_empty());
    }
}
