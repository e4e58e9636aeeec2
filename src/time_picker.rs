use chrono::{Local, NaiveTime, Timelike};
use eframe::egui::{self, Id, Modal, TextEdit, Widget, Window};
use serde::{Deserialize, Serialize};

use crate::widgets::Knob;

/// how the time picker is drawn, it picks a time the same way in both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum PickerStyle {
    /// up/down buttons with text fields, inline in a window
    Spinner,
    /// hour and minute dials in a blocking modal
    Dial,
}

impl PickerStyle {
    #[must_use]
    pub const fn for_host() -> Self {
        if cfg!(any(target_os = "ios", target_os = "macos")) {
            Self::Spinner
        } else {
            Self::Dial
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerState {
    Cancelled,
    Picking,
    Confirmed(NaiveTime),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimePicker {
    hour: u8,
    minute: u8,
    hour_text: String,
    minute_text: String,
    style: PickerStyle,
}

impl TimePicker {
    /// starts at the current local time
    #[must_use]
    pub fn new(style: PickerStyle) -> Self {
        Self::at(Local::now().time(), style)
    }

    #[must_use]
    pub fn at(time: NaiveTime, style: PickerStyle) -> Self {
        // hour() < 24 and minute() < 60
        #[allow(clippy::cast_possible_truncation)]
        let (hour, minute) = (time.hour() as u8, time.minute() as u8);
        Self {
            hour,
            minute,
            hour_text: format!("{hour:02}"),
            minute_text: format!("{minute:02}"),
            style,
        }
    }

    /// seconds are always zero
    #[must_use]
    pub fn selected_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or(NaiveTime::MIN)
    }

    pub fn step_hour(&mut self, up: bool) {
        self.hour = if up { (self.hour + 1) % 24 } else { (self.hour + 23) % 24 };
        self.hour_text = format!("{:02}", self.hour);
    }

    pub fn step_minute(&mut self, up: bool) {
        self.minute = if up { (self.minute + 1) % 60 } else { (self.minute + 59) % 60 };
        self.minute_text = format!("{:02}", self.minute);
    }

    pub fn set_hour_text(&mut self, text: impl Into<String>) {
        self.hour_text = text.into();
    }

    pub fn set_minute_text(&mut self, text: impl Into<String>) {
        self.minute_text = text.into();
    }

    pub fn commit_hour_text(&mut self) {
        // if the input value is valid, update the value
        if let Ok(parsed) = self.hour_text.trim().parse::<u8>() {
            self.hour = parsed.min(23);
        }
        // sync the input value and the value regardless
        self.hour_text = format!("{:02}", self.hour);
    }

    pub fn commit_minute_text(&mut self) {
        if let Ok(parsed) = self.minute_text.trim().parse::<u8>() {
            self.minute = parsed.min(59);
        }
        self.minute_text = format!("{:02}", self.minute);
    }

    /// draws the "Set Alarm" dialog for this frame
    pub fn show(&mut self, ctx: &egui::Context) -> PickerState {
        match self.style {
            PickerStyle::Spinner => {
                let mut state = PickerState::Picking;
                Window::new("Set Alarm")
                    .collapsible(false)
                    .resizable(false)
                    .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                    .show(ctx, |ui| {
                        self.render_spinner(ui);
                        state = self.render_actions(ui);
                    });
                state
            }
            PickerStyle::Dial => {
                let response = Modal::new(Id::new("set_alarm")).show(ctx, |ui| {
                    ui.heading("Set Alarm");
                    self.render_dial(ui);
                    self.render_actions(ui)
                });
                // clicking outside or escape dismisses like cancel
                if response.should_close() && response.inner == PickerState::Picking {
                    PickerState::Cancelled
                } else {
                    response.inner
                }
            }
        }
    }

    fn render_spinner(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label("Hour");
                if ui.button("Up").clicked() {
                    self.step_hour(true);
                }
                if TextEdit::singleline(&mut self.hour_text)
                    .desired_width(20.0)
                    .char_limit(2)
                    .ui(ui)
                    .lost_focus()
                {
                    self.commit_hour_text();
                }
                if ui.button("Down").clicked() {
                    self.step_hour(false);
                }
            });
            ui.label(":");
            ui.vertical(|ui| {
                ui.label("Minute");
                if ui.button("Up").clicked() {
                    self.step_minute(true);
                }
                if TextEdit::singleline(&mut self.minute_text)
                    .desired_width(20.0)
                    .char_limit(2)
                    .ui(ui)
                    .lost_focus()
                {
                    self.commit_minute_text();
                }
                if ui.button("Down").clicked() {
                    self.step_minute(false);
                }
            });
        });
    }

    fn render_dial(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label("Hour");
                let hand = ui.visuals().selection.bg_fill;
                if Knob::new(&mut self.hour, 0, 23)
                    .radius(60.)
                    .hand_color(hand)
                    .ui(ui)
                    .changed()
                {
                    self.hour_text = format!("{:02}", self.hour);
                }
            });
            ui.vertical(|ui| {
                ui.label("Minute");
                let hand = ui.visuals().selection.bg_fill;
                if Knob::new(&mut self.minute, 0, 59)
                    .radius(60.)
                    .hand_color(hand)
                    .ui(ui)
                    .changed()
                {
                    self.minute_text = format!("{:02}", self.minute);
                }
            });
        });
        ui.label(crate::alarm::format_display_time(&self.selected_time()));
    }

    fn render_actions(&mut self, ui: &mut egui::Ui) -> PickerState {
        let mut state = PickerState::Picking;
        ui.horizontal(|ui| {
            if ui.button("Cancel").clicked() {
                state = PickerState::Cancelled;
            }
            if ui.button("Save").clicked() {
                // a half typed value still counts
                self.commit_hour_text();
                self.commit_minute_text();
                state = PickerState::Confirmed(self.selected_time());
            }
        });
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker(hour: u32, minute: u32) -> TimePicker {
        TimePicker::at(
            NaiveTime::from_hms_opt(hour, minute, 42).unwrap(),
            PickerStyle::Spinner,
        )
    }

    #[test]
    fn drops_seconds() {
        assert_eq!(
            picker(14, 30).selected_time(),
            NaiveTime::from_hms_opt(14, 30, 0).unwrap()
        );
    }

    #[test]
    fn steps_wrap_around() {
        let mut p = picker(23, 59);
        p.step_hour(true);
        p.step_minute(true);
        assert_eq!(p.selected_time(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        p.step_hour(false);
        p.step_minute(false);
        assert_eq!(
            p.selected_time(),
            NaiveTime::from_hms_opt(23, 59, 0).unwrap()
        );
    }

    #[test]
    fn typed_values_are_clamped() {
        let mut p = picker(9, 5);
        p.set_hour_text("77");
        p.commit_hour_text();
        p.set_minute_text("61");
        p.commit_minute_text();
        assert_eq!(
            p.selected_time(),
            NaiveTime::from_hms_opt(23, 59, 0).unwrap()
        );
    }

    #[test]
    fn garbage_text_keeps_previous_value() {
        let mut p = picker(9, 5);
        p.set_minute_text("x");
        p.commit_minute_text();
        assert_eq!(p.minute_text, "05");
        assert_eq!(p.selected_time(), NaiveTime::from_hms_opt(9, 5, 0).unwrap());
    }
}
