use eframe::egui::{
    Align2, Color32, FontId, Response, Sense, Stroke, Ui, Vec2, Widget,
};

/// rotary dial for picking one of `min..=max`, the first value sits at the top
pub struct Knob<'a> {
    min: u8,
    max: u8,
    value: &'a mut u8,
    hand_color: Option<Color32>,
    fill: Option<Color32>,
    stroke: Option<Stroke>,
    radius: Option<f32>,
}

impl<'a> Knob<'a> {
    pub const fn new(value: &'a mut u8, min: u8, max: u8) -> Self {
        Self {
            min,
            max,
            value,
            hand_color: None,
            fill: None,
            stroke: None,
            radius: None,
        }
    }

    #[must_use]
    pub const fn radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }

    #[must_use]
    pub const fn hand_color(mut self, color: Color32) -> Self {
        self.hand_color = Some(color);
        self
    }
}

/// the angle (degrees) each value takes up on the dial
fn part_angle(min: u8, max: u8) -> f32 {
    360. / (f32::from(max.saturating_sub(min)) + 1.)
}

/// value under `degrees`, measured clockwise from the top of the dial
#[must_use]
pub fn value_at_angle(degrees: f32, min: u8, max: u8) -> u8 {
    let steps = (degrees.rem_euclid(360.) / part_angle(min, max)).floor();
    // steps is in 0..=(max - min) so this can't truncate
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = steps as u8;
    min.saturating_add(steps).min(max)
}

impl Widget for Knob<'_> {
    // partially from https://github.com/obsqrbtz/egui_knob and https://codeberg.org/pintariching/egui_timepicker
    fn ui(self, ui: &mut Ui) -> Response {
        let Self {
            min,
            max,
            value,
            hand_color,
            fill,
            stroke,
            radius,
        } = self;

        let radius = radius.unwrap_or_else(|| ui.spacing().slider_width / 2.);
        let (rect, mut response) =
            ui.allocate_exact_size(Vec2::splat(radius * 2.), Sense::click_and_drag());
        let part_angle = part_angle(min, max);
        if response.dragged() || response.clicked() {
            if let Some(pointer) = response.interact_pointer_pos() {
                // inverse of drawing the hand from a value (see below)
                let angle = (pointer - rect.center()).angle().to_degrees() + 90.;
                let picked = value_at_angle(angle, min, max);
                if picked != *value {
                    *value = picked;
                    response.mark_changed();
                }
            }
        }

        let visuals = ui.style().interact(&response);
        let painter = ui.painter();
        painter.circle_filled(rect.center(), radius, fill.unwrap_or(visuals.bg_fill));
        let border_stroke = stroke.unwrap_or(visuals.fg_stroke);
        painter.circle_stroke(rect.center(), radius, border_stroke);

        // subtract 90 so that `min` is at the top
        let angle = part_angle.mul_add(f32::from(value.saturating_sub(min)), -90.);
        let tip = rect.center() + Vec2::angled(angle.to_radians()) * radius;
        let mut hand_stroke = visuals.fg_stroke;
        if let Some(color) = hand_color {
            hand_stroke.color = color;
        }
        let knob = rect.center()
            + Vec2::angled(angle.to_radians()) * border_stroke.width.mul_add(-2., radius);
        painter.line_segment([rect.center(), tip], hand_stroke);
        painter.circle_filled(knob, hand_stroke.width * 2., hand_stroke.color);
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            format!("{:02}", *value),
            FontId::proportional(radius / 2.5),
            visuals.text_color(),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_of_dial_is_min() {
        assert_eq!(value_at_angle(0., 0, 23), 0);
        assert_eq!(value_at_angle(360., 0, 59), 0);
    }

    #[test]
    fn quarter_turns() {
        // 24 hours, 15 degrees each
        assert_eq!(value_at_angle(90., 0, 23), 6);
        assert_eq!(value_at_angle(180., 0, 23), 12);
        // 60 minutes, 6 degrees each
        assert_eq!(value_at_angle(270., 0, 59), 45);
    }

    #[test]
    fn negative_angles_wrap() {
        assert_eq!(value_at_angle(-6., 0, 59), 59);
    }
}
