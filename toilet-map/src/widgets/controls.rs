use chrono::{DateTime, Local, Utc};
use egui::{Align2, Color32, RichText, TextEdit};

use crate::{
    state::ViewState,
    types::{Axis, CoordinateField, Radius},
};

/// What the user did with the controls during one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ControlsOutcome {
    pub submitted: bool,
}

/// Radius slider plus the latitude/longitude form, pinned to the top right
/// corner.
///
/// The text fields only write to the view state when they are committed:
/// on focus loss, on Enter, or through the SUBMIT button.
pub struct WidgetControls {
    lat: CoordinateField,
    lng: CoordinateField,
    lat_focused: bool,
    lng_focused: bool,
}

impl WidgetControls {
    pub fn new(view_state: &ViewState) -> Self {
        let center = view_state.center();
        Self {
            lat: CoordinateField::new(Axis::Lat, center.lat),
            lng: CoordinateField::new(Axis::Lng, center.lng),
            lat_focused: false,
            lng_focused: false,
        }
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        view_state: &mut ViewState,
        toilet_count: usize,
        last_updated: Option<DateTime<Utc>>,
        busy: bool,
    ) -> ControlsOutcome {
        let mut outcome = ControlsOutcome::default();

        // Fields being typed into are left alone.
        let center = view_state.center();
        if !self.lat_focused {
            self.lat.sync(center.lat);
        }
        if !self.lng_focused {
            self.lng.sync(center.lng);
        }

        egui::Window::new("Search")
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .anchor(Align2::RIGHT_TOP, [-10.0, 10.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let mut meters = view_state.radius().meters();
                    let slider = egui::Slider::new(&mut meters, Radius::MIN..=Radius::MAX)
                        .step_by(1.0)
                        .show_value(false);
                    if ui.add(slider).changed() {
                        view_state.set_radius(Radius::new(meters));
                    }
                    ui.label(RichText::new(view_state.radius().to_string()).strong());
                });

                ui.add_space(5.0);

                ui.horizontal(|ui| {
                    let lat = coordinate_input(ui, &mut self.lat, view_state);
                    let lng = coordinate_input(ui, &mut self.lng, view_state);
                    self.lat_focused = lat.focused;
                    self.lng_focused = lng.focused;

                    let clicked = ui.button("SUBMIT").clicked();
                    if clicked || lat.submitted || lng.submitted {
                        commit(&mut self.lat, view_state);
                        commit(&mut self.lng, view_state);
                        outcome.submitted = true;
                    }
                });

                ui.add_space(5.0);

                ui.horizontal(|ui| {
                    ui.label(format!("{} toilets", toilet_count));
                    if let Some(updated) = last_updated {
                        ui.label(
                            RichText::new(format!(
                                "updated {}",
                                updated.with_timezone(&Local).format("%H:%M:%S")
                            ))
                            .weak(),
                        );
                    }
                    if busy {
                        ui.spinner();
                    }
                });
            });

        outcome
    }
}

struct FieldResponse {
    focused: bool,
    submitted: bool,
}

/// Enter inside a field submits the form, like the SUBMIT button.
fn submits_form(lost_focus: bool, enter_pressed: bool) -> bool {
    lost_focus && enter_pressed
}

/// Draws one coordinate text field, committing it when it loses focus.
fn coordinate_input(
    ui: &mut egui::Ui,
    field: &mut CoordinateField,
    view_state: &mut ViewState,
) -> FieldResponse {
    let label = field.axis().label();
    let invalid = field.is_invalid();

    let mut edit = TextEdit::singleline(&mut field.text)
        .desired_width(90.0)
        .hint_text(label);
    if invalid {
        edit = edit.text_color(Color32::RED);
    }

    let response = ui.add(edit).on_hover_text(label);
    let lost_focus = response.lost_focus();
    if lost_focus {
        commit(field, view_state);
    }

    let enter_pressed = ui.input(|i| i.key_pressed(egui::Key::Enter));
    FieldResponse {
        focused: response.has_focus(),
        submitted: submits_form(lost_focus, enter_pressed),
    }
}

fn commit(field: &mut CoordinateField, view_state: &mut ViewState) {
    if let Some(value) = field.commit() {
        match field.axis() {
            Axis::Lat => view_state.set_lat(value),
            Axis::Lng => view_state.set_lng(value),
        }
    }
}
