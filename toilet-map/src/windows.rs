use egui::{Align2, RichText, Ui, Window};
use walkers::MapMemory;

const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";
const OSM_COPYRIGHT_URL: &str = "https://www.openstreetmap.org/copyright";

/// Zoom in/out buttons in the bottom left corner.
pub fn zoom(ui: &Ui, map_memory: &mut MapMemory) {
    Window::new("Zoom")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(Align2::LEFT_BOTTOM, [10., -10.])
        .show(ui.ctx(), |ui| {
            ui.horizontal(|ui| {
                if ui.button(RichText::new("➕").heading()).clicked() {
                    let _ = map_memory.zoom_in();
                }

                if ui.button(RichText::new("➖").heading()).clicked() {
                    let _ = map_memory.zoom_out();
                }
            });
        });
}

/// Tile attribution, required by the OpenStreetMap tile usage policy.
pub fn acknowledge(ui: &Ui) {
    Window::new("Acknowledge")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(Align2::RIGHT_BOTTOM, [-10., -10.])
        .show(ui.ctx(), |ui| {
            ui.hyperlink_to(OSM_ATTRIBUTION, OSM_COPYRIGHT_URL);
        });
}
