use egui::{Align2, Color32, Id, Order, Pos2, RichText};

use crate::types::ToiletRecord;

/// Details of a toilet, floating above its marker.
pub struct ToiletPopup<'a> {
    toilet: &'a ToiletRecord,
}

impl<'a> ToiletPopup<'a> {
    pub fn new(toilet: &'a ToiletRecord) -> Self {
        Self { toilet }
    }

    /// Shows the popup with its bottom edge centered on `anchor`. Returns
    /// `false` once the user closes it.
    pub fn show(&self, ctx: &egui::Context, anchor: Pos2) -> bool {
        let mut open = true;
        let [address, arrondissement, hours] = self.toilet.popup_lines();

        egui::Area::new(Id::new(("toilet-popup", self.toilet.id.to_string())))
            .order(Order::Foreground)
            .fixed_pos(anchor)
            .pivot(Align2::CENTER_BOTTOM)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_max_width(240.0);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(address).strong().size(18.0));
                        if ui.small_button("✖").clicked() {
                            open = false;
                        }
                    });
                    ui.label(RichText::new(arrondissement).size(14.0));
                    ui.label(
                        RichText::new(hours)
                            .size(14.0)
                            .color(Color32::from_rgb(0, 150, 255)),
                    );
                });
            });

        open
    }
}
