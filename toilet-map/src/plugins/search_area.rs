use egui::{Color32, Image, Rect, Response, Stroke, Vec2};
use walkers::{Plugin, Position, Projector};

use crate::types::{Coordinate, Radius};

const CIRCLE_COLOR: Color32 = Color32::from_rgb(0xFF, 0x00, 0x00);
const CIRCLE_FILL: Color32 = Color32::from_rgba_premultiplied(0x33, 0x00, 0x00, 0x33);
const MARKER_SIZE: Vec2 = Vec2::new(40.0, 40.0);

/// Draws the search circle and the "you are here" marker, and reports
/// clicks on the map through the registered handler.
pub struct SearchArea<'a> {
    center: Position,
    radius: Radius,
    on_click: Option<Box<dyn FnMut(Coordinate) + 'a>>,
}

impl<'a> SearchArea<'a> {
    pub fn new(center: Coordinate, radius: Radius) -> Self {
        Self {
            center: center.to_position(),
            radius,
            on_click: None,
        }
    }

    /// Registers the handler called with the clicked latitude/longitude.
    pub fn on_click(mut self, handler: impl FnMut(Coordinate) + 'a) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }
}

impl Plugin for SearchArea<'_> {
    fn run(mut self: Box<Self>, ui: &mut egui::Ui, response: &Response, projector: &Projector) {
        if !response.changed() && response.clicked_by(egui::PointerButton::Primary) {
            if let (Some(handler), Some(pointer)) =
                (self.on_click.as_mut(), response.interact_pointer_pos())
            {
                let clicked = projector.unproject(pointer - response.rect.center());
                handler(Coordinate::from_position(clicked));
            }
        }

        let screen_center = projector.project(self.center).to_pos2();
        let radius_px = self.radius.meters() as f32 * projector.scale_pixel_per_meter(self.center);

        ui.painter().circle(
            screen_center,
            radius_px,
            CIRCLE_FILL,
            Stroke::new(2.0, CIRCLE_COLOR),
        );

        let rect = Rect::from_center_size(screen_center, MARKER_SIZE);
        ui.put(
            rect,
            Image::new(egui::include_image!("../../assets/position-marker.svg"))
                .fit_to_exact_size(MARKER_SIZE),
        );
    }
}
