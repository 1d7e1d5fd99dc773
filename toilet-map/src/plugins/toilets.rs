use std::{cell::RefCell, rc::Rc};

use egui::{include_image, Image, Rect, Response, Vec2};
use walkers::{Plugin, Projector};

use crate::{state::SelectionState, types::ToiletRecord, widgets::ToiletPopup};

const MARKER_SIZE: Vec2 = Vec2::new(32.0, 50.0);

pub struct Toilets<'a> {
    toilets: &'a [ToiletRecord],
    selection_state: Rc<RefCell<SelectionState>>,
}

impl<'a> Toilets<'a> {
    pub fn new(toilets: &'a [ToiletRecord], selection_state: Rc<RefCell<SelectionState>>) -> Self {
        Self {
            toilets,
            selection_state,
        }
    }
}

impl Plugin for Toilets<'_> {
    fn run(self: Box<Self>, ui: &mut egui::Ui, _response: &Response, projector: &Projector) {
        for toilet in self.toilets {
            toilet.draw(ui, projector, &mut self.selection_state.borrow_mut());
        }

        let selected = self.selection_state.borrow().toilet.clone();
        if let Some(id) = selected {
            if let Some(toilet) = self.toilets.iter().find(|toilet| toilet.id == id) {
                let tip = projector.project(toilet.marker_position()).to_pos2();
                let anchor = tip - Vec2::new(0.0, MARKER_SIZE.y);
                if !ToiletPopup::new(toilet).show(ui.ctx(), anchor) {
                    self.selection_state.borrow_mut().toilet = None;
                }
            }
        }
    }
}

impl ToiletRecord {
    fn draw(&self, ui: &mut egui::Ui, projector: &Projector, selection_state: &mut SelectionState) {
        let tip = projector.project(self.marker_position()).to_pos2();

        // The pin points down at the toilet.
        let rect = Rect::from_min_size(tip - Vec2::new(MARKER_SIZE.x / 2.0, MARKER_SIZE.y), MARKER_SIZE);

        let response = ui.allocate_rect(rect, egui::Sense::click());

        let image = if response.hovered() || selection_state.is_selected(&self.id) {
            Image::new(include_image!("../../assets/toilet-marker-selected.svg"))
        } else {
            Image::new(include_image!("../../assets/toilet-marker.svg"))
        }
        .fit_to_exact_size(MARKER_SIZE);

        ui.put(rect, image);

        if response.clicked() {
            selection_state.toggle_toilet(&self.id);
        }
    }
}
