use crate::types::{Coordinate, Radius, ToiletId, ToiletRecord};

/// Tracks which toilet popup is open.
#[derive(Debug, Default)]
pub struct SelectionState {
    pub toilet: Option<ToiletId>,
}

impl SelectionState {
    pub fn new() -> SelectionState {
        Self { toilet: None }
    }

    /// If the provided toilet is already selected, it will be deselected.
    /// Otherwise, it will be selected.
    pub fn toggle_toilet(&mut self, id: &ToiletId) {
        if self.toilet.as_ref() == Some(id) {
            self.toilet = None;
        } else {
            self.toilet = Some(id.clone());
        }
    }

    pub fn is_selected(&self, id: &ToiletId) -> bool {
        self.toilet.as_ref() == Some(id)
    }

    /// Drops the selection if the toilet is no longer listed.
    pub fn retain_listed(&mut self, toilets: &[ToiletRecord]) {
        if let Some(selected) = &self.toilet {
            if !toilets.iter().any(|toilet| toilet.id == *selected) {
                self.toilet = None;
            }
        }
    }
}

/// The search center and radius. Only the setters below write them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    center: Coordinate,
    radius: Radius,
}

impl ViewState {
    pub fn new(center: Coordinate, radius: Radius) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn radius(&self) -> Radius {
        self.radius
    }

    pub fn set_radius(&mut self, radius: Radius) {
        self.radius = radius;
    }

    pub fn set_lat(&mut self, lat: f64) {
        self.center.lat = lat;
    }

    pub fn set_lng(&mut self, lng: f64) {
        self.center.lng = lng;
    }

    pub fn set_center(&mut self, center: Coordinate) {
        self.center = center;
    }
}
