use std::{
    cell::RefCell,
    rc::Rc,
    sync::mpsc::{Receiver, TryRecvError},
};

use logger::{Color, Logger};

use crate::{
    feed::ToiletFeed,
    location::LocationError,
    state::{SelectionState, ViewState},
    trigger::FetchTrigger,
    types::{Coordinate, Radius, ToiletRecord},
};

type LocationReceiver = Receiver<Result<Coordinate, LocationError>>;

/// Everything the map view shows, minus the drawing: view state, the fetch
/// trigger, the toilet feed and the pending geolocation.
pub struct ToiletMapModel {
    view_state: ViewState,
    selection_state: Rc<RefCell<SelectionState>>,
    trigger: FetchTrigger,
    feed: ToiletFeed,
    location: Option<LocationReceiver>,
    logger: Logger,
}

impl ToiletMapModel {
    pub fn new(
        default_center: Coordinate,
        feed: ToiletFeed,
        location: Option<LocationReceiver>,
        logger: Logger,
    ) -> Self {
        Self {
            view_state: ViewState::new(default_center, Radius::default()),
            selection_state: Rc::new(RefCell::new(SelectionState::new())),
            trigger: FetchTrigger::new(),
            feed,
            location,
            logger,
        }
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn view_state_mut(&mut self) -> &mut ViewState {
        &mut self.view_state
    }

    pub fn selection_state(&self) -> Rc<RefCell<SelectionState>> {
        Rc::clone(&self.selection_state)
    }

    pub fn feed(&self) -> &ToiletFeed {
        &self.feed
    }

    pub fn toilets(&self) -> &[ToiletRecord] {
        self.feed.toilets()
    }

    /// Whether a geolocation or a lookup is still pending.
    pub fn busy(&self) -> bool {
        self.location.is_some() || self.feed.in_flight() > 0
    }

    /// Runs once per frame: takes in the geolocation result, issues a lookup
    /// if center or radius moved, and applies finished lookups.
    ///
    /// Returns `true` if the center was moved by geolocation.
    pub fn update(&mut self) -> bool {
        let relocated = self.poll_location();

        if let Some((query, reason)) = self.trigger.observe(&self.view_state) {
            self.feed.request(query, reason);
        }

        if self.feed.poll() {
            self.selection_state
                .borrow_mut()
                .retain_listed(self.feed.toilets());
        }

        relocated
    }

    /// Form submission: picks up pending edits and always issues one more
    /// lookup with the current values.
    pub fn submit(&mut self) {
        if let Some((query, reason)) = self.trigger.observe(&self.view_state) {
            self.feed.request(query, reason);
        }
        let (query, reason) = self.trigger.manual(&self.view_state);
        self.feed.request(query, reason);
    }

    /// Map click handler.
    pub fn click(&mut self, center: Coordinate) {
        self.view_state.set_center(center);
    }

    fn poll_location(&mut self) -> bool {
        let Some(receiver) = &self.location else {
            return false;
        };

        let outcome = match receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                Err(LocationError::Unavailable("geolocation worker vanished".into()))
            }
        };
        self.location = None;

        match outcome {
            Ok(center) => {
                let _ = self.logger.info(
                    &format!("Located at lat={} lng={}", center.lat, center.lng),
                    Color::Green,
                );
                self.view_state.set_center(center);
                true
            }
            Err(e) => {
                let _ = self
                    .logger
                    .warn(&format!("Geolocation failed, keeping default center: {}", e));
                false
            }
        }
    }
}
