use crate::{
    state::ViewState,
    types::{Coordinate, Radius},
};

/// Parameters of one toilet lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToiletQuery {
    pub radius: Radius,
    pub center: Coordinate,
}

impl ToiletQuery {
    pub fn from_state(state: &ViewState) -> Self {
        Self {
            radius: state.radius(),
            center: state.center(),
        }
    }

    /// Full request URL against `endpoint`, e.g.
    /// `http://localhost:5000/toilet?r=10&lat=48.8584&lng=2.2945`.
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/toilet?r={}&lat={}&lng={}",
            endpoint.trim_end_matches('/'),
            self.radius,
            self.center.lat,
            self.center.lng
        )
    }
}

/// Why a query was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchReason {
    Initial,
    RadiusChanged,
    CenterChanged,
    CenterAndRadiusChanged,
    Manual,
}

/// Watches the view state and decides when a new lookup is due.
///
/// Radius and center are observed independently; a frame in which both
/// changed produces a single query.
#[derive(Debug, Default)]
pub struct FetchTrigger {
    last_seen: Option<ToiletQuery>,
}

impl FetchTrigger {
    pub fn new() -> Self {
        Self { last_seen: None }
    }

    /// Compares the state with the last observed snapshot. Returns the query
    /// to issue if anything changed (or if nothing was observed yet).
    pub fn observe(&mut self, state: &ViewState) -> Option<(ToiletQuery, FetchReason)> {
        let current = ToiletQuery::from_state(state);
        let reason = match &self.last_seen {
            None => FetchReason::Initial,
            Some(previous) => {
                let radius_changed = previous.radius != current.radius;
                let center_changed = previous.center != current.center;
                match (radius_changed, center_changed) {
                    (false, false) => return None,
                    (true, false) => FetchReason::RadiusChanged,
                    (false, true) => FetchReason::CenterChanged,
                    (true, true) => FetchReason::CenterAndRadiusChanged,
                }
            }
        };
        self.last_seen = Some(current);
        Some((current, reason))
    }

    /// Form submission: always yields a query with the current values.
    pub fn manual(&mut self, state: &ViewState) -> (ToiletQuery, FetchReason) {
        let current = ToiletQuery::from_state(state);
        self.last_seen = Some(current);
        (current, FetchReason::Manual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_url() {
        let query = ToiletQuery::from_state(&ViewState::default());
        assert_eq!(
            query.url("http://localhost:5000"),
            "http://localhost:5000/toilet?r=10&lat=48.8584&lng=2.2945"
        );
        assert_eq!(
            query.url("http://localhost:5000/"),
            "http://localhost:5000/toilet?r=10&lat=48.8584&lng=2.2945"
        );
    }

    #[test]
    fn first_observation_fires_once() {
        let mut trigger = FetchTrigger::new();
        let state = ViewState::default();

        let (query, reason) = trigger.observe(&state).unwrap();
        assert_eq!(reason, FetchReason::Initial);
        assert_eq!(query, ToiletQuery::from_state(&state));

        assert!(trigger.observe(&state).is_none());
    }

    #[test]
    fn radius_change_fires_with_new_radius_and_same_center() {
        let mut trigger = FetchTrigger::new();
        let mut state = ViewState::default();
        trigger.observe(&state);

        state.set_radius(Radius::new(50));
        let (query, reason) = trigger.observe(&state).unwrap();

        assert_eq!(reason, FetchReason::RadiusChanged);
        assert_eq!(
            query.url("http://h"),
            "http://h/toilet?r=50&lat=48.8584&lng=2.2945"
        );
        assert!(trigger.observe(&state).is_none());
    }

    #[test]
    fn center_change_fires() {
        let mut trigger = FetchTrigger::new();
        let mut state = ViewState::default();
        trigger.observe(&state);

        state.set_center(Coordinate::new(48.9, 2.3));
        let (query, reason) = trigger.observe(&state).unwrap();

        assert_eq!(reason, FetchReason::CenterChanged);
        assert_eq!(query.url("http://h"), "http://h/toilet?r=10&lat=48.9&lng=2.3");
    }

    #[test]
    fn simultaneous_changes_coalesce() {
        let mut trigger = FetchTrigger::new();
        let mut state = ViewState::default();
        trigger.observe(&state);

        state.set_radius(Radius::new(20));
        state.set_lat(48.0);
        let (_, reason) = trigger.observe(&state).unwrap();
        assert_eq!(reason, FetchReason::CenterAndRadiusChanged);
        assert!(trigger.observe(&state).is_none());
    }

    #[test]
    fn setting_same_value_does_not_fire() {
        let mut trigger = FetchTrigger::new();
        let mut state = ViewState::default();
        trigger.observe(&state);

        state.set_center(Coordinate::default());
        state.set_radius(Radius::new(10));
        assert!(trigger.observe(&state).is_none());
    }

    #[test]
    fn manual_always_fires() {
        let mut trigger = FetchTrigger::new();
        let state = ViewState::default();
        trigger.observe(&state);

        let (query, reason) = trigger.manual(&state);
        assert_eq!(reason, FetchReason::Manual);
        assert_eq!(query, ToiletQuery::from_state(&state));
        let (_, reason) = trigger.manual(&state);
        assert_eq!(reason, FetchReason::Manual);
    }
}
