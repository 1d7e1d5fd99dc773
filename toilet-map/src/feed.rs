use std::{
    sync::{
        mpsc::{self, Receiver, Sender},
        Arc,
    },
    thread,
};

use chrono::{DateTime, Utc};
use logger::{Color, Logger};

use crate::{
    lookup::{LookupError, ToiletLookup},
    trigger::{FetchReason, ToiletQuery},
    types::ToiletRecord,
};

struct Delivery {
    generation: u64,
    result: Result<Vec<ToiletRecord>, LookupError>,
}

/// Runs toilet lookups off the UI thread and keeps the current toilet list.
///
/// Every request gets a generation number. Responses come back in any
/// order; only the one carrying the latest generation replaces the list,
/// older ones are dropped.
pub struct ToiletFeed {
    lookup: Arc<dyn ToiletLookup>,
    sender: Sender<Delivery>,
    receiver: Receiver<Delivery>,
    issued: u64,
    in_flight: usize,
    toilets: Vec<ToiletRecord>,
    last_updated: Option<DateTime<Utc>>,
    logger: Logger,
}

impl ToiletFeed {
    pub fn new(lookup: Arc<dyn ToiletLookup>, logger: Logger) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            lookup,
            sender,
            receiver,
            issued: 0,
            in_flight: 0,
            toilets: Vec::new(),
            last_updated: None,
            logger,
        }
    }

    /// Starts a lookup and returns its generation.
    pub fn request(&mut self, query: ToiletQuery, reason: FetchReason) -> u64 {
        self.issued += 1;
        let generation = self.issued;

        let _ = self.logger.info(
            &format!(
                "Lookup #{} ({:?}): r={} lat={} lng={}",
                generation, reason, query.radius, query.center.lat, query.center.lng
            ),
            Color::Cyan,
        );

        let lookup = Arc::clone(&self.lookup);
        let sender = self.sender.clone();
        let spawned = thread::Builder::new()
            .name(format!("toilet-lookup-{}", generation))
            .spawn(move || {
                let result = lookup.find(&query);
                // The feed may be gone already; nobody is left to tell.
                let _ = sender.send(Delivery { generation, result });
            });

        match spawned {
            Ok(_) => self.in_flight += 1,
            Err(e) => {
                let _ = self
                    .logger
                    .error(&format!("Could not start lookup #{}: {}", generation, e));
            }
        }

        generation
    }

    /// Applies every response that arrived since the last call. Returns
    /// whether the toilet list was replaced.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;

        while let Ok(delivery) = self.receiver.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);

            if delivery.generation != self.issued {
                let _ = self.logger.info(
                    &format!(
                        "Dropping stale lookup #{} (latest is #{})",
                        delivery.generation, self.issued
                    ),
                    Color::Yellow,
                );
                continue;
            }

            match delivery.result {
                Ok(toilets) => {
                    let _ = self.logger.info(
                        &format!(
                            "Lookup #{} returned {} toilets",
                            delivery.generation,
                            toilets.len()
                        ),
                        Color::Green,
                    );
                    self.toilets = toilets;
                    self.last_updated = Some(Utc::now());
                    changed = true;
                }
                Err(e) => {
                    let _ = self
                        .logger
                        .error(&format!("Lookup #{} failed: {}", delivery.generation, e));
                }
            }
        }

        changed
    }

    pub fn toilets(&self) -> &[ToiletRecord] {
        &self.toilets
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn latest_generation(&self) -> u64 {
        self.issued
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        state::ViewState,
        types::{Coordinate, GeoPoint, Radius, ToiletId},
    };
    use std::{
        sync::Mutex,
        time::{Duration, Instant},
    };

    /// Answers every query with one toilet whose id is the radius, after a
    /// delay chosen per radius.
    pub(crate) struct MockLookup {
        pub queries: Mutex<Vec<ToiletQuery>>,
        pub delays: Vec<(u32, Duration)>,
        pub fail: bool,
    }

    impl MockLookup {
        pub(crate) fn new() -> Self {
            Self {
                queries: Mutex::new(Vec::new()),
                delays: Vec::new(),
                fail: false,
            }
        }

        pub(crate) fn urls(&self) -> Vec<String> {
            self.queries
                .lock()
                .unwrap()
                .iter()
                .map(|query| query.url(""))
                .collect()
        }
    }

    impl ToiletLookup for MockLookup {
        fn find(&self, query: &ToiletQuery) -> Result<Vec<ToiletRecord>, LookupError> {
            self.queries.lock().unwrap().push(*query);
            if let Some((_, delay)) = self
                .delays
                .iter()
                .find(|(radius, _)| *radius == query.radius.meters())
            {
                thread::sleep(*delay);
            }
            if self.fail {
                return Err(LookupError::Status(500));
            }
            Ok(vec![ToiletRecord {
                id: ToiletId::Number(query.radius.meters() as i64),
                address: "12 Rue X".to_string(),
                arrondissement: "75001".to_string(),
                hours: "24/7".to_string(),
                position: GeoPoint {
                    coordinates: [query.center.lng, query.center.lat],
                },
            }])
        }
    }

    pub(crate) fn settle(feed: &mut ToiletFeed) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut changed = false;
        while feed.in_flight() > 0 && Instant::now() < deadline {
            changed |= feed.poll();
            thread::sleep(Duration::from_millis(5));
        }
        changed | feed.poll()
    }

    fn query(radius: u32) -> ToiletQuery {
        ToiletQuery {
            radius: Radius::new(radius),
            center: Coordinate::default(),
        }
    }

    #[test]
    fn applies_response_of_single_request() {
        let lookup = Arc::new(MockLookup::new());
        let mut feed = ToiletFeed::new(lookup.clone(), Logger::console(false));

        let generation = feed.request(
            ToiletQuery::from_state(&ViewState::default()),
            FetchReason::Initial,
        );
        assert_eq!(generation, 1);
        assert!(settle(&mut feed));

        assert_eq!(lookup.urls(), vec!["/toilet?r=10&lat=48.8584&lng=2.2945"]);
        assert_eq!(feed.toilets().len(), 1);
        assert!(feed.last_updated().is_some());
        assert_eq!(feed.in_flight(), 0);
    }

    #[test]
    fn stale_response_never_overwrites_newer_one() {
        let mut lookup = MockLookup::new();
        lookup.delays.push((10, Duration::from_millis(200)));
        let lookup = Arc::new(lookup);
        let mut feed = ToiletFeed::new(lookup.clone(), Logger::console(false));

        feed.request(query(10), FetchReason::Initial);
        feed.request(query(50), FetchReason::RadiusChanged);
        settle(&mut feed);

        assert_eq!(feed.latest_generation(), 2);
        assert_eq!(feed.toilets().len(), 1);
        assert_eq!(feed.toilets()[0].id, ToiletId::Number(50));
    }

    #[test]
    fn failure_keeps_previous_list() {
        let lookup = Arc::new(MockLookup::new());
        let mut feed = ToiletFeed::new(lookup, Logger::console(false));
        feed.request(query(10), FetchReason::Initial);
        settle(&mut feed);
        assert_eq!(feed.toilets().len(), 1);

        let mut failing = MockLookup::new();
        failing.fail = true;
        feed.lookup = Arc::new(failing);
        feed.request(query(20), FetchReason::RadiusChanged);
        assert!(!settle(&mut feed));

        assert_eq!(feed.toilets()[0].id, ToiletId::Number(10));
    }

    #[test]
    fn list_is_replaced_wholesale() {
        let lookup = Arc::new(MockLookup::new());
        let mut feed = ToiletFeed::new(lookup, Logger::console(false));

        feed.request(query(10), FetchReason::Initial);
        settle(&mut feed);
        feed.request(query(30), FetchReason::RadiusChanged);
        settle(&mut feed);

        assert_eq!(feed.toilets().len(), 1);
        assert_eq!(feed.toilets()[0].id, ToiletId::Number(30));
    }
}
