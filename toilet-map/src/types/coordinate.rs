use walkers::Position;

/// Latitude of the fallback center (Champ de Mars, Paris).
pub const DEFAULT_LAT: f64 = 48.8584;
/// Longitude of the fallback center (Champ de Mars, Paris).
pub const DEFAULT_LNG: f64 = 2.2945;

/// A latitude/longitude pair identifying the map center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn to_position(self) -> Position {
        Position::from_lat_lon(self.lat, self.lng)
    }

    pub fn from_position(position: Position) -> Self {
        Self::new(position.lat(), position.lon())
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::new(DEFAULT_LAT, DEFAULT_LNG)
    }
}
