use std::fmt;

use serde::Deserialize;
use walkers::Position;

/// Identifier of a toilet as sent by the lookup service. Either a number or a
/// string, depending on the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum ToiletId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ToiletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToiletId::Number(n) => write!(f, "{}", n),
            ToiletId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// GeoJSON point. `coordinates` is `[lng, lat]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoPoint {
    pub coordinates: [f64; 2],
}

/// One public toilet returned by the lookup service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToiletRecord {
    pub id: ToiletId,
    pub address: String,
    #[serde(default)]
    pub arrondissement: String,
    #[serde(default)]
    pub hours: String,
    pub position: GeoPoint,
}

impl ToiletRecord {
    /// Where the marker goes. The GeoJSON axis order is swapped here.
    pub fn marker_position(&self) -> Position {
        let [lng, lat] = self.position.coordinates;
        Position::from_lat_lon(lat, lng)
    }

    /// Lines shown in the marker popup: address first, then arrondissement
    /// and opening hours.
    pub fn popup_lines(&self) -> [&str; 3] {
        [
            self.address.as_str(),
            self.arrondissement.as_str(),
            self.hours.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[{"id":1,"address":"12 Rue X","arrondissement":"75001","hours":"24/7","position":{"coordinates":[2.30,48.86]}}]"#;

    #[test]
    fn parses_service_payload() {
        let records: Vec<ToiletRecord> = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, ToiletId::Number(1));
        assert_eq!(records[0].popup_lines(), ["12 Rue X", "75001", "24/7"]);
    }

    #[test]
    fn marker_swaps_geojson_axes() {
        let records: Vec<ToiletRecord> = serde_json::from_str(SAMPLE).unwrap();
        let position = records[0].marker_position();
        assert_eq!(position.lat(), 48.86);
        assert_eq!(position.lon(), 2.30);
    }

    #[test]
    fn accepts_string_ids_and_sparse_records() {
        let payload = r#"{"id":"abc123","address":"Quai Branly","position":{"type":"Point","coordinates":[2.29,48.85]}}"#;
        let record: ToiletRecord = serde_json::from_str(payload).unwrap();
        assert_eq!(record.id.to_string(), "abc123");
        assert_eq!(record.hours, "");
        assert_eq!(record.arrondissement, "");
    }

    #[test]
    fn rejects_record_without_position() {
        let payload = r#"{"id":2,"address":"Nowhere"}"#;
        assert!(serde_json::from_str::<ToiletRecord>(payload).is_err());
    }
}
