mod coordinate;
pub use coordinate::{Coordinate, DEFAULT_LAT, DEFAULT_LNG};

mod coordinate_field;
pub use coordinate_field::{Axis, CoordinateField};

mod radius;
pub use radius::Radius;

mod toilet;
pub use toilet::{GeoPoint, ToiletId, ToiletRecord};
