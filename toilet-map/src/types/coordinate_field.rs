/// Which half of a [`super::Coordinate`] a field edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Lat,
    Lng,
}

impl Axis {
    fn limit(self) -> f64 {
        match self {
            Axis::Lat => 90.0,
            Axis::Lng => 180.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::Lat => "Latitude",
            Axis::Lng => "Longitude",
        }
    }
}

/// A numeric text input that keeps free-form interim text apart from the
/// last committed value.
///
/// The text can hold anything while the user types. Only [`commit`] turns it
/// into a number, and only if it parses and lies within the axis range.
///
/// [`commit`]: CoordinateField::commit
#[derive(Debug, Clone)]
pub struct CoordinateField {
    axis: Axis,
    pub text: String,
    value: f64,
    invalid: bool,
}

impl CoordinateField {
    pub fn new(axis: Axis, value: f64) -> Self {
        Self {
            axis,
            text: value.to_string(),
            value,
            invalid: false,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Whether the last commit attempt was rejected.
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Parses the interim text. On success the value is committed and
    /// returned; on failure the previous value is kept and the field is
    /// flagged until the next successful commit or an external change.
    pub fn commit(&mut self) -> Option<f64> {
        match self.text.trim().parse::<f64>() {
            Ok(parsed) if parsed.is_finite() && parsed.abs() <= self.axis.limit() => {
                self.value = parsed;
                self.invalid = false;
                Some(parsed)
            }
            _ => {
                self.invalid = true;
                None
            }
        }
    }

    /// Overwrites text and value with a value that was set elsewhere
    /// (geolocation, map click). A rejected entry stays on screen, flagged,
    /// until the committed value actually moves.
    pub fn sync(&mut self, value: f64) {
        if self.value != value {
            self.value = value;
            self.text = value.to_string();
            self.invalid = false;
        }
    }
}
