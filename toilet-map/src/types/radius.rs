use std::fmt;

/// Search distance around the center, in meters.
///
/// Always within [`Radius::MIN`, `Radius::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Radius(u32);

impl Radius {
    pub const MIN: u32 = 10;
    pub const MAX: u32 = 100;

    /// Builds a radius, clamping `meters` into the allowed range.
    pub fn new(meters: u32) -> Self {
        Self(meters.clamp(Self::MIN, Self::MAX))
    }

    pub fn meters(self) -> u32 {
        self.0
    }
}

impl Default for Radius {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for Radius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
